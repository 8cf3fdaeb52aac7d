//! Client-side checks for the edit forms: menus, menu items, buildings
//! and rooms.
//!
//! Only field presence is checked here. Cross-item rules (such as
//! duplicate names within a meal) are left to the server.

use chrono::NaiveDate;

use crate::models::{
    Building, EnumCatalog, EnumItem, MealCategory, MealType, Menu, MenuItem, Room,
};

#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    /// A required field was left empty
    MissingField(&'static str),
    /// Price was negative or not a number
    InvalidPrice(f64),
    /// A select field holds a key the enum catalog does not offer
    UnknownOption { field: &'static str, value: String },
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::MissingField(field) => write!(f, "{} is required", field),
            FormError::InvalidPrice(price) => {
                write!(f, "Price must be zero or more (got {})", price)
            }
            FormError::UnknownOption { field, value } => {
                write!(f, "Unknown {} '{}'", field.to_lowercase(), value)
            }
        }
    }
}

impl std::error::Error for FormError {}

/// Editable state of the menu item form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuItemDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub meal_type: Option<MealType>,
    pub meal_category: Option<MealCategory>,
}

impl MenuItemDraft {
    /// Pre-fills the form from an existing item.
    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            meal_type: Some(item.meal_type),
            meal_category: Some(item.meal_category.clone()),
        }
    }

    /// Checks required fields and builds the item to send.
    pub fn validate(&self) -> Result<MenuItem, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingField("Name"));
        }
        let meal_type = self.meal_type.ok_or(FormError::MissingField("Meal type"))?;
        let meal_category = match &self.meal_category {
            Some(MealCategory::Other(s)) if s.trim().is_empty() => {
                return Err(FormError::MissingField("Meal category"))
            }
            Some(c) => c.clone(),
            None => return Err(FormError::MissingField("Meal category")),
        };
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(FormError::InvalidPrice(self.price));
        }

        Ok(MenuItem::new(name, meal_type, meal_category)
            .with_description(self.description.trim())
            .with_price(self.price))
    }
}

/// Editable state of the menu form: a menu only carries its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuDraft {
    pub menu_date: NaiveDate,
}

impl MenuDraft {
    pub fn new(menu_date: NaiveDate) -> Self {
        Self { menu_date }
    }

    pub fn from_menu(menu: &Menu) -> Self {
        Self {
            menu_date: menu.menu_date,
        }
    }
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(value.to_string())
}

/// Editable state of the building form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildingDraft {
    pub building_name: String,
    pub address: String,
    pub floors: Option<u32>,
    pub description: String,
}

impl BuildingDraft {
    pub fn from_building(building: &Building) -> Self {
        Self {
            building_name: building.building_name.clone(),
            address: building.address.clone(),
            floors: Some(building.floors),
            description: building.description.clone(),
        }
    }

    /// Name, address and floors are required.
    pub fn validate(&self) -> Result<Building, FormError> {
        let name = required(&self.building_name, "Building name")?;
        let address = required(&self.address, "Address")?;
        let floors = self.floors.ok_or(FormError::MissingField("Floors"))?;

        Ok(Building::new(name, address, floors).with_description(self.description.trim()))
    }
}

/// Editable state of the room form. Every field but the description is
/// required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomDraft {
    pub room_number: String,
    pub room_type: String,
    pub ac: Option<bool>,
    pub capacity: Option<u32>,
    pub floor: Option<i32>,
    pub building_id: String,
    pub crew_type: String,
    pub room_category: String,
    pub bed_count: Option<u32>,
    pub attachment: String,
    pub status: String,
    pub description: String,
}

impl RoomDraft {
    pub fn from_room(room: &Room) -> Self {
        Self {
            room_number: room.room_number.clone(),
            room_type: room.room_type.clone(),
            ac: Some(room.ac),
            capacity: Some(room.capacity),
            floor: Some(room.floor),
            building_id: room.building_id.clone(),
            crew_type: room.crew_type.clone(),
            room_category: room.room_category.clone(),
            bed_count: Some(room.bed_count),
            attachment: room.attachment.clone(),
            status: room.status.clone(),
            description: room.description.clone(),
        }
    }

    /// Checks fields in form order and builds the room to send.
    pub fn validate(&self) -> Result<Room, FormError> {
        Ok(Room {
            id: None,
            room_number: required(&self.room_number, "Room number")?,
            room_type: required(&self.room_type, "Room type")?,
            ac: self.ac.ok_or(FormError::MissingField("AC"))?,
            capacity: self.capacity.ok_or(FormError::MissingField("Capacity"))?,
            floor: self.floor.ok_or(FormError::MissingField("Floor"))?,
            building_id: required(&self.building_id, "Building")?,
            building_name: None,
            crew_type: required(&self.crew_type, "Crew type")?,
            room_category: required(&self.room_category, "Room category")?,
            bed_count: self.bed_count.ok_or(FormError::MissingField("Bed count"))?,
            attachment: required(&self.attachment, "Attachment type")?,
            status: required(&self.status, "Status")?,
            description: self.description.trim().to_string(),
        })
    }

    /// Checks the select fields against the catalog. A list the server
    /// did not send is not checked.
    pub fn check_options(&self, catalog: &EnumCatalog) -> Result<(), FormError> {
        let selects: [(&'static str, &[EnumItem], &str); 5] = [
            ("Room type", &catalog.room_types, &self.room_type),
            ("Crew type", &catalog.crew_types, &self.crew_type),
            ("Room category", &catalog.room_category, &self.room_category),
            ("Attachment type", &catalog.attachment_type, &self.attachment),
            ("Status", &catalog.room_status, &self.status),
        ];
        for (field, items, value) in selects {
            let value = value.trim();
            if !items.is_empty() && !value.is_empty() && !items.iter().any(|i| i.key == value) {
                return Err(FormError::UnknownOption {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}
