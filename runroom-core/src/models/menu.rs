use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::meal_category::MealCategory;
use super::meal_type::MealType;

/// A single dish offered on a menu.
///
/// `id` is assigned by the server and is absent on items that have not
/// been saved yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    pub meal_type: MealType,
    pub meal_category: MealCategory,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, meal_type: MealType, meal_category: MealCategory) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            price: 0.0,
            meal_type,
            meal_category,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// The menu served on one calendar date.
///
/// The server keeps at most one menu per date; this client only ever
/// holds a copy fetched for the current view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: String,
    pub menu_date: NaiveDate,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl Menu {
    /// Items grouped by meal type in breakfast-to-snacks order. Meal types
    /// without items are left out.
    pub fn grouped_items(&self) -> Vec<(MealType, Vec<&MenuItem>)> {
        MealType::ORDER
            .iter()
            .filter_map(|meal| {
                let items: Vec<&MenuItem> = self
                    .items
                    .iter()
                    .filter(|item| item.meal_type == *meal)
                    .collect();
                (!items.is_empty()).then_some((*meal, items))
            })
            .collect()
    }

    pub fn find_item(&self, item_id: &str) -> Option<&MenuItem> {
        self.items
            .iter()
            .find(|item| item.id.as_deref() == Some(item_id))
    }
}

/// Orders menus by date, earliest first.
pub fn sort_by_date(menus: &mut [Menu]) {
    menus.sort_by_key(|m| m.menu_date);
}

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.menu_date.format("%a, %b %-d, %Y").to_string();
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(title.len()))?;

        if self.items.is_empty() {
            writeln!(f, "  (no items)")?;
            return Ok(());
        }

        for (meal, items) in self.grouped_items() {
            writeln!(f, "{}", meal)?;
            for item in items {
                write!(
                    f,
                    "  - {} [{}, {}]",
                    item.name,
                    item.meal_category,
                    item.meal_category.tone()
                )?;
                if item.price > 0.0 {
                    write!(f, "  ₹{}", item.price)?;
                }
                if let Some(id) = &item.id {
                    write!(f, "  ({})", id)?;
                }
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_menu() -> Menu {
        Menu {
            id: "m1".to_string(),
            menu_date: date(2024, 3, 4),
            items: vec![
                MenuItem::new("Dal", MealType::Dinner, MealCategory::Veg),
                MenuItem::new("Poha", MealType::Breakfast, MealCategory::Veg),
                MenuItem::new("Chicken Curry", MealType::Dinner, MealCategory::NonVeg)
                    .with_price(120.0),
            ],
        }
    }

    #[test]
    fn test_grouped_items_follow_meal_order() {
        let menu = sample_menu();
        let groups = menu.grouped_items();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, MealType::Breakfast);
        assert_eq!(groups[1].0, MealType::Dinner);
        assert_eq!(groups[1].1.len(), 2);
        assert_eq!(groups[1].1[0].name, "Dal");
    }

    #[test]
    fn test_duplicate_names_within_meal_are_kept() {
        let mut menu = sample_menu();
        menu.items
            .push(MenuItem::new("Dal", MealType::Dinner, MealCategory::Veg));

        let groups = menu.grouped_items();
        assert_eq!(groups[1].1.len(), 3);
    }

    #[test]
    fn test_menu_from_server_json() {
        let json = r#"{
            "id": "42",
            "menuDate": "2024-03-05",
            "items": [
                {"id": "7", "name": "Idli", "description": "", "price": 30,
                 "mealType": "BREAKFAST", "mealCategory": "VEG"}
            ]
        }"#;

        let menu: Menu = serde_json::from_str(json).unwrap();
        assert_eq!(menu.id, "42");
        assert_eq!(menu.menu_date, date(2024, 3, 5));
        assert_eq!(menu.items[0].id.as_deref(), Some("7"));
        assert_eq!(menu.items[0].price, 30.0);
        assert!(menu.find_item("7").is_some());
        assert!(menu.find_item("8").is_none());
    }

    #[test]
    fn test_menu_without_items_field() {
        let menu: Menu = serde_json::from_str(r#"{"id":"1","menuDate":"2024-03-05"}"#).unwrap();
        assert!(menu.items.is_empty());
    }

    #[test]
    fn test_unsaved_item_omits_id() {
        let item = MenuItem::new("Tea", MealType::Snacks, MealCategory::Veg);
        let value = serde_json::to_value(&item).unwrap();

        assert!(value.get("id").is_none());
        assert_eq!(value["mealType"], "SNACKS");
        assert_eq!(value["mealCategory"], "VEG");
    }

    #[test]
    fn test_sort_by_date() {
        let mut menus = vec![
            Menu {
                id: "b".into(),
                menu_date: date(2024, 3, 6),
                items: vec![],
            },
            Menu {
                id: "a".into(),
                menu_date: date(2024, 3, 4),
                items: vec![],
            },
        ];
        sort_by_date(&mut menus);
        assert_eq!(menus[0].id, "a");
    }

    #[test]
    fn test_menu_display() {
        let output = format!("{}", sample_menu());
        assert!(output.contains("Mon, Mar 4, 2024"));
        assert!(output.contains("BREAKFAST"));
        assert!(output.contains("Chicken Curry [NON_VEG, red]"));
        assert!(output.contains("Poha [VEG, green]"));
        assert!(!output.contains("LUNCH"));
    }
}
