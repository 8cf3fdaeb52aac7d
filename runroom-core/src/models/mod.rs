mod building;
mod catalog;
mod meal_category;
mod meal_type;
mod menu;
mod occupancy;
mod room;
mod tone;

pub use building::{building_name, Building};
pub use catalog::{label_for, EnumCatalog, EnumItem};
pub use meal_category::MealCategory;
pub use meal_type::MealType;
pub use menu::{sort_by_date, Menu, MenuItem};
pub use occupancy::{Bed, RoomOccupancy};
pub use room::{attach_building_names, filter_by_number, Room};
pub use tone::Tone;
