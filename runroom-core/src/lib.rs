//! Running Room Core Library
//!
//! Models and the REST client for the running room console, the calendar
//! navigation behind the kitchen menu views, and the building, room and
//! bed occupancy administration.

pub mod api;
pub mod calendar;
pub mod context;
pub mod copy_forward;
pub mod forms;
pub mod models;
pub mod navigator;

pub use api::{ApiClient, ApiError, BuildingApi, CatalogApi, MenuApi, OccupancyApi, RoomApi};
pub use calendar::{Direction, Period, View, WeekPosition};
pub use context::AppContext;
pub use copy_forward::{available_copy_action, CopyAction};
pub use forms::{BuildingDraft, FormError, MenuDraft, MenuItemDraft, RoomDraft};
pub use models::{
    Bed, Building, EnumCatalog, EnumItem, MealCategory, MealType, Menu, MenuItem, Room,
    RoomOccupancy, Tone,
};
pub use navigator::{ActionOutcome, MenuNavigator, NO_PREVIOUS_WEEK_MENU};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
