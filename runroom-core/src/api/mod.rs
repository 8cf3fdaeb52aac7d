//! HTTP access to the running room API.
//!
//! ## Endpoints
//!
//! - `GET /menus?startDate=&endDate=` - menus in an inclusive date range
//! - `GET /menus/menu-by-date?date=` - the menu for one date, if any
//! - `POST /menus`, `PUT /menus/{id}`, `DELETE /menus/{id}`
//! - `POST /menus/{id}/items`, `PUT|DELETE /menus/{id}/items/{itemId}`
//! - `POST /menus/copy-week`, `POST /menus/copy-day` - bulk overwrite copies
//! - `GET /enums/all` - lookup lists
//! - `GET|POST /buildings`, `PUT|DELETE /buildings/{id}`
//! - `GET|POST|PUT /rooms`, `GET|DELETE /rooms/{id}` - room updates carry
//!   the id in the body
//! - `GET /bookings/dashboard` - beds per room number
//!
//! Dates travel as `YYYY-MM-DD`. Every mutation is a blind overwrite; the
//! caller is expected to refetch afterwards.

mod client;
mod error;
mod facilities;

use chrono::NaiveDate;

use crate::models::{Building, EnumCatalog, Menu, MenuItem, Room, RoomOccupancy};

pub use client::ApiClient;
pub use error::ApiError;

/// Menu endpoints used by the kitchen views.
#[allow(async_fn_in_trait)]
pub trait MenuApi {
    /// Menus dated within `[start, end]`.
    async fn list_menus(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Menu>, ApiError>;

    async fn menu_by_date(&self, date: NaiveDate) -> Result<Option<Menu>, ApiError>;

    async fn create_menu(&self, menu_date: NaiveDate) -> Result<Menu, ApiError>;

    async fn update_menu(&self, id: &str, menu_date: NaiveDate) -> Result<Menu, ApiError>;

    async fn delete_menu(&self, id: &str) -> Result<(), ApiError>;

    async fn add_item(&self, menu_id: &str, item: &MenuItem) -> Result<(), ApiError>;

    async fn update_item(&self, menu_id: &str, item_id: &str, item: &MenuItem)
        -> Result<(), ApiError>;

    async fn delete_item(&self, menu_id: &str, item_id: &str) -> Result<(), ApiError>;

    /// Overwrites the week starting `target_week_start` with a copy of the
    /// week starting `source_week_start`.
    async fn copy_week(
        &self,
        source_week_start: NaiveDate,
        target_week_start: NaiveDate,
    ) -> Result<(), ApiError>;

    /// Overwrites `target_date`'s menu with a copy of `source_date`'s.
    async fn copy_day(&self, source_date: NaiveDate, target_date: NaiveDate)
        -> Result<(), ApiError>;
}

/// Lookup lists shared across screens.
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    async fn fetch_enums(&self) -> Result<EnumCatalog, ApiError>;
}

/// Building administration.
#[allow(async_fn_in_trait)]
pub trait BuildingApi {
    async fn list_buildings(&self) -> Result<Vec<Building>, ApiError>;

    async fn create_building(&self, building: &Building) -> Result<(), ApiError>;

    async fn update_building(&self, id: &str, building: &Building) -> Result<(), ApiError>;

    async fn delete_building(&self, id: &str) -> Result<(), ApiError>;
}

/// Room administration.
#[allow(async_fn_in_trait)]
pub trait RoomApi {
    async fn list_rooms(&self) -> Result<Vec<Room>, ApiError>;

    async fn room_by_id(&self, id: &str) -> Result<Room, ApiError>;

    async fn create_room(&self, room: &Room) -> Result<(), ApiError>;

    /// Replaces the room identified by `id`.
    async fn update_room(&self, id: &str, room: &Room) -> Result<(), ApiError>;

    async fn delete_room(&self, id: &str) -> Result<(), ApiError>;
}

/// Live bed occupancy.
#[allow(async_fn_in_trait)]
pub trait OccupancyApi {
    async fn occupancy_dashboard(&self) -> Result<RoomOccupancy, ApiError>;
}
