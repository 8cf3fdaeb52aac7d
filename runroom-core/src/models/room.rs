use serde::{Deserialize, Serialize};
use std::fmt;

use super::building::{building_name, Building};

/// A room in one of the buildings. The enum-valued fields (`room_type`,
/// `crew_type`, `room_category`, `attachment`, `status`) hold catalog keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub room_number: String,
    #[serde(default)]
    pub room_type: String,
    #[serde(default)]
    pub ac: bool,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub floor: i32,
    #[serde(default)]
    pub building_id: String,
    /// Filled in locally from the building list, never sent.
    #[serde(default, skip_serializing)]
    pub building_name: Option<String>,
    #[serde(default)]
    pub crew_type: String,
    #[serde(default)]
    pub room_category: String,
    #[serde(default, alias = "beds")]
    pub bed_count: u32,
    #[serde(default)]
    pub attachment: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} {}, {} beds, floor {}, {}",
            self.room_number,
            self.status,
            self.room_type,
            if self.ac { "AC" } else { "non-AC" },
            self.bed_count,
            self.floor,
            self.building_name.as_deref().unwrap_or("-")
        )
    }
}

/// Fills in each room's building name from `buildings`. Rooms whose
/// building is unknown get no name.
pub fn attach_building_names(rooms: &mut [Room], buildings: &[Building]) {
    for room in rooms.iter_mut() {
        room.building_name = building_name(buildings, &room.building_id).map(str::to_string);
    }
}

/// Rooms whose number contains `text`, ignoring case. An empty filter
/// keeps every room.
pub fn filter_by_number<'a>(rooms: &'a [Room], text: &str) -> Vec<&'a Room> {
    let needle = text.trim().to_lowercase();
    rooms
        .iter()
        .filter(|room| room.room_number.to_lowercase().contains(&needle))
        .collect()
}
