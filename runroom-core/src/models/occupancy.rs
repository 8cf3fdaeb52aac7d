use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use super::catalog::EnumCatalog;
use super::tone::Tone;

/// One bed on the occupancy dashboard, with the crew resting in it if any.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bed {
    pub bed_number: String,
    #[serde(deserialize_with = "blank_as_none")]
    pub occupancy_status: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub crew_id: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub crew_name: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub crew_designation: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub crew_type: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub meal_type: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub veg_non_veg: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub check_in_time: Option<String>,
    pub rest_hours: Option<f64>,
    #[serde(deserialize_with = "blank_as_none")]
    pub wake_up_time: Option<String>,
}

impl Bed {
    /// Labelled detail lines, skipping fields the server left empty.
    pub fn details(&self) -> Vec<(&'static str, String)> {
        let mut lines = vec![(
            "Status",
            self.occupancy_status.clone().unwrap_or_else(|| "-".to_string()),
        )];
        let optional = [
            ("Crew ID", &self.crew_id),
            ("Crew Name", &self.crew_name),
            ("Designation", &self.crew_designation),
            ("Crew Type", &self.crew_type),
            ("Meal Type", &self.meal_type),
            ("Veg/Non-Veg", &self.veg_non_veg),
            ("Check-In", &self.check_in_time),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                lines.push((label, value.clone()));
            }
        }
        if let Some(hours) = self.rest_hours {
            lines.push(("Rest Hours", hours.to_string()));
        }
        if let Some(wake) = &self.wake_up_time {
            lines.push(("Wake-Up", wake.clone()));
        }
        lines
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Beds keyed by room number, as served by `GET /bookings/dashboard`.
pub type RoomOccupancy = BTreeMap<String, Vec<Bed>>;

impl EnumCatalog {
    /// Border colour for a room: green when every bed is free, gray when
    /// none is, light green for a mix.
    ///
    /// A bed is free when its status is the first occupancy status in the
    /// catalog. Without occupancy statuses every room is gray.
    pub fn room_tone(&self, beds: &[Bed]) -> Tone {
        let Some(available) = self.available_status() else {
            return Tone::Gray;
        };
        let is_free = |bed: &Bed| bed.occupancy_status.as_deref() == Some(available);

        if beds.iter().all(is_free) {
            Tone::Green
        } else if !beds.iter().any(is_free) {
            Tone::Gray
        } else {
            Tone::LightGreen
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EnumItem;

    fn catalog() -> EnumCatalog {
        EnumCatalog {
            occupancy_status: ["AVAILABLE", "OCCUPIED", "RESERVED"]
                .iter()
                .map(|key| EnumItem {
                    key: key.to_string(),
                    label: key.to_string(),
                })
                .collect(),
            ..EnumCatalog::default()
        }
    }

    fn bed(number: &str, status: Option<&str>) -> Bed {
        Bed {
            bed_number: number.to_string(),
            occupancy_status: status.map(str::to_string),
            ..Bed::default()
        }
    }

    #[test]
    fn test_dashboard_json() {
        let json = r#"{
            "N101": [
                {"bedNumber": "1", "occupancyStatus": "OCCUPIED", "crewName": "R. Kumar",
                 "crewId": "", "restHours": 8, "checkInTime": "2024-03-13T06:30:00"},
                {"bedNumber": "2", "occupancyStatus": "AVAILABLE"}
            ],
            "A001": []
        }"#;
        let rooms: RoomOccupancy = serde_json::from_str(json).unwrap();

        let keys: Vec<&String> = rooms.keys().collect();
        assert_eq!(keys, vec!["A001", "N101"]);

        let occupied = &rooms["N101"][0];
        assert_eq!(occupied.crew_name.as_deref(), Some("R. Kumar"));
        assert_eq!(occupied.crew_id, None);
        assert_eq!(occupied.rest_hours, Some(8.0));
        assert_eq!(rooms["N101"][1].crew_name, None);
    }

    #[test]
    fn test_bed_details_skip_empty_fields() {
        let mut b = bed("3", Some("OCCUPIED"));
        b.crew_name = Some("S. Das".to_string());
        b.rest_hours = Some(0.0);

        let labels: Vec<&str> = b.details().iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, vec!["Status", "Crew Name", "Rest Hours"]);
        assert_eq!(bed("4", None).details(), vec![("Status", "-".to_string())]);
    }

    #[test]
    fn test_room_tone() {
        let catalog = catalog();
        let free = [bed("1", Some("AVAILABLE")), bed("2", Some("AVAILABLE"))];
        let full = [bed("1", Some("OCCUPIED")), bed("2", None)];
        let mixed = [bed("1", Some("AVAILABLE")), bed("2", Some("RESERVED"))];

        assert_eq!(catalog.room_tone(&free), Tone::Green);
        assert_eq!(catalog.room_tone(&full), Tone::Gray);
        assert_eq!(catalog.room_tone(&mixed), Tone::LightGreen);
        assert_eq!(catalog.room_tone(&[]), Tone::Green);
        assert_eq!(EnumCatalog::default().room_tone(&free), Tone::Gray);
    }
}
