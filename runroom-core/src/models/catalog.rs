use serde::{Deserialize, Serialize};

use super::tone::Tone;

/// Bed colours, assigned by position in the occupancy status list.
const OCCUPANCY_PALETTE: [Tone; 5] = [
    Tone::Green,
    Tone::Gray,
    Tone::Yellow,
    Tone::Blue,
    Tone::Gray,
];

/// One entry of a server-side enum: the wire key and its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumItem {
    pub key: String,
    pub label: String,
}

/// Lookup lists served by `GET /enums/all`.
///
/// Loaded once after the user is authenticated and then only read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnumCatalog {
    pub room_types: Vec<EnumItem>,
    pub crew_types: Vec<EnumItem>,
    pub room_category: Vec<EnumItem>,
    pub attachment_type: Vec<EnumItem>,
    pub room_status: Vec<EnumItem>,
    pub occupancy_status: Vec<EnumItem>,
}

impl EnumCatalog {
    /// Named lists in a fixed order, for listing the whole catalog.
    pub fn sections(&self) -> [(&'static str, &[EnumItem]); 6] {
        [
            ("roomTypes", &self.room_types),
            ("crewTypes", &self.crew_types),
            ("roomCategory", &self.room_category),
            ("attachmentType", &self.attachment_type),
            ("roomStatus", &self.room_status),
            ("occupancyStatus", &self.occupancy_status),
        ]
    }

    /// Colour for a bed's occupancy status.
    ///
    /// The first status in the catalog is green, the next ones cycle
    /// through the palette in catalog order. A missing or unknown status
    /// is shown green.
    pub fn occupancy_tone(&self, status: Option<&str>) -> Tone {
        status
            .and_then(|key| self.occupancy_status.iter().position(|item| item.key == key))
            .map(|index| OCCUPANCY_PALETTE[index % OCCUPANCY_PALETTE.len()])
            .unwrap_or(Tone::Green)
    }

    /// The status that means a bed is free: the first occupancy status.
    pub fn available_status(&self) -> Option<&str> {
        self.occupancy_status.first().map(|item| item.key.as_str())
    }
}

/// Resolves `key` to its label, or returns the key itself when the list
/// has no matching entry.
pub fn label_for<'a>(items: &'a [EnumItem], key: &'a str) -> &'a str {
    items
        .iter()
        .find(|item| item.key == key)
        .map(|item| item.label.as_str())
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_partial_json() {
        let json = r#"{
            "roomTypes": [{"key": "SINGLE", "label": "Single"}],
            "occupancyStatus": [{"key": "OCCUPIED", "label": "Occupied"}]
        }"#;
        let catalog: EnumCatalog = serde_json::from_str(json).unwrap();

        assert_eq!(catalog.room_types.len(), 1);
        assert!(catalog.crew_types.is_empty());
        assert_eq!(
            label_for(&catalog.occupancy_status, "OCCUPIED"),
            "Occupied"
        );
    }

    #[test]
    fn test_label_for_falls_back_to_key() {
        let items = vec![EnumItem {
            key: "SUITE".into(),
            label: "Suite".into(),
        }];
        assert_eq!(label_for(&items, "STORE"), "STORE");
    }

    fn statuses(keys: &[&str]) -> EnumCatalog {
        EnumCatalog {
            occupancy_status: keys
                .iter()
                .map(|key| EnumItem {
                    key: key.to_string(),
                    label: key.to_string(),
                })
                .collect(),
            ..EnumCatalog::default()
        }
    }

    #[test]
    fn test_occupancy_tone_follows_catalog_order() {
        let catalog = statuses(&[
            "AVAILABLE",
            "OCCUPIED",
            "RESERVED",
            "CLEANING",
            "BLOCKED",
            "HELD",
        ]);
        assert_eq!(catalog.occupancy_tone(Some("AVAILABLE")), Tone::Green);
        assert_eq!(catalog.occupancy_tone(Some("OCCUPIED")), Tone::Gray);
        assert_eq!(catalog.occupancy_tone(Some("RESERVED")), Tone::Yellow);
        assert_eq!(catalog.occupancy_tone(Some("CLEANING")), Tone::Blue);
        assert_eq!(catalog.occupancy_tone(Some("BLOCKED")), Tone::Gray);
        // Sixth entry wraps around to the first colour
        assert_eq!(catalog.occupancy_tone(Some("HELD")), Tone::Green);

        let reordered = statuses(&["RESERVED", "CLEANING", "AVAILABLE", "OCCUPIED"]);
        assert_eq!(reordered.occupancy_tone(Some("RESERVED")), Tone::Green);
        assert_eq!(reordered.occupancy_tone(Some("CLEANING")), Tone::Gray);
        assert_eq!(reordered.occupancy_tone(Some("AVAILABLE")), Tone::Yellow);
        assert_eq!(reordered.occupancy_tone(Some("OCCUPIED")), Tone::Blue);
    }

    #[test]
    fn test_occupancy_tone_defaults_to_green() {
        let catalog = statuses(&["AVAILABLE", "OCCUPIED"]);
        assert_eq!(catalog.occupancy_tone(None), Tone::Green);
        assert_eq!(catalog.occupancy_tone(Some("SOMETHING_NEW")), Tone::Green);
        assert_eq!(catalog.occupancy_tone(Some("occupied")), Tone::Green);
        assert_eq!(EnumCatalog::default().occupancy_tone(Some("OCCUPIED")), Tone::Green);
        assert_eq!(catalog.available_status(), Some("AVAILABLE"));
    }

    #[test]
    fn test_sections_cover_every_list() {
        let catalog = EnumCatalog::default();
        let names: Vec<&str> = catalog.sections().iter().map(|(n, _)| *n).collect();
        assert_eq!(names.len(), 6);
        assert!(names.contains(&"occupancyStatus"));
    }
}
