use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A running room building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub building_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "floors_from_any")]
    pub floors: u32,
    #[serde(default)]
    pub description: String,
}

impl Building {
    pub fn new(building_name: impl Into<String>, address: impl Into<String>, floors: u32) -> Self {
        Self {
            id: None,
            building_name: building_name.into(),
            address: address.into(),
            floors,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl fmt::Display for Building {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} floors)",
            self.building_name, self.address, self.floors
        )?;
        if !self.description.is_empty() {
            write!(f, " - {}", self.description)?;
        }
        Ok(())
    }
}

/// Some deployments send `floors` as a string, others as a number.
fn floors_from_any<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Floors {
        Number(u32),
        Text(String),
        Missing(()),
    }

    match Floors::deserialize(deserializer)? {
        Floors::Number(n) => Ok(n),
        Floors::Text(s) if s.trim().is_empty() => Ok(0),
        Floors::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid floors value '{}'", s))),
        Floors::Missing(()) => Ok(0),
    }
}

/// Looks up a building's name by id.
pub fn building_name<'a>(buildings: &'a [Building], id: &str) -> Option<&'a str> {
    buildings
        .iter()
        .find(|b| b.id.as_deref() == Some(id))
        .map(|b| b.building_name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floors_as_string_or_number() {
        let from_text: Building =
            serde_json::from_str(r#"{"id": "b1", "buildingName": "North", "floors": "3"}"#)
                .unwrap();
        let from_number: Building =
            serde_json::from_str(r#"{"id": "b1", "buildingName": "North", "floors": 3}"#).unwrap();
        let from_null: Building =
            serde_json::from_str(r#"{"id": "b1", "buildingName": "North", "floors": null}"#)
                .unwrap();

        assert_eq!(from_text.floors, 3);
        assert_eq!(from_number, from_text);
        assert_eq!(from_null.floors, 0);
        assert!(from_text.address.is_empty());
    }

    #[test]
    fn test_new_building_serializes_without_id() {
        let building = Building::new("South Block", "Platform 4", 2);
        let json = serde_json::to_value(&building).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["buildingName"], "South Block");
        assert_eq!(json["floors"], 2);
    }

    #[test]
    fn test_building_name_lookup() {
        let mut north = Building::new("North", "Yard road", 3);
        north.id = Some("b1".to_string());
        let buildings = vec![north];

        assert_eq!(building_name(&buildings, "b1"), Some("North"));
        assert_eq!(building_name(&buildings, "b2"), None);
    }
}
