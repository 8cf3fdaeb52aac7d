use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::tone::Tone;

/// Dietary category of a menu item.
///
/// The server owns the catalog of categories, so values this client does
/// not know about are kept verbatim in `Other` instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MealCategory {
    Veg,
    NonVeg,
    Vegan,
    Dessert,
    Snack,
    Other(String),
}

impl MealCategory {
    pub fn as_str(&self) -> &str {
        match self {
            MealCategory::Veg => "VEG",
            MealCategory::NonVeg => "NON_VEG",
            MealCategory::Vegan => "VEGAN",
            MealCategory::Dessert => "DESSERT",
            MealCategory::Snack => "SNACK",
            MealCategory::Other(s) => s,
        }
    }

    /// Colour used when listing items of this category. Unrecognised
    /// categories fall back to the vegetarian colour.
    pub fn tone(&self) -> Tone {
        match self {
            MealCategory::Vegan => Tone::LightGreen,
            MealCategory::NonVeg => Tone::Red,
            _ => Tone::Green,
        }
    }
}

impl From<String> for MealCategory {
    fn from(s: String) -> Self {
        match s.as_str() {
            "VEG" => MealCategory::Veg,
            "NON_VEG" => MealCategory::NonVeg,
            "VEGAN" => MealCategory::Vegan,
            "DESSERT" => MealCategory::Dessert,
            "SNACK" => MealCategory::Snack,
            _ => MealCategory::Other(s),
        }
    }
}

impl From<MealCategory> for String {
    fn from(c: MealCategory) -> Self {
        c.as_str().to_string()
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealCategory {
    type Err = String;

    /// Parses user input. Accepts `non-veg`, `nonveg` and `non_veg` in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        match normalized.as_str() {
            "" => Err("Meal category cannot be empty".to_string()),
            "NONVEG" => Ok(MealCategory::NonVeg),
            _ => Ok(MealCategory::from(normalized)),
        }
    }
}
