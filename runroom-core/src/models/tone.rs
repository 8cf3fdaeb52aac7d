use serde::Serialize;
use std::fmt;

/// Colour hint attached to categorical values when they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    Green,
    LightGreen,
    Red,
    Yellow,
    Blue,
    Gray,
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tone::Green => "green",
            Tone::LightGreen => "light-green",
            Tone::Red => "red",
            Tone::Yellow => "yellow",
            Tone::Blue => "blue",
            Tone::Gray => "gray",
        };
        f.write_str(name)
    }
}
