//! Named colour tokens used by the scatter plot.
//!
//! Tokens are CSS/SVG named colours, so a display surface can use
//! [`ColorToken::as_str`] directly as a `fill` or `stroke` value.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    MidnightBlue,
    LightBlue,
    SteelBlue,
    Green,
    Yellow,
    Red,
}

impl ColorToken {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MidnightBlue => "midnightblue",
            Self::LightBlue => "lightblue",
            Self::SteelBlue => "steelblue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

impl std::fmt::Display for ColorToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
