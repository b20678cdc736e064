use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Validated `#RRGGBB` hex color.
///
/// Guaranteed valid by construction: holding a `HexColor` proves the format
/// is correct. Use `"#2196F3".parse::<HexColor>()` or
/// `HexColor::try_from(string)` to create.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for HexColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for HexColor {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.len() == 7 && s.starts_with('#') && s.as_bytes()[1..].iter().all(u8::is_ascii_hexdigit)
        {
            Ok(Self(s))
        } else {
            Err(Error::InvalidColor(s))
        }
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> Self {
        c.0
    }
}

/// Primary/secondary color pair applied to the page theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Palette {
    pub primary: HexColor,
    pub secondary: HexColor,
}

impl Palette {
    fn of(primary: &str, secondary: &str) -> Self {
        Self {
            primary: primary.parse().expect("valid palette constant"),
            secondary: secondary.parse().expect("valid palette constant"),
        }
    }
}

/// Fixed mood-to-color fallback table, used whenever the language-model
/// palette lookup fails or returns something unusable.
///
/// Unknown moods get the neutral gray row.
#[must_use]
pub fn default_palette(mood: &str) -> Palette {
    match mood.to_ascii_lowercase().as_str() {
        "happy" => Palette::of("#FFD700", "#FFECB3"),
        "sad" => Palette::of("#2196F3", "#BBDEFB"),
        "energetic" => Palette::of("#FF5722", "#FFCCBC"),
        "calm" => Palette::of("#4CAF50", "#C8E6C9"),
        _ => Palette::of("#9E9E9E", "#E0E0E0"),
    }
}
