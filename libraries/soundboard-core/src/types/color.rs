//! Button color palette

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cosmetic color tag for a sound
///
/// The palette is fixed and assigned in a deterministic cycle when sounds are
/// registered. Users may change it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Blue,
    Green,
    Red,
    Yellow,
    Purple,
    Pink,
    Indigo,
    Teal,
    Orange,
    Lime,
    Cyan,
    Gray,
}

impl ColorTag {
    /// Palette in cycle order
    pub const PALETTE: [ColorTag; 12] = [
        ColorTag::Blue,
        ColorTag::Green,
        ColorTag::Red,
        ColorTag::Yellow,
        ColorTag::Purple,
        ColorTag::Pink,
        ColorTag::Indigo,
        ColorTag::Teal,
        ColorTag::Orange,
        ColorTag::Lime,
        ColorTag::Cyan,
        ColorTag::Gray,
    ];

    /// Color at position `index` of the cycle (wraps around)
    pub fn cycle(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    /// Lowercase name, as used in configuration and styling
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTag::Blue => "blue",
            ColorTag::Green => "green",
            ColorTag::Red => "red",
            ColorTag::Yellow => "yellow",
            ColorTag::Purple => "purple",
            ColorTag::Pink => "pink",
            ColorTag::Indigo => "indigo",
            ColorTag::Teal => "teal",
            ColorTag::Orange => "orange",
            ColorTag::Lime => "lime",
            ColorTag::Cyan => "cyan",
            ColorTag::Gray => "gray",
        }
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::PALETTE
            .iter()
            .copied()
            .find(|color| color.as_str() == wanted)
            .ok_or_else(|| format!("Unknown color: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_starts_blue_green() {
        assert_eq!(ColorTag::cycle(0), ColorTag::Blue);
        assert_eq!(ColorTag::cycle(1), ColorTag::Green);
        assert_eq!(ColorTag::cycle(11), ColorTag::Gray);
    }

    #[test]
    fn cycle_wraps() {
        assert_eq!(ColorTag::cycle(12), ColorTag::Blue);
        assert_eq!(ColorTag::cycle(25), ColorTag::Green);
    }

    #[test]
    fn parse_round_trips_names() {
        assert_eq!("Teal".parse::<ColorTag>(), Ok(ColorTag::Teal));
        assert!("magenta".parse::<ColorTag>().is_err());
    }
}
