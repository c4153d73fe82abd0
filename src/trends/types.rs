use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of the glucose trend, as shown next to the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DirectionSymbol {
    DoubleUp,
    SingleUp,
    FortyFiveUp,
    Flat,
    FortyFiveDown,
    SingleDown,
    DoubleDown,
    #[default]
    Unknown,
}

impl DirectionSymbol {
    pub const ALL: [DirectionSymbol; 8] = [
        DirectionSymbol::DoubleUp,
        DirectionSymbol::SingleUp,
        DirectionSymbol::FortyFiveUp,
        DirectionSymbol::Flat,
        DirectionSymbol::FortyFiveDown,
        DirectionSymbol::SingleDown,
        DirectionSymbol::DoubleDown,
        DirectionSymbol::Unknown,
    ];

    /// Parses a direction name. Anything unrecognized ("NONE", "NOT COMPUTABLE",
    /// "OUT OF RANGE", ...) becomes `Unknown`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "DoubleUp" => DirectionSymbol::DoubleUp,
            "SingleUp" => DirectionSymbol::SingleUp,
            "FortyFiveUp" => DirectionSymbol::FortyFiveUp,
            "Flat" => DirectionSymbol::Flat,
            "FortyFiveDown" => DirectionSymbol::FortyFiveDown,
            "SingleDown" => DirectionSymbol::SingleDown,
            "DoubleDown" => DirectionSymbol::DoubleDown,
            _ => DirectionSymbol::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DirectionSymbol::DoubleUp => "DoubleUp",
            DirectionSymbol::SingleUp => "SingleUp",
            DirectionSymbol::FortyFiveUp => "FortyFiveUp",
            DirectionSymbol::Flat => "Flat",
            DirectionSymbol::FortyFiveDown => "FortyFiveDown",
            DirectionSymbol::SingleDown => "SingleDown",
            DirectionSymbol::DoubleDown => "DoubleDown",
            DirectionSymbol::Unknown => "??",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            DirectionSymbol::DoubleUp => "\u{21c8}",
            DirectionSymbol::SingleUp => "\u{2191}",
            DirectionSymbol::FortyFiveUp => "\u{2197}",
            DirectionSymbol::Flat => "\u{2192}",
            DirectionSymbol::FortyFiveDown => "\u{2198}",
            DirectionSymbol::SingleDown => "\u{2193}",
            DirectionSymbol::DoubleDown => "\u{21ca}",
            DirectionSymbol::Unknown => "??",
        }
    }
}

impl From<String> for DirectionSymbol {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<DirectionSymbol> for String {
    fn from(symbol: DirectionSymbol) -> Self {
        symbol.name().to_string()
    }
}

impl fmt::Display for DirectionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs() {
        assert_eq!(DirectionSymbol::DoubleDown.glyph(), "\u{21ca}");
        assert_eq!(DirectionSymbol::SingleDown.glyph(), "\u{2193}");
        assert_eq!(DirectionSymbol::FortyFiveDown.glyph(), "\u{2198}");
        assert_eq!(DirectionSymbol::Flat.glyph(), "\u{2192}");
        assert_eq!(DirectionSymbol::FortyFiveUp.glyph(), "\u{2197}");
        assert_eq!(DirectionSymbol::SingleUp.glyph(), "\u{2191}");
        assert_eq!(DirectionSymbol::DoubleUp.glyph(), "\u{21c8}");
        assert_eq!(DirectionSymbol::Unknown.glyph(), "??");
    }

    #[test]
    fn test_unrecognized_names() {
        assert_eq!(DirectionSymbol::from_name("OUT OF RANGE"), DirectionSymbol::Unknown);
        assert_eq!(DirectionSymbol::from_name("NOT COMPUTABLE"), DirectionSymbol::Unknown);
        assert_eq!(DirectionSymbol::from_name("flat"), DirectionSymbol::Unknown);
        assert_eq!(DirectionSymbol::from_name("OUT OF RANGE").glyph(), "??");
    }

    #[test]
    fn test_names_parse_back() {
        for symbol in DirectionSymbol::ALL {
            assert_eq!(DirectionSymbol::from_name(symbol.name()), symbol);
        }
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&DirectionSymbol::FortyFiveUp).unwrap();
        assert_eq!(json, "\"FortyFiveUp\"");

        let parsed: DirectionSymbol = serde_json::from_str("\"NONE\"").unwrap();
        assert_eq!(parsed, DirectionSymbol::Unknown);
    }
}
