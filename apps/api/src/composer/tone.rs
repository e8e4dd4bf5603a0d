//! Tone: the style modifier inserted into the generation instruction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Deserializes case-insensitively through `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Tone {
    #[default]
    Formal,
    Friendly,
    Apologetic,
    Grateful,
    Assertive,
}

const ALL_TONES: [Tone; 5] = [
    Tone::Formal,
    Tone::Friendly,
    Tone::Apologetic,
    Tone::Grateful,
    Tone::Assertive,
];

impl Tone {
    /// Every tone in display order.
    pub fn all() -> &'static [Tone] {
        &ALL_TONES
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Formal => "Formal",
            Tone::Friendly => "Friendly",
            Tone::Apologetic => "Apologetic",
            Tone::Grateful => "Grateful",
            Tone::Assertive => "Assertive",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown tone '{0}'")]
pub struct UnknownTone(pub String);

impl FromStr for Tone {
    type Err = UnknownTone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALL_TONES
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownTone(s.to_string()))
    }
}

impl TryFrom<String> for Tone {
    type Error = UnknownTone;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tone_is_formal() {
        assert_eq!(Tone::default(), Tone::Formal);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("friendly".parse::<Tone>().unwrap(), Tone::Friendly);
        assert_eq!(" GRATEFUL ".parse::<Tone>().unwrap(), Tone::Grateful);
    }

    #[test]
    fn test_parse_unknown_tone_fails() {
        let err = "Sarcastic".parse::<Tone>().unwrap_err();
        assert_eq!(err, UnknownTone("Sarcastic".to_string()));
    }

    #[test]
    fn test_serializes_as_display_name() {
        assert_eq!(
            serde_json::to_string(&Tone::Apologetic).unwrap(),
            "\"Apologetic\""
        );
    }

    #[test]
    fn test_deserializes_any_case() {
        let tone: Tone = serde_json::from_str("\"formal\"").unwrap();
        assert_eq!(tone, Tone::Formal);
        assert!(serde_json::from_str::<Tone>("\"Sarcastic\"").is_err());
    }

    #[test]
    fn test_all_lists_every_tone_once() {
        assert_eq!(Tone::all().len(), 5);
        assert_eq!(Tone::all()[0], Tone::Formal);
    }
}
