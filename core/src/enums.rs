//! Closed vocabularies used by the API: locales and image variants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Locale segment of the API base URL (`https://api.tcgdex.net/v2/<lang>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    En,
    #[serde(rename = "fr")]
    Fr,
    #[serde(rename = "es")]
    Es,
    #[serde(rename = "es-mx")]
    EsMx,
    #[serde(rename = "it")]
    It,
    #[serde(rename = "pt-br")]
    PtBr,
    #[serde(rename = "pt-pt")]
    PtPt,
    #[serde(rename = "de")]
    De,
    #[serde(rename = "nl")]
    Nl,
    #[serde(rename = "pl")]
    Pl,
    #[serde(rename = "ru")]
    Ru,
    #[serde(rename = "ja")]
    Ja,
    #[serde(rename = "ko")]
    Ko,
    #[serde(rename = "zh-tw")]
    ZhTw,
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "th")]
    Th,
    #[serde(rename = "zh-cn")]
    ZhCn,
}

impl Language {
    pub const ALL: [Language; 17] = [
        Language::En,
        Language::Fr,
        Language::Es,
        Language::EsMx,
        Language::It,
        Language::PtBr,
        Language::PtPt,
        Language::De,
        Language::Nl,
        Language::Pl,
        Language::Ru,
        Language::Ja,
        Language::Ko,
        Language::ZhTw,
        Language::Id,
        Language::Th,
        Language::ZhCn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
            Language::Es => "es",
            Language::EsMx => "es-mx",
            Language::It => "it",
            Language::PtBr => "pt-br",
            Language::PtPt => "pt-pt",
            Language::De => "de",
            Language::Nl => "nl",
            Language::Pl => "pl",
            Language::Ru => "ru",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::ZhTw => "zh-tw",
            Language::Id => "id",
            Language::Th => "th",
            Language::ZhCn => "zh-cn",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str() == wanted)
            .ok_or_else(|| ConfigError::UnknownLanguage(s.to_string()))
    }
}

/// Image resolution served by the asset CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    Low,
    High,
}

impl Quality {
    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Low => "low",
            Quality::High => "high",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image file format served by the asset CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    Png,
    Jpg,
    Webp,
}

impl Extension {
    pub fn as_str(self) -> &'static str {
        match self {
            Extension::Png => "png",
            Extension::Jpg => "jpg",
            Extension::Webp => "webp",
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
