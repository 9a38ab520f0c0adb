//! Set and serie records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::card::{CardResume, Legal};
use crate::enums::Extension;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCardCount {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub official: u32,
    pub normal: Option<u32>,
    pub reverse: Option<u32>,
    pub holo: Option<u32>,
    pub first_ed: Option<u32>,
}

/// A set as it appears in list results and inside cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetResume {
    pub id: String,
    pub name: String,
    pub logo: Option<String>,
    pub symbol: Option<String>,
    #[serde(default)]
    pub card_count: SetCardCount,
}

impl SetResume {
    pub fn logo_url(&self, extension: Extension) -> Option<String> {
        self.logo.as_ref().map(|base| format!("{base}.{extension}"))
    }

    pub fn symbol_url(&self, extension: Extension) -> Option<String> {
        self.symbol.as_ref().map(|base| format!("{base}.{extension}"))
    }
}

/// Full set record, including the summaries of its cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Set {
    #[serde(flatten)]
    pub resume: SetResume,
    #[serde(default)]
    pub serie: SerieResume,
    pub tcg_online: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub legal: Option<Legal>,
    #[serde(default)]
    pub cards: Vec<CardResume>,
}

impl std::ops::Deref for Set {
    type Target = SetResume;

    fn deref(&self) -> &SetResume {
        &self.resume
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerieResume {
    pub id: String,
    pub name: String,
    pub logo: Option<String>,
}

/// Full serie record with the summaries of its sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Serie {
    #[serde(flatten)]
    pub resume: SerieResume,
    #[serde(default)]
    pub sets: Vec<SetResume>,
}

impl std::ops::Deref for Serie {
    type Target = SerieResume;

    fn deref(&self) -> &SerieResume {
        &self.resume
    }
}
