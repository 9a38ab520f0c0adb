//! Card records: list summaries, full details and their nested parts.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::pricing::Pricing;
use super::set::SetResume;
use crate::enums::{Extension, Quality};

/// A card as it appears in list results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResume {
    pub id: String,
    pub local_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CardResume {
    /// Asset URL for this card's image, or `None` if it has no image.
    pub fn image_url(&self, quality: Quality, extension: Extension) -> Option<String> {
        self.image
            .as_ref()
            .map(|base| format!("{base}/{quality}.{extension}"))
    }
}

/// Full card record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(flatten)]
    pub resume: CardResume,
    pub illustrator: Option<String>,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub variants: CardVariants,
    #[serde(default)]
    pub set: SetResume,
    #[serde(default)]
    pub dex_id: Vec<u32>,
    pub hp: Option<u32>,
    #[serde(default)]
    pub types: Vec<String>,
    pub evolve_from: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    pub stage: Option<String>,
    pub suffix: Option<String>,
    pub item: Option<CardItem>,
    #[serde(default)]
    pub abilities: Vec<CardAbility>,
    #[serde(default)]
    pub attacks: Vec<CardAttack>,
    #[serde(default)]
    pub weaknesses: Vec<CardWeakRes>,
    #[serde(default)]
    pub resistances: Vec<CardWeakRes>,
    pub retreat: Option<u32>,
    pub regulation_mark: Option<String>,
    #[serde(default)]
    pub legal: Legal,
    #[serde(default)]
    pub boosters: Vec<Booster>,
    pub pricing: Option<Pricing>,
}

impl std::ops::Deref for Card {
    type Target = CardResume;

    fn deref(&self) -> &CardResume {
        &self.resume
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardVariants {
    #[serde(default)]
    pub normal: bool,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default)]
    pub holo: bool,
    #[serde(default)]
    pub first_edition: bool,
    #[serde(default)]
    pub w_promo: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legal {
    #[serde(default)]
    pub standard: bool,
    #[serde(default)]
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardAbility {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: Option<String>,
    pub effect: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardAttack {
    pub name: Option<String>,
    #[serde(default)]
    pub cost: Vec<String>,
    pub effect: Option<String>,
    pub damage: Option<Damage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardItem {
    pub name: Option<String>,
    pub effect: Option<String>,
}

/// Weakness or resistance entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardWeakRes {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booster {
    pub id: String,
    pub name: String,
}

/// Attack damage. The API sends plain numbers (`10`) or modifiers
/// (`"50+"`, `"20×"`); both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Damage(pub String);

impl Damage {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Damage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Damage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer) {
            Ok(Raw::Number(n)) => Ok(Damage(n.to_string())),
            Ok(Raw::Text(s)) => Ok(Damage(s)),
            Err(_) => Err(serde::de::Error::custom("invalid damage type")),
        }
    }
}
