//! Marketplace pricing attached to a card.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub cardmarket: Option<CardmarketPricing>,
    pub tcgplayer: Option<TcgPlayerPricing>,
}

/// Cardmarket statistics. Holo variants use dashed JSON keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardmarketPricing {
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unit: String,

    pub avg: Option<f64>,
    pub low: Option<f64>,
    pub trend: Option<f64>,
    pub avg1: Option<f64>,
    pub avg7: Option<f64>,
    pub avg30: Option<f64>,

    #[serde(rename = "avg-holo")]
    pub avg_holo: Option<f64>,
    #[serde(rename = "low-holo")]
    pub low_holo: Option<f64>,
    #[serde(rename = "trend-holo")]
    pub trend_holo: Option<f64>,
    #[serde(rename = "avg-reverse-holo")]
    pub avg_reverse_holo: Option<f64>,
    #[serde(rename = "low-reverse-holo")]
    pub low_reverse_holo: Option<f64>,
    #[serde(rename = "trend-reverse-holo")]
    pub trend_reverse_holo: Option<f64>,
}

/// TCGPlayer prices, one block per printing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TcgPlayerPricing {
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unit: String,
    pub normal: Option<TcgPlayerPriceVariant>,
    pub reverse: Option<TcgPlayerPriceVariant>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcgPlayerPriceVariant {
    pub low_price: Option<f64>,
    pub mid_price: Option<f64>,
    pub high_price: Option<f64>,
    pub market_price: Option<f64>,
    pub direct_low_price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn decodes_both_providers() {
        let payload = r#"{
            "cardmarket": {
                "updated": "2025-08-05T00:42:15.000Z",
                "unit": "EUR",
                "avg": 0.08,
                "low": 0.02,
                "avg30": 0.08,
                "avg-holo": 0.27,
                "trend-holo": 0.21
            },
            "tcgplayer": {
                "updated": "2025-08-05T20:07:54.000Z",
                "unit": "USD",
                "normal": {"lowPrice": 0.02, "marketPrice": 0.09, "directLowPrice": 0.04},
                "reverse": {"highPrice": 5.17}
            }
        }"#;
        let pricing: Pricing = serde_json::from_str(payload).unwrap();

        let cm = pricing.cardmarket.unwrap();
        assert_eq!(cm.unit, "EUR");
        assert_eq!(cm.avg_holo, Some(0.27));
        assert_eq!(cm.trend_holo, Some(0.21));
        assert!(cm.low_reverse_holo.is_none());
        assert_eq!(
            cm.updated,
            Some(Utc.with_ymd_and_hms(2025, 8, 5, 0, 42, 15).unwrap())
        );

        let tcg = pricing.tcgplayer.unwrap();
        assert_eq!(tcg.normal.unwrap().market_price, Some(0.09));
        assert_eq!(tcg.reverse.unwrap().high_price, Some(5.17));
    }

    #[test]
    fn missing_provider_is_none() {
        let pricing: Pricing =
            serde_json::from_str(r#"{"cardmarket": {"unit": "EUR", "avg": 0.08}}"#).unwrap();
        assert!(pricing.cardmarket.is_some());
        assert!(pricing.tcgplayer.is_none());
    }
}
