//! Facade wiring the three catalog collections to one shared client.

use std::sync::Arc;

use crate::client::{Client, ClientBuilder, Download};
use crate::endpoint::Endpoint;
use crate::enums::{Extension, Quality};
use crate::error::ApiError;
use crate::models::{Card, CardResume, Serie, SerieResume, Set, SetResume};

/// Entry point to the catalog API.
///
/// ```no_run
/// use tcgdex_core::{Query, TcgDex};
///
/// let sdk = TcgDex::new();
/// let card = sdk.card.get("swsh3-136")?;
/// let mut query = Query::new();
/// query.contains("name", "furret").paginate(1, 20);
/// let matches = sdk.card.list(Some(&query))?;
/// # Ok::<(), tcgdex_core::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TcgDex {
    pub client: Arc<Client>,
    pub card: Endpoint<Card, CardResume>,
    pub set: Endpoint<Set, SetResume>,
    pub serie: Endpoint<Serie, SerieResume>,
}

impl TcgDex {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn with_client(client: Client) -> Self {
        let client = Arc::new(client);
        Self {
            card: Endpoint::new(Arc::clone(&client), "cards"),
            set: Endpoint::new(Arc::clone(&client), "sets"),
            serie: Endpoint::new(Arc::clone(&client), "series"),
            client,
        }
    }

    /// Stream a card's image from the asset host.
    ///
    /// A card without an image is reported as `NotFound`.
    pub fn download_card_image(
        &self,
        card: &CardResume,
        quality: Quality,
        extension: Extension,
    ) -> Result<Download, ApiError> {
        let url = card.image_url(quality, extension).ok_or(ApiError::NotFound)?;
        self.client.download(&url)
    }
}

impl Default for TcgDex {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Client> for TcgDex {
    fn from(client: Client) -> Self {
        Self::with_client(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockTransport;

    #[test]
    fn defaults_and_endpoints() {
        let sdk = TcgDex::new();
        assert_eq!(sdk.client.base_url(), "https://api.tcgdex.net/v2/en");
        assert_eq!(sdk.card.path(), "cards");
        assert_eq!(sdk.set.path(), "sets");
        assert_eq!(sdk.serie.path(), "series");
        assert!(Arc::ptr_eq(sdk.card.client(), &sdk.client));
        assert!(Arc::ptr_eq(sdk.set.client(), &sdk.client));
        assert!(Arc::ptr_eq(sdk.serie.client(), &sdk.client));
    }

    #[test]
    fn builder_overrides_reach_the_client() {
        let sdk: TcgDex = TcgDex::builder()
            .base_url("http://example")
            .user_agent("custom-agent")
            .build()
            .into();
        assert_eq!(sdk.client.base_url(), "http://example");
        assert_eq!(sdk.client.user_agent(), "custom-agent");
    }

    #[test]
    fn card_with_pricing_through_facade() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            200,
            r#"{
                "id": "swsh1-1",
                "localId": "1",
                "name": "Test Card",
                "pricing": {
                    "cardmarket": {"updated": "2025-08-05T00:42:15.000Z", "unit": "EUR", "avg": 0.08, "avg-holo": 0.27},
                    "tcgplayer": {"updated": "2025-08-05T20:07:54.000Z", "unit": "USD", "normal": {"marketPrice": 0.09}}
                }
            }"#,
        );
        let sdk = TcgDex::with_client(
            Client::builder()
                .base_url("http://example")
                .transport(Arc::clone(&mock))
                .build(),
        );

        let card = sdk.card.get("swsh1-1").unwrap();
        let pricing = card.pricing.as_ref().unwrap();
        assert_eq!(pricing.cardmarket.as_ref().unwrap().avg_holo, Some(0.27));
        assert_eq!(
            pricing.tcgplayer.as_ref().unwrap().normal.as_ref().unwrap().market_price,
            Some(0.09)
        );
        assert_eq!(mock.requests()[0].url, "http://example/cards/swsh1-1");
    }

    #[test]
    fn download_card_image_resolves_asset_url() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, vec![0x89, b'P', b'N', b'G']);
        let sdk = TcgDex::with_client(Client::builder().transport(Arc::clone(&mock)).build());
        let card = CardResume {
            id: "swsh3-136".to_string(),
            local_id: "136".to_string(),
            name: "Furret".to_string(),
            image: Some("https://assets.tcgdex.net/en/swsh/swsh3/136".to_string()),
        };

        let bytes = sdk
            .download_card_image(&card, Quality::High, Extension::Png)
            .unwrap()
            .into_bytes()
            .unwrap();
        assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
        assert_eq!(
            mock.requests()[0].url,
            "https://assets.tcgdex.net/en/swsh/swsh3/136/high.png"
        );
    }

    #[test]
    fn download_card_image_without_image_is_not_found() {
        let mock = Arc::new(MockTransport::new());
        let sdk = TcgDex::with_client(Client::builder().transport(Arc::clone(&mock)).build());
        let err = sdk
            .download_card_image(&CardResume::default(), Quality::Low, Extension::Jpg)
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(mock.calls(), 0);
    }
}
