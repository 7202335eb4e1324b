use std::collections::HashMap;
use std::time::Duration;

use cfj_types::Coin;
use reqwest::Client;
use reqwest::ClientBuilder;
use serde::Deserialize;

use crate::errors::PriceError;
use crate::errors::Result;

const COINGECKO_BASE_URL: &str = "https://api.coingecko.com";

/// Total request timeout. Price is decorative context for the journal, so a
/// slow feed is treated the same as a dead one.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Where a quote came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    Live,
    Fallback,
}

/// A spot quote, live or substituted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    pub coin: Coin,
    pub usd: f64,
    pub source: PriceSource,
}

/// CoinGecko simple-price client.
///
/// No retry, no cache, no circuit breaker: every live quote is a fresh round
/// trip, and any failure degrades to the per-coin fallback constant.
pub struct PriceClient {
    client: Client,
    base_url: String,
}

impl PriceClient {
    /// Create a client against the public CoinGecko API
    pub fn new() -> Result<Self> {
        Self::with_base_url(COINGECKO_BASE_URL)
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = ClientBuilder::new()
            .connect_timeout(REQUEST_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .use_rustls_tls()
            .build()?;

        Ok(Self { client, base_url: base_url.into() })
    }

    /// Fetch the live USD spot price for a coin.
    pub async fn spot(&self, coin: Coin) -> Result<f64> {
        let id = coin.gecko_id().ok_or(PriceError::NoFeed(coin))?;

        let url = format!("{}/api/v3/simple/price", self.base_url);
        let response = self.client.get(&url).query(&[("ids", id), ("vs_currencies", "usd")]).send().await?;

        if !response.status().is_success() {
            return Err(PriceError::BadStatus(response.status()));
        }

        let payload: HashMap<String, SimplePrice> = response.json().await?;
        payload.get(id).map(|quote| quote.usd).ok_or_else(|| PriceError::MissingQuote(id.to_string()))
    }

    /// Best-effort quote: live when the feed answers, the fallback constant
    /// otherwise. `None` only for coins with no feed at all. Never errors.
    pub async fn quote_or_fallback(&self, coin: Coin) -> Option<PriceQuote> {
        let fallback = coin.fallback_usd()?;

        match self.spot(coin).await {
            Ok(usd) => Some(PriceQuote { coin, usd, source: PriceSource::Live }),
            Err(err) => {
                tracing::warn!("Price lookup for {coin} failed: {err}. Using fallback {fallback}");
                Some(PriceQuote { coin, usd: fallback, source: PriceSource::Fallback })
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct SimplePrice {
    usd: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens here, so every live lookup fails fast.
    const DEAD_ENDPOINT: &str = "http://127.0.0.1:9";

    #[test]
    fn test_payload_parse() {
        let raw = r#"{"bitcoin": {"usd": 97123.5}}"#;
        let payload: HashMap<String, SimplePrice> = serde_json::from_str(raw).unwrap();

        assert_eq!(payload["bitcoin"].usd, 97_123.5);
    }

    #[tokio::test]
    async fn test_spot_unsupported_coin_errors() {
        let client = PriceClient::with_base_url(DEAD_ENDPOINT).unwrap();

        assert!(matches!(client.spot(Coin::Other).await, Err(PriceError::NoFeed(Coin::Other))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_falls_back() {
        let client = PriceClient::with_base_url(DEAD_ENDPOINT).unwrap();

        let quote = client.quote_or_fallback(Coin::Btc).await.unwrap();

        assert_eq!(quote.coin, Coin::Btc);
        assert_eq!(quote.usd, 42_000.0);
        assert_eq!(quote.source, PriceSource::Fallback);
    }

    #[tokio::test]
    async fn test_no_feed_coin_has_no_quote() {
        let client = PriceClient::with_base_url(DEAD_ENDPOINT).unwrap();

        assert!(client.quote_or_fallback(Coin::Other).await.is_none());
    }
}
