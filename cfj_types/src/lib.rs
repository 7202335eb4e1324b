use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

/// Coins offered on the trade-entry keyboard.
///
/// The set is fixed; `Other` is the catch-all for anything not listed and
/// carries no price feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coin {
    #[serde(rename = "BTC")]
    Btc,
    #[serde(rename = "ETH")]
    Eth,
    #[serde(rename = "SOL")]
    Sol,
    #[serde(rename = "ADA")]
    Ada,
    #[serde(rename = "AVAX")]
    Avax,
    Other,
}

impl Coin {
    pub const ALL: [Coin; 6] = [Coin::Btc, Coin::Eth, Coin::Sol, Coin::Ada, Coin::Avax, Coin::Other];

    /// Exact match against the coin-picker button labels
    pub fn parse_button(text: &str) -> Option<Self> {
        match text {
            "BTC" => Some(Coin::Btc),
            "ETH" => Some(Coin::Eth),
            "SOL" => Some(Coin::Sol),
            "ADA" => Some(Coin::Ada),
            "AVAX" => Some(Coin::Avax),
            "Other" => Some(Coin::Other),
            _ => None,
        }
    }

    /// Display symbol, identical to the button label
    pub fn ticker(self) -> &'static str {
        match self {
            Coin::Btc => "BTC",
            Coin::Eth => "ETH",
            Coin::Sol => "SOL",
            Coin::Ada => "ADA",
            Coin::Avax => "AVAX",
            Coin::Other => "Other",
        }
    }

    /// CoinGecko id for the spot-price endpoint; `Other` has no feed
    pub fn gecko_id(self) -> Option<&'static str> {
        match self {
            Coin::Btc => Some("bitcoin"),
            Coin::Eth => Some("ethereum"),
            Coin::Sol => Some("solana"),
            Coin::Ada => Some("cardano"),
            Coin::Avax => Some("avalanche-2"),
            Coin::Other => None,
        }
    }

    /// Hard-coded quote substituted when the live lookup fails
    pub fn fallback_usd(self) -> Option<f64> {
        match self {
            Coin::Btc => Some(42_000.0),
            Coin::Eth => Some(2_200.0),
            Coin::Sol => Some(95.0),
            Coin::Ada => Some(0.45),
            Coin::Avax => Some(35.0),
            Coin::Other => None,
        }
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.ticker())
    }
}

/// Futures position direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// Matches the decorated picker buttons and the bare uppercase words
    pub fn parse_button(text: &str) -> Option<Self> {
        match text {
            "LONG 📈" | "LONG" => Some(Direction::Long),
            "SHORT 📉" | "SHORT" => Some(Direction::Short),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Long => "long",
            Direction::Short => "short",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record lifecycle state. Nothing in the journal transitions a record to
/// `Closed` yet; the variant exists because the performance math is defined
/// over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Open,
    Closed,
}

/// A completed journal entry. Immutable once appended to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Global sequence id, strictly increasing across all owners
    pub id: u64,
    /// Telegram chat id of the recording user
    pub owner: i64,
    pub coin: Coin,
    pub direction: Direction,
    /// Contract count, positive, user-supplied
    pub size: f64,
    pub entry_price: f64,
    pub status: TradeStatus,
    pub realized_pnl: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Partial fields accumulated while a trade-entry flow is in progress
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeDraft {
    pub coin: Option<Coin>,
    pub direction: Option<Direction>,
    pub size: Option<f64>,
}

/// Aggregate view over one owner's records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub count: usize,
    pub open_count: usize,
    pub closed_count: usize,
    /// Winning closed records / closed records, in percent. 0 when nothing
    /// has closed, even if open records exist.
    pub win_rate: f64,
    pub total_pnl: f64,
    pub avg_pnl: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_button_round_trip() {
        for coin in Coin::ALL {
            assert_eq!(Coin::parse_button(coin.ticker()), Some(coin));
        }
        assert_eq!(Coin::parse_button("btc"), None);
        assert_eq!(Coin::parse_button("DOGE"), None);
    }

    #[test]
    fn test_direction_button_parse() {
        assert_eq!(Direction::parse_button("LONG 📈"), Some(Direction::Long));
        assert_eq!(Direction::parse_button("SHORT 📉"), Some(Direction::Short));
        assert_eq!(Direction::parse_button("SHORT"), Some(Direction::Short));
        assert_eq!(Direction::parse_button("short"), None);
    }

    #[test]
    fn test_direction_serialises_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Short).unwrap(), "\"short\"");
        assert_eq!(serde_json::to_string(&Direction::Long).unwrap(), "\"long\"");
    }

    #[test]
    fn test_every_priced_coin_has_feed_and_fallback() {
        for coin in Coin::ALL {
            assert_eq!(coin.gecko_id().is_some(), coin.fallback_usd().is_some());
        }
        assert!(Coin::Other.gecko_id().is_none());
        assert_eq!(Coin::Btc.fallback_usd(), Some(42_000.0));
    }
}
