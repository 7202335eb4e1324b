use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceError {
    #[error("Price request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Price API returned HTTP {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("Price payload missing quote for {0}")]
    MissingQuote(String),

    #[error("No price feed for {0}")]
    NoFeed(cfj_types::Coin),
}

pub type Result<T> = std::result::Result<T, PriceError>;
