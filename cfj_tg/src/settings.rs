use std::path::PathBuf;

use anyhow::Context;

/// Process configuration, environment-only.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Bot access token. The one required value.
    pub telegram_token: String,
    /// Username used to strip `/command@name` mentions
    pub bot_name: String,
    /// Health server port
    pub port: u16,
    /// Ledger store path; `None` runs memory-only
    pub trades_file: Option<PathBuf>,
}

impl Settings {
    /// Load from the environment. A missing `TELEGRAM_TOKEN` is fatal;
    /// everything else has defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let telegram_token = std::env::var("TELEGRAM_TOKEN").context("TELEGRAM_TOKEN not set")?;

        let bot_name = std::env::var("TELEGRAM_BOT_NAME").unwrap_or_else(|_| "journalbot".to_string());

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().with_context(|| format!("Invalid PORT value: {raw}"))?,
            Err(_) => 8080,
        };

        // Set TRADES_FILE to an empty string to disable the store.
        let trades_file = match std::env::var("TRADES_FILE") {
            Ok(raw) if raw.is_empty() => None,
            Ok(raw) => Some(PathBuf::from(raw)),
            Err(_) => Some(PathBuf::from("trades.json")),
        };

        Ok(Self { telegram_token, bot_name, port, trades_file })
    }
}
