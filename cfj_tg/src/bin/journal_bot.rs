use std::sync::Arc;

use cfj_ledger::TradeLedger;
use cfj_price::PriceClient;
use cfj_tg::Journal;
use cfj_tg::Settings;
use cfj_tg::handlers;
use teloxide::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise logging
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;

    // Shared ledger, loaded from the store file when one exists
    let ledger = Arc::new(TradeLedger::open(settings.trades_file.clone()));

    // Health surface for the hosting platform
    let health_ledger = ledger.clone();
    let port = settings.port;
    tokio::spawn(async move {
        if let Err(err) = cfj_web::serve(health_ledger, port).await {
            tracing::error!("Health server failed: {err}");
        }
    });

    let prices = PriceClient::new()?;
    let journal = Arc::new(Journal::new(ledger, prices, settings.bot_name.clone()));

    let bot = Bot::new(settings.telegram_token.clone());
    tracing::info!("Journal bot initialised");

    // Build message handler
    let handler = Update::filter_message().endpoint({
        let journal = journal.clone();
        move |bot: Bot, msg: Message| {
            let journal = journal.clone();
            async move { handlers::handle_message(bot, msg, journal).await }
        }
    });

    // Start dispatcher; the polling listener re-polls the update feed after
    // transport failures.
    tracing::info!("Starting Telegram bot dispatcher...");
    Dispatcher::builder(bot, handler).enable_ctrlc_handler().build().dispatch().await;

    Ok(())
}
