use std::sync::Arc;

use cfj_ledger::TradeLedger;
use cfj_price::PriceClient;
use cfj_price::PriceSource;
use cfj_types::Coin;

use crate::bot_commands::Command;
use crate::menus::MenuButton;
use crate::reports;
use crate::router::Route;
use crate::router::StepInput;
use crate::router::route;
use crate::session::Session;
use crate::session::SessionStore;
use crate::session::Step;

/// Which reply keyboard accompanies an outgoing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    None,
    Main,
    CoinPicker,
    DirectionPicker,
}

impl Keyboard {
    /// Keyboard a step's re-prompt should offer again
    pub fn for_step(step: Step) -> Self {
        match step {
            Step::AwaitingCoin => Keyboard::CoinPicker,
            Step::AwaitingDirection => Keyboard::DirectionPicker,
            Step::AwaitingSize | Step::AwaitingEntry => Keyboard::None,
        }
    }
}

/// One outgoing chat message
#[derive(Debug, Clone, PartialEq)]
pub struct Outgoing {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Outgoing {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), keyboard: Keyboard::None }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self { text: text.into(), keyboard }
    }
}

/// Everything sent in response to one inbound message
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reply {
    pub messages: Vec<Outgoing>,
}

impl Reply {
    pub fn single(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self { messages: vec![Outgoing::with_keyboard(text, keyboard)] }
    }
}

/// Composition root for the journal: owns the ledger, the per-chat session
/// map and the price client, and turns inbound text into replies.
pub struct Journal {
    ledger: Arc<TradeLedger>,
    sessions: SessionStore,
    prices: PriceClient,
    bot_name: String,
}

impl Journal {
    pub fn new(ledger: Arc<TradeLedger>, prices: PriceClient, bot_name: impl Into<String>) -> Self {
        Self { ledger, sessions: SessionStore::new(), prices, bot_name: bot_name.into() }
    }

    /// Route one inbound message and apply its effects
    pub async fn dispatch(&self, chat: i64, text: &str) -> Reply {
        match route(text, self.sessions.step(chat), &self.bot_name) {
            Route::Step(input) => self.apply_step(chat, input),
            Route::Command(command) => self.run_command(chat, command).await,
            Route::Button(button) => self.run_button(chat, button).await,
            Route::RePrompt(step) => Reply::single(reports::step_prompt(step), Keyboard::for_step(step)),
            Route::Unrecognized => Reply::single(reports::unrecognized(), Keyboard::Main),
        }
    }

    async fn run_command(&self, chat: i64, command: Command) -> Reply {
        match command {
            Command::Start | Command::Help => Reply::single(reports::welcome(), Keyboard::Main),
            Command::Trade => self.begin_trade(chat).await,
            Command::Journal => self.journal(chat),
            Command::Performance => self.performance(chat),
            Command::Compound => Reply::single(reports::compound(), Keyboard::None),
            Command::Ping => Reply::single("pong 🏓", Keyboard::None),
        }
    }

    async fn run_button(&self, chat: i64, button: MenuButton) -> Reply {
        match button {
            MenuButton::NewTrade => self.begin_trade(chat).await,
            MenuButton::Dashboard => self.dashboard(chat).await,
            MenuButton::Journal => self.journal(chat),
            MenuButton::Performance => self.performance(chat),
            MenuButton::Compound => Reply::single(reports::compound(), Keyboard::None),
            MenuButton::MainMenu => self.abandon(chat),
        }
    }

    /// Enter `AwaitingCoin`, overwriting any in-flight flow
    async fn begin_trade(&self, chat: i64) -> Reply {
        let context = match self.prices.quote_or_fallback(Coin::Btc).await {
            Some(quote) if quote.source == PriceSource::Live => reports::market_context(&quote),
            _ => reports::market_context_degraded(),
        };

        self.sessions.begin(chat);

        Reply {
            messages: vec![
                Outgoing::plain(context),
                Outgoing::with_keyboard(reports::step_prompt(Step::AwaitingCoin), Keyboard::CoinPicker),
            ],
        }
    }

    fn apply_step(&self, chat: i64, input: StepInput) -> Reply {
        let Some(mut session) = self.sessions.get(chat) else {
            return Reply::single(reports::unrecognized(), Keyboard::Main);
        };

        match (session.step, input) {
            (Step::AwaitingCoin, StepInput::Coin(coin)) => {
                session.draft.coin = Some(coin);
                session.step = Step::AwaitingDirection;
                self.sessions.put(chat, session);
                Reply::single(format!("{coin} - Select position:"), Keyboard::DirectionPicker)
            }
            (Step::AwaitingDirection, StepInput::Direction(direction)) => {
                session.draft.direction = Some(direction);
                session.step = Step::AwaitingSize;
                self.sessions.put(chat, session);
                Reply::single(reports::size_prompt(direction), Keyboard::None)
            }
            (Step::AwaitingSize, StepInput::Number(size)) => {
                session.draft.size = Some(size);
                session.step = Step::AwaitingEntry;
                self.sessions.put(chat, session);
                Reply::single(reports::entry_prompt(size), Keyboard::None)
            }
            (Step::AwaitingEntry, StepInput::Number(entry_price)) => self.complete(chat, session, entry_price),
            // Router vocabulary and session step disagree; ask again.
            (step, _) => Reply::single(reports::step_prompt(step), Keyboard::for_step(step)),
        }
    }

    /// Terminal transition: append the record and clear the session
    fn complete(&self, chat: i64, session: Session, entry_price: f64) -> Reply {
        let (Some(coin), Some(direction), Some(size)) = (session.draft.coin, session.draft.direction, session.draft.size) else {
            // Draft invariant broken; restart rather than invent fields.
            tracing::error!("Session for chat {chat} reached entry step with incomplete draft");
            self.sessions.delete(chat);
            return Reply::single(reports::unrecognized(), Keyboard::Main);
        };

        let (record, _) = self.ledger.append(chat, coin, direction, size, entry_price);
        self.sessions.delete(chat);
        tracing::info!("Trade #{} recorded for chat {chat}: {} {} {} @ {}", record.id, coin, direction, size, entry_price);

        Reply::single(reports::trade_saved(&record), Keyboard::Main)
    }

    /// Discard any in-flight flow; nothing is recorded
    fn abandon(&self, chat: i64) -> Reply {
        self.sessions.delete(chat);
        Reply::single(reports::main_menu(), Keyboard::Main)
    }

    fn journal(&self, chat: i64) -> Reply {
        Reply::single(reports::journal(&self.ledger.list_by_owner(chat)), Keyboard::None)
    }

    fn performance(&self, chat: i64) -> Reply {
        Reply::single(reports::performance(self.ledger.aggregate(chat).as_ref()), Keyboard::None)
    }

    async fn dashboard(&self, chat: i64) -> Reply {
        let quote = self.prices.quote_or_fallback(Coin::Btc).await;
        Reply::single(reports::dashboard(quote.as_ref(), &self.ledger.list_by_owner(chat)), Keyboard::Main)
    }
}

#[cfg(test)]
mod tests {
    use cfj_types::Direction;
    use cfj_types::TradeStatus;

    use super::*;
    use crate::menus;

    // Price lookups fail fast and fall back; nothing listens here.
    fn journal() -> Journal {
        let prices = PriceClient::with_base_url("http://127.0.0.1:9").unwrap();
        Journal::new(Arc::new(TradeLedger::in_memory()), prices, "journalbot")
    }

    async fn drive(journal: &Journal, chat: i64, inputs: &[&str]) {
        for input in inputs {
            journal.dispatch(chat, input).await;
        }
    }

    #[tokio::test]
    async fn test_full_flow_appends_exactly_one_record() {
        let journal = journal();

        drive(&journal, 10, &[menus::NEW_TRADE, "ETH", "SHORT 📉", "0.5", "2200"]).await;

        let records = journal.ledger.list_by_owner(10);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].coin, Coin::Eth);
        assert_eq!(records[0].direction, Direction::Short);
        assert_eq!(records[0].size, 0.5);
        assert_eq!(records[0].entry_price, 2200.0);
        assert_eq!(records[0].status, TradeStatus::Open);
        assert_eq!(records[0].realized_pnl, 0.0);
        assert_eq!(journal.sessions.step(10), None);
    }

    #[tokio::test]
    async fn test_completion_confirms_and_offers_main_menu() {
        let journal = journal();

        drive(&journal, 10, &[menus::NEW_TRADE, "BTC", "LONG 📈", "0.1"]).await;
        let reply = journal.dispatch(10, "42000").await;

        assert_eq!(reply.messages.len(), 1);
        assert!(reply.messages[0].text.contains("Trade #1 saved"));
        assert_eq!(reply.messages[0].keyboard, Keyboard::Main);
    }

    #[tokio::test]
    async fn test_abandon_at_every_step_records_nothing() {
        let journal = journal();
        let scripts: [&[&str]; 4] = [
            &[menus::NEW_TRADE],
            &[menus::NEW_TRADE, "BTC"],
            &[menus::NEW_TRADE, "BTC", "LONG 📈"],
            &[menus::NEW_TRADE, "BTC", "LONG 📈", "0.1"],
        ];

        for (chat, script) in scripts.iter().enumerate() {
            let chat = chat as i64;
            drive(&journal, chat, script).await;
            journal.dispatch(chat, menus::MAIN_MENU).await;

            assert_eq!(journal.sessions.step(chat), None);
            assert!(journal.ledger.list_by_owner(chat).is_empty());
        }
    }

    #[tokio::test]
    async fn test_non_numeric_size_reprompts_without_advancing() {
        let journal = journal();
        drive(&journal, 10, &[menus::NEW_TRADE, "ETH", "SHORT 📉"]).await;

        let reply = journal.dispatch(10, "a lot").await;

        assert_eq!(journal.sessions.step(10), Some(Step::AwaitingSize));
        assert!(journal.ledger.list_by_owner(10).is_empty());
        assert!(reply.messages[0].text.contains("position size"));
    }

    #[tokio::test]
    async fn test_coin_token_during_size_step_does_not_hijack() {
        let journal = journal();
        drive(&journal, 10, &[menus::NEW_TRADE, "ETH", "SHORT 📉"]).await;

        journal.dispatch(10, "BTC").await;

        let session = journal.sessions.get(10).unwrap();
        assert_eq!(session.step, Step::AwaitingSize);
        assert_eq!(session.draft.coin, Some(Coin::Eth));
    }

    #[tokio::test]
    async fn test_new_flow_overwrites_partial_state() {
        let journal = journal();
        drive(&journal, 10, &[menus::NEW_TRADE, "ETH", "SHORT 📉"]).await;

        journal.dispatch(10, "/trade").await;

        let session = journal.sessions.get(10).unwrap();
        assert_eq!(session.step, Step::AwaitingCoin);
        assert_eq!(session.draft, Default::default());
    }

    #[tokio::test]
    async fn test_ids_shared_across_chats() {
        let journal = journal();

        drive(&journal, 1, &[menus::NEW_TRADE, "BTC", "LONG 📈", "1", "40000"]).await;
        drive(&journal, 2, &[menus::NEW_TRADE, "SOL", "SHORT 📉", "3", "95"]).await;

        assert_eq!(journal.ledger.list_by_owner(1)[0].id, 1);
        assert_eq!(journal.ledger.list_by_owner(2)[0].id, 2);
    }

    #[tokio::test]
    async fn test_begin_trade_degrades_price_context() {
        let journal = journal();

        let reply = journal.dispatch(10, menus::NEW_TRADE).await;

        // Dead endpoint: fallback quote, so the neutral context line is shown
        // and the flow still starts.
        assert_eq!(reply.messages.len(), 2);
        assert_eq!(reply.messages[0].text, reports::market_context_degraded());
        assert_eq!(reply.messages[1].keyboard, Keyboard::CoinPicker);
        assert_eq!(journal.sessions.step(10), Some(Step::AwaitingCoin));
    }

    #[tokio::test]
    async fn test_journal_and_performance_empty_sentinels() {
        let journal = journal();

        let listing = journal.dispatch(10, "/journal").await;
        let stats = journal.dispatch(10, "/performance").await;

        assert_eq!(listing.messages[0].text, "No trades recorded yet.");
        assert_eq!(stats.messages[0].text, "No trades to analyze.");
    }

    #[tokio::test]
    async fn test_unrecognized_text_gets_diagnostic() {
        let journal = journal();

        let reply = journal.dispatch(10, "hello there").await;

        assert_eq!(reply.messages[0].text, reports::unrecognized());
    }
}
