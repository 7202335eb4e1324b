use teloxide::types::KeyboardButton;
use teloxide::types::KeyboardMarkup;

use crate::flow::Keyboard;

pub const NEW_TRADE: &str = "🎯 NEW TRADE";
pub const DASHBOARD: &str = "📊 DASHBOARD";
pub const JOURNAL: &str = "📝 JOURNAL";
pub const PERFORMANCE: &str = "💰 PERFORMANCE";
pub const COMPOUND: &str = "🧮 COMPOUND";
pub const MAIN_MENU: &str = "🏠 MAIN MENU";

pub const LONG: &str = "LONG 📈";
pub const SHORT: &str = "SHORT 📉";

/// Global menu buttons, matched by exact label.
///
/// Coin and direction tokens are deliberately absent: they are step
/// vocabulary, consumed only when a session is awaiting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    NewTrade,
    Dashboard,
    Journal,
    Performance,
    Compound,
    MainMenu,
}

impl MenuButton {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            NEW_TRADE => Some(MenuButton::NewTrade),
            DASHBOARD => Some(MenuButton::Dashboard),
            JOURNAL => Some(MenuButton::Journal),
            PERFORMANCE => Some(MenuButton::Performance),
            COMPOUND => Some(MenuButton::Compound),
            MAIN_MENU => Some(MenuButton::MainMenu),
            _ => None,
        }
    }
}

/// Reply keyboard shown with the welcome message and after a flow ends
pub fn main_menu() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(NEW_TRADE), KeyboardButton::new(DASHBOARD)],
        vec![KeyboardButton::new(JOURNAL), KeyboardButton::new(PERFORMANCE)],
        vec![KeyboardButton::new(COMPOUND)],
    ])
    .resize_keyboard()
}

pub fn coin_picker() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new("BTC"), KeyboardButton::new("ETH"), KeyboardButton::new("SOL")],
        vec![KeyboardButton::new("ADA"), KeyboardButton::new("AVAX"), KeyboardButton::new("Other")],
        vec![KeyboardButton::new(MAIN_MENU)],
    ])
    .resize_keyboard()
}

pub fn direction_picker() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(LONG), KeyboardButton::new(SHORT)],
        vec![KeyboardButton::new(MAIN_MENU)],
    ])
    .resize_keyboard()
}

/// Map a flow keyboard to its Telegram markup
pub fn markup_for(keyboard: Keyboard) -> Option<KeyboardMarkup> {
    match keyboard {
        Keyboard::None => None,
        Keyboard::Main => Some(main_menu()),
        Keyboard::CoinPicker => Some(coin_picker()),
        Keyboard::DirectionPicker => Some(direction_picker()),
    }
}
