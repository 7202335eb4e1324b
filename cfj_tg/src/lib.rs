pub mod bot_commands;
pub mod flow;
pub mod handlers;
pub mod menus;
pub mod replies;
pub mod reports;
pub mod router;
pub mod session;
pub mod settings;

pub use bot_commands::Command;
pub use flow::Journal;
pub use flow::Keyboard;
pub use flow::Outgoing;
pub use flow::Reply;
pub use menus::MenuButton;
pub use router::Route;
pub use router::route;
pub use session::SessionStore;
pub use session::Step;
pub use settings::Settings;
