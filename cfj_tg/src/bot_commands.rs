use teloxide::utils::command::BotCommands;

/// Journal bot commands with type-safe parsing
#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Journal Bot Commands:")]
pub enum Command {
    #[command(description = "Show welcome and main menu")]
    Start,

    #[command(description = "Show welcome and main menu")]
    Help,

    #[command(description = "Log a new trade")]
    Trade,

    #[command(description = "View your recent trades")]
    Journal,

    #[command(description = "Your trading stats")]
    Performance,

    #[command(description = "Compound growth example")]
    Compound,

    #[command(description = "Liveness check")]
    Ping,
}
