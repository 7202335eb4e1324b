use cfj_types::Coin;
use cfj_types::Direction;
use teloxide::utils::command::BotCommands;

use crate::bot_commands::Command;
use crate::menus::MenuButton;
use crate::session::Step;

/// Input consumed by the current session step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepInput {
    Coin(Coin),
    Direction(Direction),
    Number(f64),
}

/// Where one inbound message goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route {
    Step(StepInput),
    Command(Command),
    Button(MenuButton),
    /// Fallback with an active session: ask for the current field again
    RePrompt(Step),
    /// Fallback without a session: explicit diagnostic, never a silent drop
    Unrecognized,
}

/// Fixed-priority routing table: (1) session-step predicate, (2) slash
/// command, (3) exact menu button, (4) fallback.
///
/// Coin and direction tokens are only consumed by rule 1, so a coin symbol
/// typed during the size or entry step cannot hijack the flow.
pub fn route(text: &str, step: Option<Step>, bot_name: &str) -> Route {
    let text = text.trim();

    if let Some(step) = step
        && let Some(input) = step_input(text, step)
    {
        return Route::Step(input);
    }

    if let Ok(command) = Command::parse(text, bot_name) {
        return Route::Command(command);
    }

    if let Some(button) = MenuButton::parse(text) {
        return Route::Button(button);
    }

    match step {
        Some(step) => Route::RePrompt(step),
        None => Route::Unrecognized,
    }
}

fn step_input(text: &str, step: Step) -> Option<StepInput> {
    match step {
        Step::AwaitingCoin => Coin::parse_button(text).map(StepInput::Coin),
        Step::AwaitingDirection => Direction::parse_button(text).map(StepInput::Direction),
        Step::AwaitingSize | Step::AwaitingEntry => parse_positive_number(text).map(StepInput::Number),
    }
}

/// Positive finite decimal; tolerates a leading `$` and comma grouping
pub fn parse_positive_number(text: &str) -> Option<f64> {
    let cleaned = text.trim().trim_start_matches('$').replace(',', "");

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menus;

    const BOT: &str = "journalbot";

    #[test]
    fn test_step_predicate_wins_over_globals() {
        assert_eq!(route("ETH", Some(Step::AwaitingCoin), BOT), Route::Step(StepInput::Coin(Coin::Eth)));
        assert_eq!(route("SHORT 📉", Some(Step::AwaitingDirection), BOT), Route::Step(StepInput::Direction(Direction::Short)));
        assert_eq!(route("0.5", Some(Step::AwaitingSize), BOT), Route::Step(StepInput::Number(0.5)));
        assert_eq!(route("2200", Some(Step::AwaitingEntry), BOT), Route::Step(StepInput::Number(2200.0)));
    }

    #[test]
    fn test_coin_token_during_size_step_reprompts() {
        assert_eq!(route("BTC", Some(Step::AwaitingSize), BOT), Route::RePrompt(Step::AwaitingSize));
    }

    #[test]
    fn test_commands_reachable_mid_session() {
        assert_eq!(route("/journal", Some(Step::AwaitingCoin), BOT), Route::Command(Command::Journal));
        assert_eq!(route("/trade", Some(Step::AwaitingEntry), BOT), Route::Command(Command::Trade));
    }

    #[test]
    fn test_main_menu_button_matches_at_any_step() {
        for step in [Step::AwaitingCoin, Step::AwaitingDirection, Step::AwaitingSize, Step::AwaitingEntry] {
            assert_eq!(route(menus::MAIN_MENU, Some(step), BOT), Route::Button(MenuButton::MainMenu));
        }
    }

    #[test]
    fn test_coin_token_without_session_is_unrecognized() {
        assert_eq!(route("BTC", None, BOT), Route::Unrecognized);
    }

    #[test]
    fn test_non_numeric_at_numeric_steps_reprompts() {
        assert_eq!(route("a lot", Some(Step::AwaitingSize), BOT), Route::RePrompt(Step::AwaitingSize));
        assert_eq!(route("-3", Some(Step::AwaitingEntry), BOT), Route::RePrompt(Step::AwaitingEntry));
    }

    #[test]
    fn test_unknown_text_without_session_is_unrecognized() {
        assert_eq!(route("what is this", None, BOT), Route::Unrecognized);
        assert_eq!(route("/unknowncommand", None, BOT), Route::Unrecognized);
    }

    #[test]
    fn test_parse_positive_number() {
        assert_eq!(parse_positive_number("0.5"), Some(0.5));
        assert_eq!(parse_positive_number("$2,200"), Some(2200.0));
        assert_eq!(parse_positive_number(" 42000 "), Some(42000.0));
        assert_eq!(parse_positive_number("0"), None);
        assert_eq!(parse_positive_number("-1"), None);
        assert_eq!(parse_positive_number("NaN"), None);
        assert_eq!(parse_positive_number("inf"), None);
        assert_eq!(parse_positive_number("five"), None);
    }
}
