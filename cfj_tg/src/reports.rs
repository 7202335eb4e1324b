//! Text builders for every outgoing message. Pure presentation: nothing in
//! here touches session or ledger state.

use cfj_price::PriceQuote;
use cfj_price::PriceSource;
use cfj_types::Direction;
use cfj_types::PerformanceSummary;
use cfj_types::TradeRecord;
use cfj_types::TradeStatus;
use time::OffsetDateTime;

use crate::session::Step;

/// How many records the journal listing shows
const JOURNAL_TAIL: usize = 5;

pub fn welcome() -> String {
    "🚀 *Welcome to your Crypto Futures Journal!*\n\n\
     *Quick Commands:*\n\
     /start - Show this menu\n\
     /trade - Log new trade\n\
     /journal - View your trades\n\
     /performance - Your trading stats\n\
     /compound - Compound growth example\n\
     /ping - Liveness check\n\n\
     *Features:*\n\
     • One-tap trade logging\n\
     • Performance tracking\n\
     • Compound calculator\n\n\
     Tap 🎯 NEW TRADE to begin!"
        .to_string()
}

/// Market context shown when a flow starts and the quote is live
pub fn market_context(quote: &PriceQuote) -> String {
    let now = OffsetDateTime::now_utc();
    format!(
        "📊 *Market Context*\n{}: ${}\nTime: {:02}:{:02} UTC\n\nReady to log your trade!",
        quote.coin,
        format_usd(quote.usd),
        now.hour(),
        now.minute()
    )
}

/// Shown instead of a stale constant when the quote degraded to the fallback
pub fn market_context_degraded() -> String {
    "Let's log your trade! 📒".to_string()
}

pub fn step_prompt(step: Step) -> String {
    match step {
        Step::AwaitingCoin => "Select coin:".to_string(),
        Step::AwaitingDirection => "Select position:".to_string(),
        Step::AwaitingSize => "Enter position size as a positive number (e.g., 0.1):".to_string(),
        Step::AwaitingEntry => "Enter entry price as a positive number (e.g., 42000):".to_string(),
    }
}

pub fn size_prompt(direction: Direction) -> String {
    format!("Position: {}\n\nEnter position size (e.g., 0.1):", direction.as_str().to_uppercase())
}

pub fn entry_prompt(size: f64) -> String {
    format!("Size: {size}\n\nEnter entry price (e.g., 42000):")
}

pub fn trade_saved(record: &TradeRecord) -> String {
    format!(
        "✅ *Trade #{} saved!*\n\n{} {}\nSize: {}\nEntry: ${}\n\nTap 📝 JOURNAL to review it.",
        record.id,
        record.coin,
        record.direction.as_str().to_uppercase(),
        record.size,
        format_usd(record.entry_price)
    )
}

pub fn journal(records: &[TradeRecord]) -> String {
    if records.is_empty() {
        return "No trades recorded yet.".to_string();
    }

    let mut text = String::from("📝 *Your Trading Journal*\n\n");
    let tail_start = records.len().saturating_sub(JOURNAL_TAIL);
    for record in &records[tail_start..] {
        text.push_str(&format!(
            "• {} {}\n  Entry: ${}\n  P&L: ${}\n  Time: {:02}:{:02} UTC\n────────────────────\n",
            record.coin,
            record.direction.as_str().to_uppercase(),
            format_usd(record.entry_price),
            format_usd(record.realized_pnl),
            record.created_at.hour(),
            record.created_at.minute()
        ));
    }
    text
}

pub fn performance(summary: Option<&PerformanceSummary>) -> String {
    let Some(summary) = summary else {
        return "No trades to analyze.".to_string();
    };

    format!(
        "💰 *Performance Summary*\n\n\
         Total Trades: {}\n\
         Open: {} | Closed: {}\n\
         Win Rate: {:.1}%\n\
         Total P&L: ${}\n\
         Avg P&L per Trade: ${}\n\n\
         *Keep trading consistently!*",
        summary.count,
        summary.open_count,
        summary.closed_count,
        summary.win_rate,
        format_usd(summary.total_pnl),
        format_usd(summary.avg_pnl)
    )
}

pub fn dashboard(quote: Option<&PriceQuote>, records: &[TradeRecord]) -> String {
    let mut text = String::from("📊 *Dashboard*\n\n");

    if let Some(quote) = quote {
        let tag = match quote.source {
            PriceSource::Live => "",
            PriceSource::Fallback => " (est.)",
        };
        text.push_str(&format!("{}: ${}{tag}\n", quote.coin, format_usd(quote.usd)));
    }

    let open = records.iter().filter(|record| record.status == TradeStatus::Open).count();
    text.push_str(&format!("Trades logged: {} ({open} open)\n\nTap 🎯 NEW TRADE to log another.", records.len()));
    text
}

pub fn compound() -> String {
    "🧮 *Compound Calculator*\n\n\
     *Example:*\n\
     Starting: $10,000\n\
     Risk per Trade: 2%\n\
     Target Gain: 20% of risk\n\
     Win Rate: 60%\n\n\
     After 100 trades: ~$45,000\n\
     Growth: 350%\n\n\
     *Key Insight:*\n\
     Consistency + Risk Management = Compounding Magic!"
        .to_string()
}

pub fn main_menu() -> String {
    "🏠 *Main Menu*".to_string()
}

pub fn unrecognized() -> String {
    "🤔 I didn't catch that. Use the menu buttons or /help.".to_string()
}

/// `12345.6` → `12,345.60`
pub fn format_usd(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(formatted.len() + digits.len() / 3);
    if value < 0.0 {
        grouped.push('-');
    }
    for (index, digit) in digits.iter().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit as char);
    }
    grouped.push('.');
    grouped.push_str(frac_part);
    grouped
}
