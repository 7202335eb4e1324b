//! Liveness/health HTTP surface for the hosting platform.
//!
//! Unauthenticated, read-only, shares the in-memory ledger with the bot.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::get;
use cfj_ledger::TradeLedger;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub trades_logged: usize,
    pub users: usize,
    #[serde(with = "time::serde::rfc3339")]
    pub server_time: OffsetDateTime,
}

/// Build the router with all endpoints
pub fn router(ledger: Arc<TradeLedger>) -> Router {
    Router::new()
        .route("/", get(get_root))
        .route("/health", get(get_health))
        .route("/stats", get(get_stats))
        .with_state(ledger)
}

/// Bind and serve until the process is terminated
pub async fn serve(ledger: Arc<TradeLedger>, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Health server listening on {addr}");
    axum::serve(listener, router(ledger)).await
}

/// GET / - human-readable status line
async fn get_root() -> &'static str {
    "🚀 journal_bot is running"
}

/// GET /health - liveness probe
async fn get_health() -> Json<HealthResponse> {
    Json(health_response())
}

/// GET /stats - ledger counters
async fn get_stats(State(ledger): State<Arc<TradeLedger>>) -> Json<StatsResponse> {
    Json(stats_response(&ledger))
}

fn health_response() -> HealthResponse {
    HealthResponse { status: "healthy", timestamp: OffsetDateTime::now_utc() }
}

fn stats_response(ledger: &TradeLedger) -> StatsResponse {
    StatsResponse { trades_logged: ledger.len(), users: ledger.owner_count(), server_time: OffsetDateTime::now_utc() }
}
