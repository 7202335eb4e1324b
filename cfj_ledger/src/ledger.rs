use std::collections::HashSet;
use std::path::PathBuf;

use cfj_types::Coin;
use cfj_types::Direction;
use cfj_types::PerformanceSummary;
use cfj_types::TradeRecord;
use cfj_types::TradeStatus;
use parking_lot::RwLock;
use time::OffsetDateTime;

use crate::store;

/// What happened to the store file on an append
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Full ledger written through to the store file
    Persisted,
    /// No store path configured, memory-only by choice
    Skipped,
    /// Write failed; the record survives in memory only
    Degraded,
}

/// Append-only trade ledger shared by the bot handlers and the health
/// surface.
///
/// One write lock covers id assignment, the push, and the store write-through,
/// so ids stay strictly increasing across all owners no matter how handlers
/// interleave.
pub struct TradeLedger {
    records: RwLock<Vec<TradeRecord>>,
    path: Option<PathBuf>,
}

impl TradeLedger {
    /// Open the ledger, loading the store file when one is configured.
    ///
    /// Any load failure degrades to an empty ledger with a warning; a missing
    /// file is a normal first run.
    pub fn open(path: Option<PathBuf>) -> Self {
        let records = match &path {
            Some(path) if path.exists() => match store::load(path) {
                Ok(records) => {
                    tracing::info!("Loaded {} trades from {}", records.len(), path.display());
                    records
                }
                Err(err) => {
                    tracing::warn!("Failed to load trades from {}: {err}. Starting empty.", path.display());
                    Vec::new()
                }
            },
            Some(path) => {
                tracing::info!("No trade store at {} yet, starting empty", path.display());
                Vec::new()
            }
            None => {
                tracing::info!("Trade store disabled, running memory-only");
                Vec::new()
            }
        };

        Self { records: RwLock::new(records), path }
    }

    /// Memory-only ledger
    pub fn in_memory() -> Self {
        Self::open(None)
    }

    /// Append a completed trade and write the ledger through to the store.
    pub fn append(&self, owner: i64, coin: Coin, direction: Direction, size: f64, entry_price: f64) -> (TradeRecord, PersistOutcome) {
        let mut records = self.records.write();

        let record = TradeRecord {
            id: records.len() as u64 + 1,
            owner,
            coin,
            direction,
            size,
            entry_price,
            status: TradeStatus::Open,
            realized_pnl: 0.0,
            created_at: OffsetDateTime::now_utc(),
        };
        records.push(record.clone());

        let outcome = match &self.path {
            Some(path) => match store::save(path, &records) {
                Ok(()) => PersistOutcome::Persisted,
                Err(err) => {
                    tracing::error!("Failed to persist trades to {}: {err}. Continuing memory-only.", path.display());
                    PersistOutcome::Degraded
                }
            },
            None => PersistOutcome::Skipped,
        };

        (record, outcome)
    }

    /// All of one owner's records in insertion order
    pub fn list_by_owner(&self, owner: i64) -> Vec<TradeRecord> {
        self.records.read().iter().filter(|record| record.owner == owner).cloned().collect()
    }

    /// Aggregate stats for one owner; `None` means no trades recorded.
    pub fn aggregate(&self, owner: i64) -> Option<PerformanceSummary> {
        let records = self.records.read();
        let mine: Vec<&TradeRecord> = records.iter().filter(|record| record.owner == owner).collect();
        if mine.is_empty() {
            return None;
        }

        let count = mine.len();
        let closed_count = mine.iter().filter(|record| record.status == TradeStatus::Closed).count();
        let wins = mine.iter().filter(|record| record.status == TradeStatus::Closed && record.realized_pnl > 0.0).count();
        let win_rate = if closed_count == 0 { 0.0 } else { wins as f64 / closed_count as f64 * 100.0 };
        let total_pnl: f64 = mine.iter().map(|record| record.realized_pnl).sum();

        Some(PerformanceSummary {
            count,
            open_count: count - closed_count,
            closed_count,
            win_rate,
            total_pnl,
            avg_pnl: total_pnl / count as f64,
        })
    }

    /// Total records across all owners
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Distinct owners with at least one record
    pub fn owner_count(&self) -> usize {
        self.records.read().iter().map(|record| record.owner).collect::<HashSet<_>>().len()
    }
}
