use std::fs;
use std::path::Path;

use cfj_types::TradeRecord;

use crate::errors::Result;

/// Read the full ledger from a flat JSON-array file.
///
/// Callers treat any failure as "empty ledger"; the error is returned so the
/// caller can log what was skipped.
pub fn load(path: &Path) -> Result<Vec<TradeRecord>> {
    let raw = fs::read_to_string(path)?;
    let records = serde_json::from_str(&raw)?;
    Ok(records)
}

/// Overwrite the store file with the full ledger contents.
///
/// Whole-file rewrite with no rename step; a crash mid-write can truncate the
/// store. The next load then degrades to an empty ledger.
pub fn save(path: &Path, records: &[TradeRecord]) -> Result<()> {
    let raw = serde_json::to_string(records)?;
    fs::write(path, raw)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use cfj_types::Coin;
    use cfj_types::Direction;
    use cfj_types::TradeStatus;
    use time::OffsetDateTime;

    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cfj_store_{}_{}.json", std::process::id(), name))
    }

    fn record(id: u64) -> TradeRecord {
        TradeRecord {
            id,
            owner: 7,
            coin: Coin::Btc,
            direction: Direction::Long,
            size: 0.1,
            entry_price: 42_000.0,
            status: TradeStatus::Open,
            realized_pnl: 0.0,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let path = scratch_file("round_trip");
        let records = vec![record(1), record(2)];

        save(&path, &records).unwrap();
        let loaded = load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, records);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let path = scratch_file("missing");
        assert!(load(&path).is_err());
    }

    #[test]
    fn test_load_corrupt_file_errors() {
        let path = scratch_file("corrupt");
        fs::write(&path, "[{\"id\": 1,").unwrap();

        let result = load(&path);
        let _ = fs::remove_file(&path);

        assert!(result.is_err());
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let path = scratch_file("overwrite");

        save(&path, &[record(1), record(2)]).unwrap();
        save(&path, &[record(3)]).unwrap();
        let loaded = load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 3);
    }
}
