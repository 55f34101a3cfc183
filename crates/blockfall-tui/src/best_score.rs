use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;
use blockfall_engine::ProgressionSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Best score achieved on this machine, with the counters of the run that
/// set it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestScoreRecord {
    /// When the score was achieved (ISO 8601).
    pub achieved_at: DateTime<Utc>,
    /// Final counters of the record-setting run.
    #[serde(flatten)]
    pub counters: ProgressionSnapshot,
}

/// Loads the persisted best score once at startup and rewrites the file
/// whenever a finished game beats it.
#[derive(Debug)]
pub struct BestScoreStore {
    path: PathBuf,
    record: Option<BestScoreRecord>,
}

impl BestScoreStore {
    /// Reads the record from `path`. A missing file is an empty store, not
    /// an error.
    pub fn load(path: PathBuf) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self { path, record: None });
        }
        let file = File::open(&path)
            .with_context(|| format!("Failed to open best score file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let record = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse best score file: {}", path.display()))?;
        Ok(Self {
            path,
            record: Some(record),
        })
    }

    /// The best score on record, zero when none exists.
    #[must_use]
    pub fn best_score(&self) -> usize {
        self.record
            .as_ref()
            .map_or(0, |record| record.counters.score)
    }

    /// Saves the finished game's counters when they beat the record.
    /// Returns whether a new record was written.
    pub fn record_if_beaten(&mut self, counters: ProgressionSnapshot) -> anyhow::Result<bool> {
        if counters.score <= self.best_score() {
            return Ok(false);
        }
        let record = BestScoreRecord {
            achieved_at: Utc::now(),
            counters,
        };
        self.save(&record)?;
        self.record = Some(record);
        Ok(true)
    }

    fn save(&self, record: &BestScoreRecord) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create file: {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, record)
            .with_context(|| format!("Failed to write JSON to {}", self.path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush output to {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(score: usize) -> ProgressionSnapshot {
        ProgressionSnapshot {
            score,
            cleared_lines: score / 100,
            level: score / 1000 + 1,
        }
    }

    fn temp_store(name: &str) -> BestScoreStore {
        let path = std::env::temp_dir().join(format!(
            "blockfall_best_{}_{}.json",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        BestScoreStore::load(path).unwrap()
    }

    #[test]
    fn test_missing_file_is_an_empty_store() {
        let store = temp_store("missing");
        assert_eq!(store.best_score(), 0);
    }

    #[test]
    fn test_record_is_written_only_when_beaten() {
        let mut store = temp_store("beaten");

        assert!(store.record_if_beaten(snapshot(500)).unwrap());
        assert_eq!(store.best_score(), 500);

        assert!(!store.record_if_beaten(snapshot(300)).unwrap());
        assert!(!store.record_if_beaten(snapshot(500)).unwrap());
        assert_eq!(store.best_score(), 500);

        assert!(store.record_if_beaten(snapshot(800)).unwrap());
        assert_eq!(store.best_score(), 800);

        let _ = fs::remove_file(&store.path);
    }

    #[test]
    fn test_record_survives_a_reload() {
        let mut store = temp_store("reload");
        store.record_if_beaten(snapshot(1200)).unwrap();

        let reloaded = BestScoreStore::load(store.path.clone()).unwrap();
        assert_eq!(reloaded.best_score(), 1200);
        let record = reloaded.record.unwrap();
        assert_eq!(record.counters.cleared_lines, 12);
        assert_eq!(record.counters.level, 2);

        let _ = fs::remove_file(&store.path);
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let record = BestScoreRecord {
            achieved_at: Utc::now(),
            counters: snapshot(2500),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: BestScoreRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.counters, record.counters);
        assert_eq!(back.achieved_at, record.achieved_at);
    }
}
