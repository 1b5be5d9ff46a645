use std::collections::BTreeMap;
use std::path::Path;

use tracing::{error, info};
use validator::Validate;

use crate::domain::defect::{
    CountByPlatform, CountByPriority, DefectEntry, DefectSummary, Platform, Priority,
    ReleaseTrendPoint,
};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::storage::{JsonFileStore, DEFECT_DATA_FILE};

pub struct DefectTrackerUseCase {
    store: JsonFileStore<Vec<DefectEntry>>,
}

impl DefectTrackerUseCase {
    pub fn new(store: JsonFileStore<Vec<DefectEntry>>) -> Self {
        Self { store }
    }

    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(JsonFileStore::new(data_dir.join(DEFECT_DATA_FILE)))
    }

    /// Current entries. An unreadable file is logged and shown as empty so the
    /// dashboard still renders.
    pub fn list(&self) -> Vec<DefectEntry> {
        match self.store.load() {
            Ok(entries) => entries.unwrap_or_default(),
            Err(err) => {
                error!(error = %err, path = %self.store.path().display(), "Error loading defect data");
                Vec::new()
            }
        }
    }

    pub fn add(&self, entry: DefectEntry) -> Result<Vec<DefectEntry>> {
        entry.validate()?;

        info!(
            release = %entry.release,
            platform = entry.platform.label(),
            count = entry.count,
            "Adding defect entry"
        );
        // A file we failed to read is never overwritten: `update` loads strictly.
        self.store.update(|entries| {
            entries.push(entry);
            Ok(entries.clone())
        })
    }

    pub fn replace_all(&self, entries: Vec<DefectEntry>) -> Result<Vec<DefectEntry>> {
        for (index, entry) in entries.iter().enumerate() {
            entry.validate().map_err(|err| {
                AppError::ValidationError(format!("Row {}: {}", index + 1, err))
            })?;
        }
        self.store.save(&entries)?;
        info!(entries = entries.len(), "Saved defect data changes");
        Ok(entries)
    }

    pub fn summary(&self) -> DefectSummary {
        summarize(&self.list())
    }
}

/// Sums defect counts per platform, per priority and per (release, platform).
pub fn summarize(entries: &[DefectEntry]) -> DefectSummary {
    let mut by_platform: BTreeMap<Platform, u64> = BTreeMap::new();
    let mut by_priority: BTreeMap<Priority, u64> = BTreeMap::new();
    let mut trend: BTreeMap<(String, Platform), u64> = BTreeMap::new();

    for entry in entries {
        let count = u64::from(entry.count);
        *by_platform.entry(entry.platform).or_default() += count;
        *by_priority.entry(entry.priority).or_default() += count;
        *trend
            .entry((entry.release.clone(), entry.platform))
            .or_default() += count;
    }

    DefectSummary {
        total_entries: entries.len(),
        total_defects: by_platform.values().sum(),
        by_platform: by_platform
            .into_iter()
            .map(|(platform, count)| CountByPlatform { platform, count })
            .collect(),
        by_priority: by_priority
            .into_iter()
            .map(|(priority, count)| CountByPriority { priority, count })
            .collect(),
        trend: trend
            .into_iter()
            .map(|((release, platform), count)| ReleaseTrendPoint {
                release,
                platform,
                count,
            })
            .collect(),
    }
}
