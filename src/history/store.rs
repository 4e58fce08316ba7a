use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::models::AnalysisResult;

use super::storage::KeyValueStore;

pub const HISTORY_KEY: &str = "runform_history";

/// Whole-collection load/save of past results under [`HISTORY_KEY`].
#[derive(Clone)]
pub struct ResultStore {
    backend: Arc<dyn KeyValueStore>,
}

impl ResultStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Missing, unreadable or corrupted data all yield an empty history.
    pub fn load_history(&self) -> Vec<AnalysisResult> {
        let raw = match self.backend.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("Failed to read stored history, starting empty: {err:#}");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!("Discarding unparseable stored history: {err}");
                Vec::new()
            }
        }
    }

    pub fn save_history(&self, records: &[AnalysisResult]) -> Result<()> {
        let serialized =
            serde_json::to_string_pretty(records).context("failed to serialize history")?;
        self.backend.set(HISTORY_KEY, &serialized)
    }
}

/// In-memory history, most recent first, written through to a [`ResultStore`]
/// after every mutation.
pub struct History {
    records: Vec<AnalysisResult>,
    store: ResultStore,
}

impl History {
    pub fn load(store: ResultStore) -> Self {
        let records = store.load_history();
        info!("Loaded {} past analyses", records.len());
        Self { records, store }
    }

    pub fn all(&self) -> &[AnalysisResult] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&AnalysisResult> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Prepends `result`. The in-memory list is updated even if the write fails.
    pub fn append(&mut self, result: AnalysisResult) -> Result<()> {
        self.records.insert(0, result);
        self.store.save_history(&self.records)
    }

    /// Returns `Ok(false)` when no record has `id`; nothing is written then.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        if self.records.len() == before {
            return Ok(false);
        }
        self.store.save_history(&self.records)?;
        Ok(true)
    }
}
