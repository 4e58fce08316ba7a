use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::models::{Language, SkillLevel};

/// User preferences that survive restarts. Per-analysis settings live in
/// [`crate::analysis::AnalysisSettings`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub language: Language,
    pub default_level: SkillLevel,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<Preferences>,
}

impl SettingsStore {
    /// A missing or unparseable file falls back to defaults.
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            Preferences::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn preferences(&self) -> Preferences {
        self.read().clone()
    }

    pub fn update_preferences(&self, preferences: Preferences) -> Result<()> {
        let mut guard = self.write();
        self.persist(&preferences)?;
        *guard = preferences;
        Ok(())
    }

    fn persist(&self, data: &Preferences) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    fn read(&self) -> RwLockReadGuard<'_, Preferences> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Preferences> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        assert_eq!(store.preferences(), Preferences::default());
        assert_eq!(store.preferences().language, Language::Japanese);
    }

    #[test]
    fn updates_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = SettingsStore::new(path.clone()).unwrap();

        let prefs = Preferences {
            language: Language::English,
            default_level: SkillLevel::Advanced,
        };
        store.update_preferences(prefs.clone()).unwrap();

        let reopened = SettingsStore::new(path).unwrap();
        assert_eq!(reopened.preferences(), prefs);
    }

    #[test]
    fn garbage_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.preferences(), Preferences::default());
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "language": "english" }"#).unwrap();
        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.preferences().language, Language::English);
        assert_eq!(store.preferences().default_level, SkillLevel::Intermediate);
    }
}
