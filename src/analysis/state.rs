use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};

use crate::models::{AnalysisResult, SkillLevel};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AnalysisStatus {
    Idle,
    Preparing,
    Analyzing,
    Completed,
    Error,
}

impl Default for AnalysisStatus {
    fn default() -> Self {
        AnalysisStatus::Idle
    }
}

/// The video picked for the next analysis. The frontend turns `path` into a
/// preview source over the asset protocol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoSelection {
    pub path: PathBuf,
    pub file_name: String,
}

impl VideoSelection {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, file_name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Per-analysis inputs; cleared on every reset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisSettings {
    pub target_pace: String,
    pub runner_description: String,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisState {
    pub status: AnalysisStatus,
    pub video: Option<VideoSelection>,
    pub settings: AnalysisSettings,
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
    /// Identifies the request owning the current `Analyzing` phase, so a
    /// response that arrives after a reset cannot move the display.
    #[serde(skip)]
    pub request_id: Option<String>,
}

impl AnalysisState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idle → Preparing, or swaps the selection while already Preparing.
    pub fn select_video(&mut self, video: VideoSelection, default_level: SkillLevel) -> Result<()> {
        match self.status {
            AnalysisStatus::Idle => {
                *self = Self {
                    status: AnalysisStatus::Preparing,
                    video: Some(video),
                    settings: AnalysisSettings {
                        level: default_level,
                        ..AnalysisSettings::default()
                    },
                    ..Self::default()
                };
                Ok(())
            }
            AnalysisStatus::Preparing => {
                self.video = Some(video);
                Ok(())
            }
            status => bail!("cannot select a video while {status:?}; reset first"),
        }
    }

    pub fn update_settings(&mut self, settings: AnalysisSettings) -> Result<()> {
        if self.status != AnalysisStatus::Preparing {
            bail!("settings can only change while preparing an analysis");
        }
        self.settings = settings;
        Ok(())
    }

    /// Preparing → Analyzing. Hands back what the request needs.
    pub fn begin_analysis(&mut self, request_id: String) -> Result<(VideoSelection, AnalysisSettings)> {
        if self.status != AnalysisStatus::Preparing {
            bail!("no analysis is being prepared");
        }
        let video = self
            .video
            .clone()
            .ok_or_else(|| anyhow!("select a video before starting the analysis"))?;

        self.status = AnalysisStatus::Analyzing;
        self.error = None;
        self.request_id = Some(request_id);
        Ok((video, self.settings.clone()))
    }

    /// Analyzing → Completed. Returns false when `request_id` no longer owns
    /// the state (the user reset or moved on meanwhile).
    pub fn complete(&mut self, request_id: &str, result: AnalysisResult) -> bool {
        if !self.owns(request_id) {
            return false;
        }
        self.status = AnalysisStatus::Completed;
        self.result = Some(result);
        self.request_id = None;
        true
    }

    /// Analyzing → Error. The video selection is kept.
    pub fn fail(&mut self, request_id: &str, message: impl Into<String>) -> bool {
        if !self.owns(request_id) {
            return false;
        }
        self.status = AnalysisStatus::Error;
        self.error = Some(message.into());
        self.request_id = None;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Shows a stored result without contacting the model.
    pub fn show_result(&mut self, result: AnalysisResult) -> Result<()> {
        if self.status == AnalysisStatus::Analyzing {
            bail!("cannot open a past analysis while an analysis is running");
        }
        *self = Self {
            status: AnalysisStatus::Completed,
            result: Some(result),
            ..Self::default()
        };
        Ok(())
    }

    /// Resets to Idle if the displayed result is `id`.
    pub fn forget_result(&mut self, id: &str) -> bool {
        let showing = self.status == AnalysisStatus::Completed
            && self.result.as_ref().map(|r| r.id.as_str()) == Some(id);
        if showing {
            self.reset();
        }
        showing
    }

    fn owns(&self, request_id: &str) -> bool {
        self.status == AnalysisStatus::Analyzing && self.request_id.as_deref() == Some(request_id)
    }
}
