use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::{anyhow, Result};
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    chart::{chart_points, ChartPoint},
    gemini::{AnalysisClient, AnalysisError, AnalysisParams},
    history::History,
    log_error, log_info, log_warn,
    models::{AnalysisResult, Language},
    settings::SettingsStore,
};

use super::{AnalysisSettings, AnalysisState, AnalysisStatus, VideoSelection};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSnapshot {
    pub state: AnalysisState,
    /// Chart values for `state.result`, if any.
    pub chart: Option<Vec<ChartPoint>>,
    /// Localized foot strike of `state.result`, if any.
    pub foot_strike_label: Option<&'static str>,
    /// True while a model request is outstanding, even after a reset.
    pub busy: bool,
}

/// Receives every state and history change, e.g. to forward them to the webview.
pub trait AnalysisListener: Send + Sync {
    fn state_changed(&self, snapshot: &AnalysisSnapshot);
    fn history_changed(&self, history: &[AnalysisResult]);
}

pub struct NoopListener;

impl AnalysisListener for NoopListener {
    fn state_changed(&self, _snapshot: &AnalysisSnapshot) {}
    fn history_changed(&self, _history: &[AnalysisResult]) {}
}

enum Failure {
    FileRead(anyhow::Error),
    Model(AnalysisError),
}

/// Clears the in-flight flag when the owning request finishes, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Clone)]
pub struct AnalysisController {
    state: Arc<Mutex<AnalysisState>>,
    history: Arc<Mutex<History>>,
    in_flight: Arc<AtomicBool>,
    client: AnalysisClient,
    settings: Arc<SettingsStore>,
    listener: Arc<dyn AnalysisListener>,
}

impl AnalysisController {
    pub fn new(
        client: AnalysisClient,
        history: History,
        settings: Arc<SettingsStore>,
        listener: Arc<dyn AnalysisListener>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(AnalysisState::new())),
            history: Arc::new(Mutex::new(history)),
            in_flight: Arc::new(AtomicBool::new(false)),
            client,
            settings,
            listener,
        }
    }

    pub async fn get_snapshot(&self) -> AnalysisSnapshot {
        let state = self.state.lock().await.clone();
        self.snapshot_of(state)
    }

    pub async fn select_video(&self, path: String) -> Result<AnalysisSnapshot> {
        let default_level = self.settings.preferences().default_level;
        {
            let mut state = self.state.lock().await;
            state.select_video(VideoSelection::from_path(path), default_level)?;
        }
        Ok(self.emit_state_changed().await)
    }

    pub async fn update_settings(&self, settings: AnalysisSettings) -> Result<AnalysisSnapshot> {
        self.state.lock().await.update_settings(settings)?;
        Ok(self.emit_state_changed().await)
    }

    /// Runs one analysis to completion. Model and file failures land in the
    /// Error state and still return `Ok`; `Err` means the request was refused.
    pub async fn start_analysis(&self) -> Result<AnalysisSnapshot> {
        let in_flight = InFlight::acquire(&self.in_flight)
            .ok_or_else(|| anyhow!("an analysis is already in progress"))?;

        let request_id = Uuid::new_v4().to_string();
        let (video, settings) = self.state.lock().await.begin_analysis(request_id.clone())?;
        self.emit_state_changed().await;

        let language = self.settings.preferences().language;
        log_info!(
            "Starting analysis {} of {} ({:?})",
            request_id,
            video.file_name,
            settings.level
        );

        match self.run_analysis(&video, &settings, language).await {
            Ok(result) => {
                log_info!(
                    "Analysis {} finished: result {} scored {}",
                    request_id,
                    result.id,
                    result.overall_score
                );
                self.record(result.clone()).await;

                let mut state = self.state.lock().await;
                if !state.complete(&request_id, result) {
                    log_info!("Analysis {} finished after a reset; kept in history only", request_id);
                }
            }
            Err(Failure::FileRead(err)) => {
                log_error!("Failed to read {}: {:#}", video.path.display(), err);
                self.state
                    .lock()
                    .await
                    .fail(&request_id, language.file_read_failed());
            }
            Err(Failure::Model(err)) => {
                log_error!("Analysis {} failed: {}", request_id, err);
                self.state
                    .lock()
                    .await
                    .fail(&request_id, language.analysis_failed());
            }
        }

        drop(in_flight);
        Ok(self.emit_state_changed().await)
    }

    pub async fn reset(&self) -> AnalysisSnapshot {
        self.state.lock().await.reset();
        self.emit_state_changed().await
    }

    pub async fn list_history(&self) -> Vec<AnalysisResult> {
        self.history.lock().await.all().to_vec()
    }

    pub async fn select_history_item(&self, id: &str) -> Result<AnalysisSnapshot> {
        let record = self
            .history
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow!("no past analysis with id {id}"))?;

        self.state.lock().await.show_result(record)?;
        Ok(self.emit_state_changed().await)
    }

    /// Removes `id` from history. If it is on screen the display resets to Idle.
    pub async fn delete_history_item(&self, id: &str) -> Result<AnalysisSnapshot> {
        {
            let mut history = self.history.lock().await;
            match history.remove(id) {
                Ok(true) => {}
                Ok(false) => return Err(anyhow!("no past analysis with id {id}")),
                Err(err) => log_error!("Failed to persist history after deleting {}: {:#}", id, err),
            }
            self.listener.history_changed(history.all());
        }

        if self.state.lock().await.forget_result(id) {
            log_info!("Deleted the displayed analysis {}; back to idle", id);
        }
        Ok(self.emit_state_changed().await)
    }

    async fn run_analysis(
        &self,
        video: &VideoSelection,
        settings: &AnalysisSettings,
        language: Language,
    ) -> Result<AnalysisResult, Failure> {
        let bytes = tokio::fs::read(video.path())
            .await
            .map_err(|err| Failure::FileRead(err.into()))?;
        if bytes.is_empty() {
            return Err(Failure::FileRead(anyhow!("video file is empty")));
        }

        let params = AnalysisParams {
            runner_description: settings.runner_description.clone(),
            target_pace: settings.target_pace.clone(),
            level: settings.level,
            language,
        };
        self.client
            .analyze(bytes, &params)
            .await
            .map_err(Failure::Model)
    }

    async fn record(&self, result: AnalysisResult) {
        let mut history = self.history.lock().await;
        if let Err(err) = history.append(result) {
            log_warn!("History updated in memory but not persisted: {:#}", err);
        }
        self.listener.history_changed(history.all());
    }

    async fn emit_state_changed(&self) -> AnalysisSnapshot {
        let snapshot = self.get_snapshot().await;
        self.listener.state_changed(&snapshot);
        snapshot
    }

    fn snapshot_of(&self, state: AnalysisState) -> AnalysisSnapshot {
        let language = self.settings.preferences().language;
        let shown = match state.status {
            AnalysisStatus::Completed => state.result.as_ref(),
            _ => None,
        };
        let chart = shown.map(|result| chart_points(&result.metrics, language));
        let foot_strike_label = shown.map(|result| result.foot_strike.label(language));
        AnalysisSnapshot {
            state,
            chart,
            foot_strike_label,
            busy: self.in_flight.load(Ordering::Acquire),
        }
    }
}
