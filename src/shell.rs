//! Tauri wiring: app state, event forwarding and the entry point.

use std::sync::Arc;

use log::{info, warn};
use tauri::{AppHandle, Emitter, Manager, State};

use crate::{
    analysis::{
        commands::{
            chart_for_metrics, delete_history_item, get_analysis_state, list_history,
            reset_analysis, select_history_item, select_video, start_analysis,
            update_analysis_settings,
        },
        AnalysisController, AnalysisListener, AnalysisSnapshot,
    },
    config::AppConfig,
    gemini::{AnalysisClient, GeminiTransport},
    history::{FileStore, History, ResultStore},
    models::AnalysisResult,
    settings::{Preferences, SettingsStore},
    utils::logging,
};

pub(crate) struct AppState {
    pub(crate) analysis: AnalysisController,
    pub(crate) settings: Arc<SettingsStore>,
}

struct WebviewListener {
    app_handle: AppHandle,
}

impl AnalysisListener for WebviewListener {
    fn state_changed(&self, snapshot: &AnalysisSnapshot) {
        if let Err(err) = self.app_handle.emit("analysis-state-changed", snapshot) {
            warn!("Failed to emit analysis-state-changed: {err}");
        }
    }

    fn history_changed(&self, history: &[AnalysisResult]) {
        if let Err(err) = self.app_handle.emit("history-changed", history) {
            warn!("Failed to emit history-changed: {err}");
        }
    }
}

#[tauri::command]
fn get_preferences(state: State<AppState>) -> Result<Preferences, String> {
    Ok(state.settings.preferences())
}

#[tauri::command]
fn set_preferences(
    preferences: Preferences,
    state: State<AppState>,
    app_handle: AppHandle,
) -> Result<(), String> {
    state
        .settings
        .update_preferences(preferences.clone())
        .map_err(|e| e.to_string())?;

    app_handle
        .emit("preferences-updated", &preferences)
        .map_err(|e| e.to_string())?;

    Ok(())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let config = AppConfig::from_env();
    logging::init(config.debug);

    info!("RunForm starting up (model {})...", config.model);
    if config.api_key.is_none() {
        warn!("No API key configured; analyses will fail until RUNFORM_API_KEY is set");
    }

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(move |app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let settings = Arc::new(SettingsStore::new(app_data_dir.join("settings.json"))?);
                let storage = Arc::new(FileStore::new(app_data_dir.clone())?);
                let history = History::load(ResultStore::new(storage));

                let client = AnalysisClient::new(Arc::new(GeminiTransport::new(&config)));
                let listener = Arc::new(WebviewListener {
                    app_handle: app.handle().clone(),
                });
                let analysis =
                    AnalysisController::new(client, history, settings.clone(), listener);

                app.manage(AppState { analysis, settings });
                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            get_analysis_state,
            select_video,
            update_analysis_settings,
            start_analysis,
            reset_analysis,
            list_history,
            select_history_item,
            delete_history_item,
            chart_for_metrics,
            get_preferences,
            set_preferences,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
