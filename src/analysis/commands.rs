use log::warn;
use tauri::{AppHandle, Manager, State};

use crate::{
    analysis::{AnalysisController, AnalysisSettings, AnalysisSnapshot},
    chart::{chart_points, ChartPoint},
    models::{AnalysisResult, StepMetrics},
    AppState,
};

fn controller_from_state(state: &State<'_, AppState>) -> AnalysisController {
    state.analysis.clone()
}

#[tauri::command]
pub async fn get_analysis_state(state: State<'_, AppState>) -> Result<AnalysisSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.get_snapshot().await)
}

/// The frontend previews the pick through `convertFileSrc`, so the file is
/// added to the asset protocol scope even when it lies outside the default
/// video folders.
#[tauri::command]
pub async fn select_video(
    app: AppHandle,
    state: State<'_, AppState>,
    path: String,
) -> Result<AnalysisSnapshot, String> {
    let controller = controller_from_state(&state);
    let snapshot = controller
        .select_video(path.clone())
        .await
        .map_err(|e| e.to_string())?;

    if let Err(err) = app.asset_protocol_scope().allow_file(&path) {
        warn!("Preview unavailable for {path}: {err}");
    }
    Ok(snapshot)
}

#[tauri::command]
pub async fn update_analysis_settings(
    state: State<'_, AppState>,
    settings: AnalysisSettings,
) -> Result<AnalysisSnapshot, String> {
    let controller = controller_from_state(&state);
    controller
        .update_settings(settings)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn start_analysis(state: State<'_, AppState>) -> Result<AnalysisSnapshot, String> {
    let controller = controller_from_state(&state);
    controller.start_analysis().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn reset_analysis(state: State<'_, AppState>) -> Result<AnalysisSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.reset().await)
}

#[tauri::command]
pub async fn list_history(state: State<'_, AppState>) -> Result<Vec<AnalysisResult>, String> {
    let controller = controller_from_state(&state);
    Ok(controller.list_history().await)
}

#[tauri::command]
pub async fn select_history_item(
    state: State<'_, AppState>,
    id: String,
) -> Result<AnalysisSnapshot, String> {
    let controller = controller_from_state(&state);
    controller
        .select_history_item(&id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn delete_history_item(
    state: State<'_, AppState>,
    id: String,
) -> Result<AnalysisSnapshot, String> {
    let controller = controller_from_state(&state);
    controller
        .delete_history_item(&id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn chart_for_metrics(state: State<'_, AppState>, metrics: StepMetrics) -> Vec<ChartPoint> {
    chart_points(&metrics, state.settings.preferences().language)
}
