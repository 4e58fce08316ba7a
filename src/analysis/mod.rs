#[cfg(feature = "desktop")]
pub mod commands;
pub mod controller;
pub mod state;

pub use controller::{AnalysisController, AnalysisListener, AnalysisSnapshot, NoopListener};
pub use state::{AnalysisSettings, AnalysisState, AnalysisStatus, VideoSelection};
