pub mod analysis;
pub mod chart;
pub mod config;
pub mod gemini;
pub mod history;
pub mod models;
pub mod prompt;
pub mod settings;
pub mod utils;

#[cfg(feature = "desktop")]
mod shell;

#[cfg(feature = "desktop")]
pub(crate) use shell::AppState;
#[cfg(feature = "desktop")]
pub use shell::run;
