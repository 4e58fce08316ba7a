pub mod analysis;
pub mod level;

pub use analysis::{AnalysisResult, FootStrike, FormObservation, ModelAssessment, StepMetrics};
pub use level::{Language, SkillLevel};
