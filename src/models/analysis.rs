//! Analysis result data models.
//!
//! The serialized shape (camelCase) is both the persisted history format and
//! the payload handed to the frontend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Language, SkillLevel};

/// Step-level biomechanics reported by the model. Values are not range-checked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepMetrics {
    /// Steps per minute.
    pub cadence: f64,
    /// Meters.
    pub stride_length: f64,
    /// Milliseconds.
    pub ground_contact_time: f64,
    /// Centimeters.
    pub vertical_oscillation: f64,
    /// Milliseconds.
    pub flight_time: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormObservation {
    pub joint: String,
    pub finding: String,
    /// 0-100 by convention; the model may send decimals.
    pub score: f64,
    pub advice: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FootStrike {
    Heel,
    Midfoot,
    Forefoot,
}

impl FootStrike {
    pub const ALL: [FootStrike; 3] = [FootStrike::Heel, FootStrike::Midfoot, FootStrike::Forefoot];

    pub fn as_str(&self) -> &'static str {
        match self {
            FootStrike::Heel => "Heel",
            FootStrike::Midfoot => "Midfoot",
            FootStrike::Forefoot => "Forefoot",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|strike| strike.as_str() == value)
    }

    /// Display text; the serialized form stays the English variant name.
    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (FootStrike::Heel, Language::Japanese) => "ヒール",
            (FootStrike::Midfoot, Language::Japanese) => "ミッドフット",
            (FootStrike::Forefoot, Language::Japanese) => "フォアフット",
            (FootStrike::Heel, Language::English) => "Heel strike",
            (FootStrike::Midfoot, Language::English) => "Midfoot strike",
            (FootStrike::Forefoot, Language::English) => "Forefoot strike",
        }
    }
}

/// The part of a result produced by the model, before local decoration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelAssessment {
    pub overall_score: f64,
    pub metrics: StepMetrics,
    pub observations: Vec<FormObservation>,
    pub foot_strike: FootStrike,
    pub summary: String,
    pub training_steps: Vec<String>,
}

/// One completed analysis. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub overall_score: f64,
    pub metrics: StepMetrics,
    pub observations: Vec<FormObservation>,
    pub foot_strike: FootStrike,
    pub summary: String,
    pub training_steps: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target_pace: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub runner_description: String,
    /// Absent on records written before skill levels existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<SkillLevel>,
}

impl AnalysisResult {
    pub fn from_assessment(
        assessment: ModelAssessment,
        id: String,
        timestamp: DateTime<Utc>,
        target_pace: String,
        runner_description: String,
        level: Option<SkillLevel>,
    ) -> Self {
        let ModelAssessment {
            overall_score,
            metrics,
            observations,
            foot_strike,
            summary,
            training_steps,
        } = assessment;

        Self {
            id,
            timestamp,
            overall_score,
            metrics,
            observations,
            foot_strike,
            summary,
            training_steps,
            target_pace,
            runner_description,
            level,
        }
    }
}
