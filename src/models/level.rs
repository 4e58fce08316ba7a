use serde::{Deserialize, Serialize};

/// Runner experience, used to tune coaching tone and vocabulary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    /// Advanced and elite runners.
    Advanced,
}

impl Default for SkillLevel {
    fn default() -> Self {
        SkillLevel::Intermediate
    }
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }
}

/// Language for model output, chart labels and user-facing messages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Language {
    Japanese,
    English,
}

impl Default for Language {
    fn default() -> Self {
        Language::Japanese
    }
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Japanese => "Japanese",
            Language::English => "English",
        }
    }

    pub fn file_read_failed(&self) -> &'static str {
        match self {
            Language::Japanese => "ファイルの読み込みに失敗しました。",
            Language::English => "Failed to read the video file.",
        }
    }

    pub fn analysis_failed(&self) -> &'static str {
        match self {
            Language::Japanese => "AI分析中にエラーが発生しました。",
            Language::English => "The AI analysis failed. Please try again.",
        }
    }
}
