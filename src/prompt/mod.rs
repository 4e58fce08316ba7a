//! Builds the instruction text sent alongside the video.
//!
//! The output is a pure function of [`PromptInput`]; nothing here looks at the
//! video itself.

pub mod reference;

use crate::models::{Language, SkillLevel};

use reference::{tone_for, REFERENCE_RANGES};

const PERSONA: &str = "You are an expert running-form analyst and coach with a background in sports biomechanics.";

const FIELD_MAPPING: &str = "Fill the response schema as follows: overallScore is a 0-100 rating of the whole form; \
metrics holds cadence (spm), strideLength (m), groundContactTime (ms), verticalOscillation (cm) and flightTime (ms) \
estimated from the video; observations lists one entry per joint or body part (joint, finding, a 0-100 score, advice); \
footStrike is exactly one of Heel, Midfoot or Forefoot; summary is a short overall assessment; \
trainingSteps is an ordered list of concrete drills or sessions.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptInput<'a> {
    pub runner_description: &'a str,
    pub target_pace: &'a str,
    pub level: SkillLevel,
    pub language: Language,
}

pub fn build_prompt(input: &PromptInput<'_>) -> String {
    let pace = input.target_pace.trim();
    let description = input.runner_description.trim();
    let tone = tone_for(input.level);

    let mut prompt = String::with_capacity(2048);
    prompt.push_str(PERSONA);
    prompt.push_str("\n\nInstructions:\n");

    let subject = if description.is_empty() {
        "Analyse the most prominent runner in the video. If several people are running, say so.".to_string()
    } else {
        format!(
            "The video may contain several people. Focus on the runner matching this description: \"{description}\"."
        )
    };
    let pace_clause = if pace.is_empty() {
        "The pace is unknown. Estimate the running speed from the video and judge stride length against it.".to_string()
    } else {
        format!(
            "The target pace is {pace} min/km. Judge whether the stride length is reasonable given this pace and the cadence."
        )
    };

    let instructions = [
        subject,
        pace_clause,
        "Quantify cadence, stride length, ground contact time, vertical oscillation and flight time.".to_string(),
        "Classify the foot strike pattern (heel, midfoot or forefoot).".to_string(),
        format!("Give specific corrections and a training plan for {}.", tone.audience),
    ];
    for (index, line) in instructions.iter().enumerate() {
        prompt.push_str(&format!("{}. {line}\n", index + 1));
    }

    prompt.push_str("\nReference ranges (metric | unit | ideal | poor):\n");
    let ranges: Vec<String> = REFERENCE_RANGES
        .iter()
        .map(|range| format!("- {} | {} | {} | {}", range.metric, range.unit, range.ideal, range.poor))
        .collect();
    prompt.push_str(&ranges.join("\n"));

    prompt.push_str(&format!("\n\nCoaching tone ({}):\n", input.level.as_str()));
    let guidance: Vec<String> = tone.guidance.iter().map(|rule| format!("- {rule}")).collect();
    prompt.push_str(&guidance.join("\n"));

    prompt.push_str("\n\n");
    prompt.push_str(FIELD_MAPPING);
    prompt.push_str(&format!(
        "\nWrite every free-text field in {}. Respond with JSON only and follow the provided schema strictly.",
        input.language.display_name()
    ));

    prompt
}
