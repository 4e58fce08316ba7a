//! Grounding data embedded in every prompt.

use crate::models::SkillLevel;

pub struct ReferenceRange {
    pub metric: &'static str,
    pub unit: &'static str,
    pub ideal: &'static str,
    pub poor: &'static str,
}

pub const REFERENCE_RANGES: &[ReferenceRange] = &[
    ReferenceRange {
        metric: "cadence",
        unit: "spm",
        ideal: "170-190 (elite 180+)",
        poor: "below 160",
    },
    ReferenceRange {
        metric: "strideLength",
        unit: "m",
        ideal: "pace-dependent, roughly speed (m/min) / cadence, landing under the hips",
        poor: "overstriding with the foot landing well ahead of the center of mass",
    },
    ReferenceRange {
        metric: "groundContactTime",
        unit: "ms",
        ideal: "200-250 (elite below 200)",
        poor: "above 300",
    },
    ReferenceRange {
        metric: "verticalOscillation",
        unit: "cm",
        ideal: "6-9",
        poor: "above 11",
    },
    ReferenceRange {
        metric: "flightTime",
        unit: "ms",
        ideal: "100-150 at moderate pace, longer when fast",
        poor: "below 60 (shuffling) or above 200 (bounding)",
    },
];

pub struct ToneRule {
    pub level: SkillLevel,
    pub audience: &'static str,
    pub guidance: &'static [&'static str],
}

pub const TONE_RULES: &[ToneRule] = &[
    ToneRule {
        level: SkillLevel::Beginner,
        audience: "a beginner runner",
        guidance: &[
            "Use plain, encouraging language and avoid jargon; explain any technical term you must use.",
            "Focus on at most two or three priorities that reduce injury risk.",
            "Suggest simple drills and easy-effort runs rather than intense workouts.",
        ],
    },
    ToneRule {
        level: SkillLevel::Intermediate,
        audience: "an intermediate runner",
        guidance: &[
            "Use common running terminology with brief explanations.",
            "Balance efficiency gains with injury prevention.",
            "Suggest structured drills and one or two quality sessions per week.",
        ],
    },
    ToneRule {
        level: SkillLevel::Advanced,
        audience: "an advanced or elite runner",
        guidance: &[
            "Be concise and technical; reference the numeric ranges directly.",
            "Prioritise marginal gains in economy and pace-specific mechanics.",
            "Suggest targeted strength, plyometric and pace-specific sessions.",
        ],
    },
];

pub fn tone_for(level: SkillLevel) -> &'static ToneRule {
    TONE_RULES
        .iter()
        .find(|rule| rule.level == level)
        .unwrap_or(&TONE_RULES[1])
}
