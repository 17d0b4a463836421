//! Completeness scoring for the narrative flow.
//!
//! The confidence figure is a heuristic measure of how much the patient told
//! us, not a statistical certainty of any diagnosis. More detail in the
//! input means the rule cascade had more to work with, so the score rises
//! with each answered field and is clamped to a ceiling that keeps the
//! pre-assessment honest about what it is.

use crate::input::NarrativeInput;

/// Score assigned before any completeness bonuses.
pub const BASE_CONFIDENCE: u8 = 70;

/// Ceiling applied after all bonuses.
pub const MAX_CONFIDENCE: u8 = 95;

/// Confidence reported on the fixed emergency assessment.
pub const EMERGENCY_CONFIDENCE: u8 = 95;

/// Narrative length above which the detail bonus applies.
const DETAILED_NARRATIVE_CHARS: usize = 50;

/// Scores the completeness of a narrative input.
///
/// Base 70, +10 for a narrative longer than 50 characters, +5 each for a
/// supplied duration and severity, +10 for any follow-up answers, clamped to
/// [`MAX_CONFIDENCE`]. The result is always within 70 to 95 inclusive.
pub fn completeness_score(input: &NarrativeInput) -> u8 {
    let mut score = BASE_CONFIDENCE;

    if input.symptoms.as_str().chars().count() > DETAILED_NARRATIVE_CHARS {
        score += 10;
    }
    if input.duration.is_some() {
        score += 5;
    }
    if input.severity.is_some() {
        score += 5;
    }
    if !input.answers.is_empty() {
        score += 10;
    }

    score.min(MAX_CONFIDENCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{AnswerValue, DurationBucket, SeverityLevel};

    #[test]
    fn bare_narrative_scores_base() {
        let input = NarrativeInput::new("sore throat").unwrap();
        assert_eq!(completeness_score(&input), BASE_CONFIDENCE);
    }

    #[test]
    fn duration_and_severity_each_add_five() {
        let mut input = NarrativeInput::new("I have a headache and mild fever").unwrap();
        input.duration = Some(DurationBucket::Today);
        input.severity = Some(SeverityLevel::Moderate);
        assert_eq!(completeness_score(&input), 80);
    }

    #[test]
    fn long_narrative_adds_ten() {
        let input = NarrativeInput::new(
            "I have had a dull ache behind my eyes and a blocked nose for two days now",
        )
        .unwrap();
        assert_eq!(completeness_score(&input), 80);
    }

    #[test]
    fn fully_detailed_input_clamps_at_ceiling() {
        let mut input = NarrativeInput::new(
            "I have had a dull ache behind my eyes and a blocked nose for two days now",
        )
        .unwrap();
        input.duration = Some(DurationBucket::SeveralDays);
        input.severity = Some(SeverityLevel::Mild);
        input
            .answers
            .insert("high_fever".into(), AnswerValue::Flag(false));
        // 70 + 10 + 5 + 5 + 10 would be 100; the ceiling keeps it at 95.
        assert_eq!(completeness_score(&input), MAX_CONFIDENCE);
    }

    #[test]
    fn score_stays_within_documented_bounds() {
        let samples = [
            NarrativeInput::new("x").unwrap(),
            NarrativeInput::new("a much longer description of everything that hurts right now, in detail").unwrap(),
        ];
        for input in samples {
            let score = completeness_score(&input);
            assert!((BASE_CONFIDENCE..=MAX_CONFIDENCE).contains(&score));
        }
    }
}
