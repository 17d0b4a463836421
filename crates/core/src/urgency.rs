//! Urgency tiers and the two rule cascades.
//!
//! The narrative flow and the checklist flow keep their original decision
//! boundaries as separate, named rule sets. The cascades are ordered: the
//! first matching rule wins, and both are only evaluated after the emergency
//! detector has declined to fire. The thresholds are intentionally not
//! merged into one numeric score; the narrative High rule and the checklist
//! severity threshold are not provably equivalent.

use serde::{Deserialize, Serialize};
use triage_types::SeverityScore;

use crate::input::{NarrativeInput, ANSWER_CHEST_PAIN, ANSWER_HIGH_FEVER};
use crate::lexicon::Lexicon;

/// Checklist severity at or above which the ER pathway is recommended.
pub const ER_SEVERITY_THRESHOLD: u8 = 8;

/// A clinical-urgency tier across both flows.
///
/// The narrative flow produces `Emergency`/`High`/`Elevated`/`Standard`;
/// the checklist flow produces `Emergency`/`EmergencyRoom`/`Kiosk`. The
/// tiers share one total urgency order (see [`PriorityTier::urgency_rank`])
/// so consumers can compare results from either flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    /// Life-threatening presentation; call emergency services
    Emergency,
    /// Should be seen within minutes
    High,
    /// Should be seen soon
    Elevated,
    /// Routine walk-in care
    Standard,
    /// Checklist flow: go to an emergency room
    #[serde(rename = "er")]
    EmergencyRoom,
    /// Checklist flow: a walk-in kiosk is appropriate
    Kiosk,
}

impl PriorityTier {
    /// Position in the total urgency order, 0 being most urgent.
    ///
    /// `High` and `EmergencyRoom` share a rank, as do `Standard` and
    /// `Kiosk`: they are the same urgency expressed by different flows.
    pub fn urgency_rank(self) -> u8 {
        match self {
            PriorityTier::Emergency => 0,
            PriorityTier::High | PriorityTier::EmergencyRoom => 1,
            PriorityTier::Elevated => 2,
            PriorityTier::Standard | PriorityTier::Kiosk => 3,
        }
    }

    /// The flow-local triage level, 1 being most urgent.
    ///
    /// Narrative tiers number 1-4, checklist tiers 1-3, matching what each
    /// flow displays to the patient.
    pub fn triage_level(self) -> u8 {
        match self {
            PriorityTier::Emergency => 1,
            PriorityTier::High | PriorityTier::EmergencyRoom => 2,
            PriorityTier::Elevated | PriorityTier::Kiosk => 3,
            PriorityTier::Standard => 4,
        }
    }

    /// Wire-format string for this tier.
    pub fn to_wire(self) -> &'static str {
        match self {
            PriorityTier::Emergency => "emergency",
            PriorityTier::High => "high",
            PriorityTier::Elevated => "elevated",
            PriorityTier::Standard => "standard",
            PriorityTier::EmergencyRoom => "er",
            PriorityTier::Kiosk => "kiosk",
        }
    }

    /// Parses a wire-format string.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "emergency" => Some(PriorityTier::Emergency),
            "high" => Some(PriorityTier::High),
            "elevated" => Some(PriorityTier::Elevated),
            "standard" => Some(PriorityTier::Standard),
            "er" => Some(PriorityTier::EmergencyRoom),
            "kiosk" => Some(PriorityTier::Kiosk),
            _ => None,
        }
    }
}

impl std::fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PriorityTier::Emergency => "Emergency",
            PriorityTier::High => "High",
            PriorityTier::Elevated => "Elevated",
            PriorityTier::Standard => "Standard",
            PriorityTier::EmergencyRoom => "Emergency room",
            PriorityTier::Kiosk => "Walk-in kiosk",
        };
        write!(f, "{label}")
    }
}

/// Classifies a non-emergency narrative into its tier.
///
/// Ordered cascade, first match wins:
/// 1. `High` - an urgent phrase matches, or the chest-pain answer is yes,
///    or intensity is severe with onset under a day.
/// 2. `Elevated` - intensity is severe, or the high-fever answer is yes.
/// 3. `Standard` - otherwise.
pub fn narrative_tier(normalized: &str, input: &NarrativeInput, lexicon: &Lexicon) -> PriorityTier {
    use crate::input::SeverityLevel;

    let urgent_match = lexicon
        .urgent_phrases
        .iter()
        .any(|phrase| normalized.contains(phrase.as_str()));
    let severe = input.severity == Some(SeverityLevel::Severe);
    let recent_onset = input.duration.is_some_and(|d| d.is_under_a_day());

    if urgent_match || input.answered_yes(ANSWER_CHEST_PAIN) || (severe && recent_onset) {
        return PriorityTier::High;
    }

    if severe || input.answered_yes(ANSWER_HIGH_FEVER) {
        return PriorityTier::Elevated;
    }

    PriorityTier::Standard
}

/// Classifies a non-emergency checklist selection into its pathway.
///
/// `EmergencyRoom` when any selected id resolves to a non-critical catalog
/// entry, or the severity score is at least [`ER_SEVERITY_THRESHOLD`];
/// `Kiosk` otherwise. Critical entries never reach this function: the
/// emergency detector has already absorbed them.
pub fn structured_pathway(
    flag_ids: &[String],
    severity_score: SeverityScore,
    lexicon: &Lexicon,
) -> PriorityTier {
    let urgent_flag = flag_ids
        .iter()
        .any(|id| lexicon.red_flag(id).is_some_and(|f| !f.critical));

    if urgent_flag || severity_score.get() >= ER_SEVERITY_THRESHOLD {
        PriorityTier::EmergencyRoom
    } else {
        PriorityTier::Kiosk
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{AnswerValue, DurationBucket, SeverityLevel};

    fn narrative(symptoms: &str) -> NarrativeInput {
        NarrativeInput::new(symptoms).unwrap()
    }

    fn score(n: u8) -> SeverityScore {
        SeverityScore::new(n).unwrap()
    }

    #[test]
    fn urgent_phrase_lifts_to_high() {
        let lexicon = Lexicon::builtin();
        let input = narrative("I think I have a broken bone in my wrist");
        assert_eq!(
            narrative_tier(&input.normalized(), &input, &lexicon),
            PriorityTier::High
        );
    }

    #[test]
    fn chest_pain_answer_lifts_to_high() {
        let lexicon = Lexicon::builtin();
        let mut input = narrative("feeling generally unwell");
        input
            .answers
            .insert(ANSWER_CHEST_PAIN.into(), AnswerValue::Flag(true));
        assert_eq!(
            narrative_tier(&input.normalized(), &input, &lexicon),
            PriorityTier::High
        );
    }

    #[test]
    fn severe_and_recent_onset_lifts_to_high() {
        let lexicon = Lexicon::builtin();
        let mut input = narrative("really bad stomach cramps");
        input.severity = Some(SeverityLevel::Severe);
        input.duration = Some(DurationBucket::JustStarted);
        assert_eq!(
            narrative_tier(&input.normalized(), &input, &lexicon),
            PriorityTier::High
        );
    }

    #[test]
    fn severe_with_older_onset_is_elevated() {
        let lexicon = Lexicon::builtin();
        let mut input = narrative("really bad stomach cramps");
        input.severity = Some(SeverityLevel::Severe);
        input.duration = Some(DurationBucket::SeveralDays);
        assert_eq!(
            narrative_tier(&input.normalized(), &input, &lexicon),
            PriorityTier::Elevated
        );
    }

    #[test]
    fn high_fever_answer_is_elevated() {
        let lexicon = Lexicon::builtin();
        let mut input = narrative("feeling hot and tired");
        input
            .answers
            .insert(ANSWER_HIGH_FEVER.into(), AnswerValue::Flag(true));
        assert_eq!(
            narrative_tier(&input.normalized(), &input, &lexicon),
            PriorityTier::Elevated
        );
    }

    #[test]
    fn plain_narrative_is_standard() {
        let lexicon = Lexicon::builtin();
        let input = narrative("a bit of a runny nose");
        assert_eq!(
            narrative_tier(&input.normalized(), &input, &lexicon),
            PriorityTier::Standard
        );
    }

    #[test]
    fn severity_threshold_splits_er_and_kiosk() {
        let lexicon = Lexicon::builtin();
        let none: Vec<String> = Vec::new();
        assert_eq!(
            structured_pathway(&none, score(9), &lexicon),
            PriorityTier::EmergencyRoom
        );
        assert_eq!(
            structured_pathway(&none, score(8), &lexicon),
            PriorityTier::EmergencyRoom
        );
        assert_eq!(
            structured_pathway(&none, score(7), &lexicon),
            PriorityTier::Kiosk
        );
        assert_eq!(
            structured_pathway(&none, score(5), &lexicon),
            PriorityTier::Kiosk
        );
    }

    #[test]
    fn non_critical_flag_routes_to_er_at_any_score() {
        let lexicon = Lexicon::builtin();
        let flags = vec!["high_fever".to_string()];
        assert_eq!(
            structured_pathway(&flags, score(1), &lexicon),
            PriorityTier::EmergencyRoom
        );
    }

    #[test]
    fn unknown_flag_alone_routes_to_kiosk() {
        let lexicon = Lexicon::builtin();
        let flags = vec!["not_in_catalog".to_string()];
        assert_eq!(
            structured_pathway(&flags, score(2), &lexicon),
            PriorityTier::Kiosk
        );
    }

    #[test]
    fn raising_severity_never_lowers_urgency() {
        let lexicon = Lexicon::builtin();
        let none: Vec<String> = Vec::new();
        let mut previous_rank = structured_pathway(&none, score(1), &lexicon).urgency_rank();
        for n in 2..=10 {
            let rank = structured_pathway(&none, score(n), &lexicon).urgency_rank();
            assert!(rank <= previous_rank, "severity {n} lowered urgency");
            previous_rank = rank;
        }
    }

    #[test]
    fn urgency_rank_is_total_across_flows() {
        assert!(PriorityTier::Emergency.urgency_rank() < PriorityTier::High.urgency_rank());
        assert_eq!(
            PriorityTier::High.urgency_rank(),
            PriorityTier::EmergencyRoom.urgency_rank()
        );
        assert!(PriorityTier::High.urgency_rank() < PriorityTier::Elevated.urgency_rank());
        assert!(PriorityTier::Elevated.urgency_rank() < PriorityTier::Standard.urgency_rank());
        assert_eq!(
            PriorityTier::Standard.urgency_rank(),
            PriorityTier::Kiosk.urgency_rank()
        );
    }

    #[test]
    fn wire_strings_round_trip() {
        for tier in [
            PriorityTier::Emergency,
            PriorityTier::High,
            PriorityTier::Elevated,
            PriorityTier::Standard,
            PriorityTier::EmergencyRoom,
            PriorityTier::Kiosk,
        ] {
            assert_eq!(PriorityTier::from_wire(tier.to_wire()), Some(tier));
        }
        assert_eq!(PriorityTier::EmergencyRoom.to_wire(), "er");
    }
}
