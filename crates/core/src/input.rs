//! Input variants accepted by the classifier.
//!
//! Two UI flows feed the engine: a free-text narrative form and a structured
//! checklist. Both are modelled here as one tagged union so the engine has a
//! single entry point, while each flow keeps its own fields and its own rule
//! cascade. Raw form state (strings and integers) is translated into these
//! types at the boundary; once a value exists it satisfies its contract.
//!
//! Enum wire strings follow the same convention as the rest of the wire
//! surface: lowercase snake case, with `to_wire`/`from_wire` helpers for
//! callers that parse user-supplied strings (CLI flags, query parameters).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use triage_types::{NonEmptyText, SeverityScore};

use crate::error::TriageResult;

/// Answer key consulted by the High rule of the narrative cascade.
pub const ANSWER_CHEST_PAIN: &str = "chest_pain";
/// Answer key consulted by the Elevated rule of the narrative cascade.
pub const ANSWER_HIGH_FEVER: &str = "high_fever";

/// How long the symptoms have been present, in coarse buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationBucket {
    /// Within the last few hours
    JustStarted,
    /// Started earlier today
    Today,
    /// Two to four days
    SeveralDays,
    /// Around five to seven days
    AboutAWeek,
    /// A week or more
    WeekOrMore,
}

impl DurationBucket {
    /// Whether this bucket denotes an onset of less than a day.
    ///
    /// Recent onset combined with severe self-rated intensity lifts a
    /// narrative to the High tier.
    pub fn is_under_a_day(self) -> bool {
        matches!(self, DurationBucket::JustStarted | DurationBucket::Today)
    }

    /// Wire-format string for this bucket.
    pub fn to_wire(self) -> &'static str {
        match self {
            DurationBucket::JustStarted => "just_started",
            DurationBucket::Today => "today",
            DurationBucket::SeveralDays => "several_days",
            DurationBucket::AboutAWeek => "about_a_week",
            DurationBucket::WeekOrMore => "week_or_more",
        }
    }

    /// Parses a wire-format string.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "just_started" => Some(DurationBucket::JustStarted),
            "today" => Some(DurationBucket::Today),
            "several_days" => Some(DurationBucket::SeveralDays),
            "about_a_week" => Some(DurationBucket::AboutAWeek),
            "week_or_more" => Some(DurationBucket::WeekOrMore),
            _ => None,
        }
    }
}

/// Self-rated symptom intensity on the narrative form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Mild,
    Moderate,
    Severe,
}

impl SeverityLevel {
    /// Maps a 1-10 checklist score onto the categorical scale.
    ///
    /// Used by adapters whose form captures a numeric slider instead of the
    /// three-way choice: 1-3 is mild, 4-7 moderate, 8-10 severe.
    pub fn from_score(score: SeverityScore) -> Self {
        match score.get() {
            1..=3 => SeverityLevel::Mild,
            4..=7 => SeverityLevel::Moderate,
            _ => SeverityLevel::Severe,
        }
    }

    /// Wire-format string for this level.
    pub fn to_wire(self) -> &'static str {
        match self {
            SeverityLevel::Mild => "mild",
            SeverityLevel::Moderate => "moderate",
            SeverityLevel::Severe => "severe",
        }
    }

    /// Parses a wire-format string.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "mild" => Some(SeverityLevel::Mild),
            "moderate" => Some(SeverityLevel::Moderate),
            "severe" => Some(SeverityLevel::Severe),
            _ => None,
        }
    }
}

/// Coarse age band captured by the checklist flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    Child,
    Adult,
    Senior,
}

impl AgeGroup {
    pub fn to_wire(self) -> &'static str {
        match self {
            AgeGroup::Child => "child",
            AgeGroup::Adult => "adult",
            AgeGroup::Senior => "senior",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "child" => Some(AgeGroup::Child),
            "adult" => Some(AgeGroup::Adult),
            "senior" => Some(AgeGroup::Senior),
            _ => None,
        }
    }
}

/// Whether the patient is answering for themselves or someone else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForWhom {
    #[serde(rename = "self")]
    Myself,
    #[serde(rename = "other")]
    SomeoneElse,
}

impl ForWhom {
    pub fn to_wire(self) -> &'static str {
        match self {
            ForWhom::Myself => "self",
            ForWhom::SomeoneElse => "other",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "self" => Some(ForWhom::Myself),
            "other" => Some(ForWhom::SomeoneElse),
            _ => None,
        }
    }
}

/// A named answer on the narrative form's follow-up questions.
///
/// Answers are either yes/no flags or small categorical choices. The engine
/// only ever asks "is this affirmative"; it never interprets choice text
/// beyond a yes/no reading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Choice(String),
}

impl AnswerValue {
    /// Whether the answer reads as a yes.
    pub fn is_affirmative(&self) -> bool {
        match self {
            AnswerValue::Flag(value) => *value,
            AnswerValue::Choice(text) => {
                matches!(text.trim().to_lowercase().as_str(), "yes" | "y" | "true")
            }
        }
    }
}

/// Free-text symptom description plus loosely structured companions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeInput {
    /// The patient's own words; guaranteed non-empty by type
    pub symptoms: NonEmptyText,
    /// Onset bucket, if the patient answered the duration question
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<DurationBucket>,
    /// Self-rated intensity, if answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<SeverityLevel>,
    /// Named follow-up answers, for example `chest_pain` or `high_fever`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub answers: BTreeMap<String, AnswerValue>,
}

impl NarrativeInput {
    /// Creates a narrative input from raw symptom text.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidInput` if the text is empty or
    /// whitespace-only. The remaining fields start unset; they are optional
    /// on the form and their absence only degrades the confidence score.
    pub fn new(symptoms: impl AsRef<str>) -> TriageResult<Self> {
        Ok(Self {
            symptoms: NonEmptyText::new(symptoms)?,
            duration: None,
            severity: None,
            answers: BTreeMap::new(),
        })
    }

    /// Canonical lowercase form of the narrative used for all matching.
    pub fn normalized(&self) -> String {
        self.symptoms.as_str().to_lowercase()
    }

    /// Whether the named answer exists and reads as a yes.
    pub fn answered_yes(&self, key: &str) -> bool {
        self.answers.get(key).is_some_and(AnswerValue::is_affirmative)
    }
}

/// Checklist-style input of discrete selections and a numeric score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredInput {
    /// Selected red-flag catalog ids
    #[serde(default)]
    pub selected_red_flags: Vec<String>,
    /// Selected non-flag symptom tags (opaque to the cascade)
    #[serde(default)]
    pub selected_symptom_tags: Vec<String>,
    /// Self-rated severity; guaranteed 1-10 by type
    pub severity_score: SeverityScore,
    /// Onset bucket, if captured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<DurationBucket>,
    /// Age band, if captured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_group: Option<AgeGroup>,
    /// Whether the checklist was filled in for the patient themselves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_whom: Option<ForWhom>,
}

impl StructuredInput {
    /// Creates a structured input with the given severity score and nothing
    /// selected.
    pub fn new(severity_score: SeverityScore) -> Self {
        Self {
            selected_red_flags: Vec::new(),
            selected_symptom_tags: Vec::new(),
            severity_score,
            duration: None,
            age_group: None,
            for_whom: None,
        }
    }

    /// Canonical form of the selected red-flag ids.
    ///
    /// Trimmed, case-folded and deduplicated with order preserved, so the
    /// detector compares like with like regardless of how the form encoded
    /// the selection.
    pub fn normalized_flags(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.selected_red_flags.len());
        for raw in &self.selected_red_flags {
            let id = raw.trim().to_lowercase();
            if id.is_empty() || out.iter().any(|seen| *seen == id) {
                continue;
            }
            out.push(id);
        }
        out
    }
}

/// Opaque medical context the engine passes through untouched.
///
/// History and medications matter to the clinician reading the assessment,
/// not to the classifier. Nothing here is ever parsed or matched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<String>,
}

/// The union of the two input shapes the engine accepts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SymptomInput {
    /// Free narrative text plus optional duration/severity/answers
    Narrative(NarrativeInput),
    /// Red-flag checklist plus numeric severity
    Structured(StructuredInput),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrative_new_rejects_blank_symptoms() {
        assert!(NarrativeInput::new("   ").is_err());
    }

    #[test]
    fn narrative_normalizes_to_lowercase() {
        let input = NarrativeInput::new("Severe Headache And FEVER").unwrap();
        assert_eq!(input.normalized(), "severe headache and fever");
    }

    #[test]
    fn answered_yes_reads_flags_and_choices() {
        let mut input = NarrativeInput::new("cough").unwrap();
        input
            .answers
            .insert(ANSWER_CHEST_PAIN.into(), AnswerValue::Flag(true));
        input
            .answers
            .insert(ANSWER_HIGH_FEVER.into(), AnswerValue::Choice("Yes".into()));
        input
            .answers
            .insert("rash".into(), AnswerValue::Choice("no".into()));

        assert!(input.answered_yes(ANSWER_CHEST_PAIN));
        assert!(input.answered_yes(ANSWER_HIGH_FEVER));
        assert!(!input.answered_yes("rash"));
        assert!(!input.answered_yes("never_asked"));
    }

    #[test]
    fn structured_flags_are_folded_and_deduplicated() {
        let mut input = StructuredInput::new(SeverityScore::new(5).unwrap());
        input.selected_red_flags = vec![
            " Chest_Pain ".into(),
            "chest_pain".into(),
            "".into(),
            "high_fever".into(),
        ];
        assert_eq!(input.normalized_flags(), vec!["chest_pain", "high_fever"]);
    }

    #[test]
    fn severity_level_from_score_uses_band_edges() {
        let level = |n: u8| SeverityLevel::from_score(SeverityScore::new(n).unwrap());
        assert_eq!(level(1), SeverityLevel::Mild);
        assert_eq!(level(3), SeverityLevel::Mild);
        assert_eq!(level(4), SeverityLevel::Moderate);
        assert_eq!(level(7), SeverityLevel::Moderate);
        assert_eq!(level(8), SeverityLevel::Severe);
        assert_eq!(level(10), SeverityLevel::Severe);
    }

    #[test]
    fn duration_under_a_day_buckets() {
        assert!(DurationBucket::JustStarted.is_under_a_day());
        assert!(DurationBucket::Today.is_under_a_day());
        assert!(!DurationBucket::SeveralDays.is_under_a_day());
        assert!(!DurationBucket::WeekOrMore.is_under_a_day());
    }

    #[test]
    fn wire_strings_round_trip() {
        for bucket in [
            DurationBucket::JustStarted,
            DurationBucket::Today,
            DurationBucket::SeveralDays,
            DurationBucket::AboutAWeek,
            DurationBucket::WeekOrMore,
        ] {
            assert_eq!(DurationBucket::from_wire(bucket.to_wire()), Some(bucket));
        }
        assert_eq!(ForWhom::from_wire("self"), Some(ForWhom::Myself));
        assert_eq!(ForWhom::from_wire("other"), Some(ForWhom::SomeoneElse));
        assert!(AgeGroup::from_wire("elderly").is_none());
    }

    #[test]
    fn symptom_input_json_is_kind_tagged() {
        let input = SymptomInput::Narrative(NarrativeInput::new("sore throat").unwrap());
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["kind"], "narrative");
        assert_eq!(json["symptoms"], "sore throat");

        let structured: SymptomInput = serde_json::from_value(serde_json::json!({
            "kind": "structured",
            "severity_score": 6,
            "selected_red_flags": ["high_fever"],
        }))
        .unwrap();
        match structured {
            SymptomInput::Structured(s) => {
                assert_eq!(s.severity_score.get(), 6);
                assert_eq!(s.selected_red_flags, vec!["high_fever"]);
            }
            other => panic!("expected structured input, got {other:?}"),
        }
    }

    #[test]
    fn structured_json_rejects_out_of_range_score() {
        let result: Result<SymptomInput, _> = serde_json::from_value(serde_json::json!({
            "kind": "structured",
            "severity_score": 0,
        }));
        assert!(result.is_err());
    }
}
