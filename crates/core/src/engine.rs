//! The classification engine.
//!
//! One synchronous, side-effect-free operation: [`TriageEngine::classify`].
//! The emergency detector runs first and short-circuits everything else; the
//! remaining components (tier cascade, condition suggester, vitals resolver,
//! confidence scorer) each read the same normalised input independently and
//! the assembler merges their outputs. The engine holds only the injected
//! lexicon; no state is shared across calls, so concurrent classification
//! from multiple threads needs no coordination.

use chrono::Utc;

use crate::assessment::Assessment;
use crate::conditions::suggest_conditions;
use crate::confidence::{completeness_score, EMERGENCY_CONFIDENCE};
use crate::emergency::{self, EmergencyTrigger};
use crate::error::TriageResult;
use crate::guidance::{
    guidance_for, KioskSavings, EMERGENCY_DISCLAIMER, STANDARD_DISCLAIMER,
};
use crate::input::{MedicalContext, NarrativeInput, StructuredInput, SymptomInput};
use crate::lexicon::Lexicon;
use crate::urgency::{narrative_tier, structured_pathway, PriorityTier};
use crate::vitals::vitals_panel;

/// Symptom-urgency classification engine.
///
/// Stateless apart from the injected lexicon tables. Construct one per
/// lexicon document and reuse it freely; `classify` takes `&self`.
#[derive(Clone, Debug)]
pub struct TriageEngine {
    lexicon: Lexicon,
}

impl TriageEngine {
    /// Creates an engine over the given lexicon.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::LexiconInvalid` if the tables violate a
    /// structural invariant; an engine never runs over unvalidated tables.
    pub fn new(lexicon: Lexicon) -> TriageResult<Self> {
        lexicon.validate()?;
        Ok(Self { lexicon })
    }

    /// The tables this engine classifies against.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Classifies one symptom input into an assessment.
    ///
    /// Contract violations (empty narrative, out-of-range score) cannot
    /// reach this point: they are rejected while constructing
    /// [`SymptomInput`]. Missing optional fields are not errors; they fall
    /// through to "otherwise" rules and degrade the confidence score.
    pub fn classify(
        &self,
        input: &SymptomInput,
        context: Option<MedicalContext>,
    ) -> Assessment {
        let assessment = match input {
            SymptomInput::Narrative(narrative) => self.classify_narrative(narrative, context),
            SymptomInput::Structured(structured) => self.classify_structured(structured, context),
        };
        tracing::info!(
            tier = %assessment.tier,
            emergency = assessment.is_emergency,
            "triage assessment produced"
        );
        assessment
    }

    fn classify_narrative(
        &self,
        input: &NarrativeInput,
        context: Option<MedicalContext>,
    ) -> Assessment {
        let normalized = input.normalized();

        if let Some(trigger) = emergency::scan_narrative(&normalized, &self.lexicon) {
            return self.emergency_assessment(trigger, Some(EMERGENCY_CONFIDENCE), context);
        }

        let tier = narrative_tier(&normalized, input, &self.lexicon);
        tracing::debug!(tier = %tier, "narrative cascade resolved");
        let guidance = guidance_for(tier);

        Assessment {
            is_emergency: false,
            tier,
            triage_level: tier.triage_level(),
            title: guidance.title,
            subtitle: guidance.subtitle,
            possible_conditions: suggest_conditions(&normalized, &self.lexicon),
            recommendations: guidance.recommendations,
            wait_time_estimate: guidance.wait_time,
            kiosk_savings: None,
            vitals_needed: vitals_panel(&normalized, &self.lexicon),
            confidence: Some(completeness_score(input)),
            disclaimer: STANDARD_DISCLAIMER.to_string(),
            generated_at: Utc::now(),
            context,
        }
    }

    fn classify_structured(
        &self,
        input: &StructuredInput,
        context: Option<MedicalContext>,
    ) -> Assessment {
        let flags = input.normalized_flags();

        if let Some(trigger) = emergency::scan_structured(&flags, &self.lexicon) {
            return self.emergency_assessment(trigger, None, context);
        }

        let tier = structured_pathway(&flags, input.severity_score, &self.lexicon);
        tracing::debug!(tier = %tier, score = input.severity_score.get(), "checklist cascade resolved");
        let guidance = guidance_for(tier);
        let kiosk_savings =
            (tier == PriorityTier::Kiosk).then(KioskSavings::from_average_waits);

        Assessment {
            is_emergency: false,
            tier,
            triage_level: tier.triage_level(),
            title: guidance.title,
            subtitle: guidance.subtitle,
            possible_conditions: Vec::new(),
            recommendations: guidance.recommendations,
            wait_time_estimate: guidance.wait_time,
            kiosk_savings,
            vitals_needed: Vec::new(),
            confidence: None,
            disclaimer: STANDARD_DISCLAIMER.to_string(),
            generated_at: Utc::now(),
            context,
        }
    }

    /// The fixed emergency assessment.
    ///
    /// The detector's verdict is absorbing: no other component's output is
    /// consulted, so conditions and vitals stay empty and the recommendation
    /// list is the fixed emergency script.
    fn emergency_assessment(
        &self,
        trigger: EmergencyTrigger,
        confidence: Option<u8>,
        context: Option<MedicalContext>,
    ) -> Assessment {
        tracing::debug!(trigger = %trigger, "emergency detector fired");
        let guidance = guidance_for(PriorityTier::Emergency);

        Assessment {
            is_emergency: true,
            tier: PriorityTier::Emergency,
            triage_level: PriorityTier::Emergency.triage_level(),
            title: guidance.title,
            subtitle: guidance.subtitle,
            possible_conditions: Vec::new(),
            recommendations: guidance.recommendations,
            wait_time_estimate: None,
            kiosk_savings: None,
            vitals_needed: Vec::new(),
            confidence,
            disclaimer: EMERGENCY_DISCLAIMER.to_string(),
            generated_at: Utc::now(),
            context,
        }
    }
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self {
            lexicon: Lexicon::builtin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::{BASE_CONFIDENCE, MAX_CONFIDENCE};
    use crate::input::{AnswerValue, DurationBucket, SeverityLevel, ANSWER_CHEST_PAIN};
    use triage_types::SeverityScore;

    fn engine() -> TriageEngine {
        TriageEngine::default()
    }

    fn narrative_input(symptoms: &str) -> SymptomInput {
        SymptomInput::Narrative(NarrativeInput::new(symptoms).unwrap())
    }

    fn structured_input(red_flags: &[&str], score: u8) -> SymptomInput {
        let mut input = StructuredInput::new(SeverityScore::new(score).unwrap());
        input.selected_red_flags = red_flags.iter().map(|s| s.to_string()).collect();
        SymptomInput::Structured(input)
    }

    #[test]
    fn emergency_phrase_dominates_everything() {
        let mut inner = NarrativeInput::new("I have chest pain and can't breathe").unwrap();
        inner.severity = Some(SeverityLevel::Mild);
        inner.duration = Some(DurationBucket::WeekOrMore);
        let result = engine().classify(&SymptomInput::Narrative(inner), None);

        assert!(result.is_emergency);
        assert_eq!(result.tier, PriorityTier::Emergency);
        assert_eq!(result.triage_level, 1);
        assert!(result.wait_time_estimate.is_none());
        assert_eq!(result.recommendations.len(), 4);
        assert!(result.recommendations[0].contains("emergency number"));
        assert_eq!(result.disclaimer, EMERGENCY_DISCLAIMER);
        assert_eq!(result.confidence, Some(EMERGENCY_CONFIDENCE));
    }

    #[test]
    fn critical_red_flag_dominates_at_any_score() {
        let result = engine().classify(&structured_input(&["chest_pain"], 1), None);
        assert!(result.is_emergency);
        assert_eq!(result.tier, PriorityTier::Emergency);
        assert!(result.wait_time_estimate.is_none());
        assert!(result.confidence.is_none());
    }

    #[test]
    fn severity_threshold_routes_structured_path() {
        let er = engine().classify(&structured_input(&[], 9), None);
        assert_eq!(er.tier, PriorityTier::EmergencyRoom);
        assert_eq!(er.triage_level, 2);
        assert!(er.kiosk_savings.is_none());

        let kiosk = engine().classify(&structured_input(&[], 5), None);
        assert_eq!(kiosk.tier, PriorityTier::Kiosk);
        assert_eq!(kiosk.triage_level, 3);
    }

    #[test]
    fn kiosk_result_carries_exact_savings() {
        let result = engine().classify(&structured_input(&[], 3), None);
        let savings = result.kiosk_savings.expect("kiosk savings");
        assert_eq!(savings.hours_saved, 4.25);
        assert!(result.wait_time_estimate.is_some());
    }

    #[test]
    fn narrative_confidence_stays_in_bounds() {
        let inputs = [
            narrative_input("I have a headache and mild fever"),
            narrative_input("tired"),
            narrative_input(
                "I have had a sore throat, a blocked nose and a cough for about three days",
            ),
        ];
        for input in inputs {
            let result = engine().classify(&input, None);
            let confidence = result.confidence.expect("narrative confidence");
            assert!((BASE_CONFIDENCE..=MAX_CONFIDENCE).contains(&confidence));
        }
    }

    #[test]
    fn worked_confidence_example() {
        let mut inner = NarrativeInput::new("I have a headache and mild fever").unwrap();
        inner.duration = Some(DurationBucket::Today);
        inner.severity = Some(SeverityLevel::Moderate);
        let result = engine().classify(&SymptomInput::Narrative(inner), None);
        assert_eq!(result.confidence, Some(80));
    }

    #[test]
    fn conditions_capped_and_never_empty_for_non_emergency_narrative() {
        let matched = engine().classify(
            &narrative_input("headache fever cough and sore throat"),
            None,
        );
        assert!(matched.possible_conditions.len() <= 4);
        assert!(!matched.possible_conditions.is_empty());

        let unmatched = engine().classify(&narrative_input("just feel strange"), None);
        assert_eq!(
            unmatched.possible_conditions,
            engine().lexicon().fallback_conditions
        );
    }

    #[test]
    fn structured_results_omit_narrative_only_fields() {
        let result = engine().classify(&structured_input(&["dehydration"], 4), None);
        assert_eq!(result.tier, PriorityTier::EmergencyRoom);
        assert!(result.possible_conditions.is_empty());
        assert!(result.vitals_needed.is_empty());
        assert!(result.confidence.is_none());
    }

    #[test]
    fn identical_input_is_idempotent_modulo_timestamp() {
        let input = narrative_input("stomach ache and nausea since this morning");
        let eng = engine();
        let first = eng.classify(&input, None);
        let mut second = eng.classify(&input, None);
        second.generated_at = first.generated_at;
        assert_eq!(first, second);
    }

    #[test]
    fn raising_structured_severity_never_downgrades() {
        let eng = engine();
        let mut last_rank = u8::MAX;
        for score in 1..=10 {
            let result = eng.classify(&structured_input(&[], score), None);
            let rank = result.tier.urgency_rank();
            assert!(rank <= last_rank, "score {score} downgraded the tier");
            last_rank = rank;
        }
    }

    #[test]
    fn chest_pain_answer_reaches_high_without_emergency_text() {
        let mut inner = NarrativeInput::new("uncomfortable pressure when walking").unwrap();
        inner
            .answers
            .insert(ANSWER_CHEST_PAIN.into(), AnswerValue::Flag(true));
        let result = engine().classify(&SymptomInput::Narrative(inner), None);
        assert!(!result.is_emergency);
        assert_eq!(result.tier, PriorityTier::High);
        assert_eq!(result.wait_time_estimate.as_deref(), Some("5-10 minutes"));
    }

    #[test]
    fn medical_context_passes_through_untouched() {
        let context = MedicalContext {
            history: Some("asthma".into()),
            medications: Some("salbutamol inhaler".into()),
        };
        let result = engine().classify(
            &narrative_input("mild cough at night"),
            Some(context.clone()),
        );
        assert_eq!(result.context, Some(context));
    }

    #[test]
    fn substitute_lexicon_changes_classification() {
        let mut lexicon = Lexicon::builtin();
        lexicon.emergency_phrases = vec!["purple spots".to_string()];
        lexicon.version = "test".to_string();
        let eng = TriageEngine::new(lexicon).unwrap();

        let fires = eng.classify(&narrative_input("purple spots on my arm"), None);
        assert!(fires.is_emergency);

        // The builtin emergency phrasing no longer fires under the substitute.
        let quiet = eng.classify(&narrative_input("severe bleeding from a cut"), None);
        assert!(!quiet.is_emergency);
    }

    #[test]
    fn new_rejects_invalid_lexicon() {
        let mut lexicon = Lexicon::builtin();
        for flag in &mut lexicon.red_flags {
            flag.critical = false;
        }
        assert!(TriageEngine::new(lexicon).is_err());
    }
}
