//! Static phrase tables and the red-flag catalog.
//!
//! Everything the classifier matches against lives here: the emergency and
//! urgent phrase sets, the ordered symptom-to-condition multimap, the
//! red-flag catalog used by the checklist flow, and the trigger terms for the
//! optional vitals. The tables are plain data so they can be reviewed by
//! clinical staff, versioned, and swapped out wholesale via a YAML document
//! without touching classifier code.
//!
//! Matching downstream is case-folded substring containment, so every phrase
//! and pattern in a lexicon must already be lowercase. [`Lexicon::validate`]
//! rejects documents that break that rule rather than silently folding them,
//! since a reviewed document should match what the classifier actually sees.

use crate::error::{TriageError, TriageResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One entry of the ordered symptom-to-condition multimap.
///
/// Declaration order matters: suggestions are accumulated by walking the map
/// top to bottom, so earlier rules win the limited suggestion slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRule {
    /// Lowercase fragment searched for in the normalised narrative
    pub pattern: String,
    /// Candidate condition names surfaced when the pattern matches
    pub conditions: Vec<String>,
}

/// A discrete symptom indicator selectable in the checklist flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedFlag {
    /// Stable catalog identifier (lowercase snake case)
    pub id: String,
    /// Patient-facing label
    pub label: String,
    /// Whether the flag alone forces an emergency classification
    #[serde(default)]
    pub critical: bool,
}

/// The full set of tables the engine classifies against.
///
/// A `Lexicon` is immutable once constructed. The built-in tables are the
/// reviewed defaults; deployments can load a replacement document with
/// [`Lexicon::from_yaml_file`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    /// Version label of this document, surfaced in logs and tooling
    pub version: String,
    /// Phrases that force an emergency classification on any match
    pub emergency_phrases: Vec<String>,
    /// Phrases that lift a narrative to the High tier
    pub urgent_phrases: Vec<String>,
    /// Ordered symptom-to-condition multimap
    pub condition_map: Vec<ConditionRule>,
    /// Exactly two generic conditions returned when nothing matched
    pub fallback_conditions: Vec<String>,
    /// The red-flag catalog for the checklist flow
    pub red_flags: Vec<RedFlag>,
    /// Narrative terms that add oxygen saturation to the vitals panel
    pub oxygen_terms: Vec<String>,
    /// Narrative terms that add blood glucose to the vitals panel
    pub glucose_terms: Vec<String>,
}

/// Number of generic conditions the fallback list must carry.
pub const FALLBACK_CONDITION_COUNT: usize = 2;

impl Lexicon {
    /// Returns the built-in clinical tables.
    ///
    /// These are the reviewed defaults shipped with the engine. The content
    /// deliberately over-includes on the emergency side: a phrase that might
    /// describe a life-threatening presentation belongs in
    /// `emergency_phrases` even if it sometimes describes something benign.
    pub fn builtin() -> Self {
        fn strings(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        fn rule(pattern: &str, conditions: &[&str]) -> ConditionRule {
            ConditionRule {
                pattern: pattern.to_string(),
                conditions: strings(conditions),
            }
        }

        fn flag(id: &str, label: &str, critical: bool) -> RedFlag {
            RedFlag {
                id: id.to_string(),
                label: label.to_string(),
                critical,
            }
        }

        Self {
            version: "2026.1".to_string(),
            emergency_phrases: strings(&[
                "chest pain",
                "chest pressure",
                "heart attack",
                "can't breathe",
                "cannot breathe",
                "difficulty breathing",
                "struggling to breathe",
                "severe bleeding",
                "bleeding heavily",
                "coughing up blood",
                "unconscious",
                "passed out",
                "not responding",
                "stroke",
                "face drooping",
                "slurred speech",
                "numb on one side",
                "seizure",
                "convulsions",
                "overdose",
                "poisoning",
                "suicidal",
                "anaphylaxis",
                "throat is closing",
                "severe allergic reaction",
                "choking",
            ]),
            urgent_phrases: strings(&[
                "high fever",
                "severe pain",
                "worst headache",
                "severe headache",
                "broken bone",
                "fracture",
                "deep cut",
                "head injury",
                "vomiting blood",
                "blood in stool",
                "blood in urine",
                "can't keep anything down",
                "severe vomiting",
                "sudden vision",
                "severe dizziness",
            ]),
            condition_map: vec![
                rule("headache", &["Tension headache", "Migraine", "Dehydration"]),
                rule("fever", &["Viral infection", "Influenza", "COVID-19"]),
                rule("cough", &["Common cold", "Bronchitis", "Upper respiratory infection"]),
                rule("sore throat", &["Pharyngitis", "Strep throat", "Tonsillitis"]),
                rule("runny nose", &["Common cold", "Allergic rhinitis", "Sinusitis"]),
                rule("stomach", &["Gastritis", "Indigestion", "Gastroenteritis"]),
                rule("nausea", &["Gastroenteritis", "Food poisoning", "Migraine"]),
                rule("vomit", &["Gastroenteritis", "Food poisoning"]),
                rule("diarrhea", &["Gastroenteritis", "Food poisoning"]),
                rule("rash", &["Contact dermatitis", "Eczema", "Allergic reaction"]),
                rule("itch", &["Contact dermatitis", "Allergic reaction"]),
                rule("ear", &["Ear infection", "Earwax blockage"]),
                rule("back pain", &["Muscle strain", "Sciatica"]),
                rule("joint", &["Arthritis", "Sprain"]),
                rule("dizzy", &["Dehydration", "Low blood pressure", "Inner ear disturbance"]),
                rule("fatigue", &["Anaemia", "Sleep deprivation", "Hypothyroidism"]),
                rule("burning when", &["Urinary tract infection"]),
                rule("urination", &["Urinary tract infection"]),
            ],
            fallback_conditions: strings(&[
                "General viral illness",
                "Non-specific symptoms requiring examination",
            ]),
            red_flags: vec![
                flag("chest_pain", "Chest pain or pressure", true),
                flag("breathing_difficulty", "Severe difficulty breathing", true),
                flag("stroke_signs", "Face drooping, arm weakness or slurred speech", true),
                flag("severe_bleeding", "Bleeding that will not stop", true),
                flag("anaphylaxis", "Swelling of the face, lips or throat", true),
                flag("loss_of_consciousness", "Fainting or loss of consciousness", true),
                flag("new_confusion", "New confusion or disorientation", true),
                flag("high_fever", "Fever above 39.4 C (103 F)", false),
                flag("severe_pain", "Severe or rapidly worsening pain", false),
                flag("persistent_vomiting", "Vomiting that will not stop", false),
                flag("dehydration", "Signs of dehydration", false),
                flag("spreading_infection", "Red streaks or spreading swelling", false),
            ],
            oxygen_terms: strings(&["breath", "breathing", "wheez", "oxygen", "asthma"]),
            glucose_terms: strings(&["diabet", "sugar", "glucose", "insulin"]),
        }
    }

    /// Parses and validates a lexicon from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::LexiconParse` if the document is not valid YAML
    /// for this schema, or `TriageError::LexiconInvalid` if it parses but
    /// violates a structural invariant.
    pub fn from_yaml_str(document: &str) -> TriageResult<Self> {
        let lexicon: Lexicon =
            serde_yaml::from_str(document).map_err(TriageError::LexiconParse)?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    /// Reads and validates a lexicon document from disk.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::LexiconRead` if the file cannot be read, plus
    /// everything [`Lexicon::from_yaml_str`] can return.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> TriageResult<Self> {
        let document = std::fs::read_to_string(path).map_err(TriageError::LexiconRead)?;
        Self::from_yaml_str(&document)
    }

    /// Renders this lexicon as a YAML document.
    ///
    /// Useful as a starting point for authoring a replacement document.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::LexiconSerialize` if serialisation fails.
    pub fn to_yaml_string(&self) -> TriageResult<String> {
        serde_yaml::to_string(self).map_err(TriageError::LexiconSerialize)
    }

    /// Checks the structural invariants of the tables.
    ///
    /// Invariants enforced:
    /// - non-empty version label
    /// - at least one emergency phrase
    /// - every phrase, pattern and red-flag id is non-blank and lowercase
    /// - exactly [`FALLBACK_CONDITION_COUNT`] non-blank fallback conditions
    /// - at least one red flag marked `critical`
    /// - red-flag ids are unique
    ///
    /// # Errors
    ///
    /// Returns `TriageError::LexiconInvalid` naming the first violation.
    pub fn validate(&self) -> TriageResult<()> {
        fn check_folded(kind: &str, items: &[String]) -> TriageResult<()> {
            for item in items {
                if item.trim().is_empty() {
                    return Err(TriageError::LexiconInvalid(format!(
                        "{kind} contains a blank entry"
                    )));
                }
                if *item != item.to_lowercase() {
                    return Err(TriageError::LexiconInvalid(format!(
                        "{kind} entry '{item}' must be lowercase"
                    )));
                }
            }
            Ok(())
        }

        if self.version.trim().is_empty() {
            return Err(TriageError::LexiconInvalid(
                "version label cannot be empty".into(),
            ));
        }

        if self.emergency_phrases.is_empty() {
            return Err(TriageError::LexiconInvalid(
                "emergency phrase set cannot be empty".into(),
            ));
        }

        check_folded("emergency_phrases", &self.emergency_phrases)?;
        check_folded("urgent_phrases", &self.urgent_phrases)?;
        check_folded("oxygen_terms", &self.oxygen_terms)?;
        check_folded("glucose_terms", &self.glucose_terms)?;

        let patterns: Vec<String> = self
            .condition_map
            .iter()
            .map(|rule| rule.pattern.clone())
            .collect();
        check_folded("condition_map patterns", &patterns)?;

        for rule in &self.condition_map {
            if rule.conditions.is_empty() {
                return Err(TriageError::LexiconInvalid(format!(
                    "condition rule '{}' maps to no conditions",
                    rule.pattern
                )));
            }
            if rule.conditions.iter().any(|c| c.trim().is_empty()) {
                return Err(TriageError::LexiconInvalid(format!(
                    "condition rule '{}' contains a blank condition name",
                    rule.pattern
                )));
            }
        }

        if self.fallback_conditions.len() != FALLBACK_CONDITION_COUNT {
            return Err(TriageError::LexiconInvalid(format!(
                "fallback condition list must have exactly {} entries, got {}",
                FALLBACK_CONDITION_COUNT,
                self.fallback_conditions.len()
            )));
        }
        if self.fallback_conditions.iter().any(|c| c.trim().is_empty()) {
            return Err(TriageError::LexiconInvalid(
                "fallback condition list contains a blank entry".into(),
            ));
        }

        let ids: Vec<String> = self.red_flags.iter().map(|f| f.id.clone()).collect();
        check_folded("red flag ids", &ids)?;

        for (i, flag) in self.red_flags.iter().enumerate() {
            if flag.label.trim().is_empty() {
                return Err(TriageError::LexiconInvalid(format!(
                    "red flag '{}' has a blank label",
                    flag.id
                )));
            }
            if self.red_flags[..i].iter().any(|other| other.id == flag.id) {
                return Err(TriageError::LexiconInvalid(format!(
                    "duplicate red flag id '{}'",
                    flag.id
                )));
            }
        }

        if !self.red_flags.iter().any(|f| f.critical) {
            return Err(TriageError::LexiconInvalid(
                "red flag catalog must contain at least one critical entry".into(),
            ));
        }

        Ok(())
    }

    /// Looks up a red flag by catalog id.
    pub fn red_flag(&self, id: &str) -> Option<&RedFlag> {
        self.red_flags.iter().find(|f| f.id == id)
    }

    /// Returns the ids of all critical catalog entries.
    pub fn critical_red_flag_ids(&self) -> Vec<&str> {
        self.red_flags
            .iter()
            .filter(|f| f.critical)
            .map(|f| f.id.as_str())
            .collect()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}
