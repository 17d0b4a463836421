//! Absorbing emergency detection.
//!
//! This check runs before every other classification step and, when it
//! fires, fully determines the assessment. The matching is deliberately
//! blunt: case-folded substring containment against the emergency phrase set
//! and the critical entries of the red-flag catalog. A false positive sends
//! someone to emergency services unnecessarily; a false negative is not
//! acceptable, so anything ambiguous belongs in the tables.

use crate::lexicon::Lexicon;

/// What caused an emergency classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmergencyTrigger {
    /// An emergency lexicon phrase found in the narrative
    Phrase(String),
    /// A critical red-flag catalog entry, by id
    RedFlag(String),
}

impl std::fmt::Display for EmergencyTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmergencyTrigger::Phrase(phrase) => write!(f, "phrase '{phrase}'"),
            EmergencyTrigger::RedFlag(id) => write!(f, "red flag '{id}'"),
        }
    }
}

/// Scans a normalised narrative for emergency indicators.
///
/// Fires on any emergency phrase appearing as a substring, or on the
/// case-folded label of any critical catalog entry appearing as a substring.
///
/// # Arguments
///
/// * `normalized` - Narrative text already folded to lowercase
/// * `lexicon` - The tables to match against
pub fn scan_narrative(normalized: &str, lexicon: &Lexicon) -> Option<EmergencyTrigger> {
    for phrase in &lexicon.emergency_phrases {
        if normalized.contains(phrase.as_str()) {
            return Some(EmergencyTrigger::Phrase(phrase.clone()));
        }
    }

    for flag in lexicon.red_flags.iter().filter(|f| f.critical) {
        if normalized.contains(&flag.label.to_lowercase()) {
            return Some(EmergencyTrigger::RedFlag(flag.id.clone()));
        }
    }

    None
}

/// Scans selected checklist ids for a critical catalog entry.
///
/// Ids that do not resolve to a catalog entry are skipped; an unknown
/// selection must never suppress a critical one elsewhere in the list.
///
/// # Arguments
///
/// * `flag_ids` - Normalised selected red-flag ids
/// * `lexicon` - The tables to match against
pub fn scan_structured(flag_ids: &[String], lexicon: &Lexicon) -> Option<EmergencyTrigger> {
    for id in flag_ids {
        if lexicon.red_flag(id).is_some_and(|f| f.critical) {
            return Some(EmergencyTrigger::RedFlag(id.clone()));
        }
    }
    None
}
