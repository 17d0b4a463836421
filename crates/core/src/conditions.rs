//! Candidate condition suggestion for the narrative flow.
//!
//! Suggestions come from the ordered symptom-to-condition multimap: the map
//! is walked in declaration order, every matching rule contributes its
//! conditions, duplicates are dropped and the list is capped. The output is
//! a conversation starter for the kiosk visit, not a differential diagnosis.

use crate::lexicon::Lexicon;

/// Maximum number of candidate conditions surfaced to the patient.
pub const MAX_SUGGESTIONS: usize = 4;

/// Suggests candidate conditions for a normalised narrative.
///
/// Walks `condition_map` in declaration order; each rule whose pattern is a
/// substring of the narrative appends its conditions to an order-preserving,
/// duplicate-free accumulator, capped at [`MAX_SUGGESTIONS`]. When nothing
/// matches, the lexicon's two generic fallback conditions are returned, so
/// the list is never empty.
pub fn suggest_conditions(normalized: &str, lexicon: &Lexicon) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();

    for rule in &lexicon.condition_map {
        if !normalized.contains(rule.pattern.as_str()) {
            continue;
        }
        for condition in &rule.conditions {
            if suggestions.iter().any(|seen| seen == condition) {
                continue;
            }
            if suggestions.len() == MAX_SUGGESTIONS {
                return suggestions;
            }
            suggestions.push(condition.clone());
        }
    }

    if suggestions.is_empty() {
        return lexicon.fallback_conditions.clone();
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_accumulate_in_declaration_order() {
        let lexicon = Lexicon::builtin();
        let suggestions = suggest_conditions("headache and fever since last night", &lexicon);
        assert_eq!(
            suggestions,
            vec!["Tension headache", "Migraine", "Dehydration", "Viral infection"]
        );
    }

    #[test]
    fn list_is_capped_at_four() {
        let lexicon = Lexicon::builtin();
        let suggestions =
            suggest_conditions("headache fever cough sore throat stomach rash", &lexicon);
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn duplicates_are_dropped() {
        let lexicon = Lexicon::builtin();
        // "nausea" and "vomit" both map to gastroenteritis and food poisoning.
        let suggestions = suggest_conditions("nausea and vomiting all morning", &lexicon);
        let unique: std::collections::BTreeSet<&String> = suggestions.iter().collect();
        assert_eq!(unique.len(), suggestions.len());
    }

    #[test]
    fn no_match_returns_generic_fallback_pair() {
        let lexicon = Lexicon::builtin();
        let suggestions = suggest_conditions("just feel a bit off today", &lexicon);
        assert_eq!(suggestions, lexicon.fallback_conditions);
        assert_eq!(suggestions.len(), 2);
    }
}
