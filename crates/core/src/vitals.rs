//! Vitals panel resolution for the narrative flow.
//!
//! Determines which vitals the kiosk should capture before the consult.
//! Rules are purely additive: the base panel is always present and narrative
//! terms can only add measurements, never remove them.

use crate::lexicon::Lexicon;

/// Measurement names for the base panel.
pub const BASE_PANEL: [&str; 3] = ["Blood pressure", "Heart rate", "Temperature"];

/// Added when the narrative mentions breathing or oxygen terms.
pub const OXYGEN_SATURATION: &str = "Oxygen saturation";

/// Added when the narrative mentions sugar or diabetes terms.
pub const BLOOD_GLUCOSE: &str = "Blood glucose";

/// Resolves the vitals panel for a normalised narrative.
pub fn vitals_panel(normalized: &str, lexicon: &Lexicon) -> Vec<String> {
    let mut panel: Vec<String> = BASE_PANEL.iter().map(|v| v.to_string()).collect();

    if lexicon
        .oxygen_terms
        .iter()
        .any(|term| normalized.contains(term.as_str()))
    {
        panel.push(OXYGEN_SATURATION.to_string());
    }

    if lexicon
        .glucose_terms
        .iter()
        .any(|term| normalized.contains(term.as_str()))
    {
        panel.push(BLOOD_GLUCOSE.to_string());
    }

    panel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_panel_always_present() {
        let lexicon = Lexicon::builtin();
        let panel = vitals_panel("sore ankle after a fall", &lexicon);
        assert_eq!(panel, vec!["Blood pressure", "Heart rate", "Temperature"]);
    }

    #[test]
    fn breathing_terms_add_oxygen_saturation() {
        let lexicon = Lexicon::builtin();
        let panel = vitals_panel("wheezing a little on exertion", &lexicon);
        assert!(panel.contains(&OXYGEN_SATURATION.to_string()));
        assert!(!panel.contains(&BLOOD_GLUCOSE.to_string()));
    }

    #[test]
    fn diabetes_terms_add_blood_glucose() {
        let lexicon = Lexicon::builtin();
        let panel = vitals_panel("i am diabetic and feel shaky", &lexicon);
        assert!(panel.contains(&BLOOD_GLUCOSE.to_string()));
    }

    #[test]
    fn both_extras_can_be_added_together() {
        let lexicon = Lexicon::builtin();
        let panel = vitals_panel("short of breath and my sugar is low", &lexicon);
        assert_eq!(panel.len(), BASE_PANEL.len() + 2);
    }
}
