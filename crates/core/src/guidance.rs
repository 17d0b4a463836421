//! Canned guidance, wait-time bands and disclaimers per tier.
//!
//! A pure lookup keyed by [`PriorityTier`]. The texts are part of the
//! reviewed clinical content, like the lexicon tables, but unlike the tables
//! they are not swappable at runtime: the emergency script in particular
//! must not vary between deployments.

use serde::{Deserialize, Serialize};

use crate::urgency::PriorityTier;

/// Average emergency-room wait used for the savings figure, in hours.
pub const AVG_ER_WAIT_HOURS: f64 = 4.5;

/// Average walk-in kiosk wait used for the savings figure, in hours.
pub const AVG_KIOSK_WAIT_HOURS: f64 = 0.25;

/// Disclaimer attached to every non-emergency assessment.
pub const STANDARD_DISCLAIMER: &str = "This is an AI-powered pre-assessment, not a medical \
diagnosis. A clinician will review your symptoms during your visit. If your symptoms worsen, \
seek urgent care immediately.";

/// Disclaimer attached to emergency assessments.
pub const EMERGENCY_DISCLAIMER: &str = "This is an AI-powered pre-assessment, not a medical \
diagnosis. Your answers suggest a possible medical emergency. Do not wait for a kiosk \
appointment; contact emergency services now.";

/// Guidance block resolved for a tier.
#[derive(Clone, Debug, PartialEq)]
pub struct CareGuidance {
    /// Headline shown on the result screen
    pub title: String,
    /// Supporting line under the headline
    pub subtitle: String,
    /// Ordered action list for the patient
    pub recommendations: Vec<String>,
    /// Human-readable wait estimate; `None` only for `Emergency`
    pub wait_time: Option<String>,
}

/// Time saved by choosing a kiosk over an emergency room visit.
///
/// Surfaced only when the checklist flow resolves to `Kiosk`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KioskSavings {
    pub er_wait_hours: f64,
    pub kiosk_wait_hours: f64,
    pub hours_saved: f64,
}

impl KioskSavings {
    /// Builds the savings figure from the fixed average waits.
    pub fn from_average_waits() -> Self {
        Self {
            er_wait_hours: AVG_ER_WAIT_HOURS,
            kiosk_wait_hours: AVG_KIOSK_WAIT_HOURS,
            hours_saved: AVG_ER_WAIT_HOURS - AVG_KIOSK_WAIT_HOURS,
        }
    }
}

/// Resolves the guidance block for a tier.
pub fn guidance_for(tier: PriorityTier) -> CareGuidance {
    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    match tier {
        PriorityTier::Emergency => CareGuidance {
            title: "Seek emergency care now".into(),
            subtitle: "Your answers suggest a medical emergency".into(),
            recommendations: strings(&[
                "Call your local emergency number immediately.",
                "Do not drive yourself to hospital.",
                "Stay calm and remain as still as possible.",
                "Have someone stay with you until help arrives.",
            ]),
            wait_time: None,
        },
        PriorityTier::High => CareGuidance {
            title: "High urgency".into(),
            subtitle: "You should be seen promptly".into(),
            recommendations: strings(&[
                "Go to the walk-in clinic now; you will be prioritised.",
                "Bring a list of your current medications.",
                "If symptoms worsen on the way, call emergency services.",
            ]),
            wait_time: Some("5-10 minutes".into()),
        },
        PriorityTier::Elevated => CareGuidance {
            title: "Elevated urgency".into(),
            subtitle: "You should be seen soon".into(),
            recommendations: strings(&[
                "Visit the walk-in clinic today.",
                "Drink fluids and rest while you wait.",
                "Monitor your symptoms and report any changes at check-in.",
            ]),
            wait_time: Some("10-20 minutes".into()),
        },
        PriorityTier::Standard => CareGuidance {
            title: "Standard care".into(),
            subtitle: "A routine walk-in visit is appropriate".into(),
            recommendations: strings(&[
                "Visit the walk-in clinic at a convenient time today.",
                "Rest and keep hydrated in the meantime.",
                "Return sooner if your symptoms get worse.",
            ]),
            wait_time: Some("15-30 minutes".into()),
        },
        PriorityTier::EmergencyRoom => CareGuidance {
            title: "Emergency room recommended".into(),
            subtitle: "Your symptoms need hospital-level assessment".into(),
            recommendations: strings(&[
                "Go to your nearest emergency room.",
                "Ask someone to take you if you feel unsafe travelling alone.",
                "Bring photo ID and your medication list.",
            ]),
            wait_time: Some("around 4-5 hours".into()),
        },
        PriorityTier::Kiosk => CareGuidance {
            title: "Walk-in kiosk recommended".into(),
            subtitle: "A kiosk visit can handle your symptoms".into(),
            recommendations: strings(&[
                "Check in at your nearest walk-in kiosk.",
                "Your vitals will be taken on arrival.",
                "Escalate to an emergency room if anything changes suddenly.",
            ]),
            wait_time: Some("around 15 minutes".into()),
        },
    }
}
