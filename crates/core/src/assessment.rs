//! The assembled triage assessment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::guidance::KioskSavings;
use crate::input::MedicalContext;
use crate::urgency::PriorityTier;

/// The engine's output: one immutable pre-assessment.
///
/// Constructed once per classification and never mutated afterwards. Two
/// classifications of byte-identical input produce equal assessments except
/// for `generated_at`. Nothing here is persisted by the engine; storage, if
/// any, is a consumer concern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Whether the emergency detector fired
    pub is_emergency: bool,
    /// Resolved urgency tier
    pub tier: PriorityTier,
    /// Flow-local triage level, 1 being most urgent
    pub triage_level: u8,
    /// Headline for the result screen
    pub title: String,
    /// Supporting line under the headline
    pub subtitle: String,
    /// Candidate conditions; empty on the checklist flow and on emergencies
    pub possible_conditions: Vec<String>,
    /// Ordered action list for the patient
    pub recommendations: Vec<String>,
    /// Human-readable wait estimate; `None` exactly when `is_emergency`
    pub wait_time_estimate: Option<String>,
    /// Time saved versus an ER visit; checklist kiosk results only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kiosk_savings: Option<KioskSavings>,
    /// Vitals the kiosk should capture; narrative flow only
    pub vitals_needed: Vec<String>,
    /// Input-completeness score in [70, 95]; narrative flow only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    /// Pre-assessment disclaimer shown with the result
    pub disclaimer: String,
    /// When this assessment was produced
    pub generated_at: DateTime<Utc>,
    /// Opaque medical context echoed from the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<MedicalContext>,
}
