//! # Triage Core
//!
//! Symptom-urgency classification for the walk-in care service.
//!
//! This crate is the decision core behind the patient-facing portal: it
//! takes a self-reported symptom description, either free narrative text or
//! a structured red-flag checklist, and produces one pre-assessment with an
//! urgency tier, a recommended care pathway, candidate conditions, the
//! vitals to capture, a wait estimate and a completeness score.
//!
//! The engine is a pure, synchronous, single-threaded computation. Given
//! identical input it produces identical output apart from the timestamp.
//! Emergency detection runs first and is absorbing: any emergency indicator
//! fully determines the result before other components are consulted.
//!
//! **No API concerns**: HTTP servers and CLI surfaces live in `api-rest` and
//! `triage-cli`. **No persistence**: assessments are values; storing them is
//! a consumer concern. **Not a diagnosis**: this is a pre-assessment
//! heuristic and every result carries a disclaimer saying so.

pub mod assessment;
pub mod conditions;
pub mod confidence;
pub mod emergency;
pub mod engine;
pub mod error;
pub mod guidance;
pub mod input;
pub mod lexicon;
pub mod urgency;
pub mod vitals;

pub use assessment::Assessment;
pub use engine::TriageEngine;
pub use error::{TriageError, TriageResult};
pub use guidance::{CareGuidance, KioskSavings, EMERGENCY_DISCLAIMER, STANDARD_DISCLAIMER};
pub use input::{
    AgeGroup, AnswerValue, DurationBucket, ForWhom, MedicalContext, NarrativeInput,
    SeverityLevel, StructuredInput, SymptomInput,
};
pub use lexicon::{ConditionRule, Lexicon, RedFlag};
pub use urgency::PriorityTier;

// Re-export the validated primitives so consumers need only one crate.
pub use triage_types::{NonEmptyText, ScoreError, SeverityScore, TextError};
