//! # API REST
//!
//! REST wire models for the triage service.
//!
//! Handles:
//! - Strict request DTOs with OpenAPI schemas
//! - Fallible translation of raw wire values into core input types
//! - Response DTOs translated from the core assessment
//!
//! The wire layer is where the classify contract is enforced: a request
//! missing a required field for its chosen variant, or carrying a value the
//! core enums do not recognise, becomes `TriageError::InvalidInput` here and
//! surfaces as HTTP 400. The core types themselves cannot represent the
//! invalid states.

#![warn(rust_2018_idioms)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use triage_core::{
    AgeGroup, AnswerValue, Assessment, DurationBucket, ForWhom, KioskSavings, MedicalContext,
    NarrativeInput, NonEmptyText, SeverityLevel, SeverityScore, StructuredInput, SymptomInput,
    TriageError, TriageResult,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Error body returned with 4xx responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorRes {
    pub message: String,
}

/// A follow-up answer: a yes/no flag or a small categorical choice.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AnswerReq {
    Flag(bool),
    Choice(String),
}

impl From<AnswerReq> for AnswerValue {
    fn from(value: AnswerReq) -> Self {
        match value {
            AnswerReq::Flag(flag) => AnswerValue::Flag(flag),
            AnswerReq::Choice(choice) => AnswerValue::Choice(choice),
        }
    }
}

/// Narrative-variant request fields.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NarrativeReq {
    /// Free-text symptom description; required, must not be blank
    pub symptoms: Option<String>,
    /// Onset bucket wire string, e.g. `today` or `week_or_more`
    #[serde(default)]
    pub duration: Option<String>,
    /// Categorical severity wire string: `mild`, `moderate` or `severe`
    #[serde(default)]
    pub severity: Option<String>,
    /// Alternative numeric severity, 1-10; mapped onto the categorical scale
    #[serde(default)]
    pub severity_score: Option<u8>,
    /// Named follow-up answers, e.g. `{"chest_pain": true}`
    #[serde(default)]
    pub answers: BTreeMap<String, AnswerReq>,
}

/// Checklist-variant request fields.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct StructuredReq {
    /// Selected red-flag catalog ids
    #[serde(default)]
    pub red_flags: Vec<String>,
    /// Selected non-flag symptom tags
    #[serde(default)]
    pub symptom_tags: Vec<String>,
    /// Self-rated severity 1-10; required for this variant
    pub severity_score: Option<u8>,
    /// Onset bucket wire string
    #[serde(default)]
    pub duration: Option<String>,
    /// Age band wire string: `child`, `adult` or `senior`
    #[serde(default)]
    pub age_group: Option<String>,
    /// Who the checklist is for: `self` or `other`
    #[serde(default)]
    pub for_whom: Option<String>,
}

/// Opaque medical context carried through to the assessment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MedicalContextDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<String>,
}

impl From<MedicalContextDto> for MedicalContext {
    fn from(dto: MedicalContextDto) -> Self {
        MedicalContext {
            history: dto.history,
            medications: dto.medications,
        }
    }
}

impl From<MedicalContext> for MedicalContextDto {
    fn from(context: MedicalContext) -> Self {
        MedicalContextDto {
            history: context.history,
            medications: context.medications,
        }
    }
}

/// The input union on the wire, tagged by `kind`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputReq {
    Narrative(NarrativeReq),
    Structured(StructuredReq),
}

/// Body of `POST /triage`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ClassifyReq {
    pub input: InputReq,
    #[serde(default)]
    pub context: Option<MedicalContextDto>,
}

impl ClassifyReq {
    /// Translates the wire request into core input types.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidInput` when a required field for the
    /// chosen variant is absent or a wire string is not recognised.
    pub fn into_domain(self) -> TriageResult<(SymptomInput, Option<MedicalContext>)> {
        let context = self.context.map(MedicalContext::from);
        let input = match self.input {
            InputReq::Narrative(req) => SymptomInput::Narrative(narrative_from_wire(req)?),
            InputReq::Structured(req) => SymptomInput::Structured(structured_from_wire(req)?),
        };
        Ok((input, context))
    }
}

fn parse_duration(raw: Option<String>) -> TriageResult<Option<DurationBucket>> {
    raw.map(|s| {
        DurationBucket::from_wire(&s)
            .ok_or_else(|| TriageError::InvalidInput(format!("unknown duration bucket '{s}'")))
    })
    .transpose()
}

fn narrative_from_wire(req: NarrativeReq) -> TriageResult<NarrativeInput> {
    let symptoms = req
        .symptoms
        .ok_or_else(|| TriageError::InvalidInput("symptom narrative is required".into()))?;

    let severity = match (req.severity, req.severity_score) {
        (Some(s), _) => Some(SeverityLevel::from_wire(&s).ok_or_else(|| {
            TriageError::InvalidInput(format!("unknown severity level '{s}'"))
        })?),
        (None, Some(score)) => Some(SeverityLevel::from_score(SeverityScore::new(score)?)),
        (None, None) => None,
    };

    Ok(NarrativeInput {
        symptoms: NonEmptyText::new(symptoms)?,
        duration: parse_duration(req.duration)?,
        severity,
        answers: req
            .answers
            .into_iter()
            .map(|(key, value)| (key, AnswerValue::from(value)))
            .collect(),
    })
}

fn structured_from_wire(req: StructuredReq) -> TriageResult<StructuredInput> {
    let score = req
        .severity_score
        .ok_or_else(|| TriageError::InvalidInput("severity score is required".into()))?;

    let age_group = req
        .age_group
        .map(|s| {
            AgeGroup::from_wire(&s)
                .ok_or_else(|| TriageError::InvalidInput(format!("unknown age group '{s}'")))
        })
        .transpose()?;

    let for_whom = req
        .for_whom
        .map(|s| {
            ForWhom::from_wire(&s)
                .ok_or_else(|| TriageError::InvalidInput(format!("unknown for_whom value '{s}'")))
        })
        .transpose()?;

    Ok(StructuredInput {
        selected_red_flags: req.red_flags,
        selected_symptom_tags: req.symptom_tags,
        severity_score: SeverityScore::new(score)?,
        duration: parse_duration(req.duration)?,
        age_group,
        for_whom,
    })
}

/// Kiosk time-savings block on the wire.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct KioskSavingsRes {
    pub er_wait_hours: f64,
    pub kiosk_wait_hours: f64,
    pub hours_saved: f64,
}

impl From<KioskSavings> for KioskSavingsRes {
    fn from(savings: KioskSavings) -> Self {
        KioskSavingsRes {
            er_wait_hours: savings.er_wait_hours,
            kiosk_wait_hours: savings.kiosk_wait_hours,
            hours_saved: savings.hours_saved,
        }
    }
}

/// The assessment as returned by `POST /triage`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssessmentRes {
    pub is_emergency: bool,
    /// Tier wire string: `emergency`, `high`, `elevated`, `standard`, `er`
    /// or `kiosk`
    pub tier: String,
    pub triage_level: u8,
    pub title: String,
    pub subtitle: String,
    pub possible_conditions: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_time_estimate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kiosk_savings: Option<KioskSavingsRes>,
    pub vitals_needed: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    pub disclaimer: String,
    /// RFC 3339 timestamp of when the assessment was produced
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<MedicalContextDto>,
}

impl From<Assessment> for AssessmentRes {
    fn from(assessment: Assessment) -> Self {
        AssessmentRes {
            is_emergency: assessment.is_emergency,
            tier: assessment.tier.to_wire().to_string(),
            triage_level: assessment.triage_level,
            title: assessment.title,
            subtitle: assessment.subtitle,
            possible_conditions: assessment.possible_conditions,
            recommendations: assessment.recommendations,
            wait_time_estimate: assessment.wait_time_estimate,
            kiosk_savings: assessment.kiosk_savings.map(KioskSavingsRes::from),
            vitals_needed: assessment.vitals_needed,
            confidence: assessment.confidence,
            disclaimer: assessment.disclaimer,
            generated_at: assessment.generated_at.to_rfc3339(),
            context: assessment.context.map(MedicalContextDto::from),
        }
    }
}
