use triage_types::{ScoreError, TextError};

#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read lexicon document: {0}")]
    LexiconRead(std::io::Error),
    #[error("failed to parse lexicon document: {0}")]
    LexiconParse(serde_yaml::Error),
    #[error("failed to serialise lexicon document: {0}")]
    LexiconSerialize(serde_yaml::Error),
    #[error("invalid lexicon document: {0}")]
    LexiconInvalid(String),
}

pub type TriageResult<T> = std::result::Result<T, TriageError>;

impl From<TextError> for TriageError {
    fn from(err: TextError) -> Self {
        TriageError::InvalidInput(err.to_string())
    }
}

impl From<ScoreError> for TriageError {
    fn from(err: ScoreError) -> Self {
        TriageError::InvalidInput(err.to_string())
    }
}
