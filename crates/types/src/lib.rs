//! Validated primitive types shared across the triage workspace.
//!
//! Both types here follow the same rule: once a value is constructed it is
//! known to be valid, so downstream code never re-checks it. Serde
//! deserialisation goes through the same constructors, which means malformed
//! wire input is rejected at the boundary rather than deep inside the engine.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("text cannot be empty")]
    Empty,
}

/// Errors that can occur when creating a validated severity score.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    /// The score was outside the accepted 1-10 range
    #[error("severity score must be between 1 and 10, got {got}")]
    OutOfRange {
        /// The rejected value
        got: u8,
    },
}

/// A string type that guarantees non-empty content.
///
/// Wraps a `String` that contains at least one non-whitespace character.
/// Leading and trailing whitespace is trimmed during construction, so the
/// stored value is already canonical for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace before the
    /// emptiness check.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input has no characters.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for NonEmptyText {
    type Error = TextError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        NonEmptyText::new(value)
    }
}

impl TryFrom<String> for NonEmptyText {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        NonEmptyText::new(value)
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A self-reported severity score on the checklist scale.
///
/// The checklist flow asks the patient to rate how bad they feel from
/// [`SeverityScore::MIN`] to [`SeverityScore::MAX`]. Once constructed the
/// score is known to be inside that range, so rule thresholds can compare
/// against the raw value without defensive checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeverityScore(u8);

impl SeverityScore {
    /// Lowest accepted score.
    pub const MIN: u8 = 1;
    /// Highest accepted score.
    pub const MAX: u8 = 10;

    /// Creates a new `SeverityScore`.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::OutOfRange` if `value` is outside 1-10.
    pub fn new(value: u8) -> Result<Self, ScoreError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ScoreError::OutOfRange { got: value });
        }
        Ok(Self(value))
    }

    /// Returns the raw score value.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for SeverityScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for SeverityScore {
    type Error = ScoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SeverityScore::new(value)
    }
}

impl serde::Serialize for SeverityScore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for SeverityScore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        SeverityScore::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_and_keeps_content() {
        let text = NonEmptyText::new("  chest feels tight  ").unwrap();
        assert_eq!(text.as_str(), "chest feels tight");
    }

    #[test]
    fn non_empty_text_rejects_whitespace_only() {
        assert!(matches!(NonEmptyText::new("   \t\n"), Err(TextError::Empty)));
    }

    #[test]
    fn non_empty_text_deserialize_rejects_empty() {
        let result: Result<NonEmptyText, _> = serde_json::from_str(r#""  ""#);
        assert!(result.is_err());
    }

    #[test]
    fn non_empty_text_serializes_as_plain_string() {
        let text = NonEmptyText::new("headache").unwrap();
        let json = serde_json::to_string(&text).unwrap();
        assert_eq!(json, r#""headache""#);
    }

    #[test]
    fn severity_score_accepts_bounds() {
        assert_eq!(SeverityScore::new(1).unwrap().get(), 1);
        assert_eq!(SeverityScore::new(10).unwrap().get(), 10);
    }

    #[test]
    fn severity_score_rejects_out_of_range() {
        assert!(matches!(
            SeverityScore::new(0),
            Err(ScoreError::OutOfRange { got: 0 })
        ));
        assert!(matches!(
            SeverityScore::new(11),
            Err(ScoreError::OutOfRange { got: 11 })
        ));
    }

    #[test]
    fn severity_score_orders_numerically() {
        let low = SeverityScore::new(3).unwrap();
        let high = SeverityScore::new(8).unwrap();
        assert!(low < high);
    }

    #[test]
    fn severity_score_deserialize_validates() {
        let ok: SeverityScore = serde_json::from_str("7").unwrap();
        assert_eq!(ok.get(), 7);
        let err: Result<SeverityScore, _> = serde_json::from_str("12");
        assert!(err.is_err());
    }
}
