/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Please enter an incident description")]
    Empty,
}

/// A validated incident short description.
///
/// Wraps a `String` and guarantees a single non-empty line: at least one
/// non-whitespace character, no line breaks. Leading and trailing
/// whitespace is trimmed during construction, so a whitespace-only input
/// is rejected the same way an empty one is, and any line breaks pasted
/// into the field are folded to single spaces. The description is
/// interpolated into line-oriented draft templates, where an embedded
/// newline would split a field across lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentDescription(String);

impl IncidentDescription {
    /// Creates a new `IncidentDescription` from the given input.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(IncidentDescription)` holding a trimmed single line if
    /// the input has any non-whitespace content, or `Err(TextError::Empty)`
    /// if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let single_line = input.as_ref().replace("\r\n", " ").replace(['\r', '\n'], " ");
        let trimmed = single_line.trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IncidentDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for IncidentDescription {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for IncidentDescription {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for IncidentDescription {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IncidentDescription::new(&s).map_err(serde::de::Error::custom)
    }
}
