/// Errors that can occur when creating validated identifier types.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// The input was empty or contained only whitespace
    #[error("identifier cannot be empty")]
    Empty,
    /// The input exceeded the maximum identifier length
    #[error("identifier exceeds maximum length of {max} characters", max = PatientId::MAX_LEN)]
    TooLong,
    /// The input contained characters outside the url-safe set
    #[error("identifier contains invalid characters (only alphanumeric, '.', '-', '_', '~' allowed)")]
    InvalidCharacters,
}

/// An opaque patient identifier.
///
/// Patient identifiers travel inside URLs (`/patient-summary/{patientId}`),
/// so once constructed this type guarantees the contained string is
/// non-empty, at most [`PatientId::MAX_LEN`] characters, and restricted to
/// the url-safe unreserved ASCII set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatientId(String);

impl PatientId {
    /// Maximum identifier length accepted by [`PatientId::new`].
    pub const MAX_LEN: usize = 32;

    /// Creates a new `PatientId` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace before
    /// validation.
    ///
    /// # Errors
    ///
    /// Returns an [`IdError`] if the trimmed input is empty, longer than
    /// [`PatientId::MAX_LEN`], or contains characters outside
    /// `[A-Za-z0-9._~-]`.
    pub fn new(input: impl AsRef<str>) -> Result<Self, IdError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }
        if trimmed.len() > Self::MAX_LEN {
            return Err(IdError::TooLong);
        }

        let ok = trimmed
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'.' | b'-' | b'_' | b'~'));
        if !ok {
            return Err(IdError::InvalidCharacters);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for PatientId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PatientId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PatientId::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_url_safe_identifiers() {
        let id = PatientId::new("pat_12345_dummy").expect("valid id");
        assert_eq!(id.as_str(), "pat_12345_dummy");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let id = PatientId::new("  pat_1  ").expect("valid id");
        assert_eq!(id.as_str(), "pat_1");
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(PatientId::new("   "), Err(IdError::Empty)));
    }

    #[test]
    fn rejects_overlong_input() {
        let long = "a".repeat(PatientId::MAX_LEN + 1);
        assert!(matches!(PatientId::new(long), Err(IdError::TooLong)));
    }

    #[test]
    fn rejects_unsafe_characters() {
        assert!(matches!(
            PatientId::new("pat/../etc"),
            Err(IdError::InvalidCharacters)
        ));
        assert!(matches!(
            PatientId::new("pat 123"),
            Err(IdError::InvalidCharacters)
        ));
    }

    #[test]
    fn serde_round_trip() {
        let id: PatientId = serde_json::from_str("\"pat_67890_dummy\"").expect("deserialize");
        assert_eq!(id.as_str(), "pat_67890_dummy");
        assert_eq!(
            serde_json::to_string(&id).expect("serialize"),
            "\"pat_67890_dummy\""
        );
    }

    #[test]
    fn serde_rejects_invalid() {
        let err = serde_json::from_str::<PatientId>("\"not a valid id\"");
        assert!(err.is_err());
    }
}
