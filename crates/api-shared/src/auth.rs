/// Errors returned when a request's credential is rejected.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No credential was supplied at all
    #[error("missing API key")]
    Missing,
    /// A credential was supplied but does not match the shared secret
    #[error("invalid API key")]
    InvalidKey,
}

/// Validates the provided API key against the expected shared secret.
///
/// The expected key comes from configuration resolved at startup; it is
/// deliberately passed in rather than read from the environment here.
///
/// Returns `Ok(())` if the key matches, or an error if it does not.
pub fn validate_api_key(provided_key: &str, expected_key: &str) -> Result<(), AuthError> {
    if provided_key == expected_key {
        Ok(())
    } else {
        Err(AuthError::InvalidKey)
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
///
/// Returns `None` if the value does not use the `Bearer` scheme.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
