//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into request handlers. The intent is to avoid reading process-wide environment
//! variables during request handling, which can lead to inconsistent behaviour in
//! multi-threaded runtimes and test harnesses.

use crate::{EmrError, EmrResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    api_key: String,
    public_base_url: String,
    auto_open_viewer: bool,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The public base URL is stripped of any trailing `/` so endpoint URLs
    /// can be built by simple concatenation.
    ///
    /// # Errors
    ///
    /// Returns `EmrError::InvalidInput` if the API key or the public base
    /// URL is empty.
    pub fn new(
        api_key: String,
        public_base_url: String,
        auto_open_viewer: bool,
    ) -> EmrResult<Self> {
        if api_key.trim().is_empty() {
            return Err(EmrError::InvalidInput("api_key cannot be empty".into()));
        }

        let public_base_url = public_base_url.trim().trim_end_matches('/').to_string();
        if public_base_url.is_empty() {
            return Err(EmrError::InvalidInput(
                "public_base_url cannot be empty".into(),
            ));
        }

        Ok(Self {
            api_key,
            public_base_url,
            auto_open_viewer,
        })
    }

    /// The shared secret every client request must present.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Base URL used to build absolute endpoint links, without a trailing `/`.
    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    /// Whether a successful note ingestion should open the note viewer in a
    /// browser.
    pub fn auto_open_viewer(&self) -> bool {
        self.auto_open_viewer
    }

    /// Absolute URL of the note viewer page, carrying the API key as a query
    /// parameter since a browser navigation cannot set headers.
    pub fn view_note_url(&self) -> String {
        format!("{}/view-note?apiKey={}", self.public_base_url, self.api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_api_key() {
        let err = CoreConfig::new("  ".into(), "http://localhost:3001".into(), true);
        assert!(matches!(err, Err(EmrError::InvalidInput(_))));
    }

    #[test]
    fn strips_trailing_slash_from_base_url() {
        let cfg = CoreConfig::new("secret".into(), "http://localhost:3001/".into(), true)
            .expect("valid config");
        assert_eq!(cfg.public_base_url(), "http://localhost:3001");
    }

    #[test]
    fn view_note_url_carries_api_key() {
        let cfg = CoreConfig::new("secret".into(), "http://localhost:3001".into(), false)
            .expect("valid config");
        assert_eq!(
            cfg.view_note_url(),
            "http://localhost:3001/view-note?apiKey=secret"
        );
    }
}
