//! Shared-secret authentication for inbound calls.
//!
//! One fixed, case-sensitive metadata key carries the credential; the gate is
//! decided once per call. Rejections use a single fixed message that does not
//! reveal which check failed.

use std::collections::HashSet;

use tonic::Status;
use tonic::metadata::MetadataMap;

use aigate_common::Settings;

/// Metadata key carrying the shared secret.
pub const API_KEY_METADATA_KEY: &str = "api-key";

const REJECTION_MESSAGE: &str = "Invalid API key";

/// Call-time credential check applied at the top of every gated handler.
///
/// The accepted set is constructed explicitly and passed in; there is no
/// process-wide default.
#[derive(Debug, Clone, Default)]
pub struct ApiKeyGate {
    accepted: HashSet<String>,
}

impl ApiKeyGate {
    pub fn new(accepted: HashSet<String>) -> Self {
        // An empty accepted value could otherwise never be distinguished
        // from an unset environment variable.
        let accepted = accepted.into_iter().filter(|key| !key.is_empty()).collect();
        Self { accepted }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.accepted_api_keys.clone())
    }

    /// Decides the call: absent key, empty value or a value outside the
    /// accepted set abort with UNAUTHENTICATED. When the key appears more
    /// than once the last occurrence wins, matching the metadata-collapsing
    /// behavior of the reference deployment.
    pub fn check(&self, metadata: &MetadataMap) -> Result<(), Status> {
        let presented = metadata
            .get_all(API_KEY_METADATA_KEY)
            .iter()
            .last()
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");
        if presented.is_empty() || !self.accepted.contains(presented) {
            return Err(Status::unauthenticated(REJECTION_MESSAGE));
        }
        Ok(())
    }
}
