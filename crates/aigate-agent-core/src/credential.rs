use serde::{Deserialize, Serialize};

/// Plain API-key credential, one per vendor account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyCredential {
    pub api_key: String,
}

impl ApiKeyCredential {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}
