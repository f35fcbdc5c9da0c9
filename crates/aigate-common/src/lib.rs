//! Process-level configuration shared by the service layer and the agent
//! factory. Loaded once at startup and passed explicitly; nothing here is a
//! process-wide mutable default.

use std::collections::HashSet;
use std::env;

pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const ENV_GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_GRPC_SECRET_API_KEY_1: &str = "GRPC_SECRET_API_KEY_1";
pub const ENV_GRPC_SECRET_API_KEY_2: &str = "GRPC_SECRET_API_KEY_2";

/// Environment-sourced settings.
///
/// Vendor credentials stay optional: a missing one only fails agent
/// construction for that vendor, at call time, before any network access.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub google_api_key: Option<String>,
    /// Shared secrets accepted by the inbound auth gate. Unset or blank
    /// variables contribute nothing.
    pub accepted_api_keys: HashSet<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        let mut accepted = HashSet::new();
        for name in [ENV_GRPC_SECRET_API_KEY_1, ENV_GRPC_SECRET_API_KEY_2] {
            if let Some(key) = read_env(name) {
                accepted.insert(key);
            }
        }
        Self {
            openai_api_key: read_env(ENV_OPENAI_API_KEY),
            anthropic_api_key: read_env(ENV_ANTHROPIC_API_KEY),
            google_api_key: read_env(ENV_GOOGLE_API_KEY),
            accepted_api_keys: accepted,
        }
    }
}

fn read_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_count_as_absent() {
        // Env mutation is process-global; this test owns these two names.
        unsafe {
            env::set_var(ENV_GRPC_SECRET_API_KEY_1, "  ");
            env::set_var(ENV_GRPC_SECRET_API_KEY_2, "secret-two");
        }
        let settings = Settings::from_env();
        assert!(!settings.accepted_api_keys.contains(""));
        assert!(settings.accepted_api_keys.contains("secret-two"));
        assert_eq!(settings.accepted_api_keys.len(), 1);
    }
}
