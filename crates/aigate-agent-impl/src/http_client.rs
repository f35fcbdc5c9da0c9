use std::sync::OnceLock;

use aigate_agent_core::{AgentError, AgentResult};

static CLIENT: OnceLock<wreq::Client> = OnceLock::new();

/// One process-wide client shared by every agent call. wreq clients are
/// cheap to clone and safe for concurrent use.
pub(crate) fn shared_client() -> AgentResult<wreq::Client> {
    if let Some(client) = CLIENT.get() {
        return Ok(client.clone());
    }
    let client = wreq::Client::builder()
        .build()
        .map_err(|err| AgentError::Transport(err.to_string()))?;
    let _ = CLIENT.set(client.clone());
    Ok(client)
}
