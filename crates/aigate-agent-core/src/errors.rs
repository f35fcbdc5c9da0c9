use thiserror::Error;

pub type AgentResult<T> = Result<T, AgentError>;

/// Failures surfaced by agent construction and agent operations.
///
/// Vendor-side failures (4xx/5xx, transport errors) are propagated as-is;
/// there is no retry or recovery at this layer.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Required vendor credential was absent when the agent was constructed.
    /// Carries the name of the environment variable that was not set.
    #[error("missing credential: environment variable '{0}' is not set")]
    MissingCredential(&'static str),

    /// Caller-supplied arguments violate the operation contract. Raised
    /// before any network call is made.
    #[error("invalid input: {0}")]
    InputContract(String),

    /// The vendor reply could not be parsed or does not conform to the
    /// requested output schema.
    #[error("malformed vendor reply: {0}")]
    MalformedResponse(String),

    /// Connection-level failure talking to the vendor.
    #[error("upstream transport error: {0}")]
    Transport(String),

    /// The vendor answered with a non-success status.
    #[error("upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
}
