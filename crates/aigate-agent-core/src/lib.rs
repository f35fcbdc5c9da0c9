//! Core agent abstractions for aigate.
//!
//! This crate intentionally does **not** depend on tonic or any concrete HTTP
//! client. It defines the capability contracts (text generation, image
//! analysis, audio transcription), the closed model/language catalogs and the
//! structured-output schema; `aigate-agent-impl` supplies the per-vendor
//! implementations and performs IO.

pub mod agent;
pub mod catalog;
pub mod credential;
pub mod errors;
pub mod prompt;
pub mod schema;

pub use agent::{AgentReply, ImageMimeTypes, TextAgent, TranscribeAgent, VisionAgent};
pub use catalog::{
    AnthropicTextModel, AnthropicVisionModel, GoogleTextModel, GoogleTranscribeModel,
    GoogleVisionModel, Language, OpenAiTextModel, OpenAiTranscribeModel, OpenAiVisionModel, Vendor,
};
pub use credential::ApiKeyCredential;
pub use errors::{AgentError, AgentResult};
pub use schema::{FieldKind, OutputSchema};
