//! Capability contracts implemented once per vendor.
//!
//! Every agent is a configured object: model, language, optional instruction
//! prompt and the vendor credential, fixed at construction. Each trait
//! exposes exactly one operation.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{Map, Value};

use crate::errors::{AgentError, AgentResult};
use crate::schema::OutputSchema;

/// Result of a dual-mode operation.
///
/// `Text` when no output schema was supplied, `Structured` when one was —
/// never the other way around.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentReply {
    Text(String),
    Structured(Map<String, Value>),
}

/// MIME types for a batch of images: one value broadcast to every image, or
/// one value per image.
#[derive(Debug, Clone)]
pub enum ImageMimeTypes {
    Uniform(String),
    PerImage(Vec<String>),
}

impl Default for ImageMimeTypes {
    fn default() -> Self {
        ImageMimeTypes::Uniform("image/png".to_string())
    }
}

impl ImageMimeTypes {
    /// Resolves to one MIME type per image. A `PerImage` list whose length
    /// does not match the image count fails before any network call.
    pub fn resolve(&self, image_count: usize) -> AgentResult<Vec<&str>> {
        match self {
            ImageMimeTypes::Uniform(mime) => Ok(vec![mime.as_str(); image_count]),
            ImageMimeTypes::PerImage(mimes) => {
                if mimes.len() != image_count {
                    return Err(AgentError::InputContract(format!(
                        "got {} MIME types for {} images",
                        mimes.len(),
                        image_count
                    )));
                }
                Ok(mimes.iter().map(String::as_str).collect())
            }
        }
    }
}

#[async_trait]
pub trait TextAgent: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    async fn generate(
        &self,
        system_prompt: &str,
        user_input: &str,
        schema: Option<&OutputSchema>,
    ) -> AgentResult<AgentReply>;
}

#[async_trait]
pub trait VisionAgent: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    async fn analyze_images(
        &self,
        images: &[Bytes],
        input_text: &str,
        schema: Option<&OutputSchema>,
        mime_types: &ImageMimeTypes,
    ) -> AgentResult<AgentReply>;
}

#[async_trait]
pub trait TranscribeAgent: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    async fn transcribe(&self, audio: Bytes, mime_type: &str) -> AgentResult<String>;
}
