//! Builds a configured agent for a (capability, vendor) pair.
//!
//! Vendor selection happens here, once, at construction time; callers only
//! ever see the capability trait objects. Missing vendor credentials fail
//! construction before any network access.

use aigate_agent_core::{
    AgentError, AgentResult, AnthropicTextModel, AnthropicVisionModel, ApiKeyCredential,
    GoogleTextModel, GoogleTranscribeModel, GoogleVisionModel, Language, OpenAiTextModel,
    OpenAiTranscribeModel, OpenAiVisionModel, TextAgent, TranscribeAgent, Vendor, VisionAgent,
};
use aigate_common::{ENV_ANTHROPIC_API_KEY, ENV_GOOGLE_API_KEY, ENV_OPENAI_API_KEY, Settings};

use crate::vendors::anthropic::{AnthropicTextAgent, AnthropicVisionAgent};
use crate::vendors::google::{GoogleTextAgent, GoogleTranscribeAgent, GoogleVisionAgent};
use crate::vendors::openai::{OpenAiTextAgent, OpenAiTranscribeAgent, OpenAiVisionAgent};

pub fn text_agent(
    vendor: Vendor,
    model: &str,
    language: Language,
    settings: &Settings,
) -> AgentResult<Box<dyn TextAgent>> {
    match vendor {
        Vendor::OpenAi => Ok(Box::new(OpenAiTextAgent::new(
            resolve_model(model, OpenAiTextModel::parse, "OpenAI text")?,
            language,
            credential(&settings.openai_api_key, ENV_OPENAI_API_KEY)?,
        ))),
        Vendor::Anthropic => Ok(Box::new(AnthropicTextAgent::new(
            resolve_model(model, AnthropicTextModel::parse, "Anthropic text")?,
            language,
            credential(&settings.anthropic_api_key, ENV_ANTHROPIC_API_KEY)?,
        ))),
        Vendor::Google => Ok(Box::new(GoogleTextAgent::new(
            resolve_model(model, GoogleTextModel::parse, "Google text")?,
            language,
            credential(&settings.google_api_key, ENV_GOOGLE_API_KEY)?,
        ))),
    }
}

pub fn vision_agent(
    vendor: Vendor,
    model: &str,
    prompt: &str,
    language: Language,
    settings: &Settings,
) -> AgentResult<Box<dyn VisionAgent>> {
    match vendor {
        Vendor::OpenAi => Ok(Box::new(OpenAiVisionAgent::new(
            resolve_model(model, OpenAiVisionModel::parse, "OpenAI vision")?,
            prompt,
            language,
            credential(&settings.openai_api_key, ENV_OPENAI_API_KEY)?,
        ))),
        Vendor::Anthropic => Ok(Box::new(AnthropicVisionAgent::new(
            resolve_model(model, AnthropicVisionModel::parse, "Anthropic vision")?,
            prompt,
            language,
            credential(&settings.anthropic_api_key, ENV_ANTHROPIC_API_KEY)?,
        ))),
        Vendor::Google => Ok(Box::new(GoogleVisionAgent::new(
            resolve_model(model, GoogleVisionModel::parse, "Google vision")?,
            prompt,
            language,
            credential(&settings.google_api_key, ENV_GOOGLE_API_KEY)?,
        ))),
    }
}

pub fn transcribe_agent(
    vendor: Vendor,
    model: &str,
    prompt: &str,
    language: Language,
    settings: &Settings,
) -> AgentResult<Box<dyn TranscribeAgent>> {
    match vendor {
        Vendor::OpenAi => Ok(Box::new(OpenAiTranscribeAgent::new(
            resolve_model(model, OpenAiTranscribeModel::parse, "OpenAI transcription")?,
            prompt,
            language,
            credential(&settings.openai_api_key, ENV_OPENAI_API_KEY)?,
        ))),
        Vendor::Anthropic => Err(AgentError::InputContract(
            "anthropic has no transcription capability".to_string(),
        )),
        Vendor::Google => Ok(Box::new(GoogleTranscribeAgent::new(
            resolve_model(model, GoogleTranscribeModel::parse, "Google transcription")?,
            prompt,
            language,
            credential(&settings.google_api_key, ENV_GOOGLE_API_KEY)?,
        ))),
    }
}

fn credential(value: &Option<String>, env_name: &'static str) -> AgentResult<ApiKeyCredential> {
    value
        .as_deref()
        .map(ApiKeyCredential::new)
        .ok_or(AgentError::MissingCredential(env_name))
}

/// An empty model string selects the family default; anything else must be a
/// catalog member.
fn resolve_model<M: Default>(
    value: &str,
    parse: fn(&str) -> Option<M>,
    family: &str,
) -> AgentResult<M> {
    if value.is_empty() {
        return Ok(M::default());
    }
    parse(value).ok_or_else(|| AgentError::InputContract(format!("unknown {family} model: {value}")))
}
