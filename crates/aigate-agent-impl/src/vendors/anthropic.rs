//! Anthropic agents over the Messages API.
//!
//! Anthropic has no native structured-output mode: schema requests embed the
//! schema's format instructions in the prompt and the text reply is parsed
//! instead. There is no Anthropic transcription agent.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use serde_json::{Value, json};

use aigate_agent_core::{
    AgentError, AgentReply, AgentResult, AnthropicTextModel, AnthropicVisionModel,
    ApiKeyCredential, ImageMimeTypes, Language, OutputSchema, TextAgent, VisionAgent, prompt,
};

use crate::upstream::{Headers, UpstreamBody, UpstreamHttpRequest, send};

pub(crate) const AGENT_NAME: &str = "anthropic";
const BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

fn base_headers(credential: &ApiKeyCredential) -> Headers {
    vec![
        ("x-api-key", credential.api_key.clone()),
        ("anthropic-version", ANTHROPIC_VERSION.to_string()),
    ]
}

pub struct AnthropicTextAgent {
    model: AnthropicTextModel,
    language: Language,
    credential: ApiKeyCredential,
}

impl AnthropicTextAgent {
    pub fn new(
        model: AnthropicTextModel,
        language: Language,
        credential: ApiKeyCredential,
    ) -> Self {
        Self {
            model,
            language,
            credential,
        }
    }

    fn build_generate(
        &self,
        system_prompt: &str,
        user_input: &str,
        schema: Option<&OutputSchema>,
    ) -> UpstreamHttpRequest {
        let system = match schema {
            None => format!(
                "{system_prompt}\n\n{}",
                prompt::language_directive(self.language)
            ),
            Some(schema) => format!(
                "{system_prompt}\n{}\n\n{}",
                schema.format_instructions(),
                prompt::language_directive(self.language)
            ),
        };
        let body = json!({
            "model": self.model.as_str(),
            "max_tokens": MAX_TOKENS,
            "system": system,
            "messages": [ { "role": "user", "content": user_input } ],
            "temperature": 0,
        });
        UpstreamHttpRequest {
            url: format!("{BASE_URL}/v1/messages"),
            headers: base_headers(&self.credential),
            body: UpstreamBody::Json(body),
        }
    }
}

#[async_trait]
impl TextAgent for AnthropicTextAgent {
    fn name(&self) -> &'static str {
        AGENT_NAME
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_input: &str,
        schema: Option<&OutputSchema>,
    ) -> AgentResult<AgentReply> {
        let request = self.build_generate(system_prompt, user_input, schema);
        let reply = send(request).await?;
        let text = message_reply_text(&reply)?;
        match schema {
            None => Ok(AgentReply::Text(text)),
            Some(schema) => Ok(AgentReply::Structured(schema.parse_reply(&text)?)),
        }
    }
}

pub struct AnthropicVisionAgent {
    model: AnthropicVisionModel,
    prompt: String,
    language: Language,
    credential: ApiKeyCredential,
}

impl AnthropicVisionAgent {
    pub fn new(
        model: AnthropicVisionModel,
        prompt: impl Into<String>,
        language: Language,
        credential: ApiKeyCredential,
    ) -> Self {
        Self {
            model,
            prompt: prompt.into(),
            language,
            credential,
        }
    }

    fn build_analyze(
        &self,
        images: &[Bytes],
        input_text: &str,
        schema: Option<&OutputSchema>,
        mime_types: &[&str],
    ) -> UpstreamHttpRequest {
        let mut instruction = prompt::vision_instruction(&self.prompt, input_text, self.language);
        if let Some(schema) = schema {
            instruction = format!("{instruction}\n{}\n", schema.format_instructions());
        }
        let mut content = vec![json!({ "type": "text", "text": instruction })];
        for (idx, image) in images.iter().enumerate() {
            content.push(json!({ "type": "text", "text": format!("Image {}", idx + 1) }));
            content.push(json!({
                "type": "image",
                "source": {
                    "type": "base64",
                    "media_type": mime_types[idx],
                    "data": BASE64.encode(image),
                },
            }));
        }
        let body = json!({
            "model": self.model.as_str(),
            "max_tokens": MAX_TOKENS,
            "messages": [ { "role": "user", "content": content } ],
        });
        UpstreamHttpRequest {
            url: format!("{BASE_URL}/v1/messages"),
            headers: base_headers(&self.credential),
            body: UpstreamBody::Json(body),
        }
    }
}

#[async_trait]
impl VisionAgent for AnthropicVisionAgent {
    fn name(&self) -> &'static str {
        AGENT_NAME
    }

    async fn analyze_images(
        &self,
        images: &[Bytes],
        input_text: &str,
        schema: Option<&OutputSchema>,
        mime_types: &ImageMimeTypes,
    ) -> AgentResult<AgentReply> {
        let resolved = mime_types.resolve(images.len())?;
        let request = self.build_analyze(images, input_text, schema, &resolved);
        let reply = send(request).await?;
        let text = message_reply_text(&reply)?;
        match schema {
            None => Ok(AgentReply::Text(text)),
            Some(schema) => Ok(AgentReply::Structured(schema.parse_reply(&text)?)),
        }
    }
}

fn message_reply_text(body: &str) -> AgentResult<String> {
    let value: Value = serde_json::from_str(body).map_err(|err| {
        AgentError::MalformedResponse(format!("messages reply is not valid JSON: {err}"))
    })?;
    if let Some(content) = value["content"].as_array() {
        for block in content {
            if block["type"] == "text" {
                return Ok(block["text"].as_str().unwrap_or_default().to_string());
            }
        }
    }
    Ok(String::new())
}
