//! Google agents over the Gemini generateContent API. Text, vision and
//! transcription all go through the same parts-based endpoint; binary parts
//! are inlined as base64.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use serde_json::{Map, Value, json};

use aigate_agent_core::{
    AgentError, AgentReply, AgentResult, ApiKeyCredential, FieldKind, GoogleTextModel,
    GoogleTranscribeModel, GoogleVisionModel, ImageMimeTypes, Language, OutputSchema, TextAgent,
    TranscribeAgent, VisionAgent, prompt,
};

use crate::upstream::{Headers, UpstreamBody, UpstreamHttpRequest, send};

pub(crate) const AGENT_NAME: &str = "google";
const BASE_URL: &str = "https://generativelanguage.googleapis.com";

fn base_headers(credential: &ApiKeyCredential) -> Headers {
    vec![("x-goog-api-key", credential.api_key.clone())]
}

fn generate_content_url(model: &str) -> String {
    format!("{BASE_URL}/v1beta/models/{model}:generateContent")
}

/// generateContent response schemas use uppercase type names.
fn response_schema(schema: &OutputSchema) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for (name, kind) in schema.fields() {
        let type_name = match kind {
            FieldKind::String => "STRING",
            FieldKind::Integer => "INTEGER",
            FieldKind::Number => "NUMBER",
            FieldKind::Boolean => "BOOLEAN",
        };
        properties.insert(name.clone(), json!({ "type": type_name }));
        required.push(Value::String(name.clone()));
    }
    json!({ "type": "OBJECT", "properties": properties, "required": required })
}

fn inline_data_part(mime_type: &str, data: &[u8]) -> Value {
    json!({ "inlineData": { "mimeType": mime_type, "data": BASE64.encode(data) } })
}

fn structured_body(parts: Vec<Value>, schema: Option<&OutputSchema>) -> Value {
    let mut body = json!({ "contents": [ { "parts": parts } ] });
    if let Some(schema) = schema {
        body["generationConfig"] = json!({
            "responseMimeType": "application/json",
            "responseSchema": response_schema(schema),
        });
    }
    body
}

pub struct GoogleTextAgent {
    model: GoogleTextModel,
    language: Language,
    credential: ApiKeyCredential,
}

impl GoogleTextAgent {
    pub fn new(model: GoogleTextModel, language: Language, credential: ApiKeyCredential) -> Self {
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
        let content = prompt::generate_system_prompt(system_prompt, user_input, self.language);
        UpstreamHttpRequest {
            url: generate_content_url(self.model.as_str()),
            headers: base_headers(&self.credential),
            body: UpstreamBody::Json(structured_body(vec![json!({ "text": content })], schema)),
        }
    }
}

#[async_trait]
impl TextAgent for GoogleTextAgent {
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
        let text = candidate_text(&reply)?;
        match schema {
            None => Ok(AgentReply::Text(text)),
            Some(schema) => Ok(AgentReply::Structured(schema.parse_reply(&text)?)),
        }
    }
}

pub struct GoogleVisionAgent {
    model: GoogleVisionModel,
    prompt: String,
    language: Language,
    credential: ApiKeyCredential,
}

impl GoogleVisionAgent {
    pub fn new(
        model: GoogleVisionModel,
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
        let instruction = prompt::vision_instruction(&self.prompt, input_text, self.language);
        let mut parts = vec![json!({ "text": instruction })];
        for (idx, image) in images.iter().enumerate() {
            parts.push(json!({ "text": format!("Image {}", idx + 1) }));
            parts.push(inline_data_part(mime_types[idx], image));
        }
        UpstreamHttpRequest {
            url: generate_content_url(self.model.as_str()),
            headers: base_headers(&self.credential),
            body: UpstreamBody::Json(structured_body(parts, schema)),
        }
    }
}

#[async_trait]
impl VisionAgent for GoogleVisionAgent {
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
        let text = candidate_text(&reply)?;
        match schema {
            None => Ok(AgentReply::Text(text)),
            Some(schema) => Ok(AgentReply::Structured(schema.parse_reply(&text)?)),
        }
    }
}

pub struct GoogleTranscribeAgent {
    model: GoogleTranscribeModel,
    prompt: String,
    language: Language,
    credential: ApiKeyCredential,
}

impl GoogleTranscribeAgent {
    pub fn new(
        model: GoogleTranscribeModel,
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

    fn build_transcribe(&self, audio: &[u8], mime_type: &str) -> UpstreamHttpRequest {
        let parts = vec![
            json!({ "text": prompt::transcription_prompt(&self.prompt, self.language) }),
            inline_data_part(mime_type, audio),
        ];
        UpstreamHttpRequest {
            url: generate_content_url(self.model.as_str()),
            headers: base_headers(&self.credential),
            body: UpstreamBody::Json(structured_body(parts, None)),
        }
    }
}

#[async_trait]
impl TranscribeAgent for GoogleTranscribeAgent {
    fn name(&self) -> &'static str {
        AGENT_NAME
    }

    async fn transcribe(&self, audio: Bytes, mime_type: &str) -> AgentResult<String> {
        let request = self.build_transcribe(&audio, mime_type);
        let reply = send(request).await?;
        candidate_text(&reply)
    }
}

fn candidate_text(body: &str) -> AgentResult<String> {
    let value: Value = serde_json::from_str(body).map_err(|err| {
        AgentError::MalformedResponse(format!("generateContent reply is not valid JSON: {err}"))
    })?;
    let mut out = String::new();
    if let Some(parts) = value["candidates"][0]["content"]["parts"].as_array() {
        for part in parts {
            if let Some(text) = part["text"].as_str() {
                out.push_str(text);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> ApiKeyCredential {
        ApiKeyCredential::new("goog-test")
    }

    fn json_body(request: &UpstreamHttpRequest) -> &Value {
        match &request.body {
            UpstreamBody::Json(value) => value,
            other => panic!("expected JSON body, got {other:?}"),
        }
    }

    #[test]
    fn generate_targets_the_selected_model() {
        let agent = GoogleTextAgent::new(GoogleTextModel::Gemini20Flash, Language::ViVn, credential());
        let request = agent.build_generate("You are Felix.", "What is your name?", None);
        assert_eq!(
            request.url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(request.headers[0], ("x-goog-api-key", "goog-test".to_string()));

        let body = json_body(&request);
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.contains("User: What is your name?"));
        assert!(text.ends_with("Please respond in Vietnamese."));
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn schema_mode_sets_generation_config() {
        use aigate_agent_core::FieldKind;

        let schema = OutputSchema::new(vec![
            ("description".to_string(), FieldKind::String),
            ("count".to_string(), FieldKind::Integer),
        ])
        .unwrap();
        let agent = GoogleTextAgent::new(GoogleTextModel::Gemini20Flash, Language::EnUs, credential());
        let request = agent.build_generate("Prompt", "Input", Some(&schema));
        let config = &json_body(&request)["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "OBJECT");
        assert_eq!(
            config["responseSchema"]["properties"]["count"]["type"],
            "INTEGER"
        );
    }

    #[test]
    fn analyze_interleaves_labels_and_inline_data() {
        let agent = GoogleVisionAgent::new(
            GoogleVisionModel::Gemini20Flash,
            "What is shown?",
            Language::EnUs,
            credential(),
        );
        let images = [Bytes::from_static(b"img")];
        let request = agent.build_analyze(&images, "", None, &["image/jpeg"]);
        let parts = json_body(&request)["contents"][0]["parts"].as_array().unwrap().clone();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1]["text"], "Image 1");
        assert_eq!(parts[2]["inlineData"]["mimeType"], "image/jpeg");
    }

    #[test]
    fn transcribe_sends_prompt_then_audio() {
        let agent = GoogleTranscribeAgent::new(
            GoogleTranscribeModel::Gemini25ProPreview,
            "",
            Language::ViVn,
            credential(),
        );
        let request = agent.build_transcribe(b"pcm", "audio/flac");
        let parts = json_body(&request)["contents"][0]["parts"].as_array().unwrap().clone();
        assert_eq!(parts.len(), 2);
        assert!(parts[0]["text"].as_str().unwrap().contains("Vietnamese"));
        assert_eq!(parts[1]["inlineData"]["mimeType"], "audio/flac");
    }

    #[test]
    fn candidate_text_concatenates_parts() {
        let text = candidate_text(
            r#"{"candidates": [{"content": {"parts": [{"text": "a"}, {"text": "b"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(text, "ab");

        let text = candidate_text(r#"{"candidates": []}"#).unwrap();
        assert_eq!(text, "");
    }
}
