//! OpenAI agents: chat completions for text generation, the Responses API
//! for image analysis and a multipart upload for transcription.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use serde_json::{Value, json};

use aigate_agent_core::{
    AgentError, AgentReply, AgentResult, ApiKeyCredential, ImageMimeTypes, Language,
    OpenAiTextModel, OpenAiTranscribeModel, OpenAiVisionModel, OutputSchema, TextAgent,
    TranscribeAgent, VisionAgent, prompt,
};

use crate::upstream::{Headers, MultipartForm, UpstreamBody, UpstreamHttpRequest, send};

pub(crate) const AGENT_NAME: &str = "openai";
const BASE_URL: &str = "https://api.openai.com";
const SCHEMA_NAME: &str = "structured_output";

fn base_headers(credential: &ApiKeyCredential) -> Headers {
    vec![("authorization", format!("Bearer {}", credential.api_key))]
}

fn json_schema_format(schema: &OutputSchema) -> Value {
    json!({
        "name": SCHEMA_NAME,
        "strict": true,
        "schema": schema.to_json_schema(),
    })
}

pub struct OpenAiTextAgent {
    model: OpenAiTextModel,
    language: Language,
    credential: ApiKeyCredential,
}

impl OpenAiTextAgent {
    pub fn new(model: OpenAiTextModel, language: Language, credential: ApiKeyCredential) -> Self {
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
        let system = prompt::generate_system_prompt(system_prompt, user_input, self.language);
        let mut body = json!({
            "model": self.model.as_str(),
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user_input },
            ],
            "temperature": 0,
        });
        if let Some(schema) = schema {
            body["response_format"] = json!({
                "type": "json_schema",
                "json_schema": json_schema_format(schema),
            });
        }
        UpstreamHttpRequest {
            url: format!("{BASE_URL}/v1/chat/completions"),
            headers: base_headers(&self.credential),
            body: UpstreamBody::Json(body),
        }
    }
}

#[async_trait]
impl TextAgent for OpenAiTextAgent {
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
        let text = chat_reply_text(&reply)?;
        match schema {
            None => Ok(AgentReply::Text(text)),
            Some(schema) => Ok(AgentReply::Structured(schema.parse_reply(&text)?)),
        }
    }
}

pub struct OpenAiVisionAgent {
    model: OpenAiVisionModel,
    prompt: String,
    language: Language,
    credential: ApiKeyCredential,
}

impl OpenAiVisionAgent {
    pub fn new(
        model: OpenAiVisionModel,
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
        let mut content = Vec::new();
        for (idx, image) in images.iter().enumerate() {
            content.push(json!({ "type": "input_text", "text": format!("Image {}", idx + 1) }));
            content.push(json!({
                "type": "input_image",
                "image_url": format!("data:{};base64,{}", mime_types[idx], BASE64.encode(image)),
            }));
        }
        let instruction = prompt::vision_instruction(&self.prompt, input_text, self.language);
        let mut body = json!({
            "model": self.model.as_str(),
            "input": [
                { "role": "developer", "content": instruction },
                { "role": "user", "content": content },
            ],
        });
        if let Some(schema) = schema {
            body["text"] = json!({ "format": {
                "type": "json_schema",
                "name": SCHEMA_NAME,
                "strict": true,
                "schema": schema.to_json_schema(),
            } });
        }
        UpstreamHttpRequest {
            url: format!("{BASE_URL}/v1/responses"),
            headers: base_headers(&self.credential),
            body: UpstreamBody::Json(body),
        }
    }
}

#[async_trait]
impl VisionAgent for OpenAiVisionAgent {
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
        let text = responses_output_text(&reply)?;
        match schema {
            None => Ok(AgentReply::Text(text)),
            Some(schema) => Ok(AgentReply::Structured(schema.parse_reply(&text)?)),
        }
    }
}

pub struct OpenAiTranscribeAgent {
    model: OpenAiTranscribeModel,
    prompt: String,
    language: Language,
    credential: ApiKeyCredential,
}

impl OpenAiTranscribeAgent {
    pub fn new(
        model: OpenAiTranscribeModel,
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

    fn build_transcribe(&self, audio: Bytes, mime_type: &str) -> UpstreamHttpRequest {
        UpstreamHttpRequest {
            url: format!("{BASE_URL}/v1/audio/transcriptions"),
            headers: base_headers(&self.credential),
            body: UpstreamBody::Multipart(MultipartForm {
                file_name: prompt::audio_file_name(mime_type),
                mime_type: mime_type.to_string(),
                data: audio,
                fields: vec![
                    ("model", self.model.as_str().to_string()),
                    (
                        "prompt",
                        prompt::transcription_prompt(&self.prompt, self.language),
                    ),
                    ("response_format", "text".to_string()),
                ],
            }),
        }
    }
}

#[async_trait]
impl TranscribeAgent for OpenAiTranscribeAgent {
    fn name(&self) -> &'static str {
        AGENT_NAME
    }

    async fn transcribe(&self, audio: Bytes, mime_type: &str) -> AgentResult<String> {
        // With response_format=text the body is the transcript itself.
        send(self.build_transcribe(audio, mime_type)).await
    }
}

fn chat_reply_text(body: &str) -> AgentResult<String> {
    let value: Value = serde_json::from_str(body).map_err(|err| {
        AgentError::MalformedResponse(format!("chat completion reply is not valid JSON: {err}"))
    })?;
    Ok(value["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string())
}

fn responses_output_text(body: &str) -> AgentResult<String> {
    let value: Value = serde_json::from_str(body).map_err(|err| {
        AgentError::MalformedResponse(format!("responses reply is not valid JSON: {err}"))
    })?;
    let mut out = String::new();
    if let Some(output) = value["output"].as_array() {
        for item in output {
            if item["type"] != "message" {
                continue;
            }
            if let Some(content) = item["content"].as_array() {
                for part in content {
                    if part["type"] == "output_text" {
                        out.push_str(part["text"].as_str().unwrap_or_default());
                    }
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use aigate_agent_core::FieldKind;

    use super::*;

    fn credential() -> ApiKeyCredential {
        ApiKeyCredential::new("sk-test")
    }

    fn schema() -> OutputSchema {
        OutputSchema::new(vec![
            ("name".to_string(), FieldKind::String),
            ("greeting".to_string(), FieldKind::String),
        ])
        .unwrap()
    }

    fn json_body(request: &UpstreamHttpRequest) -> &Value {
        match &request.body {
            UpstreamBody::Json(value) => value,
            other => panic!("expected JSON body, got {other:?}"),
        }
    }

    #[test]
    fn generate_builds_free_text_request() {
        let agent = OpenAiTextAgent::new(OpenAiTextModel::Gpt4oMini, Language::EnUs, credential());
        let request = agent.build_generate("You are Felix.", "What is your name?", None);
        assert_eq!(request.url, "https://api.openai.com/v1/chat/completions");
        assert_eq!(request.headers[0].1, "Bearer sk-test");

        let body = json_body(&request);
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["temperature"], 0);
        assert_eq!(body["messages"][1]["content"], "What is your name?");
        let system = body["messages"][0]["content"].as_str().unwrap();
        assert!(system.contains("You are Felix."));
        assert!(system.ends_with("Please respond in English."));
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn generate_with_schema_requests_strict_json() {
        let agent = OpenAiTextAgent::new(OpenAiTextModel::Gpt4o, Language::ViVn, credential());
        let request = agent.build_generate("You are Felix.", "Hi", Some(&schema()));
        let body = json_body(&request);
        assert_eq!(body["response_format"]["type"], "json_schema");
        let json_schema = &body["response_format"]["json_schema"];
        assert_eq!(json_schema["strict"], true);
        assert_eq!(
            json_schema["schema"]["properties"]["greeting"]["type"],
            "string"
        );
    }

    #[test]
    fn analyze_alternates_labels_and_data_urls() {
        let agent = OpenAiVisionAgent::new(
            OpenAiVisionModel::Gpt41,
            "Describe the scene.",
            Language::EnUs,
            credential(),
        );
        let images = [Bytes::from_static(b"a"), Bytes::from_static(b"b")];
        let request =
            agent.build_analyze(&images, "What do you see?", None, &["image/png", "image/jpeg"]);
        assert_eq!(request.url, "https://api.openai.com/v1/responses");

        let body = json_body(&request);
        let content = body["input"][1]["content"].as_array().unwrap();
        assert_eq!(content.len(), 4);
        assert_eq!(content[0]["text"], "Image 1");
        assert!(content[1]["image_url"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,"));
        assert_eq!(content[2]["text"], "Image 2");
        assert!(content[3]["image_url"]
            .as_str()
            .unwrap()
            .starts_with("data:image/jpeg;base64,"));

        let instruction = body["input"][0]["content"].as_str().unwrap();
        assert!(instruction.starts_with("Describe the scene."));
        assert!(instruction.contains("What do you see?"));
    }

    #[test]
    fn transcribe_builds_multipart_upload() {
        let agent = OpenAiTranscribeAgent::new(
            OpenAiTranscribeModel::Gpt4oTranscribe,
            "",
            Language::ViVn,
            credential(),
        );
        let request = agent.build_transcribe(Bytes::from_static(b"audio-bytes"), "audio/wav");
        assert_eq!(request.url, "https://api.openai.com/v1/audio/transcriptions");
        match &request.body {
            UpstreamBody::Multipart(form) => {
                assert_eq!(form.file_name, "audio.wav");
                assert_eq!(form.mime_type, "audio/wav");
                assert_eq!(form.fields[0], ("model", "gpt-4o-transcribe".to_string()));
                assert_eq!(form.fields[2], ("response_format", "text".to_string()));
                assert!(form.fields[1].1.contains("Vietnamese"));
            }
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    #[test]
    fn reply_extraction() {
        let text = chat_reply_text(
            r#"{"choices": [{"message": {"role": "assistant", "content": "Felix"}}]}"#,
        )
        .unwrap();
        assert_eq!(text, "Felix");

        // A vendor reply with no text yields an empty string, not an error.
        let text = chat_reply_text(r#"{"choices": [{"message": {"role": "assistant"}}]}"#).unwrap();
        assert_eq!(text, "");

        let text = responses_output_text(
            r#"{"output": [
                {"type": "reasoning", "content": []},
                {"type": "message", "content": [
                    {"type": "output_text", "text": "two "},
                    {"type": "output_text", "text": "cats"}
                ]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(text, "two cats");

        assert!(matches!(
            chat_reply_text("not json"),
            Err(AgentError::MalformedResponse(_))
        ));
    }
}
