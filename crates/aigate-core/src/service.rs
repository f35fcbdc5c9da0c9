//! AiService and HealthService implementations.
//!
//! Handlers gate the call, translate the wire request into catalog/schema
//! types, build the agent through the factory and map agent errors onto gRPC
//! statuses. Each call gets its own trace id for log correlation.

use std::sync::Arc;

use bytes::Bytes;
use tonic::{Request, Response, Status};
use tracing::info;
use uuid::Uuid;

use aigate_agent_core::{
    AgentError, AgentReply, FieldKind, ImageMimeTypes, Language, OutputSchema, Vendor,
};
use aigate_agent_impl::registry;
use aigate_common::Settings;

use crate::auth::ApiKeyGate;
use crate::pb;
use crate::pb::ai_service_server::AiService;
use crate::pb::health_service_server::HealthService;

const HEALTHY_MESSAGE: &str = "Healthy";

pub struct AiGrpcService {
    settings: Arc<Settings>,
    gate: ApiKeyGate,
}

impl AiGrpcService {
    pub fn new(settings: Arc<Settings>, gate: ApiKeyGate) -> Self {
        Self { settings, gate }
    }
}

#[tonic::async_trait]
impl AiService for AiGrpcService {
    async fn generate(
        &self,
        request: Request<pb::GenerateRequest>,
    ) -> Result<Response<pb::GenerateResponse>, Status> {
        self.gate.check(request.metadata())?;
        let trace_id = Uuid::new_v4().to_string();
        let req = request.into_inner();
        let vendor = vendor_from_proto(req.vendor)?;
        let language = language_from_wire(&req.language)?;
        let schema = schema_from_proto(&req.output_schema)?;
        info!(
            event = "generate_received",
            trace_id = %trace_id,
            vendor = %vendor.as_str(),
            model = %req.model,
            structured = schema.is_some()
        );
        let agent = registry::text_agent(vendor, &req.model, language, &self.settings)
            .map_err(status_from_agent_error)?;
        let reply = agent
            .generate(&req.system_prompt, &req.user_input, schema.as_ref())
            .await
            .map_err(status_from_agent_error)?;
        info!(event = "generate_responded", trace_id = %trace_id, vendor = %vendor.as_str());
        Ok(Response::new(pb::GenerateResponse {
            reply: Some(generate_reply(reply)?),
        }))
    }

    async fn analyze_images(
        &self,
        request: Request<pb::AnalyzeImagesRequest>,
    ) -> Result<Response<pb::AnalyzeImagesResponse>, Status> {
        self.gate.check(request.metadata())?;
        let trace_id = Uuid::new_v4().to_string();
        let req = request.into_inner();
        let vendor = vendor_from_proto(req.vendor)?;
        let language = language_from_wire(&req.language)?;
        let schema = schema_from_proto(&req.output_schema)?;
        let images: Vec<Bytes> = req.images.into_iter().map(Bytes::from).collect();
        let mime_types = image_mime_types(req.image_mime_types);
        info!(
            event = "analyze_images_received",
            trace_id = %trace_id,
            vendor = %vendor.as_str(),
            model = %req.model,
            images = images.len(),
            structured = schema.is_some()
        );
        let agent =
            registry::vision_agent(vendor, &req.model, &req.prompt, language, &self.settings)
                .map_err(status_from_agent_error)?;
        let reply = agent
            .analyze_images(&images, &req.input_text, schema.as_ref(), &mime_types)
            .await
            .map_err(status_from_agent_error)?;
        info!(event = "analyze_images_responded", trace_id = %trace_id, vendor = %vendor.as_str());
        Ok(Response::new(pb::AnalyzeImagesResponse {
            reply: Some(analyze_reply(reply)?),
        }))
    }

    async fn transcribe(
        &self,
        request: Request<pb::TranscribeRequest>,
    ) -> Result<Response<pb::TranscribeResponse>, Status> {
        self.gate.check(request.metadata())?;
        let trace_id = Uuid::new_v4().to_string();
        let req = request.into_inner();
        let vendor = vendor_from_proto(req.vendor)?;
        let language = language_from_wire(&req.language)?;
        info!(
            event = "transcribe_received",
            trace_id = %trace_id,
            vendor = %vendor.as_str(),
            model = %req.model,
            mime_type = %req.mime_type,
            audio_bytes = req.audio.len()
        );
        let agent =
            registry::transcribe_agent(vendor, &req.model, &req.prompt, language, &self.settings)
                .map_err(status_from_agent_error)?;
        let text = agent
            .transcribe(Bytes::from(req.audio), &req.mime_type)
            .await
            .map_err(status_from_agent_error)?;
        info!(event = "transcribe_responded", trace_id = %trace_id, vendor = %vendor.as_str());
        Ok(Response::new(pb::TranscribeResponse { text }))
    }
}

pub struct HealthGrpcService {
    gate: ApiKeyGate,
}

impl HealthGrpcService {
    pub fn new(gate: ApiKeyGate) -> Self {
        Self { gate }
    }
}

#[tonic::async_trait]
impl HealthService for HealthGrpcService {
    async fn health(
        &self,
        _request: Request<pb::HealthRequest>,
    ) -> Result<Response<pb::HealthResponse>, Status> {
        Ok(Response::new(pb::HealthResponse {
            message: HEALTHY_MESSAGE.to_string(),
        }))
    }

    async fn health_with_authentication(
        &self,
        request: Request<pb::HealthRequest>,
    ) -> Result<Response<pb::HealthResponse>, Status> {
        self.gate.check(request.metadata())?;
        Ok(Response::new(pb::HealthResponse {
            message: HEALTHY_MESSAGE.to_string(),
        }))
    }
}

fn vendor_from_proto(value: i32) -> Result<Vendor, Status> {
    match pb::Vendor::try_from(value) {
        Ok(pb::Vendor::Openai) => Ok(Vendor::OpenAi),
        Ok(pb::Vendor::Anthropic) => Ok(Vendor::Anthropic),
        Ok(pb::Vendor::Google) => Ok(Vendor::Google),
        Ok(pb::Vendor::Unspecified) | Err(_) => {
            Err(Status::invalid_argument("vendor must be specified"))
        }
    }
}

fn language_from_wire(code: &str) -> Result<Language, Status> {
    if code.is_empty() {
        return Ok(Language::default());
    }
    Language::parse(code)
        .ok_or_else(|| Status::invalid_argument(format!("unsupported language code: {code}")))
}

fn schema_from_proto(fields: &[pb::SchemaField]) -> Result<Option<OutputSchema>, Status> {
    if fields.is_empty() {
        return Ok(None);
    }
    let mut declared = Vec::with_capacity(fields.len());
    for field in fields {
        let kind = match pb::FieldKind::try_from(field.kind) {
            Ok(pb::FieldKind::String) => FieldKind::String,
            Ok(pb::FieldKind::Integer) => FieldKind::Integer,
            Ok(pb::FieldKind::Number) => FieldKind::Number,
            Ok(pb::FieldKind::Boolean) => FieldKind::Boolean,
            Ok(pb::FieldKind::Unspecified) | Err(_) => {
                return Err(Status::invalid_argument(format!(
                    "schema field '{}' has no kind",
                    field.name
                )));
            }
        };
        declared.push((field.name.clone(), kind));
    }
    OutputSchema::new(declared)
        .map(Some)
        .map_err(status_from_agent_error)
}

/// Wire form of the MIME type union: one entry broadcasts, several entries
/// are positional. An empty list falls back to PNG.
fn image_mime_types(values: Vec<String>) -> ImageMimeTypes {
    match values.len() {
        0 => ImageMimeTypes::default(),
        1 => ImageMimeTypes::Uniform(values.into_iter().next().unwrap_or_default()),
        _ => ImageMimeTypes::PerImage(values),
    }
}

fn generate_reply(reply: AgentReply) -> Result<pb::generate_response::Reply, Status> {
    match reply {
        AgentReply::Text(text) => Ok(pb::generate_response::Reply::Text(text)),
        AgentReply::Structured(map) => {
            Ok(pb::generate_response::Reply::Json(encode_structured(&map)?))
        }
    }
}

fn analyze_reply(reply: AgentReply) -> Result<pb::analyze_images_response::Reply, Status> {
    match reply {
        AgentReply::Text(text) => Ok(pb::analyze_images_response::Reply::Text(text)),
        AgentReply::Structured(map) => Ok(pb::analyze_images_response::Reply::Json(
            encode_structured(&map)?,
        )),
    }
}

fn encode_structured(map: &serde_json::Map<String, serde_json::Value>) -> Result<String, Status> {
    serde_json::to_string(map)
        .map_err(|err| Status::internal(format!("failed to encode structured reply: {err}")))
}

fn status_from_agent_error(err: AgentError) -> Status {
    let message = err.to_string();
    match err {
        AgentError::MissingCredential(_) => Status::failed_precondition(message),
        AgentError::InputContract(_) => Status::invalid_argument(message),
        AgentError::MalformedResponse(_) => Status::internal(message),
        AgentError::Transport(_) => Status::unavailable(message),
        AgentError::UpstreamStatus { .. } => Status::unavailable(message),
    }
}
