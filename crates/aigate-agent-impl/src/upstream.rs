//! Typed upstream requests and the IO step that executes them.
//!
//! All vendor operations are plain POSTs with either a JSON body or a
//! single-file multipart form. Non-success statuses and transport failures
//! propagate unmodified; there is no retry and the transport keeps its
//! default timeouts.

use bytes::Bytes;
use tracing::debug;

use aigate_agent_core::{AgentError, AgentResult};

use crate::http_client::shared_client;

pub(crate) type Headers = Vec<(&'static str, String)>;

#[derive(Debug)]
pub(crate) struct UpstreamHttpRequest {
    pub(crate) url: String,
    pub(crate) headers: Headers,
    pub(crate) body: UpstreamBody,
}

#[derive(Debug)]
pub(crate) enum UpstreamBody {
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

/// One uploaded file plus plain text fields.
#[derive(Debug)]
pub(crate) struct MultipartForm {
    pub(crate) file_name: String,
    pub(crate) mime_type: String,
    pub(crate) data: Bytes,
    pub(crate) fields: Vec<(&'static str, String)>,
}

pub(crate) async fn send(req: UpstreamHttpRequest) -> AgentResult<String> {
    let client = shared_client()?;
    let mut builder = client.post(&req.url);
    for (name, value) in &req.headers {
        builder = builder.header(*name, value);
    }
    builder = match req.body {
        UpstreamBody::Json(value) => builder.json(&value),
        UpstreamBody::Multipart(form) => {
            let part = wreq::multipart::Part::bytes(form.data.to_vec())
                .file_name(form.file_name)
                .mime_str(&form.mime_type)
                .map_err(|err| {
                    AgentError::InputContract(format!("invalid MIME type '{}': {err}", form.mime_type))
                })?;
            let mut multipart = wreq::multipart::Form::new().part("file", part);
            for (name, value) in form.fields {
                multipart = multipart.text(name, value);
            }
            builder.multipart(multipart)
        }
    };
    let response = builder
        .send()
        .await
        .map_err(|err| AgentError::Transport(err.to_string()))?;
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|err| AgentError::Transport(err.to_string()))?;
    debug!(url = %req.url, status, "upstream responded");
    if !(200..300).contains(&status) {
        return Err(AgentError::UpstreamStatus { status, body });
    }
    Ok(body)
}
