//! Caller-supplied output schema for structured replies.
//!
//! A schema is a flat field-name → primitive-kind description. It is rendered
//! three ways: as a strict JSON schema for vendors with native structured
//! output, as prompt-embedded format instructions for vendors without, and as
//! the validator applied to the reply text.

use serde_json::{Map, Value, json};

use crate::errors::{AgentError, AgentResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
}

impl FieldKind {
    pub fn json_type(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            // An integer is an acceptable number.
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputSchema {
    fields: Vec<(String, FieldKind)>,
}

impl OutputSchema {
    pub fn new(fields: Vec<(String, FieldKind)>) -> AgentResult<Self> {
        if fields.is_empty() {
            return Err(AgentError::InputContract(
                "output schema must declare at least one field".to_string(),
            ));
        }
        for (idx, (name, _)) in fields.iter().enumerate() {
            if name.is_empty() {
                return Err(AgentError::InputContract(
                    "output schema field name must not be empty".to_string(),
                ));
            }
            if fields[..idx].iter().any(|(seen, _)| seen == name) {
                return Err(AgentError::InputContract(format!(
                    "duplicate output schema field: {name}"
                )));
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[(String, FieldKind)] {
        &self.fields
    }

    /// Strict object schema: every declared field required, nothing else
    /// allowed. This is the shape OpenAI's `json_schema` response format and
    /// comparable vendor modes expect.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for (name, kind) in &self.fields {
            properties.insert(name.clone(), json!({ "type": kind.json_type() }));
            required.push(Value::String(name.clone()));
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }

    /// Prompt-embedded fallback for vendors without a native schema mode.
    pub fn format_instructions(&self) -> String {
        format!(
            "Respond only with a JSON object conforming to the following JSON schema, \
             with no surrounding prose or code fences:\n{}",
            self.to_json_schema()
        )
    }

    /// Parses a vendor reply against this schema.
    ///
    /// Tolerates a markdown code fence around the JSON (some vendors add one
    /// despite instructions). Every declared field must be present with a
    /// conforming kind; the result carries exactly the declared fields.
    pub fn parse_reply(&self, text: &str) -> AgentResult<Map<String, Value>> {
        let stripped = strip_code_fence(text);
        let value: Value = serde_json::from_str(stripped)
            .map_err(|err| AgentError::MalformedResponse(format!("reply is not valid JSON: {err}")))?;
        let Value::Object(object) = value else {
            return Err(AgentError::MalformedResponse(
                "reply is not a JSON object".to_string(),
            ));
        };
        let mut out = Map::new();
        for (name, kind) in &self.fields {
            let field = object.get(name).ok_or_else(|| {
                AgentError::MalformedResponse(format!("reply is missing field '{name}'"))
            })?;
            if !kind.matches(field) {
                return Err(AgentError::MalformedResponse(format!(
                    "field '{name}' is not of type {}",
                    kind.json_type()
                )));
            }
            out.insert(name.clone(), field.clone());
        }
        Ok(out)
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_field_schema() -> OutputSchema {
        OutputSchema::new(vec![
            ("name".to_string(), FieldKind::String),
            ("greeting".to_string(), FieldKind::String),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_empty_and_duplicate_fields() {
        assert!(matches!(
            OutputSchema::new(Vec::new()),
            Err(AgentError::InputContract(_))
        ));
        assert!(matches!(
            OutputSchema::new(vec![
                ("a".to_string(), FieldKind::String),
                ("a".to_string(), FieldKind::Integer),
            ]),
            Err(AgentError::InputContract(_))
        ));
    }

    #[test]
    fn json_schema_is_strict() {
        let schema = two_field_schema().to_json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(schema["properties"]["name"]["type"], "string");
        assert_eq!(schema["properties"]["greeting"]["type"], "string");
        assert_eq!(schema["required"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn parse_reply_projects_to_declared_fields() {
        let reply = two_field_schema()
            .parse_reply(r#"{"name": "Felix", "greeting": "hello", "extra": 1}"#)
            .unwrap();
        assert_eq!(reply.len(), 2);
        assert_eq!(reply["name"], "Felix");
        assert_eq!(reply["greeting"], "hello");
    }

    #[test]
    fn parse_reply_tolerates_code_fences() {
        let reply = two_field_schema()
            .parse_reply("```json\n{\"name\": \"Felix\", \"greeting\": \"hi\"}\n```")
            .unwrap();
        assert_eq!(reply["name"], "Felix");
    }

    #[test]
    fn parse_reply_rejects_missing_or_mistyped_fields() {
        let schema = two_field_schema();
        assert!(matches!(
            schema.parse_reply(r#"{"name": "Felix"}"#),
            Err(AgentError::MalformedResponse(_))
        ));
        assert!(matches!(
            schema.parse_reply(r#"{"name": 3, "greeting": "hi"}"#),
            Err(AgentError::MalformedResponse(_))
        ));
        assert!(matches!(
            schema.parse_reply("not json at all"),
            Err(AgentError::MalformedResponse(_))
        ));
        assert!(matches!(
            schema.parse_reply(r#"["name", "greeting"]"#),
            Err(AgentError::MalformedResponse(_))
        ));
    }

    #[test]
    fn integers_satisfy_number_fields() {
        let schema = OutputSchema::new(vec![("score".to_string(), FieldKind::Number)]).unwrap();
        let reply = schema.parse_reply(r#"{"score": 4}"#).unwrap();
        assert_eq!(reply["score"], 4);
        let reply = schema.parse_reply(r#"{"score": 4.5}"#).unwrap();
        assert_eq!(reply["score"], 4.5);
    }
}
