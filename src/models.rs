use std::collections::HashMap;

use axum::http::StatusCode;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::RecordError;

/// Inbound invocation event (API Gateway HTTP API, payload format 2.0)
///
/// Only the fields the dispatcher reads are modelled; everything else in the
/// event is ignored during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerRequest {
    pub request_context: RequestContext,
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestContext {
    pub http: HttpDetails,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpDetails {
    pub method: String,
}

impl HandlerRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            request_context: RequestContext {
                http: HttpDetails {
                    method: method.into(),
                },
            },
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert("id".to_string(), id.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn method(&self) -> &str {
        &self.request_context.http.method
    }

    /// The `id` path parameter, taken verbatim
    pub fn path_id(&self) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get("id"))
            .map(String::as_str)
    }

    /// Decode the body and parse it as a JSON object
    pub fn json_object(&self) -> Result<serde_json::Map<String, JsonValue>, RecordError> {
        let raw = self
            .body
            .as_deref()
            .ok_or_else(|| RecordError::MalformedInput("request body is required".to_string()))?;

        let value: JsonValue = if self.is_base64_encoded {
            let decoded = BASE64
                .decode(raw)
                .map_err(|e| RecordError::MalformedInput(format!("invalid base64 body: {}", e)))?;
            serde_json::from_slice(&decoded)?
        } else {
            serde_json::from_str(raw)?
        };

        match value {
            JsonValue::Object(map) => Ok(map),
            other => Err(RecordError::MalformedInput(format!(
                "payload must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// Outbound response handed back to the hosting platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    /// JSON-encoded text
    pub body: String,
}

impl HandlerResponse {
    /// Response whose body is a JSON string literal, e.g. `"Item created successfully"`
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::json(status, JsonValue::String(message.into()))
    }

    pub fn json(status: StatusCode, body: JsonValue) -> Self {
        Self {
            status_code: status.as_u16(),
            body: body.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
