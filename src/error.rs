use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::validation::ValidationError;

/// Error body returned by the storefront API.
///
/// Every field is optional; the API is inconsistent about which ones it sends
/// and in what shape, so each field is read on its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    pub name: Option<String>,
    /// Object or array of validation failures, kept as sent.
    pub errors: Option<Value>,
}

impl ApiErrorBody {
    /// Parses a raw response body. Non-JSON bodies and fields of an unexpected
    /// type are dropped without discarding the rest.
    pub fn parse(raw: &str) -> Self {
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) else {
            return Self::default();
        };

        let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            message: text("message"),
            name: text("name"),
            errors: map.get("errors").filter(|v| !v.is_null()).cloned(),
        }
    }

    /// Flattens `errors` into its messages, in server order.
    pub fn validation_messages(&self) -> Vec<String> {
        let entries: Vec<&Value> = match &self.errors {
            Some(Value::Object(map)) => map.values().collect(),
            Some(Value::Array(items)) => items.iter().collect(),
            Some(other) => vec![other],
            None => return Vec::new(),
        };

        entries.into_iter().map(error_message).collect()
    }
}

fn error_message(err: &Value) -> String {
    match err {
        Value::Object(obj) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string()),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API responded with {status}")]
    Api { status: StatusCode, body: ApiErrorBody },

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// True when the server answered, i.e. the body can be trusted for a message.
    pub fn has_response(&self) -> bool {
        matches!(self, ClientError::Api { .. })
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&ApiErrorBody> {
        match self {
            ClientError::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Server-supplied `message` when present, otherwise the call site's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        self.body()
            .and_then(|body| body.message.clone())
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16, raw: &str) -> ClientError {
        ClientError::Api {
            status: StatusCode::from_u16(status).unwrap(),
            body: ApiErrorBody::parse(raw),
        }
    }

    #[test]
    fn test_user_message_prefers_server_message() {
        let error = api_error(400, r#"{"message":"Stock is not enough"}"#);
        assert_eq!(error.user_message("Failed to update item"), "Stock is not enough");
    }

    #[test]
    fn test_user_message_falls_back_without_message() {
        let error = api_error(500, "<html>oops</html>");
        assert_eq!(error.user_message("Failed to update item"), "Failed to update item");

        let error = api_error(400, r#"{"message":""}"#);
        assert_eq!(error.user_message("fallback"), "fallback");
    }

    #[test]
    fn test_non_response_errors_use_fallback() {
        let error = ClientError::Storage("disk full".to_string());
        assert!(!error.has_response());
        assert_eq!(error.user_message("Checkout failed"), "Checkout failed");
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_validation_messages_flatten_in_order() {
        let body = ApiErrorBody::parse(
            r#"{"message":"Validation failed","errors":{"username":{"message":"Username taken"},"email":"Email invalid"}}"#,
        );
        assert_eq!(
            body.validation_messages(),
            vec!["Username taken".to_string(), "Email invalid".to_string()]
        );
    }

    #[test]
    fn test_validation_messages_from_array() {
        let body = ApiErrorBody::parse(
            r#"{"message":"Validation failed","errors":[{"message":"Username already used"},"Email invalid"]}"#,
        );
        assert_eq!(body.message.as_deref(), Some("Validation failed"));
        assert_eq!(
            body.validation_messages(),
            vec!["Username already used".to_string(), "Email invalid".to_string()]
        );
    }

    #[test]
    fn test_odd_field_shapes_keep_message() {
        let error = api_error(400, r#"{"message":"Stock is not enough","errors":"oops"}"#);
        assert_eq!(error.user_message("Failed to update item"), "Stock is not enough");
        assert_eq!(error.body().unwrap().validation_messages(), vec!["oops".to_string()]);

        let body = ApiErrorBody::parse(r#"{"message":42,"name":"unauthentication","errors":null}"#);
        assert_eq!(body.message, None);
        assert_eq!(body.name.as_deref(), Some("unauthentication"));
        assert_eq!(body.errors, None);
        assert!(body.validation_messages().is_empty());
    }

    #[test]
    fn test_status_code_exposed() {
        let error = api_error(409, "{}");
        assert_eq!(error.status(), Some(StatusCode::CONFLICT));
        assert!(error.has_response());
    }
}
