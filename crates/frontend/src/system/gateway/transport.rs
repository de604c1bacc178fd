use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Caller-side request options for `Gateway::send`
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    /// Override the gateway defaults when names collide (case-insensitive)
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::Get,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post_json<T: Serialize>(body: &T) -> Self {
        Self {
            method: Method::Post,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: serde_json::to_string(body).ok(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Fully resolved request handed to the transport
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request aborted")]
    Aborted,
}

/// Low-level HTTP client the gateway sends through
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse, TransportError>;
}

/// Token and API location kept in durable storage
pub trait CredentialStore {
    /// Bearer token, `None` when absent or a placeholder
    fn token(&self) -> Option<String>;
    fn base_url(&self) -> String;
}

/// Treat empty strings and serialized "null"/"undefined" as no credential
pub fn normalize_credential(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "null" && v != "undefined")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_credentials_are_absent() {
        assert_eq!(normalize_credential(None), None);
        assert_eq!(normalize_credential(Some("".into())), None);
        assert_eq!(normalize_credential(Some("null".into())), None);
        assert_eq!(normalize_credential(Some("undefined".into())), None);
        assert_eq!(normalize_credential(Some(" abc ".into())), Some("abc".into()));
    }

    #[test]
    fn test_post_json_sets_body_and_content_type() {
        let options = RequestOptions::post_json(&serde_json::json!({"orderid": "42"}));
        assert_eq!(options.method, Method::Post);
        assert_eq!(options.body.as_deref(), Some(r#"{"orderid":"42"}"#));
        assert_eq!(options.headers[0].1, "application/json");
    }
}
