//! Authenticated request gateway
//!
//! Every API call goes through [`Gateway::send`]. It attaches the bearer token and
//! tenant header, turns auth failures into a single shared logout and never
//! surfaces transport or parse errors to callers: they get `None`.

pub mod browser;
pub mod coordinator;
pub mod transport;

use contracts::shared::api::ApiEnvelope;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::rc::Rc;

pub use coordinator::{LogoutCoordinator, LogoutHandler, LogoutPhase, LogoutScheduler};
pub use transport::{
    CredentialStore, HttpRequest, HttpTransport, Method, RawResponse, RequestOptions,
    TransportError,
};

/// `error` field values the API uses for bad or expired tokens
const EXPIRED_TOKEN_ERRORS: [&str; 2] = ["TokenExpiredError", "JsonWebTokenError"];
/// Lowercased `message` fragments that mean the token is no longer valid
const EXPIRED_TOKEN_MESSAGES: [&str; 4] = [
    "jwt expired",
    "token expired",
    "token is expired",
    "invalid token",
];

/// Decoded JSON body of a response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiPayload(pub Value);

impl ApiPayload {
    pub fn envelope(&self) -> ApiEnvelope {
        serde_json::from_value(self.0.clone()).unwrap_or_default()
    }

    pub fn is_success(&self) -> bool {
        self.envelope().is_success()
    }

    pub fn message(&self) -> Option<String> {
        self.envelope().message
    }

    /// Decode the whole body into a typed response
    pub fn decode<T: DeserializeOwned>(&self) -> Option<T> {
        match serde_json::from_value(self.0.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Unexpected response shape: {}", e);
                None
            }
        }
    }
}

fn signals_expired_token(body: &Value) -> bool {
    let envelope: ApiEnvelope = serde_json::from_value(body.clone()).unwrap_or_default();
    if let Some(error) = envelope.error.as_deref() {
        if EXPIRED_TOKEN_ERRORS.contains(&error) {
            return true;
        }
    }
    if envelope.is_success() {
        return false;
    }
    envelope
        .message
        .map(|m| m.to_lowercase())
        .is_some_and(|m| EXPIRED_TOKEN_MESSAGES.iter().any(|marker| m.contains(marker)))
}

fn parse_body(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(body) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("Response body is not JSON: {}", e);
            None
        }
    }
}

#[derive(Clone)]
pub struct Gateway {
    transport: Rc<dyn HttpTransport>,
    credentials: Rc<dyn CredentialStore>,
    logout: Rc<LogoutCoordinator>,
    tenant_header: String,
    tenant_id: String,
}

impl Gateway {
    pub fn new(
        transport: Rc<dyn HttpTransport>,
        credentials: Rc<dyn CredentialStore>,
        logout: Rc<LogoutCoordinator>,
        tenant_header: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            credentials,
            logout,
            tenant_header: tenant_header.into(),
            tenant_id: tenant_id.into(),
        }
    }

    pub fn logout_coordinator(&self) -> &Rc<LogoutCoordinator> {
        &self.logout
    }

    fn resolve_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        format!(
            "{}/{}",
            self.credentials.base_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn build_request(&self, endpoint: &str, options: RequestOptions, token: Option<&str>) -> HttpRequest {
        let mut headers: Vec<(String, String)> = Vec::new();
        if let Some(token) = token {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        headers.push((self.tenant_header.clone(), self.tenant_id.clone()));

        for (name, value) in options.headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }

        HttpRequest {
            method: options.method,
            url: self.resolve_url(endpoint),
            headers,
            body: options.body,
        }
    }

    /// Send a request. `None` means "no usable payload": auth failure, network
    /// error, cancelled request, non-JSON body, or a logout in progress.
    pub async fn send(&self, endpoint: &str, options: RequestOptions) -> Option<ApiPayload> {
        if !self.logout.is_idle() {
            log::debug!("Logout in progress, skipping request to {}", endpoint);
            return None;
        }

        let token = self.credentials.token();
        let request = self.build_request(endpoint, options, token.as_deref());

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(TransportError::Aborted) => {
                log::debug!("Request to {} was cancelled", endpoint);
                return None;
            }
            Err(TransportError::Network(e)) => {
                log::error!("Request to {} failed: {}", endpoint, e);
                if token.is_some() {
                    self.logout.request_logout();
                }
                return None;
            }
        };

        if response.status == 401 || response.status == 403 {
            log::warn!("Request to {} rejected with {}", endpoint, response.status);
            self.logout.request_logout();
            return None;
        }

        let body = parse_body(&response.body)?;

        if (200..300).contains(&response.status) && signals_expired_token(&body) {
            log::warn!("Request to {} reported an expired token", endpoint);
            self.logout.request_logout();
            return None;
        }

        Some(ApiPayload(body))
    }

    pub async fn get(&self, endpoint: &str) -> Option<ApiPayload> {
        self.send(endpoint, RequestOptions::get()).await
    }
}
