use contracts::system::auth::{LoginRequest, LoginResponse};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;
use crate::shared::config::config;

/// Login with email and password, returning the session token.
///
/// Goes straight to the network rather than through the gateway: a rejected
/// login is not an expired session.
pub async fn login(email: String, password: String) -> Result<String, String> {
    let request = LoginRequest { email, password };
    let cfg = config();

    let response = Request::post(&api_url("/admin/login"))
        .header(&cfg.api.tenant_header, &cfg.api.tenant_id)
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    let body = response
        .json::<LoginResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    match body.token {
        Some(token) if body.status == "success" && !token.is_empty() => Ok(token),
        _ => Err(body
            .message
            .unwrap_or_else(|| format!("Login failed: {}", response.status()))),
    }
}
