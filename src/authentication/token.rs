use crate::domain::Credentials;
use crate::telemetry::error_chain_fmt;
use anyhow::Context;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};

pub const AUTHENTICATION_PATH: &str = "/api/User/Authentication";

#[derive(thiserror::Error)]
pub enum AuthError {
    #[error("Unexpected authentication response {status}, with data {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error("Access token is missing, null or blank.")]
    InvalidToken,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(serde::Serialize)]
struct AuthenticationRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Exchanges `credentials` for a bearer token.
///
/// A single attempt: any status other than 200 is an error carrying the
/// status and the raw body, and a 200 without a usable `accessToken`
/// is rejected as well.
#[tracing::instrument(
    name = "Fetching JWT token",
    skip(http_client, credentials),
    fields(username = %credentials.username)
)]
pub async fn get_jwt_token(
    http_client: &Client,
    base_url: &str,
    credentials: &Credentials,
) -> Result<Secret<String>, AuthError> {
    let url = format!("{}{}", base_url, AUTHENTICATION_PATH);
    let request_body = AuthenticationRequest {
        username: &credentials.username,
        password: credentials.password.expose_secret(),
    };
    let response = http_client
        .post(&url)
        .json(&request_body)
        .send()
        .await
        .context("Failed to reach the authentication endpoint.")?;

    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read the authentication response body.")?;

    if status != StatusCode::OK {
        tracing::error!(%status, "Authentication was rejected");
        return Err(AuthError::UnexpectedStatus { status, body });
    }

    let content: serde_json::Value =
        serde_json::from_str(&body).context("Authentication response is not valid JSON.")?;
    let token = content
        .get("accessToken")
        .and_then(serde_json::Value::as_str)
        .filter(|token| !token.trim().is_empty())
        .ok_or(AuthError::InvalidToken)?;

    tracing::debug!("Received access token");
    Ok(Secret::new(token.to_string()))
}
