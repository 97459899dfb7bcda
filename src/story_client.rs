use crate::authentication::{AuthError, get_jwt_token};
use crate::configuration::Settings;
use crate::domain::StoryDto;
use crate::telemetry::error_chain_fmt;
use anyhow::Context;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};

pub const CREATE_STORY_PATH: &str = "/api/Story/Create";
pub const EDIT_STORY_PATH: &str = "/api/Story/Edit";
pub const DELETE_STORY_PATH: &str = "/api/Story/Delete";

/// HTTP client for the story endpoints.
///
/// Every request carries the bearer token handed to [`StoryClient::new`].
#[derive(Clone, Debug)]
pub struct StoryClient {
    base_url: String,
    http_client: Client,
}

#[derive(thiserror::Error)]
pub enum SetupError {
    #[error("Failed to authenticate against the story API")]
    Authentication(#[from] AuthError),
    #[error("Failed to build the HTTP client")]
    ClientConstruction(#[source] anyhow::Error),
}

impl std::fmt::Debug for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl StoryClient {
    pub fn new(base_url: impl Into<String>, token: &Secret<String>) -> Result<Self, anyhow::Error> {
        let mut authorization =
            HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .context("Access token is not a valid header value.")?;
        authorization.set_sensitive(true);
        let mut default_headers = HeaderMap::new();
        default_headers.insert(AUTHORIZATION, authorization);

        let http_client = Client::builder()
            .default_headers(default_headers)
            .build()
            .context("Failed to build the authenticated HTTP client.")?;
        let base_url: String = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[tracing::instrument(name = "Creating story", skip(self))]
    pub async fn create_story(&self, story: &StoryDto) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, CREATE_STORY_PATH);
        self.http_client.post(&url).json(story).send().await
    }

    #[tracing::instrument(name = "Editing story", skip(self))]
    pub async fn edit_story(
        &self,
        story_id: &str,
        story: &StoryDto,
    ) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}/{}", self.base_url, EDIT_STORY_PATH, story_id);
        self.http_client.put(&url).json(story).send().await
    }

    #[tracing::instrument(name = "Deleting story", skip(self))]
    pub async fn delete_story(&self, story_id: &str) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}/{}", self.base_url, DELETE_STORY_PATH, story_id);
        self.http_client.delete(&url).send().await
    }
}

/// Authenticates with the configured credentials and returns the client
/// every step of the run shares.
#[tracing::instrument(
    name = "Building story client",
    skip_all,
    fields(base_url = %settings.api.base_url)
)]
pub async fn build_story_client(settings: &Settings) -> Result<StoryClient, SetupError> {
    let auth_client = Client::builder()
        .build()
        .context("Failed to build the authentication HTTP client.")
        .map_err(SetupError::ClientConstruction)?;
    let base_url = settings.api.base_url.trim_end_matches('/');
    let token = get_jwt_token(&auth_client, base_url, &settings.credentials.credentials()).await?;
    StoryClient::new(base_url, &token).map_err(SetupError::ClientConstruction)
}
