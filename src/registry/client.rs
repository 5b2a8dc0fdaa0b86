//! Registry client implementing the manifest existence check

use crate::config::AuthConfig;
use crate::error::{CheckError, Result};
use crate::image::ImageReference;
use crate::output::OutputManager;
use crate::registry::auth::{self, AuthChallenge};
use reqwest::header::{ACCEPT, WWW_AUTHENTICATE};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

const MANIFEST_V2: &str = "application/vnd.docker.distribution.manifest.v2+json";

/// Whether the requested tag is present in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagExistence {
    Exists,
    Missing,
}

pub struct RegistryClientBuilder {
    skip_tls: bool,
    plain_http: bool,
    timeout: Option<Duration>,
    output: OutputManager,
}

impl RegistryClientBuilder {
    pub fn new() -> Self {
        Self {
            skip_tls: false,
            plain_http: false,
            timeout: None,
            output: OutputManager::new_quiet(),
        }
    }

    pub fn with_skip_tls(mut self, skip_tls: bool) -> Self {
        self.skip_tls = skip_tls;
        self
    }

    /// Talk plain HTTP instead of HTTPS, for local registries.
    pub fn with_plain_http(mut self, plain_http: bool) -> Self {
        self.plain_http = plain_http;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_output(mut self, output: OutputManager) -> Self {
        self.output = output;
        self
    }

    pub fn build(self) -> Result<RegistryClient> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if self.skip_tls {
            builder = builder
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true);
        }
        let client = builder.build()?;

        Ok(RegistryClient {
            client,
            plain_http: self.plain_http,
            output: self.output,
        })
    }
}

impl Default for RegistryClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the Docker Registry HTTP API v2 existence check. Owns its HTTP
/// client; both the manifest and token requests go through it.
pub struct RegistryClient {
    client: Client,
    plain_http: bool,
    output: OutputManager,
}

impl RegistryClient {
    pub fn builder() -> RegistryClientBuilder {
        RegistryClientBuilder::new()
    }

    fn manifest_url(&self, reference: &ImageReference) -> String {
        let scheme = if self.plain_http { "http" } else { "https" };
        format!(
            "{}://{}/v2/{}/manifests/{}",
            scheme,
            reference.host(),
            reference.repository,
            reference.tag
        )
    }

    /// Check whether the referenced tag exists without pulling the image.
    ///
    /// Issues the manifest GET with Basic auth when credentials are present.
    /// On a 401 Bearer challenge the token endpoint is queried and the request
    /// retried exactly once; a second 401 is classified like any other final
    /// status. 2xx means the tag exists, 404 means it does not, anything else
    /// is an error.
    pub async fn check_tag_exists(
        &self,
        reference: &ImageReference,
        auth: &AuthConfig,
    ) -> Result<TagExistence> {
        let url = self.manifest_url(reference);
        self.output.detail(&format!("Manifest URL: {url}"));

        let mut request = self.client.get(&url).header(ACCEPT, MANIFEST_V2);
        if let Some((username, password)) = auth.credentials() {
            self.output.step("Using basic authentication");
            request = request.basic_auth(username, Some(password));
        }
        let mut response = request.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.output
                .step("Registry requires authentication, negotiating bearer token");
            let challenge = Self::challenge_from(&response)?;
            let token =
                auth::fetch_bearer_token(&self.client, &challenge, auth, &self.output).await?;

            response = self
                .client
                .get(&url)
                .header(ACCEPT, MANIFEST_V2)
                .bearer_auth(&token.token)
                .send()
                .await?;
        }

        match response.status() {
            status if status.is_success() => Ok(TagExistence::Exists),
            StatusCode::NOT_FOUND => Ok(TagExistence::Missing),
            status => Err(CheckError::UnexpectedStatus(status)),
        }
    }

    fn challenge_from(response: &Response) -> Result<AuthChallenge> {
        let header = response
            .headers()
            .get(WWW_AUTHENTICATE)
            .ok_or_else(|| {
                CheckError::Challenge("401 response without WWW-Authenticate header".to_string())
            })?
            .to_str()
            .map_err(|e| CheckError::Challenge(format!("invalid WWW-Authenticate header: {e}")))?;
        AuthChallenge::parse(header)
    }
}
