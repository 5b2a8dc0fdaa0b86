//! Authentication handshake for Docker registry access
//!
//! Registries that require token auth answer the first manifest request with
//! 401 and a `WWW-Authenticate: Bearer` challenge naming a token endpoint.
//! This module parses that challenge and fetches the short-lived token.

use crate::config::AuthConfig;
use crate::error::{CheckError, Result};
use crate::output::OutputManager;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

/// Parameters of a `WWW-Authenticate: Bearer` challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthChallenge {
    pub realm: Url,
    pub service: String,
    pub scope: String,
}

/// Token returned by the challenge's realm; used for exactly one retried
/// request and never cached.
#[derive(Debug, Deserialize)]
pub struct BearerToken {
    pub token: String,
}

impl AuthChallenge {
    /// Parse a `WWW-Authenticate` header value.
    ///
    /// The value is tokenized into comma-separated `key="value"` pairs;
    /// attributes may appear in any order, and realm, service and scope must
    /// all be present.
    pub fn parse(header: &str) -> Result<Self> {
        let params_str = header.strip_prefix("Bearer ").ok_or_else(|| {
            CheckError::Challenge(format!("unsupported auth scheme in '{header}'"))
        })?;

        let mut realm = None;
        let mut service = None;
        let mut scope = None;
        for param in params_str.split(',') {
            let Some((key, value)) = param.trim().split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"');
            match key.trim() {
                "realm" => realm = Some(value),
                "service" => service = Some(value),
                "scope" => scope = Some(value),
                _ => {}
            }
        }

        let realm = realm
            .ok_or_else(|| CheckError::Challenge("challenge is missing 'realm'".to_string()))?;
        let service = service
            .ok_or_else(|| CheckError::Challenge("challenge is missing 'service'".to_string()))?;
        let scope = scope
            .ok_or_else(|| CheckError::Challenge("challenge is missing 'scope'".to_string()))?;

        let realm = Url::parse(realm)
            .map_err(|e| CheckError::Challenge(format!("invalid realm '{realm}': {e}")))?;

        Ok(Self {
            realm,
            service: service.to_string(),
            scope: scope.to_string(),
        })
    }

    /// Token endpoint for this challenge: `{realm}?service=...&scope=...`.
    pub fn token_url(&self) -> Url {
        let mut url = self.realm.clone();
        url.query_pairs_mut()
            .append_pair("service", &self.service)
            .append_pair("scope", &self.scope);
        url
    }
}

/// Fetch a bearer token from the challenge's realm, forwarding credentials as
/// Basic auth when present.
pub async fn fetch_bearer_token(
    client: &Client,
    challenge: &AuthChallenge,
    auth: &AuthConfig,
    output: &OutputManager,
) -> Result<BearerToken> {
    let url = challenge.token_url();
    output.detail(&format!("Requesting token from: {url}"));

    let mut request = client.get(url);
    if let Some((username, password)) = auth.credentials() {
        request = request.basic_auth(username, Some(password));
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CheckError::TokenFetch(format!(
            "token endpoint returned {status}"
        )));
    }

    let token: BearerToken = response
        .json()
        .await
        .map_err(|e| CheckError::TokenFetch(format!("malformed token response: {e}")))?;

    output.detail(&format!(
        "Token obtained (length: {} chars)",
        token.token.len()
    ));
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_well_formed_challenge() {
        let challenge = AuthChallenge::parse(
            "Bearer realm=\"https://auth.docker.io/token\",service=\"registry.docker.io\",scope=\"repository:library/nginx:pull\"",
        )
        .unwrap();
        assert_eq!(challenge.realm.as_str(), "https://auth.docker.io/token");
        assert_eq!(challenge.service, "registry.docker.io");
        assert_eq!(challenge.scope, "repository:library/nginx:pull");
    }

    #[test]
    fn parse_attributes_in_any_order() {
        let challenge = AuthChallenge::parse(
            "Bearer scope=\"repository:a/b:pull\", realm=\"https://auth.example.com/token\", service=\"example\"",
        )
        .unwrap();
        assert_eq!(challenge.realm.as_str(), "https://auth.example.com/token");
        assert_eq!(challenge.service, "example");
        assert_eq!(challenge.scope, "repository:a/b:pull");
    }

    #[test]
    fn reject_missing_attributes() {
        for header in [
            "Bearer service=\"x\",scope=\"y\"",
            "Bearer realm=\"https://auth.example.com/token\",scope=\"y\"",
            "Bearer realm=\"https://auth.example.com/token\",service=\"x\"",
        ] {
            assert!(matches!(
                AuthChallenge::parse(header),
                Err(CheckError::Challenge(_))
            ));
        }
    }

    #[test]
    fn reject_non_bearer_scheme() {
        assert!(matches!(
            AuthChallenge::parse("Basic realm=\"registry\""),
            Err(CheckError::Challenge(_))
        ));
    }

    #[test]
    fn reject_unparseable_realm() {
        assert!(matches!(
            AuthChallenge::parse("Bearer realm=\"not a url\",service=\"x\",scope=\"y\""),
            Err(CheckError::Challenge(_))
        ));
    }

    #[test]
    fn token_url_carries_service_and_scope() {
        let challenge = AuthChallenge::parse(
            "Bearer realm=\"https://auth.example.com/token\",service=\"example\",scope=\"repository:a/b:pull\"",
        )
        .unwrap();
        let url = challenge.token_url();
        assert_eq!(url.host_str(), Some("auth.example.com"));
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("service".to_string(), "example".to_string())));
        assert!(pairs.contains(&("scope".to_string(), "repository:a/b:pull".to_string())));
    }
}
