//! Image reference parsing

use crate::error::{CheckError, Result};
use std::fmt;
use std::str::FromStr;

/// A parsed image reference: optional registry host, repository path, tag.
///
/// Immutable once constructed. `registry` is `None` for the default public
/// registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub registry: Option<String>,
    pub repository: String,
    pub tag: String,
}

impl ImageReference {
    /// Default registry host used when the reference does not name one.
    pub const DEFAULT_REGISTRY: &'static str = "registry-1.docker.io";

    /// Parse an image reference string.
    ///
    /// Examples:
    /// - `nginx:latest` -> registry-1.docker.io, `nginx`
    /// - `myuser/myapp:v1` -> registry-1.docker.io, `myuser/myapp`
    /// - `ghcr.io/org/app:v1.0` -> ghcr.io, `org/app`
    /// - `localhost:5000/ns/app:dev` -> localhost:5000, `ns/app`
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CheckError::Reference("empty image reference".to_string()));
        }

        // The tag separator is the last ':' and must come after the last '/',
        // so a registry port (host:5000/...) is never mistaken for a tag.
        let colon = input.rfind(':').ok_or_else(|| {
            CheckError::Reference(format!(
                "expected 'image:tag' or 'registry/namespace/image:tag', got '{input}'"
            ))
        })?;
        if input[colon..].contains('/') {
            return Err(CheckError::Reference(format!("missing tag in '{input}'")));
        }

        let (name, tag) = (&input[..colon], &input[colon + 1..]);
        if tag.is_empty() {
            return Err(CheckError::Reference(format!("empty tag in '{input}'")));
        }
        if name.is_empty() {
            return Err(CheckError::Reference(format!("empty repository in '{input}'")));
        }

        // Two or more '/' separators mean the first segment names the registry.
        let (registry, repository) = match name.split_once('/') {
            Some((host, rest)) if rest.contains('/') => {
                (Some(host.to_string()), rest.to_string())
            }
            _ => (None, name.to_string()),
        };

        if repository.is_empty() {
            return Err(CheckError::Reference(format!("empty repository in '{input}'")));
        }
        // A ':' is only legal inside an explicit registry-host segment.
        if repository.contains(':') {
            return Err(CheckError::Reference(format!(
                "ambiguous ':' in repository '{repository}'"
            )));
        }

        Ok(Self {
            registry,
            repository,
            tag: tag.to_string(),
        })
    }

    /// Registry host this reference resolves to.
    pub fn host(&self) -> &str {
        self.registry.as_deref().unwrap_or(Self::DEFAULT_REGISTRY)
    }
}

impl FromStr for ImageReference {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.host(), self.repository, self.tag)
    }
}
