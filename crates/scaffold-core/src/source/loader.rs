//! Reading structure files from disk or over HTTP

use super::StructureSource;
use crate::error::{Result, ScaffoldError};
use tokio::fs;
use url::Url;

/// User agent sent with remote requests
pub const USER_AGENT: &str = concat!("scaffold/", env!("CARGO_PKG_VERSION"));

/// Loads the raw lines of a structure source
pub struct StructureLoader {
    client: reqwest::Client,
}

impl StructureLoader {
    /// Create a loader with a custom user agent
    pub fn new(user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Read every line of `source`, blank lines included so line numbers stay accurate
    pub async fn load(&self, source: &StructureSource) -> Result<Vec<String>> {
        let content = match source {
            StructureSource::Local(path) => {
                if !path.is_file() {
                    return Err(ScaffoldError::MissingStructureSource {
                        location: source.to_string(),
                        reason: "no such file".to_string(),
                    });
                }
                fs::read_to_string(path).await.map_err(|e| {
                    ScaffoldError::MissingStructureSource {
                        location: source.to_string(),
                        reason: e.to_string(),
                    }
                })?
            }
            StructureSource::Remote(url) => self.fetch(url).await?,
        };

        Ok(split_lines(&content))
    }

    async fn fetch(&self, url: &Url) -> Result<String> {
        let missing = |reason: String| ScaffoldError::MissingStructureSource {
            location: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| missing(e.to_string()))?;

        if !response.status().is_success() {
            return Err(missing(format!("HTTP {}", response.status())));
        }

        response.text().await.map_err(|e| missing(e.to_string()))
    }
}

impl Default for StructureLoader {
    fn default() -> Self {
        Self::new(USER_AGENT)
    }
}

/// Split file content into lines, dropping a leading byte-order mark
fn split_lines(content: &str) -> Vec<String> {
    content
        .strip_prefix('\u{feff}')
        .unwrap_or(content)
        .lines()
        .map(str::to_string)
        .collect()
}
