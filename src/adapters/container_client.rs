//! Read-only client for the cluster management API.
//!
//! Fetches cache-manager identity and template listings. Instances are
//! constructed explicitly with their endpoint and injected where needed;
//! there is no process-wide client.

use std::time::Duration;

use async_trait::async_trait;
use futures::future;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::adapters::error::{ClientError, Result};
use crate::domain::{CacheManagerInfo, ConfigurationTemplate, TemplateSource};

/// Client for the cluster's read endpoints.
///
/// # Example
///
/// ```no_run
/// use krater::adapters::container_client::ContainerClient;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ContainerClient::new(
///     "http://localhost:11222/rest/v2",
///     Duration::from_secs(30),
/// )?;
/// let managers = client.list_cache_managers().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ContainerClient {
    endpoint: String,
    http: reqwest::Client,
}

impl ContainerClient {
    /// Create a client for the given REST endpoint, e.g.
    /// `http://localhost:11222/rest/v2`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an http(s) URL or the HTTP
    /// client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into();
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ClientError::InvalidUrl(format!(
                "endpoint must start with http:// or https://, got: {}",
                endpoint
            )));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.strip_prefix('/').unwrap_or(path))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "GET");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Names of the cluster's cache managers.
    pub async fn cache_manager_names(&self) -> Result<Vec<String>> {
        self.get_json("server/cache-managers/").await
    }

    /// Full snapshots of every cache manager: one listing request, then all
    /// detail fetches concurrently. Any single failure fails the whole
    /// call; there is no partial-list result.
    pub async fn list_cache_managers(&self) -> Result<Vec<CacheManagerInfo>> {
        let names = self.cache_manager_names().await?;
        future::try_join_all(names.iter().map(|name| self.cache_manager(name))).await
    }

    /// One cache manager's snapshot.
    pub async fn cache_manager(&self, name: &str) -> Result<CacheManagerInfo> {
        self.get_json(&format!("cache-managers/{}", urlencoding::encode(name)))
            .await
    }

    /// The configuration templates a container offers, by name.
    pub async fn configuration_templates(
        &self,
        container: &str,
    ) -> Result<Vec<ConfigurationTemplate>> {
        let entries: Vec<TemplateEntry> = self
            .get_json(&format!(
                "cache-managers/{}/cache-configs/templates",
                urlencoding::encode(container)
            ))
            .await?;
        Ok(entries
            .into_iter()
            .map(|entry| ConfigurationTemplate { name: entry.name })
            .collect())
    }
}

/// Template listing entries carry more than the name; only the name is kept.
#[derive(Debug, Deserialize)]
struct TemplateEntry {
    name: String,
}

#[async_trait]
impl TemplateSource for ContainerClient {
    async fn configuration_templates(
        &self,
        container: &str,
    ) -> anyhow::Result<Vec<ConfigurationTemplate>> {
        Ok(ContainerClient::configuration_templates(self, container).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_endpoints() {
        let result = ContainerClient::new("localhost:11222", Duration::from_secs(5));
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn url_building_normalizes_slashes() {
        let client =
            ContainerClient::new("http://localhost:11222/rest/v2/", Duration::from_secs(5))
                .unwrap();
        assert_eq!(
            client.url("server/cache-managers/"),
            "http://localhost:11222/rest/v2/server/cache-managers/"
        );
        assert_eq!(
            client.url("/cache-managers/default"),
            "http://localhost:11222/rest/v2/cache-managers/default"
        );
    }
}
