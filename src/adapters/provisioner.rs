//! Write-side client: cache creation against the cluster management API.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::adapters::error::{ClientError, Result};
use crate::domain::validation::DocumentFormat;
use crate::domain::{ActionResponse, CacheWriter};

/// REST implementation of [`CacheWriter`].
///
/// A request the server answered becomes an [`ActionResponse`] whether it
/// succeeded or not; only transport failures surface as errors.
#[derive(Debug, Clone)]
pub struct RestCacheWriter {
    endpoint: String,
    http: reqwest::Client,
}

impl RestCacheWriter {
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

    async fn action_response(cache_name: &str, response: reqwest::Response) -> ActionResponse {
        let status = response.status();
        if status.is_success() {
            ActionResponse {
                success: true,
                message: format!("Cache {} created", cache_name),
            }
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                format!(
                    "Cache {} could not be created (status {})",
                    cache_name,
                    status.as_u16()
                )
            } else {
                body
            };
            ActionResponse {
                success: false,
                message,
            }
        }
    }
}

#[async_trait]
impl CacheWriter for RestCacheWriter {
    async fn create_by_template(
        &self,
        cache_name: &str,
        template: &str,
    ) -> anyhow::Result<ActionResponse> {
        let url = format!(
            "{}/caches/{}?template={}",
            self.endpoint,
            urlencoding::encode(cache_name),
            urlencoding::encode(template)
        );
        debug!(%url, "POST create by template");

        let response = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(ClientError::Http)?;
        Ok(Self::action_response(cache_name, response).await)
    }

    async fn create_with_document(
        &self,
        cache_name: &str,
        document: &str,
        format: DocumentFormat,
    ) -> anyhow::Result<ActionResponse> {
        let content_type = match format {
            DocumentFormat::Json => "application/json",
            DocumentFormat::Xml => "application/xml",
            // Unreachable through the workflow, which validates first.
            DocumentFormat::Unrecognized => "text/plain",
        };
        let url = format!("{}/caches/{}", self.endpoint, urlencoding::encode(cache_name));
        debug!(%url, content_type, "POST create with configuration");

        let response = self
            .http
            .post(&url)
            .header("Content-Type", content_type)
            .body(document.to_string())
            .send()
            .await
            .map_err(ClientError::Http)?;
        Ok(Self::action_response(cache_name, response).await)
    }
}
