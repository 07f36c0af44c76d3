use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod validation;

/// A named, server-stored cache configuration usable in place of an inline
/// document. Templates are identified by name; the listing order is the
/// server's and carries no meaning.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ConfigurationTemplate {
    pub name: String,
}

/// Read-only snapshot of one cache manager, as reported by the cluster
/// management API. Fetched fresh on every console invocation, never cached.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheManagerInfo {
    pub name: String,
    pub physical_addresses: Vec<String>,
    pub coordinator: bool,
    pub cluster_name: String,
    pub cache_manager_status: String,
    pub cluster_size: u32,
    pub defined_caches: Vec<String>,
    pub cache_configuration_names: Vec<String>,
}

/// Outcome of a remote cache-creation call.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

/// The operator's configuration input. Exactly one source at a time:
/// holding a template selection and an inline document simultaneously is
/// unrepresentable, and the workflow rejects attempts to get there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// No template selected, inline editor closed.
    Unset,
    /// A configuration template selected by name.
    Template(String),
    /// The inline editor is open with the given raw text (possibly empty).
    Document(String),
}

/// Source of configuration templates for a container.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn configuration_templates(
        &self,
        container: &str,
    ) -> anyhow::Result<Vec<ConfigurationTemplate>>;
}

/// Remote cache-creation operations. Implementations return an
/// [`ActionResponse`] for requests the server answered (success or not);
/// transport failures are errors.
#[async_trait]
pub trait CacheWriter: Send + Sync {
    async fn create_by_template(
        &self,
        cache_name: &str,
        template: &str,
    ) -> anyhow::Result<ActionResponse>;

    async fn create_with_document(
        &self,
        cache_name: &str,
        document: &str,
        format: validation::DocumentFormat,
    ) -> anyhow::Result<ActionResponse>;
}

/// Presentation channel for creation outcomes and fetch errors. The
/// workflow only produces these values; rendering is the implementor's
/// concern.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, response: &ActionResponse);
    fn notify_error(&self, message: &str);
}

/// Invoked exactly once, on successful creation, to leave the workflow.
pub trait NavigationSignal: Send + Sync {
    fn navigate_home(&self);
}
