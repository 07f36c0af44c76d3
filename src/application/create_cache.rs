//! Cache-creation workflow.
//!
//! One [`CreateCacheWorkflow`] instance covers one visit to the creation
//! form: load the container's templates once, let the operator pick a
//! template or author an inline document (never both), then submit. The
//! workflow owns all mutable state; collaborators are reached through the
//! ports in [`crate::domain`].

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::validation::{self, FieldValidity};
use crate::domain::{
    CacheWriter, ConfigurationTemplate, InputMode, NavigationSignal, NotificationSink,
    TemplateSource,
};

/// Where a workflow instance currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    /// No input mode chosen yet.
    Ready,
    /// A template is selected.
    TemplateMode,
    /// The inline document editor is open.
    DocumentMode,
    /// A cache was created; the workflow is over.
    Terminated,
}

/// Violations of the workflow's state invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// Template selection is unavailable while the inline editor is open.
    #[error("cannot select a template while the configuration editor is open")]
    DocumentPanelOpen,
    /// The workflow already created its cache.
    #[error("the creation workflow has already completed")]
    Terminated,
}

/// What a submission attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation rejected the input; nothing was sent.
    ValidationFailed {
        name: FieldValidity,
        configuration: FieldValidity,
    },
    /// The server created the cache.
    Created { message: String },
    /// The server refused, or the call failed in transport. All entered
    /// state is preserved for correction and resubmission.
    Rejected { message: String },
}

pub struct CreateCacheWorkflow {
    container: String,
    templates: Vec<ConfigurationTemplate>,
    mode: InputMode,
    name_validity: FieldValidity,
    config_validity: FieldValidity,
    terminated: bool,
    source: Arc<dyn TemplateSource>,
    writer: Arc<dyn CacheWriter>,
    notifier: Arc<dyn NotificationSink>,
    navigator: Arc<dyn NavigationSignal>,
}

impl CreateCacheWorkflow {
    pub fn new(
        container: impl Into<String>,
        source: Arc<dyn TemplateSource>,
        writer: Arc<dyn CacheWriter>,
        notifier: Arc<dyn NotificationSink>,
        navigator: Arc<dyn NavigationSignal>,
    ) -> Self {
        Self {
            container: container.into(),
            templates: Vec::new(),
            mode: InputMode::Unset,
            name_validity: FieldValidity::Unvalidated,
            config_validity: FieldValidity::Unvalidated,
            terminated: false,
            source,
            writer,
            notifier,
            navigator,
        }
    }

    /// Fetch the container's configuration templates. Called once per
    /// workflow instance. On failure the error is surfaced through the
    /// notification sink and the list stays empty: the workflow remains
    /// usable, the operator just has to supply an inline document.
    pub async fn load_templates(&mut self) {
        match self.source.configuration_templates(&self.container).await {
            Ok(templates) => {
                debug!(
                    container = %self.container,
                    count = templates.len(),
                    "loaded configuration templates"
                );
                self.templates = templates;
            }
            Err(err) => {
                warn!(container = %self.container, error = %err, "template fetch failed");
                self.notifier.notify_error(&err.to_string());
            }
        }
    }

    pub fn templates(&self) -> &[ConfigurationTemplate] {
        &self.templates
    }

    pub fn mode(&self) -> &InputMode {
        &self.mode
    }

    pub fn name_validity(&self) -> FieldValidity {
        self.name_validity
    }

    pub fn configuration_validity(&self) -> FieldValidity {
        self.config_validity
    }

    pub fn phase(&self) -> WorkflowPhase {
        if self.terminated {
            return WorkflowPhase::Terminated;
        }
        match self.mode {
            InputMode::Unset => WorkflowPhase::Ready,
            InputMode::Template(_) => WorkflowPhase::TemplateMode,
            InputMode::Document(_) => WorkflowPhase::DocumentMode,
        }
    }

    /// Select a configuration template by name. Rejected while the inline
    /// editor is open: the two input sources are mutually exclusive and the
    /// invariant lives here, not in whatever renders the form.
    pub fn select_template(&mut self, name: &str) -> Result<(), WorkflowError> {
        if matches!(self.mode, InputMode::Document(_)) {
            return Err(WorkflowError::DocumentPanelOpen);
        }
        self.mode = InputMode::Template(name.to_string());
        Ok(())
    }

    pub fn clear_template_selection(&mut self) {
        if matches!(self.mode, InputMode::Template(_)) {
            self.mode = InputMode::Unset;
        }
    }

    /// Open the inline document editor. Any template selection is cleared;
    /// selection stays unavailable until the editor is closed again.
    pub fn open_document_panel(&mut self) {
        if !matches!(self.mode, InputMode::Document(_)) {
            self.mode = InputMode::Document(String::new());
        }
    }

    pub fn close_document_panel(&mut self) {
        if matches!(self.mode, InputMode::Document(_)) {
            self.mode = InputMode::Unset;
        }
    }

    /// Replace the inline document text. Each edit optimistically marks the
    /// configuration field valid; the next submit re-validates for real.
    pub fn set_document_text(&mut self, text: &str) {
        if let InputMode::Document(document) = &mut self.mode {
            *document = text.to_string();
            self.config_validity = FieldValidity::Valid;
        }
    }

    /// Validate and, if both fields pass, dispatch exactly one remote
    /// creation call. Validation failure returns without touching the
    /// network. Remote success notifies, fires the navigation signal once,
    /// and terminates the workflow; remote failure leaves every piece of
    /// entered state in place for resubmission.
    pub async fn submit(&mut self, name: &str) -> Result<SubmitOutcome, WorkflowError> {
        if self.terminated {
            return Err(WorkflowError::Terminated);
        }

        self.name_validity = validation::validate_name(name);
        self.config_validity = validation::validate_configuration(&self.mode);
        if self.name_validity == FieldValidity::Invalid
            || self.config_validity == FieldValidity::Invalid
        {
            return Ok(SubmitOutcome::ValidationFailed {
                name: self.name_validity,
                configuration: self.config_validity,
            });
        }

        let cache_name = name.trim();
        let response = match &self.mode {
            InputMode::Template(template) => {
                self.writer.create_by_template(cache_name, template).await
            }
            InputMode::Document(text) => {
                let document = text.trim();
                let format = validation::detect_format(document);
                self.writer
                    .create_with_document(cache_name, document, format)
                    .await
            }
            // Unreachable in practice: an unset mode never validates.
            InputMode::Unset => {
                return Ok(SubmitOutcome::ValidationFailed {
                    name: self.name_validity,
                    configuration: FieldValidity::Invalid,
                })
            }
        };

        match response {
            Ok(response) if response.success => {
                self.terminated = true;
                self.navigator.navigate_home();
                self.notifier.notify(&response);
                Ok(SubmitOutcome::Created {
                    message: response.message,
                })
            }
            Ok(response) => {
                self.notifier.notify(&response);
                Ok(SubmitOutcome::Rejected {
                    message: response.message,
                })
            }
            Err(err) => {
                warn!(cache = %cache_name, error = %err, "cache creation call failed");
                let message = err.to_string();
                self.notifier.notify_error(&message);
                Ok(SubmitOutcome::Rejected { message })
            }
        }
    }
}
