//! End-to-end creation workflow tests: real REST adapters wired into the
//! workflow, with wiremock standing in for the cluster.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use krater::adapters::container_client::ContainerClient;
use krater::adapters::provisioner::RestCacheWriter;
use krater::application::create_cache::{CreateCacheWorkflow, SubmitOutcome, WorkflowPhase};
use krater::domain::{ActionResponse, InputMode, NavigationSignal, NotificationSink};

#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<ActionResponse>>,
    errors: Mutex<Vec<String>>,
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, response: &ActionResponse) {
        self.messages.lock().unwrap().push(response.clone());
    }

    fn notify_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
struct CountingNavigator {
    fired: AtomicUsize,
}

impl NavigationSignal for CountingNavigator {
    fn navigate_home(&self) {
        self.fired.fetch_add(1, Ordering::SeqCst);
    }
}

fn workflow_against(
    server: &MockServer,
) -> (
    CreateCacheWorkflow,
    Arc<RecordingNotifier>,
    Arc<CountingNavigator>,
) {
    let client = ContainerClient::new(server.uri(), Duration::from_secs(5)).unwrap();
    let writer = RestCacheWriter::new(server.uri(), Duration::from_secs(5)).unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(CountingNavigator::default());
    let workflow = CreateCacheWorkflow::new(
        "default",
        Arc::new(client),
        Arc::new(writer),
        notifier.clone(),
        navigator.clone(),
    );
    (workflow, notifier, navigator)
}

fn templates_listing() -> Mock {
    Mock::given(method("GET"))
        .and(path("/cache-managers/default/cache-configs/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "org.infinispan.DIST_SYNC"}
        ])))
}

#[tokio::test]
async fn creates_a_cache_from_a_template() {
    let server = MockServer::start().await;
    templates_listing().mount(&server).await;
    Mock::given(method("POST"))
        .and(path("/caches/sessions"))
        .and(query_param("template", "org.infinispan.DIST_SYNC"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (mut workflow, notifier, navigator) = workflow_against(&server);
    workflow.load_templates().await;
    assert_eq!(workflow.templates().len(), 1);

    workflow.select_template("org.infinispan.DIST_SYNC").unwrap();
    let outcome = workflow.submit("sessions").await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Created { .. }));
    assert_eq!(workflow.phase(), WorkflowPhase::Terminated);
    assert_eq!(navigator.fired.load(Ordering::SeqCst), 1);
    assert_eq!(notifier.messages.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn creates_a_cache_from_an_inline_json_document() {
    let server = MockServer::start().await;
    // No templates mock: the fetch fails and the workflow degrades to the
    // inline-document path.
    Mock::given(method("POST"))
        .and(path("/caches/sessions"))
        .and(header("Content-Type", "application/json"))
        .and(body_string(r#"{"distributed-cache":{}}"#))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (mut workflow, notifier, _navigator) = workflow_against(&server);
    workflow.load_templates().await;
    assert!(workflow.templates().is_empty());
    assert_eq!(notifier.errors.lock().unwrap().len(), 1);
    assert_eq!(workflow.phase(), WorkflowPhase::Ready);

    workflow.open_document_panel();
    workflow.set_document_text("  {\"distributed-cache\":{}}  ");
    let outcome = workflow.submit("  sessions  ").await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Created { .. }));
}

#[tokio::test]
async fn xml_documents_are_posted_as_xml() {
    let server = MockServer::start().await;
    templates_listing().mount(&server).await;
    Mock::given(method("POST"))
        .and(path("/caches/invoices"))
        .and(header("Content-Type", "application/xml"))
        .and(body_string("<infinispan><cache-container/></infinispan>"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (mut workflow, _notifier, _navigator) = workflow_against(&server);
    workflow.load_templates().await;
    workflow.open_document_panel();
    workflow.set_document_text("<infinispan><cache-container/></infinispan>");
    let outcome = workflow.submit("invoices").await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Created { .. }));
}

#[tokio::test]
async fn server_refusal_keeps_the_workflow_alive() {
    let server = MockServer::start().await;
    templates_listing().mount(&server).await;
    Mock::given(method("POST"))
        .and(path("/caches/users"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("ISPN000507: cache already exists"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (mut workflow, notifier, navigator) = workflow_against(&server);
    workflow.load_templates().await;
    workflow.select_template("org.infinispan.DIST_SYNC").unwrap();

    let outcome = workflow.submit("users").await.unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            message: "ISPN000507: cache already exists".to_string(),
        }
    );
    // Everything the operator entered is still in place.
    assert_eq!(workflow.phase(), WorkflowPhase::TemplateMode);
    assert_eq!(
        *workflow.mode(),
        InputMode::Template("org.infinispan.DIST_SYNC".to_string())
    );
    assert_eq!(navigator.fired.load(Ordering::SeqCst), 0);

    let messages = notifier.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(!messages[0].success);
    assert_eq!(messages[0].message, "ISPN000507: cache already exists");
}

#[tokio::test]
async fn validation_failure_never_reaches_the_network() {
    let server = MockServer::start().await;
    templates_listing().mount(&server).await;
    // Any POST would be an unmatched request; expect(0) makes it explicit.
    Mock::given(method("POST"))
        .and(path("/caches/sessions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (mut workflow, _notifier, _navigator) = workflow_against(&server);
    workflow.load_templates().await;
    workflow.open_document_panel();
    workflow.set_document_text("not a configuration");

    let outcome = workflow.submit("sessions").await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::ValidationFailed { .. }));
}
