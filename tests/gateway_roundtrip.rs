//! End-to-end: `HttpGateway` and `BuilderSession` against the bundled form
//! service on an ephemeral port.

use formbuilder::backend::{self, BackendState};
use formbuilder::catalog::{FieldType, Property};
use formbuilder::editor::PropertyEdit;
use formbuilder::form::FormId;
use formbuilder::gateway::config::{GatewayConfig, Timeouts};
use formbuilder::gateway::http::HttpGateway;
use formbuilder::gateway::{FormGateway, GatewayError};
use formbuilder::session::{BuilderSession, Outcome};
use tokio::net::TcpListener;

const TOKEN: &str = "my-secure-api-token";

/// Start a backend and return its base URL.
async fn spawn_backend() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(backend::serve_listener(listener, BackendState::new(TOKEN)));
    format!("http://{addr}")
}

fn gateway(base_url: &str, token: &str) -> HttpGateway {
    let config = GatewayConfig::new(base_url, token).with_timeouts(Timeouts { request_secs: 5, connect_secs: 2 });
    HttpGateway::new(&config).unwrap()
}

/// A closed port: bind, read the address, drop the listener.
async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn build_contact_form(session: &mut BuilderSession) {
    session.set_title("Contact");
    session.append_field(FieldType::Text);
    session.append_field(FieldType::TextArea);
    session.append_field(FieldType::Radio);

    session.open_for(0).unwrap();
    session.set_property(PropertyEdit::Label("Name".into())).unwrap();
    session.set_property(PropertyEdit::Required(true)).unwrap();

    session.open_for(1).unwrap();
    session.set_property_input(Property::MaxLength, "250").unwrap();

    session.open_for(2).unwrap();
    session.add_option().unwrap();
    session.add_option().unwrap();
    session.set_option(0, "Email").unwrap();
    session.set_option(1, "Phone").unwrap();
    session.close();
}

#[tokio::test]
async fn save_creates_then_updates_and_loads_back() {
    let base = spawn_backend().await;
    let gateway = gateway(&base, TOKEN);
    let mut session = BuilderSession::new();
    build_contact_form(&mut session);

    assert_eq!(session.save_with(&gateway).await, Outcome::Applied);
    assert_eq!(session.document().remote_id, Some(FormId::from(1)));
    assert_eq!(session.notifier().current().unwrap().message, "Form saved successfully");

    session.set_title("Contact us");
    assert_eq!(session.save_with(&gateway).await, Outcome::Applied);
    assert_eq!(session.notifier().current().unwrap().message, "Form updated successfully");

    let history = gateway.list_history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, FormId::from(1));
    assert_eq!(history[0].title, "Contact us");

    let saved = session.document().clone();
    let mut other = BuilderSession::new();
    assert_eq!(other.load_with(&gateway, FormId::from(1)).await, Outcome::Applied);
    assert_eq!(other.document(), &saved);
}

#[tokio::test]
async fn history_lists_every_created_form() {
    let base = spawn_backend().await;
    let gateway = gateway(&base, TOKEN);

    let mut session = BuilderSession::new();
    session.set_title("First");
    session.save_with(&gateway).await;
    session.reset();
    session.set_title("Second");
    session.save_with(&gateway).await;

    assert_eq!(session.history_with(&gateway).await, Outcome::Applied);
    let titles: Vec<&str> = session.history().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);
}

#[tokio::test]
async fn wrong_token_is_rejected() {
    let base = spawn_backend().await;
    let gateway = gateway(&base, "wrong");
    let mut session = BuilderSession::new();
    session.append_field(FieldType::Date);

    match session.save_with(&gateway).await {
        Outcome::Failed(GatewayError::Rejected { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid or missing API token");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(session.document().remote_id.is_none());
    assert!(!session.notifier().current().unwrap().success);
}

#[tokio::test]
async fn loading_unknown_form_fails_without_touching_document() {
    let base = spawn_backend().await;
    let gateway = gateway(&base, TOKEN);
    let mut session = BuilderSession::new();
    session.append_field(FieldType::File);
    let before = session.document().clone();

    let outcome = session.load_with(&gateway, FormId::new("41")).await;
    assert_eq!(
        outcome,
        Outcome::Failed(GatewayError::Rejected { status: 404, message: "Form not found".into() })
    );
    assert_eq!(session.document(), &before);
}

#[tokio::test]
async fn malformed_body_is_unprocessable() {
    let base = spawn_backend().await;
    let response = reqwest::Client::new()
        .post(format!("{base}/api/forms/save"))
        .header("Authorization", TOKEN)
        .header("Content-Type", "application/json")
        .body(r#"{"form_data": "not a list"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn unreachable_service_keeps_document() {
    let gateway = gateway(&dead_url().await, TOKEN);
    let mut session = BuilderSession::new();
    build_contact_form(&mut session);
    let before = session.document().clone();

    let outcome = session.save_with(&gateway).await;
    assert!(matches!(outcome, Outcome::Failed(GatewayError::Unreachable(_))));
    assert_eq!(session.document(), &before);

    let shown = session.notifier().current().unwrap();
    assert!(!shown.success);
    assert!(shown.message.starts_with("form service unreachable"));
}
