use super::*;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode as AxumStatus, routing::get, routing::post, Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex};

#[derive(Clone)]
struct CreateServerState {
    tx: Arc<Mutex<Option<oneshot::Sender<serde_json::Value>>>>,
}

async fn bind_local() -> (TcpListener, String) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    (listener, format!("http://{addr}"))
}

async fn spawn_directory_server(customers: serde_json::Value) -> String {
    let (listener, url) = bind_local().await;
    let app = Router::new().route(
        "/api/customers",
        get(move || {
            let customers = customers.clone();
            async move { Json(customers) }
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    url
}

async fn spawn_failing_directory_server() -> String {
    let (listener, url) = bind_local().await;
    let app = Router::new().route(
        "/api/customers",
        get(|| async {
            (
                AxumStatus::INTERNAL_SERVER_ERROR,
                Json(json!({"code": "500", "message": "Server error"})),
            )
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    url
}

async fn spawn_unstructured_failure_server() -> String {
    let (listener, url) = bind_local().await;
    let app = Router::new().route(
        "/api/customers",
        get(|| async { (AxumStatus::BAD_GATEWAY, "upstream unavailable") }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    url
}

async fn handle_create(
    State(state): State<CreateServerState>,
    Json(payload): Json<serde_json::Value>,
) -> AxumStatus {
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send(payload);
    }
    AxumStatus::CREATED
}

async fn spawn_create_server() -> (String, oneshot::Receiver<serde_json::Value>) {
    let (listener, url) = bind_local().await;
    let (tx, rx) = oneshot::channel();
    let state = CreateServerState {
        tx: Arc::new(Mutex::new(Some(tx))),
    };
    let app = Router::new()
        .route("/api/customers", post(handle_create))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (url, rx)
}

async fn spawn_rejecting_create_server() -> String {
    let (listener, url) = bind_local().await;
    let app = Router::new().route(
        "/api/customers",
        post(|| async {
            (
                AxumStatus::UNPROCESSABLE_ENTITY,
                Json(json!({"code": "422", "message": "email already registered"})),
            )
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    url
}

fn draft_with(first: &str, last: &str, business: &str, email: &str) -> CustomerDraft {
    let mut draft = CustomerDraft::new();
    draft.open();
    draft.first_name = first.to_string();
    draft.last_name = last.to_string();
    draft.business_name = business.to_string();
    draft.email = email.to_string();
    draft
}

#[tokio::test]
async fn list_customers_preserves_server_order() {
    let url = spawn_directory_server(json!([
        {"firstName": "Jane", "lastName": "Doe", "email": "jane@doe.com"},
        {"firstName": "Ada", "lastName": "Lovelace", "email": "ada@calc.org", "businessName": "Analytical Engines"},
        {"firstName": "Bob", "lastName": "Smith", "email": "bob@smith.net"},
    ]))
    .await;

    let api = CustomerApi::new(&url).expect("api");
    let customers = api.list_customers().await.expect("list");

    let emails: Vec<&str> = customers.iter().map(|c| c.email.as_str()).collect();
    assert_eq!(emails, ["jane@doe.com", "ada@calc.org", "bob@smith.net"]);
    assert_eq!(customers[1].business_name.as_deref(), Some("Analytical Engines"));
    assert_eq!(customers[1].display_name(), "Analytical Engines");
    assert_eq!(customers[0].display_name(), "Jane Doe");
}

#[tokio::test]
async fn list_customers_surfaces_structured_error_body() {
    let url = spawn_failing_directory_server().await;
    let api = CustomerApi::new(&url).expect("api");

    let err = api.list_customers().await.expect_err("must fail");
    match &err {
        ClientError::Api(body) => {
            assert_eq!(body.code, "500");
            assert_eq!(body.message, "Server error");
        }
        other => panic!("expected structured api error, got {other:?}"),
    }
    assert_eq!(err.user_message(), "Server error");
}

#[tokio::test]
async fn list_customers_reports_unexpected_status_without_error_body() {
    let url = spawn_unstructured_failure_server().await;
    let api = CustomerApi::new(&url).expect("api");

    let err = api.list_customers().await.expect_err("must fail");
    assert!(
        matches!(err, ClientError::UnexpectedStatus(status) if status == StatusCode::BAD_GATEWAY),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn create_customer_posts_camel_case_payload() {
    let (url, payload_rx) = spawn_create_server().await;
    let api = CustomerApi::new(&url).expect("api");

    let payload = draft_with("Jane", "Doe", "Acme", "jane@doe.com")
        .submit_payload()
        .expect("submittable draft");
    api.create_customer(&payload).await.expect("create");

    let body = payload_rx.await.expect("captured body");
    assert_eq!(body["firstName"], "Jane");
    assert_eq!(body["lastName"], "Doe");
    assert_eq!(body["email"], "jane@doe.com");
    assert_eq!(body["businessName"], "Acme");
}

#[tokio::test]
async fn create_customer_omits_blank_business_name() {
    let (url, payload_rx) = spawn_create_server().await;
    let api = CustomerApi::new(&url).expect("api");

    let payload = draft_with("Jane", "Doe", "   ", "jane@doe.com")
        .submit_payload()
        .expect("submittable draft");
    api.create_customer(&payload).await.expect("create");

    let body = payload_rx.await.expect("captured body");
    assert!(
        body.get("businessName").is_none(),
        "blank business name must be omitted from the wire payload: {body}"
    );
}

#[tokio::test]
async fn create_customer_surfaces_api_failure() {
    let url = spawn_rejecting_create_server().await;
    let api = CustomerApi::new(&url).expect("api");

    let payload = draft_with("Jane", "Doe", "", "jane@doe.com")
        .submit_payload()
        .expect("submittable draft");
    let err = api.create_customer(&payload).await.expect_err("must fail");
    assert_eq!(err.user_message(), "email already registered");
}

#[test]
fn email_shape_check_matrix() {
    assert!(is_valid_email("jane@doe.com"));
    assert!(is_valid_email("j.doe+crm@mail.example.org"));

    // Missing TLD is the canonical rejection.
    assert!(!is_valid_email("bob@example"));
    assert!(!is_valid_email(""));
    assert!(!is_valid_email("janedoe.com"));
    assert!(!is_valid_email("@doe.com"));
    assert!(!is_valid_email("jane@@doe.com"));
    assert!(!is_valid_email("jane@.com"));
    assert!(!is_valid_email("jane@doe."));
    assert!(!is_valid_email("jane doe@doe.com"));
}

#[test]
fn email_validation_sets_and_clears_helper_text() {
    let mut draft = draft_with("Jane", "Doe", "", "bob@example");
    assert!(!draft.validate_email());
    assert_eq!(draft.email_error(), Some(EMAIL_HELPER_TEXT));

    draft.email = "bob@example.com".to_string();
    assert!(draft.validate_email());
    assert_eq!(draft.email_error(), None);
}

#[test]
fn email_edited_clears_error_when_field_emptied() {
    let mut draft = draft_with("Jane", "Doe", "", "bob@example");
    draft.email_edited();
    assert_eq!(draft.email_error(), Some(EMAIL_HELPER_TEXT));

    draft.email.clear();
    draft.email_edited();
    assert_eq!(draft.email_error(), None);
}

#[test]
fn draft_open_and_close_reset_all_fields() {
    let mut draft = draft_with("Jane", "Doe", "Acme", "bob@example");
    draft.validate_email();
    assert!(draft.is_open());
    assert!(draft.email_error().is_some());

    draft.close();
    assert!(!draft.is_open());
    assert_eq!(draft.first_name, "");
    assert_eq!(draft.last_name, "");
    assert_eq!(draft.business_name, "");
    assert_eq!(draft.email, "");
    assert_eq!(draft.email_error(), None);

    draft.open();
    assert!(draft.is_open());
    assert_eq!(draft.email, "");
    assert_eq!(draft.email_error(), None);
}

#[test]
fn submit_gating_requires_names_and_valid_email() {
    assert!(draft_with("Jane", "Doe", "", "jane@doe.com").can_submit());
    assert!(draft_with("Jane", "Doe", "Acme", "jane@doe.com").can_submit());

    assert!(!draft_with("", "Doe", "", "jane@doe.com").can_submit());
    assert!(!draft_with("Jane", "", "", "jane@doe.com").can_submit());
    assert!(!draft_with("   ", "Doe", "", "jane@doe.com").can_submit());
    assert!(!draft_with("Jane", "Doe", "", "bob@example").can_submit());
    assert!(!draft_with("Jane", "Doe", "", "").can_submit());
}

#[test]
fn submit_payload_trims_and_revalidates() {
    let mut draft = draft_with("  Jane ", " Doe ", "", "  jane@doe.com ");
    let payload = draft.submit_payload().expect("submittable");
    assert_eq!(payload.first_name, "Jane");
    assert_eq!(payload.last_name, "Doe");
    assert_eq!(payload.email, "jane@doe.com");
    assert_eq!(payload.business_name, None);

    let mut invalid = draft_with("Jane", "Doe", "", "bob@example");
    assert!(invalid.submit_payload().is_none());
    assert_eq!(invalid.email_error(), Some(EMAIL_HELPER_TEXT));
    assert!(invalid.is_open());
}

#[test]
fn directory_state_keeps_stale_data_through_a_failed_revalidation() {
    let mut state = DirectoryState::new();
    assert_eq!(state.count_label(), "0 Customers");
    assert!(state.customers().is_none());

    state.fetch_started();
    assert!(state.is_loading());

    let loaded = vec![
        Customer {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@doe.com".to_string(),
            business_name: None,
        },
        Customer {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@calc.org".to_string(),
            business_name: None,
        },
        Customer {
            first_name: "Bob".to_string(),
            last_name: "Smith".to_string(),
            email: "bob@smith.net".to_string(),
            business_name: None,
        },
    ];
    state.fetch_succeeded(loaded);
    assert!(!state.is_loading());
    assert_eq!(state.count_label(), "3 Customers");
    assert!(state.error().is_none());

    state.fetch_started();
    state.fetch_failed("Server error");
    assert!(!state.is_loading());
    assert_eq!(state.error(), Some("Server error"));
    // Stale data stays in memory; the renderer just prefers the error view.
    assert_eq!(state.customers().map(<[Customer]>::len), Some(3));

    state.fetch_succeeded(Vec::new());
    assert!(state.error().is_none());
    assert_eq!(state.count_label(), "0 Customers");
}

#[test]
fn count_label_uses_singular_for_single_entry() {
    let mut state = DirectoryState::new();
    state.fetch_succeeded(vec![Customer {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: "jane@doe.com".to_string(),
        business_name: None,
    }]);
    assert_eq!(state.count_label(), "1 Customer");
}
