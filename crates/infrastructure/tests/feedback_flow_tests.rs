//! End-to-end feedback flow against a mocked backend

use std::sync::Arc;

use application::{
    ErrorSlot, FeedbackConfig, FeedbackError, FeedbackForm, FeedbackService, KeyValueStorePort,
    SubmitError,
};
use chrono::Utc;
use domain::{FEEDBACK_TOKEN_STORAGE_KEY, FeedbackCategory, FeedbackToken};
use infrastructure::{FeedbackAdapter, InMemoryStore};
use integration_navigation::{HttpNavigationClient, NavigationConfig};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    service: FeedbackService,
    store: Arc<InMemoryStore>,
    errors: Arc<ErrorSlot>,
}

fn harness(server: &MockServer) -> Harness {
    let config = NavigationConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..NavigationConfig::default()
    };
    let client = Arc::new(HttpNavigationClient::new(&config).unwrap());
    let store = Arc::new(InMemoryStore::new());
    let errors = ErrorSlot::shared();
    let service = FeedbackService::new(
        Arc::new(FeedbackAdapter::new(client)),
        store.clone(),
        Arc::clone(&errors),
        FeedbackConfig::default(),
    );
    Harness {
        service,
        store,
        errors,
    }
}

fn store_mature_token(store: &InMemoryStore, value: &str) {
    let token = FeedbackToken::new(value, Utc::now() - chrono::Duration::minutes(1));
    store
        .set(FEEDBACK_TOKEN_STORAGE_KEY, &token.to_storage().unwrap())
        .unwrap();
}

fn form() -> FeedbackForm {
    FeedbackForm {
        category: FeedbackCategory::Search,
        subject: "Missing room".to_string(),
        body: "Searching for 'MI HS 4' returns nothing.".to_string(),
        privacy_checked: true,
        deletion_requested: false,
    }
}

#[tokio::test]
async fn mature_token_is_submitted_and_cleared() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/feedback/feedback"))
        .and(body_partial_json(serde_json::json!({
            "token": "tok-mature",
            "category": "search"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_string("https://example.org/issues/7"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    store_mature_token(&h.store, "tok-mature");

    let issue = h.service.submit(&form()).await.unwrap();
    assert_eq!(issue, "https://example.org/issues/7");
    assert!(h.store.get(FEEDBACK_TOKEN_STORAGE_KEY).unwrap().is_none());
    assert!(!h.errors.is_set());
}

#[tokio::test]
async fn rate_limited_token_request_blocks_send() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/feedback/get_token"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    assert!(h.service.ensure_token().await.is_err());
    assert!(h.service.is_send_blocked());
    assert_eq!(
        h.errors.get().as_deref(),
        Some("Too many requests. Please wait a while before sending more feedback.")
    );
    assert!(matches!(
        h.service.submit(&form()).await,
        Err(FeedbackError::SendBlocked)
    ));
}

#[tokio::test]
async fn fresh_token_is_stored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/feedback/get_token"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_string(r#"{"token": "tok-new", "created_at": 1772366400}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    let token = h.service.ensure_token().await.unwrap();
    assert_eq!(token.token(), "tok-new");

    // Reused without another request
    let again = h.service.ensure_token().await.unwrap();
    assert_eq!(again, token);
    assert!(h.store.get(FEEDBACK_TOKEN_STORAGE_KEY).unwrap().is_some());
}

#[tokio::test]
async fn rejected_token_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/feedback/feedback"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let h = harness(&server);
    store_mature_token(&h.store, "tok-stale");

    let err = h.service.submit(&form()).await.unwrap_err();
    assert!(matches!(err, FeedbackError::Submit(SubmitError::TokenRejected)));
    assert!(h.store.get(FEEDBACK_TOKEN_STORAGE_KEY).unwrap().is_none());
}
