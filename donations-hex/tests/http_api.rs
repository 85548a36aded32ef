//! Integration tests for the HTTP surface.
//!
//! These drive the full router (CORS, tracing, JSON handling) with
//! `tower::ServiceExt::oneshot` against a scripted gateway.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use donations_hex::{DonationService, inbound::HttpServer};
use donations_types::{
    DonationPolicy, GatewayError, NewPaymentIntent, PaymentGateway, PaymentIntent,
    PaymentIntentId,
};

/// Gateway double; the call log is shared so tests can inspect it after the
/// gateway has moved into the server.
#[derive(Clone)]
struct ScriptedGateway {
    outcome: Result<PaymentIntent, GatewayError>,
    calls: Arc<Mutex<Vec<NewPaymentIntent>>>,
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn create_payment_intent(
        &self,
        intent: NewPaymentIntent,
    ) -> Result<PaymentIntent, GatewayError> {
        self.calls.lock().unwrap().push(intent);
        self.outcome.clone()
    }
}

fn create_test_app(
    outcome: Result<PaymentIntent, GatewayError>,
) -> (axum::Router, Arc<Mutex<Vec<NewPaymentIntent>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let gateway = ScriptedGateway {
        outcome,
        calls: calls.clone(),
    };
    let server = HttpServer::new(DonationService::new(gateway, DonationPolicy::default()));
    (server.router(), calls)
}

fn created(id: &str, client_secret: &str) -> Result<PaymentIntent, GatewayError> {
    Ok(PaymentIntent {
        id: PaymentIntentId::new(id),
        client_secret: client_secret.to_string(),
        status: Some("requires_payment_method".to_string()),
    })
}

fn create_intent_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/create-payment-intent")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_on_root() {
    let (app, _calls) = create_test_app(created("pi_123", "secret_abc"));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["status"], "Compel Payment Server Running");

    let timestamp = json["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert!(timestamp.ends_with('Z'));
}

#[tokio::test]
async fn test_health_alias() {
    let (app, _calls) = create_test_app(Err(GatewayError::Transport("down".into())));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    // Health never depends on the gateway.
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_metered_router_without_meter_provider() {
    // No global MeterProvider is installed in tests, so the metrics layer
    // records into a no-op meter and must not change responses.
    let (app, calls) = create_test_app(created("pi_123", "secret_abc"));

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/unknown").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(create_intent_request(r#"{"amount": 500}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_payment_intent_success() {
    let (app, calls) = create_test_app(created("pi_123", "secret_abc"));

    let response = app
        .oneshot(create_intent_request(r#"{"amount": 500}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        serde_json::json!({ "clientSecret": "secret_abc", "paymentIntentId": "pi_123" })
    );

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].amount.amount(), 500);
    assert_eq!(calls[0].amount.currency().code(), "gbp");
}

#[tokio::test]
async fn test_fractional_amount_is_rounded() {
    let (app, calls) = create_test_app(created("pi_123", "secret_abc"));

    let response = app
        .oneshot(create_intent_request(r#"{"amount": 1050.6}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(calls.lock().unwrap()[0].amount.amount(), 1051);
}

#[tokio::test]
async fn test_numeric_string_amount_is_accepted() {
    let (app, calls) = create_test_app(created("pi_123", "secret_abc"));

    let response = app
        .oneshot(create_intent_request(r#"{"amount": "500"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].amount.amount(), 500);
}

#[tokio::test]
async fn test_invalid_amounts_return_400() {
    for body in [
        r#"{}"#,
        r#"{"amount": null}"#,
        r#"{"amount": 0}"#,
        r#"{"amount": -500}"#,
        r#"{"amount": 49}"#,
        r#"{"amount": "abc"}"#,
        r#"{"amount": ""}"#,
        r#"{"amount": "49"}"#,
        r#"not json"#,
    ] {
        let (app, calls) = create_test_app(created("pi_123", "secret_abc"));

        let response = app.oneshot(create_intent_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {}", body);
        let json = read_json(response).await;
        assert_eq!(
            json,
            serde_json::json!({ "error": "Invalid amount. Minimum donation is £0.50" }),
            "body {}",
            body
        );
        assert!(calls.lock().unwrap().is_empty(), "body {}", body);
    }
}

#[tokio::test]
async fn test_missing_content_type_returns_400() {
    let (app, calls) = create_test_app(created("pi_123", "secret_abc"));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/create-payment-intent")
        .body(Body::from(r#"{"amount": 500}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_upstream_failure_returns_500_with_message() {
    let (app, _calls) = create_test_app(Err(GatewayError::rejected(402, "Card declined")));

    let response = app
        .oneshot(create_intent_request(r#"{"amount": 500}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        read_json(response).await,
        serde_json::json!({ "error": "Card declined" })
    );
}

#[tokio::test]
async fn test_malformed_upstream_response_returns_500() {
    let (app, _calls) = create_test_app(Err(GatewayError::MalformedResponse(
        "Payment intent response has no client_secret".into(),
    )));

    let response = app
        .oneshot(create_intent_request(r#"{"amount": 500}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = read_json(response).await;
    assert_eq!(json["error"], "Payment intent response has no client_secret");
}

#[tokio::test]
async fn test_cors_preflight_is_allowed() {
    let (app, _calls) = create_test_app(created("pi_123", "secret_abc"));

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/create-payment-intent")
        .header("Origin", "http://localhost:8080")
        .header("Access-Control-Request-Method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}

#[tokio::test]
async fn test_repeated_requests_create_two_intents() {
    let (app, calls) = create_test_app(created("pi_123", "secret_abc"));

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(create_intent_request(r#"{"amount": 500}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(calls.lock().unwrap().len(), 2);
}
