//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use donations_types::{
    AppError, CreatePaymentIntentRequest, ErrorResponse, HealthResponse, PaymentGateway,
    PaymentIntentResponse,
};

use crate::DonationService;

/// Application state shared across handlers.
pub struct AppState<G: PaymentGateway> {
    pub service: DonationService<G>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::running_at(Utc::now()))
}

/// Create a payment intent for a donation.
///
/// A body that is not JSON is handled like one without an amount, so every
/// bad input gets the same 400.
#[tracing::instrument(skip_all, fields(amount = tracing::field::Empty))]
pub async fn create_payment_intent<G: PaymentGateway>(
    State(state): State<Arc<AppState<G>>>,
    payload: Result<Json<CreatePaymentIntentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!("Unreadable request body: {}", rejection);
            CreatePaymentIntentRequest::default()
        }
    };

    if let Some(amount) = req.amount {
        tracing::Span::current().record("amount", amount);
    }

    let intent = state.service.create_payment_intent(req).await?;
    Ok(Json(PaymentIntentResponse::from(intent)))
}
