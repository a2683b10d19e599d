//! Translation proxy endpoint
//!
//! The sole bit-exact wire contract of the gateway: accepts a text plus an
//! IETF-style language tag, reduces the tag to its primary subtag, issues
//! exactly one provider call, and maps every provider failure to a fixed
//! generic message. Provider error detail is logged server-side only.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};

use super::ApiState;
use crate::translate::primary_subtag;

/// Build translate router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/translate", post(translate))
        .with_state(state)
}

/// Translation request body
///
/// Fields default to empty so a missing field and an empty field take the
/// same validation path (400, not a serde rejection).
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub language: String,
}

/// Translation response body
#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub text: String,
}

/// Translate text to the requested language
///
/// The body extractor is wrapped so every failure path emits one of the
/// two fixed JSON bodies: an unparseable body lands on the generic 500,
/// as the catch-all failure path.
async fn translate(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, TranslateError> {
    let Json(request) = payload.map_err(|e| {
        tracing::debug!(error = %e, "malformed request body");
        TranslateError::MalformedBody
    })?;

    if request.text.is_empty() || request.language.is_empty() {
        return Err(TranslateError::MissingField);
    }

    let target = primary_subtag(&request.language);
    tracing::debug!(language = %request.language, target_lang = %target, "proxying translation");

    let translated = state
        .provider
        .translate(&request.text, target)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, provider = state.provider.name(), "translation failed");
            TranslateError::ProviderFailed
        })?;

    Ok(Json(TranslateResponse { text: translated }))
}

/// Translation proxy errors
///
/// Both variants carry fixed messages; the underlying provider error is
/// never echoed to the caller.
#[derive(Debug)]
pub enum TranslateError {
    MissingField,
    MalformedBody,
    ProviderFailed,
}

impl IntoResponse for TranslateError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: &'static str,
        }

        let (status, error) = match self {
            Self::MissingField => (StatusCode::BAD_REQUEST, "Missing text or language"),
            Self::MalformedBody | Self::ProviderFailed => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Translation failed")
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
