use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, warn};
use xsd_validator_core::dto::{ValidationResponse, INFO_INTERNAL};
use xsd_validator_core::{Outcome, RequestFields};

use super::AppState;

/// Serialize `{"validation", "info"}` with the given status.
pub fn make_response(validation: bool, info: &str, status: StatusCode) -> Response {
    (status, Json(ValidationResponse::new(validation, info))).into_response()
}

/// Map an outcome onto the fixed response shape.
pub fn outcome_response(outcome: &Outcome) -> Response {
    let status = StatusCode::from_u16(outcome.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
    let body = outcome.to_response();
    make_response(body.validation, &body.info, status)
}

/// POST handler validating `data` against `schema`.
///
/// A body that cannot be read (too large, aborted) is treated like an empty one.
pub async fn validation_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(reason = %rejection, "request body unreadable");
            Bytes::new()
        }
    };

    let Some(fields) = RequestFields::from_body(&body) else {
        warn!("request rejected: missing 'data' or 'schema'");
        return outcome_response(&Outcome::MissingFields);
    };

    // libxml2 work is synchronous; keep it off the async workers.
    let references = state.references.clone();
    let result = tokio::task::spawn_blocking(move || fields.validate(&references)).await;

    match result {
        Ok(result) => {
            let outcome = Outcome::from_result(result);
            match &outcome {
                Outcome::Validated(valid) => debug!(valid = *valid, "validation completed"),
                Outcome::Unresolvable(cause) => warn!(%cause, "request rejected"),
                Outcome::MissingFields => {}
            }
            outcome_response(&outcome)
        }
        Err(join_err) => {
            error!(error = %join_err, "validation task failed");
            make_response(false, INFO_INTERNAL, StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
