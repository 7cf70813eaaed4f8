use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::intake::ApplicationForm;
use super::policy::PolicyConfig;
use super::service::{ScorecardService, ScorecardServiceError};
use super::wizard::WizardStep;

/// Router builder exposing evaluation, wizard, and policy endpoints.
pub fn scorecard_router(service: Arc<ScorecardService>) -> Router {
    Router::new()
        .route("/api/v1/scorecard/evaluate", post(evaluate_handler))
        .route("/api/v1/scorecard/steps/:step", post(step_handler))
        .route("/api/v1/policy", get(policy_handler).put(replace_policy_handler))
        .route("/api/v1/policy/reset", post(reset_policy_handler))
        .with_state(service)
}

fn error_response(error: ScorecardServiceError) -> Response {
    match error {
        ScorecardServiceError::InvalidInput(errors) => {
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(errors)).into_response()
        }
        ScorecardServiceError::InvalidPolicy(errors) => {
            let payload = json!({ "errors": errors });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn evaluate_handler(
    State(service): State<Arc<ScorecardService>>,
    axum::Json(form): axum::Json<ApplicationForm>,
) -> Response {
    match service.evaluate_form(&form) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn step_handler(
    State(service): State<Arc<ScorecardService>>,
    Path(step): Path<u8>,
    axum::Json(form): axum::Json<ApplicationForm>,
) -> Response {
    match WizardStep::from_number(step) {
        Some(step) => {
            let status = service.step_status(&form, step);
            (StatusCode::OK, axum::Json(status)).into_response()
        }
        None => {
            let payload = json!({
                "error": format!("unknown wizard step {step}"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn policy_handler(State(service): State<Arc<ScorecardService>>) -> Response {
    let policy = service.policy();
    (StatusCode::OK, axum::Json(policy.as_ref().clone())).into_response()
}

pub(crate) async fn replace_policy_handler(
    State(service): State<Arc<ScorecardService>>,
    axum::Json(policy): axum::Json<PolicyConfig>,
) -> Response {
    match service.replace_policy(policy) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reset_policy_handler(
    State(service): State<Arc<ScorecardService>>,
) -> Response {
    let policy = service.reset_policy();
    (StatusCode::OK, axum::Json(policy.as_ref().clone())).into_response()
}
