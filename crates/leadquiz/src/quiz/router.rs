use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{AnswerPatch, QuizAnswers, SessionId};
use super::notify::LeadNotifier;
use super::service::{QuizService, ServiceError};
use super::session::ValidationError;
use super::store::{SessionStore, SessionStoreError};

/// Router builder exposing HTTP endpoints for the quiz flow.
pub fn quiz_router<S, N>(service: Arc<QuizService<S, N>>) -> Router
where
    S: SessionStore + 'static,
    N: LeadNotifier + 'static,
{
    Router::new()
        .route("/api/v1/quiz/sessions", post(start_handler::<S, N>))
        .route(
            "/api/v1/quiz/sessions/:session_id",
            get(view_handler::<S, N>),
        )
        .route(
            "/api/v1/quiz/sessions/:session_id/answers",
            post(answer_handler::<S, N>),
        )
        .route(
            "/api/v1/quiz/sessions/:session_id/advance",
            post(advance_handler::<S, N>),
        )
        .route(
            "/api/v1/quiz/sessions/:session_id/submit",
            post(submit_handler::<S, N>),
        )
        .route("/api/v1/quiz/evaluate", post(evaluate_handler::<S, N>))
        .with_state(service)
}

pub(crate) async fn start_handler<S, N>(
    State(service): State<Arc<QuizService<S, N>>>,
) -> Response
where
    S: SessionStore + 'static,
    N: LeadNotifier + 'static,
{
    match service.start() {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn view_handler<S, N>(
    State(service): State<Arc<QuizService<S, N>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    N: LeadNotifier + 'static,
{
    match service.view(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn answer_handler<S, N>(
    State(service): State<Arc<QuizService<S, N>>>,
    Path(session_id): Path<String>,
    axum::Json(patch): axum::Json<AnswerPatch>,
) -> Response
where
    S: SessionStore + 'static,
    N: LeadNotifier + 'static,
{
    match service.apply(&SessionId(session_id), patch) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn advance_handler<S, N>(
    State(service): State<Arc<QuizService<S, N>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    N: LeadNotifier + 'static,
{
    match service.advance(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<S, N>(
    State(service): State<Arc<QuizService<S, N>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    N: LeadNotifier + 'static,
{
    match service.submit(&SessionId(session_id)).await {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluate_handler<S, N>(
    State(service): State<Arc<QuizService<S, N>>>,
    axum::Json(answers): axum::Json<QuizAnswers>,
) -> Response
where
    S: SessionStore + 'static,
    N: LeadNotifier + 'static,
{
    let view = service.evaluate_snapshot(&answers);
    (StatusCode::OK, axum::Json(view)).into_response()
}

fn error_response(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::Validation(ValidationError::SubmissionInFlight) => StatusCode::CONFLICT,
        ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Store(SessionStoreError::NotFound) => StatusCode::NOT_FOUND,
        ServiceError::Store(SessionStoreError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        ServiceError::Notify(_) => StatusCode::BAD_GATEWAY,
    };

    let body = axum::Json(json!({ "error": error.to_string() }));
    (status, body).into_response()
}
