use async_trait::async_trait;
use serde::Serialize;

use super::domain::QuizAnswers;
use super::scoring::QuizResult;

/// Payload handed to the notification collaborator. Serializes exactly as
/// `{ "data": ..., "calculation": ... }` — the collaborator renders the
/// summary e-mail for the sales inbox from these two objects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadSubmission {
    pub data: QuizAnswers,
    pub calculation: QuizResult,
}

/// Trait describing the outbound notification handoff. Implementations cross
/// a request/response boundary (a single HTTP POST in production), so the
/// contract is async; dispatch must be a single attempt with no retries.
#[async_trait]
pub trait LeadNotifier: Send + Sync {
    async fn publish(&self, submission: &LeadSubmission) -> Result<(), NotifyError>;
}

/// Notification dispatch failure. Always retryable from the caller's side:
/// the session keeps its answers and stays at the final stage.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
    #[error("notification collaborator rejected the submission ({status}): {detail}")]
    Rejected { status: u16, detail: String },
}
