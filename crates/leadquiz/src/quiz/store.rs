use super::domain::SessionId;
use super::session::QuizSession;

/// Storage abstraction for in-progress quiz sessions, so the service module
/// can be exercised in isolation. Sessions are in-memory state for one quiz
/// attempt; completed submissions are never persisted.
pub trait SessionStore: Send + Sync {
    fn insert(&self, session: QuizSession) -> Result<(), SessionStoreError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<QuizSession>, SessionStoreError>;
    fn update(&self, session: QuizSession) -> Result<(), SessionStoreError>;
}

/// Error enumeration for session store failures.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
