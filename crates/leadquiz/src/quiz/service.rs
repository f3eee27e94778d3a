use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{AnswerPatch, QuizAnswers, SessionId};
use super::notify::{LeadNotifier, NotifyError};
use super::scoring::{PotentialPreview, QuizResult, ScoringConfig, ScoringEngine, VisibilityAudit};
use super::session::{QuizSession, QuizStage, StageProgress, ValidationError};
use super::store::{SessionStore, SessionStoreError};

/// Service composing the session store, the scoring engine, and the
/// notification gateway.
pub struct QuizService<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
    engine: Arc<ScoringEngine>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("lead-{id:06}"))
}

impl<S, N> QuizService<S, N>
where
    S: SessionStore + 'static,
    N: LeadNotifier + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>, config: ScoringConfig) -> Self {
        Self {
            store,
            notifier,
            engine: Arc::new(ScoringEngine::new(config)),
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Open a fresh session at the intro stage.
    pub fn start(&self) -> Result<SessionView, ServiceError> {
        let session = QuizSession::new(next_session_id());
        let view = self.view_of(&session);
        self.store.insert(session)?;
        Ok(view)
    }

    /// Current state of a session.
    pub fn view(&self, id: &SessionId) -> Result<SessionView, ServiceError> {
        let session = self.fetch(id)?;
        Ok(self.view_of(&session))
    }

    /// Record one answer and return the refreshed state. The lost-client
    /// tally and preview in the view are recomputed from scratch on every
    /// update.
    pub fn apply(&self, id: &SessionId, patch: AnswerPatch) -> Result<SessionView, ServiceError> {
        let mut session = self.fetch(id)?;
        session.apply(patch)?;
        let view = self.view_of(&session);
        self.store.update(session)?;
        Ok(view)
    }

    /// Run the stage guard and move forward when it passes.
    pub fn advance(&self, id: &SessionId) -> Result<SessionView, ServiceError> {
        let mut session = self.fetch(id)?;
        session.advance(&self.engine)?;
        let view = self.view_of(&session);
        self.store.update(session)?;
        Ok(view)
    }

    /// Hand the completed quiz to the notification collaborator. One dispatch
    /// may be outstanding per session; a failure leaves the session at the
    /// final stage with all answers intact so an identical retry is possible.
    pub async fn submit(&self, id: &SessionId) -> Result<SessionView, ServiceError> {
        let mut session = self.fetch(id)?;
        let submission = session.prepare_submission()?;
        self.store.update(session.clone())?;

        info!(
            session = %session.id().0,
            qualified = submission.calculation.is_qualified,
            "dispatching lead to notification collaborator"
        );

        match self.notifier.publish(&submission).await {
            Ok(()) => {
                session.submission_succeeded();
                let view = self.view_of(&session);
                self.store.update(session)?;
                Ok(view)
            }
            Err(error) => {
                warn!(session = %session.id().0, %error, "lead dispatch failed");
                session.submission_failed();
                self.store.update(session)?;
                Err(ServiceError::Notify(error))
            }
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<QuizSession, ServiceError> {
        let session = self.store.fetch(id)?.ok_or(SessionStoreError::NotFound)?;
        Ok(session)
    }

    fn view_of(&self, session: &QuizSession) -> SessionView {
        let answers = session.answers();
        SessionView {
            session_id: session.id().clone(),
            stage: session.stage(),
            progress: session.stage().progress(),
            can_advance: session.can_advance(),
            missing: session.missing_fields(),
            redirect: session.redirect().map(|reason| reason.message()),
            audit: self.engine.visibility_audit(answers),
            preview: self.engine.preview(answers),
            result: session.result().cloned(),
            answers: answers.clone(),
            submitted_at: session.submitted_at(),
        }
    }
}

/// Session state exposed to the presentation collaborator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: SessionId,
    pub stage: QuizStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<StageProgress>,
    pub can_advance: bool,
    pub missing: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
    pub audit: VisibilityAudit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<PotentialPreview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<QuizResult>,
    pub answers: QuizAnswers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// One-shot evaluation of a full answer snapshot, for callers that manage
/// their own flow.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationView {
    pub calculation: QuizResult,
    pub audit: VisibilityAudit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<PotentialPreview>,
    pub roi_percent: i64,
}

impl<S, N> QuizService<S, N>
where
    S: SessionStore + 'static,
    N: LeadNotifier + 'static,
{
    pub fn evaluate_snapshot(&self, answers: &QuizAnswers) -> EvaluationView {
        EvaluationView {
            calculation: self.engine.evaluate(answers),
            audit: self.engine.visibility_audit(answers),
            preview: self.engine.preview(answers),
            roi_percent: self.engine.roi(answers, None),
        }
    }
}

/// Error raised by the quiz service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] SessionStoreError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
