use async_trait::async_trait;
use leadquiz::quiz::{
    LeadNotifier, LeadSubmission, NotifyError, QuizSession, SessionId, SessionStore,
    SessionStoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Sessions live for one quiz attempt and are never persisted beyond memory.
#[derive(Default)]
pub(crate) struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, QuizSession>>,
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, session: QuizSession) -> Result<(), SessionStoreError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        guard.insert(session.id().0.clone(), session);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<QuizSession>, SessionStoreError> {
        let guard = self.sessions.lock().expect("session mutex poisoned");
        Ok(guard.get(&id.0).cloned())
    }

    fn update(&self, session: QuizSession) -> Result<(), SessionStoreError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        if !guard.contains_key(&session.id().0) {
            return Err(SessionStoreError::NotFound);
        }
        guard.insert(session.id().0.clone(), session);
        Ok(())
    }
}

/// POSTs completed quizzes to the notification collaborator, which renders
/// the summary e-mail. Without a configured endpoint the notifier runs in
/// dry-run mode and only logs the dispatch.
pub(crate) struct HttpLeadNotifier {
    endpoint: Option<String>,
    client: reqwest::Client,
}

impl HttpLeadNotifier {
    pub(crate) fn new(endpoint: Option<String>) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CollaboratorRejection {
    error: Option<String>,
}

#[async_trait]
impl LeadNotifier for HttpLeadNotifier {
    async fn publish(&self, submission: &LeadSubmission) -> Result<(), NotifyError> {
        let Some(endpoint) = self.endpoint.as_deref() else {
            info!(
                qualified = submission.calculation.is_qualified,
                "dry-run dispatch, QUIZ_NOTIFY_URL is unset"
            );
            return Ok(());
        };

        let response = self
            .client
            .post(endpoint)
            .json(submission)
            .send()
            .await
            .map_err(|err| NotifyError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = response
            .json::<CollaboratorRejection>()
            .await
            .ok()
            .and_then(|rejection| rejection.error)
            .unwrap_or_else(|| "no detail provided".to_string());

        Err(NotifyError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}
