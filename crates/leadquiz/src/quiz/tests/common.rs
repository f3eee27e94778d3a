use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::quiz::domain::{
    AgencyExperience, AnswerPatch, CompetitorStanding, MainObjective, MapsClientShare,
    PlatformCoverage, ProfileOptimization, QuizAnswers, Role, SessionId,
};
use crate::quiz::notify::{LeadNotifier, LeadSubmission, NotifyError};
use crate::quiz::scoring::{ScoringConfig, ScoringEngine};
use crate::quiz::service::QuizService;
use crate::quiz::session::QuizSession;
use crate::quiz::store::{SessionStore, SessionStoreError};

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(ScoringConfig::default())
}

/// The worked example from the rubric: a qualified freelancer in real estate
/// with the worst possible visibility answers.
pub(super) fn qualified_answers() -> QuizAnswers {
    QuizAnswers {
        role: Some(Role::Freelancer),
        has_physical_location: Some(true),
        main_objective: Some(MainObjective::AttractClients),
        has_used_seo_agency: Some(AgencyExperience::No),
        google_maps_clients: Some(MapsClientShare::UnderTen),
        google_profile_optimized: Some(ProfileOptimization::Neglected),
        platforms_count: Some(PlatformCoverage::NoIdea),
        has_website_linked: Some(false),
        competitors_ahead: Some(CompetitorStanding::Ahead),
        sector: "Immobilier".to_string(),
        location: "Lyon".to_string(),
        average_ticket: 50.0,
        accept_more_clients: Some(true),
        first_name: "Camille".to_string(),
        last_name: "Moreau".to_string(),
        email: "camille@exemple.fr".to_string(),
        phone: "06 12 34 56 78".to_string(),
        website: "https://moreau-immobilier.fr".to_string(),
    }
}

pub(super) fn filtering_patches() -> Vec<AnswerPatch> {
    vec![
        AnswerPatch::Role(Role::Freelancer),
        AnswerPatch::HasPhysicalLocation(true),
        AnswerPatch::MainObjective(MainObjective::AttractClients),
        AnswerPatch::HasUsedSeoAgency(AgencyExperience::No),
    ]
}

pub(super) fn awareness_patches() -> Vec<AnswerPatch> {
    vec![
        AnswerPatch::GoogleMapsClients(MapsClientShare::UnderTen),
        AnswerPatch::GoogleProfileOptimized(ProfileOptimization::Neglected),
        AnswerPatch::PlatformsCount(PlatformCoverage::NoIdea),
        AnswerPatch::HasWebsiteLinked(false),
        AnswerPatch::CompetitorsAhead(CompetitorStanding::Ahead),
    ]
}

pub(super) fn potential_patches() -> Vec<AnswerPatch> {
    vec![
        AnswerPatch::Sector("Immobilier".to_string()),
        AnswerPatch::Location("Lyon".to_string()),
        AnswerPatch::AverageTicket(50.0),
        AnswerPatch::AcceptMoreClients(true),
    ]
}

pub(super) fn contact_patches() -> Vec<AnswerPatch> {
    vec![
        AnswerPatch::FirstName("Camille".to_string()),
        AnswerPatch::LastName("Moreau".to_string()),
        AnswerPatch::Email("camille@exemple.fr".to_string()),
    ]
}

/// Drive a fresh session through every question stage up to the final one.
pub(super) fn session_at_final(engine: &ScoringEngine) -> QuizSession {
    let mut session = QuizSession::new(SessionId("lead-test".to_string()));
    session.advance(engine).expect("intro opens the flow");
    for patch in filtering_patches() {
        session.apply(patch).expect("filtering answer applies");
    }
    session.advance(engine).expect("filtering complete");
    for patch in awareness_patches() {
        session.apply(patch).expect("awareness answer applies");
    }
    session.advance(engine).expect("awareness complete");
    for patch in potential_patches() {
        session.apply(patch).expect("potential answer applies");
    }
    session.advance(engine).expect("potential complete");
    for patch in contact_patches() {
        session.apply(patch).expect("contact applies");
    }
    session
}

#[derive(Default)]
pub(super) struct MemoryStore {
    sessions: Mutex<HashMap<String, QuizSession>>,
}

impl SessionStore for MemoryStore {
    fn insert(&self, session: QuizSession) -> Result<(), SessionStoreError> {
        let mut guard = self.sessions.lock().expect("store mutex poisoned");
        guard.insert(session.id().0.clone(), session);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<QuizSession>, SessionStoreError> {
        let guard = self.sessions.lock().expect("store mutex poisoned");
        Ok(guard.get(&id.0).cloned())
    }

    fn update(&self, session: QuizSession) -> Result<(), SessionStoreError> {
        let mut guard = self.sessions.lock().expect("store mutex poisoned");
        if !guard.contains_key(&session.id().0) {
            return Err(SessionStoreError::NotFound);
        }
        guard.insert(session.id().0.clone(), session);
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct RecordingNotifier {
    published: Mutex<Vec<LeadSubmission>>,
}

impl RecordingNotifier {
    pub(super) fn published(&self) -> Vec<LeadSubmission> {
        self.published.lock().expect("notifier mutex poisoned").clone()
    }
}

#[async_trait]
impl LeadNotifier for RecordingNotifier {
    async fn publish(&self, submission: &LeadSubmission) -> Result<(), NotifyError> {
        let mut guard = self.published.lock().expect("notifier mutex poisoned");
        guard.push(submission.clone());
        Ok(())
    }
}

/// Fails a fixed number of dispatches, then succeeds — for retry scenarios.
pub(super) struct FlakyNotifier {
    failures_left: AtomicUsize,
    inner: RecordingNotifier,
}

impl FlakyNotifier {
    pub(super) fn failing(times: usize) -> Self {
        Self {
            failures_left: AtomicUsize::new(times),
            inner: RecordingNotifier::default(),
        }
    }

    pub(super) fn published(&self) -> Vec<LeadSubmission> {
        self.inner.published()
    }
}

#[async_trait]
impl LeadNotifier for FlakyNotifier {
    async fn publish(&self, submission: &LeadSubmission) -> Result<(), NotifyError> {
        if self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| {
                left.checked_sub(1)
            })
            .is_ok()
        {
            return Err(NotifyError::Transport("connection reset".to_string()));
        }
        self.inner.publish(submission).await
    }
}

pub(super) fn recording_service() -> (
    Arc<QuizService<MemoryStore, RecordingNotifier>>,
    Arc<MemoryStore>,
    Arc<RecordingNotifier>,
) {
    let store = Arc::new(MemoryStore::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = Arc::new(QuizService::new(
        store.clone(),
        notifier.clone(),
        ScoringConfig::default(),
    ));
    (service, store, notifier)
}
