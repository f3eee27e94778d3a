//! Integration specifications for the lead qualification quiz.
//!
//! Scenarios drive the public service facade and HTTP router end to end: a
//! lead answers every stage, the engine freezes a verdict, and the gateway
//! hands the payload to the notification collaborator. The wire contract of
//! that payload is pinned here because the collaborator renders the sales
//! e-mail from it verbatim.

mod common {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use leadquiz::quiz::{
        AgencyExperience, AnswerPatch, CompetitorStanding, LeadNotifier, LeadSubmission,
        MainObjective, MapsClientShare, NotifyError, PlatformCoverage, ProfileOptimization,
        QuizService, QuizSession, Role, ScoringConfig, SessionId, SessionStore,
        SessionStoreError,
    };

    #[derive(Default)]
    pub(super) struct MemoryStore {
        sessions: Mutex<HashMap<String, QuizSession>>,
    }

    impl SessionStore for MemoryStore {
        fn insert(&self, session: QuizSession) -> Result<(), SessionStoreError> {
            let mut guard = self.sessions.lock().expect("lock");
            guard.insert(session.id().0.clone(), session);
            Ok(())
        }

        fn fetch(&self, id: &SessionId) -> Result<Option<QuizSession>, SessionStoreError> {
            let guard = self.sessions.lock().expect("lock");
            Ok(guard.get(&id.0).cloned())
        }

        fn update(&self, session: QuizSession) -> Result<(), SessionStoreError> {
            let mut guard = self.sessions.lock().expect("lock");
            if !guard.contains_key(&session.id().0) {
                return Err(SessionStoreError::NotFound);
            }
            guard.insert(session.id().0.clone(), session);
            Ok(())
        }
    }

    #[derive(Default)]
    pub(super) struct MemoryNotifier {
        published: Mutex<Vec<LeadSubmission>>,
        failures_left: AtomicUsize,
    }

    impl MemoryNotifier {
        pub(super) fn failing(times: usize) -> Self {
            Self {
                published: Mutex::default(),
                failures_left: AtomicUsize::new(times),
            }
        }

        pub(super) fn published(&self) -> Vec<LeadSubmission> {
            self.published.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl LeadNotifier for MemoryNotifier {
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
            self.published.lock().expect("lock").push(submission.clone());
            Ok(())
        }
    }

    pub(super) fn build_service() -> (
        Arc<QuizService<MemoryStore, MemoryNotifier>>,
        Arc<MemoryNotifier>,
    ) {
        build_service_with(MemoryNotifier::default())
    }

    pub(super) fn build_service_with(
        notifier: MemoryNotifier,
    ) -> (
        Arc<QuizService<MemoryStore, MemoryNotifier>>,
        Arc<MemoryNotifier>,
    ) {
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(notifier);
        let service = Arc::new(QuizService::new(
            store,
            notifier.clone(),
            ScoringConfig::default(),
        ));
        (service, notifier)
    }

    pub(super) fn answer_every_stage(
        service: &QuizService<MemoryStore, MemoryNotifier>,
        id: &SessionId,
    ) {
        service.advance(id).expect("intro opens the flow");
        for patch in [
            AnswerPatch::Role(Role::Freelancer),
            AnswerPatch::HasPhysicalLocation(true),
            AnswerPatch::MainObjective(MainObjective::AttractClients),
            AnswerPatch::HasUsedSeoAgency(AgencyExperience::No),
        ] {
            service.apply(id, patch).expect("filtering answer applies");
        }
        service.advance(id).expect("filtering complete");
        for patch in [
            AnswerPatch::GoogleMapsClients(MapsClientShare::UnderTen),
            AnswerPatch::GoogleProfileOptimized(ProfileOptimization::Neglected),
            AnswerPatch::PlatformsCount(PlatformCoverage::NoIdea),
            AnswerPatch::HasWebsiteLinked(false),
            AnswerPatch::CompetitorsAhead(CompetitorStanding::Ahead),
        ] {
            service.apply(id, patch).expect("awareness answer applies");
        }
        service.advance(id).expect("awareness complete");
        for patch in [
            AnswerPatch::Sector("Immobilier".to_string()),
            AnswerPatch::Location("Lyon".to_string()),
            AnswerPatch::AverageTicket(50.0),
            AnswerPatch::AcceptMoreClients(true),
        ] {
            service.apply(id, patch).expect("potential answer applies");
        }
        service.advance(id).expect("potential complete");
        for patch in [
            AnswerPatch::FirstName("Camille".to_string()),
            AnswerPatch::LastName("Moreau".to_string()),
            AnswerPatch::Email("camille@exemple.fr".to_string()),
        ] {
            service.apply(id, patch).expect("contact applies");
        }
    }
}

mod flow {
    use super::common::*;
    use leadquiz::quiz::{AnswerPatch, QuizStage, Role, ServiceError};

    #[tokio::test]
    async fn qualified_lead_reaches_the_sales_inbox() {
        let (service, notifier) = build_service();
        let id = service.start().expect("session starts").session_id;

        answer_every_stage(&service, &id);
        let view = service.submit(&id).await.expect("submission succeeds");

        assert_eq!(view.stage, QuizStage::Success);
        let published = notifier.published();
        assert_eq!(published.len(), 1);
        assert!(published[0].calculation.is_qualified);
        assert_eq!(published[0].calculation.lost_clients, 85);
        assert_eq!(published[0].calculation.potential_clients, 45);
        assert_eq!(published[0].calculation.estimated_revenue, 2250.0);
    }

    #[tokio::test]
    async fn non_decision_role_is_routed_away_without_estimates() {
        let (service, notifier) = build_service();
        let id = service.start().expect("session starts").session_id;

        service.advance(&id).expect("intro opens the flow");
        let view = service
            .apply(&id, AnswerPatch::Role(Role::Other))
            .expect("answer applies");

        assert_eq!(view.stage, QuizStage::Redirect);
        assert!(view.redirect.expect("reason surfaced").contains("qualifié"));
        assert!(view.result.is_none());

        let error = service.submit(&id).await.expect_err("terminal stage");
        assert!(matches!(error, ServiceError::Validation(_)));
        assert!(notifier.published().is_empty());
    }

    #[tokio::test]
    async fn failed_dispatch_leaves_the_lead_retryable() {
        let (service, notifier) = build_service_with(MemoryNotifier::failing(1));
        let id = service.start().expect("session starts").session_id;
        answer_every_stage(&service, &id);

        let error = service.submit(&id).await.expect_err("first dispatch fails");
        assert!(matches!(error, ServiceError::Notify(_)));
        assert_eq!(
            service.view(&id).expect("session survives").stage,
            QuizStage::Final
        );

        let view = service.submit(&id).await.expect("retry succeeds");
        assert_eq!(view.stage, QuizStage::Success);
        assert_eq!(notifier.published().len(), 1);
    }
}

mod payload {
    use super::common::*;
    use serde_json::json;

    #[tokio::test]
    async fn submission_serializes_the_collaborator_contract() {
        let (service, notifier) = build_service();
        let id = service.start().expect("session starts").session_id;
        answer_every_stage(&service, &id);
        service.submit(&id).await.expect("submission succeeds");

        let published = notifier.published();
        let value = serde_json::to_value(&published[0]).expect("payload serializes");

        // Top-level shape consumed by the e-mail template.
        assert!(value.get("data").is_some());
        assert!(value.get("calculation").is_some());

        // Answers keep their camelCase names and French wire values.
        let data = &value["data"];
        assert_eq!(data["role"], json!("freelance"));
        assert_eq!(data["hasPhysicalLocation"], json!(true));
        assert_eq!(data["mainObjective"], json!("attirer-clients"));
        assert_eq!(data["googleMapsClients"], json!("moins-10"));
        assert_eq!(data["googleProfileOptimized"], json!("non"));
        assert_eq!(data["platformsCount"], json!("aucune-idee"));
        assert_eq!(data["competitorsAhead"], json!("oui"));
        assert_eq!(data["sector"], json!("Immobilier"));
        assert_eq!(data["averageTicket"], json!(50.0));
        assert_eq!(data["firstName"], json!("Camille"));

        let calculation = &value["calculation"];
        assert_eq!(calculation["isQualified"], json!(true));
        assert_eq!(calculation["lostClients"], json!(85));
        assert_eq!(calculation["potentialClients"], json!(45));
        assert_eq!(calculation["estimatedRevenue"], json!(2250.0));
        assert_eq!(calculation["reasons"], json!([]));
    }
}

mod routing {
    use super::common::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use leadquiz::quiz::quiz_router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    #[tokio::test]
    async fn evaluate_endpoint_scores_a_snapshot() {
        let (service, _) = build_service();
        let router = quiz_router(service);

        let answers = json!({
            "role": "freelance",
            "hasPhysicalLocation": true,
            "mainObjective": "attirer-clients",
            "hasUsedSeoAgency": "non",
            "googleMapsClients": "moins-10",
            "googleProfileOptimized": "non",
            "platformsCount": "aucune-idee",
            "hasWebsiteLinked": false,
            "competitorsAhead": "oui",
            "sector": "Immobilier",
            "location": "Lyon",
            "averageTicket": 50.0,
            "acceptMoreClients": true
        });
        let request = Request::post("/api/v1/quiz/evaluate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::to_vec(&answers).expect("serializable"),
            ))
            .expect("request builds");

        let response = router.oneshot(request).await.expect("route responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["calculation"]["isQualified"], json!(true));
        assert_eq!(body["calculation"]["lostClients"], json!(85));
        assert_eq!(body["roiPercent"], json!(181));
    }
}
