//! The quiz flow: typed answers, scoring, step sequencing, and the
//! submission handoff to the notification collaborator.

pub mod domain;
pub mod notify;
pub mod router;
pub(crate) mod scoring;
pub mod service;
pub mod session;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    AgencyExperience, AnswerPatch, CompetitorStanding, MainObjective, MapsClientShare,
    PlatformCoverage, ProfileOptimization, QuizAnswers, Role, SessionId,
};
pub use notify::{LeadNotifier, LeadSubmission, NotifyError};
pub use router::quiz_router;
pub use scoring::{
    DisqualificationReason, PotentialPreview, QuizResult, ScoreComponent, ScoringConfig,
    ScoringEngine, VisibilityAudit, VisibilityFactor, SECTOR_CATALOG,
};
pub use service::{EvaluationView, QuizService, ServiceError, SessionView};
pub use session::{QuizSession, QuizStage, RedirectReason, StageProgress, ValidationError};
pub use store::{SessionStore, SessionStoreError};
