use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AnswerPatch, QuizAnswers, Role, SessionId};
use super::notify::LeadSubmission;
use super::scoring::{QuizResult, ScoringEngine};

/// Stages of the quiz flow, in presentation order. Transitions only move
/// forward; `redirect` and `success` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizStage {
    Intro,
    Filtering,
    Awareness,
    Potential,
    Final,
    Redirect,
    Success,
}

impl QuizStage {
    pub const fn label(self) -> &'static str {
        match self {
            QuizStage::Intro => "intro",
            QuizStage::Filtering => "filtering",
            QuizStage::Awareness => "awareness",
            QuizStage::Potential => "potential",
            QuizStage::Final => "final",
            QuizStage::Redirect => "redirect",
            QuizStage::Success => "success",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, QuizStage::Redirect | QuizStage::Success)
    }

    /// Header metadata for the question stages, for the presentation layer.
    pub fn progress(self) -> Option<StageProgress> {
        let (step, title, subtitle) = match self {
            QuizStage::Filtering => (
                1,
                "Parlons de votre entreprise",
                "Quelques questions pour mieux vous connaître",
            ),
            QuizStage::Awareness => (
                2,
                "Analysons votre visibilité actuelle",
                "Découvrons ensemble vos points d'amélioration",
            ),
            QuizStage::Potential => (
                3,
                "Calculons votre potentiel",
                "Estimons le retour sur investissement possible",
            ),
            QuizStage::Final => (
                4,
                "Votre analyse personnalisée",
                "Obtenez votre audit gratuit maintenant",
            ),
            _ => return None,
        };

        Some(StageProgress {
            step,
            total: 4,
            title,
            subtitle,
        })
    }
}

/// Position of a question stage within the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageProgress {
    pub step: u8,
    pub total: u8,
    pub title: &'static str,
    pub subtitle: &'static str,
}

/// Why a lead was routed away during filtering instead of continuing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    UnqualifiedRole,
    NationalReachFitsBetter,
}

impl RedirectReason {
    pub const fn message(self) -> &'static str {
        match self {
            RedirectReason::UnqualifiedRole => "Role non qualifié pour nos services",
            RedirectReason::NationalReachFitsBetter => {
                "SEO national recommandé plutôt que local"
            }
        }
    }
}

/// A required field missing or invalid when attempting a transition. Blocks
/// the transition, never loses collected answers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("stage '{stage}' is incomplete: missing {}", .missing.join(", "))]
    IncompleteStage {
        stage: &'static str,
        missing: Vec<&'static str>,
    },
    #[error("contact details are incomplete or invalid")]
    InvalidContact,
    #[error("stage '{0}' is terminal")]
    TerminalStage(&'static str),
    #[error("the final stage completes through submission, not advance")]
    SubmissionRequired,
    #[error("a submission is already in flight for this session")]
    SubmissionInFlight,
}

/// Explicit session context: the accumulated answers, the current stage, the
/// frozen result, and the single-flight submission flag. Owned by the
/// service layer for the lifetime of one quiz attempt.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: SessionId,
    stage: QuizStage,
    answers: QuizAnswers,
    result: Option<QuizResult>,
    redirect: Option<RedirectReason>,
    submission_in_flight: bool,
    submitted_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            stage: QuizStage::Intro,
            answers: QuizAnswers::default(),
            result: None,
            redirect: None,
            submission_in_flight: false,
            submitted_at: None,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn stage(&self) -> QuizStage {
        self.stage
    }

    pub fn answers(&self) -> &QuizAnswers {
        &self.answers
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    pub fn redirect(&self) -> Option<RedirectReason> {
        self.redirect
    }

    pub fn is_submitting(&self) -> bool {
        self.submission_in_flight
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    /// Record one answer. During filtering, a non-decision role or a purely
    /// remote business exits the flow immediately — those leads are routed
    /// to other offerings without seeing the remaining questions.
    pub fn apply(&mut self, patch: AnswerPatch) -> Result<(), ValidationError> {
        if self.stage.is_terminal() {
            return Err(ValidationError::TerminalStage(self.stage.label()));
        }
        if self.submission_in_flight {
            return Err(ValidationError::SubmissionInFlight);
        }

        let filtering = self.stage == QuizStage::Filtering;
        let early_exit = if filtering {
            match &patch {
                AnswerPatch::Role(Role::Other) => Some(RedirectReason::UnqualifiedRole),
                AnswerPatch::HasPhysicalLocation(false) => {
                    Some(RedirectReason::NationalReachFitsBetter)
                }
                _ => None,
            }
        } else {
            None
        };

        self.answers.apply(patch);

        if let Some(reason) = early_exit {
            self.redirect = Some(reason);
            self.stage = QuizStage::Redirect;
        }

        Ok(())
    }

    /// Requirements still unmet for leaving the current stage. Pure over the
    /// answer snapshot: re-evaluating with unchanged input yields an
    /// unchanged result.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let answers = &self.answers;
        let mut missing = Vec::new();

        match self.stage {
            QuizStage::Intro | QuizStage::Redirect | QuizStage::Success => {}
            QuizStage::Filtering => {
                if !matches!(answers.role, Some(role) if role.is_decision_maker()) {
                    missing.push("role");
                }
                if answers.has_physical_location != Some(true) {
                    missing.push("hasPhysicalLocation");
                }
                if answers.main_objective.is_none() {
                    missing.push("mainObjective");
                }
                if answers.has_used_seo_agency.is_none() {
                    missing.push("hasUsedSeoAgency");
                }
            }
            QuizStage::Awareness => {
                if answers.google_maps_clients.is_none() {
                    missing.push("googleMapsClients");
                }
                if answers.google_profile_optimized.is_none() {
                    missing.push("googleProfileOptimized");
                }
                if answers.platforms_count.is_none() {
                    missing.push("platformsCount");
                }
                if answers.has_website_linked.is_none() {
                    missing.push("hasWebsiteLinked");
                }
                if answers.competitors_ahead.is_none() {
                    missing.push("competitorsAhead");
                }
            }
            QuizStage::Potential => {
                if answers.sector.is_empty() {
                    missing.push("sector");
                }
                if answers.location.is_empty() {
                    missing.push("location");
                }
                if answers.average_ticket <= 0.0 {
                    missing.push("averageTicket");
                }
                if answers.accept_more_clients.is_none() {
                    missing.push("acceptMoreClients");
                }
            }
            QuizStage::Final => {
                if !answers.contact_is_valid() {
                    missing.push("contact");
                }
            }
        }

        missing
    }

    pub fn can_advance(&self) -> bool {
        !self.stage.is_terminal()
            && self.stage != QuizStage::Final
            && self.missing_fields().is_empty()
    }

    /// Move to the next stage when the current guard passes. Reaching the
    /// final stage evaluates the answers once and freezes the result.
    pub fn advance(&mut self, engine: &ScoringEngine) -> Result<QuizStage, ValidationError> {
        if self.stage.is_terminal() {
            return Err(ValidationError::TerminalStage(self.stage.label()));
        }
        if self.stage == QuizStage::Final {
            return Err(ValidationError::SubmissionRequired);
        }

        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::IncompleteStage {
                stage: self.stage.label(),
                missing,
            });
        }

        self.stage = match self.stage {
            QuizStage::Intro => QuizStage::Filtering,
            QuizStage::Filtering => QuizStage::Awareness,
            QuizStage::Awareness => QuizStage::Potential,
            QuizStage::Potential => {
                self.result = Some(engine.evaluate(&self.answers));
                QuizStage::Final
            }
            QuizStage::Final | QuizStage::Redirect | QuizStage::Success => unreachable!(),
        };

        Ok(self.stage)
    }

    /// Validate the final stage and reserve the single submission slot.
    /// Returns the payload for the notification handoff; the caller reports
    /// the outcome through [`submission_succeeded`](Self::submission_succeeded)
    /// or [`submission_failed`](Self::submission_failed).
    pub fn prepare_submission(&mut self) -> Result<LeadSubmission, ValidationError> {
        if self.stage != QuizStage::Final {
            if self.stage.is_terminal() {
                return Err(ValidationError::TerminalStage(self.stage.label()));
            }
            return Err(ValidationError::IncompleteStage {
                stage: self.stage.label(),
                missing: vec!["evaluation"],
            });
        }
        if self.submission_in_flight {
            return Err(ValidationError::SubmissionInFlight);
        }
        if !self.answers.contact_is_valid() {
            return Err(ValidationError::InvalidContact);
        }

        let calculation = self
            .result
            .clone()
            .expect("final stage always carries a frozen result");

        self.submission_in_flight = true;

        Ok(LeadSubmission {
            data: self.answers.clone(),
            calculation,
        })
    }

    /// Dispatch succeeded: release the flag and finish the flow.
    pub fn submission_succeeded(&mut self) {
        self.submission_in_flight = false;
        self.submitted_at = Some(Utc::now());
        self.stage = QuizStage::Success;
    }

    /// Dispatch failed: release the flag, keep every answer, stay at the
    /// final stage so the caller can retry with an identical payload.
    pub fn submission_failed(&mut self) {
        self.submission_in_flight = false;
    }
}
