use serde::{Serialize, Serializer};

use super::super::domain::{MainObjective, QuizAnswers};
use super::config::ScoringConfig;

/// Reasons a lead falls outside the target-customer profile. Serialized as
/// the fixed human-readable strings the sales inbox template expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisqualificationReason {
    NonDecisionRole,
    NoLocalPresence,
    TicketTooSmall,
    NoCapacityForClients,
    UndefinedObjective,
}

impl DisqualificationReason {
    pub const fn summary(self) -> &'static str {
        match self {
            DisqualificationReason::NonDecisionRole => {
                "Rôle non décisionnaire dans l'entreprise"
            }
            DisqualificationReason::NoLocalPresence => "Pas de présence locale ou physique",
            DisqualificationReason::TicketTooSmall => {
                "Ticket moyen trop faible pour justifier l'investissement SEO"
            }
            DisqualificationReason::NoCapacityForClients => {
                "Capacité limitée pour accueillir de nouveaux clients"
            }
            DisqualificationReason::UndefinedObjective => "Objectifs marketing non définis",
        }
    }
}

impl Serialize for DisqualificationReason {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.summary())
    }
}

/// Collect every failing qualification predicate, in rubric order. An empty
/// result means the lead is qualified.
pub(crate) fn disqualifications(
    answers: &QuizAnswers,
    config: &ScoringConfig,
) -> Vec<DisqualificationReason> {
    let mut reasons = Vec::new();

    let decision_role = answers
        .role
        .map(|role| role.is_decision_maker())
        .unwrap_or(false);
    if !decision_role {
        reasons.push(DisqualificationReason::NonDecisionRole);
    }

    if answers.has_physical_location != Some(true) {
        reasons.push(DisqualificationReason::NoLocalPresence);
    }

    if answers.average_ticket < config.minimum_average_ticket {
        reasons.push(DisqualificationReason::TicketTooSmall);
    }

    if answers.accept_more_clients != Some(true) {
        reasons.push(DisqualificationReason::NoCapacityForClients);
    }

    let has_need = matches!(
        answers.main_objective,
        Some(objective) if objective != MainObjective::Other
    );
    if !has_need {
        reasons.push(DisqualificationReason::UndefinedObjective);
    }

    reasons
}
