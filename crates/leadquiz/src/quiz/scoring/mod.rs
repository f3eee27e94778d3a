mod config;
mod policy;
mod rules;

pub use config::ScoringConfig;
pub use policy::DisqualificationReason;
pub use rules::SECTOR_CATALOG;

use super::domain::QuizAnswers;
use serde::{Deserialize, Serialize};

/// Stateless engine applying the rubric configuration to an answer snapshot.
/// Every method is pure over the snapshot, so callers may re-evaluate freely.
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Break the lost-client estimate down into its contributing factors.
    /// Unanswered questions contribute nothing, so the audit is meaningful
    /// mid-flow as well as on a complete answer set.
    pub fn visibility_audit(&self, answers: &QuizAnswers) -> VisibilityAudit {
        let (components, lost_clients) = rules::visibility_gaps(answers, &self.config);
        VisibilityAudit {
            components,
            lost_clients,
        }
    }

    /// Clamped lost-client estimate in `[0, cap]`.
    pub fn lost_clients(&self, answers: &QuizAnswers) -> u32 {
        rules::visibility_gaps(answers, &self.config).1
    }

    /// Monthly client potential under a local-SEO engagement.
    pub fn potential_clients(&self, answers: &QuizAnswers) -> u32 {
        rules::monthly_client_projection(answers, &self.config)
    }

    /// Every failing qualification predicate, in rubric order.
    pub fn disqualifications(&self, answers: &QuizAnswers) -> Vec<DisqualificationReason> {
        policy::disqualifications(answers, &self.config)
    }

    /// Full evaluation of a completed answer set. Disqualified leads get
    /// zeroed estimates so no revenue projection ever reaches them.
    pub fn evaluate(&self, answers: &QuizAnswers) -> QuizResult {
        let reasons = self.disqualifications(answers);
        if !reasons.is_empty() {
            return QuizResult {
                is_qualified: false,
                reasons,
                lost_clients: 0,
                potential_clients: 0,
                estimated_revenue: 0.0,
            };
        }

        let lost_clients = self.lost_clients(answers);
        let potential_clients = self.potential_clients(answers);

        QuizResult {
            is_qualified: true,
            reasons: Vec::new(),
            lost_clients,
            potential_clients,
            estimated_revenue: potential_clients as f64 * answers.average_ticket,
        }
    }

    /// Coarse mid-flow estimate shown before qualification is known. Uses
    /// only sector and ticket, brackets the point estimate with the
    /// configured range, and is recomputed on every call — never cached.
    pub fn preview(&self, answers: &QuizAnswers) -> Option<PotentialPreview> {
        if answers.sector.is_empty() || answers.location.is_empty() || answers.average_ticket <= 0.0
        {
            return None;
        }

        let point = (self.config.base_monthly_clients as f64
            * rules::sector_multiplier(&answers.sector))
        .round();
        let monthly_revenue = point * answers.average_ticket;

        Some(PotentialPreview {
            min_clients: (point * self.config.preview_low_ratio).round() as u32,
            max_clients: (point * self.config.preview_high_ratio).round() as u32,
            monthly_revenue,
            yearly_revenue: monthly_revenue * 12.0,
        })
    }

    /// Estimated return on a monthly SEO spend, in percent. Zero whenever the
    /// lead is disqualified (revenue is zero).
    pub fn roi(&self, answers: &QuizAnswers, monthly_investment: Option<f64>) -> i64 {
        let investment = monthly_investment.unwrap_or(self.config.default_monthly_investment);
        let revenue = self.evaluate(answers).estimated_revenue;
        if revenue == 0.0 || investment <= 0.0 {
            return 0;
        }

        (((revenue - investment) / investment) * 100.0).round() as i64
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

/// Factors feeding the lost-client estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityFactor {
    MapsClientShare,
    ProfileOptimization,
    PlatformCoverage,
    WebsiteLink,
    CompetitorPosition,
}

/// Discrete contribution to the lost-client estimate, allowing transparent
/// audits of the rubric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub factor: VisibilityFactor,
    pub points: u32,
    pub note: String,
}

/// Lost-client breakdown for a (possibly partial) answer snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityAudit {
    pub components: Vec<ScoreComponent>,
    pub lost_clients: u32,
}

/// Outcome of a completed evaluation, immutable after creation. Field names
/// follow the notification payload contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub is_qualified: bool,
    pub reasons: Vec<DisqualificationReason>,
    pub lost_clients: u32,
    pub potential_clients: u32,
    pub estimated_revenue: f64,
}

/// Mid-flow ROI teaser bracketing the client potential.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PotentialPreview {
    pub min_clients: u32,
    pub max_clients: u32,
    pub monthly_revenue: f64,
    pub yearly_revenue: f64,
}
