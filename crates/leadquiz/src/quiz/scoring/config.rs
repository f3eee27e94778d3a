use serde::{Deserialize, Serialize};

/// Thresholds and multipliers backing the quiz scoring rubric. The per-factor
/// point weights live next to the rules that apply them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Saturating upper bound on the lost-client estimate. The figure reads
    /// as "percentage of monthly clients at risk", not a literal count.
    pub lost_clients_cap: u32,
    /// Baseline monthly clients a local-SEO strategy is assumed to bring in.
    pub base_monthly_clients: u32,
    /// Leads below this average ticket cannot recoup the investment.
    pub minimum_average_ticket: f64,
    /// Bonus when Google Maps already brings in a meaningful client share.
    pub established_maps_bonus: f64,
    /// Bonus when the Google profile is already maintained.
    pub optimized_profile_bonus: f64,
    /// Malus when competitors hold the local rankings.
    pub contested_market_malus: f64,
    /// Lower bound of the mid-flow preview range, as a share of the point
    /// estimate.
    pub preview_low_ratio: f64,
    /// Upper bound of the mid-flow preview range.
    pub preview_high_ratio: f64,
    /// Assumed monthly spend used by the ROI helper when none is given.
    pub default_monthly_investment: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            lost_clients_cap: 85,
            base_monthly_clients: 25,
            minimum_average_ticket: 30.0,
            established_maps_bonus: 1.2,
            optimized_profile_bonus: 1.1,
            contested_market_malus: 0.9,
            preview_low_ratio: 0.5,
            preview_high_ratio: 1.4,
            default_monthly_investment: 800.0,
        }
    }
}
