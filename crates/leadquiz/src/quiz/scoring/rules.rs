use super::super::domain::{
    CompetitorStanding, MapsClientShare, PlatformCoverage, ProfileOptimization, QuizAnswers,
};
use super::config::ScoringConfig;
use super::{ScoreComponent, VisibilityFactor};

/// Business categories offered by the quiz, with their revenue-potential
/// multipliers. Sectors outside the catalog score like "Autre".
pub const SECTOR_CATALOG: [(&str, f64); 12] = [
    ("Restaurant / Café", 0.8),
    ("Commerce de détail", 1.0),
    ("Services à la personne", 1.2),
    ("Santé / Bien-être", 1.5),
    ("Automobile", 1.3),
    ("Immobilier", 2.0),
    ("Artisanat / BTP", 1.4),
    ("Services professionnels", 1.6),
    ("Tourisme / Hôtellerie", 0.9),
    ("Fitness / Sport", 1.1),
    ("Beauté / Esthétique", 1.2),
    ("Autre", 1.0),
];

pub(crate) fn sector_multiplier(sector: &str) -> f64 {
    SECTOR_CATALOG
        .iter()
        .find(|(name, _)| *name == sector)
        .map(|(_, factor)| *factor)
        .unwrap_or(1.0)
}

/// Score the visibility gaps that translate into lost clients. Each factor
/// contributes independently; unanswered questions contribute nothing, which
/// lets the same rubric serve both the mid-flow tally and the final
/// evaluation. The sum saturates at the configured cap.
pub(crate) fn visibility_gaps(
    answers: &QuizAnswers,
    config: &ScoringConfig,
) -> (Vec<ScoreComponent>, u32) {
    let mut components = Vec::new();
    let mut total: u32 = 0;

    if let Some(share) = answers.google_maps_clients {
        let (points, note) = match share {
            MapsClientShare::UnderTen => (30, "under 10% of clients come through local search"),
            MapsClientShare::TenToThirty => (20, "local search brings only 10-30% of clients"),
            MapsClientShare::ThirtyToFifty => (0, "local search already a major acquisition channel"),
            MapsClientShare::Unknown => (25, "local acquisition share untracked"),
        };
        if points > 0 {
            components.push(ScoreComponent {
                factor: VisibilityFactor::MapsClientShare,
                points,
                note: note.to_string(),
            });
            total += points;
        }
    }

    if let Some(state) = answers.google_profile_optimized {
        let (points, note) = match state {
            ProfileOptimization::Optimized => (0, "Google profile fully maintained"),
            ProfileOptimization::Neglected => (25, "Google profile not optimized"),
            ProfileOptimization::Unknown => (15, "Google profile state unknown"),
        };
        if points > 0 {
            components.push(ScoreComponent {
                factor: VisibilityFactor::ProfileOptimization,
                points,
                note: note.to_string(),
            });
            total += points;
        }
    }

    if let Some(coverage) = answers.platforms_count {
        let (points, note) = match coverage {
            PlatformCoverage::OneToTwo => (20, "listed on one or two platforms only"),
            PlatformCoverage::ThreeToFive => (0, "broad platform coverage"),
            PlatformCoverage::NoIdea => (25, "platform coverage untracked"),
        };
        if points > 0 {
            components.push(ScoreComponent {
                factor: VisibilityFactor::PlatformCoverage,
                points,
                note: note.to_string(),
            });
            total += points;
        }
    }

    if answers.has_website_linked == Some(false) {
        components.push(ScoreComponent {
            factor: VisibilityFactor::WebsiteLink,
            points: 15,
            note: "website not linked to the Google profile".to_string(),
        });
        total += 15;
    }

    if let Some(standing) = answers.competitors_ahead {
        let (points, note) = match standing {
            CompetitorStanding::Ahead => (20, "competitors hold the local rankings"),
            CompetitorStanding::NotAhead => (0, "ahead of local competitors"),
            CompetitorStanding::Unknown => (10, "competitive position unknown"),
        };
        if points > 0 {
            components.push(ScoreComponent {
                factor: VisibilityFactor::CompetitorPosition,
                points,
                note: note.to_string(),
            });
            total += points;
        }
    }

    (components, total.min(config.lost_clients_cap))
}

/// Project the monthly client potential: sector-scaled baseline adjusted by
/// the compounding state of the lead's current presence.
pub(crate) fn monthly_client_projection(answers: &QuizAnswers, config: &ScoringConfig) -> u32 {
    let sector = sector_multiplier(&answers.sector);

    let mut state = 1.0_f64;
    if matches!(
        answers.google_maps_clients,
        Some(MapsClientShare::TenToThirty | MapsClientShare::ThirtyToFifty)
    ) {
        state *= config.established_maps_bonus;
    }
    if answers.google_profile_optimized == Some(ProfileOptimization::Optimized) {
        state *= config.optimized_profile_bonus;
    }
    if answers.competitors_ahead == Some(CompetitorStanding::Ahead) {
        state *= config.contested_market_malus;
    }

    (config.base_monthly_clients as f64 * sector * state).round() as u32
}
