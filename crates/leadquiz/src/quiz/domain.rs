use serde::{Deserialize, Serialize};

/// Identifier wrapper for quiz sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Respondent's position in the business. Wire values stay aligned with the
/// notification collaborator's template, which renders them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "dirigeant")]
    Owner,
    #[serde(rename = "responsable-marketing")]
    MarketingManager,
    #[serde(rename = "freelance")]
    Freelancer,
    #[serde(rename = "autre")]
    Other,
}

impl Role {
    /// Only decision-making roles can commit to an engagement.
    pub const fn is_decision_maker(self) -> bool {
        !matches!(self, Role::Other)
    }
}

/// What the respondent wants out of local SEO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MainObjective {
    #[serde(rename = "attirer-clients")]
    AttractClients,
    #[serde(rename = "visibilite-online")]
    OnlineVisibility,
    #[serde(rename = "google-visibility")]
    GoogleRanking,
    #[serde(rename = "autre")]
    Other,
}

/// Prior experience with SEO providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgencyExperience {
    #[serde(rename = "oui")]
    Yes,
    #[serde(rename = "non")]
    No,
    #[serde(rename = "en-cours")]
    InProgress,
}

/// Share of monthly clients arriving through Google Maps / local search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapsClientShare {
    #[serde(rename = "moins-10")]
    UnderTen,
    #[serde(rename = "10-30")]
    TenToThirty,
    #[serde(rename = "30-50")]
    ThirtyToFifty,
    #[serde(rename = "ne-sais-pas")]
    Unknown,
}

/// Whether the Google Business profile is fully maintained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileOptimization {
    #[serde(rename = "oui")]
    Optimized,
    #[serde(rename = "non")]
    Neglected,
    #[serde(rename = "ne-sais-pas")]
    Unknown,
}

/// How many listing platforms carry the business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformCoverage {
    #[serde(rename = "1-2")]
    OneToTwo,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "aucune-idee")]
    NoIdea,
}

/// Whether competitors outrank the business on local queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompetitorStanding {
    #[serde(rename = "oui")]
    Ahead,
    #[serde(rename = "non")]
    NotAhead,
    #[serde(rename = "ne-sais-pas")]
    Unknown,
}

/// Accumulated answers for one quiz attempt. `None`/empty means the question
/// has not been answered yet; the payload sent to the notification
/// collaborator serializes these fields with their camelCase names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizAnswers {
    pub role: Option<Role>,
    pub has_physical_location: Option<bool>,
    pub main_objective: Option<MainObjective>,
    pub has_used_seo_agency: Option<AgencyExperience>,

    pub google_maps_clients: Option<MapsClientShare>,
    pub google_profile_optimized: Option<ProfileOptimization>,
    pub platforms_count: Option<PlatformCoverage>,
    pub has_website_linked: Option<bool>,
    pub competitors_ahead: Option<CompetitorStanding>,

    pub sector: String,
    pub location: String,
    pub average_ticket: f64,
    pub accept_more_clients: Option<bool>,

    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
}

impl QuizAnswers {
    /// Contact gate applied before the final handoff: real first and last
    /// names plus something that can pass for an e-mail address.
    pub fn contact_is_valid(&self) -> bool {
        self.first_name.chars().count() > 1
            && self.last_name.chars().count() > 1
            && self.email.contains('@')
    }

    pub fn apply(&mut self, patch: AnswerPatch) {
        match patch {
            AnswerPatch::Role(value) => self.role = Some(value),
            AnswerPatch::HasPhysicalLocation(value) => self.has_physical_location = Some(value),
            AnswerPatch::MainObjective(value) => self.main_objective = Some(value),
            AnswerPatch::HasUsedSeoAgency(value) => self.has_used_seo_agency = Some(value),
            AnswerPatch::GoogleMapsClients(value) => self.google_maps_clients = Some(value),
            AnswerPatch::GoogleProfileOptimized(value) => {
                self.google_profile_optimized = Some(value)
            }
            AnswerPatch::PlatformsCount(value) => self.platforms_count = Some(value),
            AnswerPatch::HasWebsiteLinked(value) => self.has_website_linked = Some(value),
            AnswerPatch::CompetitorsAhead(value) => self.competitors_ahead = Some(value),
            AnswerPatch::Sector(value) => self.sector = value,
            AnswerPatch::Location(value) => self.location = value,
            AnswerPatch::AverageTicket(value) => self.average_ticket = value.max(0.0),
            AnswerPatch::AcceptMoreClients(value) => self.accept_more_clients = Some(value),
            AnswerPatch::FirstName(value) => self.first_name = value,
            AnswerPatch::LastName(value) => self.last_name = value,
            AnswerPatch::Email(value) => self.email = value,
            AnswerPatch::Phone(value) => self.phone = value,
            AnswerPatch::Website(value) => self.website = value,
        }
    }
}

/// One typed field update. A discriminated variant per field keeps the
/// enum-valued answers compile-time checked instead of routing updates
/// through stringly-typed keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum AnswerPatch {
    Role(Role),
    HasPhysicalLocation(bool),
    MainObjective(MainObjective),
    HasUsedSeoAgency(AgencyExperience),
    GoogleMapsClients(MapsClientShare),
    GoogleProfileOptimized(ProfileOptimization),
    PlatformsCount(PlatformCoverage),
    HasWebsiteLinked(bool),
    CompetitorsAhead(CompetitorStanding),
    Sector(String),
    Location(String),
    AverageTicket(f64),
    AcceptMoreClients(bool),
    FirstName(String),
    LastName(String),
    Email(String),
    Phone(String),
    Website(String),
}
