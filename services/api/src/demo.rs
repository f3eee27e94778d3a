use crate::infra::InMemorySessionStore;
use async_trait::async_trait;
use clap::Args;
use leadquiz::error::AppError;
use leadquiz::quiz::{
    AgencyExperience, AnswerPatch, CompetitorStanding, LeadNotifier, LeadSubmission,
    MainObjective, MapsClientShare, NotifyError, PlatformCoverage, ProfileOptimization,
    QuizService, Role, ScoringConfig, SessionView, SECTOR_CATALOG,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Business sector for the scripted lead (quiz catalog entry or free text)
    #[arg(long, default_value = "Immobilier")]
    pub(crate) sector: String,
    /// City the scripted lead operates from
    #[arg(long, default_value = "Lyon")]
    pub(crate) location: String,
    /// Average ticket in euros; below 30 the lead is disqualified
    #[arg(long, default_value_t = 50.0)]
    pub(crate) ticket: f64,
    /// Monthly SEO budget for the ROI line (defaults to the rubric's 800)
    #[arg(long)]
    pub(crate) investment: Option<f64>,
    /// Skip the redirected-lead portion of the demo
    #[arg(long)]
    pub(crate) skip_redirect: bool,
}

/// Demo stand-in for the notification collaborator: prints the payload the
/// production notifier would POST.
struct StdoutNotifier;

#[async_trait]
impl LeadNotifier for StdoutNotifier {
    async fn publish(&self, submission: &LeadSubmission) -> Result<(), NotifyError> {
        match serde_json::to_string_pretty(submission) {
            Ok(json) => {
                println!("  Outbound payload:\n{json}");
                Ok(())
            }
            Err(err) => Err(NotifyError::Transport(err.to_string())),
        }
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        sector,
        location,
        ticket,
        investment,
        skip_redirect,
    } = args;

    println!("Lead qualification quiz demo");

    let in_catalog = SECTOR_CATALOG.iter().any(|(name, _)| *name == sector);
    if !in_catalog {
        println!("Sector '{sector}' is not in the catalog; it scores with the default multiplier");
    }

    let store = Arc::new(InMemorySessionStore::default());
    let notifier = Arc::new(StdoutNotifier);
    let service = Arc::new(QuizService::new(store, notifier, ScoringConfig::default()));

    let view = service.start()?;
    let id = view.session_id.clone();
    println!("Session {} opened at stage '{}'", id.0, view.stage.label());

    let view = service.advance(&id)?;
    print_stage_header(&view);
    for patch in [
        AnswerPatch::Role(Role::Freelancer),
        AnswerPatch::HasPhysicalLocation(true),
        AnswerPatch::MainObjective(MainObjective::AttractClients),
        AnswerPatch::HasUsedSeoAgency(AgencyExperience::No),
    ] {
        service.apply(&id, patch)?;
    }
    println!("  Freelancer with a physical location, looking to attract clients");

    let mut view = service.advance(&id)?;
    print_stage_header(&view);
    for patch in [
        AnswerPatch::GoogleMapsClients(MapsClientShare::UnderTen),
        AnswerPatch::GoogleProfileOptimized(ProfileOptimization::Neglected),
        AnswerPatch::PlatformsCount(PlatformCoverage::NoIdea),
        AnswerPatch::HasWebsiteLinked(false),
        AnswerPatch::CompetitorsAhead(CompetitorStanding::Ahead),
    ] {
        view = service.apply(&id, patch)?;
    }
    println!("  Visibility gaps found:");
    for component in &view.audit.components {
        println!("    - +{} {}", component.points, component.note);
    }
    println!(
        "  Estimated share of monthly clients at risk: {}%",
        view.audit.lost_clients
    );

    let mut view = service.advance(&id)?;
    print_stage_header(&view);
    for patch in [
        AnswerPatch::Sector(sector.clone()),
        AnswerPatch::Location(location.clone()),
        AnswerPatch::AverageTicket(ticket),
        AnswerPatch::AcceptMoreClients(true),
    ] {
        view = service.apply(&id, patch)?;
    }
    println!("  {sector} in {location}, average ticket {ticket:.0} EUR");
    if let Some(preview) = &view.preview {
        println!(
            "  Live preview: {} to {} clients per month",
            preview.min_clients, preview.max_clients
        );
        println!(
            "  Revenue potential: {:.0} EUR/month, {:.0} EUR/year",
            preview.monthly_revenue, preview.yearly_revenue
        );
    }

    let view = service.advance(&id)?;
    print_stage_header(&view);
    if let Some(result) = &view.result {
        if result.is_qualified {
            println!(
                "  Qualified: {} potential clients/month, {:.0} EUR/month projected",
                result.potential_clients, result.estimated_revenue
            );
            let roi = service.engine().roi(&view.answers, investment);
            println!("  Estimated ROI on the monthly SEO budget: {roi}%");
        } else {
            println!("  Not qualified:");
            for reason in &result.reasons {
                println!("    - {}", reason.summary());
            }
        }
    }

    for patch in [
        AnswerPatch::FirstName("Camille".to_string()),
        AnswerPatch::LastName("Moreau".to_string()),
        AnswerPatch::Email("camille@exemple.fr".to_string()),
        AnswerPatch::Phone("06 12 34 56 78".to_string()),
    ] {
        service.apply(&id, patch)?;
    }

    println!("\nHanding the lead to the notification collaborator");
    let view = service.submit(&id).await?;
    println!(
        "Dispatch acknowledged; session finished at stage '{}'",
        view.stage.label()
    );

    if skip_redirect {
        return Ok(());
    }

    println!("\nRedirected lead demo");
    let id = service.start()?.session_id;
    service.advance(&id)?;
    let view = service.apply(&id, AnswerPatch::Role(Role::Other))?;
    println!("Answering role 'autre' during filtering routes the lead away:");
    if let Some(reason) = view.redirect {
        println!("  {reason}");
    }

    Ok(())
}

fn print_stage_header(view: &SessionView) {
    if let Some(progress) = &view.progress {
        println!(
            "\n[{}/{}] {} | {}",
            progress.step, progress.total, progress.title, progress.subtitle
        );
    }
}
