//! Main entry point for the scheduler demo binary
//!
//! Seeds a demo inventory, schedules a handful of sample requests
//! concurrently, and prints the resulting bookings plus an analytics
//! snapshot. Real deployments embed the library behind their own transport.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use shared::{logging, AppointmentCategory, TimeWindow, Urgency};

use scheduler::{
    bootstrap, AnalyticsAggregator, AppointmentRequest, LinearModelScorer, Preferences,
    ReschedulingEngine, RuleBasedScorer, SchedulingOrchestrator, Scorer, SlotStore,
};

/// Appointment scheduling demo
#[derive(Parser)]
#[command(name = "scheduler")]
#[command(about = "Schedules sample appointment requests against a generated inventory")]
pub struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Inventory horizon in days
    #[arg(long, default_value_t = bootstrap::DEFAULT_DAYS_AHEAD)]
    pub days: i64,

    /// Path to a JSON model-weight artifact; rule-based scoring when absent
    #[arg(long)]
    pub model_path: Option<PathBuf>,

    /// Number of recommendations to print per request
    #[arg(long, default_value = "5")]
    pub recommendations: usize,
}

fn sample_requests() -> Vec<AppointmentRequest> {
    vec![
        AppointmentRequest::new("John Doe", "Buddy", "Dog", AppointmentCategory::Checkup, Urgency::Medium),
        AppointmentRequest::new("Maria Garcia", "Whiskers", "Cat", AppointmentCategory::Vaccination, Urgency::Low),
        AppointmentRequest::new("Ken Adams", "Rex", "Dog", AppointmentCategory::Emergency, Urgency::Emergency),
        AppointmentRequest::new("Priya Patel", "Coco", "Rabbit", AppointmentCategory::Surgery, Urgency::High)
            .with_preferred_window(TimeWindow::new(9, 12)),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_tracing(Some(&args.log_level));
    logging::log_startup("scheduler", "appointment scheduling demo");

    // One-time inventory load before the system takes traffic
    let store = Arc::new(SlotStore::new());
    bootstrap::seed_inventory(&store, chrono::Utc::now(), args.days)?;

    // Scorer selected once at construction; read-only for process lifetime
    let scorer: Arc<dyn Scorer> = match &args.model_path {
        Some(path) => Arc::new(LinearModelScorer::from_artifact(path)?),
        None => Arc::new(RuleBasedScorer::new()),
    };

    let orchestrator = Arc::new(SchedulingOrchestrator::new(Arc::clone(&store), scorer));
    let analytics = AnalyticsAggregator::new(
        Arc::clone(&store),
        Arc::clone(orchestrator.ledger()),
    );

    // Schedule all sample requests concurrently
    let handles: Vec<_> = sample_requests()
        .into_iter()
        .map(|request| {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move {
                let subject = request.subject_name.clone();
                (subject, orchestrator.schedule_appointment(request, None).await)
            })
        })
        .collect();

    let mut first_booking = None;
    for handle in handles {
        let (subject, result) = handle.await?;
        match result {
            Ok(booking) => {
                logging::log_success(
                    "scheduler",
                    &format!(
                        "booked {} ({}) with provider {} (success likelihood {:.2})",
                        subject,
                        booking.request.category,
                        booking.provider_id,
                        booking.score.success_likelihood
                    ),
                );
                first_booking.get_or_insert(booking);
            }
            Err(e) => logging::log_error("scheduler", &format!("scheduling {subject}"), &e),
        }
    }

    // Show the read-only recommendation preview
    let preview_request = AppointmentRequest::new(
        "Demo Caller",
        "Milo",
        "Cat",
        AppointmentCategory::Checkup,
        Urgency::Medium,
    );
    let recommendations = orchestrator
        .get_schedule_recommendations(preview_request, args.recommendations)
        .await?;
    println!("{}", serde_json::to_string_pretty(&recommendations)?);

    // Demonstrate rescheduling under new constraints
    if let Some(booking) = first_booking {
        let engine = ReschedulingEngine::new(Arc::clone(&orchestrator));
        let prefs = Preferences {
            preferred_window: Some(TimeWindow::new(13, 17)),
            ..Preferences::default()
        };
        match engine.reschedule(booking.id, prefs).await {
            Ok(new_booking) => logging::log_success(
                "scheduler",
                &format!("rescheduled {} -> {}", booking.id, new_booking.id),
            ),
            Err(e) => logging::log_error("scheduler", "rescheduling", &e),
        }
    }

    println!("{}", serde_json::to_string_pretty(&analytics.snapshot())?);
    logging::log_shutdown("scheduler", "demo complete");
    Ok(())
}
