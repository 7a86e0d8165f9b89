//! Volunteam client core
//!
//! Driver binary: loads settings, syncs the events collection and warms the
//! shared organizer cache for upcoming events

use std::collections::BTreeSet;
use chrono::Utc;
use tracing::{info, warn};

use volunteam::{
    config::{CacheBackend, Settings},
    services::ServiceFactory,
    state::EventsStore,
    utils::{helpers::format_timestamp, logging},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", volunteam::info());

    let cache_backend = settings.cache.backend;
    let services = ServiceFactory::new(settings, EventsStore::new())?;

    let health = services.health_check().await;
    for issue in health.get_issues() {
        warn!(issue = %issue, "Service degraded");
    }

    let count = services.event_service.refresh().await?;
    info!(count = count, "Events loaded");

    let upcoming = services.events().upcoming(Utc::now()).await;
    for event in &upcoming {
        info!(
            event_id = %event.id,
            name = %event.name,
            date_time = %format_timestamp(event.date_time),
            volunteers = event.volunteers_ids.len(),
            volunteers_needed = event.volunteers_needed,
            "Upcoming event"
        );
    }

    // Only a shared cache outlives this process
    if cache_backend == CacheBackend::Redis {
        let organizer_ids: BTreeSet<&str> = upcoming.iter().map(|e| e.organizer_id.as_str()).collect();
        let organizer_ids: Vec<&str> = organizer_ids.into_iter().collect();
        let warmed = services.user_service.warm_users(&organizer_ids).await;
        info!(warmed = warmed, total = organizer_ids.len(), "Organizer cache warmed");
    }

    Ok(())
}
