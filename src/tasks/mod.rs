//! Background scheduled tasks.
//!
//! Currently a single recurring job: the unread-message reminder
//! reconciliation. Call `spawn_all` once during startup; it detaches the
//! task via `tokio::spawn` and does not block.

use std::sync::Arc;

use chrono::Utc;
use mongodb::Database;

use crate::config::AppConfig;
use crate::database::stores::{MongoMessageStore, MongoRosterStore, MongoSettingsStore};
use crate::services::notifier::Notifier;
use crate::services::reminder_service::ReminderService;

pub fn spawn_all(db: Database, notifier: Arc<dyn Notifier>, config: &AppConfig) {
    let service = ReminderService::new(
        MongoSettingsStore::new(db.clone()),
        MongoMessageStore::new(db.clone()),
        MongoRosterStore::new(db),
        notifier,
        config.reminder_portal_url.clone(),
    );
    let interval_secs = config.reminder_interval_secs;

    tokio::spawn(async move {
        loop {
            // Each run is awaited before sleeping, so invocations never
            // overlap within this process.
            match service.run(Utc::now()).await {
                Ok(outcome) => tracing::info!("Reminder run finished: {outcome:?}"),
                Err(e) => tracing::error!("Reminder run failed: {e}"),
            }
            tokio::time::sleep(std::time::Duration::from_secs(interval_secs)).await;
        }
    });
}
