//! Unread-message reminder reconciliation.
//!
//! Each run: load the reminder threshold, find the oldest message past the
//! cutoff that has not been handled yet, snapshot its acknowledgers, walk the
//! employee roster page by page and SMS everyone who has not seen it, then
//! mark the message once at least one reminder went out.
//!
//! Per-employee delivery failures are isolated: they are logged and counted
//! but never abort the batch or the run.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use mongodb::bson::oid::ObjectId;

use crate::errors::Result;
use crate::models::employee::Employee;
use crate::models::message::Message;
use crate::models::settings::ReminderSettings;
use crate::services::notifier::Notifier;
use crate::services::phone::normalize_us_phone;

pub const DEFAULT_PAGE_SIZE: usize = 50;

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// The `settings/reminder` document, if the portal has written one.
    async fn reminder_settings(&self) -> Result<Option<ReminderSettings>>;
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Oldest message with `created_at < cutoff` that is not already marked
    /// `is_reminder`.
    async fn oldest_unacknowledged_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Option<Message>>;

    async fn mark_reminded(&self, id: &ObjectId) -> Result<()>;
}

#[async_trait]
pub trait RosterStore: Send + Sync {
    /// Up to `page_size` employees in `_id` order, strictly after `after`.
    async fn page(&self, after: Option<ObjectId>, page_size: usize) -> Result<Vec<Employee>>;
}

/// Lazy, finite sequence of roster pages.
///
/// The cursor is the `_id` of the last document of the previous page; the
/// sequence ends on an empty page or a page shorter than `page_size`. Not
/// restartable mid-run.
pub struct RosterPager<'a, R: RosterStore> {
    roster: &'a R,
    cursor: Option<ObjectId>,
    page_size: usize,
    done: bool,
}

impl<'a, R: RosterStore> RosterPager<'a, R> {
    pub fn new(roster: &'a R, page_size: usize) -> Self {
        Self {
            roster,
            cursor: None,
            page_size,
            done: false,
        }
    }

    pub async fn next_page(&mut self) -> Result<Option<Vec<Employee>>> {
        if self.done {
            return Ok(None);
        }

        let items = self.roster.page(self.cursor, self.page_size).await?;
        if items.is_empty() {
            self.done = true;
            return Ok(None);
        }
        if items.len() < self.page_size {
            self.done = true;
        }

        self.cursor = items.last().and_then(|e| e._id);
        if self.cursor.is_none() {
            // A document without an _id cannot anchor the next page.
            self.done = true;
        }

        Ok(Some(items))
    }
}

/// Terminal state of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No `settings/reminder` document; the run is a no-op, not an error.
    NoSettings,
    /// No message older than the cutoff is awaiting a reminder.
    NoEligibleMessage,
    Completed {
        total_processed: u64,
        count_reminded: u64,
    },
    /// Some per-employee dispatches failed; the run still completed.
    CompletedWithErrors {
        total_processed: u64,
        count_reminded: u64,
        failed: u64,
    },
}

pub struct ReminderService<S, M, R> {
    settings: S,
    messages: M,
    roster: R,
    notifier: Arc<dyn Notifier>,
    portal_url: String,
    page_size: usize,
}

impl<S, M, R> ReminderService<S, M, R>
where
    S: SettingsStore,
    M: MessageStore,
    R: RosterStore,
{
    pub fn new(
        settings: S,
        messages: M,
        roster: R,
        notifier: Arc<dyn Notifier>,
        portal_url: String,
    ) -> Self {
        Self {
            settings,
            messages,
            roster,
            notifier,
            portal_url,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub async fn run(&self, now: DateTime<Utc>) -> Result<RunOutcome> {
        let Some(settings) = self.settings.reminder_settings().await? else {
            tracing::warn!("Reminder settings document not found, skipping run");
            return Ok(RunOutcome::NoSettings);
        };

        let cutoff = now - Duration::milliseconds(settings.cutoff_ms());
        tracing::info!(
            "Reminder threshold: {} days {} hours, cutoff {}",
            settings.days,
            settings.hours,
            cutoff.to_rfc3339()
        );

        let Some(message) = self.messages.oldest_unacknowledged_before(cutoff).await? else {
            tracing::info!("No messages older than threshold, skipping reminders");
            return Ok(RunOutcome::NoEligibleMessage);
        };

        // Snapshot the acknowledgers once; pages seen later in the run are
        // judged against this same set.
        let seen: HashSet<&str> = message
            .user_msg_seen
            .iter()
            .map(|s| s.employee_id.as_str())
            .collect();

        let mut total_processed: u64 = 0;
        let mut count_reminded: u64 = 0;
        let mut failed: u64 = 0;

        let mut pager = RosterPager::new(&self.roster, self.page_size);
        while let Some(page) = pager.next_page().await? {
            tracing::info!("Processing {} employees", page.len());
            for employee in &page {
                total_processed += 1;
                if seen.contains(employee.employee_id.as_str()) {
                    continue;
                }

                match self.send_reminder(employee, settings.days).await {
                    Ok(sid) => {
                        count_reminded += 1;
                        tracing::info!(
                            "Reminder SMS sent to employee {} | SID: {sid}",
                            employee.employee_id
                        );
                    }
                    Err(e) => {
                        failed += 1;
                        tracing::error!(
                            "Failed to send reminder to employee {}: {e}",
                            employee.employee_id
                        );
                    }
                }
            }
        }

        if count_reminded > 0 {
            if let Some(id) = &message._id {
                // Best-effort: a failed flag update is retried naturally on the
                // next run since the message still matches the query.
                match self.messages.mark_reminded(id).await {
                    Ok(()) => tracing::info!("Marked message {id} as reminded"),
                    Err(e) => tracing::error!("Failed to mark message {id} as reminded: {e}"),
                }
            }
        } else {
            tracing::info!("No employees needed reminders, message left unmarked");
        }

        tracing::info!(
            "Reminder run finished: {total_processed} processed, {count_reminded} reminded, {failed} failed"
        );

        Ok(if failed > 0 {
            RunOutcome::CompletedWithErrors {
                total_processed,
                count_reminded,
                failed,
            }
        } else {
            RunOutcome::Completed {
                total_processed,
                count_reminded,
            }
        })
    }

    async fn send_reminder(&self, employee: &Employee, days: i64) -> Result<String> {
        let contact = employee.contact.as_deref().unwrap_or_default();
        let phone = normalize_us_phone(contact)?;

        let name = if employee.name.is_empty() {
            "Employee"
        } else {
            employee.name.as_str()
        };
        let body = format!(
            "Hello {name}, you have an unread message pending for more than {days} days. \
             Please check your message portal at {} - Dispatch Team",
            self.portal_url
        );

        self.notifier.send_sms(&phone, &body).await
    }
}
