use serde::{Deserialize, Serialize};

/// Reminder threshold, stored as the `settings/reminder` document.
/// Missing fields default to 0, matching how the portal writes it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReminderSettings {
    #[serde(default)]
    pub days: i64,

    #[serde(default)]
    pub hours: i64,
}

impl ReminderSettings {
    /// Cutoff age in milliseconds.
    pub fn cutoff_ms(&self) -> i64 {
        self.days * 24 * 60 * 60 * 1000 + self.hours * 60 * 60 * 1000
    }
}
