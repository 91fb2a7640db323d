//! MongoDB-backed implementations of the reminder job's store seams.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime as BsonDateTime},
    Collection, Database,
};

use crate::errors::{AppError, Result};
use crate::models::employee::Employee;
use crate::models::message::Message;
use crate::models::settings::ReminderSettings;
use crate::services::reminder_service::{MessageStore, RosterStore, SettingsStore};

#[derive(Clone)]
pub struct MongoSettingsStore {
    db: Database,
}

impl MongoSettingsStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SettingsStore for MongoSettingsStore {
    async fn reminder_settings(&self) -> Result<Option<ReminderSettings>> {
        let settings: Collection<ReminderSettings> = self.db.collection("settings");
        Ok(settings.find_one(doc! { "_id": "reminder" }).await?)
    }
}

#[derive(Clone)]
pub struct MongoMessageStore {
    db: Database,
}

impl MongoMessageStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MessageStore for MongoMessageStore {
    async fn oldest_unacknowledged_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Option<Message>> {
        let messages: Collection<Message> = self.db.collection("message");
        let cutoff_bson = BsonDateTime::from_millis(cutoff.timestamp_millis());

        let mut cursor = messages
            .find(doc! {
                "created_at": { "$lt": cutoff_bson },
                "is_reminder": { "$ne": true },
            })
            .sort(doc! { "created_at": 1 })
            .limit(1)
            .await?;

        cursor.try_next().await.map_err(AppError::from)
    }

    async fn mark_reminded(&self, id: &ObjectId) -> Result<()> {
        let messages: Collection<Message> = self.db.collection("message");
        messages
            .update_one(doc! { "_id": *id }, doc! { "$set": { "is_reminder": true } })
            .await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct MongoRosterStore {
    db: Database,
}

impl MongoRosterStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RosterStore for MongoRosterStore {
    async fn page(&self, after: Option<ObjectId>, page_size: usize) -> Result<Vec<Employee>> {
        let employees: Collection<Employee> = self.db.collection("employee");
        let filter = match after {
            Some(id) => doc! { "_id": { "$gt": id } },
            None => doc! {},
        };

        let cursor = employees
            .find(filter)
            .sort(doc! { "_id": 1 })
            .limit(page_size as i64)
            .await?;

        cursor.try_collect().await.map_err(AppError::from)
    }
}
