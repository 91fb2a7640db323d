use chrono::{DateTime, Utc};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// One acknowledgement entry in a message's `user_msg_seen` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MsgSeen {
    pub employee_id: String,
}

/// A dispatch message. The reminder job reads the oldest message whose
/// `created_at` is past the configured cutoff and flips `is_reminder`
/// after reminders have actually been sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub user_msg_seen: Vec<MsgSeen>,

    #[serde(default)]
    pub is_reminder: bool,
}
