use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Roster entry. Read-only to this service; iterated in `_id` order by the
/// reminder job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    pub employee_id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub contact: Option<String>,
}
