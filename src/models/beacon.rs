use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Beacon {
    pub id: RecordId,
    pub key: String, // ! unique & (len = 26)
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub created_at: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct CreateBeacon {
    pub key: String,
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub created_at: String,
}
