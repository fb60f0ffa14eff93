use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

// A beacon retrieval. `beacon_key` refers to `Beacon::key`, not to its record id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Rendezvous {
    pub id: RecordId,
    pub beacon_key: String,
    pub remote_address: String,
    pub created_at: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct CreateRendezvous {
    pub beacon_key: String,
    pub remote_address: String,
    pub created_at: String,
}
