use surrealdb::{Error as SError, error::Db};

pub mod beacon_store;
pub mod rendezvous_store;

pub use beacon_store::BeaconStore;
pub use rendezvous_store::RendezvousStore;

pub(crate) fn is_unique_violation(err: &SError) -> bool {
    if let SError::Db(Db::IndexExists { .. }) = err {
        return true;
    }
    // remote engines hand back the server's message only:
    // "Database index `..` already contains .., with record `..`"
    err.to_string().contains("already contains")
}
