use axum::{Router, routing::get};

use crate::{
    routes::beacon_route::{
        beacon::{
            create_beacon, find_beacon, find_beacon_by_id, find_beacons_for_owner, list_beacons,
        },
        rendezvous::{
            find_rendezvous_by_id, find_rendezvous_for_beacon, list_rendezvous,
            record_rendezvous,
        },
    },
    state::AppState,
};

pub mod beacon;
pub mod rendezvous;

pub fn beacon_router(config: AppState) -> Router<AppState> {
    Router::new()
        .merge(beacons(config.clone()))
        .merge(rendezvous(config.clone()))
        .with_state(config)
}

fn beacons(config: AppState) -> Router<AppState> {
    Router::new()
        .route("/beacons", get(list_beacons).post(create_beacon))
        // static `id` wins over `{key}`; generated keys are 26 chars, never "id"
        .route("/beacons/id/{id}", get(find_beacon_by_id))
        .route("/beacons/{key}", get(find_beacon))
        .route("/beacons/{key}/rendezvous", get(find_rendezvous_for_beacon))
        .route("/owners/{owner_id}/beacons", get(find_beacons_for_owner))
        .with_state(config)
}

fn rendezvous(config: AppState) -> Router<AppState> {
    Router::new()
        // ! the beacon itself: records the hit, then serves the payload
        .route("/r/{key}", get(record_rendezvous))
        .route("/rendezvous", get(list_rendezvous))
        .route("/rendezvous/id/{id}", get(find_rendezvous_by_id))
        .with_state(config)
}
