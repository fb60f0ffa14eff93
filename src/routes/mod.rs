pub mod beacon_route;

pub async fn root_route() -> &'static str {
    "beacon rendezvous service"
}
