use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};

use crate::{
    errors::{Error, Result},
    state::AppState,
};

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Network origin of the request, captured for each rendezvous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAddress(pub String);

impl FromRequestParts<AppState> for RemoteAddress {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        if state.trust_forwarded {
            if let Some(addr) = forwarded_address(&parts.headers) {
                return Ok(RemoteAddress(addr));
            }
        }

        // the extractor also honours `MockConnectInfo` layers
        ConnectInfo::<SocketAddr>::from_request_parts(parts, state)
            .await
            .map(|ConnectInfo(addr)| RemoteAddress(addr.ip().to_string()))
            .map_err(|_| {
                tracing::warn!("Request without peer address or forwarding headers");
                Error::UnknownOrigin
            })
    }
}

fn forwarded_address(headers: &HeaderMap) -> Option<String> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    // the client is the left-most entry of `X-Forwarded-For`
    header(X_FORWARDED_FOR)
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or_else(|| header(X_REAL_IP))
        .map(str::to_owned)
}
