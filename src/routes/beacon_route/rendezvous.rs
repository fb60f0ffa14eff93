use std::path::Path as FsPath;

use axum::{
    Json,
    extract::{Path, Query, Request, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::{
    consts::DEFAULT_PAYLOAD,
    errors::{Error, Result},
    middleware::RemoteAddress,
    models::rendezvous::Rendezvous,
    routes::beacon_route::beacon::DateQuery,
    state::AppState,
    utils::time::parse_date,
};

pub async fn record_rendezvous(
    State(state): State<AppState>,
    Path(key): Path<String>,
    RemoteAddress(remote_address): RemoteAddress,
    request: Request,
) -> Result<Response> {
    state
        .service
        .record_rendezvous(&key, remote_address)
        .await?;

    let mut response = serve_payload(state.payload.as_deref(), request).await?;
    // every fetch has to reach us to be recorded
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    Ok(response)
}

async fn serve_payload(payload: Option<&FsPath>, request: Request) -> Result<Response> {
    let Some(path) = payload else {
        return Ok(([(header::CONTENT_TYPE, "image/gif")], DEFAULT_PAYLOAD).into_response());
    };
    if !tokio::fs::try_exists(path).await? {
        return Err(Error::PayloadUnavailable(path.display().to_string()));
    }

    let response = ServeFile::new(path)
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {});
    Ok(response.into_response())
}

pub async fn find_rendezvous_for_beacon(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Vec<Rendezvous>>> {
    let rendezvous = state.service.find_rendezvous_for_beacon(&key).await?;
    Ok(Json(rendezvous))
}

/// Rendezvous recorded on `?date=YYYY-MM-DD`, today (UTC) when omitted.
pub async fn list_rendezvous(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<Rendezvous>>> {
    let date = match query.date {
        Some(date) => parse_date(&date)?,
        None => Utc::now().date_naive(),
    };
    let rendezvous = state.service.rendezvous_on(date).await?;
    Ok(Json(rendezvous))
}

pub async fn find_rendezvous_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Rendezvous>> {
    state
        .service
        .find_rendezvous_by_id(&id)
        .await?
        .map(Json)
        .ok_or(Error::RendezvousNotFound(id))
}
