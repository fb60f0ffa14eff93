use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::{
    errors::{Error, Result},
    models::beacon::Beacon,
    state::AppState,
    utils::{
        time::parse_date,
        validated_form::ValidatedJson,
        validator::{validate_not_blank, validate_owner_id},
    },
};

#[derive(serde::Deserialize, Debug, Clone, Validate)]
pub struct CreateBeaconRequest {
    #[serde(alias = "ownerId", alias = "userId")]
    #[validate(length(min = 1, max = 255), custom(function = "validate_owner_id"))]
    pub owner_id: String,
    #[serde(alias = "beaconName")]
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
}

#[derive(serde::Deserialize, Debug, Clone, Default)]
pub struct DateQuery {
    pub date: Option<String>,
}

pub async fn create_beacon(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateBeaconRequest>,
) -> Result<(StatusCode, Json<Beacon>)> {
    let beacon = state
        .service
        .create(input.owner_id, input.name, input.description)
        .await?;

    Ok((StatusCode::CREATED, Json(beacon)))
}

pub async fn list_beacons(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<Beacon>>> {
    let beacons = match query.date {
        Some(date) => state.service.beacons_created_on(parse_date(&date)?).await?,
        None => state.service.list_beacons().await?,
    };
    Ok(Json(beacons))
}

pub async fn find_beacon(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Beacon>> {
    state
        .service
        .find_beacon(&key)
        .await?
        .map(Json)
        .ok_or(Error::BeaconNotFound(key))
}

pub async fn find_beacon_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Beacon>> {
    state
        .service
        .find_beacon_by_id(&id)
        .await?
        .map(Json)
        .ok_or(Error::BeaconNotFound(id))
}

pub async fn find_beacons_for_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<Json<Vec<Beacon>>> {
    let beacons = state.service.find_beacons_for_owner(&owner_id).await?;
    Ok(Json(beacons))
}
