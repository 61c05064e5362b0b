use axum::extract::{Extension, Json, Path, Query};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::{interface::DynAPI, ZoneAPI},
    entities::{Coordinates, RiskBand, Zone, ZoneStats},
    error::Error,
};

#[derive(Deserialize)]
pub struct CreateZoneParams {
    name: String,
    coordinates: Coordinates,
    risk: i32,
}

#[derive(Deserialize)]
pub struct ListZonesParams {
    band: Option<RiskBand>,
    search: Option<String>,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateZoneParams>,
) -> Result<Json<Zone>, Error> {
    let zone = api
        .create_zone(params.name, params.coordinates, params.risk)
        .await?;

    Ok(zone.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Zone>, Error> {
    let zone = api.find_zone(id).await?;

    Ok(zone.into())
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<ListZonesParams>,
) -> Result<Json<Vec<Zone>>, Error> {
    let zones = api.list_zones(params.band, params.search).await?;

    Ok(zones.into())
}

pub async fn reset(Extension(api): Extension<DynAPI>) -> Result<(), Error> {
    api.reset_zones().await
}

pub async fn stats(Extension(api): Extension<DynAPI>) -> Result<Json<ZoneStats>, Error> {
    let stats = api.zone_stats().await?;

    Ok(stats.into())
}
