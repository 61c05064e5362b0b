use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{
    BaseLocation, Coordinates, Patrol, PatrolOutcome, PatrolPriority, PatrolRequest, RiskBand,
    Zone, ZoneStats,
};
use crate::error::Error;

#[async_trait]
pub trait ZoneAPI {
    async fn create_zone(
        &self,
        name: String,
        coordinates: Coordinates,
        risk: i32,
    ) -> Result<Zone, Error>;
    async fn find_zone(&self, id: Uuid) -> Result<Zone, Error>;
    async fn list_zones(
        &self,
        band: Option<RiskBand>,
        search: Option<String>,
    ) -> Result<Vec<Zone>, Error>;
    async fn reset_zones(&self) -> Result<(), Error>;
    async fn zone_stats(&self) -> Result<ZoneStats, Error>;
}

#[async_trait]
pub trait BaseAPI {
    async fn find_base(&self) -> Result<BaseLocation, Error>;
    async fn set_base(&self, base: BaseLocation) -> Result<BaseLocation, Error>;
}

#[async_trait]
pub trait PatrolAPI {
    async fn create_patrol(&self, request: PatrolRequest) -> Result<PatrolOutcome, Error>;
    async fn confirm_patrol(
        &self,
        request: PatrolRequest,
        priority: PatrolPriority,
    ) -> Result<Patrol, Error>;
    async fn find_patrol(&self, token: Uuid) -> Result<Patrol, Error>;
}

pub trait API: ZoneAPI + BaseAPI + PatrolAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
