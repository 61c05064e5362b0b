use axum::extract::{Extension, Json, Path};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::{interface::DynAPI, PatrolAPI},
    entities::{Patrol, PatrolOutcome, PatrolPriority, PatrolRequest},
    error::Error,
};

#[derive(Deserialize)]
pub struct GeneratePatrolParams {
    target_km: f64,
    radius_km: f64,
    // absent on the first attempt; set when the caller has answered the
    // safety-versus-distance prompt
    priority: Option<PatrolPriority>,
}

#[axum_macros::debug_handler]
pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<GeneratePatrolParams>,
) -> Result<Json<PatrolOutcome>, Error> {
    let request = PatrolRequest {
        target_km: params.target_km,
        radius_km: params.radius_km,
    };

    let outcome = match params.priority {
        None => api.create_patrol(request).await?,
        Some(priority) => {
            let patrol = api.confirm_patrol(request, priority).await?;
            PatrolOutcome::Ready { patrol }
        }
    };

    Ok(outcome.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(token): Path<Uuid>,
) -> Result<Json<Patrol>, Error> {
    let patrol = api.find_patrol(token).await?;

    Ok(patrol.into())
}
