use super::Engine;

use async_trait::async_trait;
use rand::{rngs::StdRng, SeedableRng};
use sqlx::{types::Json, Executor, Row};
use uuid::Uuid;

use crate::{
    api::{BaseAPI, PatrolAPI, ZoneAPI},
    entities::{Patrol, PatrolOutcome, PatrolPriority, PatrolRequest, Waypoint},
    error::{invalid_input_error, Error},
    planner::{self, PlanRequest},
};

// conservative first pass; the relaxed pass applies the caller's priority
const DRAFT_TOLERANCE_KM: f64 = 2.0;
const RELAXED_TOLERANCE_KM: f64 = 5.0;
const DECISION_MARGIN_KM: f64 = 5.0;

#[async_trait]
impl PatrolAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_patrol(&self, request: PatrolRequest) -> Result<PatrolOutcome, Error> {
        let base = self.find_base().await?;
        let zones = self.list_zones(None, None).await?;

        let plan = PlanRequest {
            target_km: request.target_km,
            tolerance_km: DRAFT_TOLERANCE_KM,
            radius_km: request.radius_km,
            cover_all: true,
        };

        let mut rng = StdRng::from_entropy();
        let route = planner::generate(&base, &zones, &plan, &self.roads, &mut rng).await?;

        if route.total_km > request.target_km + DECISION_MARGIN_KM {
            tracing::info!(
                total_km = route.total_km,
                "coverage exceeds the distance limit, awaiting a priority decision"
            );

            return Ok(PatrolOutcome::DecisionRequired {
                draft: Patrol::new(route.waypoints, route.total_km, None),
            });
        }

        let patrol = self.finalize(route).await?;

        Ok(PatrolOutcome::Ready { patrol })
    }

    #[tracing::instrument(skip(self))]
    async fn confirm_patrol(
        &self,
        request: PatrolRequest,
        priority: PatrolPriority,
    ) -> Result<Patrol, Error> {
        let base = self.find_base().await?;
        let zones = self.list_zones(None, None).await?;

        let plan = PlanRequest {
            target_km: request.target_km,
            tolerance_km: RELAXED_TOLERANCE_KM,
            radius_km: request.radius_km,
            cover_all: priority == PatrolPriority::Safety,
        };

        let mut rng = StdRng::from_entropy();
        let route = planner::generate(&base, &zones, &plan, &self.roads, &mut rng).await?;

        self.finalize(route).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_patrol(&self, token: Uuid) -> Result<Patrol, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM patrols WHERE token = $1").bind(&token))
            .await?;

        let result = maybe_result.ok_or_else(|| invalid_input_error())?;
        let Json(patrol) = result.try_get("data")?;

        Ok(patrol)
    }
}

impl Engine {
    #[tracing::instrument(skip_all)]
    async fn finalize(&self, route: planner::PatrolRoute) -> Result<Patrol, Error> {
        let coordinates: Vec<_> = route.waypoints.iter().map(Waypoint::coordinates).collect();

        // a routing failure degrades to the straight-line preview
        let road = match self.roads.road_route(&coordinates).await {
            Ok(road) => road,
            Err(err) => {
                tracing::warn!(code = err.code, "road routing failed");
                None
            }
        };

        let patrol = Patrol::new(route.waypoints, route.total_km, road);

        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query("INSERT INTO patrols (token, data) VALUES ($1, $2)")
                .bind(&patrol.token)
                .bind(Json(&patrol)),
        )
        .await?;

        Ok(patrol)
    }
}
