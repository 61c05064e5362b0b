use super::Engine;

use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{types::Json, Executor, Row};
use uuid::Uuid;

use crate::{
    api::ZoneAPI,
    entities::{Coordinates, RiskBand, Zone, ZoneStats},
    error::{invalid_input_error, Error},
};

#[async_trait]
impl ZoneAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_zone(
        &self,
        name: String,
        coordinates: Coordinates,
        risk: i32,
    ) -> Result<Zone, Error> {
        let zone = Zone::new(name, coordinates, risk)?;

        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query("INSERT INTO zones (id, data) VALUES ($1, $2)")
                .bind(&zone.id)
                .bind(Json(&zone)),
        )
        .await?;

        Ok(zone)
    }

    #[tracing::instrument(skip(self))]
    async fn find_zone(&self, id: Uuid) -> Result<Zone, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM zones WHERE id = $1").bind(&id))
            .await?;

        let result = maybe_result.ok_or_else(|| invalid_input_error())?;
        let Json(zone) = result.try_get("data")?;

        Ok(zone)
    }

    #[tracing::instrument(skip(self))]
    async fn list_zones(
        &self,
        band: Option<RiskBand>,
        search: Option<String>,
    ) -> Result<Vec<Zone>, Error> {
        let mut conn = self.pool.acquire().await?;

        let mut rows = conn.fetch(sqlx::query("SELECT data FROM zones"));

        let mut zones = Vec::new();

        while let Some(row) = rows.try_next().await? {
            let Json::<Zone>(zone) = row.try_get("data")?;
            zones.push(zone);
        }

        if let Some(band) = band {
            zones.retain(|zone| zone.band() == band);
        }

        if let Some(search) = search {
            let needle = search.to_lowercase();
            zones.retain(|zone| zone.name.to_lowercase().contains(&needle));
        }

        Ok(zones)
    }

    #[tracing::instrument(skip(self))]
    async fn reset_zones(&self) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;

        conn.execute(sqlx::query("DELETE FROM zones")).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn zone_stats(&self) -> Result<ZoneStats, Error> {
        let zones = self.list_zones(None, None).await?;

        Ok(ZoneStats::tally(&zones))
    }
}
