use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Executor, Row};

use crate::{api::BaseAPI, entities::BaseLocation, error::Error};

// single active base
const BASE_ROW: i32 = 1;

#[async_trait]
impl BaseAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_base(&self) -> Result<BaseLocation, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(
                sqlx::query("SELECT data FROM base_location WHERE id = $1").bind(BASE_ROW),
            )
            .await?;

        let base = match maybe_result {
            Some(result) => {
                let Json(base) = result.try_get("data")?;
                base
            }
            None => BaseLocation::default(),
        };

        Ok(base)
    }

    #[tracing::instrument(skip(self))]
    async fn set_base(&self, base: BaseLocation) -> Result<BaseLocation, Error> {
        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query(
                "INSERT INTO base_location (id, data) VALUES ($1, $2) ON CONFLICT (id) DO UPDATE SET data = $2",
            )
            .bind(BASE_ROW)
            .bind(Json(&base)),
        )
        .await?;

        Ok(base)
    }
}
