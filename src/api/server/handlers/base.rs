use axum::extract::{Extension, Json};

use crate::{
    api::{interface::DynAPI, BaseAPI},
    entities::BaseLocation,
    error::Error,
};

pub async fn find(Extension(api): Extension<DynAPI>) -> Result<Json<BaseLocation>, Error> {
    let base = api.find_base().await?;

    Ok(base.into())
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    Json(base): Json<BaseLocation>,
) -> Result<Json<BaseLocation>, Error> {
    let base = api.set_base(base).await?;

    Ok(base.into())
}
