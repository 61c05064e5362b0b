use std::env;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    entities::{Coordinates, RoadRoute},
    error::{invalid_input_error, upstream_error, Error},
    planner::RoadSnap,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// openrouteservice driving-directions client.
#[derive(Clone, Debug)]
pub struct OpenRoute;

impl OpenRoute {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Clone, Debug, Serialize)]
struct DirectionsRequest {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Clone, Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Clone, Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
    properties: Properties,
}

#[derive(Clone, Debug, Deserialize)]
struct Geometry {
    // GeoJSON ordering: [lng, lat]
    coordinates: Vec<[f64; 2]>,
}

#[derive(Clone, Debug, Deserialize)]
struct Properties {
    summary: Summary,
}

#[derive(Clone, Debug, Deserialize)]
struct Summary {
    // metres and seconds
    distance: f64,
    duration: f64,
}

#[tracing::instrument(skip(waypoints), fields(count = waypoints.len()))]
async fn directions(waypoints: &[Coordinates]) -> Result<Option<Feature>, Error> {
    let api_base = env::var("OPEN_ROUTE_API_BASE")?;
    let url = format!("https://{}/v2/directions/driving-car/geojson", api_base);
    let key = env::var("OPEN_ROUTE_API_KEY")?;

    let body = DirectionsRequest {
        coordinates: waypoints.iter().map(|point| (*point).into()).collect(),
    };

    let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

    let res = client
        .post(url)
        .header("Authorization", key)
        .json(&body)
        .send()
        .await?;

    let status_code = res.status().as_u16();

    // the service answers 404 when no drivable connection exists
    if status_code == 404 {
        return Ok(None);
    } else if status_code >= 400 && status_code < 500 {
        return Err(invalid_input_error());
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    let data: FeatureCollection = res.json().await?;

    Ok(data.features.into_iter().next())
}

fn to_road_route(feature: Feature) -> RoadRoute {
    let coordinates = feature
        .geometry
        .coordinates
        .iter()
        .map(|pair| Coordinates::new(pair[1], pair[0]))
        .collect();

    RoadRoute {
        coordinates,
        distance_km: feature.properties.summary.distance / 1000.0,
        duration_min: feature.properties.summary.duration / 60.0,
    }
}

impl OpenRoute {
    /// Drivable path connecting `waypoints` in order, or None when the
    /// service cannot route them.
    #[tracing::instrument(skip_all)]
    pub async fn road_route(&self, waypoints: &[Coordinates]) -> Result<Option<RoadRoute>, Error> {
        let maybe_feature = directions(waypoints).await?;

        Ok(maybe_feature.map(to_road_route))
    }
}

#[async_trait]
impl RoadSnap for OpenRoute {
    #[tracing::instrument(skip(self))]
    async fn snap(&self, point: Coordinates, base: Coordinates) -> Result<Option<Coordinates>, Error> {
        // a failed request is a sampling miss, not a fatal error
        let maybe_feature = match directions(&[base, point]).await {
            Ok(maybe_feature) => maybe_feature,
            Err(err) => {
                tracing::warn!(code = err.code, "road snap request failed");
                return Ok(None);
            }
        };

        let snapped = maybe_feature.and_then(|feature| {
            feature
                .geometry
                .coordinates
                .last()
                .map(|pair| Coordinates::new(pair[1], pair[0]))
        });

        Ok(snapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIRECTIONS_RESPONSE: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": [[79.1386, 10.7831], [79.1400, 10.7900]]
            },
            "properties": {
                "summary": { "distance": 1500.0, "duration": 180.0 }
            }
        }]
    }"#;

    #[test]
    fn decodes_directions_features() {
        let data: FeatureCollection = serde_json::from_str(DIRECTIONS_RESPONSE).unwrap();
        let feature = data.features.into_iter().next().unwrap();

        assert_eq!(feature.geometry.coordinates.len(), 2);
        assert_eq!(feature.properties.summary.distance, 1500.0);
    }

    #[test]
    fn a_missing_feature_list_decodes_to_empty() {
        let data: FeatureCollection =
            serde_json::from_str(r#"{"error": {"code": 2010}}"#).unwrap();

        assert!(data.features.is_empty());
    }

    #[test]
    fn converts_summary_units_and_coordinate_order() {
        let data: FeatureCollection = serde_json::from_str(DIRECTIONS_RESPONSE).unwrap();
        let road = to_road_route(data.features.into_iter().next().unwrap());

        assert_eq!(road.distance_km, 1.5);
        assert_eq!(road.duration_min, 3.0);
        assert_eq!(road.coordinates[0], Coordinates::new(10.7831, 79.1386));
    }
}
