use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

/// Drivable path returned by the directions service for an ordered
/// waypoint sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadRoute {
    pub coordinates: Vec<Coordinates>,
    pub distance_km: f64,
    pub duration_min: f64,
}
