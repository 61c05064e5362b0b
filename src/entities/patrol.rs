use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{BaseLocation, Coordinates, RoadRoute, Zone};

pub const ROUTINE_PATROL_NAME: &str = "Routine Patrol";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Waypoint {
    Base {
        name: String,
        coordinates: Coordinates,
    },
    Sector {
        id: Uuid,
        name: String,
        coordinates: Coordinates,
        risk: i32,
    },
    Routine {
        id: Uuid,
        name: String,
        coordinates: Coordinates,
    },
}

impl Waypoint {
    pub fn base(base: &BaseLocation) -> Self {
        Self::Base {
            name: base.name.clone(),
            coordinates: base.coordinates,
        }
    }

    pub fn sector(zone: &Zone) -> Self {
        Self::Sector {
            id: zone.id,
            name: zone.name.clone(),
            coordinates: zone.coordinates,
            risk: zone.risk,
        }
    }

    pub fn routine(coordinates: Coordinates) -> Self {
        Self::Routine {
            id: Uuid::new_v4(),
            name: ROUTINE_PATROL_NAME.into(),
            coordinates,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        match self {
            Self::Base { coordinates, .. }
            | Self::Sector { coordinates, .. }
            | Self::Routine { coordinates, .. } => *coordinates,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Base { name, .. } | Self::Sector { name, .. } | Self::Routine { name, .. } => {
                name
            }
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Patrol {
    pub token: Uuid,
    pub waypoints: Vec<Waypoint>,
    pub total_km: f64,
    pub road: Option<RoadRoute>,
    pub created_at: DateTime<Utc>,
}

impl Patrol {
    pub fn new(waypoints: Vec<Waypoint>, total_km: f64, road: Option<RoadRoute>) -> Self {
        Self {
            token: Uuid::new_v4(),
            waypoints,
            total_km,
            road,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PatrolRequest {
    pub target_km: f64,
    pub radius_km: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatrolPriority {
    Safety,
    Distance,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PatrolOutcome {
    Ready { patrol: Patrol },
    DecisionRequired { draft: Patrol },
}
