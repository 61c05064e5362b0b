use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

/// The patrol's start and end anchor. Exactly one is active at a time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaseLocation {
    pub name: String,
    pub coordinates: Coordinates,
}

impl BaseLocation {
    pub fn new(name: String, coordinates: Coordinates) -> Self {
        Self { name, coordinates }
    }
}

impl Default for BaseLocation {
    fn default() -> Self {
        Self {
            name: "Thanjavur New Bus Stand".into(),
            coordinates: Coordinates::new(10.7831, 79.1386),
        }
    }
}
