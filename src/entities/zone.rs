use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinates;
use crate::error::{validation_error, Error};

pub const CRITICAL_RISK: i32 = 8;
pub const ELEVATED_RISK: i32 = 5;
pub const MAX_RISK: i32 = 10;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: Uuid,
    pub name: String,
    pub coordinates: Coordinates,
    pub risk: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Critical,
    Elevated,
    Secure,
}

impl Zone {
    pub fn new(name: String, coordinates: Coordinates, risk: i32) -> Result<Self, Error> {
        if !(0..=MAX_RISK).contains(&risk) {
            return Err(validation_error("risk must be between 0 and 10"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            coordinates,
            risk,
        })
    }

    pub fn band(&self) -> RiskBand {
        if self.risk >= CRITICAL_RISK {
            RiskBand::Critical
        } else if self.risk >= ELEVATED_RISK {
            RiskBand::Elevated
        } else {
            RiskBand::Secure
        }
    }

    pub fn is_critical(&self) -> bool {
        self.risk >= CRITICAL_RISK
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneStats {
    pub total: usize,
    pub critical: usize,
    pub secure: usize,
    pub average_risk: f64,
}

impl ZoneStats {
    pub fn tally(zones: &[Zone]) -> Self {
        let total = zones.len();
        let critical = zones.iter().filter(|zone| zone.is_critical()).count();
        let secure = zones
            .iter()
            .filter(|zone| zone.band() == RiskBand::Secure)
            .count();

        let average_risk = if total == 0 {
            0.0
        } else {
            zones.iter().map(|zone| f64::from(zone.risk)).sum::<f64>() / total as f64
        };

        Self {
            total,
            critical,
            secure,
            average_risk,
        }
    }
}
