mod base;
mod coordinates;
mod patrol;
mod road;
mod zone;

pub use base::BaseLocation;
pub use coordinates::Coordinates;
pub use patrol::{Patrol, PatrolOutcome, PatrolPriority, PatrolRequest, Waypoint, ROUTINE_PATROL_NAME};
pub use road::RoadRoute;
pub use zone::{RiskBand, Zone, ZoneStats};
