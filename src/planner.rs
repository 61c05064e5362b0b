use async_trait::async_trait;
use rand::Rng;

use crate::{
    entities::{BaseLocation, Coordinates, Waypoint, Zone},
    error::{validation_error, Error},
    geo,
};

/// Caps the routine-patrol sampling loop; every attempt counts, hit or miss.
pub const MAX_SAMPLE_ATTEMPTS: u32 = 25;

#[async_trait]
pub trait RoadSnap {
    /// Nearest point reachable by road from `base`, or None when no road
    /// route exists.
    async fn snap(&self, point: Coordinates, base: Coordinates) -> Result<Option<Coordinates>, Error>;
}

#[derive(Clone, Copy, Debug)]
pub struct PlanRequest {
    pub target_km: f64,
    pub tolerance_km: f64,
    pub radius_km: f64,
    pub cover_all: bool,
}

impl PlanRequest {
    fn validate(&self) -> Result<(), Error> {
        let knobs = [
            ("target_km", self.target_km),
            ("tolerance_km", self.tolerance_km),
            ("radius_km", self.radius_km),
        ];

        for (name, value) in knobs {
            if !value.is_finite() || value < 0.0 {
                return Err(validation_error(&format!(
                    "{} must be a finite, non-negative number",
                    name
                )));
            }
        }

        Ok(())
    }

    fn min_km(&self) -> f64 {
        self.target_km - self.tolerance_km
    }

    fn max_km(&self) -> f64 {
        self.target_km + self.tolerance_km
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PatrolRoute {
    pub waypoints: Vec<Waypoint>,
    pub total_km: f64,
}

/// Builds a patrol route anchored at `base`: critical sectors first, in the
/// order the snapshot provides them, then random road-snapped waypoints
/// until the distance band is reached or the attempt cap runs out.
///
/// The accumulated total never includes the final leg back to base, while
/// the budget check during selection does.
#[tracing::instrument(skip_all)]
pub async fn generate<S, R>(
    base: &BaseLocation,
    zones: &[Zone],
    request: &PlanRequest,
    snapper: &S,
    rng: &mut R,
) -> Result<PatrolRoute, Error>
where
    S: RoadSnap + Sync + ?Sized,
    R: Rng + Send,
{
    request.validate()?;

    let anchor = base.coordinates;

    let mut waypoints = vec![Waypoint::base(base)];
    let mut total = 0.0;
    let mut current = anchor;

    let critical = zones
        .iter()
        .filter(|zone| zone.is_critical())
        .filter(|zone| geo::inside_radius(zone.coordinates, anchor, request.radius_km));

    for zone in critical {
        let travel = geo::distance_km(current, zone.coordinates);
        let return_leg = geo::distance_km(zone.coordinates, anchor);

        // a critical sector is only dropped when the caller prefers the
        // distance budget over coverage
        if !request.cover_all && total + travel + return_leg > request.max_km() {
            continue;
        }

        waypoints.push(Waypoint::sector(zone));
        total += travel;
        current = zone.coordinates;
    }

    let mut attempts = 0;

    while total < request.min_km() && attempts < MAX_SAMPLE_ATTEMPTS {
        attempts += 1;

        let candidate = geo::random_point_around(anchor, request.radius_km, rng);

        let snapped = match snapper.snap(candidate, anchor).await? {
            Some(point) => point,
            None => continue,
        };

        // snapping can push the point past the search radius
        if !geo::inside_radius(snapped, anchor, request.radius_km) {
            continue;
        }

        let travel = geo::distance_km(current, snapped);
        let return_leg = geo::distance_km(snapped, anchor);

        if total + travel + return_leg > request.max_km() {
            continue;
        }

        waypoints.push(Waypoint::routine(snapped));
        total += travel;
        current = snapped;
    }

    waypoints.push(Waypoint::base(base));

    tracing::info!(
        waypoints = waypoints.len(),
        total_km = total,
        attempts,
        "patrol route assembled"
    );

    Ok(PatrolRoute {
        waypoints,
        total_km: total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use rand::{rngs::StdRng, SeedableRng};
    use tokio_test::block_on;

    struct SnapInPlace;

    #[async_trait]
    impl RoadSnap for SnapInPlace {
        async fn snap(
            &self,
            point: Coordinates,
            _base: Coordinates,
        ) -> Result<Option<Coordinates>, Error> {
            Ok(Some(point))
        }
    }

    struct NoRoads(AtomicUsize);

    #[async_trait]
    impl RoadSnap for NoRoads {
        async fn snap(
            &self,
            _point: Coordinates,
            _base: Coordinates,
        ) -> Result<Option<Coordinates>, Error> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    }

    // pushes every candidate a full degree north, far outside any radius
    // used in these tests
    struct SnapFarAway;

    #[async_trait]
    impl RoadSnap for SnapFarAway {
        async fn snap(
            &self,
            point: Coordinates,
            _base: Coordinates,
        ) -> Result<Option<Coordinates>, Error> {
            Ok(Some(Coordinates::new(point.latitude + 1.0, point.longitude)))
        }
    }

    fn base() -> BaseLocation {
        BaseLocation::default()
    }

    fn zone(name: &str, lat_offset: f64, lng_offset: f64, risk: i32) -> Zone {
        let anchor = base().coordinates;

        Zone::new(
            name.into(),
            Coordinates::new(anchor.latitude + lat_offset, anchor.longitude + lng_offset),
            risk,
        )
        .unwrap()
    }

    fn request(target_km: f64, tolerance_km: f64, radius_km: f64, cover_all: bool) -> PlanRequest {
        PlanRequest {
            target_km,
            tolerance_km,
            radius_km,
            cover_all,
        }
    }

    fn sector_names(route: &PatrolRoute) -> Vec<String> {
        route
            .waypoints
            .iter()
            .filter_map(|waypoint| match waypoint {
                Waypoint::Sector { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn no_roads_yields_base_to_base() {
        let snapper = NoRoads(AtomicUsize::new(0));
        let mut rng = StdRng::seed_from_u64(7);

        let route = block_on(generate(
            &base(),
            &[],
            &request(10.0, 2.0, 5.0, true),
            &snapper,
            &mut rng,
        ))
        .unwrap();

        assert_eq!(
            route.waypoints,
            vec![Waypoint::base(&base()), Waypoint::base(&base())]
        );
        assert_eq!(route.total_km, 0.0);
    }

    #[test]
    fn sampling_stops_at_the_attempt_cap() {
        let snapper = NoRoads(AtomicUsize::new(0));
        let mut rng = StdRng::seed_from_u64(7);

        block_on(generate(
            &base(),
            &[],
            &request(10.0, 2.0, 5.0, true),
            &snapper,
            &mut rng,
        ))
        .unwrap();

        assert_eq!(snapper.0.load(Ordering::SeqCst), MAX_SAMPLE_ATTEMPTS as usize);
    }

    #[test]
    fn no_sampling_when_the_band_starts_at_zero() {
        let snapper = NoRoads(AtomicUsize::new(0));
        let mut rng = StdRng::seed_from_u64(7);

        block_on(generate(
            &base(),
            &[],
            &request(1.0, 1.0, 5.0, true),
            &snapper,
            &mut rng,
        ))
        .unwrap();

        assert_eq!(snapper.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn forced_coverage_visits_critical_sectors_in_input_order() {
        let zones = vec![
            zone("alpha", 0.01, 0.0, 9),
            zone("bravo", 0.0, 0.02, 8),
            zone("charlie", 0.015, 0.0, 7),
            zone("delta", 2.0, 0.0, 10),
        ];
        let mut rng = StdRng::seed_from_u64(7);

        let route = block_on(generate(
            &base(),
            &zones,
            &request(1.0, 1.0, 5.0, true),
            &SnapInPlace,
            &mut rng,
        ))
        .unwrap();

        // charlie is below the critical band, delta is outside the radius
        assert_eq!(sector_names(&route), vec!["alpha", "bravo"]);
        assert!(route.total_km > 2.0);
    }

    #[test]
    fn distance_priority_skips_sectors_over_budget() {
        let zones = vec![zone("alpha", 0.01, 0.0, 9)];
        let mut rng = StdRng::seed_from_u64(7);

        let route = block_on(generate(
            &base(),
            &zones,
            &request(0.1, 0.0, 5.0, false),
            &SnapInPlace,
            &mut rng,
        ))
        .unwrap();

        assert_eq!(
            route.waypoints,
            vec![Waypoint::base(&base()), Waypoint::base(&base())]
        );
        assert_eq!(route.total_km, 0.0);
    }

    #[test]
    fn a_skipped_sector_does_not_block_later_ones() {
        let zones = vec![
            zone("far", 0.05, 0.0, 9),
            zone("near", 0.005, 0.0, 9),
        ];
        let mut rng = StdRng::seed_from_u64(7);

        let route = block_on(generate(
            &base(),
            &zones,
            &request(2.0, 0.0, 10.0, false),
            &SnapInPlace,
            &mut rng,
        ))
        .unwrap();

        assert_eq!(sector_names(&route), vec!["near"]);
    }

    #[test]
    fn forced_coverage_overrides_the_budget() {
        let zones = vec![zone("alpha", 0.01, 0.0, 9)];
        let mut rng = StdRng::seed_from_u64(7);

        let route = block_on(generate(
            &base(),
            &zones,
            &request(1.0, 1.0, 5.0, true),
            &SnapInPlace,
            &mut rng,
        ))
        .unwrap();

        assert_eq!(sector_names(&route), vec!["alpha"]);

        // the reported total covers the outbound leg only
        let outbound = geo::distance_km(base().coordinates, zones[0].coordinates);
        assert!((route.total_km - outbound).abs() < 1e-9);
    }

    #[test]
    fn routine_waypoints_stay_inside_the_radius() {
        let mut rng = StdRng::seed_from_u64(42);
        let plan = request(10.0, 2.0, 5.0, true);

        let route = block_on(generate(&base(), &[], &plan, &SnapInPlace, &mut rng)).unwrap();

        let routine: Vec<Coordinates> = route
            .waypoints
            .iter()
            .filter_map(|waypoint| match waypoint {
                Waypoint::Routine { coordinates, .. } => Some(*coordinates),
                _ => None,
            })
            .collect();

        assert!(!routine.is_empty());

        for point in routine {
            assert!(geo::inside_radius(point, base().coordinates, plan.radius_km));
        }

        assert!(route.total_km <= plan.max_km());
    }

    #[test]
    fn snapped_points_outside_the_radius_are_discarded() {
        let mut rng = StdRng::seed_from_u64(42);

        let route = block_on(generate(
            &base(),
            &[],
            &request(10.0, 2.0, 5.0, true),
            &SnapFarAway,
            &mut rng,
        ))
        .unwrap();

        assert_eq!(
            route.waypoints,
            vec![Waypoint::base(&base()), Waypoint::base(&base())]
        );
        assert_eq!(route.total_km, 0.0);
    }

    #[test]
    fn coverage_is_deterministic_for_identical_inputs() {
        let zones = vec![
            zone("alpha", 0.01, 0.0, 9),
            zone("bravo", 0.0, 0.02, 8),
        ];
        let plan = request(1.0, 1.0, 5.0, true);

        let mut first_rng = StdRng::seed_from_u64(3);
        let first = block_on(generate(&base(), &zones, &plan, &SnapInPlace, &mut first_rng)).unwrap();

        let mut second_rng = StdRng::seed_from_u64(3);
        let second =
            block_on(generate(&base(), &zones, &plan, &SnapInPlace, &mut second_rng)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn padding_is_reproducible_with_a_fixed_seed() {
        let plan = request(10.0, 2.0, 5.0, true);

        let mut first_rng = StdRng::seed_from_u64(9);
        let first = block_on(generate(&base(), &[], &plan, &SnapInPlace, &mut first_rng)).unwrap();

        let mut second_rng = StdRng::seed_from_u64(9);
        let second = block_on(generate(&base(), &[], &plan, &SnapInPlace, &mut second_rng)).unwrap();

        let coordinates = |route: &PatrolRoute| -> Vec<Coordinates> {
            route.waypoints.iter().map(Waypoint::coordinates).collect()
        };

        assert_eq!(coordinates(&first), coordinates(&second));
        assert_eq!(first.total_km, second.total_km);
    }

    #[test]
    fn rejects_invalid_knobs() {
        let mut rng = StdRng::seed_from_u64(7);

        for plan in [
            request(f64::NAN, 2.0, 5.0, true),
            request(10.0, -1.0, 5.0, true),
            request(10.0, 2.0, f64::INFINITY, true),
            request(-5.0, 2.0, 5.0, true),
        ] {
            let result = block_on(generate(&base(), &[], &plan, &SnapInPlace, &mut rng));
            assert!(result.is_err());
        }
    }
}
