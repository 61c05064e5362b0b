use rand::Rng;

use crate::entities::Coordinates;

const EARTH_RADIUS_KM: f64 = 6371.0;
const KM_PER_DEGREE: f64 = 111.0;

/// Great-circle distance in kilometres (haversine).
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

pub fn inside_radius(point: Coordinates, center: Coordinates, radius_km: f64) -> bool {
    distance_km(center, point) <= radius_km
}

/// Uniform sample over a disk around `center`; the square root keeps the
/// areal density flat instead of clustering toward the center.
pub fn random_point_around<R: Rng>(center: Coordinates, radius_km: f64, rng: &mut R) -> Coordinates {
    let r = radius_km / KM_PER_DEGREE;
    let u: f64 = rng.gen();
    let v: f64 = rng.gen();

    let w = r * u.sqrt();
    let t = 2.0 * std::f64::consts::PI * v;

    Coordinates::new(center.latitude + w * t.cos(), center.longitude + w * t.sin())
}
