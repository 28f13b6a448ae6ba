//! Great-circle distance between coordinates
//!
//! Spherical-earth haversine, good to a fraction of a percent for the
//! city-to-city distances this crate reports.

use std::f64::consts::PI;

/// Mean earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Degrees to radians conversion factor
const DEG_TO_RAD: f64 = PI / 180.0;

/// Haversine distance in kilometers between two (latitude, longitude)
/// pairs given in degrees
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1 * DEG_TO_RAD;
    let phi2 = lat2 * DEG_TO_RAD;
    let d_phi = (lat2 - lat1) * DEG_TO_RAD;
    let d_lambda = (lon2 - lon1) * DEG_TO_RAD;

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
