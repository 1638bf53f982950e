//! Marker heading between route coordinates.
//!
//! Initial great-circle bearing from one coordinate toward the next,
//! used to rotate the vehicle marker as it advances along a route.

use crate::polyline::Coordinate;

/// Initial bearing from `from` toward `to`, in degrees.
///
/// The result lies in `(-180, 180]` and is not normalized to a compass
/// range; callers that need `[0, 360)` headings normalize on their side.
/// Identical coordinates give `0.0`.
pub fn bearing(from: Coordinate, to: Coordinate) -> f64 {
    let from_lat = from.latitude.to_radians();
    let from_lng = from.longitude.to_radians();
    let to_lat = to.latitude.to_radians();
    let to_lng = to.longitude.to_radians();

    let d_lng = to_lng - from_lng;
    let y = d_lng.sin() * to_lat.cos();
    let x = from_lat.cos() * to_lat.sin() - from_lat.sin() * to_lat.cos() * d_lng.cos();

    y.atan2(x).to_degrees()
}
