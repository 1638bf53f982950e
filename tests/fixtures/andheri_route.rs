//! Real Andheri / Jogeshwari (Mumbai) locations for playback fixtures.
//!
//! The corridor follows the Western Express Highway north from Andheri
//! East toward Jogeshwari East, matching the demo's source and
//! destination pins.

use route_player::polyline::Coordinate;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coord(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// Route source pin.
pub const SOURCE: Location = Location::new("Andheri East", 19.1121, 72.8677);

/// Route destination pin.
pub const DESTINATION: Location = Location::new("Jogeshwari East", 19.1221, 72.8664);

// ============================================================================
// Waypoints from source to destination, in travel order
// ============================================================================

pub const ROUTE: &[Location] = &[
    SOURCE,
    Location::new("WEH Metro Station", 19.1136, 72.8697),
    Location::new("Gundavali Junction", 19.1162, 72.8694),
    Location::new("Mogra Village", 19.1187, 72.8684),
    Location::new("Jogeshwari Flyover Approach", 19.1205, 72.8672),
    DESTINATION,
];

/// The fixture route as a coordinate path.
pub fn route_coordinates() -> Vec<Coordinate> {
    ROUTE.iter().map(Location::coord).collect()
}
