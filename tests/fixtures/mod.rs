//! Test fixtures for route-player.
//!
//! Real Andheri / Jogeshwari (Mumbai) locations along the corridor the
//! playback demo drives.

pub mod andheri_route;

pub use andheri_route::*;
