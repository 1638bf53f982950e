//! Route polylines and the encoded-polyline decoder.
//!
//! Routes arrive from a directions backend as a compact ASCII string:
//! per-coordinate deltas, zigzag sign mapping, and 5-bit chunks with a
//! continuation flag, at 1e-5 degree precision. This module decodes that
//! string into an ordered coordinate sequence once, at the boundary;
//! playback and bearing math work on the decoded form only.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scale of the encoded format: five decimal places per degree.
const PRECISION: f64 = 1e5;

/// Offset applied to every encoded byte to keep it printable.
const BYTE_FLOOR: u8 = 63;

/// Continuation flag on a decoded chunk.
const CONTINUATION: i64 = 0x20;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Why an encoded polyline failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Input ended while a chunk's continuation flag was still set.
    UnexpectedEnd,
    /// A latitude delta was not followed by a longitude delta.
    UnbalancedPair,
    /// A byte below the printable encoding floor.
    InvalidByte(u8),
    /// A delta spanned more chunks than any coordinate can need.
    ChunkOverflow,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnexpectedEnd => write!(f, "input ended inside a coordinate chunk"),
            DecodeError::UnbalancedPair => {
                write!(f, "latitude delta without a matching longitude delta")
            }
            DecodeError::InvalidByte(byte) => {
                write!(f, "byte {byte:#04x} outside the encoding range")
            }
            DecodeError::ChunkOverflow => write!(f, "coordinate delta spans too many chunks"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// A route geometry as decoded coordinates, in travel order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates a polyline from already-decoded points.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Decodes an encoded polyline string.
    ///
    /// Pure: each call produces a fresh sequence. An empty string decodes
    /// to an empty polyline. Malformed input fails with [`DecodeError`]
    /// and yields no partially-decoded points.
    pub fn from_encoded(encoded: &str) -> Result<Self, DecodeError> {
        let bytes = encoded.as_bytes();
        let mut points = Vec::new();
        let mut index = 0;
        let mut latitude: i64 = 0;
        let mut longitude: i64 = 0;

        while index < bytes.len() {
            latitude += decode_delta(bytes, &mut index)?;
            if index >= bytes.len() {
                return Err(DecodeError::UnbalancedPair);
            }
            longitude += decode_delta(bytes, &mut index)?;

            points.push(Coordinate::new(
                latitude as f64 / PRECISION,
                longitude as f64 / PRECISION,
            ));
        }

        Ok(Self { points })
    }

    /// Returns the coordinate points in travel order.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the owned points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }
}

/// Decodes one signed delta starting at `*index`, advancing the index
/// past the consumed bytes.
fn decode_delta(bytes: &[u8], index: &mut usize) -> Result<i64, DecodeError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(DecodeError::UnexpectedEnd);
        };
        *index += 1;

        let chunk = byte
            .checked_sub(BYTE_FLOOR)
            .ok_or(DecodeError::InvalidByte(byte))? as i64;

        if shift > 58 {
            return Err(DecodeError::ChunkOverflow);
        }
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk & CONTINUATION == 0 {
            break;
        }
    }

    Ok(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}
