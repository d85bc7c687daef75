//! Minimal geohash codec: cell encoding, cell bounds and the 8 surrounding
//! cells. The hash is only used as a bucketing key for the station grid.

const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Latitude/longitude bounds of a geohash cell, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellBounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl CellBounds {
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_latitude + self.max_latitude) / 2.0,
            (self.min_longitude + self.max_longitude) / 2.0,
        )
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
            && (self.min_longitude..=self.max_longitude).contains(&longitude)
    }
}

/// Encodes a position into a geohash of `precision` characters.
///
/// Bits alternate longitude first; a value exactly on a bisection line goes
/// to the lower half.
pub fn encode(latitude: f64, longitude: f64, precision: usize) -> String {
    let mut hash = String::with_capacity(precision);
    let mut latitude_range = (-90.0, 90.0);
    let mut longitude_range = (-180.0, 180.0);
    let mut bits = 0usize;
    let mut bit = 0;
    let mut even = true;

    while hash.len() < precision {
        let (value, range) = if even {
            (longitude, &mut longitude_range)
        } else {
            (latitude, &mut latitude_range)
        };
        let mid = (range.0 + range.1) / 2.0;
        bits <<= 1;
        if value > mid {
            bits |= 1;
            range.0 = mid;
        } else {
            range.1 = mid;
        }
        even = !even;
        bit += 1;
        if bit == 5 {
            hash.push(char::from(BASE32[bits]));
            bits = 0;
            bit = 0;
        }
    }
    hash
}

/// Bounds of the cell named by `hash`, or `None` if it contains a character
/// outside the geohash alphabet.
pub fn decode_bounds(hash: &str) -> Option<CellBounds> {
    let mut latitude_range = (-90.0, 90.0);
    let mut longitude_range = (-180.0, 180.0);
    let mut even = true;

    for c in hash.bytes() {
        let index = BASE32.iter().position(|&b| b == c)?;
        for shift in (0..5).rev() {
            let range = if even {
                &mut longitude_range
            } else {
                &mut latitude_range
            };
            let mid = (range.0 + range.1) / 2.0;
            if (index >> shift) & 1 == 1 {
                range.0 = mid;
            } else {
                range.1 = mid;
            }
            even = !even;
        }
    }
    Some(CellBounds {
        min_latitude: latitude_range.0,
        max_latitude: latitude_range.1,
        min_longitude: longitude_range.0,
        max_longitude: longitude_range.1,
    })
}

fn wrap_longitude(longitude: f64) -> f64 {
    (longitude + 180.0).rem_euclid(360.0) - 180.0
}

/// The distinct cells around `hash`, without `hash` itself.
///
/// Longitude wraps across the antimeridian. Rows beyond a pole do not exist,
/// so cells touching a pole have only 5 neighbors (3 at a single-cell
/// precision where east and west wrap onto the same cell).
pub fn neighbors(hash: &str) -> Vec<String> {
    let Some(bounds) = decode_bounds(hash) else {
        return Vec::new();
    };
    let (latitude, longitude) = bounds.center();
    let height = bounds.max_latitude - bounds.min_latitude;
    let width = bounds.max_longitude - bounds.min_longitude;

    let mut cells: Vec<String> = Vec::with_capacity(8);
    for row in [1.0, 0.0, -1.0] {
        let neighbor_latitude = latitude + row * height;
        if !(-90.0..=90.0).contains(&neighbor_latitude) {
            continue;
        }
        for column in [-1.0, 0.0, 1.0] {
            if row == 0.0 && column == 0.0 {
                continue;
            }
            let neighbor_longitude = wrap_longitude(longitude + column * width);
            let cell = encode(neighbor_latitude, neighbor_longitude, hash.len());
            if cell != hash && !cells.contains(&cell) {
                cells.push(cell);
            }
        }
    }
    cells
}
