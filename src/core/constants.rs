use std::f64::consts::PI;

/// Mean Earth radius in meters (spherical model)
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Earth circumference at the equator in meters
pub const EARTH_PERIMETER: f64 = 2.0 * PI * EARTH_RADIUS;

/// Largest accepted cell width in degrees
pub const MAX_WIDTH_DEGREES: f64 = 45.0;

/// Smallest accepted cell width in degrees (about 11 cm at the equator)
pub const MIN_WIDTH_DEGREES: f64 = 1e-6;

/// Division count produced by a 45° width
pub const MIN_DIVISIONS: u64 = 4;

/// Division count produced by the smallest accepted width
pub const MAX_DIVISIONS: u64 = 180_000_000;

/// Scale applied to degrees before any floor/ceil decision
pub const FLOAT_PRECISION: i64 = 10_000_000_000;

/// Largest integer an `f64` holds exactly (2^53)
pub(crate) const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_992;

/// Separator between the three hex fields of a key
pub const KEY_SEPARATOR: char = '-';
