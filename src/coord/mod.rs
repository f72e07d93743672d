use crate::error::PixelError;
use geo_types::{Coord, Point};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Trait for types that can provide longitude/latitude coordinates.
///
/// Implemented for `(f64, f64)` tuples in `(longitude, latitude)` order,
/// `geo_types::Point<f64>`, `geo_types::Coord<f64>` and [`Location`].
/// This allows grid lookups to accept any of them.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

impl Coordinate for Coord<f64> {
    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
}

impl Coordinate for Location {
    fn x(&self) -> f64 {
        self.longitude
    }
    fn y(&self) -> f64 {
        self.latitude
    }
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Validates a loosely typed record such as `{"latitude": 34, "longitude": "2.5"}`.
    ///
    /// Fields may be JSON numbers or numeric strings.
    pub fn from_value(value: &Value) -> Result<Self, PixelError> {
        let record = value.as_object().ok_or(PixelError::NotAnObject)?;

        let latitude =
            to_number(record.get("latitude")).ok_or(PixelError::NotANumber("latitude"))?;
        let longitude =
            to_number(record.get("longitude")).ok_or(PixelError::NotANumber("longitude"))?;

        validate_location(latitude, longitude)
    }
}

impl From<Location> for Point<f64> {
    fn from(location: Location) -> Self {
        Point::new(location.longitude, location.latitude)
    }
}

fn to_number(field: Option<&Value>) -> Option<f64> {
    let number = match field? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Checks a latitude/longitude pair against the geographic range.
pub fn validate_location(latitude: f64, longitude: f64) -> Result<Location, PixelError> {
    if !latitude.is_finite() {
        return Err(PixelError::NotANumber("latitude"));
    }
    if !longitude.is_finite() {
        return Err(PixelError::NotANumber("longitude"));
    }
    if latitude.abs() > 90.0 {
        return Err(PixelError::OutOfRange {
            field: "latitude",
            value: latitude,
        });
    }
    if longitude.abs() > 180.0 {
        return Err(PixelError::OutOfRange {
            field: "longitude",
            value: longitude,
        });
    }

    Ok(Location::new(latitude, longitude))
}

/// Validates anything implementing [`Coordinate`].
pub fn validate<C: Coordinate + ?Sized>(coord: &C) -> Result<Location, PixelError> {
    validate_location(coord.y(), coord.x())
}
