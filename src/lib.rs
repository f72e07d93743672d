//! # earthpixel-rs
//!
//! Quantizes a latitude/longitude into a cell ("pixel") of roughly constant
//! ground size and names it with a short, reversible key.
//!
//! Latitude is cut into an integer number of equal bands; each band is cut
//! into an integer number of columns, widened by `1 / cos(latitude)` so cells
//! stay close to square on the ground. All floor/ceiling decisions run on
//! fixed-point integers, so the same coordinate gives the same key everywhere.
//!
//! ### 1. `Grid` - Coordinate to Cell
//!
//! ```
//! use earthpixel_rs::{Grid, Location, WidthUnit};
//!
//! # fn main() -> Result<(), earthpixel_rs::PixelError> {
//! let grid = Grid::new(500.0, WidthUnit::Meters)?;
//! let cell = grid.get(&Location::new(48.8566, 2.3522))?;
//! println!("{} centered at {:?}", cell.key, cell.center);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `Grid::extract` - Key to Cell
//!
//! Keys carry the grid's division count, so no grid instance is needed:
//!
//! ```
//! use earthpixel_rs::Grid;
//!
//! # fn main() -> Result<(), earthpixel_rs::PixelError> {
//! let cell = Grid::extract("168-b4-196")?;
//! assert_eq!(cell.center.latitude, 0.25);
//! assert_eq!(cell.center.longitude, 23.25);
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. Geometry Export
//!
//! ```
//! use earthpixel_rs::{GeometryFormat, Grid};
//!
//! # fn main() -> Result<(), earthpixel_rs::PixelError> {
//! let cell = Grid::extract("168-b4-196")?;
//! let wkt = cell.to_geometry_string(GeometryFormat::Wkt);
//! let feature = cell.to_geojson();
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod coord;
pub mod core;
pub mod error;
pub mod geom;
pub mod index;

pub use api::{Bounds, CellInfo, Grid, GridBuilder, GridInfo, Widths};
pub use coord::{Coordinate, Location, validate, validate_location};
pub use self::core::{
    CellIndices, EARTH_PERIMETER, EARTH_RADIUS, FLOAT_PRECISION, MAX_DIVISIONS, MAX_WIDTH_DEGREES,
    MIN_DIVISIONS, MIN_WIDTH_DEGREES, Resolution, WidthUnit, check_precision, meters_to_degrees,
    point_to_indices, precision, to_fixed,
};
pub use error::{ErrorKind, PixelError};
pub use geom::GeometryFormat;
pub use index::{CellKey, decode_key, encode_key};

pub use geo_types;

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::point;

    #[test]
    fn test_end_to_end_workflow() -> Result<(), PixelError> {
        let grid = Grid::builder().meters(500.0).build()?;
        let pt = point! { x: 2.3522, y: 48.8566 };

        let cell = grid.get(&pt)?;
        let indices = decode_key(cell.key.as_str())?;
        assert_eq!(indices.divisions, grid.debug().divisions);

        let restored = Grid::extract(cell.key.as_str())?;
        assert_eq!(cell, restored);
        assert!(restored.contains(&pt));

        let polygon = cell.to_polygon();
        assert_eq!(polygon.exterior().coords().count(), 5);
        Ok(())
    }

    #[test]
    fn test_tuple_point_and_location_same_cell() -> Result<(), PixelError> {
        let grid = Grid::new(0.1, WidthUnit::Degrees)?;
        let from_tuple = grid.get(&(2.0, 34.0))?;
        let from_point = grid.get(&point! { x: 2.0, y: 34.0 })?;
        let from_location = grid.get(&Location::new(34.0, 2.0))?;

        assert_eq!(from_tuple, from_point);
        assert_eq!(from_tuple, from_location);
        Ok(())
    }

    #[test]
    fn test_same_point_same_cell() -> Result<(), PixelError> {
        let grid = Grid::new(500.0, WidthUnit::Meters)?;
        let cell1 = grid.get(&(-2.248, 53.481))?;
        let cell2 = grid.get(&(-2.248, 53.481))?;
        assert_eq!(cell1, cell2);

        let near_center = grid.get(&(cell1.center.longitude + 1e-4, cell1.center.latitude + 1e-4))?;
        assert_eq!(cell1.key, near_center.key);
        Ok(())
    }
}
