pub mod constants;
pub mod fixed;
pub mod grid;
pub mod resolution;

pub use constants::{
    EARTH_PERIMETER, EARTH_RADIUS, FLOAT_PRECISION, KEY_SEPARATOR, MAX_DIVISIONS,
    MAX_WIDTH_DEGREES, MIN_DIVISIONS, MIN_WIDTH_DEGREES,
};
pub use fixed::{check_precision, precision, to_fixed};
pub use grid::{CellIndices, point_to_indices};
pub use resolution::{Resolution, WidthUnit, meters_to_degrees};
