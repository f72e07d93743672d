pub mod cell;
pub mod grid;

pub use cell::{Bounds, CellInfo, Widths};
pub use grid::{Grid, GridBuilder, GridInfo};
