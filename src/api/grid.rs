use crate::api::cell::CellInfo;
use crate::coord::{Coordinate, Location};
use crate::core::fixed::{check_precision, precision};
use crate::core::resolution::{Resolution, WidthUnit};
use crate::error::PixelError;
use crate::index::CellKey;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Introspection output of a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridInfo {
    /// Snapped band height in degrees
    pub width: f64,
    /// Number of latitude bands
    pub divisions: u64,
}

/// A configured grid of near-equal-area cells.
///
/// The grid only holds its [`Resolution`], which never changes after
/// construction, so one grid can be shared across threads freely.
///
/// # Example
///
/// ```
/// use earthpixel_rs::{Grid, Location, WidthUnit};
///
/// # fn main() -> Result<(), earthpixel_rs::PixelError> {
/// let grid = Grid::new(0.5, WidthUnit::Degrees)?;
/// let location = Location::new(0.3, 23.0);
///
/// assert_eq!(grid.key(&location)?.as_str(), "168-b4-196");
/// assert_eq!(grid.center(&location)?, Location::new(0.25, 23.25));
///
/// let cell = Grid::extract("168-b4-196")?;
/// assert_eq!(cell.bounds.east, 23.5);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    resolution: Resolution,
}

impl Grid {
    pub fn builder() -> GridBuilder {
        GridBuilder::new()
    }

    /// Creates a grid whose cells are about `width` tall.
    ///
    /// # Errors
    ///
    /// - [`PixelError::InvalidWidth`] - `width` is not a finite positive number
    /// - [`PixelError::WidthTooLarge`] - `width` exceeds 45°
    /// - [`PixelError::WidthTooSmall`] - `width` is below the smallest supported resolution
    pub fn new(width: f64, unit: WidthUnit) -> Result<Self, PixelError> {
        check_precision(precision())?;
        let resolution = Resolution::new(width, unit)?;

        log::debug!(
            "grid of {} {}: {} divisions, {}° bands",
            width,
            unit,
            resolution.divisions(),
            resolution.width()
        );

        Ok(Self { resolution })
    }

    /// Creates a grid from textual width and unit, e.g. `("250", "meters")`.
    pub fn parse(width: &str, unit: &str) -> Result<Self, PixelError> {
        let unit: WidthUnit = unit.parse()?;
        let width: f64 = width
            .trim()
            .parse()
            .map_err(|_| PixelError::InvalidWidth(width.to_string()))?;
        Self::new(width, unit)
    }

    /// Creates a grid directly from a latitude division count.
    ///
    /// # Errors
    ///
    /// - [`PixelError::InvalidDivisions`] - `divisions` lies outside
    ///   `MIN_DIVISIONS..=MAX_DIVISIONS`
    pub fn from_divisions(divisions: u64) -> Result<Self, PixelError> {
        Ok(Self {
            resolution: Resolution::from_divisions(divisions)?,
        })
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Returns center, bounds, widths and key of the cell containing `coord`.
    pub fn get(&self, coord: &impl Coordinate) -> Result<CellInfo, PixelError> {
        CellInfo::locate(&self.resolution, coord)
    }

    /// Same as [`Grid::get`] for a loosely typed `{latitude, longitude}` record.
    ///
    /// # Errors
    ///
    /// - [`PixelError::NotAnObject`] - `value` is not a JSON object
    /// - [`PixelError::NotANumber`] - a field is missing or not numeric
    /// - [`PixelError::OutOfRange`] - a field lies outside its geographic range
    pub fn get_value(&self, value: &Value) -> Result<CellInfo, PixelError> {
        let location =
            Location::from_value(value).inspect_err(|e| log::trace!("rejected record: {}", e))?;
        self.get(&location)
    }

    pub fn key(&self, coord: &impl Coordinate) -> Result<CellKey, PixelError> {
        self.get(coord).map(|cell| cell.key)
    }

    pub fn center(&self, coord: &impl Coordinate) -> Result<Location, PixelError> {
        self.get(coord).map(|cell| cell.center)
    }

    /// Looks up many coordinates in parallel, preserving input order.
    ///
    /// A rejected coordinate yields an error in its slot without affecting the others.
    pub fn get_many<C>(&self, coords: &[C]) -> Vec<Result<CellInfo, PixelError>>
    where
        C: Coordinate + Sync,
    {
        coords.par_iter().map(|coord| self.get(coord)).collect()
    }

    /// Keys for many coordinates, computed in parallel.
    pub fn keys<C>(&self, coords: &[C]) -> Vec<Result<CellKey, PixelError>>
    where
        C: Coordinate + Sync,
    {
        coords.par_iter().map(|coord| self.key(coord)).collect()
    }

    /// Rebuilds a cell from its key. No grid instance is needed.
    pub fn extract(key: &str) -> Result<CellInfo, PixelError> {
        CellInfo::from_key(key)
    }

    pub fn debug(&self) -> GridInfo {
        GridInfo {
            width: self.resolution.width(),
            divisions: self.resolution.divisions(),
        }
    }

    pub fn precision(&self) -> i64 {
        precision()
    }
}

#[derive(Debug, Default)]
pub struct GridBuilder {
    width: Option<f64>,
    unit: WidthUnit,
}

impl GridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn unit(mut self, unit: WidthUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn meters(self, width: f64) -> Self {
        self.width(width).unit(WidthUnit::Meters)
    }

    pub fn degrees(self, width: f64) -> Self {
        self.width(width).unit(WidthUnit::Degrees)
    }

    pub fn build(self) -> Result<Grid, PixelError> {
        let width = self
            .width
            .ok_or_else(|| PixelError::InvalidWidth("missing".to_string()))?;
        Grid::new(width, self.unit)
    }
}
