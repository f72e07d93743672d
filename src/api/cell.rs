use crate::coord::{Coordinate, Location, validate};
use crate::core::Resolution;
use crate::core::grid::{CellFrame, indices_to_frame, point_to_indices};
use crate::error::PixelError;
use crate::geom::{GeometryFormat, cell_metric_size, polygon_to_geojson, polygon_to_wkt};
use crate::index::{CellKey, decode_key};
use geo_types::{Point, Polygon, Rect, coord};
use serde::{Deserialize, Serialize};

/// Edges of a cell in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// Height and width of a cell in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Widths {
    pub latitude: f64,
    pub longitude: f64,
}

/// A single grid cell ("pixel").
///
/// Built either from a coordinate through a [`Grid`](crate::Grid) or from a
/// key alone with [`CellInfo::from_key`]; both paths produce identical values.
///
/// # Example
///
/// ```
/// use earthpixel_rs::{CellInfo, Grid, WidthUnit};
///
/// # fn main() -> Result<(), earthpixel_rs::PixelError> {
/// let grid = Grid::new(0.5, WidthUnit::Degrees)?;
/// let cell = grid.get(&(23.0, 0.3))?;
/// assert_eq!(cell.key.as_str(), "168-b4-196");
///
/// let restored = CellInfo::from_key("168-b4-196")?;
/// assert_eq!(cell, restored);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellInfo {
    /// Center of the cell
    pub center: Location,
    /// North, south, east and west edges
    pub bounds: Bounds,
    /// Latitude and longitude extent in degrees
    pub widths: Widths,
    /// Lossless encoding of the cell indices
    pub key: CellKey,
}

impl CellInfo {
    fn from_frame(frame: &CellFrame, key: CellKey) -> Self {
        Self {
            center: Location::new(frame.center_lat.to_degrees(), frame.center_lon.to_degrees()),
            bounds: Bounds {
                north: frame.north().to_degrees(),
                south: frame.south.to_degrees(),
                east: frame.east().to_degrees(),
                west: frame.west.to_degrees(),
            },
            widths: Widths {
                latitude: frame.lat_width.to_degrees(),
                longitude: frame.lon_width.to_degrees(),
            },
            key,
        }
    }

    /// Rebuilds a cell from its key, without the grid that produced it.
    ///
    /// # Errors
    ///
    /// - [`PixelError::MalformedKey`] - The key is not three hex fields, or its
    ///   indices fall outside the grid described by its division count
    pub fn from_key(key: &str) -> Result<Self, PixelError> {
        let indices = decode_key(key).inspect_err(|_| log::trace!("rejected key {:?}", key))?;
        let frame = indices_to_frame(&indices)?;
        Ok(Self::from_frame(&frame, CellKey::encode(&indices)))
    }

    pub(crate) fn locate(
        resolution: &Resolution,
        coord: &(impl Coordinate + ?Sized),
    ) -> Result<Self, PixelError> {
        let location =
            validate(coord).inspect_err(|e| log::trace!("rejected coordinate: {}", e))?;
        let indices = point_to_indices(resolution, location.latitude, location.longitude);
        let frame = indices_to_frame(&indices)?;
        Ok(Self::from_frame(&frame, CellKey::encode(&indices)))
    }

    /// Returns the center as a `geo_types::Point` (x = longitude, y = latitude).
    pub fn center_point(&self) -> Point<f64> {
        self.center.into()
    }

    /// Returns the cell extent as a `geo_types::Rect`.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.bounds.west, y: self.bounds.south },
            coord! { x: self.bounds.east, y: self.bounds.north },
        )
    }

    /// Converts this cell to a closed rectangular polygon.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }

    /// Serializes the cell outline as WKT or GeoJSON.
    pub fn to_geometry_string(&self, format: GeometryFormat) -> String {
        let polygon = self.to_polygon();
        match format {
            GeometryFormat::Wkt => polygon_to_wkt(&polygon),
            GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
        }
    }

    /// Serializes the cell outline as a WKT `POLYGON`.
    pub fn to_wkt(&self) -> String {
        polygon_to_wkt(&self.to_polygon())
    }

    /// Converts this cell to a GeoJSON feature carrying its key, center and widths.
    pub fn to_geojson(&self) -> geojson::Feature {
        let mut feature = geojson::Feature::from(geojson::Geometry::from(&self.to_polygon()));
        feature.set_property("key", self.key.as_str());
        feature.set_property("latitude", self.center.latitude);
        feature.set_property("longitude", self.center.longitude);
        feature.set_property("width_latitude", self.widths.latitude);
        feature.set_property("width_longitude", self.widths.longitude);
        feature
    }

    /// Height and width of the cell in meters, measured through its center.
    pub fn metric_size(&self) -> (f64, f64) {
        cell_metric_size(&self.bounds, &self.center)
    }

    /// Whether `coord` quantizes into this cell.
    ///
    /// Edges are half-open, `[south, north)` and `[west, east)`. Latitude 90
    /// folds into the last band and longitude 180 into the last column, together
    /// with any sliver left when the band or column width does not divide evenly.
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        let Ok(indices) = self.key.decode() else {
            return false;
        };
        let Ok(resolution) = Resolution::from_divisions(indices.divisions) else {
            return false;
        };
        validate(coord)
            .map(|loc| point_to_indices(&resolution, loc.latitude, loc.longitude) == indices)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WidthUnit;

    fn half_degree() -> Resolution {
        Resolution::new(0.5, WidthUnit::Degrees).unwrap()
    }

    #[test]
    fn test_locate() -> Result<(), PixelError> {
        let cell = CellInfo::locate(&half_degree(), &(23.0, 0.3))?;

        assert_eq!(cell.center, Location::new(0.25, 23.25));
        assert_eq!(
            cell.bounds,
            Bounds {
                north: 0.5,
                south: 0.0,
                east: 23.5,
                west: 23.0
            }
        );
        assert_eq!(
            cell.widths,
            Widths {
                latitude: 0.5,
                longitude: 0.5
            }
        );
        assert_eq!(cell.key, "168-b4-196");
        Ok(())
    }

    #[test]
    fn test_from_key_matches_locate() -> Result<(), PixelError> {
        let cell = CellInfo::locate(&half_degree(), &(-71.06, 42.36))?;
        let restored = CellInfo::from_key(cell.key.as_str())?;
        assert_eq!(cell, restored);
        Ok(())
    }

    #[test]
    fn test_from_key_normalizes_case() -> Result<(), PixelError> {
        let cell = CellInfo::from_key("168-B4-196")?;
        assert_eq!(cell.key, "168-b4-196");
        Ok(())
    }

    #[test]
    fn test_from_key_malformed() {
        assert!(matches!(
            CellInfo::from_key("bad-key-!!"),
            Err(PixelError::MalformedKey(_))
        ));
        assert!(matches!(
            CellInfo::from_key("0-0-0"),
            Err(PixelError::MalformedKey(_))
        ));
    }

    #[test]
    fn test_to_polygon() -> Result<(), PixelError> {
        let cell = CellInfo::from_key("168-b4-196")?;
        let polygon = cell.to_polygon();
        let exterior = polygon.exterior();
        assert_eq!(exterior.coords().count(), 5);
        assert_eq!(exterior.0[0], exterior.0[4]);
        Ok(())
    }

    #[test]
    fn test_geometry_strings() -> Result<(), PixelError> {
        let cell = CellInfo::from_key("168-b4-196")?;

        let wkt = cell.to_geometry_string(GeometryFormat::Wkt);
        assert!(wkt.starts_with("POLYGON"));

        let geojson = cell.to_geometry_string(GeometryFormat::GeoJson);
        assert!(geojson.contains("\"Polygon\""));
        Ok(())
    }

    #[test]
    fn test_to_wkt() -> Result<(), PixelError> {
        let cell = CellInfo::from_key("168-b4-196")?;
        let wkt = cell.to_wkt();

        assert!(wkt.starts_with("POLYGON"));
        assert!(wkt.contains("23.5 0.5"));
        assert_eq!(wkt, cell.to_geometry_string(GeometryFormat::Wkt));
        Ok(())
    }

    #[test]
    fn test_contains_pole_in_truncated_band() -> Result<(), PixelError> {
        let resolution = Resolution::new(0.8047, WidthUnit::Degrees)?;
        let cell = CellInfo::locate(&resolution, &(180.0, 90.0))?;

        assert!(cell.bounds.north < 90.0);
        assert!(cell.contains(&(180.0, 90.0)));
        assert!(cell.contains(&(cell.bounds.west, cell.bounds.north)));
        Ok(())
    }

    #[test]
    fn test_to_geojson_feature() -> Result<(), PixelError> {
        let cell = CellInfo::from_key("168-b4-196")?;
        let feature = cell.to_geojson();

        assert!(feature.geometry.is_some());
        assert_eq!(
            feature.property("key").and_then(|v| v.as_str()),
            Some("168-b4-196")
        );
        assert_eq!(
            feature.property("latitude").and_then(|v| v.as_f64()),
            Some(0.25)
        );
        Ok(())
    }

    #[test]
    fn test_contains() -> Result<(), PixelError> {
        let cell = CellInfo::from_key("168-b4-196")?;
        assert!(cell.contains(&(23.1, 0.3)));
        assert!(cell.contains(&(23.0, 0.0)));
        assert!(!cell.contains(&(23.5, 0.3)));
        assert!(!cell.contains(&(23.1, 0.5)));
        assert!(!cell.contains(&(23.1, 91.0)));
        Ok(())
    }

    #[test]
    fn test_serialize() -> Result<(), Box<dyn std::error::Error>> {
        let cell = CellInfo::from_key("168-b4-196")?;
        let json = serde_json::to_value(&cell)?;
        assert_eq!(json["key"], "168-b4-196");
        assert_eq!(json["center"]["latitude"], 0.25);
        assert_eq!(json["bounds"]["east"], 23.5);
        Ok(())
    }
}
