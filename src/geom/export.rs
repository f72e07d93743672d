use crate::api::cell::Bounds;
use crate::coord::Location;
use geo::{Distance, Haversine};
use geo_types::{Point, Polygon};

/// Output format for cell outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON geometry object
    GeoJson,
}

pub fn polygon_to_wkt(polygon: &Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

pub fn polygon_to_geojson(polygon: &Polygon<f64>) -> String {
    let geom = geojson::Geometry::from(polygon);
    geom.to_string()
}

/// Ground height and width of a cell in meters.
///
/// Height runs along the center meridian, width along the center parallel's
/// chord, both with the haversine formula.
pub fn cell_metric_size(bounds: &Bounds, center: &Location) -> (f64, f64) {
    let height = Haversine.distance(
        Point::new(center.longitude, bounds.south),
        Point::new(center.longitude, bounds.north),
    );
    let width = Haversine.distance(
        Point::new(bounds.west, center.latitude),
        Point::new(bounds.east, center.latitude),
    );
    (height, width)
}
