mod export;

pub use export::{GeometryFormat, cell_metric_size, polygon_to_geojson, polygon_to_wkt};
