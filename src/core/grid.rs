use crate::core::fixed::Fixed;
use crate::core::resolution::Resolution;
use crate::error::PixelError;
use serde::{Deserialize, Serialize};

const SOUTH_POLE: Fixed = Fixed::from_whole(-90);
const ANTIMERIDIAN: Fixed = Fixed::from_whole(-180);
const HALF_TURN: Fixed = Fixed::from_whole(180);
const FULL_TURN: Fixed = Fixed::from_whole(360);

/// Position of a cell: the grid's division count plus its band and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellIndices {
    pub divisions: u64,
    pub lat_index: u64,
    pub lon_index: u64,
}

/// Fixed-point extent of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CellFrame {
    pub center_lat: Fixed,
    pub center_lon: Fixed,
    pub south: Fixed,
    pub west: Fixed,
    pub lat_width: Fixed,
    pub lon_width: Fixed,
}

impl CellFrame {
    pub fn north(&self) -> Fixed {
        self.south + self.lat_width
    }

    pub fn east(&self) -> Fixed {
        self.west + self.lon_width
    }
}

/// Number of longitude columns in the band centered on `center_lat`.
///
/// The band's width is widened by `1 / cos(center_lat)` so cells keep roughly
/// the same ground width as at the equator, then snapped so a whole number of
/// columns tiles 360°. A band whose cosine is not positive gets one column.
pub(crate) fn longitude_divisions(center_lat: Fixed, latitude_width: Fixed) -> u64 {
    let cos = center_lat.to_degrees().to_radians().cos();
    if cos <= 0.0 {
        log::warn!(
            "non-positive cosine at latitude {}, using a single column",
            center_lat.to_degrees()
        );
        return 1;
    }

    let raw = latitude_width.to_degrees() / cos;
    if !raw.is_finite() {
        return 1;
    }

    let raw = Fixed::from_degrees(raw);
    if raw.units() <= 0 {
        return 1;
    }

    FULL_TURN.ceil_div(raw).max(1)
}

fn band_index(offset: Fixed, width: Fixed, count: u64) -> u64 {
    // The last band also takes the far edge (90° or 180°) and any truncation residue.
    (offset.floor_div(width).max(0) as u64).min(count - 1)
}

fn band_center(lat_index: u64, latitude_width: Fixed) -> Fixed {
    SOUTH_POLE + latitude_width.times(lat_index) + latitude_width.half()
}

/// Maps a validated latitude/longitude to its cell indices.
pub fn point_to_indices(resolution: &Resolution, latitude: f64, longitude: f64) -> CellIndices {
    let lat_width = resolution.latitude_width();
    let lat_index = band_index(
        Fixed::from_degrees(latitude) - SOUTH_POLE,
        lat_width,
        resolution.divisions(),
    );

    let center_lat = band_center(lat_index, lat_width);
    let columns = longitude_divisions(center_lat, lat_width);
    let lon_width = FULL_TURN.split(columns);
    let lon_index = band_index(Fixed::from_degrees(longitude) + HALF_TURN, lon_width, columns);

    CellIndices {
        divisions: resolution.divisions(),
        lat_index,
        lon_index,
    }
}

/// Rebuilds the extent of a cell from its indices alone.
///
/// Fails when the indices fall outside the grid their division count describes.
pub(crate) fn indices_to_frame(indices: &CellIndices) -> Result<CellFrame, PixelError> {
    let resolution = Resolution::from_divisions(indices.divisions).map_err(|_| {
        PixelError::MalformedKey(format!("{} latitude divisions", indices.divisions))
    })?;
    let lat_width = resolution.latitude_width();

    if indices.lat_index >= indices.divisions {
        return Err(PixelError::MalformedKey(format!(
            "latitude index {} outside {} bands",
            indices.lat_index, indices.divisions
        )));
    }

    let south = SOUTH_POLE + lat_width.times(indices.lat_index);
    let center_lat = south + lat_width.half();

    let columns = longitude_divisions(center_lat, lat_width);
    if indices.lon_index >= columns {
        return Err(PixelError::MalformedKey(format!(
            "longitude index {} outside {} columns",
            indices.lon_index, columns
        )));
    }

    let lon_width = FULL_TURN.split(columns);
    let west = ANTIMERIDIAN + lon_width.times(indices.lon_index);

    Ok(CellFrame {
        center_lat,
        center_lon: west + lon_width.half(),
        south,
        west,
        lat_width,
        lon_width,
    })
}
