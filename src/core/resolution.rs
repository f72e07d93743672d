use crate::core::constants::{
    EARTH_PERIMETER, MAX_DIVISIONS, MAX_WIDTH_DEGREES, MIN_DIVISIONS, MIN_WIDTH_DEGREES,
};
use crate::core::fixed::Fixed;
use crate::error::PixelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit of a requested cell width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthUnit {
    /// Meters along the equator, converted with a spherical Earth.
    #[default]
    Meters,
    /// Degrees of latitude.
    Degrees,
}

impl FromStr for WidthUnit {
    type Err = PixelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "meters" => Ok(WidthUnit::Meters),
            "degrees" => Ok(WidthUnit::Degrees),
            _ => Err(PixelError::InvalidUnit(s.to_string())),
        }
    }
}

impl fmt::Display for WidthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidthUnit::Meters => write!(f, "meters"),
            WidthUnit::Degrees => write!(f, "degrees"),
        }
    }
}

/// Converts a distance along the equator to degrees.
pub fn meters_to_degrees(meters: f64) -> f64 {
    360.0 * meters / EARTH_PERIMETER
}

/// The latitude banding of a grid.
///
/// `divisions` equal bands tile the 180° from pole to pole; `latitude_width`
/// is `180 / divisions` truncated to the fixed-point scale. A resolution is
/// fully determined by its division count, which is what lets a key be
/// decoded without the grid that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    divisions: u64,
    latitude_width: Fixed,
}

impl Resolution {
    /// Resolves a requested width into a snapped, integer-division resolution.
    pub fn new(width: f64, unit: WidthUnit) -> Result<Self, PixelError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(PixelError::InvalidWidth(width.to_string()));
        }

        let degrees = match unit {
            WidthUnit::Meters => meters_to_degrees(width),
            WidthUnit::Degrees => width,
        };

        if degrees > MAX_WIDTH_DEGREES {
            return Err(PixelError::WidthTooLarge(degrees));
        }
        if degrees < MIN_WIDTH_DEGREES {
            return Err(PixelError::WidthTooSmall(degrees));
        }

        let requested = Fixed::from_degrees(degrees);
        let divisions = Fixed::from_whole(180).ceil_div(requested);

        Self::from_divisions(divisions)
    }

    /// Rebuilds the resolution for a known division count.
    pub fn from_divisions(divisions: u64) -> Result<Self, PixelError> {
        if !(MIN_DIVISIONS..=MAX_DIVISIONS).contains(&divisions) {
            return Err(PixelError::InvalidDivisions(divisions));
        }

        Ok(Self {
            divisions,
            latitude_width: Fixed::from_whole(180).split(divisions),
        })
    }

    pub fn divisions(&self) -> u64 {
        self.divisions
    }

    /// Snapped band height in degrees.
    pub fn width(&self) -> f64 {
        self.latitude_width.to_degrees()
    }

    pub(crate) fn latitude_width(&self) -> Fixed {
        self.latitude_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[test]
    fn test_half_degree() -> Result<(), PixelError> {
        let res = Resolution::new(0.5, WidthUnit::Degrees)?;
        assert_eq!(res.divisions(), 360);
        assert_eq!(res.width(), 0.5);
        Ok(())
    }

    #[test]
    fn test_snaps_to_integer_divisions() -> Result<(), PixelError> {
        let res = Resolution::new(0.8047, WidthUnit::Degrees)?;
        assert_eq!(res.divisions(), 224);
        assert_eq!(res.width(), 0.803_571_428_5);
        assert_abs_diff_eq!(res.width() * 224.0, 180.0, epsilon = 1e-7);
        Ok(())
    }

    #[test]
    fn test_meters() -> Result<(), PixelError> {
        let res = Resolution::new(560.0, WidthUnit::Meters)?;
        assert_eq!(res.divisions(), 35742);
        assert_eq!(res.width(), 0.005_036_091_9);
        Ok(())
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_invalid_width(#[case] width: f64) {
        let result = Resolution::new(width, WidthUnit::Degrees);
        assert!(matches!(result, Err(PixelError::InvalidWidth(_))));
    }

    #[test]
    fn test_width_limits() {
        assert!(matches!(
            Resolution::new(220.0, WidthUnit::Degrees),
            Err(PixelError::WidthTooLarge(_))
        ));
        assert!(matches!(
            Resolution::new(EARTH_PERIMETER / 2.0, WidthUnit::Meters),
            Err(PixelError::WidthTooLarge(_))
        ));
        assert!(matches!(
            Resolution::new(1e-9, WidthUnit::Degrees),
            Err(PixelError::WidthTooSmall(_))
        ));
    }

    #[test]
    fn test_extreme_widths_stay_in_division_range() -> Result<(), PixelError> {
        assert_eq!(Resolution::new(45.0, WidthUnit::Degrees)?.divisions(), MIN_DIVISIONS);
        assert_eq!(
            Resolution::new(MIN_WIDTH_DEGREES, WidthUnit::Degrees)?.divisions(),
            MAX_DIVISIONS
        );
        Ok(())
    }

    #[test]
    fn test_from_divisions_range() {
        for divisions in [0, 2, 3, MAX_DIVISIONS + 1] {
            assert_eq!(
                Resolution::from_divisions(divisions),
                Err(PixelError::InvalidDivisions(divisions))
            );
        }
        assert!(Resolution::from_divisions(MIN_DIVISIONS).is_ok());
        assert!(Resolution::from_divisions(MAX_DIVISIONS).is_ok());
    }

    #[rstest]
    #[case("meters", WidthUnit::Meters)]
    #[case("Degrees", WidthUnit::Degrees)]
    #[case(" DEGREES ", WidthUnit::Degrees)]
    fn test_parse_unit(#[case] input: &str, #[case] expected: WidthUnit) -> Result<(), PixelError> {
        assert_eq!(input.parse::<WidthUnit>()?, expected);
        Ok(())
    }

    #[test]
    fn test_parse_unknown_unit() {
        assert_eq!(
            "wrong".parse::<WidthUnit>(),
            Err(PixelError::InvalidUnit("wrong".to_string()))
        );
    }
}
