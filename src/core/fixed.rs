//! Fixed-point degrees.
//!
//! Every quantity that later feeds a floor or ceiling is held as an integer
//! count of `1 / FLOAT_PRECISION` degrees. Conversion from `f64` rounds to the
//! nearest unit, so converting a presented value back is idempotent.
//!
//! The scaled type stays inside the crate; callers see degrees through
//! [`to_fixed`]:
//!
//! ```
//! assert_eq!(earthpixel_rs::to_fixed(0.1 + 0.2), 0.3);
//! ```
//!
//! ```compile_fail
//! use earthpixel_rs::core::fixed::Fixed;
//! ```

use crate::core::constants::{FLOAT_PRECISION, MAX_SAFE_INTEGER};
use crate::error::PixelError;
use std::ops::{Add, Sub};

const _: () = assert!(
    360 * FLOAT_PRECISION <= MAX_SAFE_INTEGER,
    "FLOAT_PRECISION too large for exact f64 degrees"
);

/// Checks that `360 * precision` stays within the exact-integer range of `f64`.
pub fn check_precision(precision: i64) -> Result<(), PixelError> {
    match precision.checked_mul(360) {
        Some(full_turn) if precision > 0 && full_turn <= MAX_SAFE_INTEGER => Ok(()),
        _ => Err(PixelError::Precision(precision)),
    }
}

/// The fixed-point scale used by every grid.
pub fn precision() -> i64 {
    FLOAT_PRECISION
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Fixed(i64);

impl Fixed {
    pub const fn from_whole(degrees: i64) -> Self {
        Fixed(degrees * FLOAT_PRECISION)
    }

    /// Rounds `degrees` to the nearest fixed-point unit.
    ///
    /// Callers validate finiteness and range first; the cast saturates otherwise.
    pub fn from_degrees(degrees: f64) -> Self {
        Fixed((degrees * FLOAT_PRECISION as f64).round() as i64)
    }

    pub const fn units(self) -> i64 {
        self.0
    }

    pub fn to_degrees(self) -> f64 {
        self.0 as f64 / FLOAT_PRECISION as f64
    }

    pub const fn half(self) -> Self {
        Fixed(self.0 / 2)
    }

    pub const fn times(self, n: u64) -> Self {
        Fixed(self.0 * n as i64)
    }

    /// Number of whole `width` steps from zero to `self`, rounded down.
    pub fn floor_div(self, width: Fixed) -> i64 {
        self.0.div_euclid(width.0)
    }

    /// Number of `width` steps needed to cover `self`, rounded up.
    pub fn ceil_div(self, width: Fixed) -> u64 {
        let q = self.0.div_euclid(width.0);
        let q = if self.0.rem_euclid(width.0) == 0 { q } else { q + 1 };
        q.max(0) as u64
    }

    /// Splits `self` into `n` equal steps, truncating the remainder.
    pub const fn split(self, n: u64) -> Self {
        Fixed(self.0 / n as i64)
    }
}

impl Add for Fixed {
    type Output = Fixed;

    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 + rhs.0)
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 - rhs.0)
    }
}

/// Rounds a value through the fixed-point scale and back.
pub fn to_fixed(value: f64) -> f64 {
    Fixed::from_degrees(value).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_fixed_removes_drift() {
        assert_ne!(0.2 + 0.4, 0.6);
        assert_eq!(to_fixed(0.2 + 0.4), 0.6);
    }

    #[test]
    fn test_to_fixed_idempotent() {
        for v in [0.1, 0.3, 23.25, -179.75, 180.0 / 224.0, 89.999_999_999_9] {
            let once = to_fixed(v);
            assert_eq!(to_fixed(once), once);
        }
    }

    #[test]
    fn test_floor_and_ceil_div() {
        let half = Fixed::from_degrees(0.5);
        assert_eq!(Fixed::from_degrees(90.3).floor_div(half), 180);
        assert_eq!(Fixed::from_whole(180).ceil_div(half), 360);
        assert_eq!(Fixed::from_whole(180).ceil_div(Fixed::from_degrees(0.8047)), 224);
        assert_eq!(Fixed::from_whole(180).split(224).units(), 8_035_714_285);
    }

    #[test]
    fn test_check_precision() {
        assert!(check_precision(FLOAT_PRECISION).is_ok());
        assert_eq!(check_precision(1e14 as i64), Err(PixelError::Precision(1e14 as i64)));
        assert!(check_precision(0).is_err());
        assert!(check_precision(i64::MAX).is_err());
    }
}
