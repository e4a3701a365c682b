//! # Unit Types
//!
//! Lightweight newtype wrappers for the quantities a takeoff deals in. They keep
//! square feet from being added to gallons while serializing as plain numbers.
//!
//! - Length: feet (ft)
//! - Area: square feet (sf)
//! - Paint: US gallons (gal)
//! - Wallcovering: rolls
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::units::{Feet, SqFt};
//!
//! let perimeter = Feet(70.0);
//! let wall: SqFt = perimeter.times_height(Feet(9.0));
//! assert_eq!(wall.0, 630.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

/// Paint volume in US gallons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gallons(pub f64);

/// Wallcovering quantity in rolls (fractional until ordered)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rolls(pub f64);

impl Feet {
    /// Area of a rectangle this long and `height` tall.
    pub fn times_height(self, height: Feet) -> SqFt {
        SqFt(self.0 * height.0)
    }
}

/// Round `value` to `decimals` places the way its decimal representation reads.
///
/// Multiplying by 10^n first drifts on values like 1.005 (stored as
/// 1.00499999...), so the value is formatted at the target precision and read
/// back instead. 1.005 rounds to 1.0, 2.675 to 2.67.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }

            /// Clamp negative values to zero
            pub fn non_negative(self) -> Self {
                Self(self.0.max(0.0))
            }

            /// Round to `decimals` places (see [`round_to`])
            pub fn rounded(self, decimals: usize) -> Self {
                Self(round_to(self.0, decimals))
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(SqFt);
impl_arithmetic!(Gallons);
impl_arithmetic!(Rolls);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = SqFt(10.0);
        let b = SqFt(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(SqFt(-12.0).non_negative(), SqFt(0.0));
        assert_eq!(Gallons(1.5).non_negative(), Gallons(1.5));
    }

    #[test]
    fn test_round_to_follows_decimal_representation() {
        assert_eq!(round_to(1.005, 2), 1.0);
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(100.0 / 30.0, 1), 3.3);
        assert_eq!(round_to(552.0 / 400.0, 2), 1.38);
        assert_eq!(round_to(0.0, 2), 0.0);
    }

    #[test]
    fn test_serialization() {
        let area = SqFt(552.5);
        let json = serde_json::to_string(&area).unwrap();
        assert_eq!(json, "552.5");

        let roundtrip: SqFt = serde_json::from_str(&json).unwrap();
        assert_eq!(area, roundtrip);
    }
}
