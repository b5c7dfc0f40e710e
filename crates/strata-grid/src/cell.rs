//! Scalar kinds that a [`Grid`](crate::Grid) can hold.

use std::fmt;

/// The closed set of cell kinds understood by the raster stack.
///
/// The kind is attached to the cell type through [`Cell::KIND`], so code that
/// needs kind-specific behaviour (resampling, encoding) matches on it instead
/// of inspecting values at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Continuous values (`f64`).
    Real,
    /// Whole numbers (`i32`), e.g. plate ids.
    Integer,
    /// Masks (`bool`), e.g. the ocean mask.
    Boolean,
    /// Labels from a closed enumeration, e.g. biomes.
    Category,
}

impl ScalarKind {
    /// Returns `true` for kinds that can go through numeric interpolation.
    pub fn is_numeric(self) -> bool {
        matches!(self, ScalarKind::Real | ScalarKind::Integer)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Real => "real",
            ScalarKind::Integer => "integer",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Category => "category",
        };
        f.write_str(name)
    }
}

/// A value that can be stored in a [`Grid`](crate::Grid).
///
/// Numeric kinds convert to and from `f64` for interpolation. Non-numeric kinds
/// return `None` from both conversions.
pub trait Cell: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Kind tag used for dispatch.
    const KIND: ScalarKind;

    /// Widens the value for interpolation.
    fn to_real(self) -> Option<f64>;

    /// Narrows an interpolated value back to the cell type.
    fn from_real(value: f64) -> Option<Self>;
}

impl Cell for f64 {
    const KIND: ScalarKind = ScalarKind::Real;

    fn to_real(self) -> Option<f64> {
        Some(self)
    }

    fn from_real(value: f64) -> Option<Self> {
        Some(value)
    }
}

impl Cell for i32 {
    const KIND: ScalarKind = ScalarKind::Integer;

    fn to_real(self) -> Option<f64> {
        Some(f64::from(self))
    }

    /// Truncates toward zero; out-of-range values saturate.
    fn from_real(value: f64) -> Option<Self> {
        Some(value.trunc() as i32)
    }
}

impl Cell for bool {
    const KIND: ScalarKind = ScalarKind::Boolean;

    fn to_real(self) -> Option<f64> {
        None
    }

    fn from_real(_value: f64) -> Option<Self> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(f64::KIND, ScalarKind::Real);
        assert_eq!(i32::KIND, ScalarKind::Integer);
        assert_eq!(bool::KIND, ScalarKind::Boolean);
        assert!(ScalarKind::Integer.is_numeric());
        assert!(!ScalarKind::Category.is_numeric());
    }

    #[test]
    fn test_integer_truncates_toward_zero() {
        assert_eq!(i32::from_real(2.9), Some(2));
        assert_eq!(i32::from_real(-2.9), Some(-2));
        assert_eq!(i32::from_real(-0.5), Some(0));
    }

    #[test]
    fn test_boolean_has_no_numeric_form() {
        assert_eq!(true.to_real(), None);
        assert_eq!(bool::from_real(1.0), None);
    }
}
