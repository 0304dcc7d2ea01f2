//! Value-type abstractions.
//!
//! [`StatValue`] is the minimal contract every modifiable value type must
//! meet (change-detection equality); [`StatNumeric`] extends it with the
//! arithmetic the staged pipeline needs. `f64`, `f32`, `i32`, and `i64` are
//! provided out of the box; integer instantiations get
//! round-half-away-from-zero applied once after the percent stage, never
//! per modifier.

use std::fmt;

/// Contract for types a modifiable property can hold.
///
/// The only behavior beyond the standard bounds is [`value_eq`], the
/// equality used for change notification: exact for discrete types,
/// epsilon-tolerant for floats. Implement this for your own discrete types
/// (an empty impl gives exact `PartialEq` semantics):
///
/// ```rust
/// use statmod::StatValue;
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum Stance {
///     Standing,
///     Crouched,
///     Prone,
/// }
///
/// impl StatValue for Stance {}
///
/// assert!(Stance::Prone.value_eq(&Stance::Prone));
/// ```
///
/// [`value_eq`]: StatValue::value_eq
pub trait StatValue: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Equality used to decide whether a recomputation actually changed the
    /// observable value.
    fn value_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl StatValue for f64 {
    fn value_eq(&self, other: &Self) -> bool {
        (self - other).abs() <= 1e-9
    }
}

impl StatValue for f32 {
    fn value_eq(&self, other: &Self) -> bool {
        (self - other).abs() <= 1e-6
    }
}

impl StatValue for i32 {}
impl StatValue for i64 {}
impl StatValue for u32 {}
impl StatValue for u64 {}
impl StatValue for bool {}
impl StatValue for String {}

/// Numeric operations required by the staged calculation pipeline.
///
/// Stages run in `f64` internally; this trait defines the conversions in
/// and out plus the intermediate rounding rule for integer-valued stats.
///
/// # Examples
///
/// ```rust
/// use statmod::StatNumeric;
///
/// assert_eq!(<i32 as StatNumeric>::from_f64(2.5), 3);
/// assert_eq!(<i32 as StatNumeric>::from_f64(-2.5), -3);
/// assert_eq!(<f64 as StatNumeric>::from_f64(2.5), 2.5);
/// ```
pub trait StatNumeric: StatValue + Copy + PartialOrd + fmt::Display + Default {
    /// Convert to f64 for pipeline arithmetic.
    fn to_f64(self) -> f64;

    /// Convert back from f64. Integer types round half away from zero.
    fn from_f64(f: f64) -> Self;

    /// Rounding applied once after the percent stage.
    ///
    /// Identity for floats; round-half-away-from-zero for integers.
    fn round_intermediate(f: f64) -> f64 {
        f
    }
}

impl StatNumeric for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(f: f64) -> Self {
        f
    }
}

impl StatNumeric for f32 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(f: f64) -> Self {
        f as f32
    }
}

impl StatNumeric for i32 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    // f64::round rounds half away from zero.
    fn from_f64(f: f64) -> Self {
        f.round() as i32
    }

    fn round_intermediate(f: f64) -> f64 {
        f.round()
    }
}

impl StatNumeric for i64 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(f: f64) -> Self {
        f.round() as i64
    }

    fn round_intermediate(f: f64) -> f64 {
        f.round()
    }
}
