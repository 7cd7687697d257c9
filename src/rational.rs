//! Exact integer-ratio arithmetic for frame rates.

use std::fmt;

/// A rational number, used wherever frame rates must stay exact
/// (23.976 fps is 24000/1001, not a float).
///
/// The denominator is always positive; the sign lives on the numerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rational {
    num: i64,
    den: i64,
}

impl Rational {
    /// Create a new rational number.
    ///
    /// # Panics
    ///
    /// Panics if `num` or `den` is zero. Neither a zero denominator nor a
    /// zero-frames-per-second rate is representable frame-rate data in
    /// any subtitle format, and a zero numerator would poison every
    /// frame-to-seconds conversion downstream.
    pub fn new(num: i64, den: i64) -> Self {
        assert!(den != 0, "rational denominator must be non-zero");
        assert!(num != 0, "rational numerator must be non-zero");
        if den < 0 {
            Rational { num: -num, den: -den }
        } else {
            Rational { num, den }
        }
    }

    /// Create a rational from a whole number.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero, as [`Rational::new`] does.
    pub fn from_int(n: i64) -> Self {
        Rational::new(n, 1)
    }

    /// The numerator.
    pub fn numerator(self) -> i64 {
        self.num
    }

    /// The denominator (always positive).
    pub fn denominator(self) -> i64 {
        self.den
    }

    /// The ratio as a floating point value.
    pub fn fraction(self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// The ratio truncated towards zero to a whole number.
    pub fn truncated(self) -> i64 {
        self.num / self.den
    }

    /// Whether the ratio is a whole number.
    pub fn is_integer(self) -> bool {
        self.num % self.den == 0
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}
