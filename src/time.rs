//! Dual-representation subtitle time.
//!
//! A [`Time`] is either *metric* (whole seconds plus milliseconds) or
//! *rated* (whole seconds plus a frame count at a [`Rational`] frame
//! rate). The two representations are deliberately not comparable:
//! deciding whether frame 12 at 24000/1001 fps comes before 500 ms is a
//! frame-rate question the caller has to answer, so mixed comparisons
//! surface [`Error::UnknownFrameRate`] instead of guessing.
//!
//! All cross-rate arithmetic cross-multiplies numerator/denominator
//! pairs in `i128`, so hour counts far beyond any real programme cannot
//! overflow and no float rounding enters the comparison path.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};
use crate::rational::Rational;

/// Sub-second component of a [`Time`], fixing how the value reads.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubSecond {
    /// Milliseconds past the whole second (metric time).
    Millis(i64),
    /// Frames past the whole second, at the given frame rate (rated time).
    Frames(i64, Rational),
}

/// An instant on the subtitle timeline.
///
/// Whole seconds are stored flat (no separate hour/minute fields); the
/// sub-second part carries the representation. After arithmetic the
/// sub-second component may exceed one second's worth of units; every
/// comparison and conversion works on exact totals, so callers never
/// need to renormalize.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time {
    seconds: i64,
    sub: SubSecond,
}

/// Divide rounding half away from zero. `d` must be positive.
fn round_div(n: i128, d: i128) -> i64 {
    debug_assert!(d > 0);
    let q = if n >= 0 {
        (2 * n + d) / (2 * d)
    } else {
        -((-2 * n + d) / (2 * d))
    };
    q as i64
}

impl Time {
    /// Metric time from hours, minutes, seconds, and milliseconds.
    pub fn from_hms(hours: i64, minutes: i64, seconds: i64, milliseconds: i64) -> Self {
        Time {
            seconds: hours * 3600 + minutes * 60 + seconds,
            sub: SubSecond::Millis(milliseconds),
        }
    }

    /// Rated time from hours, minutes, seconds, and frames at `rate`.
    pub fn from_hmsf(hours: i64, minutes: i64, seconds: i64, frames: i64, rate: Rational) -> Self {
        Time {
            seconds: hours * 3600 + minutes * 60 + seconds,
            sub: SubSecond::Frames(frames, rate),
        }
    }

    /// Metric time from a flat millisecond count.
    pub fn from_milliseconds(milliseconds: i64) -> Self {
        Time {
            seconds: milliseconds.div_euclid(1000),
            sub: SubSecond::Millis(milliseconds.rem_euclid(1000)),
        }
    }

    /// Rated time from a flat frame count at `rate`.
    ///
    /// Whole seconds are split out when the rate is integral; at a
    /// fractional rate the count stays in the sub-second component,
    /// which every operation handles exactly.
    pub fn from_frames(frames: i64, rate: Rational) -> Self {
        if rate.is_integer() && rate.truncated() > 0 {
            let fps = rate.truncated();
            Time {
                seconds: frames.div_euclid(fps),
                sub: SubSecond::Frames(frames.rem_euclid(fps), rate),
            }
        } else {
            Time {
                seconds: 0,
                sub: SubSecond::Frames(frames, rate),
            }
        }
    }

    /// Whole seconds.
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// The sub-second component.
    pub fn sub_second(&self) -> SubSecond {
        self.sub
    }

    /// The frame rate, if this is a rated time.
    pub fn rate(&self) -> Option<Rational> {
        match self.sub {
            SubSecond::Millis(_) => None,
            SubSecond::Frames(_, rate) => Some(rate),
        }
    }

    /// Whether this time is frame-based.
    pub fn is_rated(&self) -> bool {
        matches!(self.sub, SubSecond::Frames(_, _))
    }

    /// The exact value as a fraction of a second: `(numerator,
    /// denominator)` with a positive denominator.
    fn as_ratio(&self) -> (i128, i128) {
        match self.sub {
            SubSecond::Millis(ms) => (self.seconds as i128 * 1000 + ms as i128, 1000),
            SubSecond::Frames(frames, rate) => {
                let num = self.seconds as i128 * rate.numerator() as i128
                    + frames as i128 * rate.denominator() as i128;
                let den = rate.numerator() as i128;
                if den < 0 {
                    (-num, -den)
                } else {
                    (num, den)
                }
            }
        }
    }

    /// The instant as a flat millisecond count, rounding the frame
    /// component to the nearest millisecond for rated times.
    pub fn milliseconds(&self) -> i64 {
        let (num, den) = self.as_ratio();
        round_div(num * 1000, den)
    }

    /// The instant in seconds, as a float.
    pub fn all_as_seconds(&self) -> f64 {
        let (num, den) = self.as_ratio();
        num as f64 / den as f64
    }

    /// The sub-second frame component converted to `rate`, rounded to
    /// the nearest frame.
    ///
    /// Fails with [`Error::UnknownFrameRate`] on a metric time: there is
    /// no frame count to convert.
    pub fn frames_at(&self, rate: Rational) -> Result<i64> {
        match self.sub {
            SubSecond::Millis(_) => Err(Error::unknown_frame_rate(
                "frames_at called on a metric time",
            )),
            SubSecond::Frames(frames, own) => {
                // frames * (rate / own), cross-multiplied exactly.
                let num = frames as i128
                    * rate.numerator() as i128
                    * own.denominator() as i128;
                let den = own.numerator() as i128 * rate.denominator() as i128;
                let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
                Ok(round_div(num, den))
            }
        }
    }

    /// Compare two times denoting instants, exactly.
    ///
    /// Both operands must share a representation; a rated time at one
    /// rate compares fine against a rated time at another (25 frames at
    /// 25 fps equals 50 frames at 50 fps), but rated against metric is
    /// [`Error::UnknownFrameRate`].
    pub fn checked_cmp(&self, other: &Time) -> Result<Ordering> {
        match (&self.sub, &other.sub) {
            (SubSecond::Millis(_), SubSecond::Millis(_))
            | (SubSecond::Frames(_, _), SubSecond::Frames(_, _)) => {
                let (an, ad) = self.as_ratio();
                let (bn, bd) = other.as_ratio();
                Ok((an * bd).cmp(&(bn * ad)))
            }
            _ => Err(Error::unknown_frame_rate(
                "cannot compare a rated time with a metric time",
            )),
        }
    }

    /// Equality via [`Time::checked_cmp`], with the same representation
    /// requirement.
    pub fn checked_eq(&self, other: &Time) -> Result<bool> {
        Ok(self.checked_cmp(other)? == Ordering::Equal)
    }

    /// Add a delta, keeping the receiver's representation.
    ///
    /// A delta in the other representation is normalized through the
    /// receiver's unit: a rated delta added to a metric time becomes
    /// milliseconds, a metric delta added to a rated time becomes frames
    /// at the receiver's rate (rounded to the nearest frame).
    pub fn add(&self, delta: &Time) -> Time {
        match self.sub {
            SubSecond::Millis(ms) => {
                let total = self.seconds * 1000 + ms + delta.milliseconds();
                Time::from_milliseconds(total)
            }
            SubSecond::Frames(frames, rate) => {
                // Whole seconds add directly; only the delta's sub-second
                // part needs converting into the receiver's frame unit.
                let delta_frames = match delta.sub {
                    SubSecond::Frames(df, dr) => {
                        let num = df as i128
                            * rate.numerator() as i128
                            * dr.denominator() as i128;
                        let den = dr.numerator() as i128 * rate.denominator() as i128;
                        let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
                        round_div(num, den)
                    }
                    SubSecond::Millis(ms) => {
                        let num = ms as i128 * rate.numerator() as i128;
                        let den = 1000 * rate.denominator() as i128;
                        let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
                        round_div(num, den)
                    }
                };
                Time {
                    seconds: self.seconds + delta.seconds,
                    sub: SubSecond::Frames(frames + delta_frames, rate),
                }
                .carry_frames()
            }
        }
    }

    /// Scale the instant by a factor, rounding to the receiver's unit.
    pub fn scale(&self, factor: f64) -> Time {
        match self.sub {
            SubSecond::Millis(_) => {
                let scaled = (self.milliseconds() as f64 * factor).round() as i64;
                Time::from_milliseconds(scaled)
            }
            SubSecond::Frames(frames, rate) => {
                let total = self.seconds as f64 * rate.fraction() + frames as f64;
                Time::from_frames((total * factor).round() as i64, rate)
            }
        }
    }

    /// Carry whole seconds out of the frame component where the rate
    /// allows it exactly.
    fn carry_frames(self) -> Time {
        match self.sub {
            SubSecond::Frames(frames, rate) if rate.is_integer() && rate.truncated() > 0 => {
                let fps = rate.truncated();
                Time {
                    seconds: self.seconds + frames.div_euclid(fps),
                    sub: SubSecond::Frames(frames.rem_euclid(fps), rate),
                }
            }
            _ => self,
        }
    }
}

/// Structural ergonomics for derived equality on fragments and cues:
/// incomparable pairs (rated vs metric) are simply unequal. Code that
/// must distinguish "unequal" from "incomparable" uses
/// [`Time::checked_eq`].
impl PartialEq for Time {
    fn eq(&self, other: &Self) -> bool {
        self.checked_eq(other).unwrap_or(false)
    }
}

/// Ordering via [`Time::checked_cmp`]; incomparable pairs are unordered.
impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.checked_cmp(other).ok()
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub {
            SubSecond::Millis(_) => {
                let total = self.milliseconds();
                let (sign, total) = if total < 0 { ("-", -total) } else { ("", total) };
                let ms = total % 1000;
                let s = (total / 1000) % 60;
                let m = (total / 60_000) % 60;
                let h = total / 3_600_000;
                write!(f, "{sign}{h:02}:{m:02}:{s:02}.{ms:03}")
            }
            SubSecond::Frames(frames, rate) => {
                let s = self.seconds % 60;
                let m = (self.seconds / 60) % 60;
                let h = self.seconds / 3600;
                write!(f, "{h:02}:{m:02}:{s:02}:{frames:02}@{rate}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_cross_rate_equality() {
        // 1 s + 25 frames @ 25 fps and 1 s + 50 frames @ 50 fps are both
        // exactly two seconds in.
        let a = Time::from_hmsf(0, 0, 1, 25, Rational::new(25, 1));
        let b = Time::from_hmsf(0, 0, 1, 50, Rational::new(50, 1));
        assert_eq!(a.checked_eq(&b), Ok(true));
        assert_eq!(a, b);

        let c = Time::from_hmsf(0, 0, 1, 51, Rational::new(50, 1));
        assert_eq!(a.checked_eq(&c), Ok(false));
        assert_ne!(a, c);
    }

    #[test]
    fn test_cross_rate_ordering() {
        let a = Time::from_hmsf(0, 0, 0, 23, Rational::new(24000, 1001));
        let b = Time::from_hmsf(0, 0, 1, 0, Rational::new(25, 1));
        assert_eq!(a.checked_cmp(&b), Ok(Ordering::Less));
        assert!(a < b);
    }

    #[test]
    fn test_rated_vs_metric_comparison_fails() {
        let metric = Time::from_hms(0, 0, 1, 0);
        let rated = Time::from_hmsf(0, 0, 1, 0, Rational::new(25, 1));
        assert_matches!(metric.checked_cmp(&rated), Err(Error::UnknownFrameRate(_)));
        assert_matches!(rated.checked_eq(&metric), Err(Error::UnknownFrameRate(_)));
        // The lenient operators treat the pair as unequal/unordered.
        assert_ne!(metric, rated);
        assert_eq!(metric.partial_cmp(&rated), None);
    }

    #[test]
    fn test_milliseconds() {
        assert_eq!(Time::from_hms(1, 2, 3, 456).milliseconds(), 3_723_456);
        let t = Time::from_hmsf(0, 0, 1, 12, Rational::new(24, 1));
        assert_eq!(t.milliseconds(), 1500);
        // 1 frame @ 24000/1001 fps is 1001/24 ms = 41.708... -> 42.
        let t = Time::from_hmsf(0, 0, 0, 1, Rational::new(24000, 1001));
        assert_eq!(t.milliseconds(), 42);
    }

    #[test]
    fn test_large_hour_counts_do_not_overflow() {
        let rate = Rational::new(30000, 1001);
        let a = Time::from_hmsf(4000, 0, 0, 0, rate);
        let b = Time::from_hmsf(4000, 0, 0, 1, rate);
        assert_eq!(a.checked_cmp(&b), Ok(Ordering::Less));
        assert_eq!(a.milliseconds(), 4000 * 3_600_000);
    }

    #[test]
    fn test_frames_at() {
        let t = Time::from_hmsf(0, 0, 1, 12, Rational::new(24, 1));
        assert_eq!(t.frames_at(Rational::new(48, 1)), Ok(24));
        assert_eq!(t.frames_at(Rational::new(24, 1)), Ok(12));
        // Rounds to the nearest frame.
        assert_eq!(t.frames_at(Rational::new(25, 1)), Ok(13)); // 12.5 rounds up

        let metric = Time::from_hms(0, 0, 1, 0);
        assert_matches!(
            metric.frames_at(Rational::new(25, 1)),
            Err(Error::UnknownFrameRate(_))
        );
    }

    #[test]
    fn test_from_frames() {
        let t = Time::from_frames(2500, Rational::new(25, 1));
        assert_eq!(t.seconds(), 100);
        assert_eq!(t.sub_second(), SubSecond::Frames(0, Rational::new(25, 1)));

        // Fractional rate: the count stays flat but totals stay exact.
        let t = Time::from_frames(24000, Rational::new(24000, 1001));
        assert_eq!(t.milliseconds(), 1_001_000);
    }

    #[test]
    fn test_from_milliseconds() {
        let t = Time::from_milliseconds(90_061_001);
        assert_eq!(t, Time::from_hms(25, 1, 1, 1));
    }

    #[test]
    fn test_add_metric() {
        let t = Time::from_hms(0, 0, 1, 900).add(&Time::from_hms(0, 0, 0, 200));
        assert_eq!(t, Time::from_hms(0, 0, 2, 100));
    }

    #[test]
    fn test_add_rated_same_rate() {
        let rate = Rational::new(25, 1);
        let t = Time::from_hmsf(0, 0, 1, 20, rate).add(&Time::from_hmsf(0, 0, 0, 10, rate));
        assert_eq!(t, Time::from_hmsf(0, 0, 2, 5, rate));
    }

    #[test]
    fn test_add_mixed_normalizes_into_receiver() {
        // Metric receiver: rated delta becomes milliseconds.
        let t = Time::from_hms(0, 0, 1, 0).add(&Time::from_hmsf(0, 0, 0, 12, Rational::new(24, 1)));
        assert_eq!(t, Time::from_hms(0, 0, 1, 500));

        // Rated receiver: metric delta becomes frames.
        let rate = Rational::new(25, 1);
        let t = Time::from_hmsf(0, 0, 1, 0, rate).add(&Time::from_hms(0, 0, 0, 40));
        assert_eq!(t, Time::from_hmsf(0, 0, 1, 1, rate));
    }

    #[test]
    fn test_scale() {
        let t = Time::from_hms(0, 0, 10, 0).scale(1.5);
        assert_eq!(t, Time::from_hms(0, 0, 15, 0));

        let rate = Rational::new(25, 1);
        let t = Time::from_hmsf(0, 0, 2, 0, rate).scale(0.5);
        assert_eq!(t, Time::from_hmsf(0, 0, 1, 0, rate));
    }

    #[test]
    fn test_all_as_seconds() {
        assert_eq!(Time::from_hms(0, 1, 30, 500).all_as_seconds(), 90.5);
        let t = Time::from_hmsf(0, 0, 1, 12, Rational::new(24, 1));
        assert_eq!(t.all_as_seconds(), 1.5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Time::from_hms(1, 2, 3, 45).to_string(), "01:02:03.045");
        let t = Time::from_hmsf(0, 10, 0, 12, Rational::new(25, 1));
        assert_eq!(t.to_string(), "00:10:00:12@25/1");
    }
}
