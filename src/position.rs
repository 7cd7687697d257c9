//! Reference-frame-relative subtitle placement.
//!
//! Formats disagree about where positions are measured from: DCP XML
//! anchors to the top, centre, or bottom of the screen; SubRip only
//! knows line stacking relative to the subtitle itself. A position here
//! is a named reference frame plus either a proportional offset (a
//! fraction of the screen dimension) or, vertically, a discrete
//! line-index pair. [`VerticalPosition::fraction_from_screen_top`]
//! resolves everything to a single top-relative fraction so positions
//! from different references can still be stacked in order.

use std::cmp::Ordering;
use std::fmt;

/// Proportional positions closer than this compare equal: one pixel on
/// a DCI 2K flat (1998-pixel-wide) screen.
pub const POSITION_TOLERANCE: f64 = 1.0 / 1998.0;

/// Screen anchor a vertical position is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalReference {
    /// Measured down from the top edge of the screen.
    TopOfScreen,
    /// Measured down from the vertical centre of the screen.
    CentreOfScreen,
    /// Measured up from the bottom edge of the screen.
    BottomOfScreen,
    /// Measured down from the top of the subtitle block itself, for
    /// formats that only know relative line stacking (SubRip).
    TopOfSubtitle,
}

impl fmt::Display for VerticalReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopOfScreen => write!(f, "top"),
            Self::CentreOfScreen => write!(f, "center"),
            Self::BottomOfScreen => write!(f, "bottom"),
            Self::TopOfSubtitle => write!(f, "subtitle"),
        }
    }
}

/// Screen anchor a horizontal position is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalReference {
    /// Measured right from the left edge.
    Left,
    /// Measured from the horizontal centre.
    Centre,
    /// Measured left from the right edge.
    Right,
}

impl fmt::Display for HorizontalReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Centre => write!(f, "center"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// How a vertical offset is expressed.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalPlacement {
    /// Signed fraction of the screen height, relative to the reference.
    Proportional(f64),
    /// Discrete line index out of a total line count.
    Lines {
        /// Zero-based line index.
        line: i64,
        /// Total number of lines the index is measured against.
        lines: i64,
    },
}

/// Vertical placement of a line.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerticalPosition {
    /// Anchor the placement is measured from.
    pub reference: Option<VerticalReference>,
    /// The offset itself; `None` means unplaced.
    pub placement: Option<VerticalPlacement>,
}

impl VerticalPosition {
    /// A proportional position relative to `reference`.
    pub fn proportional(reference: VerticalReference, proportion: f64) -> Self {
        VerticalPosition {
            reference: Some(reference),
            placement: Some(VerticalPlacement::Proportional(proportion)),
        }
    }

    /// A line-index position relative to `reference`.
    pub fn lines(reference: VerticalReference, line: i64, lines: i64) -> Self {
        VerticalPosition {
            reference: Some(reference),
            placement: Some(VerticalPlacement::Lines { line, lines }),
        }
    }

    /// Resolve to a single fraction measured down from the top of the
    /// screen, for stacking order.
    ///
    /// An unset reference or unset placement resolves to 0 (a defined
    /// default, not an error). `TopOfSubtitle` resolves like
    /// `TopOfScreen`: with no absolute anchor known, relative stacking
    /// order is all that is preserved.
    pub fn fraction_from_screen_top(&self) -> f64 {
        let (Some(reference), Some(placement)) = (self.reference, self.placement) else {
            return 0.0;
        };
        let proportion = match placement {
            VerticalPlacement::Proportional(p) => p,
            VerticalPlacement::Lines { line, lines } => {
                if lines == 0 {
                    0.0
                } else {
                    line as f64 / lines as f64
                }
            }
        };
        match reference {
            VerticalReference::TopOfScreen | VerticalReference::TopOfSubtitle => proportion,
            VerticalReference::CentreOfScreen => proportion + 0.5,
            VerticalReference::BottomOfScreen => 1.0 - proportion,
        }
    }
}

/// Tolerant equality. Defined only for positions exposing the same
/// representation: proportional compares within [`POSITION_TOLERANCE`],
/// line form compares exactly, and a proportional position never equals
/// a line-based one. Two fully-unset positions are equal.
impl PartialEq for VerticalPosition {
    fn eq(&self, other: &Self) -> bool {
        if self.reference != other.reference {
            return false;
        }
        match (self.placement, other.placement) {
            (None, None) => true,
            (Some(VerticalPlacement::Proportional(a)), Some(VerticalPlacement::Proportional(b))) => {
                (a - b).abs() < POSITION_TOLERANCE
            }
            (
                Some(VerticalPlacement::Lines { line: al, lines: an }),
                Some(VerticalPlacement::Lines { line: bl, lines: bn }),
            ) => al == bl && an == bn,
            _ => false,
        }
    }
}

/// Ordering purely by the resolved top-relative fraction.
impl PartialOrd for VerticalPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.fraction_from_screen_top()
            .partial_cmp(&other.fraction_from_screen_top())
    }
}

/// Horizontal placement of a line.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HorizontalPosition {
    /// Anchor the offset is measured from.
    pub reference: Option<HorizontalReference>,
    /// Signed fraction of the screen width; `None` means unplaced.
    pub proportional: Option<f64>,
}

impl HorizontalPosition {
    /// A proportional position relative to `reference`.
    pub fn proportional(reference: HorizontalReference, proportion: f64) -> Self {
        HorizontalPosition {
            reference: Some(reference),
            proportional: Some(proportion),
        }
    }

    /// Dead centre of the screen.
    pub fn centred() -> Self {
        Self::proportional(HorizontalReference::Centre, 0.0)
    }
}

/// Tolerant equality within [`POSITION_TOLERANCE`]; both sides must
/// expose the same fields.
impl PartialEq for HorizontalPosition {
    fn eq(&self, other: &Self) -> bool {
        if self.reference != other.reference {
            return false;
        }
        match (self.proportional, other.proportional) {
            (None, None) => true,
            (Some(a), Some(b)) => (a - b).abs() < POSITION_TOLERANCE,
            _ => false,
        }
    }
}
