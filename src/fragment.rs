//! The flat unit of styled text every format reader produces.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::position::{HorizontalPosition, VerticalPosition};
use crate::style::{Colour, Effect, FontSize};
use crate::time::Time;

/// One minimally-scoped span of styled text with its own timing and
/// position, as emitted by a format reader.
///
/// Readers produce fragments independently, so a batch may mix metric
/// and rated times across fragments; within one fragment, `from` and
/// `to` must share a representation (the assembly step checks this).
/// [`crate::collect`] merges fragments into the [`crate::Cue`] tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fragment {
    /// The text itself, UTF-8, without markup.
    pub text: String,
    /// Font family name, if the source format names one.
    pub font: Option<String>,
    /// Font size, if specified.
    pub font_size: Option<FontSize>,
    /// Text effect, if any.
    pub effect: Option<Effect>,
    /// Colour of the effect, if any.
    pub effect_colour: Option<Colour>,
    /// Text colour.
    pub colour: Colour,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Vertical placement of the line this fragment belongs on.
    pub vertical_position: VerticalPosition,
    /// Horizontal placement of the line this fragment belongs on.
    pub horizontal_position: HorizontalPosition,
    /// When the fragment appears.
    pub from: Time,
    /// When the fragment disappears.
    pub to: Time,
    /// Fade-in duration, if any.
    pub fade_up: Option<Time>,
    /// Fade-out duration, if any.
    pub fade_down: Option<Time>,
}

impl Default for Fragment {
    fn default() -> Self {
        Fragment {
            text: String::new(),
            font: None,
            font_size: None,
            effect: None,
            effect_colour: None,
            colour: Colour::white(),
            bold: false,
            italic: false,
            underline: false,
            vertical_position: VerticalPosition::default(),
            horizontal_position: HorizontalPosition::default(),
            from: Time::from_hms(0, 0, 0, 0),
            to: Time::from_hms(0, 0, 0, 0),
            fade_up: None,
            fade_down: None,
        }
    }
}

impl Fragment {
    /// Order two fragments by their `from` time.
    ///
    /// Fails with [`Error::UnknownFrameRate`] when one start time is
    /// rated and the other metric; such pairs have no defined order.
    pub fn cmp_by_start(&self, other: &Fragment) -> Result<Ordering> {
        self.from.checked_cmp(&other.from)
    }

    /// Check that `from` and `to` use one representation, as the reader
    /// contract requires.
    pub(crate) fn check_consistent(&self) -> Result<()> {
        if self.from.is_rated() != self.to.is_rated() {
            return Err(Error::invariant(format!(
                "fragment {:?} mixes a rated and a metric time in from/to",
                self.text
            )));
        }
        Ok(())
    }
}
