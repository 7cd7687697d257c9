//! The assembled cue tree: cues hold lines, lines hold styled runs.

use crate::fragment::Fragment;
use crate::position::{HorizontalPosition, VerticalPosition};
use crate::style::{Colour, Effect, FontSize};
use crate::time::Time;

/// A contiguous span of text sharing one style, inside a [`Line`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Run {
    /// The text itself.
    pub text: String,
    /// Font family name, if specified.
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
}

impl Run {
    /// Lift the styling and text of a fragment; position and timing stay
    /// with the line and cue.
    pub fn from_fragment(fragment: &Fragment) -> Self {
        Run {
            text: fragment.text.clone(),
            font: fragment.font.clone(),
            font_size: fragment.font_size,
            effect: fragment.effect,
            effect_colour: fragment.effect_colour,
            colour: fragment.colour,
            bold: fragment.bold,
            italic: fragment.italic,
            underline: fragment.underline,
        }
    }
}

/// One visual row of text within a [`Cue`]. Run order is reading order,
/// left to right.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// Vertical placement of the row.
    pub vertical_position: VerticalPosition,
    /// Horizontal placement of the row.
    pub horizontal_position: HorizontalPosition,
    /// The styled runs making up the row; never empty once assembled.
    pub runs: Vec<Run>,
}

impl Line {
    /// Start a line at a fragment's position, containing that fragment
    /// as its first run.
    pub fn from_fragment(fragment: &Fragment) -> Self {
        Line {
            vertical_position: fragment.vertical_position,
            horizontal_position: fragment.horizontal_position,
            runs: vec![Run::from_fragment(fragment)],
        }
    }
}

/// One on-screen subtitle event. Line order is visual stacking order,
/// top to bottom of the block.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cue {
    /// When the cue appears.
    pub from: Time,
    /// When the cue disappears.
    pub to: Time,
    /// Fade-in duration, if any.
    pub fade_up: Option<Time>,
    /// Fade-out duration, if any.
    pub fade_down: Option<Time>,
    /// The lines of the cue; never empty once assembled.
    pub lines: Vec<Line>,
}

impl Cue {
    /// Start a cue with a fragment's timing, containing that fragment as
    /// a single line with a single run.
    pub fn from_fragment(fragment: &Fragment) -> Self {
        Cue {
            from: fragment.from,
            to: fragment.to,
            fade_up: fragment.fade_up,
            fade_down: fragment.fade_down,
            lines: vec![Line::from_fragment(fragment)],
        }
    }

    /// The cue's text with runs joined and lines separated by `\n`,
    /// styling dropped. Handy for logging and tests.
    pub fn plain_text(&self) -> String {
        let lines: Vec<String> = self
            .lines
            .iter()
            .map(|line| line.runs.iter().map(|run| run.text.as_str()).collect())
            .collect();
        lines.join("\n")
    }
}
