//! Cuefold: timing, positioning, and cue-assembly primitives shared by
//! subtitle format converters.
//!
//! Subtitle formats (SubRip, SSA/ASS, WebVTT, DCP XML, EBU STL) agree on
//! almost nothing: some count frames at a rational rate, some count
//! milliseconds; some position text from the top of the screen, some
//! from the bottom, some only know line stacking. This crate provides
//! the shared model every reader feeds into and every writer reads from,
//! plus the assembly fold that turns flat reader output into structured
//! cues.
//!
//! # Modules
//!
//! - `rational` - Exact integer-ratio frame rates
//! - `time` - Dual metric/rated time with exact cross-rate comparison
//! - `position` - Reference-frame-relative vertical/horizontal placement
//! - `style` - Colour, font size, and effect value types
//! - `fragment` - The flat styled-text unit readers produce
//! - `cue` - The assembled cue/line/run tree writers consume
//! - `collect` - The sort-and-fold assembly algorithm
//!
//! # Architecture
//!
//! A format reader parses its input into a bag of [`Fragment`]s, each a
//! minimal span of styled text carrying its own timing and position.
//! [`collect`] sorts the bag by start time (stably) and folds it:
//! fragments with identical timing merge into one [`Cue`], fragments on
//! the same position within a cue merge onto one [`Line`], and each
//! fragment becomes one [`Run`]. Writers walk the resulting tree. The
//! whole pipeline is pure and synchronous; the only fallible steps are
//! the time comparisons, which refuse to guess when a frame-based and a
//! millisecond-based time meet.
//!
//! ```
//! use cuefold::{collect, Cue, Fragment, Time};
//!
//! let fragments = vec![
//!     Fragment {
//!         text: "Hello".into(),
//!         from: Time::from_hms(0, 0, 1, 0),
//!         to: Time::from_hms(0, 0, 3, 0),
//!         ..Fragment::default()
//!     },
//!     Fragment {
//!         text: " world".into(),
//!         from: Time::from_hms(0, 0, 1, 0),
//!         to: Time::from_hms(0, 0, 3, 0),
//!         ..Fragment::default()
//!     },
//! ];
//!
//! let cues: Vec<Cue> = collect(fragments)?;
//! assert_eq!(cues.len(), 1);
//! assert_eq!(cues[0].plain_text(), "Hello world");
//! # Ok::<(), cuefold::Error>(())
//! ```

pub mod collect;
pub mod cue;
pub mod error;
pub mod fragment;
pub mod position;
pub mod rational;
pub mod style;
pub mod time;

pub use collect::{collect, flatten, CueSink};
pub use cue::{Cue, Line, Run};
pub use error::{Error, Result};
pub use fragment::Fragment;
pub use position::{
    HorizontalPosition, HorizontalReference, VerticalPlacement, VerticalPosition,
    VerticalReference, POSITION_TOLERANCE,
};
pub use rational::Rational;
pub use style::{
    convert_font_sizes, convert_font_sizes_to_proportional, Colour, Effect, FontSize,
};
pub use time::{SubSecond, Time};
