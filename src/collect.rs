//! Fragment assembly: sort a flat bag of fragments and fold it into the
//! cue/line/run tree.
//!
//! Readers emit [`Fragment`]s in whatever order and granularity suits
//! their format; [`collect`] is the one place where those flat pieces
//! become structured [`Cue`]s. Fragments sharing identical timing merge
//! into one cue, fragments sharing a line position within a cue merge
//! onto one line, and every fragment lands as exactly one run.

use std::cmp::Ordering;
use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::cue::{Cue, Line, Run};
use crate::error::{Error, Result};
use crate::fragment::Fragment;

/// An appendable, order-preserving sequence of cues.
///
/// [`collect`] is generic over its output container; anything that can
/// take cues one at a time, in order, will do.
pub trait CueSink {
    /// Append one cue, after all previously appended cues.
    fn push_cue(&mut self, cue: Cue);
}

impl CueSink for Vec<Cue> {
    fn push_cue(&mut self, cue: Cue) {
        self.push(cue);
    }
}

impl CueSink for VecDeque<Cue> {
    fn push_cue(&mut self, cue: Cue) {
        self.push_back(cue);
    }
}

/// Assemble an unordered bag of fragments into a time-ordered sequence
/// of cues.
///
/// The fold walks fragments in start-time order (a stable sort, so
/// fragments sharing a start keep their relative order). A fragment
/// joins the cue in progress only when its `from`, `to`, `fade_up`, and
/// `fade_down` all equal the cue's; within a cue it joins the last line
/// only when both its positions equal that line's, and otherwise opens
/// a new line. Incomparable fade times count as unequal rather than
/// erroring, so a fragment with mismatched fades starts a fresh cue.
///
/// Errors before any folding happens:
/// - [`Error::InvariantViolation`] if any fragment's own `from`/`to`
///   mix a rated and a metric time;
/// - [`Error::UnknownFrameRate`] if the batch mixes rated and metric
///   start times across fragments. This is checked for the whole batch
///   up front, deliberately stricter than the pairwise minimum a sort
///   needs: whether a given pair ever gets compared depends on sort
///   internals, and a mix that slips through on one input would fail on
///   a reordering of the same input.
///
/// Re-flattening the output with [`flatten`] and collecting again
/// reproduces an equivalent tree, except for fragments whose positions
/// sat within [`crate::position::POSITION_TOLERANCE`] of a line
/// boundary: tolerant equality is not transitive, so such borderline
/// fragments may group differently on the second pass.
pub fn collect<O>(fragments: impl IntoIterator<Item = Fragment>) -> Result<O>
where
    O: CueSink + Default,
{
    let mut fragments: Vec<Fragment> = fragments.into_iter().collect();
    let mut out = O::default();
    if fragments.is_empty() {
        return Ok(out);
    }

    for fragment in &fragments {
        fragment.check_consistent()?;
    }
    let any_rated = fragments.iter().any(|f| f.from.is_rated());
    let any_metric = fragments.iter().any(|f| !f.from.is_rated());
    if any_rated && any_metric {
        return Err(Error::unknown_frame_rate(
            "fragment batch mixes rated and metric start times",
        ));
    }

    // The validation above rules out incomparable pairs, so the
    // comparator cannot fail here; std's sort_by is stable, which keeps
    // tied fragments in their original relative order.
    fragments.sort_by(|a, b| a.cmp_by_start(b).unwrap_or(Ordering::Equal));

    let total = fragments.len();
    let mut cue_count = 0usize;
    let mut current: Option<Cue> = None;
    for fragment in &fragments {
        match current.as_mut() {
            Some(cue) if same_metadata(cue, fragment) => append_fragment(cue, fragment),
            _ => {
                if let Some(done) = current.take() {
                    out.push_cue(done);
                    cue_count += 1;
                }
                trace!(from = %fragment.from, "starting cue");
                current = Some(Cue::from_fragment(fragment));
            }
        }
    }
    if let Some(done) = current.take() {
        out.push_cue(done);
        cue_count += 1;
    }

    debug!(fragments = total, cues = cue_count, "collected fragments");
    Ok(out)
}

/// Walk a cue tree back into flat fragments, one per run.
///
/// Positions are taken from each run's line and timing from its cue, so
/// collecting the result again rebuilds an equivalent tree (see the
/// idempotence note on [`collect`]).
pub fn flatten(cues: &[Cue]) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    for cue in cues {
        for line in &cue.lines {
            for run in &line.runs {
                fragments.push(Fragment {
                    text: run.text.clone(),
                    font: run.font.clone(),
                    font_size: run.font_size,
                    effect: run.effect,
                    effect_colour: run.effect_colour,
                    colour: run.colour,
                    bold: run.bold,
                    italic: run.italic,
                    underline: run.underline,
                    vertical_position: line.vertical_position,
                    horizontal_position: line.horizontal_position,
                    from: cue.from,
                    to: cue.to,
                    fade_up: cue.fade_up,
                    fade_down: cue.fade_down,
                });
            }
        }
    }
    fragments
}

/// Whether a fragment shares the in-progress cue's timing identity.
/// Position and style play no part; fades are part of the identity, so
/// fragments differing only in fade timing split into separate cues.
fn same_metadata(cue: &Cue, fragment: &Fragment) -> bool {
    cue.from == fragment.from
        && cue.to == fragment.to
        && cue.fade_up == fragment.fade_up
        && cue.fade_down == fragment.fade_down
}

/// Attach a fragment to a cue: extend the last line when both positions
/// match it, otherwise open a new line.
fn append_fragment(cue: &mut Cue, fragment: &Fragment) {
    if let Some(line) = cue.lines.last_mut() {
        if line.vertical_position == fragment.vertical_position
            && line.horizontal_position == fragment.horizontal_position
        {
            line.runs.push(Run::from_fragment(fragment));
            return;
        }
    }
    trace!(line = cue.lines.len(), "starting line");
    cue.lines.push(Line::from_fragment(fragment));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{
        HorizontalPosition, HorizontalReference, VerticalPosition, VerticalReference,
    };
    use crate::rational::Rational;
    use crate::time::Time;
    use assert_matches::assert_matches;

    fn fragment(text: &str, from_ms: i64, to_ms: i64, line: i64) -> Fragment {
        Fragment {
            text: text.into(),
            vertical_position: VerticalPosition::lines(VerticalReference::TopOfSubtitle, line, 2),
            horizontal_position: HorizontalPosition::proportional(HorizontalReference::Centre, 0.0),
            from: Time::from_milliseconds(from_ms),
            to: Time::from_milliseconds(to_ms),
            ..Fragment::default()
        }
    }

    #[test]
    fn test_empty_input() {
        let cues: Vec<Cue> = collect(Vec::new()).unwrap();
        assert!(cues.is_empty());
    }

    #[test]
    fn test_grouping_same_metadata_and_position() {
        let a = fragment("Hello", 0, 1000, 0);
        let b = fragment(" world", 0, 1000, 0);
        let cues: Vec<Cue> = collect(vec![a, b]).unwrap();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].lines.len(), 1);
        assert_eq!(cues[0].lines[0].runs.len(), 2);
        assert_eq!(cues[0].lines[0].runs[0].text, "Hello");
        assert_eq!(cues[0].lines[0].runs[1].text, " world");
    }

    #[test]
    fn test_splitting_on_position() {
        let a = fragment("one", 0, 1000, 0);
        let b = fragment("two", 0, 1000, 1);
        let cues: Vec<Cue> = collect(vec![a, b]).unwrap();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].lines.len(), 2);
        assert_eq!(cues[0].lines[0].runs.len(), 1);
        assert_eq!(cues[0].lines[1].runs.len(), 1);
    }

    #[test]
    fn test_new_cue_on_timing_change() {
        let a = fragment("one", 0, 1000, 0);
        let b = fragment("two", 500, 1000, 0);
        let cues: Vec<Cue> = collect(vec![a, b]).unwrap();
        assert_eq!(cues.len(), 2);
    }

    #[test]
    fn test_new_cue_on_fade_change() {
        let a = fragment("one", 0, 1000, 0);
        let mut b = fragment("two", 0, 1000, 0);
        b.fade_up = Some(Time::from_milliseconds(80));
        let cues: Vec<Cue> = collect(vec![a, b]).unwrap();
        assert_eq!(cues.len(), 2);
    }

    #[test]
    fn test_sort_orders_by_start_time() {
        let cues: Vec<Cue> = collect(vec![
            fragment("late", 2000, 3000, 0),
            fragment("early", 0, 1000, 0),
        ])
        .unwrap();
        assert_eq!(cues[0].plain_text(), "early");
        assert_eq!(cues[1].plain_text(), "late");
    }

    #[test]
    fn test_sort_is_stable_for_tied_starts() {
        let cues: Vec<Cue> = collect(vec![
            fragment("first", 0, 1000, 0),
            fragment("second", 0, 1000, 0),
            fragment("third", 0, 1000, 0),
        ])
        .unwrap();
        assert_eq!(cues.len(), 1);
        let texts: Vec<&str> = cues[0].lines[0]
            .runs
            .iter()
            .map(|run| run.text.as_str())
            .collect();
        assert_eq!(texts, ["first", "second", "third"]);
    }

    #[test]
    fn test_mixed_batch_fails_before_folding() {
        let metric = fragment("a", 0, 1000, 0);
        let rate = Rational::new(25, 1);
        let rated = Fragment {
            from: Time::from_hmsf(0, 0, 0, 0, rate),
            to: Time::from_hmsf(0, 0, 1, 0, rate),
            ..fragment("b", 0, 1000, 0)
        };
        let result: Result<Vec<Cue>> = collect(vec![metric, rated]);
        assert_matches!(result, Err(Error::UnknownFrameRate(_)));
    }

    #[test]
    fn test_internally_inconsistent_fragment_fails() {
        let bad = Fragment {
            to: Time::from_hmsf(0, 0, 1, 0, Rational::new(25, 1)),
            ..fragment("a", 0, 1000, 0)
        };
        let result: Result<Vec<Cue>> = collect(vec![bad]);
        assert_matches!(result, Err(Error::InvariantViolation(_)));
    }

    #[test]
    fn test_every_line_has_a_run() {
        let cues: Vec<Cue> = collect(vec![
            fragment("a", 0, 1000, 0),
            fragment("b", 0, 1000, 1),
            fragment("c", 1000, 2000, 0),
        ])
        .unwrap();
        for cue in &cues {
            assert!(!cue.lines.is_empty());
            for line in &cue.lines {
                assert!(!line.runs.is_empty());
            }
        }
    }

    #[test]
    fn test_flatten_then_collect_is_idempotent() {
        let original: Vec<Cue> = collect(vec![
            fragment("Hello", 0, 1000, 0),
            fragment(" world", 0, 1000, 0),
            fragment("Line two", 0, 1000, 1),
            fragment("Later", 2000, 3000, 0),
        ])
        .unwrap();
        let recollected: Vec<Cue> = collect(flatten(&original)).unwrap();
        assert_eq!(original, recollected);
    }

    #[test]
    fn test_vecdeque_sink() {
        let cues: VecDeque<Cue> = collect(vec![
            fragment("a", 0, 1000, 0),
            fragment("b", 2000, 3000, 0),
        ])
        .unwrap();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].plain_text(), "a");
    }

    #[test]
    fn test_rated_batch_collects() {
        let rate = Rational::new(24, 1);
        let make = |text: &str, s: i64| Fragment {
            text: text.into(),
            from: Time::from_hmsf(0, 0, s, 0, rate),
            to: Time::from_hmsf(0, 0, s + 1, 0, rate),
            ..fragment("", 0, 0, 0)
        };
        let cues: Vec<Cue> = collect(vec![make("b", 5), make("a", 1)]).unwrap();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].plain_text(), "a");
    }
}
