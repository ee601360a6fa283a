//! Checking an intersection program's output against a grid's known answer.

use crate::{Grid, ResultFile, Segment};

// Intersection programs often print with six significant digits.
const REL_TOLERANCE: f64 = 1e-5;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= REL_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

fn same_segment(a: &Segment, b: &Segment) -> bool {
    a.coords()
        .into_iter()
        .zip(b.coords())
        .all(|(x, y)| close(x, y))
}

/// How a result file compares to the grid it was computed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Report {
    /// `m + n`.
    pub expected_segments: u64,
    /// The number of segments in the result file.
    pub found_segments: u64,
    /// How many of the result file's segments differ from the grid's segment
    /// at the same position.
    pub mismatched_segments: u64,
    /// `m * n`.
    pub expected_intersections: u64,
    /// The number of intersections in the result file.
    pub found_intersections: u64,
    /// How many reported intersections lie outside the grid's vertical span.
    pub out_of_span: u64,
}

impl Report {
    /// Does the result file agree with the grid?
    pub fn is_ok(&self) -> bool {
        self.expected_segments == self.found_segments
            && self.mismatched_segments == 0
            && self.expected_intersections == self.found_intersections
            && self.out_of_span == 0
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "segments: {} found, {} expected, {} mismatched",
            self.found_segments, self.expected_segments, self.mismatched_segments
        )?;
        write!(
            f,
            "intersections: {} found, {} expected, {} outside the grid",
            self.found_intersections, self.expected_intersections, self.out_of_span
        )
    }
}

/// Compares a parsed result file against `grid`.
///
/// Segments are compared position by position, up to a small relative
/// tolerance. Intersections are only counted and checked against the
/// vertical span, since programs may report them in any order.
pub fn verify(grid: &Grid, result: &ResultFile) -> Report {
    let mismatched_segments = grid
        .segments()
        .zip(&result.segments)
        .filter(|(expected, found)| !same_segment(expected, found))
        .count() as u64;

    let span = if grid.m > 0 {
        Some(grid.family_a)
    } else if grid.n > 0 {
        Some(grid.family_b)
    } else {
        None
    };
    let out_of_span = result
        .intersections
        .iter()
        .filter(|p| match span {
            Some(set) => !(set.y_min..=set.y_max).contains(&p.y),
            None => true,
        })
        .count() as u64;

    let report = Report {
        expected_segments: grid.num_segments(),
        found_segments: result.segments.len() as u64,
        mismatched_segments,
        expected_intersections: grid.num_intersections(),
        found_intersections: result.intersections.len() as u64,
        out_of_span,
    };
    if !report.is_ok() {
        tracing::warn!(?report, "result file disagrees with the grid");
    }
    report
}
