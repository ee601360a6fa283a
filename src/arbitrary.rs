//! Utilities for fuzz and/or property testing using `arbitrary`.

use arbitrary::Unstructured;

use crate::{Grid, LineSet};

/// The largest family we generate; brute-force checks are quadratic.
const MAX_FAMILY: usize = 24;

/// Generate an arbitrary float in some range.
pub fn float_in_range(
    start: f64,
    end: f64,
    u: &mut Unstructured<'_>,
) -> Result<f64, arbitrary::Error> {
    let num: u32 = u.arbitrary()?;
    let t = num as f64 / u32::MAX as f64;
    Ok((1.0 - t) * start + t * end)
}

fn float(u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    float_in_range(-1e3, 1e3, u)
}

/// A spacing that is bounded away from zero, with either sign.
fn spacing(u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    let mag = float_in_range(0.25, 20.0, u)?;
    Ok(if u.arbitrary()? { mag } else { -mag })
}

/// Generate an arbitrary family, which may or may not be usable in a valid grid.
pub fn line_set(u: &mut Unstructured<'_>) -> Result<LineSet, arbitrary::Error> {
    let y_min = float(u)?;
    Ok(LineSet {
        x_min_bot: float(u)?,
        x_min_top: float(u)?,
        y_min,
        y_max: y_min + float_in_range(-10.0, 100.0, u)?,
        del_x: float_in_range(-20.0, 20.0, u)?,
    })
}

/// Generate an arbitrary small grid, which may or may not be valid.
pub fn grid(u: &mut Unstructured<'_>) -> Result<Grid, arbitrary::Error> {
    let m = u.int_in_range(0..=MAX_FAMILY)?;
    let n = u.int_in_range(0..=MAX_FAMILY)?;
    Ok(Grid::with_line_sets(m, n, line_set(u)?, line_set(u)?))
}

/// Generate an arbitrary small grid that passes [`Grid::validate`].
///
/// Family A is arbitrary (apart from having a non-zero spacing). Family B's
/// spacing is arbitrary, and then its offsets are chosen to clear family A's
/// extreme segments by a random positive gap at the bottom and the top.
pub fn crossing_grid(u: &mut Unstructured<'_>) -> Result<Grid, arbitrary::Error> {
    let m = u.int_in_range(1..=MAX_FAMILY)?;
    let n = u.int_in_range(1..=MAX_FAMILY)?;
    let y_min = float(u)?;
    let y_max = y_min + float_in_range(0.5, 100.0, u)?;

    let a = LineSet {
        x_min_bot: float(u)?,
        x_min_top: float(u)?,
        y_min,
        y_max,
        del_x: spacing(u)?,
    };
    let del_b = spacing(u)?;

    // The extremes of `i * a.del_x - j * del_b` over the index range.
    let span_a = (m - 1) as f64 * a.del_x;
    let span_b = (n - 1) as f64 * del_b;
    let t_max = span_a.max(0.0) - span_b.min(0.0);
    let t_min = span_a.min(0.0) - span_b.max(0.0);

    let gap_bot = float_in_range(0.5, 100.0, u)?;
    let gap_top = float_in_range(0.5, 100.0, u)?;
    let (x_min_bot, x_min_top) = if u.arbitrary()? {
        // A starts left of B and ends right of it.
        (a.x_min_bot + t_max + gap_bot, a.x_min_top + t_min - gap_top)
    } else {
        (a.x_min_bot + t_min - gap_bot, a.x_min_top + t_max + gap_top)
    };

    let b = LineSet {
        x_min_bot,
        x_min_top,
        y_min,
        y_max,
        del_x: del_b,
    };
    Ok(Grid::with_line_sets(m, n, a, b))
}

/// Property checks that are shared between unit tests and fuzz targets.
pub mod arbtests {
    use super::*;

    /// Generated crossing grids validate, and their analytic intersection
    /// points lie inside the span, on both of their segments.
    pub fn crossing_grid_is_valid(u: &mut Unstructured<'_>) -> Result<(), arbitrary::Error> {
        let grid = crossing_grid(u)?;
        assert_eq!(grid.validate(), Ok(()), "{grid:?}");

        let (y_min, y_max) = (grid.family_a.y_min, grid.family_a.y_max);
        let scale = 1e-9 * (1.0 + y_max.abs().max(y_min.abs()));
        for i in 0..grid.m {
            for j in 0..grid.n {
                let p = grid.intersection(i, j);
                assert!(p.y > y_min - scale && p.y < y_max + scale);

                let sa = grid.family_a.segment(i);
                let sb = grid.family_b.segment(j);
                let tol = 1e-6 * (1.0 + p.x.abs());
                assert!((sa.at_y(p.y) - p.x).abs() < tol, "{grid:?} {i} {j}");
                assert!((sb.at_y(p.y) - p.x).abs() < tol, "{grid:?} {i} {j}");
            }
        }
        Ok(())
    }

    /// Writing any grid and reading it back gives exactly its segments.
    pub fn grid_round_trip(u: &mut Unstructured<'_>) -> Result<(), arbitrary::Error> {
        let grid = grid(u)?;
        let mut buf = Vec::new();
        grid.write(&mut buf).unwrap();
        let segs = crate::format::read_segments(buf.as_slice()).unwrap();
        assert_eq!(segs, grid.segments().collect::<Vec<_>>());
        Ok(())
    }
}
