use kurbo::{Line, Point};
use std::path::PathBuf;

fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - a)
}

/// Do these two lines cross at a single point in both of their interiors?
///
/// Touching at an endpoint, or overlapping collinearly, doesn't count. This
/// is the plain floating-point orientation test, so it's only trustworthy for
/// inputs that stay well away from those degenerate cases.
pub fn crosses(l0: &Line, l1: &Line) -> bool {
    let o0 = orientation(l0.p0, l0.p1, l1.p0);
    let o1 = orientation(l0.p0, l0.p1, l1.p1);
    let o2 = orientation(l1.p0, l1.p1, l0.p0);
    let o3 = orientation(l1.p0, l1.p1, l0.p1);
    o0 * o1 < 0.0 && o2 * o3 < 0.0
}

/// All pairs `(i, j)` with `i < j` such that `lines[i]` crosses `lines[j]`,
/// found by checking every pair.
pub fn crossing_pairs(lines: &[Line]) -> Vec<(usize, usize)> {
    let mut ret = Vec::new();
    for (i, l0) in lines.iter().enumerate() {
        for (j, l1) in lines.iter().enumerate().skip(i + 1) {
            if crosses(l0, l1) {
                ret.push((i, j));
            }
        }
    }
    ret
}

/// The number of crossing pairs, found by checking every pair.
pub fn count_crossings(lines: &[Line]) -> usize {
    crossing_pairs(lines).len()
}

pub fn fixtures_dir() -> PathBuf {
    let mut ws: PathBuf = std::env::var_os("CARGO_MANIFEST_DIR").unwrap().into();
    ws.push("tests/fixtures");
    ws
}

pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}
