//! Utilities for generating benchmark inputs.
//!
//! The main generator is [`Grid`]: two families of parallel segments, arranged
//! so that every segment of one family crosses every segment of the other
//! exactly once. That makes the number of intersections (`m * n`) known
//! without running any geometric algorithm, so benchmark timings can be
//! plotted against problem size directly.
//!
//! There are also a few randomized generators ([`random`], [`sparse`],
//! [`drunk_grid`]) and deterministic ones ([`slanted`], [`cube`]), whose
//! intersection counts are not known in advance.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::distributions::Uniform;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::format::{write_intersections, write_segments};
use crate::{Error, Point, Segment};

/// A family of parallel segments.
///
/// Every segment in the family spans the same vertical range, from `y_min`
/// to `y_max`. Segment `i` goes from `(x_min_bot + i * del_x, y_min)` to
/// `(x_min_top + i * del_x, y_max)`, so consecutive segments are horizontal
/// translates of one another. As long as `del_x` is non-zero, no two of
/// them intersect.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineSet {
    /// The `x` coordinate of the first segment's bottom endpoint.
    pub x_min_bot: f64,
    /// The `x` coordinate of the first segment's top endpoint.
    pub x_min_top: f64,
    /// The `y` coordinate of every bottom endpoint.
    pub y_min: f64,
    /// The `y` coordinate of every top endpoint.
    pub y_max: f64,
    /// The horizontal offset between consecutive segments.
    pub del_x: f64,
}

impl LineSet {
    /// The default first family: segments leaning right, `4.5` apart.
    pub const FAMILY_A: LineSet = LineSet {
        x_min_bot: 0.0,
        x_min_top: 5.0,
        y_min: 0.0,
        y_max: 8.0,
        del_x: 4.5,
    };

    /// The default second family for an `m` by `n` grid.
    ///
    /// These segments lean left and are `6` apart. They are positioned so
    /// that the bottom endpoints all lie to the right of the bottom endpoints
    /// of [`LineSet::FAMILY_A`]'s first `m` segments, and the top endpoints
    /// all lie to the left of its top endpoints. For a one-by-one grid this
    /// is the segment `(1.5, 0) -- (-10, 8)`.
    pub fn family_b(m: usize, n: usize) -> LineSet {
        let a = LineSet::FAMILY_A;
        LineSet {
            x_min_bot: 1.5 + a.del_x * m.saturating_sub(1) as f64,
            x_min_top: -10.0 - 6.0 * n.saturating_sub(1) as f64,
            y_min: a.y_min,
            y_max: a.y_max,
            del_x: 6.0,
        }
    }

    /// The `i`th segment of this family, from bottom to top.
    pub fn segment(&self, i: usize) -> Segment {
        let offset = i as f64 * self.del_x;
        Segment::new(
            (self.x_min_bot + offset, self.y_min),
            (self.x_min_top + offset, self.y_max),
        )
    }

    /// The first `count` segments of this family, in index order.
    pub fn segments(self, count: usize) -> impl Iterator<Item = Segment> {
        (0..count).map(move |i| self.segment(i))
    }

    /// How far a segment moves horizontally between its bottom and top.
    ///
    /// Since all segments in two families span the same height, two families
    /// are parallel exactly when their leans are equal.
    pub fn lean(&self) -> f64 {
        self.x_min_top - self.x_min_bot
    }

    fn validate(&self, family: Family, count: usize) -> Result<(), InvalidGrid> {
        let fields = [
            self.x_min_bot,
            self.x_min_top,
            self.y_min,
            self.y_max,
            self.del_x,
        ];
        if fields.iter().any(|x| !x.is_finite()) {
            return Err(InvalidGrid::NonFinite(family));
        }
        if self.y_min >= self.y_max {
            return Err(InvalidGrid::EmptySpan(family));
        }
        if count < 2 {
            return Ok(());
        }

        let last = self.segment(count - 1);
        if last.coords().iter().any(|x| !x.is_finite()) {
            return Err(InvalidGrid::NonFinite(family));
        }
        // Rounding is coarsest at the ends of the index range, so if any two
        // neighbors coincide at the bottom or the top, one of these pairs does.
        for i in [0, count - 2] {
            let (s0, s1) = (self.segment(i), self.segment(i + 1));
            if s0.p0.x == s1.p0.x || s0.p1.x == s1.p1.x {
                return Err(InvalidGrid::ZeroSpacing(family));
            }
        }
        Ok(())
    }
}

/// One of the two segment families in a [`Grid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    /// The family that is written first.
    A,
    /// The family that is written second.
    B,
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Family::A => write!(f, "family A"),
            Family::B => write!(f, "family B"),
        }
    }
}

/// The reasons a [`Grid`] can fail to have exactly `m * n` intersections.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InvalidGrid {
    /// One of the family's parameters was infinite or NaN.
    NonFinite(Family),
    /// The family's `y_min` was not smaller than its `y_max`.
    EmptySpan(Family),
    /// The family has more than one segment, but neighboring segments
    /// share an endpoint: `del_x` is zero, or too small to change the
    /// family's coordinates.
    ZeroSpacing(Family),
    /// The two families span different vertical ranges.
    MismatchedSpans,
    /// The two families are parallel, so they never cross.
    Parallel,
    /// Segment `i` of family A and segment `j` of family B don't cross
    /// strictly inside the vertical span.
    MissedCrossing {
        /// The index in family A.
        i: usize,
        /// The index in family B.
        j: usize,
    },
}

impl std::fmt::Display for InvalidGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidGrid::NonFinite(fam) => write!(f, "{fam} has a non-finite parameter"),
            InvalidGrid::EmptySpan(fam) => write!(f, "{fam} has y_min >= y_max"),
            InvalidGrid::ZeroSpacing(fam) => write!(f, "{fam} has segments that touch each other"),
            InvalidGrid::MismatchedSpans => write!(f, "the families span different y ranges"),
            InvalidGrid::Parallel => write!(f, "the families are parallel"),
            InvalidGrid::MissedCrossing { i, j } => write!(
                f,
                "segment {i} of family A doesn't cross segment {j} of family B"
            ),
        }
    }
}

impl std::error::Error for InvalidGrid {}

/// Two families of segments in which every segment of family A crosses every
/// segment of family B exactly once.
///
/// A grid has `m + n` segments and `m * n` intersections. When written to a
/// file, family A's segments come first (in index order), followed by family
/// B's, so a segment's family can be recovered from its position alone (see
/// [`Grid::family_of`]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    /// The number of segments in family A.
    pub m: usize,
    /// The number of segments in family B.
    pub n: usize,
    /// The parameters of family A.
    pub family_a: LineSet,
    /// The parameters of family B.
    pub family_b: LineSet,
}

impl Grid {
    /// An `m` by `n` grid with the default families.
    ///
    /// The default families always pass [`Grid::validate`].
    pub fn new(m: usize, n: usize) -> Self {
        Grid {
            m,
            n,
            family_a: LineSet::FAMILY_A,
            family_b: LineSet::family_b(m, n),
        }
    }

    /// An `m` by `n` grid with custom families.
    ///
    /// Whether these families actually produce `m * n` crossings is up to the
    /// caller; check with [`Grid::validate`].
    pub fn with_line_sets(m: usize, n: usize, family_a: LineSet, family_b: LineSet) -> Self {
        Grid {
            m,
            n,
            family_a,
            family_b,
        }
    }

    /// The total number of segments, `m + n`.
    pub fn num_segments(&self) -> u64 {
        self.m as u64 + self.n as u64
    }

    /// The number of intersections between segments, `m * n`.
    ///
    /// This is only accurate if [`Grid::validate`] succeeds.
    pub fn num_intersections(&self) -> u64 {
        self.m as u64 * self.n as u64
    }

    /// Checks that every segment of family A crosses every segment of family
    /// B exactly once, strictly between `y_min` and `y_max`, and that segments
    /// in the same family never meet.
    ///
    /// Write `d_bot(i, j)` and `d_top(i, j)` for the horizontal distances
    /// between segment `i` of A and segment `j` of B at the bottom and the
    /// top of the span. The two segments cross strictly inside the span if
    /// and only if `d_bot` and `d_top` have strictly opposite signs. Both are
    /// affine in `(i, j)`, so it is enough to check the four corners of the
    /// index range.
    pub fn validate(&self) -> Result<(), InvalidGrid> {
        let (a, b) = (&self.family_a, &self.family_b);
        if self.m > 0 {
            a.validate(Family::A, self.m)?;
        }
        if self.n > 0 {
            b.validate(Family::B, self.n)?;
        }
        if self.m == 0 || self.n == 0 {
            return Ok(());
        }

        if a.y_min != b.y_min || a.y_max != b.y_max {
            return Err(InvalidGrid::MismatchedSpans);
        }
        if a.lean() == b.lean() {
            return Err(InvalidGrid::Parallel);
        }

        let corners = [
            (0, 0),
            (self.m - 1, 0),
            (0, self.n - 1),
            (self.m - 1, self.n - 1),
        ];
        for (i, j) in corners {
            let sa = a.segment(i);
            let sb = b.segment(j);
            let d_bot = sa.p0.x - sb.p0.x;
            let d_top = sa.p1.x - sb.p1.x;
            let crosses = (d_bot < 0.0 && d_top > 0.0) || (d_bot > 0.0 && d_top < 0.0);
            if !crosses {
                return Err(InvalidGrid::MissedCrossing { i, j });
            }
        }
        Ok(())
    }

    /// All segments, in file order: family A, then family B.
    pub fn segments(&self) -> impl Iterator<Item = Segment> {
        self.family_a
            .segments(self.m)
            .chain(self.family_b.segments(self.n))
    }

    /// Which family the segment at `index` (in file order) belongs to.
    pub fn family_of(&self, index: usize) -> Option<Family> {
        if index < self.m {
            Some(Family::A)
        } else if index - self.m < self.n {
            Some(Family::B)
        } else {
            None
        }
    }

    /// The point where segment `i` of family A crosses segment `j` of family B.
    ///
    /// This is computed directly from the families' parameters. It is
    /// meaningless if the grid doesn't pass [`Grid::validate`].
    pub fn intersection(&self, i: usize, j: usize) -> Point {
        let sa = self.family_a.segment(i);
        let sb = self.family_b.segment(j);
        let d_bot = sa.p0.x - sb.p0.x;
        let d_top = sa.p1.x - sb.p1.x;
        // Both segments span the same heights, so at the same parameter `t`
        // they are at the same `y`; we want the `t` where their `x`s agree.
        let t = d_bot / (d_bot - d_top);
        sa.p0.affine(&sa.p1, t)
    }

    /// All `m * n` intersection points, ordered by family A index and then by
    /// family B index.
    pub fn intersections(&self) -> impl Iterator<Item = Point> {
        let grid = *self;
        (0..grid.m).flat_map(move |i| (0..grid.n).map(move |j| grid.intersection(i, j)))
    }

    /// Writes this grid in the grid file format.
    ///
    /// The segments are streamed, so this uses a constant amount of memory no
    /// matter how big the grid is. The output is not buffered, and the grid is
    /// not validated.
    pub fn write<W: Write>(&self, out: W) -> Result<(), Error> {
        let count = self.m + self.n;
        write_segments(out, count, self.segments())
    }

    /// Writes this grid in the result file format, with the intersection
    /// section filled in analytically.
    ///
    /// This is what a correct intersection program should report, up to the
    /// order of the intersection points and floating-point error.
    pub fn write_expected<W: Write>(&self, mut out: W) -> Result<(), Error> {
        let count = self.m.checked_mul(self.n).ok_or_else(|| {
            Error::InvalidParameter(format!("{} * {} intersections is too many", self.m, self.n))
        })?;
        self.write(&mut out)?;
        write_intersections(&mut out, count, self.intersections())
    }
}

/// The conventional file name for an `m` by `n` grid.
pub fn default_file_name(m: usize, n: usize) -> String {
    format!("grid_m_{m}-n_{n}.txt")
}

fn write_file(
    path: &Path,
    grid: &Grid,
    write: impl FnOnce(&Grid, &mut BufWriter<File>) -> Result<(), Error>,
) -> Result<(), Error> {
    grid.validate()?;
    tracing::info!(
        path = %path.display(),
        m = grid.m,
        n = grid.n,
        segments = grid.num_segments(),
        intersections = grid.num_intersections(),
        "writing grid"
    );

    let mut out = BufWriter::new(File::create(path)?);
    write(grid, &mut out)?;
    out.flush()?;
    tracing::debug!(path = %path.display(), "finished writing grid");
    Ok(())
}

/// Validates `grid` and writes it to `path` in the grid file format.
///
/// The file is created or truncated. If the grid is invalid, no file is
/// created. If writing fails partway, the file is left truncated.
pub fn generate_grid(path: impl AsRef<Path>, grid: &Grid) -> Result<(), Error> {
    write_file(path.as_ref(), grid, |grid, out| grid.write(out))
}

/// Like [`generate_grid`], but writes a result file including the analytic
/// intersection points.
pub fn generate_expected_result(path: impl AsRef<Path>, grid: &Grid) -> Result<(), Error> {
    write_file(path.as_ref(), grid, |grid, out| grid.write_expected(out))
}

fn normal(mean: f64, std: f64) -> Result<Normal<f64>, Error> {
    Normal::new(mean, std).map_err(|e| Error::InvalidParameter(format!("normal({mean}, {std}): {e}")))
}

/// `count` segments with endpoints chosen uniformly from the square
/// `[-range, range) x [-range, range)`.
pub fn random<R: Rng + ?Sized>(
    count: usize,
    range: f64,
    rng: &mut R,
) -> Result<Vec<Segment>, Error> {
    if !(range.is_finite() && range > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "range must be positive and finite, not {range}"
        )));
    }
    let dist = Uniform::new(-range, range);
    let mut coord = || rng.sample(dist);
    Ok((0..count)
        .map(|_| Segment::new((coord(), coord()), (coord(), coord())))
        .collect())
}

/// A `count` by `count` lattice of segments of length 10, one starting at
/// each lattice point, pointing in a normally distributed direction.
///
/// The lattice spacing is also 10, so neighboring segments sometimes meet.
pub fn sparse<R: Rng + ?Sized>(
    count: usize,
    mean: f64,
    std: f64,
    rng: &mut R,
) -> Result<Vec<Segment>, Error> {
    let angle = normal(mean, std)?;
    let total = count
        .checked_mul(count)
        .ok_or_else(|| Error::InvalidParameter(format!("{count} squared is too many")))?;

    let mut ret = Vec::with_capacity(total);
    for i in 0..count {
        for j in 0..count {
            let x = i as f64 * 10.0;
            let y = j as f64 * 10.0;
            let theta = angle.sample(rng);
            ret.push(Segment::new(
                (x, y),
                (x + 10.0 * theta.cos(), y + 10.0 * theta.sin()),
            ));
        }
    }
    Ok(ret)
}

/// A stack of segments, one unit apart vertically, each one slanted a bit
/// more than the last: segment `i` goes from `(-i, i)` to `(i, i + 1)`.
pub fn slanted(count: usize) -> Vec<Segment> {
    (0..count)
        .map(|i| {
            let i = i as f64;
            Segment::new((-i, i), (i, i + 1.0))
        })
        .collect()
}

/// A `count` by `count` grid of horizontal and vertical lines at unit
/// spacing, with every endpoint jittered by `variance` times a sample from a
/// normal distribution.
///
/// With no jitter, this has `count * count` intersections (minus the ones
/// that degenerate into touching endpoints at the border).
pub fn drunk_grid<R: Rng + ?Sized>(
    count: usize,
    variance: f64,
    mean: f64,
    std: f64,
    rng: &mut R,
) -> Result<Vec<Segment>, Error> {
    let noise = normal(mean, std)?;
    let (dx, dy) = (0.0, -0.3);
    let far = count.saturating_sub(1) as f64;

    let mut jitter = || variance * noise.sample(rng);
    let mut ret = Vec::with_capacity(count.saturating_mul(2));
    for i in 0..count {
        let i = i as f64;
        ret.push(Segment::new(
            (dx + jitter(), dy + i + jitter()),
            (dx + far + jitter(), dy + i + jitter()),
        ));
        ret.push(Segment::new(
            (dx + i + jitter(), dy + jitter()),
            (dx + i + jitter(), dy + far + jitter()),
        ));
    }
    Ok(ret)
}

/// A spiral of `count` nested squares centered on the origin, four segments
/// each.
///
/// Square `k` is turned by `(k + 1) * PI / d_pi` and its corners are at
/// distance `radius * 1.04^k` from the origin, so every square crosses the
/// ones next to it.
pub fn cube(count: usize, d_pi: f64, radius: f64) -> Result<Vec<Segment>, Error> {
    if !(d_pi.is_finite() && d_pi != 0.0) {
        return Err(Error::InvalidParameter(format!(
            "d_pi must be finite and non-zero, not {d_pi}"
        )));
    }
    if !radius.is_finite() {
        return Err(Error::InvalidParameter(format!(
            "radius must be finite, not {radius}"
        )));
    }

    let d_angle = std::f64::consts::PI / d_pi;
    let mut radius = radius;
    let mut ret = Vec::with_capacity(count.saturating_mul(4));
    for k in 0..count {
        let angle = (k + 1) as f64 * d_angle;
        let (x, y) = (angle.cos() * radius, angle.sin() * radius);
        if !(x.is_finite() && y.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "square {k} of {count} is too big"
            )));
        }
        ret.push(Segment::new((x, y), (-y, x)));
        ret.push(Segment::new((-y, x), (-x, -y)));
        ret.push(Segment::new((-x, -y), (y, -x)));
        ret.push(Segment::new((y, -x), (x, y)));
        radius *= 1.04;
    }
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::format::{parse_result, read_segments};

    fn grid_text(grid: &Grid) -> String {
        let mut buf = Vec::new();
        grid.write(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn historical_constants() {
        let grid = Grid::new(1, 1);
        assert_eq!(
            grid.family_b,
            LineSet {
                x_min_bot: 1.5,
                x_min_top: -10.0,
                y_min: 0.0,
                y_max: 8.0,
                del_x: 6.0,
            }
        );
    }

    #[test]
    fn small_grid_text() {
        let text = grid_text(&Grid::new(2, 1));
        assert_eq!(text, "3\n0 0 5 8\n4.5 0 9.5 8\n6 0 -10 8\n");
    }

    #[test]
    fn empty_families() {
        let grid = Grid::new(0, 3);
        assert_eq!(grid.validate(), Ok(()));
        assert_eq!(grid.num_intersections(), 0);
        let segs = read_segments(grid_text(&grid).as_bytes()).unwrap();
        assert_eq!(segs, grid.family_b.segments(3).collect::<Vec<_>>());

        let grid = Grid::new(2, 0);
        let segs = read_segments(grid_text(&grid).as_bytes()).unwrap();
        assert_eq!(segs, LineSet::FAMILY_A.segments(2).collect::<Vec<_>>());

        assert_eq!(grid_text(&Grid::new(0, 0)), "0\n");
    }

    #[test]
    fn family_of() {
        let grid = Grid::new(2, 3);
        let families: Vec<_> = (0..6).map(|i| grid.family_of(i)).collect();
        assert_eq!(
            families,
            vec![
                Some(Family::A),
                Some(Family::A),
                Some(Family::B),
                Some(Family::B),
                Some(Family::B),
                None
            ]
        );
    }

    #[test]
    fn invalid_grids() {
        let a = LineSet::FAMILY_A;

        let parallel = Grid::with_line_sets(3, 3, a, LineSet { x_min_bot: 100.0, x_min_top: 105.0, ..a });
        assert_eq!(parallel.validate(), Err(InvalidGrid::Parallel));

        let stacked = Grid::with_line_sets(3, 3, LineSet { del_x: 0.0, ..a }, LineSet::family_b(3, 3));
        assert_eq!(stacked.validate(), Err(InvalidGrid::ZeroSpacing(Family::A)));
        // A single segment doesn't need any spacing.
        let single = Grid::with_line_sets(1, 3, LineSet { del_x: 0.0, ..a }, LineSet::family_b(1, 3));
        assert_eq!(single.validate(), Ok(()));

        let flat = Grid::with_line_sets(3, 3, a, LineSet { y_max: 0.0, ..LineSet::family_b(3, 3) });
        assert_eq!(flat.validate(), Err(InvalidGrid::EmptySpan(Family::B)));

        let shifted = Grid::with_line_sets(3, 3, a, LineSet { y_max: 9.0, ..LineSet::family_b(3, 3) });
        assert_eq!(shifted.validate(), Err(InvalidGrid::MismatchedSpans));

        let nan = Grid::with_line_sets(3, 3, LineSet { x_min_top: f64::NAN, ..a }, LineSet::family_b(3, 3));
        assert_eq!(nan.validate(), Err(InvalidGrid::NonFinite(Family::A)));

        // A spacing of 1 vanishes next to 1e17.
        let far = LineSet { x_min_bot: 1e17, x_min_top: 1e17 + 64.0, del_x: 1.0, ..a };
        assert_eq!(far.segment(0), far.segment(1));
        let coincident = Grid::with_line_sets(2, 1, far, LineSet::family_b(2, 1));
        assert_eq!(coincident.validate(), Err(InvalidGrid::ZeroSpacing(Family::A)));

        // So does a spacing of 1 at 2^53, the far end of a huge family.
        let unit = LineSet { del_x: 1.0, ..a };
        let long = Grid::with_line_sets((1usize << 53) + 2, 1, unit, LineSet::family_b(1, 1));
        assert_eq!(long.validate(), Err(InvalidGrid::ZeroSpacing(Family::A)));

        let overflowing = Grid::with_line_sets(10, 1, LineSet { del_x: f64::MAX, ..a }, LineSet::family_b(10, 1));
        assert_eq!(overflowing.validate(), Err(InvalidGrid::NonFinite(Family::A)));

        // The defaults for a 1x1 grid are too narrow for a bigger one.
        let narrow = Grid::with_line_sets(10, 1, a, LineSet::family_b(1, 1));
        assert_matches!(narrow.validate(), Err(InvalidGrid::MissedCrossing { .. }));
    }

    #[test]
    fn generate_refuses_invalid_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        let a = LineSet::FAMILY_A;
        let grid = Grid::with_line_sets(2, 2, a, a);
        assert_matches!(
            generate_grid(&path, &grid),
            Err(Error::InvalidGrid(InvalidGrid::Parallel))
        );
        assert!(!path.exists());
    }

    #[test]
    fn expected_result() {
        let grid = Grid::new(2, 2);
        let mut buf = Vec::new();
        grid.write_expected(&mut buf).unwrap();
        let result = parse_result(buf.as_slice()).unwrap();
        assert_eq!(result.segments, grid.segments().collect::<Vec<_>>());
        assert_eq!(result.intersections.len(), 4);

        // The first pair: (0, 0) -- (5, 8) against (6, 0) -- (-16, 8).
        let p = result.intersections[0];
        assert!((p.x - 10.0 / 9.0).abs() < 1e-12);
        assert!((p.y - 16.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn seeded_generators() {
        let mut rng = StdRng::seed_from_u64(17);
        let segs = random(50, 5.0, &mut rng).unwrap();
        assert_eq!(segs.len(), 50);
        assert!(segs
            .iter()
            .flat_map(|s| s.coords())
            .all(|x| (-5.0..5.0).contains(&x)));

        let mut rng1 = StdRng::seed_from_u64(3);
        let mut rng2 = StdRng::seed_from_u64(3);
        assert_eq!(
            sparse(4, 10.0, 5.0, &mut rng1).unwrap(),
            sparse(4, 10.0, 5.0, &mut rng2).unwrap()
        );
        assert_eq!(sparse(4, 10.0, 5.0, &mut rng1).unwrap().len(), 16);

        let segs = drunk_grid(5, 0.1, 10.0, 2.0, &mut rng).unwrap();
        assert_eq!(segs.len(), 10);

        let segs = slanted(3);
        assert_eq!(segs[2], Segment::new((-2.0, 2.0), (2.0, 3.0)));
    }

    #[test]
    fn cube_squares() {
        let segs = cube(3, 30.0, 4.0).unwrap();
        assert_eq!(segs.len(), 12);

        // Each side ends where the next begins, a quarter turn later.
        let first = &segs[..4];
        for (k, side) in first.iter().enumerate() {
            let next = first[(k + 1) % 4];
            assert_eq!(side.p1, next.p0);
            assert_eq!(next.p0, Point::new(-side.p0.y, side.p0.x));
        }

        let corner = segs[0].p0;
        let angle = std::f64::consts::PI / 30.0;
        assert!((corner.x - 4.0 * angle.cos()).abs() < 1e-12);
        assert!((corner.y - 4.0 * angle.sin()).abs() < 1e-12);

        let r0 = corner.x.hypot(corner.y);
        let r1 = segs[4].p0.x.hypot(segs[4].p0.y);
        assert!((r1 / r0 - 1.04).abs() < 1e-12);

        // Neighboring squares cross.
        let lines: Vec<_> = segs.iter().map(|s| s.to_kurbo()).collect();
        assert!(linegrid_util::count_crossings(&lines) > 0);
    }

    #[test]
    fn bad_generator_parameters() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_matches!(random(5, 0.0, &mut rng), Err(Error::InvalidParameter(_)));
        assert_matches!(random(5, f64::NAN, &mut rng), Err(Error::InvalidParameter(_)));
        assert_matches!(sparse(5, 0.0, -1.0, &mut rng), Err(Error::InvalidParameter(_)));
        assert_matches!(
            drunk_grid(5, 0.1, 0.0, f64::NAN, &mut rng),
            Err(Error::InvalidParameter(_))
        );
        assert_matches!(cube(5, 0.0, 4.0), Err(Error::InvalidParameter(_)));
        assert_matches!(cube(5, 30.0, f64::INFINITY), Err(Error::InvalidParameter(_)));
        assert_matches!(cube(100_000, 30.0, 4.0), Err(Error::InvalidParameter(_)));
    }

    proptest! {
        #[test]
        fn default_grids_are_valid(m in 0usize..10_000_000, n in 0usize..10_000_000) {
            prop_assert_eq!(Grid::new(m, n).validate(), Ok(()));
        }

        #[test]
        fn segment_count_and_order(m in 0usize..40, n in 0usize..40) {
            let grid = Grid::new(m, n);
            let text = grid_text(&grid);
            let count = (m + n).to_string();
            let mut lines = text.lines();
            prop_assert_eq!(lines.next(), Some(count.as_str()));
            prop_assert_eq!(lines.count(), m + n);

            let segs = read_segments(text.as_bytes()).unwrap();
            for (idx, seg) in segs.iter().enumerate() {
                let (set, i) = match grid.family_of(idx).unwrap() {
                    Family::A => (grid.family_a, idx),
                    Family::B => (grid.family_b, idx - m),
                };
                prop_assert_eq!(seg.p0.x, set.x_min_bot + i as f64 * set.del_x);
                prop_assert_eq!(seg.p0.y, set.y_min);
                prop_assert_eq!(seg.p1.x, set.x_min_top + i as f64 * set.del_x);
                prop_assert_eq!(seg.p1.y, set.y_max);
            }
        }

        #[test]
        fn custom_line_sets_round_trip(
            bot in -1e3..1e3f64,
            top in -1e3..1e3f64,
            del in 0.1..10.0f64,
            y_min in -100.0..0.0f64,
            height in 0.5..100.0f64,
            m in 0usize..20,
        ) {
            let set = LineSet { x_min_bot: bot, x_min_top: top, y_min, y_max: y_min + height, del_x: del };
            let other = LineSet { x_min_bot: -bot, del_x: -del, ..set };
            let grid = Grid::with_line_sets(m, 3, set, other);
            let segs = read_segments(grid_text(&grid).as_bytes()).unwrap();
            prop_assert_eq!(segs, grid.segments().collect::<Vec<_>>());
        }

        #[test]
        fn analytic_intersections_lie_on_both_segments(m in 1usize..30, n in 1usize..30) {
            let grid = Grid::new(m, n);
            for i in [0, m / 2, m - 1] {
                for j in [0, n / 2, n - 1] {
                    let p = grid.intersection(i, j);
                    let sa = grid.family_a.segment(i);
                    let sb = grid.family_b.segment(j);
                    prop_assert!(p.y > sa.min_y() && p.y < sa.max_y());
                    prop_assert!((sa.at_y(p.y) - p.x).abs() < 1e-9);
                    prop_assert!((sb.at_y(p.y) - p.x).abs() < 1e-9);
                }
            }
        }
    }
}
