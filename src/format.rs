//! Reading and writing the plain-text segment formats.
//!
//! A *grid file* is a count line followed by that many `x0 y0 x1 y1` lines.
//! A *result file* is a grid file followed by a second count line and that
//! many `x y` lines, one per reported intersection point. All numbers are
//! whitespace-separated decimals.
//!
//! Numbers are written with `f64`'s `Display` impl, which produces the
//! shortest string that parses back to the same value, so reading what we
//! wrote gives back exactly the same coordinates.

use std::io::{BufRead, Write};

use crate::{Error, Point, Segment};

/// A malformed line in one of our input formats.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    /// The 1-based line number of the offending line.
    ///
    /// For [`ParseErrorKind::UnexpectedEof`], this is the number of the line
    /// that was missing.
    pub line: usize,
    /// What was wrong with it.
    pub kind: ParseErrorKind,
}

/// The different ways an input line can be malformed.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseErrorKind {
    /// The line had the wrong number of whitespace-separated tokens.
    TokenCount {
        /// How many tokens the line should have had.
        expected: usize,
        /// How many it actually had.
        found: usize,
    },
    /// A token that should have been a number wasn't.
    Number(String),
    /// A coordinate was infinite or NaN.
    NonFinite(String),
    /// A token that should have been a non-negative integer wasn't.
    Count(String),
    /// The input ended before all the declared lines were read.
    UnexpectedEof {
        /// A description of the line we were looking for.
        expected: &'static str,
    },
    /// There was non-blank input after the last section.
    TrailingData,
    /// A benchmark name didn't have the form `<label>/<m>/<n>`.
    BenchName(String),
    /// A derived count didn't fit in 64 bits.
    Overflow,
    /// The line wasn't valid UTF-8.
    InvalidUtf8,
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorKind::TokenCount { expected, found } => {
                write!(f, "expected {expected} tokens, found {found}")
            }
            ParseErrorKind::Number(tok) => write!(f, "`{tok}` is not a number"),
            ParseErrorKind::NonFinite(tok) => write!(f, "`{tok}` is not finite"),
            ParseErrorKind::Count(tok) => write!(f, "`{tok}` is not a valid count"),
            ParseErrorKind::UnexpectedEof { expected } => {
                write!(f, "unexpected end of input, expected {expected}")
            }
            ParseErrorKind::TrailingData => write!(f, "unexpected data after the last section"),
            ParseErrorKind::BenchName(name) => {
                write!(f, "benchmark name `{name}` is not of the form <label>/<m>/<n>")
            }
            ParseErrorKind::Overflow => write!(f, "derived count overflows"),
            ParseErrorKind::InvalidUtf8 => write!(f, "line is not valid UTF-8"),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for ParseError {}

/// The parsed contents of a result file, in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultFile {
    /// The input segments.
    pub segments: Vec<Segment>,
    /// The intersection points reported by whatever produced the file.
    pub intersections: Vec<Point>,
}

pub(crate) fn parse_float(tok: &str) -> Result<f64, ParseErrorKind> {
    let x: f64 = tok
        .parse()
        .map_err(|_| ParseErrorKind::Number(tok.to_owned()))?;
    if x.is_finite() {
        Ok(x)
    } else {
        Err(ParseErrorKind::NonFinite(tok.to_owned()))
    }
}

fn parse_numbers<const N: usize>(line: &str) -> Result<[f64; N], ParseErrorKind> {
    let found = line.split_whitespace().count();
    if found != N {
        return Err(ParseErrorKind::TokenCount { expected: N, found });
    }

    let mut ret = [0.0; N];
    for (x, tok) in ret.iter_mut().zip(line.split_whitespace()) {
        *x = parse_float(tok)?;
    }
    Ok(ret)
}

fn parse_count(line: &str) -> Result<usize, ParseErrorKind> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(tok), None) => tok
            .parse()
            .map_err(|_| ParseErrorKind::Count(tok.to_owned())),
        _ => Err(ParseErrorKind::TokenCount {
            expected: 1,
            found: line.split_whitespace().count(),
        }),
    }
}

/// A line iterator that remembers where it is, for error messages.
pub(crate) struct Lines<R> {
    inner: std::io::Lines<R>,
    line: usize,
}

impl<R: BufRead> Lines<R> {
    pub(crate) fn new(reader: R) -> Self {
        Lines {
            inner: reader.lines(),
            line: 0,
        }
    }

    pub(crate) fn line_number(&self) -> usize {
        self.line
    }

    /// Returns the next line, or `None` at the end of the input.
    ///
    /// Invalid UTF-8 (`InvalidData` from `io::Lines`) is a parse error.
    pub(crate) fn next_line(&mut self) -> Result<Option<String>, Error> {
        let Some(line) = self.inner.next() else {
            return Ok(None);
        };
        self.line += 1;
        match line {
            Ok(line) => Ok(Some(line)),
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                Err(self.error(ParseErrorKind::InvalidUtf8))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn expect_line(&mut self, expected: &'static str) -> Result<String, Error> {
        self.next_line()?.ok_or_else(|| {
            ParseError {
                line: self.line + 1,
                kind: ParseErrorKind::UnexpectedEof { expected },
            }
            .into()
        })
    }

    pub(crate) fn error(&self, kind: ParseErrorKind) -> Error {
        ParseError {
            line: self.line,
            kind,
        }
        .into()
    }

    fn count(&mut self, expected: &'static str) -> Result<usize, Error> {
        let line = self.expect_line(expected)?;
        parse_count(&line).map_err(|kind| self.error(kind))
    }

    fn numbers<const N: usize>(&mut self, expected: &'static str) -> Result<[f64; N], Error> {
        let line = self.expect_line(expected)?;
        parse_numbers(&line).map_err(|kind| self.error(kind))
    }

    /// Checks that everything left in the input is blank.
    fn finish(mut self) -> Result<(), Error> {
        while let Some(line) = self.next_line()? {
            if !line.trim().is_empty() {
                return Err(self.error(ParseErrorKind::TrailingData));
            }
        }
        Ok(())
    }
}

/// A streaming reader for the segment section of a grid or result file.
///
/// The count line is read on construction; after that, this iterates over
/// exactly that many segments. Iteration stops after the first error.
pub struct GridReader<R> {
    lines: Lines<R>,
    len: usize,
    remaining: usize,
}

impl<R: BufRead> GridReader<R> {
    /// Starts reading a segment section, consuming its count line.
    pub fn new(reader: R) -> Result<Self, Error> {
        let mut lines = Lines::new(reader);
        let len = lines.count("segment count")?;
        Ok(GridReader {
            lines,
            len,
            remaining: len,
        })
    }

    /// The number of segments declared by the count line.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Was the declared segment count zero?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<R: BufRead> Iterator for GridReader<R> {
    type Item = Result<Segment, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let seg = self
            .lines
            .numbers::<4>("segment")
            .map(|[x0, y0, x1, y1]| Segment::new((x0, y0), (x1, y1)));
        if seg.is_err() {
            self.remaining = 0;
        }
        Some(seg)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Reads the segment section of a grid or result file.
///
/// Anything after the segment section is ignored.
pub fn read_segments<R: BufRead>(reader: R) -> Result<Vec<Segment>, Error> {
    GridReader::new(reader)?.collect()
}

/// Reads a complete result file: segments, then intersection points.
pub fn parse_result<R: BufRead>(reader: R) -> Result<ResultFile, Error> {
    let mut grid = GridReader::new(reader)?;
    let segments = grid.by_ref().collect::<Result<Vec<_>, _>>()?;

    let mut lines = grid.lines;
    let count = lines.count("intersection count")?;
    let mut intersections = Vec::new();
    for _ in 0..count {
        let [x, y] = lines.numbers::<2>("intersection")?;
        intersections.push(Point::new(x, y));
    }
    lines.finish()?;

    Ok(ResultFile {
        segments,
        intersections,
    })
}

/// Writes a segment section: the count line, then one line per segment.
///
/// `count` must be the number of segments that `segments` yields. The output
/// is not buffered, so pass a `BufWriter` when writing to a file.
pub fn write_segments<W: Write>(
    mut out: W,
    count: usize,
    segments: impl IntoIterator<Item = Segment>,
) -> Result<(), Error> {
    writeln!(out, "{count}")?;
    let mut written = 0;
    for s in segments {
        writeln!(out, "{} {} {} {}", s.p0.x, s.p0.y, s.p1.x, s.p1.y)?;
        written += 1;
    }
    debug_assert_eq!(written, count);
    Ok(())
}

/// Writes an intersection section: the count line, then one line per point.
pub fn write_intersections<W: Write>(
    mut out: W,
    count: usize,
    points: impl IntoIterator<Item = Point>,
) -> Result<(), Error> {
    writeln!(out, "{count}")?;
    let mut written = 0;
    for p in points {
        writeln!(out, "{} {}", p.x, p.y)?;
        written += 1;
    }
    debug_assert_eq!(written, count);
    Ok(())
}

/// Writes a complete result file.
pub fn write_result<W: Write>(mut out: W, result: &ResultFile) -> Result<(), Error> {
    write_segments(
        &mut out,
        result.segments.len(),
        result.segments.iter().copied(),
    )?;
    write_intersections(
        &mut out,
        result.intersections.len(),
        result.intersections.iter().copied(),
    )?;
    Ok(())
}
