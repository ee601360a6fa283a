//! Turning benchmark logs into CSV tables.
//!
//! A benchmark log has one line per benchmark run, with six
//! whitespace-separated fields:
//!
//! ```text
//! <label>/<m>/<n> <wall_time> <unit> <cpu_time> <unit> <num_iter>
//! ```
//!
//! The two unit fields are ignored. The benchmark name encodes the grid
//! dimensions `m` and `n`, from which we derive the number of segments and
//! intersections (see [`Grid`](crate::Grid)); those are never measured.
//!
//! The line shape is fixed: a line with any other number of fields, or a name
//! with any other number of `/`-separated parts, is an error.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use polars::prelude::*;

use crate::format::{Lines, ParseErrorKind};
use crate::Error;

/// One benchmark run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchRecord {
    /// The full benchmark name, including the grid dimensions.
    pub bm_name: String,
    /// Wall-clock time per iteration.
    pub wall_time: u64,
    /// CPU time per iteration.
    pub cpu_time: u64,
    /// How many iterations the benchmark ran.
    pub num_iter: u64,
    /// The size of the first segment family.
    pub m: u64,
    /// The size of the second segment family.
    pub n: u64,
    /// `m + n`.
    pub num_segments: u64,
    /// `m * n`.
    pub num_intersections: u64,
}

fn parse_u64(tok: &str) -> Result<u64, ParseErrorKind> {
    tok.parse()
        .map_err(|_| ParseErrorKind::Number(tok.to_owned()))
}

impl std::str::FromStr for BenchRecord {
    type Err = ParseErrorKind;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let &[bm_name, wall_time, _, cpu_time, _, num_iter] = tokens.as_slice() else {
            return Err(ParseErrorKind::TokenCount {
                expected: 6,
                found: tokens.len(),
            });
        };

        let parts: Vec<&str> = bm_name.split('/').collect();
        let &[_, m, n] = parts.as_slice() else {
            return Err(ParseErrorKind::BenchName(bm_name.to_owned()));
        };
        let m = parse_u64(m)?;
        let n = parse_u64(n)?;

        Ok(BenchRecord {
            bm_name: bm_name.to_owned(),
            wall_time: parse_u64(wall_time)?,
            cpu_time: parse_u64(cpu_time)?,
            num_iter: parse_u64(num_iter)?,
            m,
            n,
            num_segments: m.checked_add(n).ok_or(ParseErrorKind::Overflow)?,
            num_intersections: m.checked_mul(n).ok_or(ParseErrorKind::Overflow)?,
        })
    }
}

/// Parses a single log line.
pub fn parse_line(line: &str) -> Result<BenchRecord, ParseErrorKind> {
    line.parse()
}

/// Parses a whole benchmark log.
///
/// Every line must be a record, so the first line that doesn't parse (blank
/// lines included) fails the whole log.
pub fn parse_log<R: std::io::BufRead>(reader: R) -> Result<Vec<BenchRecord>, Error> {
    let mut lines = Lines::new(reader);
    let mut ret = Vec::new();
    while let Some(line) = lines.next_line()? {
        ret.push(parse_line(&line).map_err(|kind| lines.error(kind))?);
    }
    tracing::debug!(
        records = ret.len(),
        lines = lines.line_number(),
        "parsed benchmark log"
    );
    Ok(ret)
}

/// Collects benchmark records into a data frame, one row per record.
pub fn to_data_frame(records: &[BenchRecord]) -> PolarsResult<DataFrame> {
    let col = |f: fn(&BenchRecord) -> u64| records.iter().map(f).collect::<Vec<u64>>();
    df!(
        "bm_name" => records.iter().map(|r| r.bm_name.as_str()).collect::<Vec<_>>(),
        "wall_time" => col(|r| r.wall_time),
        "cpu_time" => col(|r| r.cpu_time),
        "num_iter" => col(|r| r.num_iter),
        "m" => col(|r| r.m),
        "n" => col(|r| r.n),
        "num_segments" => col(|r| r.num_segments),
        "num_intersections" => col(|r| r.num_intersections)
    )
}

/// Writes benchmark records as CSV, with a header row, ordered by the number
/// of segments.
///
/// Records with the same number of segments keep their relative order.
pub fn write_csv<W: Write>(records: &[BenchRecord], out: W) -> Result<(), Error> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.num_segments);

    let mut df = to_data_frame(&sorted)?;
    CsvWriter::new(out).include_header(true).finish(&mut df)?;
    Ok(())
}

/// Reads the benchmark log at `input` and writes it as CSV to `output`.
///
/// Returns the number of records written.
pub fn convert(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<usize, Error> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let records = parse_log(BufReader::new(File::open(input)?))?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        records = records.len(),
        "converting benchmark log"
    );

    let mut out = BufWriter::new(File::create(output)?);
    write_csv(&records, &mut out)?;
    out.flush()?;
    Ok(records.len())
}
