#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;
pub mod bench_log;
pub mod format;
mod geom;
pub mod generators;
pub mod plot;
pub mod verify;

pub use format::{ParseError, ParseErrorKind, ResultFile};
pub use generators::{generate_grid, Family, Grid, InvalidGrid, LineSet};
pub use geom::{Point, Segment};

/// Something went wrong while generating, reading, or converting a file.
#[derive(Debug)]
pub enum Error {
    /// Reading or writing failed.
    Io(std::io::Error),
    /// An input file was malformed.
    Parse(ParseError),
    /// The grid parameters don't produce the promised crossing structure.
    InvalidGrid(InvalidGrid),
    /// A generator parameter was out of range.
    InvalidParameter(String),
    /// Building or writing a data frame failed.
    Frame(polars::error::PolarsError),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<InvalidGrid> for Error {
    fn from(e: InvalidGrid) -> Self {
        Error::InvalidGrid(e)
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(e: polars::error::PolarsError) -> Self {
        Error::Frame(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "i/o error: {e}"),
            Error::Parse(e) => write!(f, "{e}"),
            Error::InvalidGrid(e) => write!(f, "invalid grid: {e}"),
            Error::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Error::Frame(e) => write!(f, "data frame error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Parse(e) => Some(e),
            Error::InvalidGrid(e) => Some(e),
            Error::InvalidParameter(_) => None,
            Error::Frame(e) => Some(e),
        }
    }
}
