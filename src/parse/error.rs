use std::{
    io::Error as IoError,
    num::{ParseFloatError, ParseIntError},
};

/// `Result<_, ParseError>`
pub type ParseResult<T> = Result<T, ParseError>;

/// Anything that could go wrong while parsing a [`Beatmap`](crate::Beatmap).
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Some IO operation failed.
    #[error("failed to read the chart")]
    Io(#[from] IoError),
    /// The initial data of an `.osu` file was incorrect.
    #[error("expected `osu file format v` at file begin")]
    IncorrectFileHeader,
    /// The format version after the header could not be parsed.
    #[error("failed to parse the format version")]
    InvalidVersion,
}

/// Failure to parse a single line.
///
/// These never abort the whole parse; the line is logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum ParseBeatmapError {
    #[error("failed to parse integer")]
    Int(#[from] ParseIntError),
    #[error("failed to parse float")]
    Float(#[from] ParseFloatError),
    #[error("expected `0` or `1`")]
    Bool,
    #[error("invalid sample bank")]
    SampleBank,
    #[error("invalid event line")]
    InvalidEventLine,
    #[error("invalid hit object line")]
    InvalidHitObjectLine,
    #[error("invalid timing point line")]
    InvalidTimingPointLine,
    #[error("invalid curve type")]
    InvalidCurveType,
    #[error("color specified in incorrect format (should be R,G,B or R,G,B,A)")]
    InvalidColour,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("repeat count is way too high")]
    InvalidRepeatCount,
    #[error("value must be finite")]
    NonFinite,
    #[error("unknown hit object type")]
    UnknownHitObjectType,
    #[error("expected `key: value` pair")]
    BadKeyValue,
}
