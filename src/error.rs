use thiserror::Error;
use uuid::Uuid;

/// Which coordinate axis an input value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Easting,
    Northing,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Easting => write!(f, "X (Easting)"),
            Axis::Northing => write!(f, "Y (Northing)"),
        }
    }
}

/// Errors raised by input collection and the parcel collaborators.
///
/// The area engine and unit converter never fail; these only cover the layers
/// around them.
#[derive(Debug, Error, PartialEq)]
pub enum LandError {
    #[error("missing value for {0}")]
    MissingValue(Axis),

    #[error("invalid number for {axis}: {value:?}")]
    InvalidNumber { axis: Axis, value: String },

    #[error("expected a coordinate pair like \"670000,1500000\", got {0:?}")]
    InvalidPair(String),

    #[error("no coordinate with id {0}")]
    UnknownCoordinate(Uuid),

    #[error("row {row} does not exist (parcel has {len} points)")]
    RowOutOfRange { row: usize, len: usize },

    #[error("no row is being edited")]
    NotEditing,

    #[error("at least {needed} points are required, got {got}")]
    TooFewPoints { needed: usize, got: usize },

    #[error("nothing to export")]
    NothingToExport,

    #[error("invalid CSV at line {line}: {reason}")]
    InvalidCsv { line: usize, reason: String },

    #[error("unknown command {0:?} (type \"help\")")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}
