use std::path::PathBuf;

use thiserror::Error;

/// Which part of the transcript grammar rejected a line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum FaultKind {
    /// Header line lacks the site prefix, the `UTC` suffix or the hand id.
    #[error("missing header token")]
    MissingHeaderToken,
    /// Header timestamp is not `YYYY/MM/DD HH:MM:SS`.
    #[error("bad timestamp")]
    BadTimestamp,
    /// No `Table: '...'` line right after the header, or it lacks a token.
    #[error("missing table line")]
    MissingTableLine,
    /// A seat number outside 1..=10, or above the table size.
    #[error("bad seat")]
    BadSeat,
    /// Input ended before any `collected` line closed the hand.
    #[error("unterminated street")]
    UnterminatedStreet,
    /// Input ended where a mandatory line was expected.
    #[error("unexpected end of file")]
    UnexpectedEof,
    /// The assembled hand broke an entity invariant.
    #[error("invalid hand")]
    InvalidHand,
}

/// A mandatory grammar stage failed on a given line.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("{kind} at line {line_number}: '{line}'")]
pub struct ParseFault {
    pub kind: FaultKind,
    /// 1-based line number, 0 when the input was already exhausted.
    pub line_number: usize,
    pub line: String,
}

impl ParseFault {
    pub fn new(kind: FaultKind, line_number: usize, line: impl Into<String>) -> Self {
        Self {
            kind,
            line_number,
            line: line.into(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntityError {
    #[error("{entity} has an empty {field}")]
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },
    #[error("ante is negative: {0}")]
    NegativeAnte(i64),
    #[error("bet amount is negative or not finite")]
    InvalidAmount,
    #[error("an action cannot be on street 'none'")]
    NoStreet,
    #[error("a hand needs between 2 and 10 seated players, got {0}")]
    SeatCount(usize),
    #[error("cannot merge site '{other}' into site '{ours}'")]
    SiteMismatch { ours: String, other: String },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("player '{0}' was never registered")]
    UnknownPlayer(String),
}

/// Why a directory is not a usable hand history root.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RootError {
    #[error("the chosen directory '{0}' should contain a 'history' directory")]
    MissingHistoryDir(PathBuf),
    #[error("the chosen directory '{0}' should contain a 'data/buddy' directory")]
    MissingBuddyDir(PathBuf),
    #[error("the chosen directory '{0}' should contain a 'data/players' directory")]
    MissingPlayersDir(PathBuf),
    #[error("the chosen directory '{0}' should contain a 'history' directory that contains only files")]
    NestedHistoryDir(PathBuf),
    #[error("the chosen directory '{0}' should contain a non empty 'history' directory")]
    EmptyHistoryDir(PathBuf),
    #[error("the chosen directory '{0}' has no '*winamax_positioning_file.dat' in 'history'")]
    MissingPositioningFile(PathBuf),
    #[error("the chosen directory '{0}' has no '*_summary.txt' file in 'history'")]
    MissingSummaryFile(PathBuf),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Root(#[from] RootError),
    #[error("cannot list '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A per-file problem reported by the loader. Never aborts a batch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}: {reason}", path.display())]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

impl FileFailure {
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fault_names_the_offending_line() {
        let fault = ParseFault::new(FaultKind::MissingTableLine, 2, "Seat 1: Hero (2€)");
        assert_eq!(
            fault.to_string(),
            "missing table line at line 2: 'Seat 1: Hero (2€)'"
        );
    }

    #[test]
    fn fault_kinds_read_as_plain_words() {
        assert_eq!(FaultKind::UnexpectedEof.to_string(), "unexpected end of file");
        assert_eq!(FaultKind::MissingHeaderToken.to_string(), "missing header token");
    }

    #[test]
    fn file_failure_display_has_path_and_reason() {
        let f = FileFailure::new("history/a.txt", "permission denied");
        assert_eq!(f.to_string(), "history/a.txt: permission denied");
    }
}
