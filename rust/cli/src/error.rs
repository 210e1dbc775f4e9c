//! Error types for the CLI application.

use std::fmt;

use phud_engine::errors::{FileFailure, LoadError, RootError};

/// Everything a command can fail with. Every variant maps to exit code 2.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// The engine rejected the root or a file
    Engine(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::Io(std::io::Error::other(error))
    }
}

impl From<LoadError> for CliError {
    fn from(error: LoadError) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<RootError> for CliError {
    fn from(error: RootError) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<FileFailure> for CliError {
    fn from(error: FileFailure) -> Self {
        CliError::Engine(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn root_errors_keep_their_message() {
        let err: CliError = RootError::MissingBuddyDir(PathBuf::from("/tmp/wmx")).into();
        assert_eq!(
            err.to_string(),
            "Engine error: the chosen directory '/tmp/wmx' should contain a 'data/buddy' directory"
        );
    }

    #[test]
    fn io_errors_expose_their_source() {
        use std::error::Error;
        let err = CliError::from(std::io::Error::other("disk"));
        assert!(err.source().is_some());
        assert!(CliError::InvalidInput("x".into()).source().is_none());
    }
}
