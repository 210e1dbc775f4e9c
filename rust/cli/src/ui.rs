//! Terminal output shared by the commands.

use std::io::Write;
use std::path::Path;

use phud_engine::errors::{FileFailure, ParseFault};

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// One warning per file that was not loaded or only partly parsed.
pub fn display_failures(err: &mut dyn Write, failures: &[FileFailure]) -> std::io::Result<()> {
    for failure in failures {
        display_warning(err, &failure.to_string())?;
    }
    Ok(())
}

/// Warns that `path` stopped parsing at `fault`; hands before it are kept.
pub fn display_fault(err: &mut dyn Write, path: &Path, fault: &ParseFault) -> std::io::Result<()> {
    display_warning(
        err,
        &format!("{}: {} (earlier hands kept)", path.display(), fault),
    )
}
