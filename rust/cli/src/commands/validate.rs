//! `validate`: check a data root without parsing anything.

use std::io::Write;
use std::path::PathBuf;

use phud_engine::history_dir::{history_dir, list_history_files, validate_history_root};

use super::{load_config, resolve_root};
use crate::error::CliError;

pub fn handle_validate_command(dir: Option<PathBuf>, out: &mut dyn Write) -> Result<(), CliError> {
    let cfg = load_config()?;
    let root = resolve_root(dir, &cfg)?;
    validate_history_root(&root)?;
    let files = list_history_files(&history_dir(&root))?;
    writeln!(
        out,
        "OK: '{}' is a Winamax data root with {} hand history files",
        root.display(),
        files.len()
    )?;
    Ok(())
}
