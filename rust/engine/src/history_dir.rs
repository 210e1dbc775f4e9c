//! Layout of a Winamax data root.
//!
//! A root looks like
//!
//! ```text
//! <root>/history/20141116_..._real_holdem_no-limit.txt
//! <root>/history/20141116_..._summary.txt
//! <root>/history/..._winamax_positioning_file.dat
//! <root>/data/buddy/
//! <root>/data/players/
//! ```
//!
//! Only `history` is read for content; the rest only proves the directory is
//! a real vendor root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::RootError;

pub const HISTORY_DIR: &str = "history";
const POSITIONING_FILE_SUFFIX: &str = "winamax_positioning_file.dat";
const SUMMARY_SUFFIX: &str = "_summary.txt";

pub fn history_dir(root: &Path) -> PathBuf {
    root.join(HISTORY_DIR)
}

/// Checks that `root` looks like a vendor data root. The first failing check
/// is reported.
pub fn validate_history_root(root: &Path) -> Result<(), RootError> {
    let history = history_dir(root);
    let err_root = || root.to_path_buf();
    if !history.is_dir() {
        return Err(RootError::MissingHistoryDir(err_root()));
    }
    if !root.join("data").join("buddy").is_dir() {
        return Err(RootError::MissingBuddyDir(err_root()));
    }
    if !root.join("data").join("players").is_dir() {
        return Err(RootError::MissingPlayersDir(err_root()));
    }

    let entries: Vec<PathBuf> = fs::read_dir(&history)
        .map_err(|_| RootError::MissingHistoryDir(err_root()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .collect();
    if entries.iter().any(|p| p.is_dir()) {
        return Err(RootError::NestedHistoryDir(err_root()));
    }
    if entries.is_empty() {
        return Err(RootError::EmptyHistoryDir(err_root()));
    }
    let has_file_ending = |suffix: &str| {
        entries
            .iter()
            .any(|p| p.to_string_lossy().ends_with(suffix))
    };
    if !has_file_ending(POSITIONING_FILE_SUFFIX) {
        return Err(RootError::MissingPositioningFile(err_root()));
    }
    if !has_file_ending(SUMMARY_SUFFIX) {
        return Err(RootError::MissingSummaryFile(err_root()));
    }
    Ok(())
}

pub fn is_valid_history_root(root: &Path) -> bool {
    validate_history_root(root).is_ok()
}

/// A regular `.txt` file that is not a tournament summary.
pub fn is_valid_history_file(path: &Path) -> bool {
    path.is_file()
        && path.extension().is_some_and(|e| e == "txt")
        && !path.to_string_lossy().ends_with(SUMMARY_SUFFIX)
}

/// `yyyymmdd_*.txt`, summaries excluded.
fn is_candidate_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() > 9
        && bytes[..8].iter().all(u8::is_ascii_digit)
        && bytes[8] == b'_'
        && name.ends_with(".txt")
        && !name.ends_with(SUMMARY_SUFFIX)
}

/// Candidate hand history files in `history`, sorted by file name.
pub fn list_history_files(history: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(history)? {
        let entry = entry?;
        let name = entry.file_name();
        if entry.file_type()?.is_file() && is_candidate_name(&name.to_string_lossy()) {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// `"Frankfurt 11 / NL Holdem"` gives `"Frankfurt 11"`; a `#` cuts first.
pub fn table_name_from_window_title(title: &str) -> &str {
    match title.find('#') {
        Some(pos) => &title[..pos],
        None => &title[..title.find(" / ").unwrap_or(title.len())],
    }
}

/// Latest history file of the table shown in a client window title, if any.
pub fn history_file_for_window_title(root: &Path, title: &str) -> Option<PathBuf> {
    let table = table_name_from_window_title(title);
    let reality = if title.ends_with("fictif") { "play" } else { "real" };
    let game = if title.contains("NL Holdem") {
        "holdem_no-limit"
    } else {
        "omaha5_pot-limit"
    };
    let postfix = format!("_{table}_{reality}_{game}.txt");
    fs::read_dir(history_dir(root))
        .ok()?
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy())
                .is_some_and(|n| n.starts_with("20") && n.ends_with(&postfix))
        })
        .max()
}
