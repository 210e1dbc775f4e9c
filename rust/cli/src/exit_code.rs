//! Process exit codes of `phud`.

use crate::error::CliError;

pub const SUCCESS: i32 = 0;

/// Any failure: usage, configuration, invalid root or I/O.
pub const ERROR: i32 = 2;

pub fn of(result: &Result<(), CliError>) -> i32 {
    match result {
        Ok(()) => SUCCESS,
        Err(_) => ERROR,
    }
}
