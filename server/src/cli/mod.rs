use crate::cli_error::CliError;
use crate::setup;
use std::path::PathBuf;

pub mod file_io;
pub mod print_schedule;

/// Use the snapshot file given on the command line or, if missing, the one configured via the
/// SLOTPLAN_DATA_FILE environment variable.
pub fn resolve_data_file(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match path {
        Some(path) => Ok(path),
        None => Ok(setup::get_data_file_from_env()?),
    }
}
