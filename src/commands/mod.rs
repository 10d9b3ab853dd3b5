//! Subcommand handlers. Each returns the process exit code.

pub mod check;
pub mod demo;
pub mod run;

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Args;

/// Where the program text comes from: inline code parts or a file.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Read the program from PATH instead of positional "<code>"
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Concatenated program code parts
    #[arg(value_name = "code", trailing_var_arg = true)]
    pub code: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("no program given")]
    Missing,

    #[error("cannot use positional code together with --file")]
    Conflict,

    #[error("failed to read program file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl SourceArgs {
    /// Resolve the program text. Code parts are joined without separators.
    pub fn load(&self) -> Result<String, SourceError> {
        match (&self.file, self.code.is_empty()) {
            (Some(_), false) => Err(SourceError::Conflict),
            (None, true) => Err(SourceError::Missing),
            (Some(path), true) => fs::read_to_string(path).map_err(|source| SourceError::Unreadable {
                path: path.display().to_string(),
                source,
            }),
            (None, false) => Ok(self.code.join("")),
        }
    }
}

/// Install the SIGINT (ctrl+c) handler: exit(0) immediately.
///
/// Program output is flushed byte by byte, so there is nothing to flush here.
/// Touching stdout would wait on a worker thread that may be mid-write.
pub fn install_interrupt_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| std::process::exit(0))
}
