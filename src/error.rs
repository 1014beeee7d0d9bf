use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("{hint} (usage: {usage})")]
    Usage { hint: &'static str, usage: &'static str },

    #[error("kill: '{0}' is not a valid process id")]
    InvalidPid(String),

    #[error("kill: PID {0} does not exist..?")]
    NoSuchProcess(i32),

    #[error("kill: refusing to terminate the terminal itself (PID {0})")]
    OwnProcess(i32),

    #[error("kill: failed to signal {pid}: {source}")]
    Signal { pid: i32, source: io::Error },

    #[error("cd: {}: {source}", .path.display())]
    ChangeDir { path: PathBuf, source: io::Error },

    #[error("An error has occurred, check your arguments: {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("cp: {} and {} are the same file", .from.display(), .to.display())]
    SameFile { from: PathBuf, to: PathBuf },

    #[error("cp: failed copying {} to {}: {source}", .from.display(), .to.display())]
    Copy { from: PathBuf, to: PathBuf, source: io::Error },

    #[error("Failed to open directory {}: {source}", .path.display())]
    ReadDir { path: PathBuf, source: io::Error },

    #[error("Error Status {code}\n{source}")]
    CurrentDir { code: i32, source: io::Error },

    #[error("Failed to install logger")]
    LoggerInit,
}
