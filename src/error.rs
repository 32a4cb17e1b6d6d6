//! Crate-wide error types, implemented with a manual `Display` +
//! `std::error::Error` pair rather than a derive-macro crate such as
//! `thiserror`.

use std::error::Error;
use std::fmt;

/// A malformed pattern, surfaced at `Regex::new` time rather than silently
/// compiled into a never-matching program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub message: String,
    pub position: usize,
}

impl CompileError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.position)
    }
}

impl Error for CompileError {}
