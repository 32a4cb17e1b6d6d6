//! A small byte-oriented backtracking regex engine with a scripting-language
//! style `RegExp` surface (construct/test/exec/match/match_all). See
//! `DESIGN.md` for the module-by-module grounding notes.

pub mod api;
pub mod ast;
pub mod charset;
pub mod compiler;
pub mod error;
pub mod flags;
pub mod lexer;
pub mod parser;
pub mod program;
pub mod support;
pub mod vm;

pub use api::{MatchResult, Matches, Regex};
pub use error::CompileError;
pub use flags::RegexFlags;
