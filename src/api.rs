//! Surface API: `construct`/`test`/`exec`/`match`/`match_all`, modeled on
//! the conventional scripting-language RegExp/String surface. `Regex::new`
//! uses the same manual-error-type idiom as the rest of the crate rather
//! than silently compiling a never-matching program.

use crate::compiler;
use crate::error::CompileError;
use crate::flags::RegexFlags;
use crate::parser;
use crate::program::Program;
use crate::vm::{self, Limits};

/// A compiled pattern plus the mutable cursor state the `g` flag needs.
#[derive(Debug)]
pub struct Regex {
    program: Program,
    last_index: usize,
    limits: Limits,
}

/// One successful match: the full-match span, and a group-indexed list of
/// optional capture spans (`groups[0]` is capture 1, matching the
/// surface's own 1-based numbering).
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub index: usize,
    full: (usize, usize),
    groups: Vec<Option<(usize, usize)>>,
}

impl MatchResult {
    fn from_outcome(outcome: vm::MatchOutcome, program: &Program) -> Self {
        let groups = (1..program.group_count())
            .map(|g| outcome.captures.get(g))
            .collect();
        Self {
            index: outcome.start,
            full: (outcome.start, outcome.end),
            groups,
        }
    }

    pub fn full_match<'t>(&self, text: &'t [u8]) -> &'t [u8] {
        &text[self.full.0..self.full.1]
    }

    /// `group(0, text)` also returns the full match, matching the
    /// conventional "group zero is the whole match" convention.
    pub fn group<'t>(&self, n: usize, text: &'t [u8]) -> Option<&'t [u8]> {
        if n == 0 {
            return Some(self.full_match(text));
        }
        let (s, e) = (*self.groups.get(n - 1)?)?;
        Some(&text[s..e])
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl Regex {
    /// Compiles `pattern` with the given flag string (subset of `g`, `i`,
    /// `m`, `s`; unknown characters ignored). Returns a construction error
    /// rather than silently compiling a never-matching program.
    pub fn new(pattern: &str, flags: &str) -> Result<Self, CompileError> {
        let ast = parser::parse(pattern.as_bytes())?;
        let group_count = ast.max_group_index() + 1;
        let program = compiler::compile(&ast, group_count, RegexFlags::parse(flags));
        Ok(Self {
            program,
            last_index: 0,
            limits: Limits::default(),
        })
    }

    /// Overrides the default instruction/choice-point ceilings.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn last_index(&self) -> usize {
        self.last_index
    }

    pub fn is_global(&self) -> bool {
        self.program.flags().global()
    }

    /// `true` iff a match exists at or after `last_index` (when `g`) or
    /// anywhere in `text` (otherwise). Updates `last_index` only when `g`
    /// is set.
    pub fn test(&mut self, text: &[u8]) -> bool {
        self.exec(text).is_some()
    }

    /// Runs one search. On `g`, resumes from `last_index`, advances it past
    /// a successful match, and resets it to 0 on failure. A zero-length
    /// match still advances the cursor by one byte so a global loop over
    /// `match_all` cannot stall — the standard scripting-engine behavior
    /// for this case.
    pub fn exec(&mut self, text: &[u8]) -> Option<MatchResult> {
        let global = self.program.flags().global();
        let start_from = if global { self.last_index } else { 0 };

        if start_from > text.len() {
            if global {
                self.last_index = 0;
            }
            return None;
        }

        match vm::search(&self.program, text, start_from, &self.limits) {
            Some(outcome) => {
                if global {
                    self.last_index = if outcome.end > outcome.start {
                        outcome.end
                    } else {
                        outcome.end + 1
                    };
                }
                Some(MatchResult::from_outcome(outcome, &self.program))
            }
            None => {
                if global {
                    self.last_index = 0;
                }
                None
            }
        }
    }

    /// Runs one `exec` with `last_index` temporarily reset to 0 unless `g`
    /// is set.
    pub fn match_(&mut self, text: &[u8]) -> Option<MatchResult> {
        if self.program.flags().global() {
            return self.exec(text);
        }
        let saved = self.last_index;
        self.last_index = 0;
        let result = self.exec(text);
        self.last_index = saved;
        result
    }

    /// Lazily enumerates every match. Requires the `g` flag; returns `None`
    /// otherwise.
    pub fn match_all<'a>(&'a mut self, text: &'a [u8]) -> Option<Matches<'a>> {
        if !self.program.flags().global() {
            return None;
        }
        Some(Matches { regex: self, text })
    }
}

/// Lazy iterator returned by `Regex::match_all`. Each call to `next`
/// invokes `exec`; the iterator ends when `exec` returns `None`.
pub struct Matches<'a> {
    regex: &'a mut Regex,
    text: &'a [u8],
}

impl<'a> Iterator for Matches<'a> {
    type Item = MatchResult;

    fn next(&mut self) -> Option<MatchResult> {
        self.regex.exec(self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_exec_agree() {
        let mut re = Regex::new("h.llo", "").unwrap();
        assert!(re.test(b"say hello"));
        assert!(Regex::new("h.llo", "").unwrap().exec(b"say hello").is_some());
        assert!(!Regex::new("h.llo", "").unwrap().test(b"hllo"));
    }

    #[test]
    fn full_match_slices_the_original_text() {
        let mut re = Regex::new("h.llo", "").unwrap();
        let m = re.exec(b"say hello there").unwrap();
        assert_eq!(m.full_match(b"say hello there"), b"hello");
    }

    #[test]
    fn named_group_captures() {
        let mut re = Regex::new(r"(\w+)\s+(\w+)", "").unwrap();
        let text = b"hello world";
        let m = re.exec(text).unwrap();
        assert_eq!(m.index, 0);
        assert_eq!(m.group(0, text), Some(&b"hello world"[..]));
        assert_eq!(m.group(1, text), Some(&b"hello"[..]));
        assert_eq!(m.group(2, text), Some(&b"world"[..]));
    }

    #[test]
    fn global_exec_advances_through_successive_matches_then_wraps() {
        let mut re = Regex::new(r"\w+", "g").unwrap();
        let text = b"hello world test";
        let a = re.exec(text).unwrap();
        let b = re.exec(text).unwrap();
        let c = re.exec(text).unwrap();
        assert_eq!((a.index, a.full_match(text)), (0, &b"hello"[..]));
        assert_eq!((b.index, b.full_match(text)), (6, &b"world"[..]));
        assert_eq!((c.index, c.full_match(text)), (12, &b"test"[..]));
        assert!(re.exec(text).is_none());
        let wrapped = re.exec(text).unwrap();
        assert_eq!(wrapped.index, 0);
    }

    #[test]
    fn match_all_requires_global_flag() {
        assert!(Regex::new("a", "").unwrap().match_all(b"aaa").is_none());
        let mut re = Regex::new("a", "g").unwrap();
        let count = re.match_all(b"aaa").unwrap().count();
        assert_eq!(count, 3);
    }

    #[test]
    fn malformed_pattern_returns_construction_error() {
        assert!(Regex::new("(a", "").is_err());
        assert!(Regex::new("a)", "").is_err());
    }

    #[test]
    fn match_without_global_ignores_prior_cursor_state() {
        let mut re = Regex::new("a", "").unwrap();
        re.test(b"zzza");
        let m = re.match_(b"azzz").unwrap();
        assert_eq!(m.index, 0);
    }
}
