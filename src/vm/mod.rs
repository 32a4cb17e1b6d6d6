//! The backtracking executor: instruction dispatch, the explicit
//! choice-point stack, and the two resource ceilings that stand in for a
//! cancellation token.

use crate::charset::{flip_ascii_case, is_word_byte};
use crate::compiler::Instruction;
use crate::program::Program;
use crate::support::IntStack;

pub const DEFAULT_MAX_INSTRUCTIONS: u64 = 100_000;
pub const DEFAULT_MAX_CHOICE_POINTS: u64 = 10_000;

/// The two ceilings that bound a single match attempt. Exceeding either one
/// degrades to "no match" for the current start candidate — there is no
/// error variant for this.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_instructions: u64,
    pub max_choice_points: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_instructions: DEFAULT_MAX_INSTRUCTIONS,
            max_choice_points: DEFAULT_MAX_CHOICE_POINTS,
        }
    }
}

/// Two parallel start/end arrays, `-1` meaning unset.
#[derive(Debug, Clone)]
pub struct Captures {
    starts: Vec<i64>,
    ends: Vec<i64>,
}

impl Captures {
    fn new(group_count: u32) -> Self {
        let n = group_count as usize;
        Self {
            starts: vec![-1; n],
            ends: vec![-1; n],
        }
    }

    pub fn group_count(&self) -> u32 {
        self.starts.len() as u32
    }

    /// `Some((start, end))` if both bounds are set, `None` otherwise.
    pub fn get(&self, group: u32) -> Option<(usize, usize)> {
        let i = group as usize;
        let (s, e) = (*self.starts.get(i)?, *self.ends.get(i)?);
        if s >= 0 && e >= 0 {
            Some((s as usize, e as usize))
        } else {
            None
        }
    }
}

struct ChoicePoint {
    pc: usize,
    pos: usize,
    aux: IntStack,
    captures: Captures,
    last_op_succeeded: bool,
}

pub struct MatchOutcome {
    pub start: usize,
    pub end: usize,
    pub captures: Captures,
}

/// Runs the program against `text`, anchored at exactly `start`. Returns
/// `None` on mismatch or on hitting either resource ceiling.
fn run_from(program: &Program, text: &[u8], start: usize, limits: &Limits) -> Option<MatchOutcome> {
    let instrs = program.instructions();
    let ignore_case = program.flags().ignore_case();
    let multiline = program.flags().multiline();
    let dot_all = program.flags().dot_all();

    let mut pc = 0usize;
    let mut pos = start;
    let mut captures = Captures::new(program.group_count());
    let mut aux = IntStack::new();
    let mut choice_stack: Vec<ChoicePoint> = vec![];
    let mut last_op_succeeded = true;

    let mut instructions_executed: u64 = 0;
    let mut choice_points_popped: u64 = 0;

    macro_rules! backtrack {
        () => {{
            match choice_stack.pop() {
                None => return None,
                Some(cp) => {
                    choice_points_popped += 1;
                    if choice_points_popped > limits.max_choice_points {
                        return None;
                    }
                    pc = cp.pc;
                    pos = cp.pos;
                    aux = cp.aux;
                    captures = cp.captures;
                    last_op_succeeded = cp.last_op_succeeded;
                    continue;
                }
            }
        }};
    }

    loop {
        instructions_executed += 1;
        if instructions_executed > limits.max_instructions {
            return None;
        }

        match &instrs[pc] {
            Instruction::Char(expected) => {
                if pos < text.len() && char_matches(text[pos], *expected, ignore_case) {
                    pos += 1;
                    pc += 1;
                    last_op_succeeded = true;
                } else {
                    backtrack!();
                }
            }
            Instruction::Dot => {
                if pos < text.len() && (text[pos] != b'\n' || dot_all) {
                    pos += 1;
                    pc += 1;
                    last_op_succeeded = true;
                } else {
                    backtrack!();
                }
            }
            Instruction::Charset(set) => {
                if pos < text.len() && set.matches(text[pos], ignore_case) {
                    pos += 1;
                    pc += 1;
                    last_op_succeeded = true;
                } else {
                    backtrack!();
                }
            }
            Instruction::AnchorStart => {
                let at_start = pos == 0 || (multiline && text[pos - 1] == b'\n');
                if at_start {
                    pc += 1;
                } else {
                    backtrack!();
                }
            }
            Instruction::AnchorEnd => {
                let at_end = pos == text.len() || (multiline && text[pos] == b'\n');
                if at_end {
                    pc += 1;
                } else {
                    backtrack!();
                }
            }
            Instruction::WordBoundary => {
                if is_boundary(text, pos) {
                    pc += 1;
                } else {
                    backtrack!();
                }
            }
            Instruction::WordBoundaryNeg => {
                if !is_boundary(text, pos) {
                    pc += 1;
                } else {
                    backtrack!();
                }
            }
            Instruction::SaveGroup { group, end } => {
                let slot = *group as usize;
                if *end {
                    captures.ends[slot] = pos as i64;
                } else {
                    captures.starts[slot] = pos as i64;
                }
                pc += 1;
            }
            Instruction::Choice(addr) => {
                choice_stack.push(ChoicePoint {
                    pc: *addr,
                    pos,
                    aux: aux.clone(),
                    captures: captures.clone(),
                    last_op_succeeded,
                });
                pc += 1;
            }
            Instruction::Branch(addr) => {
                pc = *addr;
            }
            Instruction::BranchIfNot(addr) => {
                if last_op_succeeded {
                    pc = *addr;
                } else {
                    pc += 1;
                }
            }
            Instruction::SavePointer => {
                aux = aux.push(pos as i64);
                pc += 1;
            }
            Instruction::ZeroLength => {
                last_op_succeeded = aux.peek() != Some(pos as i64);
                pc += 1;
            }
            Instruction::Match => {
                return Some(MatchOutcome {
                    start,
                    end: pos,
                    captures,
                });
            }
            Instruction::Fail => {
                backtrack!();
            }
        }
    }
}

/// Sweeps candidate start positions from `from` through `text.len()`
/// inclusive, returning the first successful match. A pattern that starts
/// with `^` could short-circuit this sweep after the first attempt, but
/// that shortcut is not taken here — sweeping unconditionally is simpler
/// and still correct, at the cost of a few wasted attempts when the
/// pattern is anchored.
pub fn search(program: &Program, text: &[u8], from: usize, limits: &Limits) -> Option<MatchOutcome> {
    for start in from..=text.len() {
        if let Some(outcome) = run_from(program, text, start, limits) {
            return Some(outcome);
        }
    }
    None
}

fn char_matches(actual: u8, expected: u8, ignore_case: bool) -> bool {
    if actual == expected {
        return true;
    }
    ignore_case && flip_ascii_case(actual) == Some(expected)
}

fn is_boundary(text: &[u8], pos: usize) -> bool {
    let before = pos > 0 && is_word_byte(text[pos - 1]);
    let after = pos < text.len() && is_word_byte(text[pos]);
    before != after
}
