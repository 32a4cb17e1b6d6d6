//! AST → bytecode lowering. `Instruction` is a tagged enum with
//! per-variant operands rather than an opcode-plus-union representation,
//! which rules out a whole class of "reading the wrong field" bugs that a
//! hand-patched union is prone to.

use crate::ast::{Node, QuantifierKind};
use crate::charset::Charset;
use crate::flags::RegexFlags;
use crate::program::Program;

/// One bytecode instruction. Branch targets are absolute indices into the
/// enclosing program's instruction vector, resolved by back-patching as
/// each jump's destination becomes known — never relative offsets.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Char(u8),
    Dot,
    Charset(Charset),
    SaveGroup { group: u32, end: bool },
    Choice(usize),
    Branch(usize),
    BranchIfNot(usize),
    SavePointer,
    ZeroLength,
    AnchorStart,
    AnchorEnd,
    WordBoundary,
    WordBoundaryNeg,
    Match,
    Fail,
}

/// Lowers a parsed pattern into a linear program. `group_count` should be
/// `ast.max_group_index() + 1` (the `+1` accounts for the implicit group 0
/// wrapping the whole match).
pub fn compile(ast: &Node, group_count: u32, flags: RegexFlags) -> Program {
    let mut compiler = Compiler::new();
    compiler.emit(Instruction::SaveGroup {
        group: 0,
        end: false,
    });
    compiler.node(ast);
    compiler.emit(Instruction::SaveGroup {
        group: 0,
        end: true,
    });
    compiler.emit(Instruction::Match);
    Program::new(compiler.instructions, group_count, flags)
}

struct Compiler {
    instructions: Vec<Instruction>,
}

impl Compiler {
    fn new() -> Self {
        Self {
            instructions: vec![],
        }
    }

    fn here(&self) -> usize {
        self.instructions.len()
    }

    fn emit(&mut self, instr: Instruction) -> usize {
        self.instructions.push(instr);
        self.here() - 1
    }

    /// Rewrites the jump target of a previously emitted `Choice`, `Branch`
    /// or `BranchIfNot` instruction once its destination is known.
    fn patch(&mut self, at: usize, target: usize) {
        self.instructions[at] = match self.instructions[at] {
            Instruction::Choice(_) => Instruction::Choice(target),
            Instruction::Branch(_) => Instruction::Branch(target),
            Instruction::BranchIfNot(_) => Instruction::BranchIfNot(target),
            ref other => panic!("attempted to patch a non-jump instruction: {other:?}"),
        };
    }

    fn node(&mut self, node: &Node) {
        match node {
            Node::Char(byte) => {
                self.emit(Instruction::Char(*byte));
            }
            Node::Dot => {
                self.emit(Instruction::Dot);
            }
            Node::Charset(set) => {
                self.emit(Instruction::Charset(set.clone()));
            }
            Node::AnchorStart => {
                self.emit(Instruction::AnchorStart);
            }
            Node::AnchorEnd => {
                self.emit(Instruction::AnchorEnd);
            }
            Node::WordBoundary => {
                self.emit(Instruction::WordBoundary);
            }
            Node::NotWordBoundary => {
                self.emit(Instruction::WordBoundaryNeg);
            }
            Node::Group { index, body } => {
                self.emit(Instruction::SaveGroup {
                    group: *index,
                    end: false,
                });
                self.node(body);
                self.emit(Instruction::SaveGroup {
                    group: *index,
                    end: true,
                });
            }
            Node::Sequence(children) => {
                for child in children {
                    self.node(child);
                }
            }
            Node::Alternation(branches) => self.alternation(branches),
            Node::Quantifier { kind, body, .. } => self.quantifier(*kind, body),
        }
    }

    fn alternation(&mut self, branches: &[Node]) {
        let mut branch_ends = vec![];
        for alt in &branches[..branches.len() - 1] {
            let choice_idx = self.emit(Instruction::Choice(0));
            self.node(alt);
            branch_ends.push(self.emit(Instruction::Branch(0)));
            let next_alt = self.here();
            self.patch(choice_idx, next_alt);
        }
        self.node(&branches[branches.len() - 1]);
        let end = self.here();
        for idx in branch_ends {
            self.patch(idx, end);
        }
    }

    fn quantifier(&mut self, kind: QuantifierKind, body: &Node) {
        match kind {
            QuantifierKind::ZeroOrOne => self.optional(body),
            QuantifierKind::OneOrMore => self.one_or_more(body),
            QuantifierKind::ZeroOrMore => self.zero_or_more(body),
            QuantifierKind::Range { min, max } => self.range(min, max, body),
        }
    }

    /// `CHOICE(skip); L(child); skip:` — greedy, tries the match first.
    fn optional(&mut self, body: &Node) {
        let choice_idx = self.emit(Instruction::Choice(0));
        self.node(body);
        let skip = self.here();
        self.patch(choice_idx, skip);
    }

    /// `L(child); CHOICE(+2); BRANCH(start)` — the fall-through of CHOICE
    /// reaches BRANCH first, so greedy continuation is tried before the
    /// choice point's exit path.
    fn one_or_more(&mut self, body: &Node) {
        let start = self.here();
        self.node(body);
        let choice_idx = self.emit(Instruction::Choice(0));
        self.emit(Instruction::Branch(start));
        let exit = self.here();
        self.patch(choice_idx, exit);
    }

    /// `loop: CHOICE(exit); SAVE_POINTER; L(child); ZERO_LENGTH;
    /// BRANCH_IF_NOT(loop); exit:`
    fn zero_or_more(&mut self, body: &Node) {
        let loop_start = self.here();
        let choice_idx = self.emit(Instruction::Choice(0));
        self.emit(Instruction::SavePointer);
        self.node(body);
        self.emit(Instruction::ZeroLength);
        self.emit(Instruction::BranchIfNot(loop_start));
        let exit = self.here();
        self.patch(choice_idx, exit);
    }

    fn range(&mut self, min: u32, max: Option<u32>, body: &Node) {
        for _ in 0..min {
            self.node(body);
        }
        match max {
            None => self.zero_or_more(body),
            Some(max) => {
                for _ in 0..(max - min) {
                    self.optional(body);
                }
            }
        }
    }
}
