//! Compiled program: instruction vector, capture-group count and flag
//! bits.

use crate::compiler::Instruction;
use crate::flags::RegexFlags;

#[derive(Debug, Clone)]
pub struct Program {
    instructions: Vec<Instruction>,
    group_count: u32,
    flags: RegexFlags,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>, group_count: u32, flags: RegexFlags) -> Self {
        Self {
            instructions,
            group_count,
            flags,
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn group_count(&self) -> u32 {
        self.group_count
    }

    pub fn flags(&self) -> RegexFlags {
        self.flags
    }
}
