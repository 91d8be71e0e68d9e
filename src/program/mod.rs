mod compile;
mod instruction;

pub use compile::*;
pub use instruction::*;

use std::{collections::HashMap, ops::Deref};

/// A compiled program: the instruction stream plus both directions of the loop jump table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    data: Vec<Instruction>,
    /// Maps the index of each `LoopStart` to the index of its `LoopEnd`.
    loop_start_to_end: HashMap<usize, usize>,
    /// Maps the index of each `LoopEnd` to the index of its `LoopStart`.
    loop_end_to_start: HashMap<usize, usize>,
}

impl Program {
    pub fn instructions(&self) -> &[Instruction] {
        &self.data
    }

    /// Index of the `LoopEnd` matching the `LoopStart` at `ip`.
    pub fn loop_end(&self, ip: usize) -> Option<usize> {
        self.loop_start_to_end.get(&ip).copied()
    }

    /// Index of the `LoopStart` matching the `LoopEnd` at `ip`.
    pub fn loop_start(&self, ip: usize) -> Option<usize> {
        self.loop_end_to_start.get(&ip).copied()
    }

    pub fn loop_start_to_end(&self) -> &HashMap<usize, usize> {
        &self.loop_start_to_end
    }

    pub fn loop_end_to_start(&self) -> &HashMap<usize, usize> {
        &self.loop_end_to_start
    }

    /// Number of bracket pairs that survived compilation.
    pub fn loop_count(&self) -> usize {
        self.loop_start_to_end.len()
    }
}

impl Deref for Program {
    type Target = [Instruction];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
