//! Loop indexing: pairs every `[` with its `]` before execution begins.

use crate::error::ParseError;
use crate::opcode::{Instruction, Program};

/// Bidirectional map between matching loop-open and loop-close positions.
///
/// `targets[i]` holds the matching index for a bracket at `i` and `None` for
/// every other instruction. The table is built once per program and never
/// changes afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpTable {
    targets: Vec<Option<usize>>,
    pairs: usize,
}

impl JumpTable {
    /// Scan `program` once, left to right, matching brackets with a stack.
    ///
    /// An unmatched `]` reports its own 1-based position. An unmatched `[`
    /// reports the oldest one still open at the end of the scan.
    pub fn build(program: &Program) -> Result<Self, ParseError> {
        let mut targets = vec![None; program.len()];
        let mut pairs = 0;
        let mut stack: Vec<usize> = Vec::new();

        for (i, instr) in program.instructions().iter().enumerate() {
            match instr {
                Instruction::LoopOpen => stack.push(i),
                Instruction::LoopClose => {
                    let Some(open) = stack.pop() else {
                        return Err(ParseError::UnmatchedClose {
                            position: i + 1,
                            offset: program.source_offset(i).unwrap_or(i),
                        });
                    };
                    targets[open] = Some(i);
                    targets[i] = Some(open);
                    pairs += 1;
                }
                _ => {}
            }
        }

        if let Some(&open) = stack.first() {
            return Err(ParseError::UnmatchedOpen {
                position: open + 1,
                offset: program.source_offset(open).unwrap_or(open),
            });
        }

        Ok(Self { targets, pairs })
    }

    /// Matching bracket index for the bracket at `index`.
    pub fn target(&self, index: usize) -> Option<usize> {
        self.targets.get(index).copied().flatten()
    }

    /// Number of matched loops.
    pub fn len(&self) -> usize {
        self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs == 0
    }

    /// Every recorded `(from, to)` entry, in both directions.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.targets
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.map(|t| (i, t)))
    }

    pub fn clear(&mut self) {
        self.targets.clear();
        self.pairs = 0;
    }
}
