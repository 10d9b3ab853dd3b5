//! Instruction set and the filter that reduces raw text to a [`Program`].

use std::fmt;

use crate::error::ParseError;

/// One of the eight recognized instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    Increment,
    Decrement,
    MoveRight,
    MoveLeft,
    Read,
    Write,
    LoopOpen,
    LoopClose,
}

impl Instruction {
    /// Map a source character to its instruction. Anything else is a comment.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Instruction::Increment),
            '-' => Some(Instruction::Decrement),
            '>' => Some(Instruction::MoveRight),
            '<' => Some(Instruction::MoveLeft),
            ',' => Some(Instruction::Read),
            '.' => Some(Instruction::Write),
            '[' => Some(Instruction::LoopOpen),
            ']' => Some(Instruction::LoopClose),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Instruction::Increment => '+',
            Instruction::Decrement => '-',
            Instruction::MoveRight => '>',
            Instruction::MoveLeft => '<',
            Instruction::Read => ',',
            Instruction::Write => '.',
            Instruction::LoopOpen => '[',
            Instruction::LoopClose => ']',
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The ordered, 0-indexed instruction sequence of one evaluation.
///
/// Each instruction remembers the character offset it came from so errors can
/// point back into the raw source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
    offsets: Vec<usize>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Instruction> {
        self.instructions.get(index).copied()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Character offset in the raw source of the instruction at `index`.
    pub fn source_offset(&self, index: usize) -> Option<usize> {
        self.offsets.get(index).copied()
    }

    pub fn clear(&mut self) {
        self.instructions.clear();
        self.offsets.clear();
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instr in &self.instructions {
            write!(f, "{instr}")?;
        }
        Ok(())
    }
}

/// Keep only instruction symbols from `source`, in order.
///
/// Whitespace, newlines and every other character are comments and are
/// dropped silently. Fails with [`ParseError::Empty`] when nothing is left.
pub fn filter(source: &str) -> Result<Program, ParseError> {
    let mut program = Program::default();
    for (offset, c) in source.chars().enumerate() {
        if let Some(instr) = Instruction::from_symbol(c) {
            program.instructions.push(instr);
            program.offsets.push(offset);
        }
    }

    if program.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_whitespace_are_dropped() {
        let program = filter("a+ b\n-\t>x<,.[]!").unwrap();
        assert_eq!(program.to_string(), "+-><,.[]");
        assert_eq!(program.len(), 8);
    }

    #[test]
    fn offsets_point_into_raw_source() {
        let program = filter("ab+\n c-").unwrap();
        assert_eq!(program.source_offset(0), Some(2));
        assert_eq!(program.source_offset(1), Some(6));
        assert_eq!(program.source_offset(2), None);
    }

    #[test]
    fn offsets_count_characters_not_bytes() {
        let program = filter("é+").unwrap();
        assert_eq!(program.source_offset(0), Some(1));
    }

    #[test]
    fn empty_source_is_rejected() {
        assert_eq!(filter(""), Err(ParseError::Empty));
    }

    #[test]
    fn comment_only_source_is_rejected() {
        assert_eq!(filter("just a comment\n"), Err(ParseError::Empty));
    }

    #[test]
    fn symbols_round_trip_through_instruction() {
        for c in "+-<>,.[]".chars() {
            assert_eq!(Instruction::from_symbol(c).map(Instruction::symbol), Some(c));
        }
        assert_eq!(Instruction::from_symbol('x'), None);
    }
}
