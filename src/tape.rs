//! The memory tape: fixed-capacity byte cells and one movable pointer.

use std::fmt;
use std::str::FromStr;

use crate::error::TapeError;

/// Canonical tape length.
pub const DEFAULT_CAPACITY: usize = 30_000;

/// How the tape reacts when the pointer runs off either end.
///
/// Cells are bytes under both policies: increment and decrement wrap modulo 256.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Pointer movement is taken modulo the capacity and never fails.
    #[default]
    Wrap,
    /// Moving past the last cell is [`TapeError::OutOfMemory`], moving below
    /// cell 0 is [`TapeError::AccessViolation`].
    Strict,
}

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryPolicy::Wrap => write!(f, "wrap"),
            BoundaryPolicy::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for BoundaryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wrap" => Ok(BoundaryPolicy::Wrap),
            "strict" => Ok(BoundaryPolicy::Strict),
            other => Err(format!("unknown boundary policy '{other}' (expected 'wrap' or 'strict')")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tape {
    cells: Vec<u8>,
    pointer: usize,
    policy: BoundaryPolicy,
}

impl Tape {
    /// Create a zeroed tape. A capacity of 0 is raised to a single cell.
    pub fn new(capacity: usize, policy: BoundaryPolicy) -> Self {
        Self {
            cells: vec![0; capacity.max(1)],
            pointer: 0,
            policy,
        }
    }

    pub fn increment(&mut self) {
        self.cells[self.pointer] = self.cells[self.pointer].wrapping_add(1);
    }

    pub fn decrement(&mut self) {
        self.cells[self.pointer] = self.cells[self.pointer].wrapping_sub(1);
    }

    pub fn move_forward(&mut self) -> Result<(), TapeError> {
        let last = self.cells.len() - 1;
        if self.pointer < last {
            self.pointer += 1;
            return Ok(());
        }
        match self.policy {
            BoundaryPolicy::Wrap => {
                self.pointer = 0;
                Ok(())
            }
            BoundaryPolicy::Strict => Err(TapeError::OutOfMemory { pointer: self.pointer }),
        }
    }

    pub fn move_backward(&mut self) -> Result<(), TapeError> {
        if self.pointer > 0 {
            self.pointer -= 1;
            return Ok(());
        }
        match self.policy {
            BoundaryPolicy::Wrap => {
                self.pointer = self.cells.len() - 1;
                Ok(())
            }
            BoundaryPolicy::Strict => Err(TapeError::AccessViolation),
        }
    }

    pub fn store(&mut self, value: u8) {
        self.cells[self.pointer] = value;
    }

    pub fn retrieve(&self) -> u8 {
        self.cells[self.pointer]
    }

    /// Zero every cell and return the pointer to 0.
    pub fn reset(&mut self) {
        self.cells.fill(0);
        self.pointer = 0;
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, BoundaryPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_tape_is_zeroed() {
        let tape = Tape::default();
        assert_eq!(tape.capacity(), DEFAULT_CAPACITY);
        assert_eq!(tape.pointer(), 0);
        assert!(tape.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn cell_values_wrap_at_256() {
        let mut tape = Tape::new(1, BoundaryPolicy::Strict);
        tape.decrement();
        assert_eq!(tape.retrieve(), 255);
        tape.increment();
        assert_eq!(tape.retrieve(), 0);
    }

    #[test]
    fn wrap_policy_moves_left_from_zero_to_last_cell() {
        let mut tape = Tape::new(10, BoundaryPolicy::Wrap);
        tape.move_backward().unwrap();
        assert_eq!(tape.pointer(), 9);
        tape.move_forward().unwrap();
        assert_eq!(tape.pointer(), 0);
    }

    #[test]
    fn strict_policy_rejects_moving_below_zero() {
        let mut tape = Tape::new(10, BoundaryPolicy::Strict);
        assert_eq!(tape.move_backward(), Err(TapeError::AccessViolation));
        assert_eq!(tape.pointer(), 0);
    }

    #[test]
    fn strict_policy_rejects_moving_past_last_cell() {
        let mut tape = Tape::new(3, BoundaryPolicy::Strict);
        tape.move_forward().unwrap();
        tape.move_forward().unwrap();
        assert_eq!(tape.move_forward(), Err(TapeError::OutOfMemory { pointer: 2 }));
        assert_eq!(tape.pointer(), 2);
    }

    #[test]
    fn store_and_retrieve_follow_the_pointer() {
        let mut tape = Tape::new(4, BoundaryPolicy::Wrap);
        tape.store(42);
        tape.move_forward().unwrap();
        assert_eq!(tape.retrieve(), 0);
        tape.move_backward().unwrap();
        assert_eq!(tape.retrieve(), 42);
    }

    #[test]
    fn reset_clears_cells_and_pointer() {
        let mut tape = Tape::new(4, BoundaryPolicy::Wrap);
        tape.increment();
        tape.move_forward().unwrap();
        tape.store(7);
        tape.reset();
        assert_eq!(tape.pointer(), 0);
        assert!(tape.cells().iter().all(|&c| c == 0));
        assert_eq!(tape.policy(), BoundaryPolicy::Wrap);
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("Strict".parse::<BoundaryPolicy>(), Ok(BoundaryPolicy::Strict));
        assert_eq!(" wrap ".parse::<BoundaryPolicy>(), Ok(BoundaryPolicy::Wrap));
        assert!("clamp".parse::<BoundaryPolicy>().is_err());
    }
}
