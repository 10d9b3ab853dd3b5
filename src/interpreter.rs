//! A reusable interpreter that owns the tape and the loaded program.
//!
//! Every evaluation starts from a full reset, so one instance can evaluate any
//! number of programs in sequence without state leaking between them.

use std::io::{self, Read, Write};

use tracing::debug;

use crate::engine::{Engine, StepControl};
use crate::error::{InterpreterError, ParseError};
use crate::io::IoAdapter;
use crate::loops::JumpTable;
use crate::opcode::{self, Program};
use crate::tape::{BoundaryPolicy, Tape, DEFAULT_CAPACITY};

/// Instruction and loop counts of a validated program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramSummary {
    pub instructions: usize,
    pub loops: usize,
}

/// The interpreter maintains:
/// - a memory tape with a fixed capacity and boundary policy,
/// - the filtered program and its jump table for the current evaluation,
/// - the program counter.
pub struct Interpreter {
    tape: Tape,
    program: Program,
    jumps: JumpTable,
    pc: usize,
    control: Option<StepControl>,
}

impl Interpreter {
    /// Create an interpreter with a tape of `capacity` cells.
    pub fn new(capacity: usize, policy: BoundaryPolicy) -> Self {
        Self {
            tape: Tape::new(capacity, policy),
            program: Program::default(),
            jumps: JumpTable::default(),
            pc: 0,
            control: None,
        }
    }

    /// Create an interpreter with the canonical 30,000-cell tape.
    pub fn with_policy(policy: BoundaryPolicy) -> Self {
        Self::new(DEFAULT_CAPACITY, policy)
    }

    /// Enable cooperative cancellation and an optional step limit.
    ///
    /// The cancel flag is shared with the caller. [`Interpreter::reset`] clears
    /// it, so a cancellation only affects the evaluation already running.
    pub fn set_step_control(&mut self, control: StepControl) {
        self.control = Some(control);
    }

    /// Evaluate `source` against stdin and stdout.
    ///
    /// The standard handles are locked per byte, never for the whole run.
    pub fn evaluate(&mut self, source: &str) -> Result<(), InterpreterError> {
        self.evaluate_with(source, io::stdin(), io::stdout())
    }

    /// Evaluate `source`, reading `,` bytes from `input` and writing `.` bytes to `output`.
    ///
    /// Bytes written before a failure stay written.
    pub fn evaluate_with<R: Read, W: Write>(
        &mut self,
        source: &str,
        input: R,
        output: W,
    ) -> Result<(), InterpreterError> {
        self.execute(source, IoAdapter::new(input, output), false)
    }

    /// Debug-run `source`, writing a step-by-step table to `output` instead of
    /// producing I/O side effects. State advances exactly as in a real run, but
    /// `.` is logged rather than written and `,` simulates end of input.
    pub fn evaluate_debug<W: Write>(&mut self, source: &str, output: W) -> Result<(), InterpreterError> {
        self.execute(source, IoAdapter::new(io::empty(), output), true)
    }

    /// Filter and index `source` without running it.
    pub fn check(&mut self, source: &str) -> Result<ProgramSummary, ParseError> {
        self.reset();
        self.load(source)?;
        Ok(ProgramSummary {
            instructions: self.program.len(),
            loops: self.jumps.len(),
        })
    }

    /// Zero the tape, drop the loaded program and jump table, rewind the counter
    /// and clear any pending cancellation.
    pub fn reset(&mut self) {
        if let Some(ctrl) = self.control.as_ref() {
            ctrl.clear_cancel();
        }
        self.tape.reset();
        self.program.clear();
        self.jumps.clear();
        self.pc = 0;
        debug!("interpreter reset");
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn jump_table(&self) -> &JumpTable {
        &self.jumps
    }

    pub fn program_counter(&self) -> usize {
        self.pc
    }

    fn load(&mut self, source: &str) -> Result<(), ParseError> {
        let program = opcode::filter(source)?;
        let jumps = JumpTable::build(&program)?;
        debug!(instructions = program.len(), loops = jumps.len(), "program indexed");
        self.program = program;
        self.jumps = jumps;
        Ok(())
    }

    fn execute<R: Read, W: Write>(
        &mut self,
        source: &str,
        io: IoAdapter<R, W>,
        debug_table: bool,
    ) -> Result<(), InterpreterError> {
        self.reset();
        if let Err(e) = self.load(source) {
            debug!(error = %e, "program rejected");
            return Err(e.into());
        }

        debug!(policy = %self.tape.policy(), capacity = self.tape.capacity(), "evaluation started");
        let mut engine = Engine::new(&self.program, &self.jumps, &mut self.tape, &mut self.pc, io)
            .with_control(self.control.as_ref())
            .with_debug(debug_table);
        let result = engine.run();
        let steps = engine.steps();

        match &result {
            Ok(()) => debug!(steps, "evaluation finished"),
            Err(e) => debug!(steps, error = %e, "evaluation failed"),
        }
        result
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, BoundaryPolicy::default())
    }
}
