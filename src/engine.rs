//! The execution engine: drives a flat program counter over a [`Program`].

use std::io::{Read, Write};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tracing::trace;

use crate::error::{InterpreterError, TapeError};
use crate::io::IoAdapter;
use crate::loops::JumpTable;
use crate::opcode::{Instruction, Program};
use crate::tape::Tape;

/// Controls for cooperative cancellation and step limiting.
#[derive(Clone, Debug, Default)]
pub struct StepControl {
    pub max_steps: Option<usize>,
    pub cancel_flag: Arc<AtomicBool>,
}

impl StepControl {
    pub fn new(max_steps: Option<usize>, cancel_flag: Arc<AtomicBool>) -> Self {
        Self { max_steps, cancel_flag }
    }

    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    pub fn clear_cancel(&self) {
        self.cancel_flag.store(false, Ordering::Relaxed);
    }

    fn is_canceled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }
}

/// Where the counter goes after a step.
enum Flow {
    Next,
    Jump(usize),
}

/// One evaluation in progress.
///
/// Borrows an already indexed program and jump table; the loop structure is
/// never rescanned while running.
pub struct Engine<'a, R, W> {
    program: &'a Program,
    jumps: &'a JumpTable,
    tape: &'a mut Tape,
    pc: &'a mut usize,
    io: IoAdapter<R, W>,
    control: Option<&'a StepControl>,
    debug: bool,
    steps: usize,
}

impl<'a, R: Read, W: Write> Engine<'a, R, W> {
    pub fn new(
        program: &'a Program,
        jumps: &'a JumpTable,
        tape: &'a mut Tape,
        pc: &'a mut usize,
        io: IoAdapter<R, W>,
    ) -> Self {
        Self {
            program,
            jumps,
            tape,
            pc,
            io,
            control: None,
            debug: false,
            steps: 0,
        }
    }

    pub fn with_control(mut self, control: Option<&'a StepControl>) -> Self {
        self.control = control;
        self
    }

    /// Write a step table to the output instead of performing program I/O.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Number of steps executed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Run until the counter reaches the end of the program.
    pub fn run(&mut self) -> Result<(), InterpreterError> {
        if self.debug {
            self.debug_line("STEP | IP  | PTR | CELL | INSTR | ACTION")?;
            self.debug_line("-----+-----+-----+------+-------+------------------------------------------------")?;
        }

        while *self.pc < self.program.len() {
            if let Some(ctrl) = self.control {
                if ctrl.is_canceled() {
                    return Err(InterpreterError::Canceled);
                }
                if let Some(max) = ctrl.max_steps {
                    if self.steps >= max {
                        return Err(InterpreterError::StepLimitExceeded { limit: max });
                    }
                }
            }

            self.step()?;
            self.steps += 1;
        }

        Ok(())
    }

    /// Dispatch the instruction under the counter and move the counter.
    fn step(&mut self) -> Result<(), InterpreterError> {
        let ip = *self.pc;
        let Some(instr) = self.program.get(ip) else {
            return Ok(());
        };
        let (ptr_before, cell_before) = (self.tape.pointer(), self.tape.retrieve());
        trace!(ip, ptr = ptr_before, cell = cell_before, op = %instr, "step");

        let mut action: Option<String> = if self.debug { Some(String::new()) } else { None };

        let flow = match instr {
            Instruction::Increment => {
                self.tape.increment();
                if let Some(a) = action.as_mut() {
                    *a = format!("Increment cell[{}] from {} to {}", ptr_before, cell_before, self.tape.retrieve());
                }
                Flow::Next
            }
            Instruction::Decrement => {
                self.tape.decrement();
                if let Some(a) = action.as_mut() {
                    *a = format!("Decrement cell[{}] from {} to {}", ptr_before, cell_before, self.tape.retrieve());
                }
                Flow::Next
            }
            Instruction::MoveRight => {
                self.tape.move_forward().map_err(|e| self.tape_error(e))?;
                if let Some(a) = action.as_mut() {
                    *a = format!("Moved pointer head to index {}", self.tape.pointer());
                }
                Flow::Next
            }
            Instruction::MoveLeft => {
                self.tape.move_backward().map_err(|e| self.tape_error(e))?;
                if let Some(a) = action.as_mut() {
                    *a = format!("Moved pointer head to index {}", self.tape.pointer());
                }
                Flow::Next
            }
            Instruction::Read => {
                if let Some(a) = action.as_mut() {
                    self.tape.store(0);
                    *a = "Read byte -> simulated EOF (set cell to 0)".to_string();
                } else {
                    let byte = self.io.read_byte().map_err(|e| self.io_error(e))?;
                    self.tape.store(byte);
                }
                Flow::Next
            }
            Instruction::Write => {
                if let Some(a) = action.as_mut() {
                    *a = format!("Output byte {} (suppressed in debug)", cell_before);
                } else {
                    self.io.write_byte(cell_before).map_err(|e| self.io_error(e))?;
                }
                Flow::Next
            }
            Instruction::LoopOpen => {
                if cell_before == 0 {
                    let close = self.jumps.target(ip).expect("validated bracket");
                    if let Some(a) = action.as_mut() {
                        *a = format!("Cell is 0; jump past matching ']' at IP {}", close);
                    }
                    Flow::Jump(close + 1)
                } else {
                    if let Some(a) = action.as_mut() {
                        *a = "Enter loop (cell != 0)".to_string();
                    }
                    Flow::Next
                }
            }
            Instruction::LoopClose => {
                if cell_before != 0 {
                    let open = self.jumps.target(ip).expect("validated bracket");
                    if let Some(a) = action.as_mut() {
                        *a = format!("Cell != 0; jump back to matching '[' at IP {}", open);
                    }
                    Flow::Jump(open)
                } else {
                    if let Some(a) = action.as_mut() {
                        *a = "Exit loop (cell is 0)".to_string();
                    }
                    Flow::Next
                }
            }
        };

        if let Some(action) = action {
            let row = format!(
                "{:<4} | {:<3} | {:<3} | {:<4} |  {}    | {}",
                self.steps, ip, ptr_before, cell_before, instr, action
            );
            self.debug_line(&row)?;
        }

        *self.pc = match flow {
            Flow::Next => ip + 1,
            Flow::Jump(target) => target,
        };
        Ok(())
    }

    fn debug_line(&mut self, line: &str) -> Result<(), InterpreterError> {
        writeln!(self.io.output_mut(), "{line}").map_err(|e| self.io_error(e))
    }

    fn offset(&self, ip: usize) -> usize {
        self.program.source_offset(ip).unwrap_or(ip)
    }

    fn tape_error(&self, err: TapeError) -> InterpreterError {
        let ip = *self.pc;
        let offset = self.offset(ip);
        match err {
            TapeError::OutOfMemory { pointer } => InterpreterError::OutOfMemory { ip, offset, pointer },
            TapeError::AccessViolation => InterpreterError::AccessViolation { ip, offset },
        }
    }

    fn io_error(&self, source: std::io::Error) -> InterpreterError {
        let ip = *self.pc;
        InterpreterError::Io { ip, offset: self.offset(ip), source }
    }
}
