//! A tape-machine interpreter for the eight-opcode Brainfuck language.
//!
//! The interpreter operates on a memory tape (default 30,000 byte cells) with
//! a single data pointer.
//!
//! Features and behaviors:
//! - Memory tape initialized to 0; cell values wrap modulo 256.
//! - Two pointer boundary policies, chosen at construction:
//!   [`BoundaryPolicy::Wrap`] moves the pointer modulo the tape length,
//!   [`BoundaryPolicy::Strict`] fails with an out-of-memory error past the end
//!   and an access-violation error below cell 0.
//! - Input `,` reads a single byte; on EOF the current cell is set to 0.
//! - Output `.` writes the byte at the current cell (no newline).
//! - Loops are matched once before execution; unmatched brackets are reported
//!   with their 1-based position among the program's instructions.
//! - Any character outside `><+-.,[]` is a comment.
//!
//! Quick start:
//!
//! ```no_run
//! use bf_tape::{BoundaryPolicy, Interpreter};
//!
//! // Classic "Hello World!"
//! let code = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";
//! let mut bf = Interpreter::with_policy(BoundaryPolicy::Wrap);
//! bf.evaluate(code).expect("program should run");
//! ```

pub mod cli_util;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod interpreter;
pub mod io;
pub mod logging;
pub mod loops;
pub mod opcode;
pub mod tape;

pub use engine::StepControl;
pub use error::{InterpreterError, ParseError, TapeError};
pub use interpreter::{Interpreter, ProgramSummary};
pub use loops::JumpTable;
pub use opcode::{Instruction, Program};
pub use tape::{BoundaryPolicy, Tape, DEFAULT_CAPACITY};
