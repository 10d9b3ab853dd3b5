use std::io::{self, IsTerminal, Write};

use nu_ansi_term::Color;

use crate::error::InterpreterError;

/// Pretty-print an [`InterpreterError`] with caret positioning into `code`.
/// If `program` is `Some("bf")`, prefix messages with "bf: ...".
pub fn print_interpreter_error(program: Option<&str>, code: &str, err: &InterpreterError) {
    let prefix_program = |msg: &str| {
        let label = paint_label("error");
        match program {
            Some(p) => format!("{p}: {label}: {msg}"),
            None => format!("{label}: {msg}"),
        }
    };

    let msg = match err {
        InterpreterError::Parsing(e) => prefix_program(&format!("Parse error: {e}")),
        InterpreterError::OutOfMemory { ip, pointer, .. } => prefix_program(&format!(
            "Runtime error: out of memory (ptr={pointer}) at instruction {ip}"
        )),
        InterpreterError::AccessViolation { ip, .. } => prefix_program(&format!(
            "Runtime error: access violation (ptr moved below 0) at instruction {ip}"
        )),
        InterpreterError::Io { ip, source, .. } => {
            prefix_program(&format!("I/O error: {source} at instruction {ip}"))
        }
        InterpreterError::StepLimitExceeded { limit } => {
            format!("Execution aborted: step limit exceeded ({limit})")
        }
        InterpreterError::Canceled => "Execution aborted: cancelled".to_string(),
    };

    match err.offset() {
        Some(offset) => print_error_with_context(&msg, code, offset),
        None => {
            eprintln!("{msg}");
            let _ = io::stderr().flush();
        }
    }
}

fn paint_label(label: &str) -> String {
    if io::stderr().is_terminal() {
        Color::Red.bold().paint(label).to_string()
    } else {
        label.to_string()
    }
}

/// Print a concise error with a caret context window,
/// working with UTF-8 by slicing using char indices.
pub fn print_error_with_context(message: &str, code: &str, pos: usize) {
    let _ = write_error_with_context(&mut io::stderr(), message, code, pos);
    let _ = io::stderr().flush();
}

fn write_error_with_context<W: Write>(out: &mut W, message: &str, code: &str, pos: usize) -> io::Result<()> {
    writeln!(out, "{message}")?;

    // Show a short window around the position for context
    const WINDOW_CHARS: usize = 32;

    let total_chars = code.chars().count();
    let start_char = pos.saturating_sub(WINDOW_CHARS);
    let end_char = (pos + WINDOW_CHARS + 1).min(total_chars);

    // Newlines and tabs would break the caret alignment
    let slice: String = code
        .chars()
        .skip(start_char)
        .take(end_char.saturating_sub(start_char))
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    writeln!(out, "  {slice}")?;

    let caret_offset_chars = pos.saturating_sub(start_char);
    writeln!(out, "  {}^", " ".repeat(caret_offset_chars))
}
