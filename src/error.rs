/// Structural problems found before any instruction runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// No recognized instruction symbol survived filtering.
    #[error("Empty instruction set given")]
    Empty,

    /// A loop-close with no pending loop-open.
    #[error("']' without matching '[' (position: {position})")]
    UnmatchedClose { position: usize, offset: usize },

    /// A loop-open still pending at the end of the program. Reports the oldest one.
    #[error("'[' without matching ']' (position: {position})")]
    UnmatchedOpen { position: usize, offset: usize },
}

impl ParseError {
    /// 1-based position in the filtered program, when the error has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::Empty => None,
            ParseError::UnmatchedClose { position, .. } | ParseError::UnmatchedOpen { position, .. } => {
                Some(*position)
            }
        }
    }

    /// Character offset into the raw source, when the error has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::Empty => None,
            ParseError::UnmatchedClose { offset, .. } | ParseError::UnmatchedOpen { offset, .. } => {
                Some(*offset)
            }
        }
    }
}

/// Pointer overruns reported by a tape running under the strict policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TapeError {
    #[error("out of memory: pointer moved past the last cell ({pointer})")]
    OutOfMemory { pointer: usize },

    #[error("access violation: pointer moved below cell 0")]
    AccessViolation,
}

/// Errors that can occur while evaluating a program.
///
/// `ip` is the 0-based index into the filtered program and `offset` the
/// character offset of that instruction in the raw source.
#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
    #[error("Parsing error: {0}")]
    Parsing(#[from] ParseError),

    /// The pointer advanced past the upper tape bound (strict policy only).
    #[error("Out of memory at instruction {ip} (ptr={pointer})")]
    OutOfMemory { ip: usize, offset: usize, pointer: usize },

    /// The pointer moved below cell 0 (strict policy only).
    #[error("Access violation at instruction {ip}")]
    AccessViolation { ip: usize, offset: usize },

    /// An underlying I/O error other than end of input.
    #[error("I/O error at instruction {ip}: {source}")]
    Io {
        ip: usize,
        offset: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Execution aborted: step limit exceeded ({limit})")]
    StepLimitExceeded { limit: usize },

    #[error("Execution aborted: cancelled")]
    Canceled,
}

impl InterpreterError {
    /// Raw source offset to point at when rendering the error.
    pub fn offset(&self) -> Option<usize> {
        match self {
            InterpreterError::Parsing(e) => e.offset(),
            InterpreterError::OutOfMemory { offset, .. }
            | InterpreterError::AccessViolation { offset, .. }
            | InterpreterError::Io { offset, .. } => Some(*offset),
            InterpreterError::StepLimitExceeded { .. } | InterpreterError::Canceled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_messages_carry_one_based_position() {
        let close = ParseError::UnmatchedClose { position: 1, offset: 0 };
        assert_eq!(close.to_string(), "']' without matching '[' (position: 1)");

        let open = ParseError::UnmatchedOpen { position: 3, offset: 7 };
        assert_eq!(open.to_string(), "'[' without matching ']' (position: 3)");
        assert_eq!(open.offset(), Some(7));
        assert_eq!(ParseError::Empty.position(), None);
    }

    #[test]
    fn interpreter_error_wraps_parse_error() {
        let err: InterpreterError = ParseError::Empty.into();
        assert!(matches!(err, InterpreterError::Parsing(ParseError::Empty)));
        assert!(err.to_string().starts_with("Parsing error"));
    }
}
