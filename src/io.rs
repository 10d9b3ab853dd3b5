//! Byte-at-a-time input and output for `,` and `.`.

use std::io::{self, ErrorKind, Read, Write};

/// Reads one byte per `,` and writes one byte per `.`.
///
/// End of input is not an error: [`IoAdapter::read_byte`] yields 0.
/// Every written byte is flushed immediately.
pub struct IoAdapter<R, W> {
    input: R,
    output: W,
}

impl<R: Read, W: Write> IoAdapter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn read_byte(&mut self) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(0),
                Ok(_) => return Ok(buf[0]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    pub fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.output.write_all(&[byte])?;
        self.output.flush()
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}
