// Text prompt on a terminal (or any reader/writer pair).
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use super::InputProvider;
use crate::error::InputError;

pub struct TerminalInput<R, W> {
    reader: R,
    writer: W,
}

impl TerminalInput<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> InputProvider for TerminalInput<R, W> {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>, InputError> {
        write!(self.writer, "{} ", prompt).map_err(|e| InputError::ReadError(e.to_string()))?;
        self.writer.flush().map_err(|e| InputError::ReadError(e.to_string()))?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|e| InputError::ReadError(e.to_string()))?;
        if read == 0 {
            // EOF (Ctrl-D) counts as cancelling the prompt.
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }
}
