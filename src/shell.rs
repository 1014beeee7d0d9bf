use std::ffi::OsString;
use std::io::{Read, Write};

use anyhow::Result;
use log::{debug, info, warn};

use crate::interpreter::{Interpreter, Outcome};
use crate::readline::Reader;
use crate::tokenizer::tokenize;

pub const PROMPT: &str = ":> ";

/// Prompt, read, tokenize, dispatch until a command asks to stop.
pub struct Shell<R, W> {
    interpreter: Interpreter,
    reader: Reader<R>,
    out: W,
}

impl<R: Read, W: Write> Shell<R, W> {
    pub fn new (interpreter: Interpreter, input: R, out: W) -> Self {
        Self { interpreter, reader: Reader::new(input), out }
    }

    pub fn banner (&mut self, cwd: &str) -> Result<()> {
        writeln!(self.out, "\nTerminal Successfully Started!")?;
        writeln!(self.out, "Try Commands: {}", self.interpreter.names().join(", "))?;
        writeln!(self.out, "Currently in: {cwd}")?;
        Ok(())
    }

    /// Runs until `end` or end of input. Only a failed read or write is an error.
    pub fn run (&mut self) -> Result<()> {
        loop {
            write!(self.out, "\n{PROMPT}")?;
            self.out.flush()?;

            let Some(line) = self.reader.read_line()? else {
                debug!("end of input");
                writeln!(self.out)?;
                return Ok(());
            };

            let tokens = tokenize(&line);
            let outcome = self.interpreter.dispatch(&tokens, &mut self.out);
            self.out.flush()?;

            if outcome == Outcome::Terminate {
                info!("terminal ended");
                return Ok(());
            }
        }
    }

    #[cfg(test)]
    pub fn into_output (self) -> W {
        self.out
    }
}

/// Dispatches a single command given on the command line.
///
/// Returns the process exit status.
pub fn run_batch (interpreter: &Interpreter, argv: &[OsString], out: &mut dyn Write) -> i32 {
    info!("batch mode: {argv:?}");

    let status = match interpreter.try_dispatch(argv, out) {
        Ok(_) => 0,
        Err(error) => {
            warn!("batch command failed: {error:#}");
            if let Err(err) = writeln!(out, "{error}") {
                warn!("could not report batch failure: {err}");
            }
            1
        }
    };

    if let Err(err) = out.flush() {
        warn!("could not flush batch output: {err}");
    }

    status
}
