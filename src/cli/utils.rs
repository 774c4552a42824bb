use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Console errors
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("Input stream closed")]
    Closed,
}

/// Line-oriented prompt/response console over any reader and writer
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read a line of input after printing `prompt`
    ///
    /// Surrounding whitespace is trimmed. End of input yields `ConsoleError::Closed`.
    pub fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut input = String::new();
        let read = self
            .input
            .read_line(&mut input)
            .context("Failed to read from input")?;
        if read == 0 {
            return Err(ConsoleError::Closed.into());
        }

        Ok(input.trim().to_string())
    }

    /// Read and parse a value; `None` when the input does not parse
    pub fn read_parsed<T: FromStr>(&mut self, prompt: &str) -> Result<Option<T>> {
        let line = self.read_line(prompt)?;
        Ok(line.parse::<T>().ok())
    }

    /// Read a decimal amount, falling back to `default` on blank input
    pub fn read_amount_or(&mut self, prompt: &str, default: f64) -> Result<Option<f64>> {
        let line = self.read_line(prompt)?;
        if line.is_empty() {
            return Ok(Some(default));
        }
        Ok(line.parse::<f64>().ok())
    }

    /// Print a line of output
    pub fn println(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    pub fn print_invalid_input(&mut self) -> Result<()> {
        self.println("Invalid input. Please try again.")
    }

    pub fn print_header(&mut self, title: &str) -> Result<()> {
        self.println(&format!("\n--- {} ---", title))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// True when the error is the console running out of input
pub fn is_closed(error: &anyhow::Error) -> bool {
    matches!(error.downcast_ref::<ConsoleError>(), Some(ConsoleError::Closed))
}
