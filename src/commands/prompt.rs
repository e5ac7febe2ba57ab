//! Confirmation Prompts
//!
//! Bulk teardown asks before removing anything. The question is routed
//! through [`Confirm`] so non-interactive callers can answer it.

use std::io::{self, BufRead, Write};

use log::warn;

use crate::error::Result;

/// Answers a yes/no question.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Always answers yes (`teardown --yes`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _question: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Interactive prompt that re-asks until it reads `y` or `n`.
pub struct StdinPrompt<R, W> {
    input: R,
    output: W,
}

impl StdinPrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt bound to the terminal.
    pub fn terminal() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdinPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for StdinPrompt<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        loop {
            writeln!(self.output, "{} y/n", question)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                warn!("No answer received, assuming 'n'");
                return Ok(false);
            }

            match line.trim().to_lowercase().as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => continue,
            }
        }
    }
}
