//! Line-oriented editing session.
//!
//! Reads one command per line and writes a plain transcript. The session owns
//! the two amplitude fields and the edit history; validation happens on every
//! field update, the same way a form would validate on each keystroke.

use std::io::{BufRead, Write};

use anyhow::Result;

use qubit_core::{History, HistoryError, Validator};
use qubit_types::{Snapshot, ValidationError};

pub const HELP: &str = "\
commands:
  alpha <expr>   set alpha and validate it
  beta <expr>    set beta and validate it
  check <expr>   validate without changing anything
  commit         save (alpha, beta) to history
  undo           restore the previous saved pair
  redo           restore the next saved pair
  drop           step back and forget the current saved pair
  first          restore the oldest saved pair
  show           print both fields and the history position
  help           this text
  quit           leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Alpha(String),
    Beta(String),
    Check(String),
    Commit,
    Undo,
    Redo,
    Drop,
    First,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`; unknown commands
    /// return the offending word.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim_start();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line.trim_end(), ""));
        let command = match word {
            "" => return Ok(None),
            "alpha" => Command::Alpha(rest.to_string()),
            "beta" => Command::Beta(rest.to_string()),
            "check" => Command::Check(rest.to_string()),
            "commit" => Command::Commit,
            "undo" => Command::Undo,
            "redo" => Command::Redo,
            "drop" => Command::Drop,
            "first" => Command::First,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(other.to_string()),
        };
        Ok(Some(command))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    validator: Validator,
    history: History,
    alpha: String,
    beta: String,
}

impl Session {
    #[must_use]
    pub fn new(validator: Validator) -> Self {
        Self {
            validator,
            history: History::new(),
            alpha: String::new(),
            beta: String::new(),
        }
    }

    /// Drive the session until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            let flow = match Command::parse(&line) {
                Ok(Some(command)) => self.execute(command, &mut out)?,
                Ok(None) => Flow::Continue,
                Err(word) => {
                    writeln!(out, "unknown command: {word} (try `help`)")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
        }
        out.flush()?;
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        tracing::trace!(?command, "execute");
        match command {
            Command::Alpha(text) => {
                self.report(&text, out)?;
                self.alpha = text;
            }
            Command::Beta(text) => {
                self.report(&text, out)?;
                self.beta = text;
            }
            Command::Check(text) => self.report(&text, out)?,
            Command::Commit => {
                self.history
                    .push(Snapshot::new(self.alpha.clone(), self.beta.clone()));
                writeln!(out, "committed ({} saved)", self.history.len())?;
            }
            Command::Undo => {
                let restored = self.history.undo().cloned();
                self.restore(restored, out)?;
            }
            Command::Redo => {
                let restored = self.history.redo().cloned();
                self.restore(restored, out)?;
            }
            Command::Drop => {
                let restored = self.history.truncate_at_current().cloned();
                self.restore(restored, out)?;
            }
            Command::First => {
                let restored = self.history.first().cloned();
                self.restore(restored, out)?;
            }
            Command::Show => {
                writeln!(out, "alpha = {}", self.alpha)?;
                writeln!(out, "beta = {}", self.beta)?;
                match self.history.position() {
                    Some(at) => writeln!(out, "history {}/{}", at + 1, self.history.len())?,
                    None => writeln!(out, "history empty")?,
                }
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn report<W: Write>(&self, text: &str, out: &mut W) -> Result<()> {
        match self.validator.validate(text) {
            None => writeln!(out, "ok")?,
            Some(err) => writeln!(out, "{}", diagnostic(&err))?,
        }
        Ok(())
    }

    fn restore<W: Write>(
        &mut self,
        restored: Result<Snapshot, HistoryError>,
        out: &mut W,
    ) -> Result<()> {
        match restored {
            Ok(snapshot) => {
                let (alpha, beta) = snapshot.into_parts();
                writeln!(out, "alpha = {alpha}, beta = {beta}")?;
                self.alpha = alpha;
                self.beta = beta;
            }
            Err(err) => writeln!(out, "error: {err}")?,
        }
        Ok(())
    }
}

/// `error <code>: <message>`
#[must_use]
pub fn diagnostic(err: &ValidationError) -> String {
    format!("error {}: {}", err.code().as_u8(), err.message())
}
