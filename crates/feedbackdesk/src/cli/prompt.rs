//! Masked credential prompts.
//!
//! The admin password is read with echo replaced by `*`. On a real terminal
//! this puts the terminal in raw mode through crossterm; when stdin is not a
//! terminal the next line is taken from the caller's reader as-is.

use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

/// Something that can ask the user for a secret.
///
/// Returns `Ok(None)` when the user cancels the prompt.
pub trait SecretPrompt {
    /// Show `prompt` on `out` and read a secret.
    ///
    /// `input` is the reader the caller is already consuming; prompts that
    /// do not talk to the terminal directly must read from it so buffered
    /// lines are not skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    fn read_secret(
        &mut self,
        prompt: &str,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> io::Result<Option<String>>;
}

/// Reads secrets from the controlling terminal with masked echo.
#[derive(Debug)]
pub struct TerminalPrompt {
    masked: bool,
}

impl TerminalPrompt {
    /// Create a prompt that masks input when stdin is a terminal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            masked: io::stdin().is_terminal(),
        }
    }

    /// Create a prompt that always reads a plain line from the caller's input.
    #[must_use]
    pub fn line() -> Self {
        Self { masked: false }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretPrompt for TerminalPrompt {
    fn read_secret(
        &mut self,
        prompt: &str,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> io::Result<Option<String>> {
        write!(out, "{prompt}")?;
        out.flush()?;

        if !self.masked {
            let mut line = String::new();
            let read = input.read_line(&mut line)?;
            return Ok((read > 0).then(|| strip_line_ending(&line).to_string()));
        }

        let _raw = RawModeGuard::enable()?;
        let mut secret = String::new();
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match apply_key(&mut secret, key) {
                KeyOutcome::Continue { echo } => {
                    write!(out, "{echo}")?;
                    out.flush()?;
                }
                KeyOutcome::Submit => {
                    write!(out, "\r\n")?;
                    return Ok(Some(secret));
                }
                KeyOutcome::Cancel => {
                    write!(out, "\r\n")?;
                    return Ok(None);
                }
            }
        }
    }
}

/// Restores cooked mode when dropped, including on early return.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

#[derive(Debug, PartialEq, Eq)]
enum KeyOutcome {
    Continue { echo: &'static str },
    Submit,
    Cancel,
}

fn apply_key(secret: &mut String, key: KeyEvent) -> KeyOutcome {
    match key.code {
        KeyCode::Enter => KeyOutcome::Submit,
        KeyCode::Esc => KeyOutcome::Cancel,
        KeyCode::Char('c' | 'd') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyOutcome::Cancel
        }
        KeyCode::Backspace => {
            if secret.pop().is_some() {
                KeyOutcome::Continue { echo: "\u{8} \u{8}" }
            } else {
                KeyOutcome::Continue { echo: "" }
            }
        }
        KeyCode::Char(c) => {
            secret.push(c);
            KeyOutcome::Continue { echo: "*" }
        }
        _ => KeyOutcome::Continue { echo: "" },
    }
}

pub(crate) fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}
