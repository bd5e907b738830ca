//! Interactive form session.
//!
//! Presents the three draft fields and the Submit / View All / Clear actions
//! as a line-oriented menu. Every action is routed to [`crate::form`]; this
//! module only reads gestures and prints outcomes.

use std::io::{BufRead, Write};

use tracing::error;

use crate::error::{Error, Result};
use crate::form::{self, AdminCredential, Draft};
use crate::storage::FeedbackStore;

use super::prompt::{strip_line_ending, SecretPrompt};
use super::render::render_records;
use super::OutputFormat;

/// Line that ends multi-line feedback input.
pub const FEEDBACK_TERMINATOR: &str = ".";

/// A menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Edit the name field.
    EditName,
    /// Edit the email field.
    EditEmail,
    /// Edit the feedback field.
    EditFeedback,
    /// Submit the draft.
    Submit,
    /// View all stored feedback.
    ViewAll,
    /// Clear the draft.
    Clear,
    /// Leave the form.
    Quit,
}

impl Action {
    /// Parse a menu choice. Accepts the key letter or the full word.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "n" | "name" => Some(Self::EditName),
            "e" | "email" => Some(Self::EditEmail),
            "f" | "feedback" => Some(Self::EditFeedback),
            "s" | "submit" => Some(Self::Submit),
            "v" | "view" => Some(Self::ViewAll),
            "c" | "clear" => Some(Self::Clear),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// One run of the interactive form.
pub struct Session<'a, S: ?Sized, R, W, P> {
    store: &'a S,
    admin: &'a AdminCredential,
    input: R,
    out: W,
    secrets: P,
    format: OutputFormat,
    draft: Draft,
}

impl<'a, S, R, W, P> Session<'a, S, R, W, P>
where
    S: FeedbackStore + ?Sized,
    R: BufRead,
    W: Write,
    P: SecretPrompt,
{
    /// Create a session over the given store and terminal handles.
    pub fn new(
        store: &'a S,
        admin: &'a AdminCredential,
        input: R,
        out: W,
        secrets: P,
        format: OutputFormat,
    ) -> Self {
        Self {
            store,
            admin,
            input,
            out,
            secrets,
            format,
            draft: Draft::default(),
        }
    }

    /// The current draft.
    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Consume the session and return its output handle.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until the user quits or input ends.
    ///
    /// Validation, authorization and storage failures are reported and the
    /// loop continues.
    ///
    /// # Errors
    ///
    /// Returns an error only if the terminal cannot be read or written.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.out, "Customer Feedback Form")?;
        loop {
            self.show_form()?;
            let Some(line) = self.read_line("> ")? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            let Some(action) = Action::parse(&line) else {
                writeln!(self.out, "Unknown choice: {}", line.trim())?;
                continue;
            };
            if action == Action::Quit {
                break;
            }
            self.perform(action)?;
        }
        Ok(())
    }

    /// Apply a single action to the draft.
    ///
    /// # Errors
    ///
    /// Returns an error only if the terminal cannot be read or written.
    pub fn perform(&mut self, action: Action) -> Result<()> {
        match action {
            Action::EditName => {
                if let Some(name) = self.read_line("Enter Your Name: ")? {
                    self.draft.name = name;
                }
            }
            Action::EditEmail => {
                if let Some(email) = self.read_line("Enter Your Email: ")? {
                    self.draft.email = email;
                }
            }
            Action::EditFeedback => {
                writeln!(
                    self.out,
                    "Enter Your Feedback Here... (finish with a line containing only '{FEEDBACK_TERMINATOR}')"
                )?;
                self.draft.feedback = self.read_block()?;
            }
            Action::Submit => self.submit()?,
            Action::ViewAll => self.view_all()?,
            Action::Clear => {
                form::clear(&mut self.draft);
                writeln!(self.out, "Form cleared.")?;
            }
            Action::Quit => {}
        }
        Ok(())
    }

    fn submit(&mut self) -> Result<()> {
        match form::submit(self.store, &mut self.draft) {
            Ok(_) => writeln!(self.out, "Success: Feedback submitted successfully!")?,
            Err(e) => self.report(&e, "Failed to submit feedback")?,
        }
        Ok(())
    }

    fn view_all(&mut self) -> Result<()> {
        let Some(attempt) =
            self.secrets
                .read_secret("Enter Root Password: ", &mut self.input, &mut self.out)?
        else {
            return Ok(());
        };
        match form::authorize_and_list(self.store, self.admin, &attempt) {
            Ok(records) => render_records(&mut self.out, &records, self.format)?,
            Err(e) => self.report(&e, "Failed to retrieve feedback")?,
        }
        Ok(())
    }

    fn report(&mut self, e: &Error, storage_context: &str) -> Result<()> {
        if e.is_storage() {
            error!("{storage_context}: {e}");
            writeln!(self.out, "ERROR! {storage_context}: {e}")?;
        } else {
            writeln!(self.out, "ERROR! {e}")?;
        }
        Ok(())
    }

    fn show_form(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "  Name:     {}", self.draft.name)?;
        writeln!(self.out, "  Email:    {}", self.draft.email)?;
        match self.draft.feedback.lines().count() {
            0 | 1 => writeln!(self.out, "  Feedback: {}", self.draft.feedback)?,
            n => writeln!(
                self.out,
                "  Feedback: {} ({n} lines)",
                self.draft.feedback.lines().next().unwrap_or_default()
            )?,
        }
        writeln!(
            self.out,
            "[n]ame  [e]mail  [f]eedback  [s]ubmit  [v]iew all  [c]lear  [q]uit"
        )?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(&line).to_string()))
    }

    fn read_block(&mut self) -> Result<String> {
        let mut lines = Vec::new();
        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let text = strip_line_ending(&line);
            if text == FEEDBACK_TERMINATOR {
                break;
            }
            lines.push(text.to_string());
        }
        Ok(lines.join("\n"))
    }
}

impl<S: ?Sized, R, W, P> std::fmt::Debug for Session<'_, S, R, W, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("format", &self.format)
            .field("draft", &self.draft)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::prompt::TerminalPrompt;
    use crate::storage::{MemoryStore, SqliteStore, Unavailable};

    use std::io::{self, Cursor};

    /// Hands out scripted answers; `None` simulates a cancelled prompt.
    struct ScriptedSecrets(Vec<Option<String>>);

    impl SecretPrompt for ScriptedSecrets {
        fn read_secret(
            &mut self,
            _prompt: &str,
            _input: &mut dyn BufRead,
            _out: &mut dyn Write,
        ) -> io::Result<Option<String>> {
            Ok(if self.0.is_empty() {
                None
            } else {
                self.0.remove(0)
            })
        }
    }

    fn secrets(answers: &[Option<&str>]) -> ScriptedSecrets {
        ScriptedSecrets(answers.iter().map(|a| a.map(str::to_string)).collect())
    }

    fn run<S: FeedbackStore + ?Sized>(
        store: &S,
        script: &str,
        answers: &[Option<&str>],
    ) -> (String, Draft) {
        let admin = AdminCredential::new(Some("letmein"));
        let mut session = Session::new(
            store,
            &admin,
            Cursor::new(script.to_string()),
            Vec::new(),
            secrets(answers),
            OutputFormat::Plain,
        );
        session.run().unwrap();
        let draft = session.draft().clone();
        (String::from_utf8(session.into_output()).unwrap(), draft)
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(Action::parse("s"), Some(Action::Submit));
        assert_eq!(Action::parse(" View "), Some(Action::ViewAll));
        assert_eq!(Action::parse("Q"), Some(Action::Quit));
        assert_eq!(Action::parse("x"), None);
    }

    #[test]
    fn test_submit_flow() {
        let store = MemoryStore::new();
        let script = "n\nAlice\ne\nalice@example.com\nf\nGreat\nservice\n.\ns\nq\n";

        let (out, draft) = run(&store, script, &[]);

        assert!(out.contains("Success: Feedback submitted successfully!"));
        assert!(draft.is_empty());
        let records = store.list_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].feedback, "Great\nservice");
    }

    #[test]
    fn test_validation_error_keeps_draft() {
        let store = MemoryStore::new();
        let script = "e\nbob@example.com\nf\nHi\n.\ns\nq\n";

        let (out, draft) = run(&store, script, &[]);

        assert!(out.contains("ERROR! All fields are required!"));
        assert_eq!(draft.email, "bob@example.com");
        assert_eq!(draft.feedback, "Hi");
        assert_eq!(store.insert_calls(), 0);
    }

    #[test]
    fn test_invalid_email_message() {
        let store = MemoryStore::new();
        let script = "n\nBob\ne\nbob@nowhere\nf\nHi\n.\ns\nq\n";

        let (out, _) = run(&store, script, &[]);

        assert!(out.contains("ERROR! Please enter a valid email address!"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_action() {
        let store = MemoryStore::new();
        let script = "n\nBob\ne\nbad\nf\nx\n.\nc\nq\n";

        let (out, draft) = run(&store, script, &[]);

        assert!(out.contains("Form cleared."));
        assert!(draft.is_empty());
    }

    #[test]
    fn test_view_all_wrong_password() {
        let store = MemoryStore::new();
        let (out, _) = run(&store, "v\nq\n", &[Some("guess")]);

        assert!(out.contains("ERROR! Incorrect password!"));
        assert!(!out.contains("=== All Feedback Entries ==="));
        assert_eq!(store.list_calls(), 0);
    }

    #[test]
    fn test_view_all_cancelled_prompt() {
        let store = MemoryStore::new();
        let (out, _) = run(&store, "v\nq\n", &[None]);

        assert!(!out.contains("ERROR!"));
        assert_eq!(store.list_calls(), 0);
    }

    #[test]
    fn test_view_all_lists_entries() {
        let store = SqliteStore::open_in_memory().unwrap();
        let script = "n\nAlice\ne\nalice@example.com\nf\nGreat service\n.\ns\nv\nq\n";

        let (out, _) = run(&store, script, &[Some("letmein")]);

        assert!(out.contains("=== All Feedback Entries ==="));
        assert!(out.contains("Name: Alice"));
    }

    #[test]
    fn test_view_all_reads_password_from_piped_input() {
        let store = SqliteStore::open_in_memory().unwrap();
        let admin = AdminCredential::new(Some("hunter2"));
        let script = "n\nAlice\ne\nalice@example.com\nf\nGreat service\n.\ns\nv\nhunter2\nq\n";
        let mut session = Session::new(
            &store,
            &admin,
            Cursor::new(script.to_string()),
            Vec::new(),
            TerminalPrompt::line(),
            OutputFormat::Plain,
        );

        session.run().unwrap();
        let out = String::from_utf8(session.into_output()).unwrap();

        assert!(out.contains("Enter Root Password: "));
        assert!(out.contains("=== All Feedback Entries ==="));
        assert!(out.contains("Name: Alice"));
        assert!(!out.contains("Unknown choice: hunter2"));
    }

    #[test]
    fn test_view_all_piped_input_ends_at_prompt() {
        let store = MemoryStore::new();
        let admin = AdminCredential::new(Some("hunter2"));
        let mut session = Session::new(
            &store,
            &admin,
            Cursor::new("v\n".to_string()),
            Vec::new(),
            TerminalPrompt::line(),
            OutputFormat::Plain,
        );

        session.run().unwrap();
        let out = String::from_utf8(session.into_output()).unwrap();

        assert!(!out.contains("ERROR!"));
        assert_eq!(store.list_calls(), 0);
    }

    #[test]
    fn test_view_all_empty_store() {
        let store = SqliteStore::open_in_memory().unwrap();
        let (out, _) = run(&store, "v\nq\n", &[Some("letmein")]);
        assert!(out.contains("No feedback entries found."));
    }

    #[test]
    fn test_degraded_store_reports_and_keeps_draft() {
        let store = Unavailable::new("cannot open responses.db");
        let script = "n\nAlice\ne\nalice@example.com\nf\nGreat\n.\ns\nq\n";

        let (out, draft) = run(&store, script, &[]);

        assert!(out.contains("ERROR! Failed to submit feedback: storage unavailable"));
        assert_eq!(draft.name, "Alice");
    }

    #[test]
    fn test_unknown_choice_and_eof() {
        let store = MemoryStore::new();
        let (out, _) = run(&store, "zzz\n", &[]);
        assert!(out.contains("Unknown choice: zzz"));
    }
}
