//! Interactive input: a line prompt with a default, and yes/no confirmation.

use dialoguer::{Confirm, Input};

use crate::error::Error;

/// Source of interactive answers.
pub trait Prompter {
    /// Ask a yes/no question. Declining is the default.
    ///
    /// # Errors
    ///
    /// Returns `Error::Prompt` if input cannot be read.
    fn confirm(&mut self, message: &str) -> Result<bool, Error>;

    /// Ask for one line of text. Returns the raw answer, which may be empty.
    ///
    /// # Errors
    ///
    /// Returns `Error::Prompt` if input cannot be read.
    fn read_line(&mut self, message: &str, default: Option<&str>) -> Result<String, Error>;
}

/// Prompter reading from the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, message: &str) -> Result<bool, Error> {
        return Ok(Confirm::new().with_prompt(message).default(false).interact()?);
    }

    fn read_line(&mut self, message: &str, default: Option<&str>) -> Result<String, Error> {
        let mut input = Input::<String>::new().with_prompt(message).allow_empty(true);
        if let Some(d) = default {
            input = input.default(d.to_string()).show_default(true);
        }
        return Ok(input.interact_text()?);
    }
}

/// Ask until `accept` approves an answer.
///
/// The answer is trimmed and an empty answer is replaced by `default` before
/// `accept` sees it. `accept` gets the prompter back so it can ask follow-up
/// confirmations.
///
/// # Errors
///
/// Returns `Error::Prompt` if input cannot be read, or any error from `accept`.
pub fn prompt<P, F>(
    prompter: &mut P,
    message: &str,
    default: Option<&str>,
    mut accept: F,
) -> Result<String, Error>
where
    P: Prompter + ?Sized,
    F: FnMut(&mut P, &str) -> Result<bool, Error>,
{
    loop {
        let raw = prompter.read_line(message, default)?;
        let answer = match raw.trim() {
            "" => default.unwrap_or("").to_string(),
            trimmed => trimmed.to_string(),
        };

        if accept(prompter, &answer)? {
            return Ok(answer);
        }
        tracing::debug!(%answer, "answer rejected, asking again");
    }
}
