//! Scripted prompt and probe doubles for unit tests.

use std::collections::{HashMap, VecDeque};

use crate::error::Error;
use crate::probe::Probe;
use crate::prompt::Prompter;

/// Probe answering from a fixed table. Unknown URLs fail like a dead host.
#[derive(Debug, Default)]
pub struct ScriptedProbe {
    /// Status per URL.
    statuses: HashMap<String, u16>,
}

/// Prompter replaying canned answers and recording what was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    /// Remaining yes/no answers.
    confirms: VecDeque<bool>,
    /// Number of confirmations asked.
    confirms_asked: usize,
    /// Remaining line answers.
    lines: VecDeque<String>,
    /// Messages of every line prompt, in order.
    messages: Vec<String>,
}

impl ScriptedProbe {
    /// Probe that knows the given URL statuses.
    pub fn new(statuses: &[(&str, u16)]) -> Self {
        return Self {
            statuses: statuses.iter().map(|(u, s)| return ((*u).to_string(), *s)).collect(),
        };
    }
}

impl Probe for ScriptedProbe {
    fn status(&self, url: &str) -> Result<u16, Error> {
        return self.statuses.get(url).copied().ok_or_else(|| {
            return Error::ProbeFailed {
                reason: "connection refused".to_string(),
                url: url.to_string(),
            };
        });
    }
}

impl ScriptedPrompter {
    /// Prompter that replays `lines` and `confirms` in order.
    pub fn new(lines: &[&str], confirms: &[bool]) -> Self {
        return Self {
            confirms: confirms.iter().copied().collect(),
            lines: lines.iter().map(|l| return (*l).to_string()).collect(),
            ..Self::default()
        };
    }

    /// Number of confirmations asked so far.
    pub const fn confirms_asked(&self) -> usize {
        return self.confirms_asked;
    }

    /// Number of line prompts asked so far.
    pub fn lines_asked(&self) -> usize {
        return self.messages.len();
    }

    /// Messages of the line prompts asked so far.
    pub fn messages(&self) -> &[String] {
        return &self.messages;
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, _message: &str) -> Result<bool, Error> {
        self.confirms_asked += 1;
        return Ok(self.confirms.pop_front().expect("script ran out of confirmations"));
    }

    fn read_line(&mut self, message: &str, _default: Option<&str>) -> Result<String, Error> {
        self.messages.push(message.to_string());
        return Ok(self.lines.pop_front().expect("script ran out of answers"));
    }
}
