//! Confirmation and prompt dialogs
//!
//! Mutation handlers ask the user through this trait and act on the value it
//! returns, so they never depend on how the question is displayed.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Interactive questions a handler may ask
pub trait Dialog {
    /// Ask a yes/no question; `false` means the user declined
    fn confirm(&mut self, message: &str) -> bool;

    /// Ask for a value; `None` means the user cancelled
    fn prompt(&mut self, message: &str, default: Option<&str>) -> Option<String>;
}

/// Dialog over a line-oriented reader/writer pair (stdin/stdout by default)
pub struct TerminalDialog<R, W> {
    input: R,
    output: W,
}

impl TerminalDialog<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalDialog<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            // EOF counts as cancel
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    fn ask(&mut self, text: &str) -> Option<String> {
        if write!(self.output, "{}", text).and_then(|_| self.output.flush()).is_err() {
            return None;
        }
        self.read_line()
    }
}

impl<R: BufRead, W: Write> Dialog for TerminalDialog<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        self.ask(&format!("{} [y/N] ", message))
            .map(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }

    fn prompt(&mut self, message: &str, default: Option<&str>) -> Option<String> {
        let text = match default {
            Some(default) => format!("{} [{}]: ", message, default),
            None => format!("{}: ", message),
        };
        let answer = self.ask(&text)?;
        if answer.trim().is_empty() {
            default.map(str::to_string)
        } else {
            Some(answer)
        }
    }
}

/// Dialog answering from a preset script
///
/// Used for non-interactive runs (`--yes`) and tests. Once the scripted
/// answers run out, confirmations fall back to `assume_yes` and prompts
/// are cancelled.
#[derive(Debug, Default, Clone)]
pub struct ScriptedDialog {
    confirmations: VecDeque<bool>,
    answers: VecDeque<Option<String>>,
    assume_yes: bool,
    asked: Vec<String>,
}

impl ScriptedDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Confirm everything that is not explicitly scripted
    pub fn assume_yes() -> Self {
        Self {
            assume_yes: true,
            ..Self::default()
        }
    }

    pub fn confirm_with(mut self, answer: bool) -> Self {
        self.confirmations.push_back(answer);
        self
    }

    pub fn answer_with(mut self, answer: Option<&str>) -> Self {
        self.answers.push_back(answer.map(str::to_string));
        self
    }

    /// Every question asked so far, in order
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Dialog for ScriptedDialog {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.confirmations.pop_front().unwrap_or(self.assume_yes)
    }

    fn prompt(&mut self, message: &str, _default: Option<&str>) -> Option<String> {
        self.asked.push(message.to_string());
        self.answers.pop_front().flatten()
    }
}
