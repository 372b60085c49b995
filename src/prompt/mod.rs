//! Interactive prompting
//!
//! Every question the setup asks goes through the [`Prompter`] trait, so the
//! pipeline can run against a terminal, unattended (`--yes`), or a script of
//! answers in tests.

use console::Style;
use inquire::validator::Validation;
use inquire::{Confirm, CustomUserError, InquireError, Text};
use tracing::debug;

use crate::error::{Result, SetupError};

/// Source of operator answers
pub trait Prompter {
    /// Pick one entry of an enumerated menu, returning its zero-based index
    ///
    /// Every menu ends with its skip entry.
    fn select(&mut self, message: &str, options: &[String], default: usize) -> Result<usize>;

    /// Yes/no question
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;
}

/// Parse a numeric menu answer (1-based); empty input picks the default
pub fn parse_menu_choice(input: &str, len: usize, default: usize) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() {
        return (default < len).then_some(default);
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Some(n - 1),
        _ => None,
    }
}

/// Parse a yes/no answer; empty input picks the default
#[cfg(test)]
pub fn parse_confirmation(input: &str, default: bool) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Esc answers `on_cancel`; Ctrl-C and terminal failures stay errors
fn or_cancelled<T>(result: std::result::Result<T, InquireError>, on_cancel: T) -> Result<T> {
    match result {
        Err(InquireError::OperationCanceled) => {
            debug!("prompt cancelled");
            Ok(on_cancel)
        }
        other => Ok(other?),
    }
}

/// Prompts on the terminal with `inquire`
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&mut self, message: &str, options: &[String], default: usize) -> Result<usize> {
        println!();
        println!("{}", Style::new().bold().apply_to(message));
        for (i, option) in options.iter().enumerate() {
            println!("  {}) {}", Style::new().cyan().apply_to(i + 1), option);
        }

        let len = options.len();
        let help = format!("Enter 1-{len}, or press Enter for {}", default + 1);
        let validator = move |input: &str| -> std::result::Result<Validation, CustomUserError> {
            if parse_menu_choice(input, len, default).is_some() {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid(
                    format!("Please enter a number between 1 and {len}").into(),
                ))
            }
        };

        let prompt = Text::new("Choice:")
            .with_help_message(&help)
            .with_validator(validator)
            .prompt()
            .map(Some);
        let Some(answer) = or_cancelled(prompt, None)? else {
            return Ok(len.saturating_sub(1));
        };

        parse_menu_choice(&answer, len, default).ok_or_else(|| SetupError::PromptFailed {
            message: format!("invalid menu answer '{answer}'"),
        })
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        or_cancelled(Confirm::new(message).with_default(default).prompt(), false)
    }
}

/// Answers every question with its documented default
pub struct NonInteractivePrompter;

impl Prompter for NonInteractivePrompter {
    fn select(&mut self, message: &str, options: &[String], default: usize) -> Result<usize> {
        debug!(
            message,
            answer = options.get(default).map(String::as_str),
            "non-interactive menu default"
        );
        Ok(default)
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        debug!(message, default, "non-interactive confirmation default");
        Ok(default)
    }
}

/// Replays a fixed list of typed answers, re-prompting on invalid ones
#[cfg(test)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<String>,
    asked: usize,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: 0,
        }
    }

    /// Number of answers consumed so far
    pub fn asked(&self) -> usize {
        self.asked
    }

    fn next_answer(&mut self, message: &str) -> Result<String> {
        self.asked += 1;
        self.answers
            .pop_front()
            .ok_or_else(|| SetupError::PromptFailed {
                message: format!("no scripted answer left for '{message}'"),
            })
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn select(&mut self, message: &str, options: &[String], default: usize) -> Result<usize> {
        loop {
            let answer = self.next_answer(message)?;
            if let Some(index) = parse_menu_choice(&answer, options.len(), default) {
                return Ok(index);
            }
        }
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        loop {
            let answer = self.next_answer(message)?;
            if let Some(yes) = parse_confirmation(&answer, default) {
                return Ok(yes);
            }
        }
    }
}
