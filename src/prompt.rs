//! Interactive prompting
//!
//! The [`Prompter`] trait is the seam between the question sequence and the terminal.
//! [`DialoguerPrompter`] is the terminal implementation; tests drive the sequence with
//! scripted prompters instead.

mod questions;
mod sequencer;

pub use questions::{questions, Answer, ChoiceOption, Field, Question, QuestionContext, QuestionKind};
pub use sequencer::{Answers, PromptSequencer, CONFIRM_MESSAGE};

use crate::error::EzbxError;
use dialoguer::{Error as DialoguerError, Input, Select};
use std::io::ErrorKind;

/// Terminal collaborator used by the question sequence.
///
/// `Ok(None)` means the operator canceled the prompt (Esc, Ctrl-C).
pub trait Prompter {
    /// Ask the operator to pick one of `items`; returns the selected index.
    fn select(&self, message: &str, items: &[String]) -> Result<Option<usize>, EzbxError>;

    /// Ask for free text. An empty answer is replaced by `default` when one is given.
    fn input(
        &self,
        message: &str,
        default: Option<&str>,
        allow_empty: bool,
    ) -> Result<Option<String>, EzbxError>;
}

/// Name and version of the running program, used for the app-name default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub name: String,
    pub version: String,
}

impl Default for ProgramInfo {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// [`Prompter`] backed by `dialoguer` widgets on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn select(&self, message: &str, items: &[String]) -> Result<Option<usize>, EzbxError> {
        match Select::new()
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact_opt()
        {
            Ok(selection) => Ok(selection),
            Err(err) => cancel_or_error(err),
        }
    }

    fn input(
        &self,
        message: &str,
        default: Option<&str>,
        allow_empty: bool,
    ) -> Result<Option<String>, EzbxError> {
        let mut input = Input::<String>::new()
            .with_prompt(message)
            .allow_empty(allow_empty);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        match input.interact_text() {
            Ok(value) => Ok(Some(value)),
            Err(err) => cancel_or_error(err),
        }
    }
}

fn cancel_or_error<T>(err: DialoguerError) -> Result<Option<T>, EzbxError> {
    match err {
        DialoguerError::IO(io) if io.kind() == ErrorKind::Interrupted => Ok(None),
        err => Err(EzbxError::Prompt(format!("Failed to get user input: {}", err))),
    }
}
