//! Runs the question list against a [`Prompter`] in a single forward pass.

use super::questions::{questions, Answer, Field, Question, QuestionContext, QuestionKind};
use super::{ProgramInfo, Prompter};
use crate::error::EzbxError;
use crate::params::Action;
use crate::profile::ProfileSet;
use tracing::debug;

pub const CONFIRM_MESSAGE: &str = "Confirm (y/n)";

/// Answers collected so far. Skipped questions leave their slot empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    pub action: Option<Action>,
    pub unmap: Option<bool>,
    pub profile_key: Option<String>,
    pub app_name: Option<String>,
    pub old_app_name: Option<String>,
    pub build_directory: Option<String>,
    pub build_command: Option<String>,
}

impl Answers {
    fn record(&mut self, field: Field, answer: Answer) -> Result<(), EzbxError> {
        match (field, answer) {
            (Field::Action, Answer::Action(action)) => self.action = Some(action),
            (Field::Unmap, Answer::Flag(unmap)) => self.unmap = Some(unmap),
            (Field::ProfileKey, Answer::Text(key)) => self.profile_key = Some(key),
            (Field::AppName, Answer::Text(value)) => self.app_name = Some(value),
            (Field::OldAppName, Answer::Text(value)) => self.old_app_name = Some(value),
            (Field::BuildDirectory, Answer::Text(value)) => self.build_directory = Some(value),
            (Field::BuildCommand, Answer::Text(value)) => self.build_command = Some(value),
            (field, answer) => {
                return Err(EzbxError::Prompt(format!(
                    "Answer {:?} does not fit question {:?}",
                    answer, field
                )))
            }
        }
        Ok(())
    }
}

/// Asks the parameter questions, then the confirmation, through a [`Prompter`].
pub struct PromptSequencer<'a, P: Prompter> {
    prompter: &'a P,
    ctx: QuestionContext<'a>,
}

impl<'a, P: Prompter> PromptSequencer<'a, P> {
    pub fn new(prompter: &'a P, profiles: &'a ProfileSet, program: &'a ProgramInfo) -> Self {
        Self {
            prompter,
            ctx: QuestionContext { profiles, program },
        }
    }

    /// Ask every visible parameter question in order.
    ///
    /// Canceling any prompt aborts the whole sequence with [`EzbxError::UserAbort`].
    pub fn collect(&self) -> Result<Answers, EzbxError> {
        let mut answers = Answers::default();
        for question in questions() {
            if !question.is_visible(&self.ctx, &answers) {
                debug!(field = ?question.field, "Skipping question");
                continue;
            }
            let answer = self.ask(question, &answers)?;
            debug!(field = ?question.field, "Question answered");
            answers.record(question.field, answer)?;
        }
        Ok(answers)
    }

    /// Ask the free-text confirmation. Empty answers are allowed.
    pub fn confirm(&self) -> Result<String, EzbxError> {
        self.prompter
            .input(CONFIRM_MESSAGE, None, true)?
            .ok_or_else(EzbxError::user_abort)
    }

    fn ask(&self, question: &Question, answers: &Answers) -> Result<Answer, EzbxError> {
        let message = (question.message)(answers);
        match question.kind {
            QuestionKind::SingleChoice(options) => {
                let mut options = options(&self.ctx, answers);
                let labels: Vec<String> = options.iter().map(|o| o.label.clone()).collect();
                let index = self
                    .prompter
                    .select(message, &labels)?
                    .ok_or_else(EzbxError::user_abort)?;
                if index >= options.len() {
                    return Err(EzbxError::Prompt(format!(
                        "Selection {} out of range for '{}'",
                        index, message
                    )));
                }
                Ok(options.swap_remove(index).value)
            }
            QuestionKind::FreeText { default } => {
                let default = default.and_then(|default| default(&self.ctx, answers));
                let value = self
                    .prompter
                    .input(message, default.as_deref(), false)?
                    .ok_or_else(EzbxError::user_abort)?;
                Ok(Answer::Text(value))
            }
        }
    }
}
