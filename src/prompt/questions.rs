//! Ordered question descriptors.
//!
//! Each question carries pure functions over the answers collected so far: a visibility
//! predicate, the prompt message, and (for choices) the options or (for text) the default.
//! None of them look at later questions, so the sequence is a single forward pass.

use super::sequencer::Answers;
use super::ProgramInfo;
use crate::params::Action;
use crate::profile::{non_empty, ConfigProfile, ProfileSet};

/// Answer slot a question fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Action,
    Unmap,
    ProfileKey,
    AppName,
    OldAppName,
    BuildDirectory,
    BuildCommand,
}

/// Value produced by one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Action(Action),
    Flag(bool),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub label: String,
    pub value: Answer,
}

/// Read-only inputs the questions may consult besides the answers.
#[derive(Debug, Clone, Copy)]
pub struct QuestionContext<'a> {
    pub profiles: &'a ProfileSet,
    pub program: &'a ProgramInfo,
}

impl<'a> QuestionContext<'a> {
    /// Profile chosen by the config-key question, once answered.
    pub fn selected(&self, answers: &Answers) -> Option<&'a ConfigProfile> {
        let key = answers.profile_key.as_deref()?;
        self.profiles.resolve(key).ok()
    }
}

type Predicate = fn(&QuestionContext<'_>, &Answers) -> bool;
type Options = fn(&QuestionContext<'_>, &Answers) -> Vec<ChoiceOption>;
type DefaultValue = fn(&QuestionContext<'_>, &Answers) -> Option<String>;

#[derive(Clone, Copy)]
pub enum QuestionKind {
    SingleChoice(Options),
    FreeText { default: Option<DefaultValue> },
}

#[derive(Clone, Copy)]
pub struct Question {
    pub field: Field,
    pub message: fn(&Answers) -> &'static str,
    pub kind: QuestionKind,
    pub visible: Option<Predicate>,
}

impl Question {
    pub fn is_visible(&self, ctx: &QuestionContext<'_>, answers: &Answers) -> bool {
        self.visible.map_or(true, |visible| visible(ctx, answers))
    }
}

impl std::fmt::Debug for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Question")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

static QUESTIONS: [Question; 7] = [
    Question {
        field: Field::Action,
        message: action_message,
        kind: QuestionKind::SingleChoice(action_options),
        visible: None,
    },
    Question {
        field: Field::Unmap,
        message: unmap_message,
        kind: QuestionKind::SingleChoice(unmap_options),
        visible: Some(is_route),
    },
    Question {
        field: Field::ProfileKey,
        message: profile_message,
        kind: QuestionKind::SingleChoice(profile_options),
        visible: None,
    },
    Question {
        field: Field::AppName,
        message: app_name_message,
        kind: QuestionKind::FreeText {
            default: Some(default_app_name),
        },
        visible: None,
    },
    Question {
        field: Field::OldAppName,
        message: old_app_name_message,
        kind: QuestionKind::FreeText { default: None },
        visible: Some(is_route_with_unmap),
    },
    Question {
        field: Field::BuildDirectory,
        message: build_directory_message,
        kind: QuestionKind::FreeText { default: None },
        visible: Some(needs_build_directory),
    },
    Question {
        field: Field::BuildCommand,
        message: build_command_message,
        kind: QuestionKind::FreeText { default: None },
        visible: Some(needs_build_command),
    },
];

/// The parameter questions in the order they are asked.
pub fn questions() -> &'static [Question] {
    &QUESTIONS
}

fn action_message(_: &Answers) -> &'static str {
    "Action"
}

fn unmap_message(_: &Answers) -> &'static str {
    "Unmap"
}

fn profile_message(_: &Answers) -> &'static str {
    "Config"
}

fn app_name_message(answers: &Answers) -> &'static str {
    if answers.action == Some(Action::Route) {
        "New App Name"
    } else {
        "App Name"
    }
}

fn old_app_name_message(_: &Answers) -> &'static str {
    "Old App Name"
}

fn build_directory_message(_: &Answers) -> &'static str {
    "Build Directory"
}

fn build_command_message(_: &Answers) -> &'static str {
    "Build Command"
}

fn action_options(_: &QuestionContext<'_>, _: &Answers) -> Vec<ChoiceOption> {
    Action::ALL
        .iter()
        .map(|action| ChoiceOption {
            label: action.as_str().to_string(),
            value: Answer::Action(*action),
        })
        .collect()
}

fn unmap_options(_: &QuestionContext<'_>, _: &Answers) -> Vec<ChoiceOption> {
    vec![
        ChoiceOption {
            label: "map & unmap".to_string(),
            value: Answer::Flag(true),
        },
        ChoiceOption {
            label: "map only".to_string(),
            value: Answer::Flag(false),
        },
    ]
}

fn profile_options(ctx: &QuestionContext<'_>, _: &Answers) -> Vec<ChoiceOption> {
    ctx.profiles
        .choices()
        .into_iter()
        .map(|choice| ChoiceOption {
            label: choice.label,
            value: Answer::Text(choice.key),
        })
        .collect()
}

fn default_app_name(ctx: &QuestionContext<'_>, answers: &Answers) -> Option<String> {
    let base = ctx
        .selected(answers)
        .and_then(ConfigProfile::app_name)
        .or_else(|| non_empty(Some(ctx.program.name.as_str())))?;
    let version = non_empty(Some(ctx.program.version.as_str()))?;
    Some(format!("{}-{}", base, version))
}

fn is_route(_: &QuestionContext<'_>, answers: &Answers) -> bool {
    answers.action == Some(Action::Route)
}

fn is_route_with_unmap(_: &QuestionContext<'_>, answers: &Answers) -> bool {
    answers.action == Some(Action::Route) && answers.unmap == Some(true)
}

fn needs_build_directory(ctx: &QuestionContext<'_>, answers: &Answers) -> bool {
    answers.action == Some(Action::Deploy)
        && ctx
            .selected(answers)
            .and_then(ConfigProfile::build_directory)
            .is_none()
}

fn needs_build_command(ctx: &QuestionContext<'_>, answers: &Answers) -> bool {
    answers.action == Some(Action::Deploy)
        && ctx
            .selected(answers)
            .and_then(ConfigProfile::build_command)
            .is_none()
}
