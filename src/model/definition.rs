use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// What happens when the user picks an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
#[serde(rename_all = "lowercase")]
pub enum AnswerAction {
    /// Advance to the next question, or complete the process on the last one.
    Next,
    /// Stay on the current question and show the answer's instruction.
    Message,
}

impl fmt::Display for AnswerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerAction::Next => write!(f, "next"),
            AnswerAction::Message => write!(f, "message"),
        }
    }
}

impl FromStr for AnswerAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "next" => Ok(AnswerAction::Next),
            "message" => Ok(AnswerAction::Message),
            other => Err(format!(
                "unknown answer action '{}', expected 'next' or 'message'",
                other
            )),
        }
    }
}

/// One selectable option on a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct Answer {
    pub id: String,
    pub text: String,
    pub action: AnswerAction,
    /// Only meaningful for `AnswerAction::Message`, but kept across action
    /// switches so it survives toggling back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Answer {
    pub fn next(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            action: AnswerAction::Next,
            message: None,
        }
    }

    pub fn message(
        id: impl Into<String>,
        text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            action: AnswerAction::Message,
            message: Some(message.into()),
        }
    }

    /// The instruction to show for this answer, if it carries a non-blank one.
    pub fn instruction(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|message| !message.trim().is_empty())
    }
}

/// A single step in a process.
///
/// Answer order is display order only. Traversal order comes from the
/// question's position inside its [`Process`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn new(id: impl Into<String>, text: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            answers,
        }
    }

    pub fn answer(&self, answer_id: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id == answer_id)
    }

    /// A question without answers cannot be passed during traversal.
    pub fn is_dead_end(&self) -> bool {
        self.answers.is_empty()
    }
}

/// A named, ordered sequence of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct Process {
    pub id: String,
    pub name: String,
    pub questions: Vec<Question>,
}

impl Process {
    pub fn new(id: impl Into<String>, name: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            questions,
        }
    }

    /// Creates an empty process with a fresh id and the default name.
    pub fn untitled() -> Self {
        Self::new(fresh_id(), super::defaults::NEW_PROCESS_NAME, Vec::new())
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn position_of(&self, question_id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == question_id)
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Generates a new random identifier for processes, questions and answers.
pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}
