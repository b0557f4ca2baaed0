use crate::model::{Answer, AnswerAction};

/// A change to exactly one field of an [`Answer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerEdit {
    Text(String),
    Action(AnswerAction),
    Message(String),
}

impl AnswerEdit {
    pub(super) fn apply(self, answer: &mut Answer) {
        match self {
            AnswerEdit::Text(text) => answer.text = text,
            // `message` is left alone so it is still there if the action is switched back.
            AnswerEdit::Action(action) => answer.action = action,
            AnswerEdit::Message(message) => answer.message = Some(message),
        }
    }
}
