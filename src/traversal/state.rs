use crate::model::{Answer, AnswerAction, UNDEFINED_ACTION_MESSAGE};

/// The position of a user inside a process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TraversalState {
    /// Index of the question currently shown.
    pub current_index: usize,
    /// Instruction from the last `message` answer, cleared by the next `next` answer.
    pub pending_message: Option<String>,
    /// Set once the last question was answered with a `next` answer.
    pub completed: bool,
}

impl TraversalState {
    pub fn initial() -> Self {
        Self::default()
    }

    /// Applies one answer to the state of a process with `question_count` questions.
    ///
    /// Terminal states and empty processes are left untouched.
    pub fn apply(&mut self, answer: &Answer, question_count: usize) {
        if self.completed || question_count == 0 {
            return;
        }

        match answer.action {
            AnswerAction::Next => {
                self.pending_message = None;
                if self.current_index + 1 >= question_count {
                    self.completed = true;
                } else {
                    self.current_index += 1;
                }
            }
            AnswerAction::Message => {
                let message = answer.instruction().unwrap_or(UNDEFINED_ACTION_MESSAGE);
                self.pending_message = Some(message.to_string());
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::initial();
    }
}
