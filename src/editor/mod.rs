//! Working-copy editing of a single process.
//!
//! A [`Draft`] starts as a deep copy of a committed [`Process`]. Every edit
//! changes only the draft, so readers of the store never see a half-finished
//! process. [`Draft::commit`] hands the finished process back for the store to
//! upsert, and [`Draft::discard`] throws it away.
//!
//! Operations that name an unknown question or answer leave the draft as it is
//! and report `false` (or `None`).
use crate::model::{
    Answer, NEW_ANSWER_MESSAGE, NEW_ANSWER_TEXT, NEW_QUESTION_MESSAGE, NEW_QUESTION_MESSAGE_TEXT,
    NEW_QUESTION_NEXT_TEXT, NEW_QUESTION_TEXT, Process, Question, fresh_id,
};

mod field;

pub use field::AnswerEdit;

/// An in-progress edit of one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    working: Process,
}

/// Intent to delete a whole process, pending user confirmation.
///
/// The store only removes the process once the caller confirms this request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a delete request does nothing until it is confirmed"]
pub struct DeleteRequest {
    process_id: String,
    process_name: String,
}

impl DeleteRequest {
    pub(crate) fn for_process(process: &Process) -> Self {
        Self {
            process_id: process.id.clone(),
            process_name: process.name.clone(),
        }
    }

    pub fn process_id(&self) -> &str {
        &self.process_id
    }

    pub fn process_name(&self) -> &str {
        &self.process_name
    }

    /// The question to put to the user before confirming.
    pub fn prompt(&self) -> String {
        format!(
            "Tem certeza que deseja excluir o processo \"{}\"? Esta ação não pode ser desfeita.",
            self.process_name
        )
    }
}

impl Draft {
    /// Starts an edit session on a private copy of `process`.
    pub fn new(process: &Process) -> Self {
        Self {
            working: process.clone(),
        }
    }

    pub fn process(&self) -> &Process {
        &self.working
    }

    pub fn process_id(&self) -> &str {
        &self.working.id
    }

    pub fn rename_process(&mut self, new_name: impl Into<String>) {
        self.working.name = new_name.into();
    }

    /// Appends a question seeded with a `next` answer and a `message` answer.
    /// Returns the new question's id.
    pub fn add_question(&mut self) -> String {
        let question = Question::new(
            fresh_id(),
            NEW_QUESTION_TEXT,
            vec![
                Answer::next(fresh_id(), NEW_QUESTION_NEXT_TEXT),
                Answer::message(fresh_id(), NEW_QUESTION_MESSAGE_TEXT, NEW_QUESTION_MESSAGE),
            ],
        );
        let id = question.id.clone();
        self.working.questions.push(question);
        id
    }

    pub fn edit_question_text(&mut self, question_id: &str, text: impl Into<String>) -> bool {
        match self.question_mut(question_id) {
            Some(question) => {
                question.text = text.into();
                true
            }
            None => false,
        }
    }

    /// Removes a question. Other questions keep their ids; numbering is positional.
    pub fn delete_question(&mut self, question_id: &str) -> bool {
        let before = self.working.questions.len();
        self.working.questions.retain(|q| q.id != question_id);
        self.working.questions.len() != before
    }

    /// Moves `source_id` to the index `target_id` had before the move.
    ///
    /// Does nothing when both ids are equal or either one is unknown.
    pub fn reorder_question(&mut self, source_id: &str, target_id: &str) -> bool {
        if source_id == target_id {
            return false;
        }
        let (Some(source_index), Some(target_index)) = (
            self.working.position_of(source_id),
            self.working.position_of(target_id),
        ) else {
            return false;
        };

        let moved = self.working.questions.remove(source_index);
        self.working.questions.insert(target_index, moved);
        true
    }

    /// Appends a default `message` answer. Returns its id.
    pub fn add_answer(&mut self, question_id: &str) -> Option<String> {
        let question = self.question_mut(question_id)?;
        let answer = Answer::message(fresh_id(), NEW_ANSWER_TEXT, NEW_ANSWER_MESSAGE);
        let id = answer.id.clone();
        question.answers.push(answer);
        Some(id)
    }

    pub fn edit_answer_field(
        &mut self,
        question_id: &str,
        answer_id: &str,
        edit: AnswerEdit,
    ) -> bool {
        let Some(answer) = self
            .question_mut(question_id)
            .and_then(|q| q.answers.iter_mut().find(|a| a.id == answer_id))
        else {
            return false;
        };
        edit.apply(answer);
        true
    }

    /// Removes an answer. A question may be left with no answers at all.
    pub fn delete_answer(&mut self, question_id: &str, answer_id: &str) -> bool {
        let Some(question) = self.question_mut(question_id) else {
            return false;
        };
        let before = question.answers.len();
        question.answers.retain(|a| a.id != answer_id);
        question.answers.len() != before
    }

    /// Ends the session, yielding the revised process for the store.
    pub fn commit(self) -> Process {
        log::debug!(
            "Committing draft of process '{}' ({} questions)",
            self.working.id,
            self.working.questions.len()
        );
        self.working
    }

    /// Ends the session without keeping any change.
    pub fn discard(self) {
        log::debug!("Discarding draft of process '{}'", self.working.id);
    }

    pub fn request_delete(&self) -> DeleteRequest {
        DeleteRequest::for_process(&self.working)
    }

    fn question_mut(&mut self, question_id: &str) -> Option<&mut Question> {
        self.working.questions.iter_mut().find(|q| q.id == question_id)
    }
}
