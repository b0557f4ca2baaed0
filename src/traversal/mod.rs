//! Walks a process question by question.
//!
//! A [`Traversal`] holds its own read-only copy of a [`Process`] and a
//! [`TraversalState`]. Answers with [`AnswerAction::Next`](crate::model::AnswerAction)
//! move forward until the last question completes the process, while
//! `message` answers keep the user on the same question and surface an
//! instruction instead.
use crate::model::{Answer, Process, Question};
use std::fmt;

mod state;

pub use state::TraversalState;

/// What a player should currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<'a> {
    /// The process has no questions.
    NoContent,
    /// A question is waiting for an answer.
    Question {
        /// One-based position, as shown to the user.
        number: usize,
        question: &'a Question,
        /// Instruction left by the last `message` answer.
        message: Option<&'a str>,
    },
    /// Every question was answered with a `next` answer.
    Completed,
}

impl fmt::Display for Step<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::NoContent => write!(f, "Este processo ainda não possui perguntas."),
            Step::Question {
                number,
                question,
                message,
            } => {
                write!(f, "Passo {}: {}", number, question.text)?;
                if question.is_dead_end() {
                    write!(f, "\n(Nenhuma resposta cadastrada para esta pergunta.)")?;
                }
                if let Some(message) = message {
                    write!(f, "\nInstrução: {}", message)?;
                }
                Ok(())
            }
            Step::Completed => write!(
                f,
                "Processo Concluído com Sucesso! Todos os passos foram verificados."
            ),
        }
    }
}

/// A single user's walk through one process.
#[derive(Debug, Clone)]
pub struct Traversal {
    process: Process,
    state: TraversalState,
}

impl Traversal {
    pub fn new(process: Process) -> Self {
        Self {
            process,
            state: TraversalState::initial(),
        }
    }

    pub fn process(&self) -> &Process {
        &self.process
    }

    pub fn state(&self) -> &TraversalState {
        &self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state.completed
    }

    /// The question currently shown, or `None` for empty or completed processes.
    pub fn current_question(&self) -> Option<&Question> {
        if self.state.completed {
            return None;
        }
        self.process.questions.get(self.state.current_index)
    }

    pub fn step(&self) -> Step<'_> {
        if self.process.questions.is_empty() {
            return Step::NoContent;
        }
        if self.state.completed {
            return Step::Completed;
        }
        match self.process.questions.get(self.state.current_index) {
            Some(question) => Step::Question {
                number: self.state.current_index + 1,
                question,
                message: self.state.pending_message.as_deref(),
            },
            None => Step::NoContent,
        }
    }

    /// Applies an answer chosen by the user.
    pub fn select_answer(&mut self, answer: &Answer) -> &TraversalState {
        self.state.apply(answer, self.process.questions.len());
        log::debug!(
            "Process '{}': answer '{}' ({}) -> index {}, completed {}",
            self.process.id,
            answer.id,
            answer.action,
            self.state.current_index,
            self.state.completed
        );
        &self.state
    }

    /// Looks up `answer_id` on the current question and applies it.
    ///
    /// Returns `false` when there is no current question or it has no such answer.
    pub fn select_answer_id(&mut self, answer_id: &str) -> bool {
        let answer = match self.current_question().and_then(|q| q.answer(answer_id)) {
            Some(answer) => answer.clone(),
            None => return false,
        };
        self.select_answer(&answer);
        true
    }

    /// Returns to the first question, from any state.
    pub fn restart(&mut self) {
        self.state.reset();
    }
}
