//! Common test utilities for building processes and backends.
use guia::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[allow(dead_code)]
pub const TURNO_PORTAL_MESSAGE: &str = "Para iniciar o processo de mudança de turno, o aluno deverá abrir o requerimento no Portal do Aluno.";

/// The seeded "Mudança de Turno" process.
#[allow(dead_code)]
pub fn turno_process() -> Process {
    seed_processes()
        .into_iter()
        .find(|p| p.id == "1")
        .expect("seed contains process 1")
}

/// Creates a process with `count` yes/no questions, ids `q1..qN`,
/// answers `aN1` (next) and `aN2` (message).
#[allow(dead_code)]
pub fn create_linear_process(id: &str, name: &str, count: usize) -> Process {
    let questions = (1..=count)
        .map(|n| {
            Question::new(
                format!("q{}", n),
                format!("Pergunta {}?", n),
                vec![
                    Answer::next(format!("a{}1", n), "Sim"),
                    Answer::message(format!("a{}2", n), "Não", format!("Instrução {}", n)),
                ],
            )
        })
        .collect();
    Process::new(id, name, questions)
}

/// Creates a small, deliberately unsorted collection.
#[allow(dead_code)]
pub fn create_unsorted_collection() -> Vec<Process> {
    vec![
        create_linear_process("p-z", "zebra", 1),
        create_linear_process("p-m", "Matrícula", 2),
        create_linear_process("p-a", "Aproveitamento", 0),
        create_linear_process("p-b", "bolsa", 3),
    ]
}

#[allow(dead_code)]
pub fn names(processes: &[Process]) -> Vec<&str> {
    processes.iter().map(|p| p.name.as_str()).collect()
}

/// A backend whose reads and writes can be switched to fail.
///
/// Clones share the same storage and switches, so a test can keep a handle
/// while the store owns another.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct FlakyBackend {
    pub inner: Rc<RefCell<MemoryBackend>>,
    pub fail_loads: Rc<Cell<bool>>,
    pub fail_saves: Rc<Cell<bool>>,
}

#[allow(dead_code)]
impl FlakyBackend {
    pub fn with_processes(processes: Vec<Process>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryBackend::with_processes(processes))),
            ..Self::default()
        }
    }

    pub fn stored_len(&self) -> Option<usize> {
        self.inner.borrow().stored().map(|s| s.len())
    }
}

impl Persistence for FlakyBackend {
    fn load(&self) -> std::result::Result<Option<Vec<Process>>, PersistenceError> {
        if self.fail_loads.get() {
            return Err(PersistenceError::Unavailable("load disabled".to_string()));
        }
        self.inner.borrow().load()
    }

    fn save(&mut self, processes: &[Process]) -> std::result::Result<(), PersistenceError> {
        if self.fail_saves.get() {
            return Err(PersistenceError::Unavailable("save disabled".to_string()));
        }
        self.inner.borrow_mut().save(processes)
    }
}
