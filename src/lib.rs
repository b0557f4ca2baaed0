//! # Guia - Process Guide Builder and Traversal Engine
//!
//! **Guia** models institutional processes as ordered lists of questions.
//! Administrators author the questions and their answers; users then walk a
//! process one question at a time until they either finish it or hit an
//! answer that stops them with an instruction.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: Create a [`ProcessStore`](store::ProcessStore) over a
//!     [`Persistence`](store::Persistence) backend and call `load()`. An empty
//!     backend is seeded with a default collection.
//! 2.  **Play**: Hand a process to a [`Traversal`](traversal::Traversal) and feed it
//!     the answers the user picks. `next` answers advance, `message` answers keep
//!     the user on the same question and surface an instruction.
//! 3.  **Edit**: Open a [`Draft`](editor::Draft) on a process, change its questions
//!     and answers, then `commit()` it back into the store, which keeps the
//!     collection sorted by name.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use guia::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut store = ProcessStore::new(MemoryBackend::new(), seed_processes());
//!     store.load()?;
//!
//!     // Walk the seeded "Mudança de Turno" process.
//!     let process = store.get("1").cloned().ok_or("seed process missing")?;
//!     let mut traversal = Traversal::new(process);
//!     println!("{}", traversal.step());
//!
//!     traversal.select_answer_id("a12"); // "Não"
//!     println!("{}", traversal.step());
//!
//!     // Edit a copy and commit it back.
//!     let mut draft = Draft::new(traversal.process());
//!     draft.rename_process("Mudança de Turno (2025)");
//!     let question_id = draft.add_question();
//!     draft.edit_question_text(&question_id, "O aluno anexou os documentos?");
//!     store.upsert(draft.commit())?;
//!
//!     println!("{}", store.export_json()?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod prelude;
pub mod session;
pub mod store;
pub mod traversal;
