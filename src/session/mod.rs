//! Ties the store, the editor and the player together for one user session.
//!
//! A [`Session`] holds at most one edit [`Draft`] and at most one player
//! [`Traversal`]. Editing operations take an [`EditCapability`] obtained from
//! [`Session::login`]; a logout invalidates it and closes any open sessions.
use crate::editor::{DeleteRequest, Draft};
use crate::error::SessionError;
use crate::model::Process;
use crate::store::{Persistence, ProcessStore};
use crate::traversal::Traversal;
use itertools::Itertools;

mod gate;

pub use gate::{AdminGate, EditCapability};

pub struct Session<P: Persistence> {
    store: ProcessStore<P>,
    gate: AdminGate,
    epoch: u64,
    logged_in: bool,
    editing: Option<Draft>,
    player: Option<Traversal>,
}

impl<P: Persistence> Session<P> {
    pub fn new(store: ProcessStore<P>, gate: AdminGate) -> Self {
        Self {
            store,
            gate,
            epoch: 0,
            logged_in: false,
            editing: None,
            player: None,
        }
    }

    /// Loads the collection through the store. See [`ProcessStore::load`].
    pub fn load(&mut self) -> Result<&[Process], SessionError> {
        Ok(self.store.load()?)
    }

    pub fn store(&self) -> &ProcessStore<P> {
        &self.store
    }

    pub fn processes(&self) -> &[Process] {
        self.store.processes()
    }

    /// Processes whose name contains `term`, ignoring case, in name order.
    pub fn search(&self, term: &str) -> Vec<&Process> {
        let needle = term.trim().to_lowercase();
        self.store
            .processes()
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .collect_vec()
    }

    // --- Admin gate ---

    pub fn login(&mut self, secret: &str) -> Result<EditCapability, SessionError> {
        if !self.gate.check(secret) {
            log::warn!("Rejected admin login attempt");
            return Err(SessionError::WrongSecret);
        }
        self.logged_in = true;
        log::info!("Admin editing unlocked");
        Ok(EditCapability { epoch: self.epoch })
    }

    /// Locks editing again and closes the edit and player sessions.
    pub fn logout(&mut self) {
        self.logged_in = false;
        self.epoch += 1;
        if let Some(draft) = self.editing.take() {
            draft.discard();
        }
        self.player = None;
        log::info!("Admin editing locked");
    }

    pub fn is_admin(&self) -> bool {
        self.logged_in
    }

    fn authorize(&self, capability: &EditCapability) -> Result<(), SessionError> {
        if self.logged_in && capability.epoch == self.epoch {
            Ok(())
        } else {
            Err(SessionError::NotAuthorized)
        }
    }

    // --- Player ---

    /// Starts walking the process with `process_id` from its first question.
    pub fn start(&mut self, process_id: &str) -> Result<&mut Traversal, SessionError> {
        let process = self
            .store
            .get(process_id)
            .cloned()
            .ok_or_else(|| SessionError::ProcessNotFound(process_id.to_string()))?;
        log::debug!("Starting traversal of '{}'", process.name);
        Ok(self.player.insert(Traversal::new(process)))
    }

    pub fn player(&self) -> Option<&Traversal> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut Traversal> {
        self.player.as_mut()
    }

    pub fn close_player(&mut self) {
        self.player = None;
    }

    // --- Editor ---

    /// Adds an untitled process to the store and opens it for editing.
    ///
    /// If the store could not persist the new process it is still added in
    /// memory and the draft is still opened; the save error is returned.
    pub fn create_process(
        &mut self,
        capability: &EditCapability,
    ) -> Result<&mut Draft, SessionError> {
        self.authorize(capability)?;
        let process = Process::untitled();
        let draft = Draft::new(&process);
        log::info!("Created process '{}'", process.id);
        let saved = self.store.upsert(process);
        let draft = self.editing.insert(draft);
        saved?;
        Ok(draft)
    }

    /// Opens a working copy of a stored process, replacing any open draft.
    pub fn begin_edit(
        &mut self,
        capability: &EditCapability,
        process_id: &str,
    ) -> Result<&mut Draft, SessionError> {
        self.authorize(capability)?;
        let process = self
            .store
            .get(process_id)
            .ok_or_else(|| SessionError::ProcessNotFound(process_id.to_string()))?;
        if let Some(previous) = self.editing.take() {
            log::warn!(
                "Discarding unsaved draft of '{}' to edit '{}'",
                previous.process_id(),
                process_id
            );
            previous.discard();
        }
        Ok(self.editing.insert(Draft::new(process)))
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.editing.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        self.editing.as_mut()
    }

    /// Commits the open draft into the store.
    ///
    /// The draft is closed even when persisting fails, because the store
    /// already holds the change in memory.
    pub fn save_edit(&mut self, capability: &EditCapability) -> Result<(), SessionError> {
        self.authorize(capability)?;
        let draft = self.editing.take().ok_or(SessionError::NoActiveEdit)?;
        self.store.upsert(draft.commit())?;
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        if let Some(draft) = self.editing.take() {
            draft.discard();
        }
    }

    /// Asks to delete a stored process. Nothing is removed until the request is confirmed.
    pub fn request_delete(
        &self,
        capability: &EditCapability,
        process_id: &str,
    ) -> Result<DeleteRequest, SessionError> {
        self.authorize(capability)?;
        self.store
            .get(process_id)
            .map(DeleteRequest::for_process)
            .ok_or_else(|| SessionError::ProcessNotFound(process_id.to_string()))
    }

    /// Removes the process named by a confirmed request, closing any edit or
    /// player session that refers to it. Returns whether it was still stored.
    pub fn confirm_delete(
        &mut self,
        capability: &EditCapability,
        request: DeleteRequest,
    ) -> Result<bool, SessionError> {
        self.authorize(capability)?;
        let id = request.process_id();
        self.evict(|process_id| process_id == id);
        Ok(self.store.remove(id)?)
    }

    // --- Import / export ---

    /// Replaces the whole collection from a JSON payload. Returns the new size.
    ///
    /// Open sessions on processes that are no longer present are closed.
    pub fn import_json(
        &mut self,
        capability: &EditCapability,
        json: &str,
    ) -> Result<usize, SessionError> {
        self.authorize(capability)?;
        let result = self.store.import_json(json);
        let store = &self.store;
        let orphaned = |id: &str| store.get(id).is_none();
        let orphaned_draft = self.editing.as_ref().is_some_and(|d| orphaned(d.process_id()));
        let orphaned_player = self.player.as_ref().is_some_and(|t| orphaned(&t.process().id));
        if orphaned_draft {
            self.cancel_edit();
        }
        if orphaned_player {
            self.close_player();
        }
        Ok(result?)
    }

    pub fn export_json(&self) -> Result<String, SessionError> {
        Ok(self.store.export_json()?)
    }

    fn evict(&mut self, matches: impl Fn(&str) -> bool) {
        if self.editing.as_ref().is_some_and(|d| matches(d.process_id())) {
            self.cancel_edit();
        }
        if self.player.as_ref().is_some_and(|t| matches(&t.process().id)) {
            self.close_player();
        }
    }
}
