//! Integration tests for guia
//!
//! End-to-end tests that drive a `Session` over real backends.
//!
mod common;
use common::*;
use guia::prelude::*;
use std::fs;

fn memory_session() -> Session<MemoryBackend> {
    let store = ProcessStore::new(MemoryBackend::new(), seed_processes());
    let mut session = Session::new(store, AdminGate::default());
    session.load().expect("memory backend loads");
    session
}

#[cfg(test)]
mod session_tests {
    use super::*;

    #[test]
    fn test_login_and_logout() {
        let mut session = memory_session();
        assert!(!session.is_admin());
        assert!(matches!(session.login("wrong"), Err(SessionError::WrongSecret)));

        let capability = session.login("admin").expect("correct secret");
        assert!(session.is_admin());
        session.begin_edit(&capability, "1").expect("editable");

        session.logout();
        assert!(!session.is_admin());
        assert!(session.draft().is_none());

        // A capability from before the logout no longer works.
        assert!(matches!(
            session.begin_edit(&capability, "1"),
            Err(SessionError::NotAuthorized)
        ));
        let fresh = session.login("admin").expect("correct secret");
        assert!(session.begin_edit(&fresh, "1").is_ok());
    }

    #[test]
    fn test_edit_is_isolated_until_save() {
        let mut session = memory_session();
        let capability = session.login("admin").expect("login");

        let draft = session.begin_edit(&capability, "1").expect("editable");
        draft.rename_process("Turno Renomeado");
        draft.add_question();

        let stored = session.store().get("1").expect("stored");
        assert_eq!(stored.name, "Mudança de Turno");
        assert_eq!(stored.questions.len(), 3);

        session.save_edit(&capability).expect("saved");
        let stored = session.store().get("1").expect("stored");
        assert_eq!(stored.name, "Turno Renomeado");
        assert_eq!(stored.questions.len(), 4);
        assert!(session.draft().is_none());
        assert_eq!(session.store().backend().stored(), Some(session.processes()));
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut session = memory_session();
        let capability = session.login("admin").expect("login");
        session
            .begin_edit(&capability, "1")
            .expect("editable")
            .delete_question("q1");
        session.cancel_edit();

        assert_eq!(session.store().get("1"), Some(&turno_process()));
        assert!(matches!(
            session.save_edit(&capability),
            Err(SessionError::NoActiveEdit)
        ));
    }

    #[test]
    fn test_create_process_opens_untitled_draft() {
        let mut session = memory_session();
        let capability = session.login("admin").expect("login");

        let draft = session.create_process(&capability).expect("created");
        let id = draft.process_id().to_string();
        assert_eq!(draft.process().name, "Novo Processo Sem Título");
        assert!(draft.process().questions.is_empty());
        draft.add_question();

        // The untitled process is already stored, still empty.
        assert_eq!(session.processes().len(), 2);
        assert!(session.store().get(&id).expect("stored").questions.is_empty());

        session.save_edit(&capability).expect("saved");
        assert_eq!(session.store().get(&id).expect("stored").questions.len(), 1);
        assert_eq!(
            names(session.processes()),
            vec!["Mudança de Turno", "Novo Processo Sem Título"]
        );
    }

    #[test]
    fn test_delete_requires_confirmation_and_evicts_sessions() {
        let mut session = memory_session();
        let capability = session.login("admin").expect("login");

        session.start("1").expect("playable");
        let request = session
            .begin_edit(&capability, "1")
            .expect("editable")
            .request_delete();

        // Asking is not deleting.
        assert!(session.store().get("1").is_some());
        assert!(session.draft().is_some());
        assert!(session.player().is_some());

        assert!(session.confirm_delete(&capability, request).expect("removed"));
        assert!(session.store().get("1").is_none());
        assert!(session.draft().is_none());
        assert!(session.player().is_none());
    }

    #[test]
    fn test_delete_leaves_unrelated_sessions() {
        let mut session = memory_session();
        let capability = session.login("admin").expect("login");
        let other_id = session
            .create_process(&capability)
            .expect("created")
            .process_id()
            .to_string();
        session.cancel_edit();

        session.start("1").expect("playable");
        let request = session.request_delete(&capability, &other_id).expect("exists");
        session.confirm_delete(&capability, request).expect("removed");

        assert!(session.player().is_some());
        assert_eq!(session.processes().len(), 1);
    }

    #[test]
    fn test_player_walks_seed_process() {
        let mut session = memory_session();
        let player = session.start("1").expect("playable");
        player.select_answer_id("a12");
        assert_eq!(
            player.state().pending_message.as_deref(),
            Some(TURNO_PORTAL_MESSAGE)
        );
        for id in ["a11", "a21", "a31"] {
            player.select_answer_id(id);
        }
        assert!(player.is_completed());

        assert!(matches!(
            session.start("missing"),
            Err(SessionError::ProcessNotFound(_))
        ));
    }

    #[test]
    fn test_search_is_case_insensitive_and_ordered() {
        let store = ProcessStore::new(
            MemoryBackend::with_processes(create_unsorted_collection()),
            vec![],
        );
        let mut session = Session::new(store, AdminGate::default());
        session.load().expect("loaded");

        assert_eq!(session.search("").len(), 4);
        let found: Vec<&str> = session.search("BR").iter().map(|p| p.name.as_str()).collect();
        assert_eq!(found, vec!["zebra"]);
        let found: Vec<&str> = session.search("a").iter().map(|p| p.name.as_str()).collect();
        assert_eq!(found, vec!["Aproveitamento", "bolsa", "Matrícula", "zebra"]);
        assert!(session.search("inexistente").is_empty());
    }

    #[test]
    fn test_session_load_reports_unsaved_seed() {
        let backend = FlakyBackend::default();
        backend.fail_saves.set(true);
        let mut session = Session::new(
            ProcessStore::new(backend.clone(), seed_processes()),
            AdminGate::default(),
        );

        let err = session.load().unwrap_err();
        assert!(matches!(err, SessionError::Store(StoreError::NotSaved(_))));
        assert_eq!(session.processes(), seed_processes().as_slice());
        assert!(session.start("1").is_ok());
        assert_eq!(backend.stored_len(), None);
    }

    #[test]
    fn test_import_requires_admin_and_closes_orphaned_sessions() {
        let mut session = memory_session();
        let capability = session.login("admin").expect("login");
        session.start("1").expect("playable");
        session.begin_edit(&capability, "1").expect("editable");

        let payload = r#"[{"id": "2", "name": "Outro", "questions": []}]"#;
        assert_eq!(session.import_json(&capability, payload).expect("valid"), 1);
        assert!(session.draft().is_none());
        assert!(session.player().is_none());

        session.logout();
        assert!(matches!(
            session.import_json(&capability, payload),
            Err(SessionError::NotAuthorized)
        ));
    }

    #[test]
    fn test_rejected_import_keeps_everything() {
        let mut session = memory_session();
        let capability = session.login("admin").expect("login");
        session.start("1").expect("playable");

        let err = session
            .import_json(&capability, r#"[{"id": "2", "name": "Sem perguntas"}]"#)
            .unwrap_err();
        assert!(err.to_string().contains("questions"));
        assert_eq!(session.processes(), seed_processes().as_slice());
        assert!(session.player().is_some());
    }
}

#[cfg(test)]
mod backend_tests {
    use super::*;

    #[test]
    fn test_json_backend_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("processes.json");

        let mut store = ProcessStore::new(JsonFileBackend::new(&path), seed_processes());
        store.load().expect("seed written");
        assert!(path.exists(), "seed should be written on first load");
        store
            .upsert(create_linear_process("p2", "Bolsa", 2))
            .expect("saved");

        let written = fs::read_to_string(&path).expect("readable");
        assert!(written.contains("\"action\": \"next\""));

        let mut reopened = ProcessStore::new(JsonFileBackend::new(&path), vec![]);
        assert_eq!(reopened.load().expect("readable"), store.processes());
    }

    #[test]
    fn test_json_backend_missing_and_blank_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("processes.json");
        let backend = JsonFileBackend::new(&path);
        assert!(backend.load().expect("absent is fine").is_none());

        fs::write(&path, "  \n").expect("writable");
        assert!(backend.load().expect("blank is fine").is_none());
    }

    #[test]
    fn test_json_backend_corrupt_file_falls_back_to_seed() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("processes.json");
        fs::write(&path, "{ not json").expect("writable");

        let backend = JsonFileBackend::new(&path);
        assert!(matches!(backend.load(), Err(PersistenceError::Json { .. })));

        let mut store = ProcessStore::new(backend, seed_processes());
        assert!(matches!(store.load(), Err(StoreError::LoadFailed(_))));
        assert_eq!(store.processes(), seed_processes().as_slice());
        // The corrupt file is left for inspection rather than overwritten.
        assert_eq!(fs::read_to_string(&path).expect("readable"), "{ not json");
    }

    #[test]
    fn test_failed_replace_leaves_no_temporary_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        // A non-empty directory at the target path makes the final rename fail.
        let target = dir.path().join("processes.json");
        fs::create_dir(&target).expect("creatable");
        fs::write(target.join("keep"), "x").expect("writable");

        let mut backend = JsonFileBackend::new(&target);
        let err = backend.save(&seed_processes()).unwrap_err();
        assert!(matches!(err, PersistenceError::Io { .. }));
        assert!(!dir.path().join("processes.json.tmp").exists());
        assert!(target.join("keep").exists());
    }

    #[test]
    fn test_snapshot_backend_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("processes.bin");

        let mut backend = SnapshotBackend::new(&path);
        assert!(backend.load().expect("absent is fine").is_none());

        let mut processes = create_unsorted_collection();
        processes.extend(seed_processes());
        backend.save(&processes).expect("saved");
        assert_eq!(backend.load().expect("readable"), Some(processes));
    }

    #[test]
    fn test_snapshot_rejects_garbage() {
        assert!(matches!(
            SnapshotBackend::from_bytes(&[0xff, 0xff, 0xff, 0xff, 0xff]),
            Err(PersistenceError::Snapshot(_))
        ));
    }

    #[test]
    fn test_settings_open_configured_backend() {
        let dir = tempfile::tempdir().expect("temp dir");
        let settings_path = dir.path().join("settings.json");
        let store_path = dir.path().join("store.bin");
        fs::write(
            &settings_path,
            format!(
                r#"{{"store_path": {:?}, "backend": "snapshot", "admin_secret": "s3cret"}}"#,
                store_path.to_string_lossy()
            ),
        )
        .expect("writable");

        let settings = Settings::from_file(&settings_path.to_string_lossy()).expect("valid");
        assert_eq!(settings.backend, BackendChoice::Snapshot);
        assert_eq!(settings.export_file_name, EXPORT_FILE_NAME);

        let store = ProcessStore::new(settings.open_backend(), seed_processes());
        let mut session = Session::new(store, AdminGate::new(settings.admin_secret.clone()));
        session.load().expect("seed written");
        assert!(store_path.exists());
        assert!(session.login("admin").is_err());
        assert!(session.login("s3cret").is_ok());
    }
}
