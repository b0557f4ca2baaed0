//! Unit tests for core guia types.
mod common;
use common::*;
use guia::prelude::*;
use std::collections::HashSet;

#[test]
fn test_answer_action_display() {
    assert_eq!(format!("{}", AnswerAction::Next), "next");
    assert_eq!(format!("{}", AnswerAction::Message), "message");
}

#[test]
fn test_answer_action_from_str() {
    assert_eq!("next".parse::<AnswerAction>(), Ok(AnswerAction::Next));
    assert_eq!(" Message ".parse::<AnswerAction>(), Ok(AnswerAction::Message));
    let err = "jump".parse::<AnswerAction>().unwrap_err();
    assert!(err.contains("'jump'"));
}

#[test]
fn test_answer_instruction_ignores_blank_messages() {
    assert_eq!(Answer::message("a", "Não", "Faça isso.").instruction(), Some("Faça isso."));
    assert_eq!(Answer::message("a", "Não", " \t").instruction(), None);
    assert_eq!(Answer::next("a", "Sim").instruction(), None);
}

#[test]
fn test_process_lookups() {
    let process = turno_process();
    assert_eq!(process.position_of("q3"), Some(2));
    assert_eq!(process.position_of("q9"), None);
    assert_eq!(
        process.question("q2").and_then(|q| q.answer("a21")).map(|a| a.action),
        Some(AnswerAction::Next)
    );
    assert!(!process.is_empty());
}

#[test]
fn test_untitled_process_and_fresh_ids() {
    let process = Process::untitled();
    assert_eq!(process.name, "Novo Processo Sem Título");
    assert!(process.is_empty());

    let ids: HashSet<String> = (0..100).map(|_| fresh_id()).collect();
    assert_eq!(ids.len(), 100);
    assert!(ids.iter().all(|id| !id.is_empty()));
}

#[test]
fn test_serde_shape() {
    let question = Question::new(
        "q1",
        "Pergunta?",
        vec![Answer::next("a1", "Sim"), Answer::message("a2", "Não", "Instrução")],
    );
    let value = serde_json::to_value(&question).expect("serializable");
    assert_eq!(
        value,
        serde_json::json!({
            "id": "q1",
            "text": "Pergunta?",
            "answers": [
                {"id": "a1", "text": "Sim", "action": "next"},
                {"id": "a2", "text": "Não", "action": "message", "message": "Instrução"}
            ]
        })
    );
}

#[test]
fn test_question_without_answers_field() {
    let question: Question =
        serde_json::from_str(r#"{"id": "q1", "text": "Sem respostas?"}"#).expect("valid");
    assert!(question.is_dead_end());
}

#[test]
fn test_seed_collection() {
    let seed = seed_processes();
    assert_eq!(seed.len(), 1);
    let process = &seed[0];
    assert_eq!(process.name, "Mudança de Turno");
    assert_eq!(process.questions.len(), 3);
    for question in &process.questions {
        assert_eq!(question.answers.len(), 2);
        assert_eq!(question.answers[0].action, AnswerAction::Next);
        assert!(question.answers[1].instruction().is_some());
    }
    assert_eq!(
        process.questions[0].answers[1].instruction(),
        Some(TURNO_PORTAL_MESSAGE)
    );
}

#[test]
fn test_error_display() {
    let err = ValidationError::MissingField {
        index: 2,
        field: "questions",
    };
    assert_eq!(
        err.to_string(),
        "Process at index 2 is missing the required field 'questions'"
    );

    let err = StoreError::from(ValidationError::NotAnObject { index: 0 });
    assert_eq!(
        err.to_string(),
        "Invalid process collection: Process at index 0 is not an object"
    );

    let err = SessionError::from(StoreError::from(PersistenceError::Unavailable(
        "disk full".to_string(),
    )));
    assert_eq!(
        err.to_string(),
        "Changes were not saved: Storage backend unavailable: disk full"
    );

    assert_eq!(
        SessionError::ProcessNotFound("42".to_string()).to_string(),
        "Process '42' not found"
    );
}

#[test]
fn test_settings_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.backend, BackendChoice::Json);
    assert_eq!(settings.admin_secret, "admin");
    assert_eq!(settings.export_file_name, EXPORT_FILE_NAME);

    let partial: Settings = serde_json::from_str(r#"{"backend": "memory"}"#).expect("valid");
    assert_eq!(partial.backend, BackendChoice::Memory);
    assert_eq!(partial.store_path, settings.store_path);
}

#[test]
fn test_settings_from_missing_file() {
    let err = Settings::from_file("/definitely/not/here/settings.json").unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("settings.json"));
}

#[test]
fn test_admin_gate() {
    let gate = AdminGate::new("segredo");
    assert!(gate.check("segredo"));
    assert!(!gate.check("Segredo"));
    assert!(!gate.check(""));
    assert!(AdminGate::default().check("admin"));
}
