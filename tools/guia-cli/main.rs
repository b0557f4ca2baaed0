use clap::{Parser, Subcommand, ValueEnum};
use guia::prelude::*;
use itertools::Itertools;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendCli {
    Json,
    Snapshot,
    Memory,
}

/// Institutional process guide: play, edit, import and export processes
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional JSON settings file
    #[arg(short, long, env = "GUIA_CONFIG")]
    config: Option<String>,

    /// Path of the stored process collection
    #[arg(short, long, env = "GUIA_STORE")]
    store: Option<PathBuf>,

    /// The storage backend to use
    #[arg(short, long, value_enum, env = "GUIA_BACKEND")]
    backend: Option<BackendCli>,

    /// Admin password, required by commands that change the collection
    #[arg(long, env = "GUIA_ADMIN_SECRET", hide_env_values = true)]
    secret: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List processes in name order
    List {
        /// Only show processes whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Walk through a process interactively
    Play {
        /// Process id
        id: String,
    },
    /// Write the collection as pretty-printed JSON
    Export {
        /// Output file (defaults to the configured export file name)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Replace the whole collection with a JSON file
    Import {
        /// Path to the JSON file to import
        path: String,
    },
    /// Create an untitled process and open it in the editor
    Create,
    /// Edit a process interactively
    Edit {
        /// Process id
        id: String,
    },
    /// Delete a process
    Delete {
        /// Process id
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let settings = load_settings(&cli);
    let store = ProcessStore::new(settings.open_backend(), seed_processes());
    let mut session = Session::new(store, AdminGate::new(settings.admin_secret.clone()));
    if let Err(e) = session.load() {
        eprintln!("Warning: {}", e);
    }

    match cli.command {
        Commands::List { search } => run_list(&session, search.as_deref().unwrap_or("")),
        Commands::Play { id } => run_play(&mut session, &id),
        Commands::Export { output } => {
            let path = output.unwrap_or_else(|| settings.export_file_name.clone());
            run_export(&session, &path);
        }
        Commands::Import { path } => {
            let capability = login(&mut session, cli.secret.as_deref());
            run_import(&mut session, &capability, &path);
        }
        Commands::Create => {
            let capability = login(&mut session, cli.secret.as_deref());
            if let Err(e) = session.create_process(&capability) {
                eprintln!("Warning: {}", e);
            }
            run_editor(&mut session, &capability);
        }
        Commands::Edit { id } => {
            let capability = login(&mut session, cli.secret.as_deref());
            session
                .begin_edit(&capability, &id)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            run_editor(&mut session, &capability);
        }
        Commands::Delete { id, yes } => {
            let capability = login(&mut session, cli.secret.as_deref());
            run_delete(&mut session, &capability, &id, yes);
        }
    }
}

fn load_settings(cli: &Cli) -> Settings {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path).unwrap_or_else(|e| exit_with_error(&e.to_string())),
        None => Settings::default(),
    };
    if let Some(store) = &cli.store {
        settings.store_path = store.clone();
    }
    if let Some(backend) = cli.backend {
        settings.backend = match backend {
            BackendCli::Json => BackendChoice::Json,
            BackendCli::Snapshot => BackendChoice::Snapshot,
            BackendCli::Memory => BackendChoice::Memory,
        };
    }
    settings
}

fn login<P: Persistence>(session: &mut Session<P>, secret: Option<&str>) -> EditCapability {
    let secret = match secret {
        Some(secret) => secret.to_string(),
        None => prompt_for_input("Admin password", None),
    };
    session
        .login(&secret)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()))
}

fn run_list<P: Persistence>(session: &Session<P>, search: &str) {
    let matches = session.search(search);
    if matches.is_empty() {
        if search.is_empty() {
            println!("No processes registered.");
        } else {
            println!("No process found matching \"{}\".", search);
        }
        return;
    }
    for process in matches {
        println!(
            "{:<38} {} ({} questions)",
            process.id,
            process.name,
            process.questions.len()
        );
    }
}

fn run_play<P: Persistence>(session: &mut Session<P>, id: &str) {
    let traversal = session
        .start(id)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    println!("\n--- {} ---", traversal.process().name);
    println!("Follow the steps to complete the process. Type 'q' to quit, 'r' to restart.\n");

    loop {
        println!("{}", traversal.step());
        let answers: Option<Vec<Answer>> = match traversal.step() {
            Step::Question { question, .. } => Some(question.answers.clone()),
            Step::NoContent => return,
            Step::Completed => None,
        };
        let Some(answers) = answers else {
            let choice = prompt_for_input("Restart? (y/n)", Some("n"));
            if choice.eq_ignore_ascii_case("y") {
                traversal.restart();
                println!();
                continue;
            }
            return;
        };

        if answers.is_empty() {
            return;
        }
        let options = answers
            .iter()
            .enumerate()
            .map(|(i, a)| format!("{}: {}", i + 1, a.text))
            .join("  ");
        println!("  {}", options);

        let choice = prompt_for_input("Choose an answer", None);
        match choice.as_str() {
            "q" => return,
            "r" => {
                traversal.restart();
                continue;
            }
            _ => {}
        }
        match choice.parse::<usize>().ok().and_then(|n| answers.get(n.wrapping_sub(1))) {
            Some(answer) => {
                traversal.select_answer(answer);
            }
            None => println!(
                "Invalid choice. Please enter a number between 1 and {}.",
                answers.len()
            ),
        }
        println!();
    }
}

fn run_export<P: Persistence>(session: &Session<P>, path: &str) {
    let json = session
        .export_json()
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    fs::write(path, json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", path, e)));
    println!("Exported {} processes to '{}'", session.processes().len(), path);
}

fn run_import<P: Persistence>(session: &mut Session<P>, capability: &EditCapability, path: &str) {
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)));
    match session.import_json(capability, &json) {
        Ok(count) => println!("Imported {} processes.", count),
        Err(e) => exit_with_error(&format!("Import rejected: {}", e)),
    }
}

fn run_delete<P: Persistence>(
    session: &mut Session<P>,
    capability: &EditCapability,
    id: &str,
    yes: bool,
) {
    let request = session
        .request_delete(capability, id)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    if !yes && !confirm(&request) {
        println!("Delete cancelled.");
        return;
    }
    match session.confirm_delete(capability, request) {
        Ok(_) => println!("Process '{}' deleted.", id),
        Err(e) => exit_with_error(&e.to_string()),
    }
}

const EDITOR_HELP: &str = "\
Commands:
  show                              print the draft
  name <text>                       rename the process
  add-question                      append a question with default answers
  question <q#> <text>              change a question's text
  delete-question <q#>              remove a question
  move <q#> <q#>                    move a question to another question's position
  add-answer <q#>                   append an answer to a question
  answer <q#> <a#> text <text>      change an answer's label
  answer <q#> <a#> action <next|message>
  answer <q#> <a#> message <text>   change an answer's instruction
  delete-answer <q#> <a#>           remove an answer
  delete-process                    delete the whole process
  save                              commit and exit
  cancel                            discard and exit";

/// A small line-oriented editor over the session's open draft.
fn run_editor<P: Persistence>(session: &mut Session<P>, capability: &EditCapability) {
    println!("{}\n", EDITOR_HELP);
    loop {
        let Some(draft) = session.draft_mut() else {
            return;
        };
        print_draft(draft.process());
        let line = prompt_for_input("edit", None);
        let (command, rest) = line.split_once(' ').unwrap_or((line.as_str(), ""));
        let rest = rest.trim();

        let applied = match command {
            "" | "show" => true,
            "help" => {
                println!("{}", EDITOR_HELP);
                true
            }
            "name" => {
                draft.rename_process(rest);
                true
            }
            "add-question" => {
                draft.add_question();
                true
            }
            "question" => split_first(rest)
                .and_then(|(q, text)| Some((question_id(draft, q)?, text)))
                .is_some_and(|(id, text)| draft.edit_question_text(&id, text)),
            "delete-question" => {
                question_id(draft, rest).is_some_and(|id| draft.delete_question(&id))
            }
            "move" => split_first(rest)
                .and_then(|(s, t)| Some((question_id(draft, s)?, question_id(draft, t.trim())?)))
                .is_some_and(|(s, t)| draft.reorder_question(&s, &t)),
            "add-answer" => {
                question_id(draft, rest).is_some_and(|id| draft.add_answer(&id).is_some())
            }
            "answer" => edit_answer(draft, rest),
            "delete-answer" => split_first(rest)
                .and_then(|(q, a)| answer_ids(draft, q, a.trim()))
                .is_some_and(|(q, a)| draft.delete_answer(&q, &a)),
            "delete-process" => {
                let request = draft.request_delete();
                if confirm(&request) {
                    match session.confirm_delete(capability, request) {
                        Ok(_) => println!("Process deleted."),
                        Err(e) => eprintln!("Error: {}", e),
                    }
                    return;
                }
                true
            }
            "save" => {
                match session.save_edit(capability) {
                    Ok(()) => println!("Saved."),
                    Err(e) => eprintln!("Error: {}", e),
                }
                return;
            }
            "cancel" => {
                session.cancel_edit();
                println!("Changes discarded.");
                return;
            }
            other => {
                println!("Unknown command '{}'. Type 'help' for the list.", other);
                true
            }
        };
        if !applied {
            println!("Nothing changed: check the question and answer numbers.");
        }
        println!();
    }
}

fn edit_answer(draft: &mut Draft, args: &str) -> bool {
    let mut parts = args.splitn(4, ' ');
    let (Some(q), Some(a), Some(field), value) =
        (parts.next(), parts.next(), parts.next(), parts.next().unwrap_or(""))
    else {
        return false;
    };
    let Some((question, answer)) = answer_ids(draft, q, a) else {
        return false;
    };
    let edit = match field {
        "text" => AnswerEdit::Text(value.to_string()),
        "message" => AnswerEdit::Message(value.to_string()),
        "action" => match value.parse::<AnswerAction>() {
            Ok(action) => AnswerEdit::Action(action),
            Err(e) => {
                println!("{}", e);
                return false;
            }
        },
        _ => return false,
    };
    draft.edit_answer_field(&question, &answer, edit)
}

fn print_draft(process: &Process) {
    println!("== {} ==", process.name);
    if process.questions.is_empty() {
        println!("  (no questions)");
    }
    for (qi, question) in process.questions.iter().enumerate() {
        println!("  Question {}: {}", qi + 1, question.text);
        for (ai, answer) in question.answers.iter().enumerate() {
            match (answer.action, answer.message.as_deref()) {
                (AnswerAction::Message, Some(message)) => {
                    println!("    {}. {} [message] {}", ai + 1, answer.text, message)
                }
                (action, _) => println!("    {}. {} [{}]", ai + 1, answer.text, action),
            }
        }
    }
}

fn split_first(args: &str) -> Option<(&str, &str)> {
    args.split_once(' ')
}

/// Resolves a one-based question number to the question's id.
fn question_id(draft: &Draft, number: &str) -> Option<String> {
    let index = number.trim().parse::<usize>().ok()?.checked_sub(1)?;
    draft.process().questions.get(index).map(|q| q.id.clone())
}

fn answer_ids(draft: &Draft, question: &str, answer: &str) -> Option<(String, String)> {
    let q_index = question.trim().parse::<usize>().ok()?.checked_sub(1)?;
    let a_index = answer.trim().parse::<usize>().ok()?.checked_sub(1)?;
    let q = draft.process().questions.get(q_index)?;
    let a = q.answers.get(a_index)?;
    Some((q.id.clone(), a.id.clone()))
}

fn confirm(request: &DeleteRequest) -> bool {
    let answer = prompt_for_input(&format!("{} (y/n)", request.prompt()), Some("n"));
    answer.eq_ignore_ascii_case("y")
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    if let Err(e) = io::stdout().flush() {
        exit_with_error(&format!("Failed to write prompt: {}", e));
    }

    if let Err(e) = io::stdin().read_line(&mut line) {
        exit_with_error(&format!("Failed to read line: {}", e));
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
