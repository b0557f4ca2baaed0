use clap::Parser;
use guia::model::{Answer, Process, Question, fresh_id};
use guia::store::{export_collection, sort_by_name};
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use rand::{Rng, rng};
use std::fs;

/// A CLI tool to generate a random process collection for the guia store
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_processes.json")]
    output: String,

    /// How many processes to generate
    #[arg(short, long, default_value_t = 10)]
    count: usize,

    /// The minimum number of questions per process
    #[arg(long, default_value_t = 0)]
    min: usize,

    /// The maximum number of questions per process
    #[arg(long, default_value_t = 8)]
    max: usize,
}

const SUBJECTS: &[&str] = &[
    "Mudança de Turno",
    "Trancamento de Matrícula",
    "Segunda Chamada",
    "Aproveitamento de Disciplinas",
    "Revisão de Nota",
    "Emissão de Diploma",
    "Transferência Externa",
    "Colação de Grau",
    "Dispensa de Educação Física",
    "Estágio Obrigatório",
];

const CHECKS: &[&str] = &[
    "O aluno abriu o requerimento no Portal do Aluno?",
    "A taxa do serviço foi paga?",
    "A solicitação está dentro do prazo do calendário acadêmico?",
    "Os documentos obrigatórios foram anexados?",
    "O coordenador do curso deu parecer favorável?",
    "O aluno está com a matrícula ativa?",
    "Existem pendências na biblioteca?",
];

const INSTRUCTIONS: &[&str] = &[
    "Oriente o aluno a abrir o requerimento no Portal do Aluno.",
    "O processo só tramita após a confirmação do pagamento.",
    "O pedido não pode ser aceito fora do prazo.",
    "Solicite ao aluno que anexe os documentos pendentes.",
    "Encaminhe o processo para a coordenação do curso.",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rng();

    // Add validation to ensure min is not greater than max
    if cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) cannot be greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }

    println!(
        "Generating {} processes (questions per process: {} to {})...",
        cli.count, cli.min, cli.max
    );

    let mut processes: Vec<Process> = (0..cli.count)
        .map(|i| generate_process(&mut rng, i, cli.min, cli.max))
        .collect();
    sort_by_name(&mut processes);

    let json_output = export_collection(&processes)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved {} processes to '{}'",
        processes.len(),
        cli.output
    );

    Ok(())
}

fn generate_process(rng: &mut ThreadRng, index: usize, min: usize, max: usize) -> Process {
    let subject = SUBJECTS.choose(rng).copied().unwrap_or("Processo");
    let name = format!("{} {}", subject, index + 1);
    let count = rng.random_range(min..=max);
    let questions = (0..count).map(|_| generate_question(rng)).collect();
    println!("-> Generated '{}' with {} question(s).", name, count);
    Process::new(fresh_id(), name, questions)
}

fn generate_question(rng: &mut ThreadRng) -> Question {
    let text = CHECKS.choose(rng).copied().unwrap_or("Nova pergunta?");
    let mut answers = vec![Answer::next(fresh_id(), "Sim")];

    // Most questions follow the yes/no shape; some get an extra stop option
    // and a few have an empty instruction to exercise the fallback text.
    let instruction = INSTRUCTIONS.choose(rng).copied().unwrap_or_default();
    if rng.random_bool(0.1) {
        answers.push(Answer::message(fresh_id(), "Não", ""));
    } else {
        answers.push(Answer::message(fresh_id(), "Não", instruction));
    }
    if rng.random_bool(0.2) {
        let extra = INSTRUCTIONS.choose(rng).copied().unwrap_or_default();
        answers.push(Answer::message(fresh_id(), "Não sei", extra));
    }

    Question::new(fresh_id(), text, answers)
}
