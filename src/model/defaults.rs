//! Default strings and the seed collection used when nothing has been stored yet.
use super::definition::{Answer, Process, Question};

pub const NEW_PROCESS_NAME: &str = "Novo Processo Sem Título";

pub const NEW_QUESTION_TEXT: &str = "Nova pergunta?";
pub const NEW_QUESTION_NEXT_TEXT: &str = "Sim";
pub const NEW_QUESTION_MESSAGE_TEXT: &str = "Não";
pub const NEW_QUESTION_MESSAGE: &str = "Instrução para \"Não\".";

pub const NEW_ANSWER_TEXT: &str = "Nova Opção";
pub const NEW_ANSWER_MESSAGE: &str = "Instrução para nova opção.";

/// Shown when a `message` answer has no instruction attached.
pub const UNDEFINED_ACTION_MESSAGE: &str = "Ação indefinida.";

/// The collection a fresh store is seeded with.
pub fn seed_processes() -> Vec<Process> {
    vec![Process::new(
        "1",
        "Mudança de Turno",
        vec![
            Question::new(
                "q1",
                "O aluno já abriu o requerimento no portal do aluno?",
                vec![
                    Answer::next("a11", "Sim"),
                    Answer::message(
                        "a12",
                        "Não",
                        "Para iniciar o processo de mudança de turno, o aluno deverá abrir o requerimento no Portal do Aluno.",
                    ),
                ],
            ),
            Question::new(
                "q2",
                "O aluno realizou o pagamento da taxa no valor de R$80,00?",
                vec![
                    Answer::next("a21", "Sim"),
                    Answer::message(
                        "a22",
                        "Não",
                        "O aluno precisa pagar uma taxa de R$80,00 para que o processo aberto comece a tramitar.",
                    ),
                ],
            ),
            Question::new(
                "q3",
                "A solicitação está dentro do prazo do calendário acadêmico?",
                vec![
                    Answer::next("a31", "Sim"),
                    Answer::message(
                        "a32",
                        "Não",
                        "O processo não pode ser continuado fora do prazo estipulado no calendário acadêmico.",
                    ),
                ],
            ),
        ],
    )]
}
