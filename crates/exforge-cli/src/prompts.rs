//! Interactive collection of the configuration answers.
//!
//! Answers are gathered as raw strings; defaults and validation are applied
//! afterwards by `ConfigResolver`. A blank answer always means "use the
//! default".

use std::io::{BufRead, Write};

use exforge_core::domain::{
    DEFAULT_API_PORT, DEFAULT_DB_HOST, DEFAULT_DB_PORT, DEFAULT_DB_USER, DEFAULT_JWT_EXPIRES_IN,
    ProjectName, RawAnswers,
};

use crate::error::{CliError, CliResult, IntoCli as _};

/// How an answer is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    Text,
    /// Not echoed on a terminal.
    Secret,
    /// `[Y/n]` question; answered with `y` or `n`.
    YesNo,
}

/// One question of the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub label: &'static str,
    pub default: Option<String>,
    pub kind: AnswerKind,
}

impl Question {
    fn text(label: &'static str, default: impl ToString) -> Self {
        Self {
            label,
            default: Some(default.to_string()),
            kind: AnswerKind::Text,
        }
    }

    /// Question as printed on a line-based prompt.
    pub fn line(&self) -> String {
        match (&self.kind, &self.default) {
            (AnswerKind::YesNo, _) => format!("{} [Y/n]: ", self.label),
            (_, Some(default)) => format!("{} (default: {}): ", self.label, default),
            (_, None) => format!("{}: ", self.label),
        }
    }
}

/// Source of answers.
pub trait Prompter {
    fn ask(&mut self, question: &Question) -> CliResult<String>;
}

/// The questions, in the order they are asked.
pub fn questions(project: &ProjectName) -> Vec<Question> {
    vec![
        Question::text("DB host", DEFAULT_DB_HOST),
        Question::text("DB port", DEFAULT_DB_PORT),
        Question::text("DB user", DEFAULT_DB_USER),
        Question {
            label: "DB password",
            default: None,
            kind: AnswerKind::Secret,
        },
        Question::text("DB name", project.default_database_name()),
        Question::text("API port", DEFAULT_API_PORT),
        Question {
            label: "Use synchronize=true (dev)?",
            default: Some("y".into()),
            kind: AnswerKind::YesNo,
        },
        Question {
            label: "JWT secret (leave blank to autogenerate)",
            default: None,
            kind: AnswerKind::Secret,
        },
        Question::text("JWT expiresIn", DEFAULT_JWT_EXPIRES_IN),
    ]
}

/// Ask every question through `prompter`.
pub fn collect_answers(prompter: &mut dyn Prompter, project: &ProjectName) -> CliResult<RawAnswers> {
    let mut answers = questions(project)
        .iter()
        .map(|q| prompter.ask(q))
        .collect::<CliResult<Vec<_>>>()?
        .into_iter();

    let mut next = || answers.next().unwrap_or_default();
    Ok(RawAnswers {
        db_host: next(),
        db_port: next(),
        db_user: next(),
        db_password: next(),
        db_name: next(),
        api_port: next(),
        synchronize: next(),
        jwt_secret: next(),
        jwt_expires_in: next(),
    })
}

// ── Prompters ─────────────────────────────────────────────────────────────────

/// Answers every question blank, i.e. with its default.
#[derive(Debug, Default)]
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn ask(&mut self, _: &Question) -> CliResult<String> {
        Ok(String::new())
    }
}

/// Reads one line per question. End of input answers blank.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &Question) -> CliResult<String> {
        write!(self.output, "{}", question.line())?;
        self.output.flush()?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .with_cli_context(|| format!("reading the answer to '{}'", question.label))?;

        let answer = line.strip_suffix('\n').unwrap_or(&line);
        let answer = answer.strip_suffix('\r').unwrap_or(answer);
        Ok(answer.to_string())
    }
}

/// Terminal prompts with defaults, hidden secrets and a yes/no confirm.
#[cfg(feature = "interactive")]
pub struct TerminalPrompter {
    theme: dialoguer::theme::ColorfulTheme,
}

#[cfg(feature = "interactive")]
impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: dialoguer::theme::ColorfulTheme::default(),
        }
    }
}

#[cfg(feature = "interactive")]
impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &Question) -> CliResult<String> {
        use dialoguer::{Confirm, Input, Password};

        let answer = match question.kind {
            AnswerKind::Text => {
                let mut input = Input::<String>::with_theme(&self.theme)
                    .with_prompt(question.label)
                    .allow_empty(true);
                if let Some(default) = &question.default {
                    input = input.default(default.clone());
                }
                input.interact_text()
            }
            AnswerKind::Secret => Password::with_theme(&self.theme)
                .with_prompt(question.label)
                .allow_empty_password(true)
                .interact(),
            AnswerKind::YesNo => Confirm::with_theme(&self.theme)
                .with_prompt(question.label)
                .default(true)
                .interact()
                .map(|yes| if yes { "y" } else { "n" }.to_string()),
        };

        answer.map_err(|e| CliError::Prompt {
            message: format!("could not read '{}'", question.label),
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn project() -> ProjectName {
        ProjectName::parse("demo-api").unwrap()
    }

    #[test]
    fn questions_follow_the_fixed_order() {
        let labels: Vec<&str> = questions(&project()).iter().map(|q| q.label).collect();
        assert_eq!(labels[0], "DB host");
        assert_eq!(labels[3], "DB password");
        assert_eq!(labels[4], "DB name");
        assert_eq!(labels[8], "JWT expiresIn");
        assert_eq!(labels.len(), 9);
    }

    #[test]
    fn database_default_is_derived_from_project() {
        let q = &questions(&project())[4];
        assert_eq!(q.line(), "DB name (default: demo_api): ");
    }

    #[test]
    fn yes_no_line_shows_choices() {
        let q = &questions(&project())[6];
        assert!(q.line().ends_with("[Y/n]: "));
    }

    #[test]
    fn line_prompter_maps_answers_in_order() {
        let input = "db.local\n6543\n\n hunter2 \n\n8080\nn\n\n12h\n";
        let mut prompter = LinePrompter::new(Cursor::new(input), Vec::new());

        let answers = collect_answers(&mut prompter, &project()).unwrap();

        assert_eq!(answers.db_host, "db.local");
        assert_eq!(answers.db_port, "6543");
        assert_eq!(answers.db_user, "");
        assert_eq!(answers.db_password, " hunter2 ");
        assert_eq!(answers.api_port, "8080");
        assert_eq!(answers.synchronize, "n");
        assert_eq!(answers.jwt_secret, "");
        assert_eq!(answers.jwt_expires_in, "12h");

        let shown = String::from_utf8(prompter.output).unwrap();
        assert!(shown.starts_with("DB host (default: localhost): "));
    }

    #[test]
    fn end_of_input_answers_blank() {
        let mut prompter = LinePrompter::new(Cursor::new("db.local\r\n"), Vec::new());
        let answers = collect_answers(&mut prompter, &project()).unwrap();
        assert_eq!(answers.db_host, "db.local");
        assert_eq!(answers, RawAnswers {
            db_host: "db.local".into(),
            ..Default::default()
        });
    }

    #[test]
    fn defaults_prompter_answers_blank() {
        let answers = collect_answers(&mut DefaultsPrompter, &project()).unwrap();
        assert_eq!(answers, RawAnswers::default());
    }

    #[test]
    fn read_failure_names_the_question() {
        struct Broken;
        impl std::io::Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("stdin closed"))
            }
        }

        let mut prompter = LinePrompter::new(std::io::BufReader::new(Broken), Vec::new());
        let err = collect_answers(&mut prompter, &project()).unwrap_err();
        assert!(matches!(err, CliError::IoError { ref message, .. } if message.contains("DB host")));
    }
}
