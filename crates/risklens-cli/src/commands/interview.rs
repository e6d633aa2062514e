//! Interview command implementation.

use crate::cli::InterviewArgs;
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use risklens_domain::RiskId;
use risklens_interview::{Interview, Question, QuestionId, QuestionKind, RawAnswer};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufRead, Write};

/// Execute the interview command.
pub async fn execute_interview(args: InterviewArgs, formatter: &Formatter) -> Result<()> {
    let mut interview = Interview::start(args.input.as_str());
    tracing::info!(flow = %interview.flow(), "interview started");

    match &args.answers {
        Some(path) => {
            let answers: BTreeMap<String, RawAnswer> = serde_json::from_str(&fs::read_to_string(path)?)?;
            apply_answers(&mut interview, answers)?;
        }
        None => prompt_answers(&mut interview, formatter)?,
    }

    let statement = interview.statement();
    println!("{}", formatter.format_statement(&statement)?);

    let id = args.id.map(RiskId::from).unwrap_or_else(RiskId::generate);
    let risk = statement.into_risk(id, args.unit.into());
    if formatter.format() == OutputFormat::Table {
        println!("{}", serde_json::to_string_pretty(&risk)?);
    }
    Ok(())
}

/// Apply answers keyed by question id.
pub fn apply_answers(interview: &mut Interview, answers: BTreeMap<String, RawAnswer>) -> Result<()> {
    for (key, raw) in answers {
        let id: QuestionId = key.parse().map_err(CliError::InvalidInput)?;
        interview.answer(id, raw)?;
    }
    Ok(())
}

fn prompt_answers(interview: &mut Interview, formatter: &Formatter) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(question) = interview.next_question() {
        println!("{}", formatter.question(question));
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            // Stdin closed; draft from what we have
            break;
        };
        let line = line?;

        let outcome = match parse_reply(question, &line) {
            Ok(Some(raw)) => interview.answer(question.id, raw).map(|_| ()),
            Ok(None) => interview.skip(question.id),
            Err(e) => {
                println!("{}", formatter.error(&e.to_string()));
                continue;
            }
        };
        if let Err(e) = outcome {
            println!("{}", formatter.error(&e.to_string()));
        }
    }
    Ok(())
}

/// Turn a typed reply into a raw answer.
///
/// Choice replies may be the option value or its 1-based number. An empty
/// reply to an optional question yields `None`, meaning skip it.
pub fn parse_reply(question: &Question, line: &str) -> Result<Option<RawAnswer>> {
    let line = line.trim();
    if line.is_empty() && question.is_optional() {
        return Ok(None);
    }
    let option = |token: &str| -> String {
        token
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=question.options.len()).contains(n) && !question.offers(token))
            .map(|n| question.options[n - 1].value.to_string())
            .unwrap_or_else(|| token.to_string())
    };

    let raw = match question.kind {
        QuestionKind::SingleChoice => RawAnswer::Choice(option(line)),
        QuestionKind::MultiChoice => RawAnswer::Choices(
            line.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(option)
                .collect(),
        ),
        QuestionKind::FreeText => RawAnswer::Text(line.to_string()),
        QuestionKind::Numeric => line
            .replace(',', "")
            .parse::<f64>()
            .map(RawAnswer::Number)
            .map_err(|_| CliError::InvalidInput(format!("'{}' is not a number", line)))?,
    };
    Ok(Some(raw))
}
