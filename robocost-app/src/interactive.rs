//! Terminal front-end for the diagnostic quiz.

use anyhow::Result;
use robocost_core::{
    currency::format_eur,
    error::QuizError,
    quiz::{Quiz, QuizStep},
};
use robocost_schemas::diagnostic::DiagnosticResult;
use std::io::{BufRead, Write};

const BACK: &str = "retour";
const RESTART: &str = "recommencer";
const QUIT: &str = "quitter";

/// Asks the quiz questions one at a time on `out`, reading answers from
/// `input`. Returns `None` if the user quits or input runs out.
pub fn run_quiz<R: BufRead, W: Write>(mut input: R, out: &mut W) -> Result<Option<DiagnosticResult>> {
    let mut quiz = Quiz::new();
    writeln!(
        out,
        "Tapez « {} » pour revenir en arrière, « {} » pour tout reprendre, « {} » pour sortir.",
        BACK, RESTART, QUIT
    )?;

    loop {
        let step = quiz.step();
        writeln!(
            out,
            "\n[{}/{}] {}",
            step.index() + 1,
            QuizStep::QUESTIONS.len(),
            step.question()
        )?;
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();

        match line.to_lowercase().as_str() {
            QUIT => return Ok(None),
            RESTART => {
                quiz.restart();
                continue;
            }
            BACK => {
                if let Err(err) = quiz.back() {
                    writeln!(out, "{}", describe(&err))?;
                }
                continue;
            }
            _ => {}
        }

        if let Err(err) = quiz.answer(line) {
            writeln!(out, "{}", describe(&err))?;
            continue;
        }

        if step == QuizStep::Accessories {
            let result = quiz.calculate().map(Clone::clone);
            match result {
                Ok(result) => {
                    print_result(out, &result)?;
                    return Ok(Some(result));
                }
                Err(err) => writeln!(out, "{}", describe(&err))?,
            }
        } else if let Err(err) = quiz.next() {
            writeln!(out, "{}", describe(&err))?;
        }
    }
}

fn describe(err: &QuizError) -> String {
    match err {
        QuizError::InvalidAnswer { kind, .. } => kind.to_string(),
        QuizError::AtFirstQuestion => "Vous êtes déjà à la première question.".to_string(),
        QuizError::Incomplete(missing) => format!(
            "Il reste {} question(s) sans réponse : {}",
            missing.len(),
            missing.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(", ")
        ),
        other => other.to_string(),
    }
}

fn print_result<W: Write>(out: &mut W, result: &DiagnosticResult) -> Result<()> {
    writeln!(out, "\n--- [Diagnostic] Votre estimation ---")?;
    for (line, why) in result.breakdown_lines.iter().zip(&result.explanation_lines) {
        writeln!(out, "  - {}", line)?;
        writeln!(out, "      {}", why)?;
    }
    writeln!(
        out,
        "Coût d'entretien annuel estimé : {}",
        format_eur(result.estimated_annual_cost)
    )?;
    Ok(())
}
