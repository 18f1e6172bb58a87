//! Step-by-step flow of the diagnostic quiz.
//!
//! Eight questions, answered in order, then a result. Moving forward requires
//! the current question to be answered; the estimate is only reachable once
//! all eight are.

use crate::{
    diagnostic::estimate,
    error::{FieldErrorKind, QuizError},
    validation::{check_positive, parse_flag, parse_number, parse_text, split_accessories},
};
use robocost_schemas::{
    diagnostic::{DiagnosticAnswers, DiagnosticResult, TerrainType, UsageFrequency},
    form::FieldValue,
};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizStep {
    Brand,
    Model,
    LawnArea,
    UsageFrequency,
    TerrainType,
    TechnicalIssues,
    Maintenance,
    Accessories,
    Result,
}

impl QuizStep {
    pub const QUESTIONS: [QuizStep; 8] = [
        Self::Brand,
        Self::Model,
        Self::LawnArea,
        Self::UsageFrequency,
        Self::TerrainType,
        Self::TechnicalIssues,
        Self::Maintenance,
        Self::Accessories,
    ];

    /// Zero-based position, `8` for the result.
    pub fn index(self) -> usize {
        Self::QUESTIONS
            .iter()
            .position(|step| *step == self)
            .unwrap_or(Self::QUESTIONS.len())
    }

    pub fn question(self) -> &'static str {
        match self {
            Self::Brand => "Quelle est la marque de votre robot tondeuse ?",
            Self::Model => "Quel est le modèle de votre robot tondeuse ?",
            Self::LawnArea => "Quelle est la surface de votre pelouse (en m²) ?",
            Self::UsageFrequency => {
                "À quelle fréquence utilisez-vous votre robot ? (Quotidienne, Hebdomadaire, Mensuelle)"
            }
            Self::TerrainType => "Quel est le type de terrain ? (Plat, Accidenté, En pente)",
            Self::TechnicalIssues => "Avez-vous rencontré des problèmes techniques ? (Oui/Non)",
            Self::Maintenance => "Votre robot est-il entretenu régulièrement ? (Oui/Non)",
            Self::Accessories => {
                "Quels accessoires utilisez-vous ? (séparés par des virgules, ou « aucun »)"
            }
            Self::Result => "Votre estimation",
        }
    }
}

impl fmt::Display for QuizStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Brand => "brand",
            Self::Model => "model",
            Self::LawnArea => "lawnAreaM2",
            Self::UsageFrequency => "usageFrequency",
            Self::TerrainType => "terrainType",
            Self::TechnicalIssues => "hadTechnicalIssues",
            Self::Maintenance => "hadRegularMaintenance",
            Self::Accessories => "accessories",
            Self::Result => "result",
        };
        f.write_str(name)
    }
}

/// Answers recorded so far. Nothing survives a restart.
#[derive(Debug, Clone, Default)]
struct Answers {
    brand: Option<String>,
    model: Option<String>,
    lawn_area_m2: Option<f64>,
    usage_frequency: Option<UsageFrequency>,
    terrain_type: Option<TerrainType>,
    had_technical_issues: Option<bool>,
    had_regular_maintenance: Option<bool>,
    accessories: Option<Vec<String>>,
}

impl Answers {
    fn is_answered(&self, step: QuizStep) -> bool {
        match step {
            QuizStep::Brand => self.brand.is_some(),
            QuizStep::Model => self.model.is_some(),
            QuizStep::LawnArea => self.lawn_area_m2.is_some(),
            QuizStep::UsageFrequency => self.usage_frequency.is_some(),
            QuizStep::TerrainType => self.terrain_type.is_some(),
            QuizStep::TechnicalIssues => self.had_technical_issues.is_some(),
            QuizStep::Maintenance => self.had_regular_maintenance.is_some(),
            QuizStep::Accessories => self.accessories.is_some(),
            QuizStep::Result => false,
        }
    }

    fn complete(&self) -> Option<DiagnosticAnswers> {
        Some(DiagnosticAnswers {
            brand: self.brand.clone()?,
            model: self.model.clone()?,
            lawn_area_m2: self.lawn_area_m2?,
            usage_frequency: self.usage_frequency?,
            terrain_type: self.terrain_type?,
            had_technical_issues: self.had_technical_issues?,
            had_regular_maintenance: self.had_regular_maintenance?,
            accessories: self.accessories.clone()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Quiz {
    step: QuizStep,
    answers: Answers,
    result: Option<DiagnosticResult>,
}

impl Default for Quiz {
    fn default() -> Self {
        Self::new()
    }
}

impl Quiz {
    pub fn new() -> Self {
        Self {
            step: QuizStep::Brand,
            answers: Answers::default(),
            result: None,
        }
    }

    pub fn step(&self) -> QuizStep {
        self.step
    }

    pub fn result(&self) -> Option<&DiagnosticResult> {
        self.result.as_ref()
    }

    pub fn is_answered(&self, step: QuizStep) -> bool {
        self.answers.is_answered(step)
    }

    /// Questions still waiting for an answer, in order.
    pub fn unanswered(&self) -> Vec<QuizStep> {
        QuizStep::QUESTIONS
            .into_iter()
            .filter(|step| !self.answers.is_answered(*step))
            .collect()
    }

    pub fn can_calculate(&self) -> bool {
        self.unanswered().is_empty()
    }

    /// Records an answer to the current question, replacing any previous one.
    pub fn answer(&mut self, value: impl Into<FieldValue>) -> Result<(), QuizError> {
        let step = self.step;
        let value = value.into();
        let invalid = |kind: FieldErrorKind| QuizError::InvalidAnswer { step, kind };

        if value.is_blank() {
            return Err(invalid(FieldErrorKind::Missing));
        }
        match step {
            QuizStep::Brand => self.answers.brand = Some(parse_text(&value).map_err(invalid)?),
            QuizStep::Model => self.answers.model = Some(parse_text(&value).map_err(invalid)?),
            QuizStep::LawnArea => {
                let area = parse_number(&value).and_then(check_positive).map_err(invalid)?;
                self.answers.lawn_area_m2 = Some(area);
            }
            QuizStep::UsageFrequency => {
                let label = parse_text(&value).map_err(invalid)?;
                let freq = UsageFrequency::from_label(&label)
                    .ok_or_else(|| invalid(FieldErrorKind::UnknownOption))?;
                self.answers.usage_frequency = Some(freq);
            }
            QuizStep::TerrainType => {
                let label = parse_text(&value).map_err(invalid)?;
                let terrain = TerrainType::from_label(&label)
                    .ok_or_else(|| invalid(FieldErrorKind::UnknownOption))?;
                self.answers.terrain_type = Some(terrain);
            }
            QuizStep::TechnicalIssues => {
                self.answers.had_technical_issues = Some(parse_flag(&value).map_err(invalid)?);
            }
            QuizStep::Maintenance => {
                self.answers.had_regular_maintenance = Some(parse_flag(&value).map_err(invalid)?);
            }
            QuizStep::Accessories => {
                let accessories = match value {
                    FieldValue::List(items) => items,
                    FieldValue::Text(text) if is_none_answer(&text) => Vec::new(),
                    FieldValue::Text(text) => split_accessories(&text),
                    _ => return Err(invalid(FieldErrorKind::UnknownOption)),
                };
                self.answers.accessories = Some(accessories);
            }
            QuizStep::Result => return Err(QuizError::Finished),
        }
        debug!(%step, "quiz answer recorded");
        Ok(())
    }

    /// Moves to the next question. The current one must be answered.
    pub fn next(&mut self) -> Result<QuizStep, QuizError> {
        match self.step {
            QuizStep::Result => Err(QuizError::Finished),
            QuizStep::Accessories => Err(QuizError::AtLastQuestion(self.step)),
            step if !self.answers.is_answered(step) => Err(QuizError::Unanswered(step)),
            step => {
                self.step = QuizStep::QUESTIONS[step.index() + 1];
                Ok(self.step)
            }
        }
    }

    /// Goes back one question, keeping every answer given so far.
    pub fn back(&mut self) -> Result<QuizStep, QuizError> {
        match self.step.index() {
            0 => Err(QuizError::AtFirstQuestion),
            index => {
                self.step = QuizStep::QUESTIONS[index - 1];
                self.result = None;
                Ok(self.step)
            }
        }
    }

    /// Runs the estimate and moves to the result. Only allowed from the last
    /// question, once every question has an answer.
    pub fn calculate(&mut self) -> Result<&DiagnosticResult, QuizError> {
        match self.step {
            QuizStep::Result => return Err(QuizError::Finished),
            QuizStep::Accessories => {}
            step => return Err(QuizError::NotAtLastQuestion(step)),
        }
        let answers = match self.answers.complete() {
            Some(answers) => answers,
            None => return Err(QuizError::Incomplete(self.unanswered())),
        };
        self.step = QuizStep::Result;
        Ok(&*self.result.insert(estimate(&answers)))
    }

    pub fn restart(&mut self) {
        debug!("quiz restarted");
        *self = Self::new();
    }
}

fn is_none_answer(text: &str) -> bool {
    matches!(
        text.trim().to_lowercase().as_str(),
        "aucun" | "aucune" | "non" | "none"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_all(quiz: &mut Quiz, answers: [&str; 8]) {
        for (i, answer) in answers.into_iter().enumerate() {
            quiz.answer(answer).unwrap();
            if i < 7 {
                quiz.next().unwrap();
            }
        }
    }

    #[test]
    fn walks_forward_to_a_result() {
        let mut quiz = Quiz::new();
        answer_all(
            &mut quiz,
            ["Husqvarna", "305", "500", "Mensuelle", "Plat", "Non", "Oui", "aucun"],
        );
        assert_eq!(quiz.step(), QuizStep::Accessories);
        assert!(quiz.can_calculate());

        let result = quiz.calculate().unwrap();
        assert_eq!(result.estimated_annual_cost, 36.0);
        assert_eq!(quiz.step(), QuizStep::Result);
    }

    #[test]
    fn cannot_skip_unanswered_question() {
        let mut quiz = Quiz::new();
        assert_eq!(quiz.next(), Err(QuizError::Unanswered(QuizStep::Brand)));
        assert_eq!(quiz.back(), Err(QuizError::AtFirstQuestion));
    }

    #[test]
    fn calculate_requires_every_answer() {
        let mut quiz = Quiz::new();
        for answer in ["Worx", "Landroid", "800", "Hebdomadaire", "Plat", "Non", "Oui"] {
            quiz.answer(answer).unwrap();
            quiz.next().unwrap();
        }
        assert_eq!(quiz.step(), QuizStep::Accessories);
        assert_eq!(
            quiz.calculate(),
            Err(QuizError::Incomplete(vec![QuizStep::Accessories]))
        );
        assert_eq!(quiz.step(), QuizStep::Accessories);
    }

    #[test]
    fn calculate_only_from_the_last_question() {
        let mut quiz = Quiz::new();
        assert_eq!(
            quiz.calculate(),
            Err(QuizError::NotAtLastQuestion(QuizStep::Brand))
        );

        answer_all(
            &mut quiz,
            ["Worx", "Landroid", "1000", "Quotidienne", "Accidenté", "Oui", "Non", "aucun"],
        );
        for _ in 0..7 {
            quiz.back().unwrap();
        }
        assert_eq!(quiz.step(), QuizStep::Brand);
        assert!(quiz.can_calculate());
        assert_eq!(
            quiz.calculate(),
            Err(QuizError::NotAtLastQuestion(QuizStep::Brand))
        );
        assert_eq!(quiz.step(), QuizStep::Brand);
        assert!(quiz.result().is_none());
    }

    #[test]
    fn invalid_answers_are_rejected_in_place() {
        let mut quiz = Quiz::new();
        quiz.answer("Worx").unwrap();
        quiz.next().unwrap();
        quiz.answer("Landroid").unwrap();
        quiz.next().unwrap();

        assert_eq!(
            quiz.answer("beaucoup"),
            Err(QuizError::InvalidAnswer {
                step: QuizStep::LawnArea,
                kind: FieldErrorKind::NotANumber
            })
        );
        assert_eq!(
            quiz.answer(""),
            Err(QuizError::InvalidAnswer {
                step: QuizStep::LawnArea,
                kind: FieldErrorKind::Missing
            })
        );
        assert!(!quiz.is_answered(QuizStep::LawnArea));
    }

    #[test]
    fn back_keeps_answers_and_restart_clears_them() {
        let mut quiz = Quiz::new();
        answer_all(
            &mut quiz,
            ["Worx", "Landroid", "1000", "Quotidienne", "Accidenté", "Oui", "Non", "Module GPS, Capteur de pluie"],
        );
        quiz.calculate().unwrap();
        assert_eq!(quiz.result().map(|r| r.estimated_annual_cost), Some(310.0));
        assert_eq!(quiz.answer("x"), Err(QuizError::Finished));

        assert_eq!(quiz.back(), Ok(QuizStep::Accessories));
        assert!(quiz.result().is_none());
        assert_eq!(quiz.back(), Ok(QuizStep::Maintenance));
        assert!(quiz.is_answered(QuizStep::Accessories));

        quiz.restart();
        assert_eq!(quiz.step(), QuizStep::Brand);
        assert_eq!(quiz.unanswered().len(), 8);
    }

    #[test]
    fn last_question_only_leads_to_calculate() {
        let mut quiz = Quiz::new();
        answer_all(&mut quiz, ["a", "b", "10", "Weekly", "Flat", "no", "no", "aucune"]);
        assert_eq!(quiz.next(), Err(QuizError::AtLastQuestion(QuizStep::Accessories)));
    }
}
