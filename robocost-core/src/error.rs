use crate::quiz::QuizStep;
use std::fmt;
use thiserror::Error;

/// Message shown next to a required field that was left empty.
pub const REQUIRED_MESSAGE: &str = "Ce champ est requis.";

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FieldErrorKind {
    #[error("Ce champ est requis.")]
    Missing,

    #[error("Veuillez saisir un nombre valide.")]
    NotANumber,

    #[error("Veuillez saisir un nombre entier.")]
    NotWhole,

    #[error("La valeur ne peut pas être négative.")]
    Negative,

    #[error("La valeur doit être supérieure à zéro.")]
    NotPositive,

    #[error("La valeur doit être au moins {0}.")]
    BelowMinimum(f64),

    #[error("Veuillez choisir une option valide.")]
    UnknownOption,
}

impl FieldErrorKind {
    pub fn is_missing(self) -> bool {
        matches!(self, FieldErrorKind::Missing)
    }
}

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field}: {kind}")]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Every field that failed validation, in the order the fields are declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The error a form should scroll to.
    pub fn first(&self) -> Option<&FieldError> {
        self.errors.first()
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// `(field, message)` pairs, ready for display.
    pub fn messages(&self) -> Vec<(String, String)> {
        self.errors
            .iter()
            .map(|e| (e.field.clone(), e.message()))
            .collect()
    }

    pub(crate) fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid field(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "; {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuizError {
    #[error("Question '{0}' must be answered before moving on")]
    Unanswered(QuizStep),

    #[error("Invalid answer for '{step}': {kind}")]
    InvalidAnswer { step: QuizStep, kind: FieldErrorKind },

    #[error("Already on the first question")]
    AtFirstQuestion,

    #[error("No question after '{0}', calculate the estimate instead")]
    AtLastQuestion(QuizStep),

    #[error("The estimate is only available from the last question, not from '{0}'")]
    NotAtLastQuestion(QuizStep),

    #[error("Cannot calculate yet, {} question(s) unanswered", .0.len())]
    Incomplete(Vec<QuizStep>),

    #[error("The quiz is finished, restart it to answer again")]
    Finished,
}
