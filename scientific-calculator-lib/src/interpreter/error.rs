use thiserror::Error;

/// Why an expression could not be turned into a displayable result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("Invalid expression: {0}")]
    Syntax(String),

    #[error("{0}")]
    FactorialDomain(String),

    #[error("Division by zero")]
    DivisionByInfinity,

    #[error("Invalid operation")]
    InvalidOperation,

    #[error("Empty expression")]
    EmptyExpression,
}

impl EvaluationError {
    /// Short text to show in place of a result.
    pub fn display_text(&self) -> &'static str {
        match self {
            EvaluationError::DivisionByInfinity => "∞",
            _ => "Error",
        }
    }

    /// Recovers the kind of a pipeline error. Anything that was not raised as an
    /// [`EvaluationError`] is a syntax error.
    pub(crate) fn from_pipeline(error: anyhow::Error) -> EvaluationError {
        match error.downcast::<EvaluationError>() {
            Ok(error) => error,
            Err(error) => EvaluationError::Syntax(format!("{:#}", error)),
        }
    }

    /// Classifies a value that evaluated without a pipeline error.
    pub(crate) fn check_finite(value: f64) -> Result<f64, EvaluationError> {
        if value.is_nan() {
            Err(EvaluationError::InvalidOperation)
        } else if value.is_infinite() {
            Err(EvaluationError::DivisionByInfinity)
        } else {
            Ok(value)
        }
    }
}
