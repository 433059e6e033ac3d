use thiserror::Error;

/// Errors from the expression mini-language. These never escape the
/// substitution engine: an expression that fails renders as its literal
/// text with a diagnostic logged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    #[error("Unexpected character at offset {offset}")]
    Lex { offset: usize },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Key '{path}' not found")]
    KeyNotFound { path: String },

    #[error("Non-numeric operand for '{operator}'")]
    NonNumericOperand { operator: String },
}

impl TemplateError {
    pub fn parse(message: impl Into<String>) -> Self {
        TemplateError::Parse {
            message: message.into(),
        }
    }
}

pub type TemplateResult<T> = Result<T, TemplateError>;
