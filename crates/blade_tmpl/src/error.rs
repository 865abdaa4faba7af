//! Error types for template parsing and execution.

/// Errors produced while parsing or executing a template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The template text is not valid template syntax.
    #[error("template: {name}:{line}: {message}")]
    Parse {
        /// Name the template was parsed under.
        name: String,
        /// 1-based line of the offending construct.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// Evaluation failed while rendering.
    #[error("template: {name}:{line}: executing: {message}")]
    Exec {
        /// Name of the executing template.
        name: String,
        /// 1-based line of the failing action.
        line: usize,
        /// Description of the problem.
        message: String,
    },
}

impl TemplateError {
    /// Returns the template name the error belongs to.
    pub fn name(&self) -> &str {
        match self {
            TemplateError::Parse { name, .. } | TemplateError::Exec { name, .. } => name,
        }
    }

    /// Returns the line the error was reported at.
    pub fn line(&self) -> usize {
        match self {
            TemplateError::Parse { line, .. } | TemplateError::Exec { line, .. } => *line,
        }
    }
}
