//! Error types for registration, binding and dispatch
//!
//! Every failure the console can hit is local and recoverable: it ends up as a
//! single message in the output sink carrying a [`Severity`]. The types here
//! are `miette` diagnostics so hosts can also render them as reports.

use miette::Diagnostic;
use thiserror::Error;

use crate::message::Severity;

// Re-export commonly used types
pub use miette::Result;

/// Alias for results produced by the console core
pub type ConsoleResult<T> = std::result::Result<T, ConsoleError>;

/// Errors raised by the console core
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// The command's parameter schema is malformed
    #[error("Command parameters are invalid")]
    #[diagnostic(
        code(chat_console::validation),
        help("Parameters must be non-empty, optional ones must come last and only the last may be linked")
    )]
    Validation { command: String },

    /// Fewer tokens than required parameters
    #[error("Requires at least {required} argument(s)")]
    #[diagnostic(code(chat_console::argument_count))]
    ArgumentCount { required: usize },

    /// An argument was read with the wrong accessor or as the wrong type
    #[error("{0}")]
    #[diagnostic(code(chat_console::argument_type_mismatch))]
    ArgumentTypeMismatch(Mismatch),

    /// A native or custom conversion rejected the raw token
    #[error("{message}")]
    #[diagnostic(code(chat_console::argument_parse))]
    ArgumentParse { message: String, severity: Severity },

    /// No native conversion and no registered parser for the requested type
    #[error("No parser has been found for type \"{type_name}\"")]
    #[diagnostic(
        code(chat_console::unknown_parser),
        help("Register a parser for '{type_name}' from a plugin descriptor")
    )]
    UnknownParser { type_name: String },

    /// The first token matched no registered command
    #[error("Command called \"{name}\" does not exist")]
    #[diagnostic(code(chat_console::unknown_command), help("Type 'help' to list commands"))]
    UnknownCommand { name: String },

    /// A plugin descriptor failed the acceptance checks at startup
    #[error("Plugin \"{id}\" was rejected: {reason}")]
    #[diagnostic(code(chat_console::plugin_rejected))]
    PluginRejected { id: String, reason: RejectReason },
}

impl ConsoleError {
    /// Severity the output sink should use for this error
    pub fn severity(&self) -> Severity {
        match self {
            ConsoleError::Validation { .. } => Severity::Error,
            ConsoleError::ArgumentCount { .. } => Severity::Info,
            ConsoleError::ArgumentTypeMismatch(_) => Severity::Warning,
            ConsoleError::ArgumentParse { severity, .. } => *severity,
            ConsoleError::UnknownParser { .. } => Severity::Error,
            ConsoleError::UnknownCommand { .. } => Severity::Info,
            ConsoleError::PluginRejected { .. } => Severity::Warning,
        }
    }
}

impl From<ArgumentError> for ConsoleError {
    fn from(err: ArgumentError) -> Self {
        ConsoleError::ArgumentParse {
            message: err.message,
            severity: err.severity,
        }
    }
}

/// How an argument read disagreed with the way it was bound
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// Scalar accessor used on a linked argument
    #[error("Use values() instead")]
    Linked,

    /// Sequence accessor used on a scalar argument
    #[error("Use value() instead")]
    Scalar,

    /// Requested type differs from the parameter's declared type
    #[error("The argument {position} has a type of \"{declared}\" instead of the expected type \"{requested}\"")]
    Type {
        position: usize,
        declared: String,
        requested: String,
    },
}

/// Why a plugin descriptor was turned away
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    #[error("no host component with this id is loaded")]
    UnknownOwner,

    #[error("a descriptor with this id was already registered")]
    AlreadyRegistered,

    #[error("the descriptor declares no commands")]
    NoCommands,
}

// ============================================================================
// Argument errors raised by parsers and handlers
// ============================================================================

/// Error a custom parser or a handler raises about one of its arguments
///
/// The message and severity are forwarded to the output sink verbatim.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
#[diagnostic(code(chat_console::argument))]
pub struct ArgumentError {
    message: String,
    severity: Severity,
}

impl ArgumentError {
    /// Create an argument error with `Info` severity
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message).with_severity(Severity::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message).with_severity(Severity::Error)
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

/// Recover the severity of a handler failure
///
/// Reports built from console or argument errors keep their severity,
/// anything else is an `Error`.
pub fn report_severity(report: &miette::Report) -> Severity {
    if let Some(err) = report.downcast_ref::<ConsoleError>() {
        err.severity()
    } else if let Some(err) = report.downcast_ref::<ArgumentError>() {
        err.severity()
    } else {
        Severity::Error
    }
}
