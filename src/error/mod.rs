//! Error types and handling for botstrap
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//! A single flat enum covers the whole tool; variants carry the operator-facing
//! help text (most importantly the resume hint after a step failure).

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for botstrap operations
#[derive(Error, Diagnostic, Debug)]
pub enum BotstrapError {
    // Step selection errors
    #[error("Unknown step '{step}'")]
    #[diagnostic(
        code(botstrap::step::unknown),
        help("Steps are addressed by identifier or ordinal. Run 'botstrap --status' to list them.")
    )]
    UnknownStep { step: String },

    // Step execution errors
    #[error("Step '{step}' failed: {reason}")]
    #[diagnostic(
        code(botstrap::step::failed),
        help(
            "Retry just this step with 'botstrap --step {step}', or resume the run from it with 'botstrap --from-step {step}'"
        )
    )]
    StepFailed { step: String, reason: String },

    // Selective installer errors
    #[error("Install source not found: {path}")]
    #[diagnostic(
        code(botstrap::install::source_missing),
        help("The payload directory may be incomplete. Check --payload-dir / BOTSTRAP_PAYLOAD_DIR.")
    )]
    SourceMissing { path: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(botstrap::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(botstrap::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(botstrap::fs::io_error))]
    IoError { message: String },

    // External command errors
    #[error("Command '{command}' failed: {reason}")]
    #[diagnostic(code(botstrap::shell::command_failed))]
    CommandFailed { command: String, reason: String },

    #[error("Required command not available: {command}")]
    #[diagnostic(
        code(botstrap::shell::command_unavailable),
        help("Install the missing tool, then re-run; completed steps will be skipped.")
    )]
    CommandUnavailable { command: String },

    // Interactive prompt errors
    #[error("Prompt cancelled or failed: {reason}")]
    #[diagnostic(code(botstrap::prompt::failed))]
    PromptFailed { reason: String },

    // State store errors
    #[error("Failed to serialize completion state: {reason}")]
    #[diagnostic(code(botstrap::state::serialize_failed))]
    StateSerializeFailed { reason: String },
}

impl From<std::io::Error> for BotstrapError {
    fn from(err: std::io::Error) -> Self {
        BotstrapError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for BotstrapError {
    fn from(err: serde_json::Error) -> Self {
        BotstrapError::StateSerializeFailed {
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for BotstrapError {
    fn from(err: inquire::InquireError) -> Self {
        BotstrapError::PromptFailed {
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, BotstrapError>;
