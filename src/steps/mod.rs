//! Production step handlers
//!
//! The ordered provisioning sequence for a robot target. Each handler is an
//! independent unit of work invoked by the engine with a [`StepContext`];
//! the engine only ever sees success or failure. Handlers are safe to call
//! twice: file deployment goes through the selective installer, downloads
//! check for an already-populated destination, and config writers never
//! clobber operator edits.

pub mod audio;
pub mod chatbot;
pub mod display;
pub mod language;
pub mod models;
pub mod motor;
pub mod packages;

use crate::registry::{Step, StepRegistry};

/// The production step sequence, in execution order.
///
/// Later steps depend on earlier ones (the chatbot service needs the LLM
/// runtime, which needs the base packages), which is why a failed run
/// aborts instead of continuing.
pub fn registry() -> StepRegistry {
    StepRegistry::new(vec![
        Step::new(
            0,
            "system-packages",
            "Install base system packages",
            packages::run,
        ),
        Step::new(1, "audio", "Configure audio output", audio::run),
        Step::new(2, "display", "Deploy the status display", display::run),
        Step::new(
            3,
            "language",
            "Choose the display language",
            language::run,
        )
        .interactive(),
        Step::new(
            4,
            "speech-models",
            "Fetch the speech recognition model",
            models::speech,
        ),
        Step::new(
            5,
            "llm-runtime",
            "Install the LLM runtime and pull models",
            models::llm,
        ),
        Step::new(
            6,
            "chatbot-service",
            "Deploy the AI chatbot service",
            chatbot::run,
        ),
        Step::new(
            7,
            "motor-service",
            "Deploy the motor controller service",
            motor::run,
        ),
    ])
}
