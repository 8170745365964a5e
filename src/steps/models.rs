//! Model acquisition: speech recognition and the LLM runtime
//!
//! Both handlers check for an already-populated destination before touching
//! the network, so operator retries after a partial failure do not re-download
//! hundreds of megabytes.

use std::fs;

use crate::common::shell;
use crate::error::{BotstrapError, Result};
use crate::registry::StepContext;
use crate::ui;

/// Where the chatbot expects the speech model
const VOSK_MODEL_DIR: &str = "usr/share/vosk-models/default";

const VOSK_MODEL_URL: &str =
    "https://alphacephei.com/vosk/models/vosk-model-small-en-us-0.15.zip";

/// Marker file that only exists in a fully unpacked model
const VOSK_MODEL_MARKER: &str = "am/final.mdl";

const TEXT_MODEL: &str = "llama3.2:1b";
const VISION_MODEL: &str = "moondream";

/// Fetch and unpack the VOSK speech recognition model
pub fn speech(ctx: &StepContext) -> Result<()> {
    let model_dir = ctx.target.path(VOSK_MODEL_DIR);
    if model_dir.join(VOSK_MODEL_MARKER).is_file() {
        ui::info("speech model already present");
        return Ok(());
    }

    let staging = tempfile::tempdir().map_err(|e| BotstrapError::IoError {
        message: format!("cannot create download directory: {e}"),
    })?;
    let archive = staging.path().join("vosk-model.zip");
    let archive_str = archive.display().to_string();
    let staging_str = staging.path().display().to_string();

    shell::run("curl", &["-fsSL", "-o", &archive_str, VOSK_MODEL_URL])?;
    shell::run("unzip", &["-q", &archive_str, "-d", &staging_str])?;

    // the archive unpacks to a single versioned directory
    let unpacked = fs::read_dir(staging.path())
        .map_err(|e| BotstrapError::IoError {
            message: e.to_string(),
        })?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .find(|p| p.is_dir())
        .ok_or_else(|| BotstrapError::SourceMissing {
            path: format!("{}/<model dir>", staging.path().display()),
        })?;

    if let Some(parent) = model_dir.parent() {
        fs::create_dir_all(parent).map_err(|e| BotstrapError::FileWriteFailed {
            path: parent.display().to_string(),
            reason: e.to_string(),
        })?;
    }
    if model_dir.exists() {
        // leftovers from an interrupted unpack
        let _ = fs::remove_dir_all(&model_dir);
    }
    fs::rename(&unpacked, &model_dir).map_err(|e| BotstrapError::FileWriteFailed {
        path: model_dir.display().to_string(),
        reason: e.to_string(),
    })?;

    Ok(())
}

/// Install the Ollama runtime if absent and pull the chat + vision models
pub fn llm(ctx: &StepContext) -> Result<()> {
    if !ctx.target.is_live() {
        ui::info("staging root: LLM runtime installation skipped");
        return Ok(());
    }

    if shell::is_available("ollama") {
        ui::info("ollama runtime already installed");
    } else {
        shell::run("sh", &["-c", "curl -fsSL https://ollama.com/install.sh | sh"])?;
    }

    shell::run("ollama", &["pull", TEXT_MODEL])?;
    shell::run("ollama", &["pull", VISION_MODEL])?;

    Ok(())
}
