//! AI chatbot service deployment
//!
//! Deploys the chatbot payload tree and systemd unit through the selective
//! installer, seeds a default `config.ini` when none exists, and enables the
//! unit on live targets.

use crate::common::{fs, shell};
use crate::error::Result;
use crate::installer;
use crate::registry::StepContext;
use crate::ui;

const SERVICE_UNIT: &str = "ai-chatbot.service";
const CONFIG_FILE: &str = "etc/ai-chatbot/config.ini";

/// Defaults matching what the chatbot itself would generate on first start
const DEFAULT_CONFIG: &str = "\
[ollama]
ollama_host = local

[llm]
text_model = llama3.2:1b
vision_model = moondream

[vosk]
model_path = /usr/share/vosk-models/default
";

pub fn run(ctx: &StepContext) -> Result<()> {
    let summary = installer::install_tree(
        0o755,
        &ctx.target.payload("chatbot/opt"),
        &ctx.target.path("opt/ai-chatbot"),
    )?;
    ui::info(&format!(
        "chatbot payload: {} file(s) written, {} unchanged",
        summary.changed(),
        summary.unchanged
    ));

    let unit = installer::install_if_changed(
        0o644,
        &ctx.target.payload(&format!("chatbot/{SERVICE_UNIT}")),
        &ctx.target.path(&format!("etc/systemd/system/{SERVICE_UNIT}")),
    )?;
    ui::info(&format!("{SERVICE_UNIT}: {}", unit.describe()));

    // never clobber an operator-edited config
    if fs::write_if_absent(&ctx.target.path(CONFIG_FILE), DEFAULT_CONFIG)? {
        ui::info("default config.ini written");
    }

    if ctx.target.is_live() {
        shell::run("systemctl", &["daemon-reload"])?;
        shell::run("systemctl", &["enable", SERVICE_UNIT])?;
    }

    Ok(())
}
