//! CLI definitions using clap derive API
//!
//! One flat flag surface (no subcommands): the run mode falls out of which
//! flags are present, with no flags meaning Smart Mode. Conflicting selectors
//! are rejected by clap with a usage error before any state is touched.

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

use crate::engine::{ExecutionRequest, RunMode};

/// botstrap - robot target provisioning
#[derive(Parser, Debug)]
#[command(
    name = "botstrap",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Provisioning orchestrator for single-board AI robot targets",
    long_about = "Provisioning orchestrator for single-board AI robot targets. Botstrap drives \
                  the ordered provisioning sequence (packages, audio, display, language, models, \
                  services) and records which steps completed, so re-running after a failure or \
                  reboot only does the remaining work.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  botstrap                        \x1b[90m# Smart Mode: run whatever is not done yet\x1b[0m\n   \
                  botstrap --force                \x1b[90m# Start over: clear state, run everything\x1b[0m\n   \
                  botstrap --step audio           \x1b[90m# Re-run exactly one step\x1b[0m\n   \
                  botstrap --from-step 4          \x1b[90m# Resume from step 4 onwards\x1b[0m\n   \
                  botstrap --reconfigure          \x1b[90m# Re-run configuration prompts\x1b[0m\n   \
                  botstrap --status               \x1b[90m# Show per-step completion state\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Re-run steps even when already complete. On its own this clears all
    /// completion state first; with --step/--from-step it only bypasses the
    /// completeness check for the selected steps.
    #[arg(long)]
    pub force: bool,

    /// Run exactly one step (identifier or ordinal), even if already complete
    #[arg(long, value_name = "STEP", conflicts_with = "from_step")]
    pub step: Option<String>,

    /// Run every step from the given one (identifier or ordinal) onwards
    #[arg(long = "from-step", value_name = "STEP")]
    pub from_step: Option<String>,

    /// Re-run configuration prompts in steps that own them
    #[arg(long)]
    pub reconfigure: bool,

    /// Clear all recorded completions and exit
    #[arg(long = "reset-state")]
    pub reset_state: bool,

    /// Show each step's completion state and exit
    #[arg(
        long,
        conflicts_with_all = ["force", "step", "from_step", "reset_state", "reconfigure"]
    )]
    pub status: bool,

    /// Install under an alternate root (staging); host services are left alone
    #[arg(long, value_name = "DIR", env = "BOTSTRAP_ROOT")]
    pub root: Option<PathBuf>,

    /// Directory holding the completion state file
    #[arg(long = "state-dir", value_name = "DIR", env = "BOTSTRAP_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Directory holding the step payload trees
    #[arg(long = "payload-dir", value_name = "DIR", env = "BOTSTRAP_PAYLOAD_DIR")]
    pub payload_dir: Option<PathBuf>,
}

impl Cli {
    /// Resolve the flag combination into one request. Precedence mirrors the
    /// engine's mode resolution: reset short-circuits, then the selectors,
    /// then bare force, then Smart.
    pub fn to_request(&self) -> ExecutionRequest {
        let mode = if self.reset_state {
            RunMode::ResetState
        } else if let Some(step) = &self.step {
            RunMode::SingleStep(step.clone())
        } else if let Some(from) = &self.from_step {
            RunMode::FromStep(from.clone())
        } else if self.force {
            RunMode::Force
        } else {
            RunMode::Smart
        };

        ExecutionRequest {
            mode,
            force: self.force,
            reconfigure: self.reconfigure,
        }
    }
}
