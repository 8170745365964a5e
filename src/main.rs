//! botstrap - provisioning orchestrator
//!
//! Drives the ordered provisioning sequence for a single-board AI robot
//! target and tracks which steps completed, so a re-run after a partial
//! failure, reboot, or reconfiguration only does the remaining work.

use clap::Parser;
use console::Style;

mod cli;
mod common;
mod engine;
mod error;
mod hash;
mod installer;
mod registry;
mod state;
mod steps;
mod target;
mod ui;

use cli::Cli;
use engine::{ExecutionEngine, RunMode, RunResult};
use error::Result;
use registry::StepRegistry;
use state::StateStore;
use target::Target;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let target = Target::resolve(
        cli.root.clone(),
        cli.state_dir.clone(),
        cli.payload_dir.clone(),
    );
    let mut state = StateStore::open(&target.state_dir);

    if let Some(warning) = state.load_warning() {
        ui::warn(warning);
    }
    if state.is_degraded() {
        ui::warn(
            "step tracking disabled: every step will run and completions will not be recorded",
        );
    }

    let registry = steps::registry();

    if cli.status {
        print_status(&registry, &state);
        return Ok(());
    }

    let request = cli.to_request();
    let reset_only = request.mode == RunMode::ResetState;

    let result = ExecutionEngine::new(&registry, &mut state, &target).execute(&request)?;

    if !reset_only {
        print_summary(&result);
    }
    Ok(())
}

/// Per-step completion report for `--status`
fn print_status(registry: &StepRegistry, state: &StateStore) {
    ui::banner(&format!("botstrap {}", env!("CARGO_PKG_VERSION")));
    println!("State file: {}", state.file_path().display());
    println!();

    for step in registry.steps() {
        let label = format!("[{}] {:<18}", step.ordinal, step.identifier);
        match state.timestamp(step.identifier) {
            Some(timestamp) => println!(
                "  {} {} completed {}",
                Style::new().green().apply_to("✓"),
                label,
                timestamp
            ),
            None => println!(
                "  {} {} {}",
                Style::new().dim().apply_to("·"),
                label,
                Style::new().dim().apply_to("pending")
            ),
        }
    }

    if state.count() > 0 {
        println!();
        println!("Completion history:");
        for (identifier, timestamp) in state.completed() {
            println!("  {timestamp}  {identifier}");
        }
    }

    println!();
    println!("{} of {} steps completed", state.count(), registry.len());
}

fn print_summary(result: &RunResult) {
    println!();
    if result.executed() == 0 {
        ui::ok("Nothing to do: no steps executed");
    } else {
        ui::ok(&format!(
            "{} step(s) executed, {} skipped",
            result.executed(),
            result.skipped()
        ));
    }
}
