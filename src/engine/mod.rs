//! Execution engine: mode resolution, step filtering, sequential execution
//!
//! One engine instance drives one run. Steps execute strictly in ordinal
//! order, each handler blocking to completion before the next starts; the
//! first unrecovered failure aborts the whole run with a resume hint.
//! Completions recorded earlier in the run are kept; the engine never rolls
//! back state bookkeeping and never retries a handler on its own.

use crate::error::{BotstrapError, Result};
use crate::registry::{Step, StepContext, StepRegistry};
use crate::state::StateStore;
use crate::target::Target;
use crate::ui;

/// Run mode, resolved from CLI flags. Evaluated in declaration order:
/// `ResetState` short-circuits everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Default: run every step without a completion marker
    Smart,
    /// Bare `--force`: clear all state, then run everything
    Force,
    /// `--step <sel>`: exactly one step, executed unconditionally
    SingleStep(String),
    /// `--from-step <sel>`: every step from the selected ordinal on
    FromStep(String),
    /// `--reset-state`: clear the store and exit
    ResetState,
}

/// One invocation's worth of CLI input
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub mode: RunMode,
    /// `--force` given alongside a step selector: bypass completion checks
    /// for the selected steps without clearing anyone else's history
    pub force: bool,
    /// Passed through to every executed handler
    pub reconfigure: bool,
}

/// What happened to one step this run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Executed,
    Skipped,
}

/// Per-invocation summary, discarded after printing
#[derive(Debug, Default)]
pub struct RunResult {
    pub outcomes: Vec<(String, StepOutcome)>,
}

impl RunResult {
    pub fn executed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == StepOutcome::Executed)
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == StepOutcome::Skipped)
            .count()
    }
}

/// Drives one run against one target. Exclusive owner of the state store
/// for the duration (single-writer).
pub struct ExecutionEngine<'a> {
    registry: &'a StepRegistry,
    state: &'a mut StateStore,
    target: &'a Target,
}

impl<'a> ExecutionEngine<'a> {
    pub fn new(registry: &'a StepRegistry, state: &'a mut StateStore, target: &'a Target) -> Self {
        Self {
            registry,
            state,
            target,
        }
    }

    /// Execute one request to completion or first failure.
    pub fn execute(&mut self, request: &ExecutionRequest) -> Result<RunResult> {
        if request.mode == RunMode::ResetState {
            self.state.reset()?;
            ui::ok("Completion state cleared");
            return Ok(RunResult::default());
        }

        let plan = self.plan(&request.mode)?;

        // A bare --force wipes history before the loop; --force with a
        // selector must NOT touch completion records of unselected steps.
        if request.mode == RunMode::Force {
            self.state.reset()?;
        }

        let total = plan.len();
        let mut result = RunResult::default();

        for (position, step) in plan.iter().enumerate() {
            ui::step_header(position + 1, total, step.title);

            if self.should_skip(step, &request.mode, request.force) {
                let when = self.state.timestamp(step.identifier).unwrap_or("unknown");
                ui::skipped(&format!("already complete ({when})"));
                result
                    .outcomes
                    .push((step.identifier.to_string(), StepOutcome::Skipped));
                continue;
            }

            self.run_step(step, request.reconfigure)?;
            self.state.mark_complete(step.identifier)?;
            result
                .outcomes
                .push((step.identifier.to_string(), StepOutcome::Executed));
        }

        Ok(result)
    }

    /// Resolve the filtered step set for a mode. Unknown selectors fail the
    /// run here, before anything executes.
    fn plan(&self, mode: &RunMode) -> Result<Vec<&'a Step>> {
        match mode {
            RunMode::SingleStep(selector) => {
                let step = self.resolve(selector)?;
                Ok(vec![step])
            }
            RunMode::FromStep(selector) => {
                let from = self.resolve(selector)?;
                Ok(self
                    .registry
                    .steps()
                    .iter()
                    .filter(|s| s.ordinal >= from.ordinal)
                    .collect())
            }
            RunMode::Smart | RunMode::Force => Ok(self.registry.steps().iter().collect()),
            // Handled before planning
            RunMode::ResetState => Ok(Vec::new()),
        }
    }

    fn resolve(&self, selector: &str) -> Result<&'a Step> {
        self.registry
            .resolve(selector)
            .ok_or_else(|| BotstrapError::UnknownStep {
                step: selector.to_string(),
            })
    }

    fn should_skip(&self, step: &Step, mode: &RunMode, force: bool) -> bool {
        match mode {
            // Force ignores the store entirely (and has already reset it)
            RunMode::Force => false,
            // A targeted --step is an intentional retry and always executes
            RunMode::SingleStep(_) => false,
            RunMode::FromStep(_) => !force && self.state.is_complete(step.identifier),
            RunMode::Smart => self.state.is_complete(step.identifier),
            RunMode::ResetState => false,
        }
    }

    /// Invoke one handler, converting its failure into the run-aborting
    /// `StepFailed` and printing the resume hint.
    fn run_step(&self, step: &Step, reconfigure: bool) -> Result<()> {
        let ctx = StepContext {
            reconfigure,
            target: self.target,
        };

        let spinner = (!step.interactive).then(|| ui::handler_spinner(step.title));
        let outcome = step.run(&ctx);
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        match outcome {
            Ok(()) => {
                ui::ok("done");
                Ok(())
            }
            Err(e) => {
                ui::warn(&format!(
                    "step '{}' failed; aborting the run",
                    step.identifier
                ));
                ui::info(&format!(
                    "Retry just this step:   botstrap --step {}",
                    step.identifier
                ));
                ui::info(&format!(
                    "Resume from this step:  botstrap --from-step {}",
                    step.identifier
                ));
                Err(BotstrapError::StepFailed {
                    step: step.identifier.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }
}
