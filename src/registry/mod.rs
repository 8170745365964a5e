//! Ordered, immutable step registry
//!
//! The registry is loaded once per process and never mutated or reordered at
//! runtime. Ordinals define the default execution order; identifiers are the
//! stable keys used for state lookups and `--step` targeting. Both are unique.

use crate::error::Result;
use crate::target::Target;

/// Everything a handler gets from the engine for one invocation
pub struct StepContext<'a> {
    /// Re-run configuration prompts even when a config file already exists
    pub reconfigure: bool,
    /// Filesystem layout of the machine being provisioned
    pub target: &'a Target,
}

/// The opaque body of a step. Reports only success or failure; the engine
/// never looks inside.
pub trait StepHandler {
    fn run(&self, ctx: &StepContext) -> Result<()>;
}

impl<F> StepHandler for F
where
    F: Fn(&StepContext) -> Result<()>,
{
    fn run(&self, ctx: &StepContext) -> Result<()> {
        self(ctx)
    }
}

/// Immutable descriptor of one provisioning step
pub struct Step {
    pub ordinal: u32,
    pub identifier: &'static str,
    /// One-line human description, display only
    pub title: &'static str,
    /// Step may prompt on the terminal; the engine keeps its spinner away
    pub interactive: bool,
    handler: Box<dyn StepHandler>,
}

impl Step {
    pub fn new(
        ordinal: u32,
        identifier: &'static str,
        title: &'static str,
        handler: impl StepHandler + 'static,
    ) -> Self {
        Self {
            ordinal,
            identifier,
            title,
            interactive: false,
            handler: Box::new(handler),
        }
    }

    /// Mark the step as owning a terminal prompt
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Invoke the handler
    pub fn run(&self, ctx: &StepContext) -> Result<()> {
        self.handler.run(ctx)
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("ordinal", &self.ordinal)
            .field("identifier", &self.identifier)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Ordered sequence of steps, fixed at construction
#[derive(Debug)]
pub struct StepRegistry {
    steps: Vec<Step>,
}

impl StepRegistry {
    /// Build a registry. Ordinal and identifier uniqueness is an invariant
    /// of the (static) step table, checked in debug builds.
    pub fn new(steps: Vec<Step>) -> Self {
        debug_assert!(
            {
                let mut ids: Vec<_> = steps.iter().map(|s| s.identifier).collect();
                ids.sort_unstable();
                ids.dedup();
                ids.len() == steps.len()
            },
            "duplicate step identifier in registry"
        );
        debug_assert!(
            {
                let mut ords: Vec<_> = steps.iter().map(|s| s.ordinal).collect();
                ords.sort_unstable();
                ords.dedup();
                ords.len() == steps.len()
            },
            "duplicate step ordinal in registry"
        );

        Self { steps }
    }

    /// All steps in declaration (= ordinal) order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Look up a step by identifier
    pub fn find(&self, identifier: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.identifier == identifier)
    }

    /// Look up a step by ordinal
    pub fn find_by_ordinal(&self, ordinal: u32) -> Option<&Step> {
        self.steps.iter().find(|s| s.ordinal == ordinal)
    }

    /// Resolve a `--step`/`--from-step` selector: identifier first, then a
    /// bare ordinal.
    pub fn resolve(&self, selector: &str) -> Option<&Step> {
        if let Some(step) = self.find(selector) {
            return Some(step);
        }
        selector
            .parse::<u32>()
            .ok()
            .and_then(|ordinal| self.find_by_ordinal(ordinal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &StepContext) -> Result<()> {
        Ok(())
    }

    fn sample_registry() -> StepRegistry {
        StepRegistry::new(vec![
            Step::new(0, "system-packages", "Install base system packages", noop),
            Step::new(1, "audio", "Configure audio output", noop),
            Step::new(2, "display", "Deploy the status display", noop),
        ])
    }

    #[test]
    fn test_steps_in_declaration_order() {
        let registry = sample_registry();
        let ids: Vec<&str> = registry.steps().iter().map(|s| s.identifier).collect();
        assert_eq!(ids, vec!["system-packages", "audio", "display"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_find_by_identifier() {
        let registry = sample_registry();
        assert_eq!(registry.find("audio").map(|s| s.ordinal), Some(1));
        assert!(registry.find("nope").is_none());
    }

    #[test]
    fn test_find_by_ordinal() {
        let registry = sample_registry();
        assert_eq!(
            registry.find_by_ordinal(2).map(|s| s.identifier),
            Some("display")
        );
        assert!(registry.find_by_ordinal(9).is_none());
    }

    #[test]
    fn test_resolve_prefers_identifier_then_ordinal() {
        let registry = sample_registry();
        assert_eq!(registry.resolve("audio").map(|s| s.ordinal), Some(1));
        assert_eq!(registry.resolve("2").map(|s| s.identifier), Some("display"));
        assert!(registry.resolve("99").is_none());
        assert!(registry.resolve("not-a-step").is_none());
    }

    #[test]
    fn test_interactive_flag() {
        let step = Step::new(3, "language", "Choose the display language", noop).interactive();
        assert!(step.interactive);
    }
}
