use anyhow::Context;
use std::sync::Arc;

use crate::step::{Step, StepCtx, StepOutcome};

/// Outcome of one step after a registry run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: String,
    pub outcome: StepOutcome,
}

/// Ordered set of bootstrap steps
pub struct StepRegistry {
    steps: Vec<Arc<dyn Step>>,
}

impl StepRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step; steps run in registration order
    pub fn register(&mut self, step: Arc<dyn Step>) {
        self.steps.push(step);
    }

    /// All registered steps, in run order
    pub fn steps(&self) -> &[Arc<dyn Step>] {
        &self.steps
    }

    /// Get a step by name
    pub fn get_step(&self, name: &str) -> Option<&Arc<dyn Step>> {
        self.steps.iter().find(|step| step.name() == name)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Apply every step in order, stopping at the first failure.
    ///
    /// There is no rollback: steps applied before the failing one stay applied.
    pub async fn run_all(&self, ctx: &StepCtx<'_>) -> anyhow::Result<Vec<StepReport>> {
        tracing::info!("applying {} bootstrap steps", self.steps.len());

        let mut reports = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            let name = step.name();
            tracing::info!(step = %name, "applying step");

            let outcome = step
                .apply(ctx)
                .await
                .with_context(|| format!("failed to apply step '{}'", name))?;

            tracing::info!(step = %name, %outcome, "step finished");
            reports.push(StepReport {
                step: name,
                outcome,
            });
        }

        Ok(reports)
    }
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use std::sync::Mutex;

    struct RecordingStep {
        name: &'static str,
        outcome: Option<StepOutcome>,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait::async_trait]
    impl Step for RecordingStep {
        fn name(&self) -> String {
            self.name.to_string()
        }

        async fn apply(&self, _ctx: &StepCtx<'_>) -> anyhow::Result<StepOutcome> {
            self.log.lock().unwrap().push(self.name);
            self.outcome
                .ok_or_else(|| anyhow::anyhow!("duplicate key on {}", self.name))
        }
    }

    fn step(
        name: &'static str,
        outcome: Option<StepOutcome>,
        log: &Arc<Mutex<Vec<&'static str>>>,
    ) -> Arc<dyn Step> {
        Arc::new(RecordingStep {
            name,
            outcome,
            log: Arc::clone(log),
        })
    }

    #[test]
    fn test_registry_creation() {
        let registry = StepRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_get_step_by_name() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = StepRegistry::new();
        registry.register(step("create_collection", Some(StepOutcome::Applied), &log));

        assert!(registry.get_step("create_collection").is_some());
        assert!(registry.get_step("insert_seed").is_none());
    }

    #[tokio::test]
    async fn test_steps_run_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = StepRegistry::new();
        registry.register(step("first", Some(StepOutcome::Applied), &log));
        registry.register(step("second", Some(StepOutcome::AlreadyPresent), &log));
        registry.register(step("third", Some(StepOutcome::Applied), &log));

        let settings = Settings::default();
        let ctx = StepCtx {
            settings: &settings,
        };
        let reports = registry.run_all(&ctx).await.unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[1].step, "second");
        assert_eq!(reports[1].outcome, StepOutcome::AlreadyPresent);
    }

    #[tokio::test]
    async fn test_failure_stops_remaining_steps() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = StepRegistry::new();
        registry.register(step("first", Some(StepOutcome::Applied), &log));
        registry.register(step("broken", None, &log));
        registry.register(step("never", Some(StepOutcome::Applied), &log));

        let settings = Settings::default();
        let ctx = StepCtx {
            settings: &settings,
        };
        let err = registry.run_all(&ctx).await.unwrap_err();

        assert_eq!(*log.lock().unwrap(), vec!["first", "broken"]);
        assert_eq!(err.to_string(), "failed to apply step 'broken'");
        assert!(format!("{:#}", err).contains("duplicate key on broken"));
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(StepOutcome::Applied.to_string(), "applied");
        assert_eq!(StepOutcome::AlreadyPresent.to_string(), "already_present");
    }
}
