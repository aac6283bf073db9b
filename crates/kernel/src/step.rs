use std::fmt;

use async_trait::async_trait;

/// Context handed to every step while the bootstrap plan runs
pub struct StepCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// Result of applying a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step changed database state
    Applied,
    /// The target resource was already there; nothing was written
    AlreadyPresent,
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Applied => f.write_str("applied"),
            StepOutcome::AlreadyPresent => f.write_str("already_present"),
        }
    }
}

/// One ordered unit of the bootstrap plan
#[async_trait]
pub trait Step: Sync + Send {
    /// Name used in logs and reports, unique within a registry
    fn name(&self) -> String;

    /// Apply the step against the target database.
    /// Errors abort the remaining plan; earlier steps are not undone.
    async fn apply(&self, ctx: &StepCtx<'_>) -> anyhow::Result<StepOutcome>;
}
