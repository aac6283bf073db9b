pub mod registry;
pub mod settings;
pub mod step;

pub use registry::{StepRegistry, StepReport};
pub use step::{Step, StepCtx, StepOutcome};
