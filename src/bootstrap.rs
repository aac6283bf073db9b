use anyhow::Context;
use ragseed_kernel::{settings::Settings, StepCtx, StepReport};
use serde::Serialize;

use crate::plan;

/// What a bootstrap run touched and how each step ended.
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapSummary {
    pub database: String,
    pub collection: String,
    pub steps: Vec<StepSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepSummary {
    pub step: String,
    pub outcome: String,
}

impl From<StepReport> for StepSummary {
    fn from(report: StepReport) -> Self {
        Self {
            step: report.step,
            outcome: report.outcome.to_string(),
        }
    }
}

/// Connect, select the database, and apply every bootstrap step in order.
///
/// The first failing step aborts the run. Nothing already applied is undone.
pub async fn run(settings: &Settings) -> anyhow::Result<BootstrapSummary> {
    tracing::info!(
        env = ?settings.environment,
        database = %settings.database.name,
        collection = %settings.database.collection,
        seed_mode = ?settings.seed.mode,
        "bootstrap starting"
    );

    let client = ragseed_db::connect(&settings.database)
        .await
        .with_context(|| format!("failed to connect to {}", settings.database.uri))?;
    let db = ragseed_db::database(&client, &settings.database);

    let registry = plan::build_registry(&db, &settings.database);
    let ctx = StepCtx { settings };
    let reports = registry.run_all(&ctx).await?;

    tracing::info!("bootstrap complete");
    Ok(BootstrapSummary {
        database: settings.database.name.clone(),
        collection: settings.database.collection.clone(),
        steps: reports.into_iter().map(StepSummary::from).collect(),
    })
}
