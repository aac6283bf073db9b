use anyhow::Context;
use ragseed_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load ragseed settings")?;
    ragseed_telemetry::init(&settings.telemetry)?;

    let summary = ragseed::run(&settings).await?;
    for step in &summary.steps {
        tracing::info!(step = %step.step, outcome = %step.outcome, "step summary");
    }

    Ok(())
}
