use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use mongodb::bson::Document;
use ragseed_db::{indexes::RAG_CONTENT_INDEX_PATHS, inspect, steps::CreateIndexStep};
use ragseed_kernel::{
    settings::{SeedMode, Settings},
    Step, StepCtx,
};

#[derive(Parser, Debug)]
#[command(name = "ragseed-cli", version, about = "Bootstrap and inspect the RAG content store")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the collection and indexes, then write the seed document
    Init {
        /// Override the configured seed mode
        #[arg(long, value_enum)]
        seed_mode: Option<SeedModeArg>,
    },
    /// Ping the server, ensure indexes, and log database stats
    Verify,
    /// Print document counts per category, indexes, and sample documents
    Report {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
        /// Case-insensitive regex matched against `content`
        #[arg(long, value_name = "PATTERN")]
        search: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SeedModeArg {
    Insert,
    Upsert,
}

impl From<SeedModeArg> for SeedMode {
    fn from(arg: SeedModeArg) -> Self {
        match arg {
            SeedModeArg::Insert => SeedMode::Insert,
            SeedModeArg::Upsert => SeedMode::Upsert,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load ragseed settings")?;
    ragseed_telemetry::init(&settings.telemetry)?;

    match cli.command {
        Command::Init { seed_mode } => {
            if let Some(mode) = seed_mode {
                settings.seed.mode = mode.into();
            }
            let summary = ragseed::run(&settings).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Verify => verify(&settings).await?,
        Command::Report { json, search } => report(&settings, json, search.as_deref()).await?,
    }

    Ok(())
}

async fn verify(settings: &Settings) -> anyhow::Result<()> {
    let client = ragseed_db::connect(&settings.database)
        .await
        .with_context(|| format!("failed to connect to {}", settings.database.uri))?;
    tracing::info!("successfully connected to MongoDB");

    let db = ragseed_db::database(&client, &settings.database);
    let collection = db.collection::<Document>(&settings.database.collection);
    let ctx = StepCtx { settings };
    for path in RAG_CONTENT_INDEX_PATHS {
        let step = CreateIndexStep::new(collection.clone(), *path);
        let outcome = step
            .apply(&ctx)
            .await
            .with_context(|| format!("failed to apply step '{}'", step.name()))?;
        tracing::info!(step = %step.name(), %outcome, "index checked");
    }

    let stats = inspect::database_stats(&db).await?;
    tracing::info!(database = %db.name(), stats = %stats, "database stats");
    Ok(())
}

async fn report(settings: &Settings, json: bool, search: Option<&str>) -> anyhow::Result<()> {
    let client = ragseed_db::connect(&settings.database)
        .await
        .with_context(|| format!("failed to connect to {}", settings.database.uri))?;
    let db = ragseed_db::database(&client, &settings.database);
    let collection = db.collection::<Document>(&settings.database.collection);

    let report = inspect::collection_report(&collection, search).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Total documents in {}: {}", report.collection, report.total);
    println!("Documents by category:");
    for entry in &report.categories {
        println!("  {}: {}", entry.category, entry.count);
    }
    println!("Indexes: {}", report.indexes.join(", "));

    println!("Sample documents:");
    for sample in &report.samples {
        println!("  {}", sample);
    }
    if let Some(result) = &report.search {
        println!("Matches for '{}':", result.pattern);
        for found in &result.matches {
            println!("  {}", found);
        }
    }
    Ok(())
}
