//! Concrete bootstrap steps against a MongoDB database.

use anyhow::Context;
use async_trait::async_trait;
use mongodb::{
    bson::{doc, DateTime, Document},
    Collection, Database,
};
use ragseed_kernel::{settings::SeedMode, Step, StepCtx, StepOutcome};

use crate::{
    error::{is_namespace_exists, is_namespace_not_found},
    indexes, seed,
};

/// Create the named collection. An existing collection is tolerated.
pub struct CreateCollectionStep {
    db: Database,
    collection: String,
}

impl CreateCollectionStep {
    pub fn new(db: Database, collection: impl Into<String>) -> Self {
        Self {
            db,
            collection: collection.into(),
        }
    }
}

#[async_trait]
impl Step for CreateCollectionStep {
    fn name(&self) -> String {
        "create_collection".to_string()
    }

    async fn apply(&self, _ctx: &StepCtx<'_>) -> anyhow::Result<StepOutcome> {
        let existing = self
            .db
            .list_collection_names()
            .await
            .with_context(|| format!("failed to list collections in '{}'", self.db.name()))?;
        if existing.contains(&self.collection) {
            tracing::info!(collection = %self.collection, "collection already exists");
            return Ok(StepOutcome::AlreadyPresent);
        }

        // Newer servers accept a duplicate create; older ones reply NamespaceExists.
        match self.db.create_collection(&self.collection).await {
            Ok(()) => {
                tracing::info!(collection = %self.collection, "collection created");
                Ok(StepOutcome::Applied)
            }
            Err(err) if is_namespace_exists(&err) => {
                tracing::info!(collection = %self.collection, "collection already exists");
                Ok(StepOutcome::AlreadyPresent)
            }
            Err(err) => Err(err)
                .with_context(|| format!("failed to create collection '{}'", self.collection)),
        }
    }
}

/// Create a single-field ascending index.
pub struct CreateIndexStep {
    collection: Collection<Document>,
    path: String,
}

impl CreateIndexStep {
    pub fn new(collection: Collection<Document>, path: impl Into<String>) -> Self {
        Self {
            collection,
            path: path.into(),
        }
    }
}

#[async_trait]
impl Step for CreateIndexStep {
    fn name(&self) -> String {
        format!("create_index:{}", self.path)
    }

    async fn apply(&self, _ctx: &StepCtx<'_>) -> anyhow::Result<StepOutcome> {
        let expected = indexes::default_name(&self.path);
        let existing = match self.collection.list_index_names().await {
            Ok(names) => names,
            Err(err) if is_namespace_not_found(&err) => Vec::new(),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to list indexes on '{}'", self.collection.name())
                })
            }
        };

        // Identical specs are a server-side no-op; a conflicting spec errors.
        let created = self
            .collection
            .create_index(indexes::ascending(&self.path))
            .await
            .with_context(|| format!("failed to create index on '{}'", self.path))?;

        tracing::info!(
            collection = %self.collection.name(),
            index = %created.index_name,
            "index ensured"
        );

        if existing.contains(&expected) {
            Ok(StepOutcome::AlreadyPresent)
        } else {
            Ok(StepOutcome::Applied)
        }
    }
}

/// Write the seed document, stamped with the wall clock at apply time.
pub struct InsertSeedStep {
    collection: Collection<Document>,
}

impl InsertSeedStep {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl Step for InsertSeedStep {
    fn name(&self) -> String {
        "insert_seed".to_string()
    }

    async fn apply(&self, ctx: &StepCtx<'_>) -> anyhow::Result<StepOutcome> {
        let settings = &ctx.settings.seed;
        let document = seed::SeedDocument::placeholder(settings, DateTime::now())
            .to_document()
            .with_context(|| "failed to encode seed document")?;

        match settings.mode {
            SeedMode::Insert => {
                let result = self
                    .collection
                    .insert_one(document)
                    .await
                    .with_context(|| "failed to insert seed document")?;
                tracing::info!(id = %result.inserted_id, "seed document inserted");
                Ok(StepOutcome::Applied)
            }
            SeedMode::Upsert => {
                let result = self
                    .collection
                    .update_one(
                        seed::seed_filter(&settings.content_type),
                        doc! { "$setOnInsert": document },
                    )
                    .upsert(true)
                    .await
                    .with_context(|| "failed to upsert seed document")?;

                match result.upserted_id {
                    Some(id) => {
                        tracing::info!(%id, "seed document inserted");
                        Ok(StepOutcome::Applied)
                    }
                    None => {
                        tracing::info!(
                            matched = result.matched_count,
                            "seed document already present"
                        );
                        Ok(StepOutcome::AlreadyPresent)
                    }
                }
            }
        }
    }
}
