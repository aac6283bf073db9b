use std::sync::Arc;

use mongodb::{bson::Document, Database};
use ragseed_db::{
    indexes::RAG_CONTENT_INDEX_PATHS,
    steps::{CreateCollectionStep, CreateIndexStep, InsertSeedStep},
};
use ragseed_kernel::{settings::DatabaseSettings, StepRegistry};

/// Register the bootstrap steps in run order:
/// collection, one index per indexed path, then the seed document.
pub fn register_all(registry: &mut StepRegistry, db: &Database, settings: &DatabaseSettings) {
    let collection = db.collection::<Document>(&settings.collection);

    registry.register(Arc::new(CreateCollectionStep::new(
        db.clone(),
        &settings.collection,
    )));
    for path in RAG_CONTENT_INDEX_PATHS {
        registry.register(Arc::new(CreateIndexStep::new(collection.clone(), *path)));
    }
    registry.register(Arc::new(InsertSeedStep::new(collection)));
}

pub fn build_registry(db: &Database, settings: &DatabaseSettings) -> StepRegistry {
    let mut registry = StepRegistry::new();
    register_all(&mut registry, db, settings);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::{options::ClientOptions, Client};

    // Building a client does not open a connection until the first operation.
    async fn offline_database() -> Database {
        let options = ClientOptions::parse("mongodb://localhost:27017")
            .await
            .unwrap();
        Client::with_options(options).unwrap().database("nuskin_rag")
    }

    #[tokio::test]
    async fn plan_runs_collection_then_indexes_then_seed() {
        let db = offline_database().await;
        let registry = build_registry(&db, &DatabaseSettings::default());

        let names: Vec<String> = registry.steps().iter().map(|step| step.name()).collect();
        assert_eq!(
            names,
            vec![
                "create_collection",
                "create_index:metadata.product_id",
                "create_index:metadata.category",
                "insert_seed",
            ]
        );
    }
}
