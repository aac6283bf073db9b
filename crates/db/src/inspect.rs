//! Read-only queries used by operators after a bootstrap run.

use anyhow::Context;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    Collection, Database,
};
use serde::Serialize;

const CATEGORY_PATH: &str = "metadata.category";
const SAMPLE_LIMIT: i64 = 3;
const SEARCH_LIMIT: i64 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Documents whose `content` matched a case-insensitive pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub pattern: String,
    pub matches: Vec<Document>,
}

/// Snapshot of the content collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionReport {
    pub collection: String,
    pub total: u64,
    pub categories: Vec<CategoryCount>,
    pub indexes: Vec<String>,
    pub samples: Vec<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchResult>,
}

/// Run `dbStats` against the database.
pub async fn database_stats(db: &Database) -> anyhow::Result<Document> {
    db.run_command(doc! { "dbStats": 1 })
        .await
        .with_context(|| format!("failed to read stats for database '{}'", db.name()))
}

/// Case-insensitive regex filter on `content`. The pattern is passed through as a regex.
pub fn search_filter(pattern: &str) -> Document {
    doc! { "content": { "$regex": pattern, "$options": "i" } }
}

/// Count documents overall and per `metadata.category`, list index names,
/// pull a few sample documents and, when `search` is set, the first matches.
pub async fn collection_report(
    collection: &Collection<Document>,
    search: Option<&str>,
) -> anyhow::Result<CollectionReport> {
    let total = collection
        .count_documents(doc! {})
        .await
        .with_context(|| "failed to count documents")?;

    let values = collection
        .distinct(CATEGORY_PATH, doc! {})
        .await
        .with_context(|| "failed to list categories")?;

    let mut categories = Vec::new();
    for value in values {
        let count = collection
            .count_documents(doc! { CATEGORY_PATH: value.clone() })
            .await
            .with_context(|| format!("failed to count category {}", value))?;
        categories.push(CategoryCount {
            category: category_label(&value),
            count,
        });
    }

    let mut indexes = collection
        .list_index_names()
        .await
        .with_context(|| "failed to list indexes")?;
    indexes.sort();

    let samples = find_limited(collection, doc! {}, SAMPLE_LIMIT)
        .await
        .with_context(|| "failed to read sample documents")?;

    let search = match search {
        Some(pattern) => {
            let matches = find_limited(collection, search_filter(pattern), SEARCH_LIMIT)
                .await
                .with_context(|| format!("failed to search content for '{}'", pattern))?;
            Some(SearchResult {
                pattern: pattern.to_string(),
                matches,
            })
        }
        None => None,
    };

    Ok(CollectionReport {
        collection: collection.name().to_string(),
        total,
        categories,
        indexes,
        samples,
        search,
    })
}

async fn find_limited(
    collection: &Collection<Document>,
    filter: Document,
    limit: i64,
) -> mongodb::error::Result<Vec<Document>> {
    collection.find(filter).limit(limit).await?.try_collect().await
}

fn category_label(value: &Bson) -> String {
    match value {
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}
