//! Secondary index definitions for the RAG content collection.
//!
//! Indexes:
//! - `{ "metadata.product_id": 1 }` - product lookups
//! - `{ "metadata.category": 1 }` - per-category queries and reports

use mongodb::{bson::doc, IndexModel};

/// Field paths indexed on the RAG content collection, in creation order.
pub const RAG_CONTENT_INDEX_PATHS: &[&str] = &["metadata.product_id", "metadata.category"];

/// Single-field ascending index on `path`.
pub fn ascending(path: &str) -> IndexModel {
    IndexModel::builder().keys(doc! { path: 1 }).build()
}

/// Name the server assigns to an unnamed single-field ascending index.
pub fn default_name(path: &str) -> String {
    format!("{}_1", path)
}
