//! ragseed
//!
//! One-shot bootstrap of the RAG content store: select the database, create the
//! content collection and its indexes, and write the seed document.

pub mod bootstrap;
pub mod plan;

pub use bootstrap::{run, BootstrapSummary};
