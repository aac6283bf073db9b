use mongodb::bson::{self, doc, DateTime, Document};
use ragseed_kernel::settings::SeedSettings;
use serde::{Deserialize, Serialize};

/// Placeholder record proving the collection accepts writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedDocument {
    pub content: String,
    pub content_type: String,
    pub metadata: SeedMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedMetadata {
    pub test: bool,
    pub timestamp: DateTime,
}

impl SeedDocument {
    /// Seed document stamped with `timestamp`.
    pub fn placeholder(settings: &SeedSettings, timestamp: DateTime) -> Self {
        Self {
            content: settings.content.clone(),
            content_type: settings.content_type.clone(),
            metadata: SeedMetadata {
                test: true,
                timestamp,
            },
        }
    }

    pub fn to_document(&self) -> bson::ser::Result<Document> {
        bson::to_document(self)
    }
}

/// Filter matching documents written by the bootstrap for `content_type`.
pub fn seed_filter(content_type: &str) -> Document {
    doc! {
        "content_type": content_type,
        "metadata.test": true,
    }
}
