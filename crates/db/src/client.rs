use std::time::Duration;

use mongodb::{bson::doc, options::ClientOptions, Client, Database};
use ragseed_kernel::settings::DatabaseSettings;

use crate::error::DbError;

/// Build a client from settings and confirm the server answers `ping`.
pub async fn connect(settings: &DatabaseSettings) -> Result<Client, DbError> {
    let mut options =
        ClientOptions::parse(&settings.uri)
            .await
            .map_err(|source| DbError::InvalidUri {
                uri: settings.uri.clone(),
                source,
            })?;
    options.server_selection_timeout =
        Some(Duration::from_millis(settings.server_selection_timeout_ms));
    if let Some(app_name) = &settings.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options).map_err(DbError::Connect)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(DbError::Ping)?;

    tracing::info!(target: "ragseed-db", "connected to MongoDB");
    Ok(client)
}

/// Select the configured database. No server round trip happens here.
pub fn database(client: &Client, settings: &DatabaseSettings) -> Database {
    tracing::info!(target: "ragseed-db", database = %settings.name, "selected database");
    client.database(&settings.name)
}
