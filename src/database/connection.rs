use mongodb::{Client, Database};

use crate::config::AppConfig;

pub async fn get_db_client(config: &AppConfig) -> Database {
    let client = Client::with_uri_str(&config.database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db = client.database(&config.database_name);

    // Verify the database is reachable by listing collections
    match db.list_collection_names().await {
        Ok(collections) => {
            tracing::info!("Connected to database: {}", config.database_name);
            tracing::info!("Collections found: {:?}", collections);

            for required in ["settings", "message", "employee"] {
                if !collections.contains(&required.to_string()) {
                    tracing::warn!("Collection '{required}' not found in database");
                }
            }
        }
        Err(e) => {
            tracing::error!(
                "Database '{}' may not exist or is inaccessible: {e}",
                config.database_name
            );
        }
    }

    db
}
