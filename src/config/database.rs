use mongodb::{Client, Database};
use std::env;

/// Connects to the interaction store. Returns `None` when `MONGODB_URI` is
/// unset, which leaves interaction records in the log stream only.
pub async fn connect() -> Result<Option<Database>, mongodb::error::Error> {
    let uri = match env::var("MONGODB_URI") {
        Ok(uri) if !uri.trim().is_empty() => uri,
        _ => return Ok(None),
    };
    let db_name = env::var("MONGODB_DATABASE").unwrap_or_else(|_| "snowchat".to_string());

    let client = Client::with_uri_str(&uri).await?;

    Ok(Some(client.database(&db_name)))
}
