use crate::modules::interaction::model::Interaction;
use bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};

const COLLECTION_NAME: &str = "interactions";

pub struct InteractionCrud {
    collection: Collection<Interaction>,
}

impl InteractionCrud {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    pub async fn create(&self, interaction: Interaction) -> Result<Option<ObjectId>, mongodb::error::Error> {
        let result = self.collection.insert_one(interaction).await?;
        Ok(result.inserted_id.as_object_id())
    }

    pub async fn find_recent(&self, limit: i64) -> Result<Vec<Interaction>, mongodb::error::Error> {
        use futures::TryStreamExt;

        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await?;

        cursor.try_collect().await
    }

    pub async fn find_by_session(&self, session_id: &str, limit: i64) -> Result<Vec<Interaction>, mongodb::error::Error> {
        use futures::TryStreamExt;

        let cursor = self
            .collection
            .find(doc! { "session_id": session_id })
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await?;

        cursor.try_collect().await
    }

    pub async fn count(&self) -> Result<u64, mongodb::error::Error> {
        self.collection.count_documents(doc! {}).await
    }

    pub async fn count_by_session(&self, session_id: &str) -> Result<u64, mongodb::error::Error> {
        self.collection
            .count_documents(doc! { "session_id": session_id })
            .await
    }
}

/// Persists an interaction when a store is configured. Failures are logged
/// and swallowed so they never change what the caller sees.
pub async fn record(db: Option<&Database>, interaction: Interaction) {
    let Some(db) = db else {
        return;
    };

    if let Err(e) = InteractionCrud::new(db).create(interaction).await {
        tracing::warn!(error = %e, "failed to store interaction");
    }
}
