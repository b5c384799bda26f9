//! Store access abstraction over the journal collections
//!
//! The HTTP layer talks to `JournalStore` so tests can substitute an
//! in-memory double for MongoDB.

use bson::doc;
use mongodb::options::FindOptions;

use crate::db::mongo::{MongoClient, MongoCollection};
use crate::db::schemas::{MoodDoc, ReflectionDoc, MOOD_COLLECTION, REFLECTION_COLLECTION};
use crate::types::Result;

/// Persistence operations the journal services need
#[async_trait::async_trait]
pub trait JournalStore: Send + Sync {
    /// Append a mood check-in, returning the assigned id
    async fn insert_mood(&self, entry: MoodDoc) -> Result<String>;

    /// Append a reflection, returning the assigned id
    async fn insert_reflection(&self, entry: ReflectionDoc) -> Result<String>;

    /// Most recent check-ins, newest first by `at`, optionally scoped to a user
    async fn recent_moods(&self, user_id: Option<&str>, limit: i64) -> Result<Vec<MoodDoc>>;

    /// Check-ins with `at >= since` (lexicographic string comparison),
    /// oldest first, optionally scoped to a user
    async fn moods_since(&self, since: &str, user_id: Option<&str>) -> Result<Vec<MoodDoc>>;
}

/// MongoDB-backed journal store
pub struct MongoJournalStore {
    moods: MongoCollection<MoodDoc>,
    reflections: MongoCollection<ReflectionDoc>,
}

impl MongoJournalStore {
    /// Open both collections and apply their indexes
    pub async fn new(client: &MongoClient) -> Result<Self> {
        Ok(Self {
            moods: client.collection(MOOD_COLLECTION).await?,
            reflections: client.collection(REFLECTION_COLLECTION).await?,
        })
    }
}

#[async_trait::async_trait]
impl JournalStore for MongoJournalStore {
    async fn insert_mood(&self, entry: MoodDoc) -> Result<String> {
        let id = self.moods.insert_one(entry).await?;
        Ok(id.to_hex())
    }

    async fn insert_reflection(&self, entry: ReflectionDoc) -> Result<String> {
        let id = self.reflections.insert_one(entry).await?;
        Ok(id.to_hex())
    }

    async fn recent_moods(&self, user_id: Option<&str>, limit: i64) -> Result<Vec<MoodDoc>> {
        let mut filter = doc! {};
        if let Some(user) = user_id {
            filter.insert("userId", user);
        }

        let options = FindOptions::builder()
            .sort(doc! { "at": -1 })
            .limit(limit)
            .build();

        self.moods.find_with_options(filter, options).await
    }

    async fn moods_since(&self, since: &str, user_id: Option<&str>) -> Result<Vec<MoodDoc>> {
        let mut filter = doc! { "at": { "$gte": since } };
        if let Some(user) = user_id {
            filter.insert("userId", user);
        }

        let options = FindOptions::builder().sort(doc! { "at": 1 }).build();

        self.moods.find_with_options(filter, options).await
    }
}
