//! Query service: recent raw journal entries
//!
//! The read path is best-effort: a storage failure degrades to an empty
//! list instead of an error.

use serde::Serialize;
use tracing::warn;

use crate::db::schemas::MoodDoc;
use crate::db::store::JournalStore;

/// Maximum entries returned by the recent view
pub const RECENT_LIMIT: i64 = 12;

/// Entry shape exposed to the dashboard; userId and store internals stay private
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EntryView {
    pub id: String,
    pub mood: String,
    pub intensity: i32,
    pub note: String,
    pub tags: Vec<String>,
    pub at: String,
}

impl From<MoodDoc> for EntryView {
    fn from(doc: MoodDoc) -> Self {
        Self {
            id: doc._id.map(|id| id.to_hex()).unwrap_or_default(),
            mood: doc.mood,
            intensity: doc.intensity,
            note: doc.note,
            tags: doc.tags,
            at: doc.at,
        }
    }
}

/// Up to [`RECENT_LIMIT`] entries, newest first by `at`
pub async fn recent_entries(store: &dyn JournalStore, user_id: Option<&str>) -> Vec<EntryView> {
    match store.recent_moods(user_id, RECENT_LIMIT).await {
        Ok(entries) => entries.into_iter().map(EntryView::from).collect(),
        Err(e) => {
            warn!("Recent entries degraded to empty list: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::testing::MemoryJournalStore;

    fn mood_at(at: &str, user_id: Option<&str>) -> MoodDoc {
        MoodDoc {
            _id: None,
            mood: "good".to_string(),
            intensity: 3,
            note: String::new(),
            tags: Vec::new(),
            user_id: user_id.map(|u| u.to_string()),
            at: at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_limit_and_ordering() {
        let store = MemoryJournalStore::new();
        for day in 1..=20 {
            store
                .insert_mood(mood_at(&format!("2025-03-{:02}T10:00:00Z", day), None))
                .await
                .unwrap();
        }

        let entries = recent_entries(&store, None).await;

        assert_eq!(entries.len(), RECENT_LIMIT as usize);
        assert_eq!(entries[0].at, "2025-03-20T10:00:00Z");
        assert!(entries.windows(2).all(|w| w[0].at >= w[1].at));
    }

    #[tokio::test]
    async fn test_user_filter() {
        let store = MemoryJournalStore::new();
        store
            .insert_mood(mood_at("2025-03-01T10:00:00Z", Some("ana")))
            .await
            .unwrap();
        store
            .insert_mood(mood_at("2025-03-02T10:00:00Z", Some("ben")))
            .await
            .unwrap();
        store
            .insert_mood(mood_at("2025-03-03T10:00:00Z", None))
            .await
            .unwrap();

        let entries = recent_entries(&store, Some("ana")).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].at, "2025-03-01T10:00:00Z");

        let all = recent_entries(&store, None).await;
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_storage_error_swallowed() {
        let store = MemoryJournalStore::failing_reads();
        let entries = recent_entries(&store, None).await;
        assert!(entries.is_empty());
    }

    #[test]
    fn test_view_omits_user_id() {
        let view = EntryView::from(mood_at("2025-03-01T10:00:00Z", Some("ana")));
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("userId").is_none());
        assert!(json.get("at").is_some());
    }
}
