//! Ingestion service: validation and normalization of submissions
//!
//! Payloads are explicit serde schemas; a body that does not parse into
//! the schema is rejected at the boundary. Normalization is forgiving:
//! out-of-range intensity is clamped, unknown tags are dropped.

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use crate::db::schemas::{MoodDoc, ReflectionDoc, ALLOWED_TAGS};
use crate::db::store::JournalStore;
use crate::types::{EchoError, Result};

/// Note length cap in characters
const NOTE_MAX_CHARS: usize = 2000;

/// Maximum tags per check-in
const MAX_TAGS: usize = 10;

/// Intensity used when the caller omits one
const DEFAULT_INTENSITY: i64 = 3;

/// Mood submission payload
#[derive(Deserialize, Debug, Default)]
pub struct SubmitMoodRequest {
    pub mood: Option<String>,
    pub intensity: Option<i64>,
    pub note: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub at: Option<String>,
}

/// Reflection submission payload
#[derive(Deserialize, Debug, Default)]
pub struct SubmitReflectionRequest {
    #[serde(rename = "entryId")]
    pub entry_id: Option<String>,
    pub mode: Option<String>,
    pub responses: Option<serde_json::Map<String, Value>>,
}

/// Current UTC time in the sortable ISO-8601 format used by `at`
pub fn utc_now_iso() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Validate and normalize a mood submission, then append it
pub async fn submit_mood(store: &dyn JournalStore, req: SubmitMoodRequest) -> Result<String> {
    let mood = match req.mood {
        Some(m) if !m.is_empty() => m,
        _ => return Err(EchoError::Validation("mood is required".to_string())),
    };

    let entry = MoodDoc {
        _id: None,
        mood,
        intensity: clamp_intensity(req.intensity),
        note: normalize_note(req.note.as_deref()),
        tags: filter_tags(req.tags),
        user_id: req.user_id,
        at: req
            .at
            .filter(|a| !a.is_empty())
            .unwrap_or_else(utc_now_iso),
    };

    store.insert_mood(entry).await
}

/// Validate and normalize a reflection submission, then append it
pub async fn submit_reflection(
    store: &dyn JournalStore,
    req: SubmitReflectionRequest,
) -> Result<String> {
    let entry_id = match req.entry_id {
        Some(id) if !id.is_empty() => id,
        _ => return Err(EchoError::Validation("invalid payload".to_string())),
    };

    let responses = match req.responses {
        Some(map) => map,
        None => return Err(EchoError::Validation("invalid payload".to_string())),
    };

    let entry = ReflectionDoc {
        _id: None,
        entry_id,
        mode: req.mode,
        responses: responses
            .into_iter()
            .map(|(k, v)| (k, coerce_response(v)))
            .collect(),
        created_at: utc_now_iso(),
    };

    store.insert_reflection(entry).await
}

/// Clamp intensity into [1,5], defaulting to 3
fn clamp_intensity(intensity: Option<i64>) -> i32 {
    intensity.unwrap_or(DEFAULT_INTENSITY).clamp(1, 5) as i32
}

/// Trim the note and cap its length
fn normalize_note(note: Option<&str>) -> String {
    let trimmed = note.unwrap_or("").trim();
    if trimmed.chars().count() <= NOTE_MAX_CHARS {
        trimmed.to_string()
    } else {
        trimmed.chars().take(NOTE_MAX_CHARS).collect()
    }
}

/// Keep allow-listed tags in submission order, dropping duplicates
fn filter_tags(tags: Vec<String>) -> Vec<String> {
    let mut kept: Vec<String> = Vec::new();
    for tag in tags {
        if ALLOWED_TAGS.contains(&tag.as_str()) && !kept.contains(&tag) {
            kept.push(tag);
            if kept.len() == MAX_TAGS {
                break;
            }
        }
    }
    kept
}

/// Coerce a reflection answer to text; falsy values become empty
fn coerce_response(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => {
            if b {
                "true".to_string()
            } else {
                String::new()
            }
        }
        Value::Number(n) => {
            if n.as_f64() == Some(0.0) {
                String::new()
            } else {
                n.to_string()
            }
        }
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::testing::MemoryJournalStore;

    fn mood_request(json: &str) -> SubmitMoodRequest {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_intensity_clamped_high_and_low() {
        let store = MemoryJournalStore::new();

        submit_mood(&store, mood_request(r#"{"mood":"good","intensity":9}"#))
            .await
            .unwrap();
        submit_mood(&store, mood_request(r#"{"mood":"good","intensity":-3}"#))
            .await
            .unwrap();
        submit_mood(&store, mood_request(r#"{"mood":"good"}"#))
            .await
            .unwrap();

        let moods = store.moods.lock().unwrap();
        assert_eq!(moods[0].intensity, 5);
        assert_eq!(moods[1].intensity, 1);
        assert_eq!(moods[2].intensity, 3);
    }

    #[tokio::test]
    async fn test_tags_filtered_against_allow_list() {
        let store = MemoryJournalStore::new();

        submit_mood(
            &store,
            mood_request(r#"{"mood":"low","tags":["anxious","made-up","proud"]}"#),
        )
        .await
        .unwrap();

        let moods = store.moods.lock().unwrap();
        assert_eq!(moods[0].tags, vec!["anxious", "proud"]);
    }

    #[tokio::test]
    async fn test_duplicate_tags_kept_once() {
        let store = MemoryJournalStore::new();

        submit_mood(
            &store,
            mood_request(r#"{"mood":"low","tags":["proud","proud","anxious"]}"#),
        )
        .await
        .unwrap();

        let moods = store.moods.lock().unwrap();
        assert_eq!(moods[0].tags, vec!["proud", "anxious"]);
    }

    #[tokio::test]
    async fn test_mood_required() {
        let store = MemoryJournalStore::new();

        let missing = submit_mood(&store, mood_request("{}")).await;
        let empty = submit_mood(&store, mood_request(r#"{"mood":""}"#)).await;

        for result in [missing, empty] {
            match result {
                Err(EchoError::Validation(msg)) => assert_eq!(msg, "mood is required"),
                other => panic!("expected validation error, got {:?}", other.map(|_| ())),
            }
        }
        // Nothing was written
        assert_eq!(store.mood_count(), 0);
    }

    #[tokio::test]
    async fn test_note_trimmed_and_capped() {
        let store = MemoryJournalStore::new();

        submit_mood(&store, mood_request(r#"{"mood":"good","note":"  ok  "}"#))
            .await
            .unwrap();

        let long = "x".repeat(3000);
        submit_mood(
            &store,
            mood_request(&format!(r#"{{"mood":"good","note":"{}"}}"#, long)),
        )
        .await
        .unwrap();

        submit_mood(&store, mood_request(r#"{"mood":"good","note":"   "}"#))
            .await
            .unwrap();

        let moods = store.moods.lock().unwrap();
        assert_eq!(moods[0].note, "ok");
        assert_eq!(moods[1].note.chars().count(), 2000);
        assert_eq!(moods[2].note, "");
    }

    #[tokio::test]
    async fn test_at_defaults_to_server_time() {
        let store = MemoryJournalStore::new();

        submit_mood(&store, mood_request(r#"{"mood":"good"}"#))
            .await
            .unwrap();
        submit_mood(&store, mood_request(r#"{"mood":"good","at":""}"#))
            .await
            .unwrap();
        submit_mood(
            &store,
            mood_request(r#"{"mood":"good","at":"2025-01-02T03:04:05Z"}"#),
        )
        .await
        .unwrap();

        let moods = store.moods.lock().unwrap();
        assert!(moods[0].at.ends_with('Z'));
        assert!(moods[0].at.len() >= 10);
        assert!(moods[1].at.ends_with('Z'));
        assert_eq!(moods[2].at, "2025-01-02T03:04:05Z");
    }

    #[tokio::test]
    async fn test_reflection_requires_entry_id_and_responses() {
        let store = MemoryJournalStore::new();

        let cases = [
            r#"{"responses":{}}"#,
            r#"{"entryId":"","responses":{}}"#,
            r#"{"entryId":"abc"}"#,
        ];
        for json in cases {
            let req: SubmitReflectionRequest = serde_json::from_str(json).unwrap();
            match submit_reflection(&store, req).await {
                Err(EchoError::Validation(msg)) => assert_eq!(msg, "invalid payload"),
                other => panic!("expected validation error, got {:?}", other.map(|_| ())),
            }
        }
        assert_eq!(store.reflection_count(), 0);
    }

    #[tokio::test]
    async fn test_reflection_responses_coerced() {
        let store = MemoryJournalStore::new();

        let req: SubmitReflectionRequest = serde_json::from_str(
            r#"{
                "entryId": "abc123",
                "mode": "gratitude",
                "responses": {
                    "q1": "an answer",
                    "q2": null,
                    "q3": false,
                    "q4": 0,
                    "q5": 7
                }
            }"#,
        )
        .unwrap();

        submit_reflection(&store, req).await.unwrap();

        let reflections = store.reflections.lock().unwrap();
        let saved = &reflections[0];
        assert_eq!(saved.entry_id, "abc123");
        assert_eq!(saved.mode.as_deref(), Some("gratitude"));
        assert_eq!(saved.responses["q1"], "an answer");
        assert_eq!(saved.responses["q2"], "");
        assert_eq!(saved.responses["q3"], "");
        assert_eq!(saved.responses["q4"], "");
        assert_eq!(saved.responses["q5"], "7");
        assert!(saved.created_at.ends_with('Z'));
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let store = MemoryJournalStore::failing_writes();

        let result = submit_mood(&store, mood_request(r#"{"mood":"good"}"#)).await;
        assert!(matches!(result, Err(EchoError::Database(_))));
    }

    #[test]
    fn test_non_list_tags_rejected_by_schema() {
        let result: std::result::Result<SubmitMoodRequest, _> =
            serde_json::from_str(r#"{"mood":"good","tags":"proud"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_object_responses_rejected_by_schema() {
        let result: std::result::Result<SubmitReflectionRequest, _> =
            serde_json::from_str(r#"{"entryId":"abc","responses":["a","b"]}"#);
        assert!(result.is_err());
    }
}
