//! Mood check-in document schema

use bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::IntoIndexes;

/// Collection name for mood check-ins
pub const MOOD_COLLECTION: &str = "moods";

/// Tags a check-in may carry, in dashboard display order
pub const ALLOWED_TAGS: [&str; 8] = [
    "overwhelmed",
    "anxious",
    "proud",
    "exhausted",
    "grateful",
    "lonely",
    "hopeful",
    "stressed",
];

/// The five known mood categories, ordered worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Awful,
    Low,
    Neutral,
    Good,
    Great,
}

impl Mood {
    /// All categories in fixed dashboard order
    pub const ALL: [Mood; 5] = [Mood::Awful, Mood::Low, Mood::Neutral, Mood::Good, Mood::Great];

    /// Parse a stored mood id
    pub fn from_id(id: &str) -> Option<Mood> {
        match id {
            "awful" => Some(Mood::Awful),
            "low" => Some(Mood::Low),
            "neutral" => Some(Mood::Neutral),
            "good" => Some(Mood::Good),
            "great" => Some(Mood::Great),
            _ => None,
        }
    }

    /// The id stored in mood documents
    pub fn id(self) -> &'static str {
        match self {
            Mood::Awful => "awful",
            Mood::Low => "low",
            Mood::Neutral => "neutral",
            Mood::Good => "good",
            Mood::Great => "great",
        }
    }

    /// Dashboard display label ("Okay" deliberately differs from the id "neutral")
    pub fn label(self) -> &'static str {
        match self {
            Mood::Awful => "Awful",
            Mood::Low => "Low",
            Mood::Neutral => "Okay",
            Mood::Good => "Good",
            Mood::Great => "Great",
        }
    }

    /// Ordinal value 1-5 used for trend averaging
    pub fn value(self) -> f64 {
        match self {
            Mood::Awful => 1.0,
            Mood::Low => 2.0,
            Mood::Neutral => 3.0,
            Mood::Good => 4.0,
            Mood::Great => 5.0,
        }
    }
}

/// Ordinal value for a stored mood id; unknown ids contribute the midpoint
pub fn mood_id_to_value(id: &str) -> f64 {
    Mood::from_id(id).map(Mood::value).unwrap_or(3.0)
}

/// Mood check-in document stored in MongoDB
///
/// Check-ins are append-only: once inserted they are never updated or
/// deleted by this service.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct MoodDoc {
    /// MongoDB document ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    /// Mood id as submitted; the five known ids map to ordinals 1-5
    pub mood: String,

    /// Intensity in [1,5]
    pub intensity: i32,

    /// Free-text note, trimmed and capped at ingestion
    #[serde(default)]
    pub note: String,

    /// Allow-listed tags, order as submitted
    #[serde(default)]
    pub tags: Vec<String>,

    /// Anonymous submitter identifier; absent means unscoped
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// ISO-8601 UTC timestamp, lexicographically sortable
    pub at: String,
}

impl IntoIndexes for MoodDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            // Recent-entries ordering
            (
                doc! { "at": -1 },
                Some(IndexOptions::builder().name("at_desc".to_string()).build()),
            ),
            // User-scoped ordering and window filtering
            (
                doc! { "userId": 1, "at": -1 },
                Some(
                    IndexOptions::builder()
                        .name("user_at_desc".to_string())
                        .build(),
                ),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_ordinals() {
        assert_eq!(Mood::Awful.value(), 1.0);
        assert_eq!(Mood::Great.value(), 5.0);
        assert_eq!(mood_id_to_value("good"), 4.0);
    }

    #[test]
    fn test_unknown_mood_defaults_to_midpoint() {
        assert_eq!(mood_id_to_value("ecstatic"), 3.0);
        assert_eq!(mood_id_to_value(""), 3.0);
    }

    #[test]
    fn test_labels_in_dashboard_order() {
        let labels: Vec<&str> = Mood::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(labels, vec!["Awful", "Low", "Okay", "Good", "Great"]);
    }

    #[test]
    fn test_id_round_trip() {
        for mood in Mood::ALL {
            assert_eq!(Mood::from_id(mood.id()), Some(mood));
        }
    }
}
