//! Reflection document schema

use std::collections::BTreeMap;

use bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::IntoIndexes;

/// Collection name for reflections
pub const REFLECTION_COLLECTION: &str = "reflections";

/// Reflection document stored in MongoDB
///
/// Reflections are write-once and private: no endpoint reads them back.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ReflectionDoc {
    /// MongoDB document ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    /// Mood entry this reflection belongs to (not referentially enforced)
    #[serde(rename = "entryId")]
    pub entry_id: String,

    /// Prompt type label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Prompt key to answer text
    #[serde(default)]
    pub responses: BTreeMap<String, String>,

    /// Server-assigned creation timestamp
    pub created_at: String,
}

impl IntoIndexes for ReflectionDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "entryId": 1 },
            Some(
                IndexOptions::builder()
                    .name("entry_id_index".to_string())
                    .build(),
            ),
        )]
    }
}
