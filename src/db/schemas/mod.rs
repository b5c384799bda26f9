//! Document schemas for the journal collections

pub mod mood;
pub mod reflection;

pub use mood::{mood_id_to_value, Mood, MoodDoc, ALLOWED_TAGS, MOOD_COLLECTION};
pub use reflection::{ReflectionDoc, REFLECTION_COLLECTION};
