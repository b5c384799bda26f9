//! Aggregation engine: derived dashboard statistics
//!
//! Four views over the trailing week of check-ins, derived in one pass
//! over a single window fetch. Day bucketing is a string-prefix cut of
//! the `at` timestamp, and the window filter is the same lexicographic
//! comparison the store applies.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::db::schemas::{mood_id_to_value, Mood, ALLOWED_TAGS};
use crate::db::store::JournalStore;
use crate::types::Result;

/// Days shown in the weekly trend, today inclusive
const TREND_DAYS: i64 = 7;

/// Weekly trend series; a day with no entries is `null`, not zero
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub values: Vec<Option<f64>>,
}

/// Labelled counts for one frequency chart
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FrequencySeries {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

/// Dashboard payload
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub weekly_trend: TrendSeries,
    pub mood_frequency: FrequencySeries,
    pub tag_frequency: FrequencySeries,
    pub journal_count: u64,
}

/// Bucket key for a timestamp: its `YYYY-MM-DD` prefix, or `today` when
/// the timestamp is too short to carry one
pub fn day_key(at: &str, today: &str) -> String {
    match at.get(..10) {
        Some(prefix) => prefix.to_string(),
        None => today.to_string(),
    }
}

/// Derive the dashboard views for the week ending at `now`
pub async fn dashboard_data(
    store: &dyn JournalStore,
    user_id: Option<&str>,
    now: DateTime<Utc>,
) -> Result<DashboardData> {
    // The window filter is a date-string comparison against now minus
    // seven days; trend buckets span the six days before today plus today
    let window_start = (now - Duration::days(TREND_DAYS)).format("%Y-%m-%d").to_string();
    let today = now.format("%Y-%m-%d").to_string();

    let window = store.moods_since(&window_start, user_id).await?;

    // Weekly trend: mean mood ordinal per day bucket, oldest day first
    let mut by_day: HashMap<String, Vec<f64>> = HashMap::new();
    for entry in &window {
        by_day
            .entry(day_key(&entry.at, &today))
            .or_default()
            .push(mood_id_to_value(&entry.mood));
    }

    let mut labels = Vec::with_capacity(TREND_DAYS as usize);
    let mut values = Vec::with_capacity(TREND_DAYS as usize);
    for i in (0..TREND_DAYS).rev() {
        let day = now - Duration::days(i);
        labels.push(day.format("%a").to_string());
        let key = day.format("%Y-%m-%d").to_string();
        values.push(
            by_day
                .get(&key)
                .map(|vals| round1(vals.iter().sum::<f64>() / vals.len() as f64)),
        );
    }

    // Mood frequency over the whole window; only the five known ids count
    let mood_values: Vec<u64> = Mood::ALL
        .iter()
        .map(|m| window.iter().filter(|e| e.mood == m.id()).count() as u64)
        .collect();

    // Tag frequency: one count per entry carrying the tag
    let tag_values: Vec<u64> = ALLOWED_TAGS
        .iter()
        .map(|t| {
            window
                .iter()
                .filter(|e| e.tags.iter().any(|tag| tag == t))
                .count() as u64
        })
        .collect();

    // Journal count: entries with a non-empty note
    let journal_count = window.iter().filter(|e| !e.note.is_empty()).count() as u64;

    Ok(DashboardData {
        weekly_trend: TrendSeries { labels, values },
        mood_frequency: FrequencySeries {
            labels: Mood::ALL.iter().map(|m| m.label().to_string()).collect(),
            values: mood_values,
        },
        tag_frequency: FrequencySeries {
            labels: ALLOWED_TAGS.iter().map(|t| t.to_string()).collect(),
            values: tag_values,
        },
        journal_count,
    })
}

/// Round to one decimal place
fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
