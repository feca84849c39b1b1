use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A scheduled job as reported by the backend.
///
/// Jobs are owned by the backend: nothing here mutates one. The front-end
/// re-derives its view state from whatever list the last fetch returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Opaque cron-like expression, passed through verbatim.
    pub schedule_interval: String,
    pub is_completed: bool,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub next_run: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "de_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "de_timestamp")]
    pub updated_at: DateTime<Utc>,
    /// Execution state reported by some backend builds; absent means pending.
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCreate {
    pub title: String,
    pub description: String,
    pub schedule_interval: String,
}

/// Partial update payload. Fields left as `None` are omitted from the
/// request body so the backend keeps their current values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_interval: Option<String>,
}

impl JobUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.schedule_interval.is_none()
    }
}

// The backend serializes naive UTC datetimes ("2025-08-06T02:00:00");
// deployments behind a serializer middleware emit RFC 3339 instead.
// Accept both and normalize to UTC.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn de_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp: {}", s)))
}

fn de_opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp: {}", s))),
    }
}
