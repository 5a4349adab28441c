use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::tracking::{AnalyticsEvent, TrackingData};

/// Records the log can filter by partner and age.
pub trait LoggedEvent: Clone + Serialize + DeserializeOwned + Send {
    fn partner_id(&self) -> &str;
    fn timestamp(&self) -> DateTime<Utc>;
}

impl LoggedEvent for AnalyticsEvent {
    fn partner_id(&self) -> &str {
        &self.partner_id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl LoggedEvent for TrackingData {
    fn partner_id(&self) -> &str {
        &self.partner_id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub partner_id: Option<String>,
    pub days: Option<i64>,
}

impl EventFilter {
    pub fn matches<T: LoggedEvent>(&self, event: &T, now: DateTime<Utc>) -> bool {
        if let Some(partner_id) = self.partner_id.as_deref() {
            if event.partner_id() != partner_id {
                return false;
            }
        }
        if let Some(days) = self.days {
            if event.timestamp() < now - Duration::days(days) {
                return false;
            }
        }
        true
    }
}

/// Newest-first, capped event list, optionally mirrored to a JSON file.
pub struct EventLog<T> {
    path: Option<PathBuf>,
    capacity: usize,
    events: Mutex<Vec<T>>,
}

impl<T: LoggedEvent> EventLog<T> {
    pub fn in_memory(capacity: usize) -> Self {
        Self {
            path: None,
            capacity,
            events: Mutex::new(Vec::new()),
        }
    }

    pub async fn load(path: PathBuf, capacity: usize) -> Result<Self, String> {
        let mut events: Vec<T> = if path.exists() {
            let data = tokio::fs::read_to_string(&path)
                .await
                .map_err(|err| format!("failed to read events: {}", err))?;
            if data.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&data)
                    .map_err(|err| format!("failed to parse events: {}", err))?
            }
        } else {
            Vec::new()
        };
        events.truncate(capacity);

        Ok(Self {
            path: Some(path),
            capacity,
            events: Mutex::new(events),
        })
    }

    /// The in-memory log only changes once the file write went through.
    pub async fn record(&self, event: T) -> Result<(), String> {
        let mut guard = self.events.lock().await;
        let mut next = Vec::with_capacity(guard.len() + 1);
        next.push(event);
        next.extend(guard.iter().cloned());
        next.truncate(self.capacity);
        self.persist(&next).await?;
        *guard = next;
        Ok(())
    }

    pub async fn list(&self, filter: &EventFilter, now: DateTime<Utc>) -> Vec<T> {
        let guard = self.events.lock().await;
        guard
            .iter()
            .filter(|event| filter.matches(*event, now))
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.events.lock().await.len()
    }

    async fn persist(&self, events: &[T]) -> Result<(), String> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            ensure_dir(parent).await?;
        }
        let payload = serde_json::to_string_pretty(events)
            .map_err(|err| format!("failed to serialize events: {}", err))?;
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, payload)
            .await
            .map_err(|err| format!("failed to write events: {}", err))?;
        tokio::fs::rename(&tmp_path, path)
            .await
            .map_err(|err| format!("failed to finalize events: {}", err))?;
        Ok(())
    }
}

async fn ensure_dir(path: &Path) -> Result<(), String> {
    if path.as_os_str().is_empty() || path.exists() {
        return Ok(());
    }
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|err| format!("failed to create event dir: {}", err))
}
