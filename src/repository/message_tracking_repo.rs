use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Map, Value};
use tracing::{debug, error, info};

use crate::model::message_event::{MessageEvent, MessageStats, NewMessageEvent};
use crate::repository::json_collection::{from_document, to_document, JsonCollection};
use crate::repository::repository_error::RepositoryResult;
use crate::repository::schema::CollectionSchema;

pub trait MessageTrackingRepository: Send + Sync {
    fn find(&self, predicate: &Value) -> RepositoryResult<Vec<MessageEvent>>;
    fn find_one(&self, predicate: &Value) -> RepositoryResult<Option<MessageEvent>>;
    fn find_by_id(&self, id: &str) -> RepositoryResult<Option<MessageEvent>>;
    /// The collection's create operation: records one message event,
    /// persisting any caller-supplied extra fields verbatim.
    fn track(&self, event: NewMessageEvent) -> RepositoryResult<MessageEvent>;
    fn update_by_id(&self, id: &str, patch: &Value) -> RepositoryResult<Option<MessageEvent>>;
    fn delete_by_id(&self, id: &str) -> RepositoryResult<bool>;
    fn count_documents(&self, predicate: &Value) -> RepositoryResult<usize>;
    /// Aggregates this user's events over the trailing `window_days` days.
    fn get_stats(&self, user_id: &str, window_days: i64) -> RepositoryResult<MessageStats>;
}

fn message_defaults() -> Map<String, Value> {
    let mut defaults = Map::new();
    defaults.insert("conversationId".to_string(), json!(""));
    defaults.insert("messageId".to_string(), json!(""));
    defaults
}

const MESSAGE_TRACKING_SCHEMA: CollectionSchema = CollectionSchema {
    name: "messageTracking",
    file_name: "messageTracking.json",
    unique_keys: &[],
    timestamp_fields: &["timestamp"],
    // Unlike the other collections the event timestamp is not a creation
    // invariant; backfill flows are allowed to adjust it.
    created_at_field: None,
    password_field: None,
    defaults: message_defaults,
};

pub struct JsonMessageTrackingRepository {
    collection: JsonCollection,
}

impl JsonMessageTrackingRepository {
    pub fn new(data_dir: &Path, pretty: bool) -> RepositoryResult<Self> {
        let collection = JsonCollection::open(data_dir, MESSAGE_TRACKING_SCHEMA, pretty)?;
        Ok(JsonMessageTrackingRepository { collection })
    }
}

impl MessageTrackingRepository for JsonMessageTrackingRepository {
    fn find(&self, predicate: &Value) -> RepositoryResult<Vec<MessageEvent>> {
        self.collection
            .find(predicate)?
            .into_iter()
            .map(from_document)
            .collect()
    }

    fn find_one(&self, predicate: &Value) -> RepositoryResult<Option<MessageEvent>> {
        self.collection.find_one(predicate)?.map(from_document).transpose()
    }

    fn find_by_id(&self, id: &str) -> RepositoryResult<Option<MessageEvent>> {
        self.collection.find_by_id(id)?.map(from_document).transpose()
    }

    #[tracing::instrument(skip(self, event), fields(user_id = %event.user_id, platform = %event.platform, kind = %event.kind))]
    fn track(&self, event: NewMessageEvent) -> RepositoryResult<MessageEvent> {
        let fields = to_document(&event)?;
        match self.collection.create(fields) {
            Ok(doc) => {
                debug!("Message event tracked");
                from_document(doc)
            }
            Err(e) => {
                error!("Failed to track message event: {}", e);
                Err(e)
            }
        }
    }

    #[tracing::instrument(skip(self, patch), fields(id = %id))]
    fn update_by_id(&self, id: &str, patch: &Value) -> RepositoryResult<Option<MessageEvent>> {
        self.collection.update_by_id(id, patch)?.map(from_document).transpose()
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    fn delete_by_id(&self, id: &str) -> RepositoryResult<bool> {
        self.collection.delete_by_id(id)
    }

    fn count_documents(&self, predicate: &Value) -> RepositoryResult<usize> {
        self.collection.count_documents(predicate)
    }

    #[tracing::instrument(skip(self), fields(user_id = %user_id, window_days = window_days))]
    fn get_stats(&self, user_id: &str, window_days: i64) -> RepositoryResult<MessageStats> {
        let events = self.find(&json!({ "userId": user_id }))?;
        let cutoff = Utc::now() - Duration::days(window_days);

        let mut stats = MessageStats::zeroed();
        for event in &events {
            let timestamp = match DateTime::parse_from_rfc3339(&event.timestamp) {
                Ok(ts) => ts.with_timezone(&Utc),
                Err(err) => {
                    debug!(
                        "Skipping event {} with unparsable timestamp: {}",
                        event.id, err
                    );
                    continue;
                }
            };
            if timestamp < cutoff {
                continue;
            }
            stats.total += 1;
            *stats
                .daily_counts
                .entry(timestamp.format("%Y-%m-%d").to_string())
                .or_insert(0) += 1;
            // Unknown platforms and types count toward the total only.
            if let Some(count) = stats.platform_counts.get_mut(event.platform.as_str()) {
                *count += 1;
            }
            if let Some(count) = stats.type_counts.get_mut(event.kind.as_str()) {
                *count += 1;
            }
        }
        info!(
            "Computed message stats: {} events in the last {} days",
            stats.total, window_days
        );
        Ok(stats)
    }
}
