use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::schema::CollectionSchema;
use crate::util::id::new_record_id;
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

/// One record as stored on disk: a JSON object keyed by field name.
pub type Document = Map<String, Value>;

/// A collection backed by a single JSON array file.
///
/// Every operation takes the collection mutex, reads the whole file,
/// mutates in memory and rewrites the whole file, so callers observe each
/// call as atomic. Writes go to a sibling temp file first and are renamed
/// into place, so a failed write leaves the previous file intact.
///
/// Reads of a missing or unparsable file degrade to an empty collection
/// (logged) rather than failing the operation.
pub struct JsonCollection {
    schema: CollectionSchema,
    path: PathBuf,
    pretty: bool,
    lock: Mutex<()>,
}

impl JsonCollection {
    /// Open the collection inside `data_dir`, creating the directory and an
    /// empty collection file if they do not exist yet.
    pub fn open(data_dir: &Path, schema: CollectionSchema, pretty: bool) -> RepositoryResult<Self> {
        fs::create_dir_all(data_dir).map_err(|e| {
            RepositoryError::storage(format!(
                "Failed to create data directory {}: {}",
                data_dir.display(),
                e
            ))
        })?;
        let collection = JsonCollection {
            schema,
            path: data_dir.join(schema.file_name),
            pretty,
            lock: Mutex::new(()),
        };
        if !collection.path.exists() {
            debug!(collection = schema.name, "Initializing empty collection file");
            collection.write_documents(&[])?;
        }
        Ok(collection)
    }

    pub fn name(&self) -> &'static str {
        self.schema.name
    }

    /// Returns every record matching the predicate, in stored order.
    /// An empty predicate matches all records.
    pub fn find(&self, predicate: &Value) -> RepositoryResult<Vec<Document>> {
        let predicate = as_fields(predicate)?;
        let _guard = self.lock();
        Ok(self
            .read_documents()
            .into_iter()
            .filter(|doc| matches(doc, predicate))
            .collect())
    }

    /// Returns the first record matching the predicate, in stored order.
    pub fn find_one(&self, predicate: &Value) -> RepositoryResult<Option<Document>> {
        let predicate = as_fields(predicate)?;
        let _guard = self.lock();
        Ok(self
            .read_documents()
            .into_iter()
            .find(|doc| matches(doc, predicate)))
    }

    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Document>> {
        let _guard = self.lock();
        Ok(self
            .read_documents()
            .into_iter()
            .find(|doc| record_id(doc) == Some(id)))
    }

    pub fn count_documents(&self, predicate: &Value) -> RepositoryResult<usize> {
        Ok(self.find(predicate)?.len())
    }

    /// Inserts a new record built from `fields`: validates uniqueness,
    /// assigns an id, hashes the password field if present, fills defaults
    /// and stamps creation timestamps, then persists the whole collection.
    ///
    /// Fails with `AlreadyExists` when a unique key collides; nothing is
    /// written in that case.
    pub fn create(&self, fields: Document) -> RepositoryResult<Document> {
        let _guard = self.lock();
        let mut docs = self.read_documents();

        for key in self.schema.unique_keys {
            let value = fields.get(*key).filter(|v| !v.is_null()).ok_or_else(|| {
                RepositoryError::validation(format!(
                    "Cannot create {} record without field '{}'",
                    self.schema.name, key
                ))
            })?;
            if docs.iter().any(|doc| doc.get(*key) == Some(value)) {
                return Err(RepositoryError::already_exists(format!(
                    "{} record with {} {} already exists",
                    self.schema.name, key, value
                )));
            }
        }

        let mut doc = Document::new();
        doc.insert("id".to_string(), Value::String(new_record_id()));
        for (key, value) in fields {
            if key == "id" {
                continue;
            }
            if Some(key.as_str()) == self.schema.password_field {
                doc.insert(key, Value::String(self.hash_password_value(&value)?));
            } else {
                doc.insert(key, value);
            }
        }
        for (key, value) in (self.schema.defaults)() {
            doc.entry(key).or_insert(value);
        }
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        for field in self.schema.timestamp_fields {
            doc.insert((*field).to_string(), Value::String(now.clone()));
        }

        docs.push(doc.clone());
        self.write_documents(&docs)?;
        Ok(doc)
    }

    /// Shallow-merges `patch` into the record with the given id and
    /// persists the collection. Returns `None` when no record matches.
    ///
    /// Top-level fields in the patch replace stored values wholesale
    /// (nested structures are not merged). The record id and the creation
    /// timestamp field are never overwritten; a `password` field in the
    /// patch is re-hashed.
    pub fn update_by_id(&self, id: &str, patch: &Value) -> RepositoryResult<Option<Document>> {
        let patch = as_fields(patch)?;
        let _guard = self.lock();
        let mut docs = self.read_documents();

        let index = match docs.iter().position(|doc| record_id(doc) == Some(id)) {
            Some(index) => index,
            None => return Ok(None),
        };
        let doc = &mut docs[index];
        for (key, value) in patch {
            if key == "id" || Some(key.as_str()) == self.schema.created_at_field {
                continue;
            }
            if Some(key.as_str()) == self.schema.password_field {
                let hashed = self.hash_password_value(value)?;
                doc.insert(key.clone(), Value::String(hashed));
            } else {
                doc.insert(key.clone(), value.clone());
            }
        }
        let updated = doc.clone();

        self.write_documents(&docs)?;
        Ok(Some(updated))
    }

    /// Removes the record with the given id. Returns false (and leaves the
    /// file untouched) when no record matches.
    pub fn delete_by_id(&self, id: &str) -> RepositoryResult<bool> {
        let _guard = self.lock();
        let mut docs = self.read_documents();

        let before = docs.len();
        docs.retain(|doc| record_id(doc) != Some(id));
        if docs.len() == before {
            return Ok(false);
        }
        self.write_documents(&docs)?;
        Ok(true)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn hash_password_value(&self, value: &Value) -> RepositoryResult<String> {
        let plain = value.as_str().ok_or_else(|| {
            RepositoryError::validation(format!(
                "Field '{}' must be a string",
                self.schema.password_field.unwrap_or("password")
            ))
        })?;
        PasswordUtilsImpl::hash_password(plain).map_err(RepositoryError::generic)
    }

    /// Reads the full collection. Missing, unreadable or corrupt files
    /// degrade to an empty collection so one bad file cannot take the
    /// whole store down; the fault is logged and the next successful
    /// write restores a valid file.
    fn read_documents(&self) -> Vec<Document> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(
                    collection = self.schema.name,
                    "Collection file missing, treating as empty"
                );
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    collection = self.schema.name,
                    "Failed to read collection file, treating as empty: {}", err
                );
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Document>>(&raw) {
            Ok(docs) => docs,
            Err(err) => {
                warn!(
                    collection = self.schema.name,
                    "Collection file is corrupt, treating as empty: {}", err
                );
                Vec::new()
            }
        }
    }

    fn write_documents(&self, docs: &[Document]) -> RepositoryResult<()> {
        let payload = if self.pretty {
            serde_json::to_string_pretty(docs)?
        } else {
            serde_json::to_string(docs)?
        };
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload).map_err(|e| {
            RepositoryError::storage(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            RepositoryError::storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;
        Ok(())
    }
}

fn record_id(doc: &Document) -> Option<&str> {
    doc.get("id").and_then(Value::as_str)
}

/// Predicate and patch payloads must be JSON objects.
fn as_fields(value: &Value) -> RepositoryResult<&Document> {
    value
        .as_object()
        .ok_or_else(|| RepositoryError::validation("Expected a JSON object of fields"))
}

/// Strict equality on every predicate field, no type coercion.
fn matches(doc: &Document, predicate: &Document) -> bool {
    predicate.iter().all(|(key, value)| doc.get(key) == Some(value))
}

/// Decodes a stored document into a typed record.
pub fn from_document<T: DeserializeOwned>(doc: Document) -> RepositoryResult<T> {
    serde_json::from_value(Value::Object(doc))
        .map_err(|e| RepositoryError::serialization(format!("Failed to decode record: {}", e)))
}

/// Serializes a creation payload into the field map handed to `create`.
pub fn to_document<T: Serialize>(payload: &T) -> RepositoryResult<Document> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(RepositoryError::validation(
            "Payload must serialize to a JSON object",
        )),
        Err(e) => Err(RepositoryError::serialization(format!(
            "Failed to encode payload: {}",
            e
        ))),
    }
}
