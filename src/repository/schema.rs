use serde_json::{Map, Value};

/// Per-collection rules applied by the generic engine: which fields must be
/// unique, which defaults to fill in, which timestamps to stamp at creation,
/// and whether a password field is hashed at write time.
#[derive(Clone, Copy)]
pub struct CollectionSchema {
    /// Collection name, used in log lines and error messages.
    pub name: &'static str,
    /// File name inside the data directory, e.g. `users.json`.
    pub file_name: &'static str,
    /// Fields that must be unique across the collection. Creation requires
    /// them to be present and fails with AlreadyExists on a collision.
    pub unique_keys: &'static [&'static str],
    /// Fields stamped with the current UTC time on every create, overriding
    /// any caller-supplied value.
    pub timestamp_fields: &'static [&'static str],
    /// The creation timestamp field; once written it is shielded from
    /// update patches.
    pub created_at_field: Option<&'static str>,
    /// Field hashed with Argon2 whenever it appears in a create payload or
    /// an update patch.
    pub password_field: Option<&'static str>,
    /// Default values for optional fields missing from the create payload.
    pub defaults: fn() -> Map<String, Value>,
}
