//! Flat-file JSON record store for the Reachly backend.
//!
//! Each collection (users, onboarding, socialMediaAccounts, messageTracking)
//! is persisted as one pretty-printed JSON array on disk. Repositories expose
//! collection-scoped CRUD plus a few typed convenience operations; all file
//! access is synchronous and serialized per collection.

pub mod config;
pub mod model;
pub mod repository;
pub mod store;
pub mod util;

pub use store::Store;
