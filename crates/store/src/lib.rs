//! Persistence for lead submissions: an optional REST backend and a
//! bounded in-memory fallback.

pub mod client;
pub mod config;
pub mod health;
pub mod insert;
pub mod memory;
pub mod sink;

pub use client::RestStoreClient;
pub use config::RestStoreConfig;
pub use insert::insert_submission;
pub use memory::FallbackStore;
pub use sink::SubmissionSink;
