//! Test helpers for docstore-fixtures tests.
//!
//! Provides an in-memory document-store backend implementing the
//! collection-handle contract.

#[path = "helpers/memory_store.rs"]
pub mod memory_store;
