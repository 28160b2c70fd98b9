//! Durable storage contracts and implementations.
//!
//! # Responsibility
//! - Define the key-value storage seam used for application state.
//! - Map the project collection and theme flag onto storage keys.
//!
//! # Invariants
//! - Values are UTF-8 JSON or plain flags; keys are fixed constants.
//! - Read paths never fail the caller for malformed stored state.

pub mod kv_repo;
pub mod state_repo;
