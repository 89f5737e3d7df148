//! Tracing/logging setup shared by embedding applications.
//!
//! The ledger and lifecycle crates only emit `tracing` events (commit and
//! release summaries, missing-record warnings); how those events are
//! rendered is the embedder's choice. This crate offers a default.

pub mod tracing;

/// Initialize process-wide observability (tracing/logging).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}
