//! hookd - Pipeline
//!
//! The pipeline table and executor: everything between "a request arrived
//! on a path" and "here is the outcome to render".
//!
//! # Architecture
//!
//! ```text
//! [Front End]          [PipelineTable]              [PipelineDefinition]
//!    path ──lookup──→  endpoint → definition ──→  Receiver
//!                      (built once, read-only)      │
//!                                                   ▼
//!                                            Transformation chain
//!                                            (sequential, fail-fast)
//!                                                   │
//!                                                   ▼
//!                                       ┌── Dispatcher ──┐
//!                                       ├── Dispatcher ──┤ join
//!                                       └── Dispatcher ──┘
//! ```
//!
//! # Key Design
//!
//! - **Compiled once**: the table is built from configuration at startup
//!   through an explicitly passed [`ComponentRegistry`] and never mutated,
//!   so concurrent request tasks read it without locking.
//! - **All-or-nothing build**: any binding failure aborts the whole table
//!   build; no partial table is ever exposed.
//! - **Ordered transforms, unordered dispatch**: transformations run in
//!   binding order; dispatchers run logically simultaneously and only
//!   their aggregate completion is ordered.
//! - **Race-free aggregation**: dispatch results land in one slot per
//!   dispatcher position and are only inspected after the join barrier.
//! - **Best-effort delivery**: nothing is persisted and nothing is
//!   retried; a single dispatcher failure fails the whole request even
//!   though the others may have delivered.

mod definition;
mod error;
mod executor;
mod table;

#[cfg(test)]
mod test_util;

pub use definition::PipelineDefinition;
pub use error::{TableError, TableResult};
pub use executor::{PipelineOutcome, Timings};
pub use table::PipelineTable;

// Re-export key types from dependencies for convenience
pub use hookd_registry::ComponentRegistry;
pub use hookd_webhook::{InboundRequest, Received, WebhookError};
