//! Cardwire: keeps board cards in step with content-record lifecycles.
//!
//! A host content-management system reports record lifecycle events
//! (added, saved, hidden, unpublished, trashed, deleted and their
//! reversals). Cardwire decides, per installation configuration, which
//! card operation each event warrants and performs it against an external
//! card-board service over HTTP.
//!
//! # Architecture
//!
//! Cardwire follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP, memory, files)
//!
//! # Modules
//!
//! - [`board`]: Board-service client, models and outcome classification
//! - [`sync`]: Card-lifecycle policy engine and host-event routing

pub mod board;
pub mod sync;
