//! Card-lifecycle synchronisation for Cardwire.
//!
//! This module keeps one board card in step with the lifecycle of one
//! content record: it decides, per host event and per-installation
//! configuration, whether a card is created, updated, moved, archived,
//! restored or deleted, and drives the board-service port accordingly.
//! Board failures are reported but never block the host (fail-open). The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
