//! Board-service client for Cardwire.
//!
//! This module wraps the external card-board service (boards hold lists,
//! lists hold cards). Every operation is a single synchronous round trip
//! whose outcome is classified purely by HTTP status: `2xx` responses are
//! decoded into the declared model, anything else becomes an explicit
//! [`ports::BoardServiceError`] carrying the status code. No call is ever
//! retried. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
