//! Unit tests for the synchronisation context.
//!
//! Engine and router tests run against the in-memory board service and
//! association store; the mock-based tests prove that skipped decisions
//! never reach the board service.

mod helpers;
mod store_failure_tests;
