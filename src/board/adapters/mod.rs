//! Adapter implementations for the board-service port.

mod http;
mod memory;

pub use http::{DEFAULT_API_BASE, HttpBoardService};
pub use memory::{BoardCall, BoardOperation, InMemoryBoardService};
