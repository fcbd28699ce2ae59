//! Port contracts for the board-service client.

mod service;

pub use service::{BoardService, BoardServiceError, BoardServiceResult};
