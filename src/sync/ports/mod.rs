//! Port contracts for card-lifecycle synchronisation.
//!
//! The engine depends on these interfaces and on
//! [`crate::board::ports::BoardService`]; adapters live in
//! [`crate::sync::adapters`].

pub mod association;
pub mod renderer;

pub use association::{CardAssociationError, CardAssociationResult, CardAssociationStore};
pub use renderer::{CardRenderer, RenderError, RenderResult};
