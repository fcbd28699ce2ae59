//! Domain model for the external card-board service.
//!
//! Identifiers are validated once at the boundary; remote payloads decode
//! into plain models that ignore fields Cardwire does not use.

mod credentials;
mod error;
mod ids;
mod models;
mod requests;

pub use credentials::BoardCredentials;
pub use error::BoardDomainError;
pub use ids::{BoardId, CardId, ChecklistId, LabelId, ListId};
pub use models::{Board, BoardList, Card, CardComment, CheckItem, CheckItemState, Checklist, Label};
pub use requests::{CardUpdate, CheckItemPosition, NewCard, NewCheckItem};
