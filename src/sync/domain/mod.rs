//! Domain model for card-lifecycle synchronisation.
//!
//! Configuration is resolved once into strongly-typed policies; events
//! and associations carry validated identifiers only.

mod association;
mod blueprint;
mod error;
mod event;
mod ids;
mod policy;
mod settings;
mod status;
mod trigger;

pub use association::{CardAssociation, CardState, PersistedCardAssociation};
pub use blueprint::{CardBlueprint, ChecklistTemplate};
pub use error::{ConfigurationError, ParseCardStateError, SyncDomainError};
pub use event::{ContentEvent, EventKind, StatusTransition};
pub use ids::{RecordId, TemplateName};
pub use policy::{CreationTrigger, StatusAction, StatusActionKind, StatusPolicies, StatusPolicy};
pub use settings::SyncSettings;
pub use status::{RecordStatus, StatusAxis};
pub use trigger::TriggerConfiguration;
