//! Application services for card-lifecycle synchronisation.
//!
//! [`CardLifecycleEngine`] decides and applies card operations for one
//! normalised event at a time; [`ActionRouter`] turns host events into
//! those normalised events and never fails.

mod engine;
mod error;
mod locks;
mod outcome;
mod router;

pub use engine::CardLifecycleEngine;
pub use error::{CardSyncError, CardSyncResult};
pub use locks::{RecordGuard, RecordLocks};
pub use outcome::{ChecklistFailure, ChecklistReport, SkipReason, SyncOutcome};
pub use router::{ActionRouter, EngineOperation, HostEvent, RecordRef, SyncReport};
