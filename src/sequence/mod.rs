//! # Sequences
//!
//! Domain records, the data-access seam and the orchestration service for
//! email sequences and their timed steps.

pub mod errors;
pub mod model;
pub mod service;
pub mod store;

pub use errors::{StoreError, StoreResult};
pub use model::{NewSequence, NewStep, Sequence, SequenceStep};
pub use service::SequenceService;
pub use store::{
    InMemorySequenceStore, InsertStepParams, SequenceStore, UpdateSequenceParams, UpdateStepParams,
};
