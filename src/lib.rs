//! sequence-api - a CRUD backend for timed email sequences
//!
//! Layered transport-down: `http_server` maps wire payloads onto
//! `sequence::SequenceService`, which orchestrates the statements of a
//! `sequence::SequenceStore`.

pub mod config;
pub mod http_server;
pub mod observability;
pub mod sequence;
