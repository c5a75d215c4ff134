//! # Sequence Records
//!
//! Persisted rows and creation inputs for sequences and their steps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named group of timed email steps with tracking toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequence {
    /// Unique sequence identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Whether email opens are tracked
    pub open_tracking_enabled: bool,

    /// Whether link clicks are tracked
    pub click_tracking_enabled: bool,

    /// When the sequence was created
    pub created_at: DateTime<Utc>,

    /// When the sequence was last updated
    pub updated_at: DateTime<Utc>,
}

/// One timed email within a sequence.
///
/// `ordering` is assigned once at creation time from the step's position in
/// the input list and is never recomputed. Deleting a sibling leaves the
/// remaining ordering values untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceStep {
    /// Unique step identifier
    pub id: Uuid,

    /// The sequence this step belongs to
    pub sequence_id: Uuid,

    /// Subject line of the email
    pub email_subject: String,

    /// Body of the email
    pub email_content: String,

    /// Days to wait after the previous step before sending
    pub days_after_previous_step: u32,

    /// Position within the sequence, fixed at creation
    pub ordering: f32,

    /// When the step was created
    pub created_at: DateTime<Utc>,

    /// When the step was last updated
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the caller when creating a sequence.
#[derive(Debug, Clone)]
pub struct NewSequence {
    pub name: String,
    pub open_tracking_enabled: bool,
    pub click_tracking_enabled: bool,
}

/// Fields supplied by the caller for each step of a new sequence.
///
/// The step's id, owning sequence and ordering are assigned during
/// creation.
#[derive(Debug, Clone)]
pub struct NewStep {
    pub email_subject: String,
    pub email_content: String,
    pub days_after_previous_step: u32,
}
