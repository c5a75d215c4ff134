//! # Sequence Store
//!
//! Data-access seam for sequences and steps. The trait mirrors the
//! parameterized statements the service orchestrates; each method is one
//! statement against the backing store.

use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::model::{NewSequence, Sequence, SequenceStep};

/// Parameters for inserting one step row.
#[derive(Debug, Clone)]
pub struct InsertStepParams {
    pub sequence_id: Uuid,
    pub email_subject: String,
    pub email_content: String,
    pub days_after_previous_step: u32,
    pub ordering: f32,
}

/// Parameters for rewriting a sequence row's mutable fields.
#[derive(Debug, Clone)]
pub struct UpdateSequenceParams {
    pub id: Uuid,
    pub open_tracking_enabled: bool,
    pub click_tracking_enabled: bool,
}

/// Parameters for rewriting a step row's mutable fields.
#[derive(Debug, Clone)]
pub struct UpdateStepParams {
    pub id: Uuid,
    pub email_subject: String,
    pub email_content: String,
}

/// Statement-level access to sequence and step rows.
///
/// Lookup misses are reported as [`StoreError::NoRows`]; updates and
/// deletes that match no row succeed silently, matching SQL execute
/// semantics.
pub trait SequenceStore: Send + Sync {
    /// Insert a sequence row and return its generated id
    fn insert_sequence(&self, params: &NewSequence) -> StoreResult<Uuid>;

    /// Insert a step row and return its generated id
    fn insert_step(&self, params: &InsertStepParams) -> StoreResult<Uuid>;

    /// Fetch a sequence by id
    fn get_sequence(&self, id: Uuid) -> StoreResult<Sequence>;

    /// Fetch all steps of a sequence, sorted by ordering value
    fn get_steps_by_sequence(&self, sequence_id: Uuid) -> StoreResult<Vec<SequenceStep>>;

    /// Overwrite the mutable fields of a sequence row
    fn update_sequence(&self, params: &UpdateSequenceParams) -> StoreResult<()>;

    /// Fetch a step by id
    fn get_step(&self, id: Uuid) -> StoreResult<SequenceStep>;

    /// Overwrite the mutable fields of a step row
    fn update_step(&self, params: &UpdateStepParams) -> StoreResult<()>;

    /// Delete a step by id; deleting an absent step is not an error
    fn delete_step(&self, id: Uuid) -> StoreResult<()>;
}

/// In-memory store backing tests and single-node deployments.
///
/// A SQL-backed implementation drops in behind the same trait.
#[derive(Default)]
pub struct InMemorySequenceStore {
    sequences: RwLock<Vec<Sequence>>,
    steps: RwLock<Vec<SequenceStep>>,
}

impl InMemorySequenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend("lock poisoned".to_string())
}

impl SequenceStore for InMemorySequenceStore {
    fn insert_sequence(&self, params: &NewSequence) -> StoreResult<Uuid> {
        let mut sequences = self.sequences.write().map_err(|_| poisoned())?;

        let now = Utc::now();
        let id = Uuid::new_v4();
        sequences.push(Sequence {
            id,
            name: params.name.clone(),
            open_tracking_enabled: params.open_tracking_enabled,
            click_tracking_enabled: params.click_tracking_enabled,
            created_at: now,
            updated_at: now,
        });

        Ok(id)
    }

    fn insert_step(&self, params: &InsertStepParams) -> StoreResult<Uuid> {
        let mut steps = self.steps.write().map_err(|_| poisoned())?;

        let now = Utc::now();
        let id = Uuid::new_v4();
        steps.push(SequenceStep {
            id,
            sequence_id: params.sequence_id,
            email_subject: params.email_subject.clone(),
            email_content: params.email_content.clone(),
            days_after_previous_step: params.days_after_previous_step,
            ordering: params.ordering,
            created_at: now,
            updated_at: now,
        });

        Ok(id)
    }

    fn get_sequence(&self, id: Uuid) -> StoreResult<Sequence> {
        let sequences = self.sequences.read().map_err(|_| poisoned())?;

        sequences
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(StoreError::NoRows)
    }

    fn get_steps_by_sequence(&self, sequence_id: Uuid) -> StoreResult<Vec<SequenceStep>> {
        let steps = self.steps.read().map_err(|_| poisoned())?;

        let mut matching: Vec<SequenceStep> = steps
            .iter()
            .filter(|s| s.sequence_id == sequence_id)
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            a.ordering
                .partial_cmp(&b.ordering)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(matching)
    }

    fn update_sequence(&self, params: &UpdateSequenceParams) -> StoreResult<()> {
        let mut sequences = self.sequences.write().map_err(|_| poisoned())?;

        if let Some(sequence) = sequences.iter_mut().find(|s| s.id == params.id) {
            sequence.open_tracking_enabled = params.open_tracking_enabled;
            sequence.click_tracking_enabled = params.click_tracking_enabled;
            sequence.updated_at = Utc::now();
        }

        Ok(())
    }

    fn get_step(&self, id: Uuid) -> StoreResult<SequenceStep> {
        let steps = self.steps.read().map_err(|_| poisoned())?;

        steps
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(StoreError::NoRows)
    }

    fn update_step(&self, params: &UpdateStepParams) -> StoreResult<()> {
        let mut steps = self.steps.write().map_err(|_| poisoned())?;

        if let Some(step) = steps.iter_mut().find(|s| s.id == params.id) {
            step.email_subject = params.email_subject.clone();
            step.email_content = params.email_content.clone();
            step.updated_at = Utc::now();
        }

        Ok(())
    }

    fn delete_step(&self, id: Uuid) -> StoreResult<()> {
        let mut steps = self.steps.write().map_err(|_| poisoned())?;

        steps.retain(|s| s.id != id);

        Ok(())
    }
}
