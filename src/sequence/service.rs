//! # Sequence Service
//!
//! Orchestrates store statements into the operations the REST surface
//! exposes. The service owns no state beyond the store handle and performs
//! no error classification: store errors propagate unchanged and the HTTP
//! layer decides what the caller sees.

use uuid::Uuid;

use super::model::{NewSequence, NewStep, Sequence, SequenceStep};
use super::store::{InsertStepParams, SequenceStore, UpdateSequenceParams, UpdateStepParams};
use super::errors::StoreResult;

/// Service for creating and updating sequences and their steps.
pub struct SequenceService<S> {
    store: S,
}

impl<S: SequenceStore> SequenceService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a sequence together with its steps.
    ///
    /// Steps are inserted in input order, each with an ordering value equal
    /// to its zero-based index in the input list. The persisted sequence
    /// and its steps are re-read and returned. A failed statement aborts
    /// the operation; rows already written stay in place.
    pub fn create_sequence(
        &self,
        sequence: NewSequence,
        steps: Vec<NewStep>,
    ) -> StoreResult<(Sequence, Vec<SequenceStep>)> {
        let id = self.store.insert_sequence(&sequence)?;

        for (i, step) in steps.into_iter().enumerate() {
            self.store.insert_step(&InsertStepParams {
                sequence_id: id,
                email_subject: step.email_subject,
                email_content: step.email_content,
                days_after_previous_step: step.days_after_previous_step,
                ordering: i as f32,
            })?;
        }

        let created = self.store.get_sequence(id)?;
        let created_steps = self.store.get_steps_by_sequence(id)?;

        Ok((created, created_steps))
    }

    /// Apply a partial update to a sequence's tracking flags.
    ///
    /// A `Some` value replaces the stored flag, `None` keeps it. Returns
    /// the updated sequence with its current steps, or `NoRows` if the id
    /// is unknown.
    pub fn update_sequence(
        &self,
        id: Uuid,
        open_tracking_enabled: Option<bool>,
        click_tracking_enabled: Option<bool>,
    ) -> StoreResult<(Sequence, Vec<SequenceStep>)> {
        let current = self.store.get_sequence(id)?;

        self.store.update_sequence(&UpdateSequenceParams {
            id,
            open_tracking_enabled: open_tracking_enabled.unwrap_or(current.open_tracking_enabled),
            click_tracking_enabled: click_tracking_enabled
                .unwrap_or(current.click_tracking_enabled),
        })?;

        let updated = self.store.get_sequence(id)?;
        let steps = self.store.get_steps_by_sequence(id)?;

        Ok((updated, steps))
    }

    /// Apply a partial update to a step's subject and content.
    ///
    /// The step is looked up by id alone; `sequence_id` is accepted for
    /// route symmetry but does not scope the lookup. Returns `NoRows` if
    /// the step id is unknown.
    pub fn update_step(
        &self,
        _sequence_id: Uuid,
        step_id: Uuid,
        email_subject: Option<String>,
        email_content: Option<String>,
    ) -> StoreResult<SequenceStep> {
        let current = self.store.get_step(step_id)?;

        self.store.update_step(&UpdateStepParams {
            id: step_id,
            email_subject: email_subject.unwrap_or(current.email_subject),
            email_content: email_content.unwrap_or(current.email_content),
        })?;

        self.store.get_step(step_id)
    }

    /// Delete a step by id.
    ///
    /// The step is not verified to belong to `sequence_id`, and sibling
    /// ordering values are left as they are. Deleting an absent step
    /// succeeds.
    pub fn delete_step(&self, _sequence_id: Uuid, step_id: Uuid) -> StoreResult<()> {
        self.store.delete_step(step_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::errors::StoreError;
    use crate::sequence::store::InMemorySequenceStore;

    fn service() -> SequenceService<InMemorySequenceStore> {
        SequenceService::new(InMemorySequenceStore::new())
    }

    fn new_sequence(name: &str) -> NewSequence {
        NewSequence {
            name: name.to_string(),
            open_tracking_enabled: true,
            click_tracking_enabled: true,
        }
    }

    fn step(subject: &str, content: &str, days: u32) -> NewStep {
        NewStep {
            email_subject: subject.to_string(),
            email_content: content.to_string(),
            days_after_previous_step: days,
        }
    }

    #[test]
    fn test_create_sequence_without_steps() {
        let service = service();

        let (sequence, steps) = service
            .create_sequence(new_sequence("New Test Sequence"), Vec::new())
            .unwrap();

        assert_eq!(sequence.name, "New Test Sequence");
        assert!(sequence.open_tracking_enabled);
        assert!(sequence.click_tracking_enabled);
        assert!(steps.is_empty());
    }

    #[test]
    fn test_create_sequence_assigns_creation_order() {
        let service = service();

        let (sequence, steps) = service
            .create_sequence(
                new_sequence("W1"),
                vec![step("S1", "C1", 1), step("S2", "C2", 2)],
            )
            .unwrap();

        assert_eq!(sequence.name, "W1");
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].email_subject, "S1");
        assert_eq!(steps[0].email_content, "C1");
        assert_eq!(steps[0].ordering, 0.0);
        assert_eq!(steps[1].email_subject, "S2");
        assert_eq!(steps[1].email_content, "C2");
        assert_eq!(steps[1].ordering, 1.0);
        assert!(steps.iter().all(|s| s.sequence_id == sequence.id));
    }

    #[test]
    fn test_update_sequence_merges_partial_flags() {
        let service = service();
        let (created, _) = service
            .create_sequence(new_sequence("Welcome"), Vec::new())
            .unwrap();

        // Only open tracking changes; click tracking keeps its stored value
        let (updated, _) = service
            .update_sequence(created.id, Some(false), None)
            .unwrap();
        assert!(!updated.open_tracking_enabled);
        assert!(updated.click_tracking_enabled);

        // Now only click tracking changes
        let (updated, _) = service
            .update_sequence(created.id, None, Some(false))
            .unwrap();
        assert!(!updated.open_tracking_enabled);
        assert!(!updated.click_tracking_enabled);
    }

    #[test]
    fn test_update_sequence_returns_current_steps() {
        let service = service();
        let (created, _) = service
            .create_sequence(new_sequence("Welcome"), vec![step("S1", "C1", 1)])
            .unwrap();

        let (_, steps) = service.update_sequence(created.id, None, None).unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].email_subject, "S1");
    }

    #[test]
    fn test_update_unknown_sequence_signals_no_rows() {
        let service = service();

        let result = service.update_sequence(Uuid::new_v4(), Some(true), None);
        assert_eq!(result.unwrap_err(), StoreError::NoRows);
    }

    #[test]
    fn test_update_step_subject_only_keeps_content() {
        let service = service();
        let (created, steps) = service
            .create_sequence(new_sequence("Welcome"), vec![step("S1", "C1", 1)])
            .unwrap();

        let updated = service
            .update_step(created.id, steps[0].id, Some("New Subject".to_string()), None)
            .unwrap();

        assert_eq!(updated.email_subject, "New Subject");
        assert_eq!(updated.email_content, "C1");
    }

    #[test]
    fn test_update_step_content_only_keeps_subject() {
        let service = service();
        let (created, steps) = service
            .create_sequence(new_sequence("Welcome"), vec![step("S1", "C1", 1)])
            .unwrap();

        let updated = service
            .update_step(created.id, steps[0].id, None, Some("New Content".to_string()))
            .unwrap();

        assert_eq!(updated.email_subject, "S1");
        assert_eq!(updated.email_content, "New Content");
    }

    #[test]
    fn test_update_unknown_step_signals_no_rows() {
        let service = service();
        let (created, _) = service
            .create_sequence(new_sequence("Welcome"), Vec::new())
            .unwrap();

        let result = service.update_step(created.id, Uuid::new_v4(), None, None);
        assert_eq!(result.unwrap_err(), StoreError::NoRows);
    }

    #[test]
    fn test_delete_step_then_refetch_signals_no_rows() {
        let service = service();
        let (created, steps) = service
            .create_sequence(new_sequence("Welcome"), vec![step("S1", "C1", 1)])
            .unwrap();

        service.delete_step(created.id, steps[0].id).unwrap();

        let result = service.update_step(created.id, steps[0].id, None, None);
        assert_eq!(result.unwrap_err(), StoreError::NoRows);
    }

    #[test]
    fn test_delete_step_does_not_recompact_sibling_ordering() {
        let service = service();
        let (created, steps) = service
            .create_sequence(
                new_sequence("Welcome"),
                vec![step("S1", "C1", 1), step("S2", "C2", 2), step("S3", "C3", 3)],
            )
            .unwrap();

        service.delete_step(created.id, steps[1].id).unwrap();

        let (_, remaining) = service.update_sequence(created.id, None, None).unwrap();
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0].ordering, 0.0);
        assert_eq!(remaining[1].ordering, 2.0);
    }

    #[test]
    fn test_delete_unknown_step_succeeds() {
        let service = service();
        let (created, _) = service
            .create_sequence(new_sequence("Welcome"), Vec::new())
            .unwrap();

        assert!(service.delete_step(created.id, Uuid::new_v4()).is_ok());
    }

    /// Store stub whose statements all fail.
    struct FailingStore;

    impl SequenceStore for FailingStore {
        fn insert_sequence(&self, _: &NewSequence) -> StoreResult<Uuid> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
        fn insert_step(&self, _: &InsertStepParams) -> StoreResult<Uuid> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
        fn get_sequence(&self, _: Uuid) -> StoreResult<Sequence> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
        fn get_steps_by_sequence(&self, _: Uuid) -> StoreResult<Vec<SequenceStep>> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
        fn update_sequence(&self, _: &UpdateSequenceParams) -> StoreResult<()> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
        fn get_step(&self, _: Uuid) -> StoreResult<SequenceStep> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
        fn update_step(&self, _: &UpdateStepParams) -> StoreResult<()> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
        fn delete_step(&self, _: Uuid) -> StoreResult<()> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
    }

    #[test]
    fn test_store_errors_propagate_unchanged() {
        let service = SequenceService::new(FailingStore);

        let result = service.create_sequence(new_sequence("Welcome"), Vec::new());
        assert_eq!(
            result.unwrap_err(),
            StoreError::Backend("connection refused".to_string())
        );
    }
}
