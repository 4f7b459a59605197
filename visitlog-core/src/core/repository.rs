//! The in-memory visit collection and its mutation operations.
//!
//! [`VisitRepository`] is the primary interface for all mutations. It owns an
//! injected [`VisitStore`] and the collection loaded from it at open; every
//! mutating operation persists before reporting success, and a persistence
//! failure rolls the in-memory collection back to its pre-operation value.
//!
//! There is a single writer: `&mut self` on every mutation means no two
//! operations can interleave.

use crate::{Result, Visit, VisitDraft, VisitStore, VisitlogError};
use chrono::Utc;
use uuid::Uuid;

/// The current visit collection, synchronized to a durable store.
pub struct VisitRepository<S: VisitStore> {
    store: S,
    visits: Vec<Visit>,
}

impl<S: VisitStore> VisitRepository<S> {
    /// Opens a repository over `store`, reading the collection once.
    ///
    /// # Errors
    ///
    /// Returns [`VisitlogError::Database`] or [`VisitlogError::Json`] if the
    /// stored collection cannot be read back.
    pub fn open(store: S) -> Result<Self> {
        let visits = store.load()?;
        Ok(Self { store, visits })
    }

    /// The full collection in its stored (insertion) order. Display order is
    /// always a recomputed projection — see [`crate::filter_visits`].
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    pub fn get(&self, id: &str) -> Option<&Visit> {
        self.visits.iter().find(|v| v.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Creates a new visit from a form draft.
    ///
    /// Assigns a fresh unique id and the current timestamp, leaves
    /// `last_modified` unset, and prepends the record to the collection.
    ///
    /// # Errors
    ///
    /// Returns [`VisitlogError::ValidationFailed`] if the draft's business
    /// name is empty, or a persistence error (with the collection rolled
    /// back) if the store write fails.
    pub fn create(&mut self, draft: VisitDraft) -> Result<Visit> {
        if draft.business_name.trim().is_empty() {
            return Err(VisitlogError::ValidationFailed(
                "Business name is required".to_string(),
            ));
        }

        let visit = Visit {
            id: Uuid::new_v4().to_string(),
            business_name: draft.business_name,
            timestamp: Utc::now(),
            last_modified: None,
            contact_person: draft.contact_person,
            owner_name: draft.owner_name,
            address: draft.address,
            notes: draft.notes,
            current_provider: draft.current_provider,
            owner_contact: draft.owner_contact,
            number_of_phones: draft.number_of_phones,
            estimated_monthly_payment: draft.estimated_monthly_payment,
            visit_type: draft.visit_type,
            revisit_date: draft.revisit_date,
            is_revisit_successful: None,
        };

        let record = visit.clone();
        self.commit(move |visits| visits.insert(0, visit))?;
        Ok(record)
    }

    /// Merges a form draft into the visit with `id`, keeping the original
    /// `timestamp` and setting `last_modified` to now.
    ///
    /// # Errors
    ///
    /// Returns [`VisitlogError::VisitNotFound`] if no such visit exists —
    /// a hard error here, since it indicates a stale navigation state rather
    /// than a user mistake. Returns [`VisitlogError::ValidationFailed`] if
    /// the draft's business name is empty, or a persistence error with the
    /// collection rolled back.
    pub fn update(&mut self, id: &str, draft: VisitDraft) -> Result<Visit> {
        if draft.business_name.trim().is_empty() {
            return Err(VisitlogError::ValidationFailed(
                "Business name is required".to_string(),
            ));
        }

        let index = self
            .visits
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| VisitlogError::VisitNotFound(id.to_string()))?;

        let mut updated = self.visits[index].clone();
        updated.apply_draft(draft);
        updated.last_modified = Some(Utc::now());

        let record = updated.clone();
        self.commit(move |visits| visits[index] = updated)?;
        Ok(record)
    }

    /// Removes the visit with `id`. Deleting an id that is not present is a
    /// no-op, not an error — deletion is idempotent at this layer, and a
    /// pure no-op does not touch the store.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let Some(index) = self.visits.iter().position(|v| v.id == id) else {
            return Ok(());
        };
        self.commit(move |visits| {
            visits.remove(index);
        })
    }

    /// Flips `is_revisit_successful` on the visit with `id` (an absent flag
    /// counts as `false` before the flip) and sets `last_modified`. No-op if
    /// the id is not present.
    pub fn toggle_revisit_success(&mut self, id: &str) -> Result<()> {
        let Some(index) = self.visits.iter().position(|v| v.id == id) else {
            return Ok(());
        };
        let now = Utc::now();
        self.commit(move |visits| {
            let visit = &mut visits[index];
            visit.is_revisit_successful = Some(!visit.is_revisit_successful.unwrap_or(false));
            visit.last_modified = Some(now);
        })
    }

    /// Atomically replaces the whole collection, as used by import.
    ///
    /// Persisted order is the incoming document order.
    ///
    /// # Errors
    ///
    /// Returns [`VisitlogError::ValidationFailed`] — without mutating
    /// anything — if any record has an empty `id` or `business_name`, or if
    /// two records share an id. Persistence failures roll back as usual.
    pub fn replace_all(&mut self, records: Vec<Visit>) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for record in &records {
            if record.id.trim().is_empty() {
                return Err(VisitlogError::ValidationFailed(
                    "A record is missing its id".to_string(),
                ));
            }
            if record.business_name.trim().is_empty() {
                return Err(VisitlogError::ValidationFailed(format!(
                    "Record {} is missing its business name",
                    record.id
                )));
            }
            if !seen.insert(record.id.as_str()) {
                return Err(VisitlogError::ValidationFailed(format!(
                    "Duplicate visit id: {}",
                    record.id
                )));
            }
        }
        self.commit(move |visits| *visits = records)
    }

    /// Applies `mutate` to the collection and persists the result. If the
    /// store write fails, the collection is restored to its pre-operation
    /// snapshot and the store error is returned: success is never reported
    /// while the store and memory disagree.
    fn commit(&mut self, mutate: impl FnOnce(&mut Vec<Visit>)) -> Result<()> {
        let snapshot = self.visits.clone();
        mutate(&mut self.visits);
        if let Err(e) = self.store.save(&self.visits) {
            log::warn!("persisting visit collection failed, rolling back: {e}");
            self.visits = snapshot;
            return Err(e);
        }
        Ok(())
    }
}
