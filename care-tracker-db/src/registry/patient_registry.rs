use care_tracker_api::{ApiError, ApiResult};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::models::patient::{Acuity, NewPatientModel, PatientChanges, PatientFilter, PatientModel};
use crate::registry::list_cache::ListCache;
use crate::repository::PatientStore;

/// # Documentation
/// - Owns the cached list of active patients and mediates every patient mutation.
/// - Each successful call updates the cache as it completes; a later `list()` yields
///   an equivalent result.
/// - A failed call leaves the cache as it was and surfaces the store's message.
pub struct PatientRegistry<S: PatientStore> {
    store: Arc<S>,
    cache: ListCache<PatientModel>,
}

impl<S: PatientStore> PatientRegistry<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            cache: ListCache::new(),
        }
    }

    /// Fetches active patients, newest first, and replaces the cache with them.
    pub async fn list(&self) -> ApiResult<Vec<PatientModel>> {
        let rows = self
            .store
            .select_rows(PatientFilter::active())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "failed to load patients, keeping cached list");
                ApiError::FetchError(e.to_string())
            })?;
        tracing::debug!(count = rows.len(), "loaded active patients");
        Ok(self.cache.replace_all(rows))
    }

    pub async fn create(&self, patient: NewPatientModel) -> ApiResult<PatientModel> {
        patient.validate()?;
        let created = self
            .store
            .insert_one(patient)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "failed to create patient");
                ApiError::WriteError(e.to_string())
            })?;
        tracing::debug!(patient_id = %created.id, "created patient");
        self.cache.prepend(created.clone());
        Ok(created)
    }

    /// Applies a partial update. A change that makes the patient inactive removes
    /// it from the cache instead of replacing it; one that reactivates it puts it
    /// back at its `created_at` position.
    pub async fn update(&self, id: Uuid, changes: PatientChanges) -> ApiResult<PatientModel> {
        changes.validate()?;
        let updated = self
            .store
            .update_one(id, changes)
            .await
            .map_err(|e| {
                tracing::warn!(patient_id = %id, error = %e, "failed to update patient");
                ApiError::WriteError(e.to_string())
            })?
            .ok_or_else(|| {
                tracing::warn!(patient_id = %id, "update for unknown patient");
                ApiError::WriteError(format!("Patient {id} not found"))
            })?;

        if updated.is_active() {
            // A reactivated patient is not cached yet
            if !self.cache.replace(updated.clone()) {
                self.cache.insert_ordered_by(updated.clone(), |p| p.created_at);
            }
        } else {
            self.cache.remove(id);
        }
        tracing::debug!(patient_id = %id, "updated patient");
        Ok(updated)
    }

    /// Marks the patient inactive. The row stays in the store but is never listed again.
    pub async fn soft_delete(&self, id: Uuid) -> ApiResult<()> {
        self.store
            .update_one(id, PatientChanges::deactivate())
            .await
            .map_err(|e| {
                tracing::warn!(patient_id = %id, error = %e, "failed to deactivate patient");
                ApiError::WriteError(e.to_string())
            })?
            .ok_or_else(|| {
                tracing::warn!(patient_id = %id, "soft delete for unknown patient");
                ApiError::WriteError(format!("Patient {id} not found"))
            })?;

        self.cache.remove(id);
        tracing::debug!(patient_id = %id, "deactivated patient");
        Ok(())
    }

    /// The cached list, without contacting the store
    pub fn cached(&self) -> Vec<PatientModel> {
        self.cache.snapshot()
    }

    /// Cached patients whose name, bed or notes contain `term`, ignoring case
    pub fn search(&self, term: &str) -> Vec<PatientModel> {
        self.cache
            .with_rows(|rows| rows.iter().filter(|p| p.matches(term)).cloned().collect())
    }

    pub fn by_acuity(&self, acuity: Acuity) -> Vec<PatientModel> {
        self.cache
            .with_rows(|rows| rows.iter().filter(|p| p.acuity == acuity).cloned().collect())
    }

    pub fn active_count(&self) -> usize {
        self.cache.len()
    }
}
