//! In-memory table store
//!
//! Mirrors the behaviour of the PostgreSQL repositories closely enough to drive
//! the registry and log in tests: server-assigned ids and timestamps, ordering,
//! the patient foreign key on events and the patient join. Reads and writes can
//! be made to fail to exercise the error paths.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use crate::models::care_event::{CareEventEntry, CareEventFilter, CareEventModel, NewCareEventModel, PatientSummary};
use crate::models::patient::{NewPatientModel, PatientChanges, PatientFilter, PatientModel};
use crate::repository::{InsertOne, SelectRows, UpdateOne};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    patients: Mutex<Vec<PatientModel>>,
    events: Mutex<Vec<CareEventModel>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent read fail until reset
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent write fail until reset
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The stored row regardless of its lifecycle state
    pub fn stored_patient(&self, id: Uuid) -> Option<PatientModel> {
        self.patients.lock().iter().find(|p| p.id == id).cloned()
    }

    pub fn stored_event_count(&self) -> usize {
        self.events.lock().len()
    }

    /// Puts a patient row in place as-is, bypassing the insert path.
    pub fn seed_patient(&self, patient: PatientModel) {
        self.patients.lock().push(patient);
    }

    fn check_read(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err("connection refused: table store unavailable".into());
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err("write rejected by table store".into());
        }
        Ok(())
    }

    fn join(&self, event: CareEventModel) -> Result<CareEventEntry, Box<dyn Error + Send + Sync>> {
        let patients = self.patients.lock();
        let patient = patients
            .iter()
            .find(|p| p.id == event.patient_id)
            .ok_or_else(|| format!("Patient {} not found for event {}", event.patient_id, event.id))?;
        Ok(CareEventEntry {
            patient: PatientSummary::from(patient),
            event,
        })
    }
}

#[async_trait]
impl SelectRows<PatientFilter, PatientModel> for InMemoryStore {
    async fn select_rows(
        &self,
        filter: PatientFilter,
    ) -> Result<Vec<PatientModel>, Box<dyn Error + Send + Sync>> {
        self.check_read()?;
        // Newest insert first on equal timestamps
        let mut rows: Vec<PatientModel> = self
            .patients
            .lock()
            .iter()
            .rev()
            .filter(|p| filter.accepts(p))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

#[async_trait]
impl InsertOne<NewPatientModel, PatientModel> for InMemoryStore {
    async fn insert_one(
        &self,
        item: NewPatientModel,
    ) -> Result<PatientModel, Box<dyn Error + Send + Sync>> {
        self.check_write()?;
        let patient = item.into_model(Uuid::new_v4(), Utc::now())?;
        self.patients.lock().push(patient.clone());
        Ok(patient)
    }
}

#[async_trait]
impl UpdateOne<PatientChanges, PatientModel> for InMemoryStore {
    async fn update_one(
        &self,
        id: Uuid,
        changes: PatientChanges,
    ) -> Result<Option<PatientModel>, Box<dyn Error + Send + Sync>> {
        self.check_write()?;
        let mut patients = self.patients.lock();
        let Some(patient) = patients.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        // Apply to a copy so a rejected change leaves the row intact
        let mut updated = patient.clone();
        updated.apply(&changes)?;
        *patient = updated.clone();
        Ok(Some(updated))
    }
}

#[async_trait]
impl SelectRows<CareEventFilter, CareEventEntry> for InMemoryStore {
    async fn select_rows(
        &self,
        filter: CareEventFilter,
    ) -> Result<Vec<CareEventEntry>, Box<dyn Error + Send + Sync>> {
        self.check_read()?;
        let mut events: Vec<CareEventModel> = self
            .events
            .lock()
            .iter()
            .rev()
            .filter(|e| filter.accepts(e))
            .cloned()
            .collect();
        events.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        events.into_iter().map(|event| self.join(event)).collect()
    }
}

#[async_trait]
impl InsertOne<NewCareEventModel, CareEventEntry> for InMemoryStore {
    async fn insert_one(
        &self,
        item: NewCareEventModel,
    ) -> Result<CareEventEntry, Box<dyn Error + Send + Sync>> {
        self.check_write()?;
        let event = item.into_model(Uuid::new_v4(), Utc::now());
        // Foreign key: the patient row must exist, active or not
        let entry = self.join(event)?;
        self.events.lock().push(entry.event.clone());
        Ok(entry)
    }
}
