use care_tracker_db::models::patient::{PatientModel, PatientStatus};
use crate::utils::{get_heapless_string, TryFromRow};
use sqlx::{postgres::PgRow, PgPool, Row};
use std::error::Error;
use std::sync::Arc;

/// Columns returned by every patient query, in `TryFromRow` order
pub(super) const PATIENT_COLUMNS: &str =
    "id, full_name, birth_date, bed, notes, acuity, is_active, created_at";

pub struct PatientRepositoryImpl {
    pub(crate) pool: Arc<PgPool>,
}

impl PatientRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for PatientModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(PatientModel {
            id: row.try_get("id")?,
            full_name: row.try_get("full_name")?,
            birth_date: row.try_get("birth_date")?,
            bed: get_heapless_string(row, "bed")?,
            notes: row.try_get("notes")?,
            acuity: row.try_get("acuity")?,
            status: PatientStatus::from_is_active(row.try_get("is_active")?),
            created_at: row.try_get("created_at")?,
        })
    }
}
