use care_tracker_db::models::care_event::{CareEventEntry, CareEventModel, PatientSummary};
use crate::utils::{get_heapless_string, TryFromRow};
use sqlx::{postgres::PgRow, FromRow, PgPool};
use std::error::Error;
use std::sync::Arc;

/// Event columns qualified by the `e` alias, followed by the joined patient columns
pub(super) const ENTRY_COLUMNS: &str = r#"
    e.id, e.patient_id, e."type", e.scheduled_at, e.occurred_at,
    e.volume_ml, e.meal_desc, e.med_name, e.med_dose, e.bathroom_type,
    e.notes, e.created_at,
    p.full_name AS patient_full_name, p.bed AS patient_bed
"#;

pub struct CareEventRepositoryImpl {
    pub(crate) pool: Arc<PgPool>,
}

impl CareEventRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for CareEventEntry {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let event = CareEventModel::from_row(row)?;
        let patient = PatientSummary {
            full_name: sqlx::Row::try_get(row, "patient_full_name")?,
            bed: get_heapless_string(row, "patient_bed")?,
        };
        Ok(CareEventEntry { event, patient })
    }
}
