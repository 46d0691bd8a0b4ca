use async_trait::async_trait;
use care_tracker_db::models::care_event::{CareEventEntry, NewCareEventModel};
use care_tracker_db::repository::insert_one::InsertOne;
use std::error::Error;

use crate::utils::TryFromRow;

use super::repo_impl::{CareEventRepositoryImpl, ENTRY_COLUMNS};

impl CareEventRepositoryImpl {
    pub(super) async fn insert_one_impl(
        repo: &CareEventRepositoryImpl,
        item: NewCareEventModel,
    ) -> Result<CareEventEntry, Box<dyn Error + Send + Sync>> {
        // The insert and the patient join run as one statement
        let query = format!(
            r#"
            WITH e AS (
                INSERT INTO events (
                    patient_id, "type", scheduled_at, occurred_at, volume_ml,
                    meal_desc, med_name, med_dose, bathroom_type, notes
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING *
            )
            SELECT {ENTRY_COLUMNS}
            FROM e
            JOIN patients p ON p.id = e.patient_id
            "#
        );
        let row = sqlx::query(&query)
            .bind(item.patient_id)
            .bind(item.event_type)
            .bind(item.scheduled_at)
            .bind(item.occurred_at)
            .bind(item.volume_ml)
            .bind(&item.meal_desc)
            .bind(&item.med_name)
            .bind(&item.med_dose)
            .bind(item.bathroom_type)
            .bind(&item.notes)
            .fetch_one(&*repo.pool)
            .await?;

        CareEventEntry::try_from_row(&row)
    }
}

#[async_trait]
impl InsertOne<NewCareEventModel, CareEventEntry> for CareEventRepositoryImpl {
    async fn insert_one(
        &self,
        item: NewCareEventModel,
    ) -> Result<CareEventEntry, Box<dyn Error + Send + Sync>> {
        Self::insert_one_impl(self, item).await
    }
}
