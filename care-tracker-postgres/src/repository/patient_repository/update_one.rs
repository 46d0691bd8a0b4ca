use async_trait::async_trait;
use care_tracker_db::models::patient::{PatientChanges, PatientModel};
use care_tracker_db::repository::update_one::UpdateOne;
use std::error::Error;
use uuid::Uuid;

use crate::utils::TryFromRow;

use super::repo_impl::{PatientRepositoryImpl, PATIENT_COLUMNS};

impl PatientRepositoryImpl {
    pub(super) async fn update_one_impl(
        repo: &PatientRepositoryImpl,
        id: Uuid,
        changes: PatientChanges,
    ) -> Result<Option<PatientModel>, Box<dyn Error + Send + Sync>> {
        // NULL parameters keep the current value; $5 says whether notes are being set
        let query = format!(
            r#"
            UPDATE patients
            SET full_name = COALESCE($2, full_name),
                birth_date = COALESCE($3, birth_date),
                bed = COALESCE($4, bed),
                notes = CASE WHEN $5 THEN $6 ELSE notes END,
                acuity = COALESCE($7, acuity),
                is_active = COALESCE($8, is_active)
            WHERE id = $1
            RETURNING {PATIENT_COLUMNS}
            "#
        );
        let row = sqlx::query(&query)
            .bind(id)
            .bind(&changes.full_name)
            .bind(changes.birth_date)
            .bind(&changes.bed)
            .bind(changes.notes.is_some())
            .bind(changes.notes.clone().flatten())
            .bind(changes.acuity)
            .bind(changes.status.map(|status| status.is_active()))
            .fetch_optional(&*repo.pool)
            .await?;

        row.map(|row| PatientModel::try_from_row(&row)).transpose()
    }
}

#[async_trait]
impl UpdateOne<PatientChanges, PatientModel> for PatientRepositoryImpl {
    async fn update_one(
        &self,
        id: Uuid,
        changes: PatientChanges,
    ) -> Result<Option<PatientModel>, Box<dyn Error + Send + Sync>> {
        Self::update_one_impl(self, id, changes).await
    }
}
