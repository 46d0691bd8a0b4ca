use async_trait::async_trait;
use care_tracker_db::models::patient::{NewPatientModel, PatientModel};
use care_tracker_db::repository::insert_one::InsertOne;
use std::error::Error;

use crate::utils::TryFromRow;

use super::repo_impl::{PatientRepositoryImpl, PATIENT_COLUMNS};

impl PatientRepositoryImpl {
    pub(super) async fn insert_one_impl(
        repo: &PatientRepositoryImpl,
        item: NewPatientModel,
    ) -> Result<PatientModel, Box<dyn Error + Send + Sync>> {
        // id and created_at come from column defaults
        let query = format!(
            r#"
            INSERT INTO patients (full_name, birth_date, bed, notes, acuity, is_active)
            VALUES ($1, $2, $3, $4, $5, TRUE)
            RETURNING {PATIENT_COLUMNS}
            "#
        );
        let row = sqlx::query(&query)
            .bind(&item.full_name)
            .bind(item.birth_date)
            .bind(&item.bed)
            .bind(&item.notes)
            .bind(item.acuity)
            .fetch_one(&*repo.pool)
            .await?;

        PatientModel::try_from_row(&row)
    }
}

#[async_trait]
impl InsertOne<NewPatientModel, PatientModel> for PatientRepositoryImpl {
    async fn insert_one(
        &self,
        item: NewPatientModel,
    ) -> Result<PatientModel, Box<dyn Error + Send + Sync>> {
        Self::insert_one_impl(self, item).await
    }
}
