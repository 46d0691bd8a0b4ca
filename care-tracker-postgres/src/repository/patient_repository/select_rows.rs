use async_trait::async_trait;
use care_tracker_db::models::patient::{PatientFilter, PatientModel};
use care_tracker_db::repository::select_rows::SelectRows;
use std::error::Error;

use crate::utils::TryFromRow;

use super::repo_impl::{PatientRepositoryImpl, PATIENT_COLUMNS};

impl PatientRepositoryImpl {
    pub(super) async fn select_rows_impl(
        repo: &PatientRepositoryImpl,
        filter: PatientFilter,
    ) -> Result<Vec<PatientModel>, Box<dyn Error + Send + Sync>> {
        let query = format!(
            r#"
            SELECT {PATIENT_COLUMNS}
            FROM patients
            WHERE ($1::boolean IS NULL OR is_active = $1)
            ORDER BY created_at DESC
            "#
        );
        let rows = sqlx::query(&query)
            .bind(filter.status.map(|status| status.is_active()))
            .fetch_all(&*repo.pool)
            .await?;

        let mut patients = Vec::with_capacity(rows.len());
        for row in rows {
            patients.push(PatientModel::try_from_row(&row)?);
        }
        Ok(patients)
    }
}

#[async_trait]
impl SelectRows<PatientFilter, PatientModel> for PatientRepositoryImpl {
    async fn select_rows(
        &self,
        filter: PatientFilter,
    ) -> Result<Vec<PatientModel>, Box<dyn Error + Send + Sync>> {
        Self::select_rows_impl(self, filter).await
    }
}
