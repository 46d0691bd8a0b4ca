use async_trait::async_trait;
use care_tracker_db::models::care_event::{CareEventEntry, CareEventFilter};
use care_tracker_db::repository::select_rows::SelectRows;
use std::error::Error;

use crate::utils::TryFromRow;

use super::repo_impl::{CareEventRepositoryImpl, ENTRY_COLUMNS};

impl CareEventRepositoryImpl {
    pub(super) async fn select_rows_impl(
        repo: &CareEventRepositoryImpl,
        filter: CareEventFilter,
    ) -> Result<Vec<CareEventEntry>, Box<dyn Error + Send + Sync>> {
        let query = format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM events e
            JOIN patients p ON p.id = e.patient_id
            WHERE ($1::uuid IS NULL OR e.patient_id = $1)
            ORDER BY e.occurred_at DESC
            "#
        );
        let rows = sqlx::query(&query)
            .bind(filter.patient_id)
            .fetch_all(&*repo.pool)
            .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            entries.push(CareEventEntry::try_from_row(&row)?);
        }
        Ok(entries)
    }
}

#[async_trait]
impl SelectRows<CareEventFilter, CareEventEntry> for CareEventRepositoryImpl {
    async fn select_rows(
        &self,
        filter: CareEventFilter,
    ) -> Result<Vec<CareEventEntry>, Box<dyn Error + Send + Sync>> {
        Self::select_rows_impl(self, filter).await
    }
}

#[cfg(test)]
#[serial_test::serial]
mod tests {
    use crate::repository::patient_repository::test_utils::test_utils::create_test_patient;
    use crate::test_helper::setup_test_context;
    use care_tracker_db::models::care_event::CareEventFilter;
    use care_tracker_db::repository::insert_one::InsertOne;
    use care_tracker_db::repository::select_rows::SelectRows;
    use chrono::{Duration, Utc};
    use super::super::test_utils::test_utils::create_test_drink;

    #[tokio::test]
    #[ignore]
    async fn test_select_for_patient_newest_first() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let patient_repo = &ctx.repos().patient_repository;
        let event_repo = &ctx.repos().care_event_repository;

        let maria = patient_repo.insert_one(create_test_patient("101-A")).await?;
        let joao = patient_repo.insert_one(create_test_patient("102-B")).await?;

        let now = Utc::now();
        let older = event_repo
            .insert_one(create_test_drink(maria.id, now - Duration::hours(2)))
            .await?;
        let newer = event_repo
            .insert_one(create_test_drink(maria.id, now - Duration::minutes(5)))
            .await?;
        event_repo
            .insert_one(create_test_drink(joao.id, now - Duration::minutes(1)))
            .await?;

        let rows = event_repo.select_rows(CareEventFilter::for_patient(maria.id)).await?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].event.id, newer.event.id);
        assert_eq!(rows[1].event.id, older.event.id);
        assert!(rows.iter().all(|entry| entry.patient.full_name == maria.full_name));
        assert!(rows.iter().all(|entry| entry.patient.bed == maria.bed));

        Ok(())
    }
}
