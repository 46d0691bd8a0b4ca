use care_tracker_db::registry::{CareEventLog, PatientRegistry};
use sqlx::PgPool;
use std::sync::Arc;

use crate::repository::{CareEventRepositoryImpl, PatientRepositoryImpl};

pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn build_patient_repo(&self) -> Arc<PatientRepositoryImpl> {
        Arc::new(PatientRepositoryImpl::new(self.pool.clone()))
    }

    pub fn build_care_event_repo(&self) -> Arc<CareEventRepositoryImpl> {
        Arc::new(CareEventRepositoryImpl::new(self.pool.clone()))
    }

    /// Create all repositories sharing the same pool
    pub fn build_all(&self) -> CareRepositories {
        CareRepositories {
            patient_repository: self.build_patient_repo(),
            care_event_repository: self.build_care_event_repo(),
        }
    }
}

pub struct CareRepositories {
    pub patient_repository: Arc<PatientRepositoryImpl>,
    pub care_event_repository: Arc<CareEventRepositoryImpl>,
}

impl CareRepositories {
    /// A patient registry with an empty cache; call `list` to populate it.
    pub fn patient_registry(&self) -> PatientRegistry<PatientRepositoryImpl> {
        PatientRegistry::new(self.patient_repository.clone())
    }

    /// A care event log with an empty cache; call `list` to populate it.
    pub fn care_event_log(&self) -> CareEventLog<CareEventRepositoryImpl> {
        CareEventLog::new(self.care_event_repository.clone())
    }
}

#[cfg(test)]
#[serial_test::serial]
mod tests {
    use crate::repository::patient_repository::test_utils::test_utils::create_test_patient;
    use crate::test_helper::setup_test_context;
    use care_tracker_db::models::care_event::NewCareEventModel;
    use chrono::Utc;

    #[tokio::test]
    #[ignore]
    async fn test_registry_and_log_over_postgres() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let registry = ctx.repos().patient_registry();
        let log = ctx.repos().care_event_log();

        let patient = registry.create(create_test_patient("101-A")).await?;
        assert!(registry.cached().iter().any(|p| p.id == patient.id));

        let entry = log
            .append(NewCareEventModel::medication(patient.id, "Dipirona", "500mg", Utc::now()))
            .await?;
        assert_eq!(log.cached()[0].event.id, entry.event.id);

        registry.soft_delete(patient.id).await?;
        assert!(registry.cached().iter().all(|p| p.id != patient.id));

        // Events survive the soft delete
        let history = log.list(Some(patient.id)).await?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].patient.full_name, patient.full_name);

        let listed = registry.list().await?;
        assert!(listed.iter().all(|p| p.id != patient.id));

        Ok(())
    }
}
