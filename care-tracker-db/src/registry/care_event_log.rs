use care_tracker_api::{ApiError, ApiResult};
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::models::care_event::{CareEventEntry, CareEventFilter, NewCareEventModel};
use crate::registry::list_cache::ListCache;
use crate::repository::CareEventStore;
use crate::views::today_stats::TodayStats;

/// # Documentation
/// - Append-only log of care events joined with their patient's name and bed.
/// - `list` replaces the cache; `append` prepends the stored row without re-sorting,
///   so appending a back-dated event leaves the cache out of `occurred_at` order
///   until the next `list`.
/// - Stats are computed from the cache only and never fail.
pub struct CareEventLog<S: CareEventStore> {
    store: Arc<S>,
    cache: ListCache<CareEventEntry>,
}

impl<S: CareEventStore> CareEventLog<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            cache: ListCache::new(),
        }
    }

    /// Fetches events, optionally for one patient, most recent `occurred_at` first.
    pub async fn list(&self, patient_id: Option<Uuid>) -> ApiResult<Vec<CareEventEntry>> {
        let filter = CareEventFilter { patient_id };
        let rows = self.store.select_rows(filter).await.map_err(|e| {
            tracing::warn!(patient_id = ?patient_id, error = %e, "failed to load care events, keeping cached list");
            ApiError::FetchError(e.to_string())
        })?;
        tracing::debug!(patient_id = ?patient_id, count = rows.len(), "loaded care events");
        Ok(self.cache.replace_all(rows))
    }

    pub async fn append(&self, event: NewCareEventModel) -> ApiResult<CareEventEntry> {
        event.validate()?;
        let patient_id = event.patient_id;
        let event_type = event.event_type;
        let entry = self.store.insert_one(event).await.map_err(|e| {
            tracing::warn!(%patient_id, ?event_type, error = %e, "failed to append care event");
            ApiError::WriteError(e.to_string())
        })?;
        tracing::debug!(event_id = %entry.event.id, %patient_id, ?event_type, "appended care event");
        self.cache.prepend(entry.clone());
        Ok(entry)
    }

    /// Counts of cached events that occurred on the current UTC date
    pub fn today_stats(&self) -> TodayStats {
        self.cache.with_rows(|rows| TodayStats::for_today(rows))
    }

    /// Counts of cached events that occurred on the given UTC date
    pub fn stats_for_day(&self, day: NaiveDate) -> TodayStats {
        self.cache.with_rows(|rows| TodayStats::for_day(rows, day))
    }

    /// The first `limit` cached entries
    pub fn recent(&self, limit: usize) -> Vec<CareEventEntry> {
        self.cache
            .with_rows(|rows| rows.iter().take(limit).cloned().collect())
    }

    /// The cached list, without contacting the store
    pub fn cached(&self) -> Vec<CareEventEntry> {
        self.cache.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use crate::models::care_event::{BathroomType, CareEventType};
    use crate::models::patient::NewPatientModel;
    use crate::registry::patient_registry::PatientRegistry;
    use chrono::{Duration, NaiveDate, Utc};
    use tokio_test::{assert_err, assert_ok};

    struct Ward {
        store: Arc<InMemoryStore>,
        patients: PatientRegistry<InMemoryStore>,
        log: CareEventLog<InMemoryStore>,
    }

    fn setup() -> Ward {
        let store = Arc::new(InMemoryStore::new());
        Ward {
            patients: PatientRegistry::new(store.clone()),
            log: CareEventLog::new(store.clone()),
            store,
        }
    }

    async fn admit(ward: &Ward, name: &str, bed: &str) -> Uuid {
        let patient = NewPatientModel::new(name, NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(), bed);
        assert_ok!(ward.patients.create(patient).await).id
    }

    #[tokio::test]
    async fn test_medication_scenario() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ward = setup();
        let patient_id = admit(&ward, "Maria Silva", "101-A").await;
        assert!(!patient_id.is_nil());

        let now = Utc::now();
        let due = now - Duration::minutes(15);
        ward.log
            .append(NewCareEventModel::medication(patient_id, "Dipirona", "500mg", now).scheduled_for(due))
            .await?;

        let events = ward.log.list(Some(patient_id)).await?;
        assert_eq!(events.len(), 1);
        let event = &events[0].event;
        assert_eq!(event.patient_id, patient_id);
        assert_eq!(event.event_type, CareEventType::Med);
        assert_eq!(event.med_name.as_deref(), Some("Dipirona"));
        assert_eq!(event.med_dose.as_deref(), Some("500mg"));
        assert_eq!(event.occurred_at, now);
        assert_eq!(event.scheduled_at, Some(due));
        assert_eq!(events[0].patient.full_name, "Maria Silva");
        assert_eq!(events[0].patient.bed.as_str(), "101-A");

        assert_eq!(ward.log.today_stats().medications, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_single_drink_only_moves_liquids() {
        let ward = setup();
        let patient_id = admit(&ward, "Ana Costa", "103-A").await;
        assert_eq!(ward.log.today_stats(), TodayStats::default());

        assert_ok!(ward.log.append(NewCareEventModel::drink(patient_id, 200, Utc::now())).await);

        let stats = ward.log.today_stats();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.liquids, 1);
        assert_eq!(
            TodayStats {
                total: 0,
                liquids: 0,
                ..stats
            },
            TodayStats::default()
        );
    }

    #[tokio::test]
    async fn test_list_filters_by_patient_and_orders_by_occurrence() {
        let ward = setup();
        let maria = admit(&ward, "Maria Silva", "101-A").await;
        let joao = admit(&ward, "João Santos", "102-B").await;
        let now = Utc::now();

        assert_ok!(ward.log.append(NewCareEventModel::drink(maria, 200, now - Duration::hours(3))).await);
        assert_ok!(ward.log.append(NewCareEventModel::meal(joao, "Jantar", now - Duration::hours(1))).await);
        assert_ok!(ward.log.append(NewCareEventModel::bathroom(maria, BathroomType::Urine, now)).await);
        assert_ok!(ward.log.append(NewCareEventModel::note(maria, "Dreno 40ml", now - Duration::hours(2))).await);

        let all = assert_ok!(ward.log.list(None).await);
        assert_eq!(all.len(), 4);
        assert!(all.windows(2).all(|w| w[0].event.occurred_at >= w[1].event.occurred_at));

        let only_maria = assert_ok!(ward.log.list(Some(maria)).await);
        assert_eq!(only_maria.len(), 3);
        assert!(only_maria.iter().all(|e| e.event.patient_id == maria));
        assert_eq!(ward.log.cached(), only_maria);
    }

    #[tokio::test]
    async fn test_append_prepends_without_resorting() {
        let ward = setup();
        let patient_id = admit(&ward, "Maria Silva", "101-A").await;
        let now = Utc::now();

        assert_ok!(ward.log.append(NewCareEventModel::drink(patient_id, 100, now)).await);
        let back_dated = assert_ok!(
            ward.log
                .append(NewCareEventModel::drink(patient_id, 50, now - Duration::hours(5)))
                .await
        );

        assert_eq!(ward.log.cached()[0], back_dated);

        let listed = assert_ok!(ward.log.list(Some(patient_id)).await);
        assert_eq!(listed[1], back_dated);
    }

    #[tokio::test]
    async fn test_events_survive_every_operation_unchanged() {
        let ward = setup();
        let patient_id = admit(&ward, "Maria Silva", "101-A").await;
        let appended = assert_ok!(
            ward.log
                .append(NewCareEventModel::meal(patient_id, "Café da manhã", Utc::now()))
                .await
        );

        assert_ok!(ward.patients.soft_delete(patient_id).await);
        assert_ok!(ward.log.list(None).await);
        assert_ok!(ward.log.list(Some(Uuid::new_v4())).await);

        let listed = assert_ok!(ward.log.list(Some(patient_id)).await);
        assert_eq!(listed, vec![appended]);
        assert_eq!(ward.store.stored_event_count(), 1);
    }

    #[tokio::test]
    async fn test_rejected_append_leaves_cache_unchanged() {
        let ward = setup();
        let patient_id = admit(&ward, "Maria Silva", "101-A").await;
        assert_ok!(ward.log.append(NewCareEventModel::drink(patient_id, 100, Utc::now())).await);
        let before = ward.log.cached();

        ward.store.fail_writes(true);
        let err = assert_err!(ward.log.append(NewCareEventModel::drink(patient_id, 100, Utc::now())).await);
        assert!(err.is_write());
        assert_eq!(ward.log.cached(), before);

        ward.store.fail_writes(false);
        let err = assert_err!(ward.log.append(NewCareEventModel::drink(Uuid::new_v4(), 100, Utc::now())).await);
        assert!(err.is_write());
        assert_eq!(ward.log.cached(), before);
    }

    #[tokio::test]
    async fn test_invalid_event_is_validation_error() {
        let ward = setup();
        let patient_id = admit(&ward, "Maria Silva", "101-A").await;

        let no_med_name = NewCareEventModel::new(patient_id, CareEventType::Med, Utc::now());
        let err = assert_err!(ward.log.append(no_med_name).await);

        assert!(err.is_validation());
        assert_eq!(ward.store.stored_event_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_list_keeps_last_good_cache() {
        let ward = setup();
        let patient_id = admit(&ward, "Maria Silva", "101-A").await;
        assert_ok!(ward.log.append(NewCareEventModel::drink(patient_id, 100, Utc::now())).await);
        let before = assert_ok!(ward.log.list(None).await);

        ward.store.fail_reads(true);
        let err = assert_err!(ward.log.list(None).await);

        assert!(err.is_fetch());
        assert_eq!(ward.log.cached(), before);
        assert_eq!(ward.log.today_stats().liquids, 1);
    }

    #[tokio::test]
    async fn test_recent_and_stats_for_day() {
        let ward = setup();
        let patient_id = admit(&ward, "Maria Silva", "101-A").await;
        let now = Utc::now();
        let yesterday = now - Duration::days(1);

        assert_ok!(ward.log.append(NewCareEventModel::drink(patient_id, 100, yesterday)).await);
        assert_ok!(ward.log.append(NewCareEventModel::drink(patient_id, 100, now)).await);
        assert_ok!(ward.log.append(NewCareEventModel::meal(patient_id, "Lanche", now)).await);
        assert_ok!(ward.log.list(None).await);

        assert_eq!(ward.log.recent(2).len(), 2);
        assert_eq!(ward.log.recent(10).len(), 3);
        assert_eq!(ward.log.stats_for_day(yesterday.date_naive()).liquids, 1);
        assert_eq!(ward.log.stats_for_day(now.date_naive()).total, 2);
    }
}
