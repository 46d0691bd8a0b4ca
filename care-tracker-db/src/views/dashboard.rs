use serde::{Deserialize, Serialize};

use crate::models::care_event::CareEventEntry;
use crate::models::patient::Acuity;
use crate::registry::{CareEventLog, PatientRegistry};
use crate::repository::{CareEventStore, PatientStore};
use crate::views::today_stats::TodayStats;

/// Number of entries shown in the dashboard's recent activity list
pub const RECENT_EVENTS_LIMIT: usize = 5;

/// Read-only summary over the registry and log caches. Performs no I/O.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub active_patients: usize,
    pub critical_patients: usize,
    pub today: TodayStats,
    pub recent_events: Vec<CareEventEntry>,
}

impl DashboardSummary {
    pub fn collect<P: PatientStore, E: CareEventStore>(
        registry: &PatientRegistry<P>,
        log: &CareEventLog<E>,
    ) -> Self {
        Self {
            active_patients: registry.active_count(),
            critical_patients: registry.by_acuity(Acuity::Critical).len(),
            today: log.today_stats(),
            recent_events: log.recent(RECENT_EVENTS_LIMIT),
        }
    }
}
