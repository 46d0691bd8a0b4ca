use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::care_event::{CareEventEntry, CareEventType};

/// Per-kind counts of the care events that occurred on one UTC calendar day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayStats {
    pub total: usize,
    pub liquids: usize,
    pub medications: usize,
    pub drainage: usize,
    pub meals: usize,
    pub bathroom: usize,
}

impl TodayStats {
    pub fn for_day<'a>(entries: impl IntoIterator<Item = &'a CareEventEntry>, day: NaiveDate) -> Self {
        entries
            .into_iter()
            .filter(|entry| entry.event.occurred_at.date_naive() == day)
            .fold(Self::default(), |mut stats, entry| {
                stats.total += 1;
                match entry.event.event_type {
                    CareEventType::Drink => stats.liquids += 1,
                    CareEventType::Med => stats.medications += 1,
                    CareEventType::Note => stats.drainage += 1,
                    CareEventType::Meal => stats.meals += 1,
                    CareEventType::Bathroom => stats.bathroom += 1,
                }
                stats
            })
    }

    pub fn for_today<'a>(entries: impl IntoIterator<Item = &'a CareEventEntry>) -> Self {
        Self::for_day(entries, Utc::now().date_naive())
    }
}
