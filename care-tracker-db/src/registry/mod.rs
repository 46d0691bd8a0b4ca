pub mod list_cache;
pub mod patient_registry;
pub mod care_event_log;

pub use list_cache::ListCache;
pub use patient_registry::PatientRegistry;
pub use care_event_log::CareEventLog;
