pub mod care_event_repository;
pub mod db_init;
pub mod patient_repository;

pub use care_event_repository::CareEventRepositoryImpl;
pub use patient_repository::PatientRepositoryImpl;
