pub mod repo_impl;
pub mod select_rows;
pub mod insert_one;
pub mod update_one;

pub use repo_impl::PatientRepositoryImpl;
