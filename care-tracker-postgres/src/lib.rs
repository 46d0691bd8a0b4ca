pub mod config;
pub mod postgres_repositories;
pub mod repository;
pub mod utils;

#[cfg(test)]
pub mod test_helper;

pub use config::*;
pub use postgres_repositories::*;
pub use repository::*;
