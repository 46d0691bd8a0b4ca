//! Test helper for the Postgres-backed repositories
//!
//! Connects with the same configuration the service uses, applies the
//! migrations, checks the enum types and hands back repositories sharing one pool.

use crate::config::DatabaseConfig;
use crate::postgres_repositories::{CareRepositories, PostgresRepositories};
use crate::repository::db_init::verify_enum_types;
use std::sync::Arc;

pub struct TestContext {
    pub repos: CareRepositories,
}

impl TestContext {
    pub fn repos(&self) -> &CareRepositories {
        &self.repos
    }
}

/// Setup a test context against `DATABASE_URL`
///
/// Rows written by a test stay in the database; tests create patients with
/// unique names and only assert on the rows they created.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let ctx = setup_test_context().await?;
///     let patient_repo = &ctx.repos().patient_repository;
///     Ok(())
/// }
/// ```
pub async fn setup_test_context() -> Result<TestContext, Box<dyn std::error::Error + Send + Sync>> {
    let pool = DatabaseConfig::from_env()?.with_max_connections(1).connect().await?;

    sqlx::migrate!().run(&pool).await?;
    verify_enum_types(&pool).await?;

    let repos = PostgresRepositories::new(Arc::new(pool)).build_all();
    Ok(TestContext { repos })
}
