//! Schema setup for deployments that do not run the sqlx migrator
//!
//! `init_database` applies `migrations/` and then checks the Postgres enum
//! types against the Rust enums that decode them. `cleanup_database` applies
//! `cleanup/`, which drops every table and type.

use care_tracker_db::models::care_event::{BathroomType, CareEventType};
use care_tracker_db::models::patient::Acuity;
use sqlx::PgPool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("cannot read schema files: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Sql(#[from] sqlx::Error),
    #[error("enum type {type_name} has label {label:?} with no matching variant")]
    UnknownLabel { type_name: &'static str, label: String },
    #[error("enum type {type_name} is missing {missing} variant(s)")]
    MissingLabels { type_name: &'static str, missing: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStep {
    /// `migrations/`, oldest file first
    Init,
    /// `cleanup/`, newest file first
    Cleanup,
}

impl SchemaStep {
    fn dir(self) -> PathBuf {
        let name = match self {
            SchemaStep::Init => "migrations",
            SchemaStep::Cleanup => "cleanup",
        };
        Path::new(env!("CARGO_MANIFEST_DIR")).join(name)
    }
}

/// The `.sql` files for a step, in the order they must run
pub fn schema_files(step: SchemaStep) -> Result<Vec<PathBuf>, SchemaError> {
    let mut files = std::fs::read_dir(step.dir())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("sql"))
        .collect::<Vec<_>>();

    files.sort();
    if step == SchemaStep::Cleanup {
        files.reverse();
    }
    Ok(files)
}

async fn run_step(pool: &PgPool, step: SchemaStep) -> Result<(), SchemaError> {
    for path in schema_files(step)? {
        let sql = std::fs::read_to_string(&path)?;
        debug!(file = %path.display(), ?step, "executing schema file");
        sqlx::raw_sql(&sql).execute(pool).await?;
    }
    Ok(())
}

/// Creates the `patients` and `events` tables and their enum types, then
/// verifies the enum labels.
///
/// # Example
///
/// ```rust,no_run
/// use sqlx::PgPool;
/// use care_tracker_postgres::repository::db_init::init_database;
///
/// # async fn example(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// init_database(pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn init_database(pool: &PgPool) -> Result<(), SchemaError> {
    run_step(pool, SchemaStep::Init).await?;
    verify_enum_types(pool).await
}

/// Drops the care tracker schema. All patients and care events are lost.
pub async fn cleanup_database(pool: &PgPool) -> Result<(), SchemaError> {
    run_step(pool, SchemaStep::Cleanup).await
}

/// Checks that every label of `patient_acuity`, `care_event_type` and
/// `bathroom_type` decodes to a Rust variant and that no variant is missing.
pub async fn verify_enum_types(pool: &PgPool) -> Result<(), SchemaError> {
    check_labels("patient_acuity", &enum_labels(pool, "patient_acuity").await?, &Acuity::ALL)?;
    check_labels("care_event_type", &enum_labels(pool, "care_event_type").await?, &CareEventType::ALL)?;
    check_labels("bathroom_type", &enum_labels(pool, "bathroom_type").await?, &BathroomType::ALL)?;
    debug!("enum types match their Rust variants");
    Ok(())
}

async fn enum_labels(pool: &PgPool, type_name: &str) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT e.enumlabel::text
        FROM pg_enum e
        JOIN pg_type t ON t.oid = e.enumtypid
        WHERE t.typname = $1
        ORDER BY e.enumsortorder
        "#,
    )
    .bind(type_name)
    .fetch_all(pool)
    .await
}

fn check_labels<E: FromStr + PartialEq>(
    type_name: &'static str,
    labels: &[String],
    variants: &[E],
) -> Result<(), SchemaError> {
    let mut decoded = Vec::with_capacity(labels.len());
    for label in labels {
        match label.parse::<E>() {
            Ok(variant) => decoded.push(variant),
            Err(_) => {
                warn!(type_name, label = %label, "enum label has no Rust variant");
                return Err(SchemaError::UnknownLabel {
                    type_name,
                    label: label.clone(),
                });
            }
        }
    }

    let missing = variants.iter().filter(|v| !decoded.contains(v)).count();
    if missing > 0 {
        return Err(SchemaError::MissingLabels { type_name, missing });
    }
    Ok(())
}
