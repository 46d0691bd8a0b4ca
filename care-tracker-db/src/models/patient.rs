use care_tracker_api::not_blank;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::identifiable::Identifiable;

/// Maximum length in bytes of a bed/location label
pub const BED_LABEL_MAX: usize = 32;

pub type BedLabel = HeaplessString<BED_LABEL_MAX>;

/// # Documentation
/// - A registered patient.
/// - `id` and `created_at` are assigned by the table store on insert and never change.
/// - Patients are never physically removed: `status` moves to `Inactive` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientModel {
    pub id: Uuid,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub bed: BedLabel,
    pub notes: Option<String>,
    pub acuity: Acuity,
    pub status: PatientStatus,
    pub created_at: DateTime<Utc>,
}

impl PatientModel {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Age in whole years on the given date. Zero for birth dates in the future.
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        let mut years = date.year() - self.birth_date.year();
        if (date.month(), date.day()) < (self.birth_date.month(), self.birth_date.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }

    /// Case-insensitive substring match on name, bed and notes
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.full_name.to_lowercase().contains(&term)
            || self.bed.to_lowercase().contains(&term)
            || self
                .notes
                .as_deref()
                .is_some_and(|notes| notes.to_lowercase().contains(&term))
    }

    /// Applies a partial update in place.
    pub fn apply(&mut self, changes: &PatientChanges) -> Result<(), String> {
        if let Some(full_name) = &changes.full_name {
            self.full_name = full_name.clone();
        }
        if let Some(birth_date) = changes.birth_date {
            self.birth_date = birth_date;
        }
        if let Some(bed) = &changes.bed {
            self.bed = bed_label(bed)?;
        }
        if let Some(notes) = &changes.notes {
            self.notes = notes.clone();
        }
        if let Some(acuity) = changes.acuity {
            self.acuity = acuity;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        Ok(())
    }
}

impl Identifiable for PatientModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

/// Clinical acuity of a patient
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "patient_acuity", rename_all = "PascalCase")]
pub enum Acuity {
    #[default]
    Stable,
    Critical,
    Recovery,
}

impl Acuity {
    pub const ALL: [Acuity; 3] = [Acuity::Stable, Acuity::Critical, Acuity::Recovery];
}

impl FromStr for Acuity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Stable" => Ok(Acuity::Stable),
            "Critical" => Ok(Acuity::Critical),
            "Recovery" => Ok(Acuity::Recovery),
            _ => Err(()),
        }
    }
}

/// Lifecycle of a patient row, persisted as the `is_active` flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientStatus {
    #[default]
    Active,
    Inactive,
}

impl PatientStatus {
    pub fn from_is_active(is_active: bool) -> Self {
        if is_active {
            PatientStatus::Active
        } else {
            PatientStatus::Inactive
        }
    }

    pub fn is_active(self) -> bool {
        self == PatientStatus::Active
    }
}

/// Input for registering a patient. The store assigns `id` and `created_at`
/// and always inserts the row as `Active`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewPatientModel {
    #[validate(custom(function = "not_blank"))]
    pub full_name: String,
    pub birth_date: NaiveDate,
    #[validate(custom(function = "valid_bed_label"))]
    pub bed: String,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    #[serde(default)]
    pub acuity: Acuity,
}

impl NewPatientModel {
    pub fn new(full_name: impl Into<String>, birth_date: NaiveDate, bed: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            birth_date,
            bed: bed.into(),
            notes: None,
            acuity: Acuity::default(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_acuity(mut self, acuity: Acuity) -> Self {
        self.acuity = acuity;
        self
    }

    /// Builds the stored row from the fields the store assigns.
    pub fn into_model(self, id: Uuid, created_at: DateTime<Utc>) -> Result<PatientModel, String> {
        Ok(PatientModel {
            id,
            bed: bed_label(&self.bed)?,
            full_name: self.full_name,
            birth_date: self.birth_date,
            notes: self.notes,
            acuity: self.acuity,
            status: PatientStatus::Active,
            created_at,
        })
    }
}

/// Partial update of a patient. `None` leaves a field untouched; for `notes`,
/// `Some(None)` clears the value. In JSON, an absent `notes` key leaves the
/// notes alone and `"notes": null` clears them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct PatientChanges {
    #[validate(custom(function = "not_blank"))]
    pub full_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[validate(custom(function = "valid_bed_label"))]
    pub bed: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub notes: Option<Option<String>>,
    pub acuity: Option<Acuity>,
    pub status: Option<PatientStatus>,
}

impl PatientChanges {
    /// The soft delete: flips the row to `Inactive` and nothing else.
    pub fn deactivate() -> Self {
        Self {
            status: Some(PatientStatus::Inactive),
            ..Self::default()
        }
    }
}

/// A key that is present deserializes to `Some`, even when its value is null.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Row selection for patients. Rows always come back newest `created_at` first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatientFilter {
    pub status: Option<PatientStatus>,
}

impl PatientFilter {
    pub fn active() -> Self {
        Self {
            status: Some(PatientStatus::Active),
        }
    }

    pub fn accepts(&self, patient: &PatientModel) -> bool {
        self.status.map_or(true, |status| patient.status == status)
    }
}

pub fn bed_label(value: &str) -> Result<BedLabel, String> {
    BedLabel::from_str(value)
        .map_err(|_| format!("Bed label '{value}' is too long (max {BED_LABEL_MAX} bytes)"))
}

fn valid_bed_label(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    if value.len() > BED_LABEL_MAX {
        return Err(ValidationError::new("too_long"));
    }
    Ok(())
}
