use care_tracker_api::not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::identifiable::Identifiable;
use crate::models::patient::{BedLabel, PatientModel};

/// Kind of care event. The kind decides which payload fields are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "care_event_type", rename_all = "lowercase")]
pub enum CareEventType {
    /// Liquid intake, `volume_ml`
    Drink,
    /// `meal_desc`
    Meal,
    /// `med_name` and `med_dose`
    Med,
    /// `bathroom_type`
    Bathroom,
    /// Free text. Drain output is recorded as a note.
    Note,
}

impl CareEventType {
    pub const ALL: [CareEventType; 5] = [
        CareEventType::Drink,
        CareEventType::Meal,
        CareEventType::Med,
        CareEventType::Bathroom,
        CareEventType::Note,
    ];
}

impl FromStr for CareEventType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drink" => Ok(CareEventType::Drink),
            "meal" => Ok(CareEventType::Meal),
            "med" => Ok(CareEventType::Med),
            "bathroom" => Ok(CareEventType::Bathroom),
            "note" => Ok(CareEventType::Note),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "bathroom_type", rename_all = "lowercase")]
pub enum BathroomType {
    Urine,
    Feces,
    Both,
}

impl BathroomType {
    pub const ALL: [BathroomType; 3] = [BathroomType::Urine, BathroomType::Feces, BathroomType::Both];
}

impl FromStr for BathroomType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "urine" => Ok(BathroomType::Urine),
            "feces" => Ok(BathroomType::Feces),
            "both" => Ok(BathroomType::Both),
            _ => Err(()),
        }
    }
}

/// # Documentation
/// - A single timestamped clinical action tied to one patient.
/// - Rows are append-only: no update or delete exists for care events.
/// - `occurred_at` is the clinical time; `created_at` is when the store received the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CareEventModel {
    pub id: Uuid,
    pub patient_id: Uuid,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub event_type: CareEventType,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub occurred_at: DateTime<Utc>,
    pub volume_ml: Option<i32>,
    pub meal_desc: Option<String>,
    pub med_name: Option<String>,
    pub med_dose: Option<String>,
    pub bathroom_type: Option<BathroomType>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Identifiable for CareEventModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

/// Display fields of the owning patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSummary {
    pub full_name: String,
    pub bed: BedLabel,
}

impl From<&PatientModel> for PatientSummary {
    fn from(patient: &PatientModel) -> Self {
        Self {
            full_name: patient.full_name.clone(),
            bed: patient.bed.clone(),
        }
    }
}

/// A care event joined with its patient's display fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareEventEntry {
    #[serde(flatten)]
    pub event: CareEventModel,
    pub patient: PatientSummary,
}

impl Identifiable for CareEventEntry {
    fn get_id(&self) -> Uuid {
        self.event.id
    }
}

/// Input for appending a care event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_payload"))]
pub struct NewCareEventModel {
    pub patient_id: Uuid,
    #[serde(rename = "type")]
    pub event_type: CareEventType,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub occurred_at: DateTime<Utc>,
    #[validate(range(min = 0))]
    pub volume_ml: Option<i32>,
    pub meal_desc: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub med_name: Option<String>,
    #[validate(length(max = 50))]
    pub med_dose: Option<String>,
    pub bathroom_type: Option<BathroomType>,
    pub notes: Option<String>,
}

impl NewCareEventModel {
    pub fn new(patient_id: Uuid, event_type: CareEventType, occurred_at: DateTime<Utc>) -> Self {
        Self {
            patient_id,
            event_type,
            scheduled_at: None,
            occurred_at,
            volume_ml: None,
            meal_desc: None,
            med_name: None,
            med_dose: None,
            bathroom_type: None,
            notes: None,
        }
    }

    pub fn drink(patient_id: Uuid, volume_ml: i32, occurred_at: DateTime<Utc>) -> Self {
        Self {
            volume_ml: Some(volume_ml),
            ..Self::new(patient_id, CareEventType::Drink, occurred_at)
        }
    }

    pub fn meal(patient_id: Uuid, meal_desc: impl Into<String>, occurred_at: DateTime<Utc>) -> Self {
        Self {
            meal_desc: Some(meal_desc.into()),
            ..Self::new(patient_id, CareEventType::Meal, occurred_at)
        }
    }

    pub fn medication(
        patient_id: Uuid,
        med_name: impl Into<String>,
        med_dose: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            med_name: Some(med_name.into()),
            med_dose: Some(med_dose.into()),
            ..Self::new(patient_id, CareEventType::Med, occurred_at)
        }
    }

    pub fn bathroom(patient_id: Uuid, bathroom_type: BathroomType, occurred_at: DateTime<Utc>) -> Self {
        Self {
            bathroom_type: Some(bathroom_type),
            ..Self::new(patient_id, CareEventType::Bathroom, occurred_at)
        }
    }

    pub fn note(patient_id: Uuid, notes: impl Into<String>, occurred_at: DateTime<Utc>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Self::new(patient_id, CareEventType::Note, occurred_at)
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn scheduled_for(mut self, scheduled_at: DateTime<Utc>) -> Self {
        self.scheduled_at = Some(scheduled_at);
        self
    }

    /// Builds the stored row from the fields the store assigns.
    pub fn into_model(self, id: Uuid, created_at: DateTime<Utc>) -> CareEventModel {
        CareEventModel {
            id,
            patient_id: self.patient_id,
            event_type: self.event_type,
            scheduled_at: self.scheduled_at,
            occurred_at: self.occurred_at,
            volume_ml: self.volume_ml,
            meal_desc: self.meal_desc,
            med_name: self.med_name,
            med_dose: self.med_dose,
            bathroom_type: self.bathroom_type,
            notes: self.notes,
            created_at,
        }
    }
}

fn validate_payload(event: &NewCareEventModel) -> Result<(), ValidationError> {
    if event.event_type == CareEventType::Med && event.med_name.is_none() {
        return Err(ValidationError::new("med_name_required"));
    }
    Ok(())
}

/// Row selection for care events. Rows always come back most recent `occurred_at` first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CareEventFilter {
    pub patient_id: Option<Uuid>,
}

impl CareEventFilter {
    pub fn all() -> Self {
        Self { patient_id: None }
    }

    pub fn for_patient(patient_id: Uuid) -> Self {
        Self {
            patient_id: Some(patient_id),
        }
    }

    pub fn accepts(&self, event: &CareEventModel) -> bool {
        self.patient_id.map_or(true, |id| event.patient_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medication_requires_name() {
        let now = Utc::now();
        let patient_id = Uuid::new_v4();

        let valid = NewCareEventModel::medication(patient_id, "Dipirona", "500mg", now);
        assert!(valid.validate().is_ok());

        let missing_name = NewCareEventModel::new(patient_id, CareEventType::Med, now);
        assert!(missing_name.validate().is_err());

        let blank_name = NewCareEventModel::medication(patient_id, " ", "500mg", now);
        assert!(blank_name.validate().is_err());
    }

    #[test]
    fn test_negative_volume_is_rejected() {
        let event = NewCareEventModel::drink(Uuid::new_v4(), -10, Utc::now());
        assert!(event.validate().is_err());

        let event = NewCareEventModel::drink(Uuid::new_v4(), 250, Utc::now());
        assert!(event.validate().is_ok());
    }

    #[test]
    fn test_type_serializes_lowercase_under_type_key() {
        let event = NewCareEventModel::bathroom(Uuid::new_v4(), BathroomType::Both, Utc::now());
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "bathroom");
        assert_eq!(json["bathroom_type"], "both");
        assert_eq!("note".parse::<CareEventType>(), Ok(CareEventType::Note));
        assert!("vitals".parse::<CareEventType>().is_err());
        assert_eq!("both".parse::<BathroomType>(), Ok(BathroomType::Both));
        assert!("Urine".parse::<BathroomType>().is_err());
    }

    #[test]
    fn test_filter_by_patient() {
        let patient_id = Uuid::new_v4();
        let event = NewCareEventModel::note(patient_id, "Dreno abdominal 50ml", Utc::now())
            .into_model(Uuid::new_v4(), Utc::now());

        assert!(CareEventFilter::all().accepts(&event));
        assert!(CareEventFilter::for_patient(patient_id).accepts(&event));
        assert!(!CareEventFilter::for_patient(Uuid::new_v4()).accepts(&event));
    }
}
