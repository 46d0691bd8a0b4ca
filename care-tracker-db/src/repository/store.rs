use crate::models::care_event::{CareEventEntry, CareEventFilter, NewCareEventModel};
use crate::models::patient::{NewPatientModel, PatientChanges, PatientFilter, PatientModel};
use crate::repository::{InsertOne, SelectRows, UpdateOne};

/// Everything the patient registry needs from the table store
pub trait PatientStore:
    SelectRows<PatientFilter, PatientModel>
    + InsertOne<NewPatientModel, PatientModel>
    + UpdateOne<PatientChanges, PatientModel>
{
}

impl<S> PatientStore for S where
    S: SelectRows<PatientFilter, PatientModel>
        + InsertOne<NewPatientModel, PatientModel>
        + UpdateOne<PatientChanges, PatientModel>
{
}

/// Everything the care event log needs from the table store. Append-only: no update or delete.
pub trait CareEventStore:
    SelectRows<CareEventFilter, CareEventEntry> + InsertOne<NewCareEventModel, CareEventEntry>
{
}

impl<S> CareEventStore for S where
    S: SelectRows<CareEventFilter, CareEventEntry> + InsertOne<NewCareEventModel, CareEventEntry>
{
}
