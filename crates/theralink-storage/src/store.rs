use futures::future::BoxFuture;

use theralink_core::models::check_in::CheckIn;
use theralink_core::models::overview::PatientOverview;
use theralink_core::models::patient::PatientRecord;

use crate::error::StorageError;

/// A change applied to one patient record.
pub type Mutation<'a> = Box<dyn FnOnce(&mut PatientRecord) + Send + 'a>;

/// Mapping from patient identifier to [`PatientRecord`].
///
/// Implementations must apply each mutation to the latest stored state of the
/// record, so concurrent edits resolve as "last writer wins" per command and
/// appended check-ins are never lost.
pub trait TriageStore: Send + Sync {
    /// Fetch a record, failing with [`StorageError::PatientNotFound`].
    fn get<'a>(&'a self, patient_id: &'a str) -> BoxFuture<'a, Result<PatientRecord, StorageError>>;

    /// Apply `mutate` to the record, creating an empty one first if the
    /// patient is unknown. Returns the record as stored.
    fn upsert<'a>(
        &'a self,
        patient_id: &'a str,
        mutate: Mutation<'a>,
    ) -> BoxFuture<'a, Result<PatientRecord, StorageError>>;

    /// Apply `mutate` to an existing record, failing with
    /// [`StorageError::PatientNotFound`] if there is none.
    fn update<'a>(
        &'a self,
        patient_id: &'a str,
        mutate: Mutation<'a>,
    ) -> BoxFuture<'a, Result<PatientRecord, StorageError>>;

    /// One overview row per patient with at least one check-in, ordered by
    /// patient identifier. Empty when the store is empty.
    fn list_patients(&self) -> BoxFuture<'_, Result<Vec<PatientOverview>, StorageError>>;

    /// Append a check-in, creating the record on first submission.
    fn append_check_in<'a>(
        &'a self,
        patient_id: &'a str,
        check_in: CheckIn,
    ) -> BoxFuture<'a, Result<PatientRecord, StorageError>> {
        self.upsert(
            patient_id,
            Box::new(move |record: &mut PatientRecord| record.history.push(check_in)),
        )
    }

    /// Set the clinician verification flag.
    fn set_verified<'a>(
        &'a self,
        patient_id: &'a str,
        verified: bool,
    ) -> BoxFuture<'a, Result<PatientRecord, StorageError>> {
        self.update(
            patient_id,
            Box::new(move |record: &mut PatientRecord| record.verified = verified),
        )
    }

    /// Replace the clinician notes in full.
    fn set_notes<'a>(
        &'a self,
        patient_id: &'a str,
        notes: String,
    ) -> BoxFuture<'a, Result<PatientRecord, StorageError>> {
        self.update(
            patient_id,
            Box::new(move |record: &mut PatientRecord| record.notes = notes),
        )
    }
}

/// Overview rows for a set of records, ordered by patient identifier.
/// Records with no history are left out.
pub fn overview_rows<'r>(
    records: impl IntoIterator<Item = (&'r str, &'r PatientRecord)>,
) -> Vec<PatientOverview> {
    let mut rows: Vec<PatientOverview> = records
        .into_iter()
        .filter_map(|(patient_id, record)| {
            let row = record.overview(patient_id);
            if row.is_none() {
                tracing::warn!(patient_id, "patient record has no check-ins");
            }
            row
        })
        .collect();
    rows.sort_by(|a, b| a.patient_id.cmp(&b.patient_id));
    rows
}
