use aws_sdk_s3::Client;
use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::{debug, info};

use theralink_core::models::overview::PatientOverview;
use theralink_core::models::patient::PatientRecord;
use theralink_core::store_keys;

use crate::error::StorageError;
use crate::objects::{self, WriteCondition};
use crate::state;
use crate::store::{Mutation, TriageStore, overview_rows};

/// Store that keeps one JSON object per patient under `patients/`.
///
/// Every write is conditional on the ETag that was read (or on the key being
/// absent for a new record). A write that loses a race fails with
/// [`StorageError::PreconditionFailed`]; it is never retried here.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    async fn load(
        &self,
        patient_id: &str,
    ) -> Result<Option<(PatientRecord, String)>, StorageError> {
        let key = store_keys::patient(patient_id);
        state::load_state_opt(&self.client, &self.bucket, &key).await
    }

    async fn save(
        &self,
        patient_id: &str,
        record: &PatientRecord,
        condition: WriteCondition,
    ) -> Result<(), StorageError> {
        let key = store_keys::patient(patient_id);
        let etag = state::save_state(&self.client, &self.bucket, &key, record, &condition).await?;
        debug!(patient_id, etag = %etag, "patient record saved");
        Ok(())
    }
}

impl TriageStore for S3Store {
    fn get<'a>(&'a self, patient_id: &'a str) -> BoxFuture<'a, Result<PatientRecord, StorageError>> {
        async move {
            self.load(patient_id)
                .await?
                .map(|(record, _)| record)
                .ok_or_else(|| StorageError::PatientNotFound {
                    patient_id: patient_id.to_string(),
                })
        }
        .boxed()
    }

    fn upsert<'a>(
        &'a self,
        patient_id: &'a str,
        mutate: Mutation<'a>,
    ) -> BoxFuture<'a, Result<PatientRecord, StorageError>> {
        async move {
            let (mut record, condition) = match self.load(patient_id).await? {
                Some((record, etag)) => (record, WriteCondition::IfMatch(etag)),
                None => (PatientRecord::default(), WriteCondition::IfAbsent),
            };
            mutate(&mut record);
            self.save(patient_id, &record, condition).await?;
            info!(
                patient_id,
                history_len = record.history.len(),
                "patient record upserted"
            );
            Ok(record)
        }
        .boxed()
    }

    fn update<'a>(
        &'a self,
        patient_id: &'a str,
        mutate: Mutation<'a>,
    ) -> BoxFuture<'a, Result<PatientRecord, StorageError>> {
        async move {
            let (mut record, etag) = self.load(patient_id).await?.ok_or_else(|| {
                StorageError::PatientNotFound {
                    patient_id: patient_id.to_string(),
                }
            })?;
            mutate(&mut record);
            self.save(patient_id, &record, WriteCondition::IfMatch(etag))
                .await?;
            info!(patient_id, "patient record updated");
            Ok(record)
        }
        .boxed()
    }

    fn list_patients(&self) -> BoxFuture<'_, Result<Vec<PatientOverview>, StorageError>> {
        async move {
            let keys =
                objects::list_objects(&self.client, &self.bucket, store_keys::PATIENTS_PREFIX)
                    .await?;

            let mut records = Vec::new();
            for key in &keys {
                let Some(patient_id) = store_keys::patient_id_from_key(key) else {
                    debug!(key = %key, "skipping non-record object");
                    continue;
                };
                // Deleted between list and get.
                if let Some((record, _)) = self.load(patient_id).await? {
                    records.push((patient_id.to_string(), record));
                }
            }

            Ok(overview_rows(
                records.iter().map(|(id, record)| (id.as_str(), record)),
            ))
        }
        .boxed()
    }
}
