use std::collections::BTreeMap;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::Mutex;
use tracing::info;

use theralink_core::models::overview::PatientOverview;
use theralink_core::models::patient::PatientRecord;

use crate::error::StorageError;
use crate::store::{Mutation, TriageStore, overview_rows};

/// Process-lifetime store. Records are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, PatientRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TriageStore for MemoryStore {
    fn get<'a>(&'a self, patient_id: &'a str) -> BoxFuture<'a, Result<PatientRecord, StorageError>> {
        async move {
            self.records
                .lock()
                .await
                .get(patient_id)
                .cloned()
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
            let mut records = self.records.lock().await;
            let record = records.entry(patient_id.to_string()).or_default();
            mutate(record);
            info!(
                patient_id,
                history_len = record.history.len(),
                "patient record upserted"
            );
            Ok(record.clone())
        }
        .boxed()
    }

    fn update<'a>(
        &'a self,
        patient_id: &'a str,
        mutate: Mutation<'a>,
    ) -> BoxFuture<'a, Result<PatientRecord, StorageError>> {
        async move {
            let mut records = self.records.lock().await;
            let record = records
                .get_mut(patient_id)
                .ok_or_else(|| StorageError::PatientNotFound {
                    patient_id: patient_id.to_string(),
                })?;
            mutate(record);
            info!(patient_id, "patient record updated");
            Ok(record.clone())
        }
        .boxed()
    }

    fn list_patients(&self) -> BoxFuture<'_, Result<Vec<PatientOverview>, StorageError>> {
        async move {
            let records = self.records.lock().await;
            Ok(overview_rows(
                records.iter().map(|(id, record)| (id.as_str(), record)),
            ))
        }
        .boxed()
    }
}
