//! Object key conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the canonical
//! layout of objects in the TheraLink bucket.

pub const PATIENTS_PREFIX: &str = "patients/";

const RECORD_SUFFIX: &str = ".json";

pub fn patient(id: &str) -> String {
    format!("{PATIENTS_PREFIX}{id}{RECORD_SUFFIX}")
}

/// Recover a patient identifier from a key produced by [`patient`].
pub fn patient_id_from_key(key: &str) -> Option<&str> {
    key.strip_prefix(PATIENTS_PREFIX)?
        .strip_suffix(RECORD_SUFFIX)
        .filter(|id| !id.is_empty() && !id.contains('/'))
}
