//! Local record of sell requests whose backend submission failed.

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::domain::SellPayload;
use crate::util::persistence::{LocalStore, PersistSaveError, OFFLINE_SUBMISSIONS_KEY};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflineSubmission {
    pub reference_id: String,
    /// RFC 3339 timestamp of the failed attempt.
    pub submitted_at: String,
    pub payload: SellPayload,
    pub error: String,
}

impl OfflineSubmission {
    pub fn new(payload: SellPayload, error: impl Into<String>, now: OffsetDateTime) -> Self {
        Self {
            reference_id: fallback_reference(now),
            submitted_at: now.format(&Rfc3339).unwrap_or_default(),
            payload,
            error: error.into(),
        }
    }
}

/// Client-side identifier: `SELL-<unix millis>-<6 hex chars>`.
pub fn fallback_reference(now: OffsetDateTime) -> String {
    let millis = now.unix_timestamp_nanos() / 1_000_000;
    let suffix = Uuid::new_v4().simple().to_string()[..6].to_ascii_uppercase();
    format!("SELL-{millis}-{suffix}")
}

pub fn load_offline_submissions(store: &LocalStore) -> Vec<OfflineSubmission> {
    store
        .get::<Vec<OfflineSubmission>>(OFFLINE_SUBMISSIONS_KEY)
        .unwrap_or_default()
}

pub fn record_offline_submission(
    store: &LocalStore,
    entry: &OfflineSubmission,
) -> Result<(), PersistSaveError> {
    let mut entries = load_offline_submissions(store);
    entries.push(entry.clone());
    store.set(OFFLINE_SUBMISSIONS_KEY, &entries)?;
    info!(
        "[offline] recorded {} ({} pending locally)",
        entry.reference_id,
        entries.len()
    );
    Ok(())
}

pub fn clear_offline_submissions(store: &LocalStore) -> Result<(), PersistSaveError> {
    store.remove(OFFLINE_SUBMISSIONS_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DeviceListing;

    fn payload(model: &str) -> SellPayload {
        SellPayload {
            listing: DeviceListing {
                model: model.into(),
                ..DeviceListing::default()
            },
            estimated_price: 9_000,
            user_id: "u1".into(),
        }
    }

    #[test]
    fn reference_has_timestamp_and_suffix() {
        let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("timestamp");
        let reference = fallback_reference(now);
        let parts: Vec<&str> = reference.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "SELL");
        assert_eq!(parts[1], "1700000000000");
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2].chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[test]
    fn records_append() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::at(dir.path());
        let now = OffsetDateTime::now_utc();

        record_offline_submission(&store, &OfflineSubmission::new(payload("A"), "boom", now))
            .expect("first");
        record_offline_submission(&store, &OfflineSubmission::new(payload("B"), "boom", now))
            .expect("second");

        let entries = load_offline_submissions(&store);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].payload.listing.model, "A");
        assert_eq!(entries[1].payload.listing.model, "B");

        clear_offline_submissions(&store).expect("clear");
        assert!(load_offline_submissions(&store).is_empty());
    }
}
