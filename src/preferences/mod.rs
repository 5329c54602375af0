//! Persisted user preferences.
//!
//! The store holds the last organization query, the selected sort mode and an
//! optional personal access token. It loads once at start-up and writes
//! through to its backend on every change. Records carry a format version;
//! a record this build cannot read is discarded in favour of defaults rather
//! than failing start-up.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::github::PersonalAccessToken;
use crate::persistence::PersistenceError;
use crate::query::SortMode;
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// Name of the single preferences record.
pub const PREFERENCES_RECORD_NAME: &str = "orgview-preferences";

/// Format version written by this build.
pub const CURRENT_PREFERENCES_VERSION: u32 = 1;

/// A versioned, serialised record as kept by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    /// Format version of `payload`.
    pub version: u32,
    /// JSON payload.
    pub payload: String,
}

/// Storage for named preference records.
#[cfg_attr(test, mockall::automock)]
pub trait PreferenceBackend: Send {
    /// Reads the record stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the storage cannot be read.
    fn load(&self, name: &str) -> Result<Option<StoredRecord>, PersistenceError>;

    /// Replaces the record stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the storage cannot be written.
    fn save(&self, name: &str, record: &StoredRecord) -> Result<(), PersistenceError>;
}

/// Backend that keeps records for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryPreferenceBackend {
    records: Mutex<HashMap<String, StoredRecord>>,
}

impl MemoryPreferenceBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that already holds `record` under `name`.
    #[must_use]
    pub fn with_record(name: &str, record: StoredRecord) -> Self {
        let records = HashMap::from([(name.to_owned(), record)]);
        Self {
            records: Mutex::new(records),
        }
    }
}

impl PreferenceBackend for MemoryPreferenceBackend {
    fn load(&self, name: &str) -> Result<Option<StoredRecord>, PersistenceError> {
        let records = self
            .records
            .lock()
            .map_err(|error| PersistenceError::QueryFailed {
                message: error.to_string(),
            })?;
        Ok(records.get(name).cloned())
    }

    fn save(&self, name: &str, record: &StoredRecord) -> Result<(), PersistenceError> {
        let mut records = self
            .records
            .lock()
            .map_err(|error| PersistenceError::WriteFailed {
                message: error.to_string(),
            })?;
        records.insert(name.to_owned(), record.clone());
        Ok(())
    }
}

/// User preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    /// Organization query string, possibly empty.
    pub organization: String,
    /// Selected sort mode.
    pub sort_mode: SortMode,
    /// Bearer credential for API calls.
    pub credential: Option<PersonalAccessToken>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferencesPayload {
    #[serde(default)]
    organization: String,
    #[serde(default)]
    sort_mode: SortMode,
    #[serde(default)]
    credential: Option<String>,
}

impl From<&Preferences> for PreferencesPayload {
    fn from(value: &Preferences) -> Self {
        Self {
            organization: value.organization.clone(),
            sort_mode: value.sort_mode,
            credential: value
                .credential
                .as_ref()
                .map(|token| token.value().to_owned()),
        }
    }
}

impl From<PreferencesPayload> for Preferences {
    fn from(value: PreferencesPayload) -> Self {
        Self {
            organization: value.organization,
            sort_mode: value.sort_mode,
            credential: value
                .credential
                .and_then(|raw| PersonalAccessToken::new(raw).ok()),
        }
    }
}

/// Upgrades a stored payload to the current format.
///
/// Only the current version is readable today; add an arm per retired
/// version when the payload changes shape.
fn migrate_payload(version: u32, payload: &str) -> Result<PreferencesPayload, String> {
    match version {
        CURRENT_PREFERENCES_VERSION => {
            serde_json::from_str(payload).map_err(|error| error.to_string())
        }
        other => Err(format!("unsupported preferences version {other}")),
    }
}

/// Preferences with write-through persistence.
pub struct PreferenceStore {
    backend: Box<dyn PreferenceBackend>,
    preferences: Preferences,
}

impl fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("preferences", &self.preferences)
            .finish_non_exhaustive()
    }
}

impl PreferenceStore {
    /// Loads preferences from `backend`.
    ///
    /// A missing record yields defaults. A record with an unknown version or
    /// an unreadable payload is discarded with a warning and a
    /// [`TelemetryEvent::PreferencesDiscarded`] event.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the backend cannot be read.
    pub fn load(
        backend: Box<dyn PreferenceBackend>,
        telemetry: &dyn TelemetrySink,
    ) -> Result<Self, PersistenceError> {
        let preferences = match backend.load(PREFERENCES_RECORD_NAME)? {
            None => Preferences::default(),
            Some(record) => match migrate_payload(record.version, &record.payload) {
                Ok(payload) => payload.into(),
                Err(reason) => {
                    tracing::warn!(
                        stored_version = record.version,
                        current_version = CURRENT_PREFERENCES_VERSION,
                        %reason,
                        "discarding stored preferences"
                    );
                    telemetry.record(TelemetryEvent::PreferencesDiscarded {
                        stored_version: record.version,
                        current_version: CURRENT_PREFERENCES_VERSION,
                    });
                    Preferences::default()
                }
            },
        };

        Ok(Self {
            backend,
            preferences,
        })
    }

    /// A store backed by process memory, starting from defaults.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            backend: Box::new(MemoryPreferenceBackend::new()),
            preferences: Preferences::default(),
        }
    }

    /// Current preferences.
    #[must_use]
    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Stored organization query.
    #[must_use]
    pub fn organization(&self) -> &str {
        &self.preferences.organization
    }

    /// Selected sort mode.
    #[must_use]
    pub const fn sort_mode(&self) -> SortMode {
        self.preferences.sort_mode
    }

    /// Stored credential.
    #[must_use]
    pub const fn credential(&self) -> Option<&PersonalAccessToken> {
        self.preferences.credential.as_ref()
    }

    /// Records a new organization query.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the write fails. The in-memory value
    /// is updated regardless.
    pub fn set_organization(&mut self, organization: &str) -> Result<(), PersistenceError> {
        self.update(|preferences| organization.clone_into(&mut preferences.organization))
    }

    /// Records a new sort mode.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the write fails. The in-memory value
    /// is updated regardless.
    pub fn set_sort_mode(&mut self, sort_mode: SortMode) -> Result<(), PersistenceError> {
        self.update(|preferences| preferences.sort_mode = sort_mode)
    }

    /// Records or clears the credential.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the write fails. The in-memory value
    /// is updated regardless.
    pub fn set_credential(
        &mut self,
        credential: Option<PersonalAccessToken>,
    ) -> Result<(), PersistenceError> {
        self.update(|preferences| preferences.credential = credential)
    }

    fn update(&mut self, apply: impl FnOnce(&mut Preferences)) -> Result<(), PersistenceError> {
        let mut next = self.preferences.clone();
        apply(&mut next);
        if next == self.preferences {
            return Ok(());
        }
        self.preferences = next;
        self.persist()
    }

    fn persist(&self) -> Result<(), PersistenceError> {
        let payload = serde_json::to_string(&PreferencesPayload::from(&self.preferences))
            .map_err(|error| PersistenceError::WriteFailed {
                message: error.to_string(),
            })?;
        let record = StoredRecord {
            version: CURRENT_PREFERENCES_VERSION,
            payload,
        };
        self.backend.save(PREFERENCES_RECORD_NAME, &record)
    }
}
