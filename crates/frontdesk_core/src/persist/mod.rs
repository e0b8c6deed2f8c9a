//! Whole-store persistence.
//!
//! # Responsibility
//! - Serialize the complete `ReceptionState` into one key-value slot.
//! - Rehydrate that slot on startup.
//!
//! # Invariants
//! - Writes are whole-store snapshots under `ROOT_KEY`, never incremental.
//! - A missing, unreadable or unparseable snapshot loads as the default
//!   empty state.

use crate::db::DbError;
use crate::store::state::ReceptionState;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory_snapshot;
pub mod persistent_store;
pub mod sqlite_snapshot;

/// Slot holding the whole application state.
pub const ROOT_KEY: &str = "root";

pub type PersistResult<T> = Result<T, PersistError>;

#[derive(Debug)]
pub enum PersistError {
    Db(DbError),
    Encode(serde_json::Error),
    /// Backend-specific failure without a richer source.
    Backend(String),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
            Self::Backend(message) => write!(f, "snapshot backend failure: {message}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for PersistError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable key-value slot storage.
pub trait SnapshotStore {
    fn read(&self, key: &str) -> PersistResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> PersistResult<()>;
}

/// Serializes the state into its snapshot text.
pub fn encode_state(state: &ReceptionState) -> PersistResult<String> {
    serde_json::to_string(state).map_err(PersistError::Encode)
}

/// Parses snapshot text back into state.
pub fn decode_state(text: &str) -> Result<ReceptionState, serde_json::Error> {
    serde_json::from_str(text)
}

/// Reads the root snapshot, falling back to the default state.
pub fn load_state(snapshots: &impl SnapshotStore) -> ReceptionState {
    match snapshots.read(ROOT_KEY) {
        Ok(Some(text)) => match decode_state(&text) {
            Ok(state) => {
                info!(
                    "event=state_load module=persist status=ok key={ROOT_KEY} bytes={}",
                    text.len()
                );
                state
            }
            Err(err) => {
                warn!(
                    "event=state_load module=persist status=fallback key={ROOT_KEY} reason=decode_failed error={err}"
                );
                ReceptionState::default()
            }
        },
        Ok(None) => {
            info!("event=state_load module=persist status=fallback key={ROOT_KEY} reason=absent");
            ReceptionState::default()
        }
        Err(err) => {
            warn!(
                "event=state_load module=persist status=fallback key={ROOT_KEY} reason=read_failed error={err}"
            );
            ReceptionState::default()
        }
    }
}
