use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::input::WellRecord;
use crate::model::trend::TrendRecord;

pub mod json_dir;

pub use json_dir::JsonDirStore;
#[cfg(test)]
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error in session store at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt session store file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A previously analysed single-file upload as the store keeps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub name: String,
    #[serde(default)]
    pub upload_timestamp: Option<String>,
    #[serde(default)]
    pub well_results: Vec<StoredWell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredWell {
    pub well_id: String,
    #[serde(flatten)]
    pub record: WellRecord,
}

/// The narrow persistence contract the engine reads from and writes to.
pub trait SessionStore {
    fn list_sessions(&self) -> Result<Vec<StoredSession>, StoreError>;

    /// Replaces any session with the same name.
    fn save_session(&mut self, session: StoredSession) -> Result<(), StoreError>;

    /// Upsert keyed by (test code, experiment pattern, channel).
    fn save_trend_record(&mut self, record: TrendRecord) -> Result<(), StoreError>;

    fn trend_records(&self, test_code: Option<&str>) -> Result<Vec<TrendRecord>, StoreError>;
}

#[cfg(test)]
#[path = "../../tests/src_inline/store/tests.rs"]
mod tests;
