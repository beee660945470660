use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::trend::{TrendKey, TrendRecord};
use crate::store::{SessionStore, StoreError, StoredSession};

const SESSIONS_FILE: &str = "sessions.json";
const TRENDS_FILE: &str = "trend_records.json";

/// Directory-backed store: `sessions.json` holds every session, and
/// `trend_records.json` every trend record. Each save rewrites its file through
/// a temporary sibling and a rename.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
    sessions: BTreeMap<String, StoredSession>,
    trends: BTreeMap<TrendKey, TrendRecord>,
}

impl JsonDirStore {
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(root).map_err(|source| StoreError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        let sessions: Vec<StoredSession> = read_or_default(&root.join(SESSIONS_FILE))?;
        let trends: Vec<TrendRecord> = read_or_default(&root.join(TRENDS_FILE))?;
        tracing::debug!(
            root = %root.display(),
            sessions = sessions.len(),
            trend_records = trends.len(),
            "opened session store"
        );
        Ok(Self {
            root: root.to_path_buf(),
            sessions: sessions.into_iter().map(|s| (s.name.clone(), s)).collect(),
            trends: trends.into_iter().map(|r| (r.key(), r)).collect(),
        })
    }

    fn flush_sessions(&self) -> Result<(), StoreError> {
        let sessions: Vec<&StoredSession> = self.sessions.values().collect();
        write_atomic(&self.root.join(SESSIONS_FILE), &sessions)
    }

    fn flush_trends(&self) -> Result<(), StoreError> {
        let trends: Vec<&TrendRecord> = self.trends.values().collect();
        write_atomic(&self.root.join(TRENDS_FILE), &trends)
    }
}

impl SessionStore for JsonDirStore {
    fn list_sessions(&self) -> Result<Vec<StoredSession>, StoreError> {
        Ok(self.sessions.values().cloned().collect())
    }

    fn save_session(&mut self, session: StoredSession) -> Result<(), StoreError> {
        self.sessions.insert(session.name.clone(), session);
        self.flush_sessions()
    }

    fn save_trend_record(&mut self, record: TrendRecord) -> Result<(), StoreError> {
        self.trends.insert(record.key(), record);
        self.flush_trends()
    }

    fn trend_records(&self, test_code: Option<&str>) -> Result<Vec<TrendRecord>, StoreError> {
        Ok(self
            .trends
            .values()
            .filter(|r| test_code.is_none_or(|code| r.test_code == code))
            .cloned()
            .collect())
    }
}

fn read_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
    if !path.exists() {
        return Ok(T::default());
    }
    let file = File::open(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let tmp = path.with_extension("json.tmp");
    let io_err = |source| StoreError::Io {
        path: tmp.clone(),
        source,
    };
    let mut w = BufWriter::new(File::create(&tmp).map_err(io_err)?);
    serde_json::to_writer_pretty(&mut w, value).map_err(|source| StoreError::Json {
        path: tmp.clone(),
        source,
    })?;
    w.flush().map_err(io_err)?;
    drop(w);
    fs::rename(&tmp, path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}
