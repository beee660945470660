use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::input::open_maybe_gz;
use crate::model::well::Channel;
use crate::targets::{TargetLibrary, UNKNOWN_TARGET};

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("IO error reading target library {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid target library {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("target library entry {test_code} uses unknown channel {channel:?}")]
    UnknownChannel { test_code: String, channel: String },
}

/// Reads a `{test: {channel: target}}` table; the channel key `"Unknown"` is
/// the placeholder for tests without a specific channel.
pub fn load_library(path: &Path) -> Result<TargetLibrary, LibraryError> {
    let mut reader = open_maybe_gz(path).map_err(|source| LibraryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    library_from_json(&text).map_err(|err| match err {
        LibraryError::Json { source, .. } => LibraryError::Json {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

pub fn library_from_json(text: &str) -> Result<TargetLibrary, LibraryError> {
    let raw: BTreeMap<String, BTreeMap<String, String>> =
        serde_json::from_str(text).map_err(|source| LibraryError::Json {
            path: PathBuf::from("<inline>"),
            source,
        })?;

    let mut tests = BTreeMap::new();
    for (test_code, targets) in raw {
        let mut entry = BTreeMap::new();
        for (channel_name, target) in targets {
            let key = if channel_name.trim() == UNKNOWN_TARGET {
                None
            } else {
                match Channel::parse(&channel_name) {
                    Some(channel) => Some(channel),
                    None => {
                        return Err(LibraryError::UnknownChannel {
                            test_code,
                            channel: channel_name,
                        });
                    }
                }
            };
            entry.insert(key, target);
        }
        tests.insert(test_code, entry);
    }

    tracing::debug!(tests = tests.len(), "loaded target library");
    Ok(TargetLibrary::from_map(tests))
}
