use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can happen while reading or writing the saved token
#[derive(Debug, Error)]
pub enum Error {
    /// We had a problem touching the backing file, for example with
    /// permissions or a missing directory.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The stored document wasn't the JSON we wrote.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable storage for the login token. Clients talk to this trait so
/// tests can swap the file for `MemoryStore`.
pub trait TokenStore {
    /// Read the saved token, if any. A store that has never been written
    /// reads as `Ok(None)`.
    ///
    /// ## Errors
    ///
    /// Fails if the store exists but can't be read or parsed.
    fn get(&self) -> Result<Option<String>>;

    /// Save the token, replacing any previous one.
    ///
    /// ## Errors
    ///
    /// Fails if the store can't be written.
    fn set(&self, token: &str) -> Result<()>;
}

/// On-disk document shape. One key, and no schema beyond it.
#[derive(Debug, Serialize, Deserialize)]
struct Saved {
    /// The token itself
    token: String,
}

/// A token store backed by a JSON document in the client's data
/// directory. Survives restarts.
#[derive(Debug)]
pub struct FileStore {
    /// Where the document lives
    path: PathBuf,
}

impl FileStore {
    /// File name under the data directory.
    pub const FILE_NAME: &'static str = "token.json";

    /// A store at the conventional location under `data_dir`.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(Self::FILE_NAME),
        }
    }
}

impl TokenStore for FileStore {
    fn get(&self) -> Result<Option<String>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let saved: Saved = serde_json::from_slice(&data)?;

        Ok(Some(saved.token))
    }

    fn set(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_vec(&Saved {
            token: token.to_string(),
        })?;

        // Write to the side and rename so a crash mid-write can't leave a
        // half-written document behind.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}

/// An in-memory store: the substitute for tests, and what you get when
/// running without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Current value
    token: Mutex<Option<String>>,
}

impl TokenStore for MemoryStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn set(&self, token: &str) -> Result<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(token.to_string());

        Ok(())
    }
}
