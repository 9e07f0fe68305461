//! Filesystem-backed session storage.
//!
//! Each key is stored as one file inside a capability-scoped directory, so
//! the store cannot reach outside the configured session directory.

use crate::access::ports::{SessionStore, SessionStoreError, SessionStoreResult};
use crate::config::FlowConfig;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::fmt;
use std::io::ErrorKind;

/// Session store writing one file per key.
pub struct FileSessionStore {
    root: Utf8PathBuf,
    dir: Dir,
}

impl FileSessionStore {
    /// Opens (creating when missing) the session directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Storage`] when the directory cannot be
    /// created or opened.
    pub fn open(path: &Utf8Path) -> SessionStoreResult<Self> {
        std::fs::create_dir_all(path).map_err(SessionStoreError::storage)?;
        let dir =
            Dir::open_ambient_dir(path, ambient_authority()).map_err(SessionStoreError::storage)?;
        Ok(Self {
            root: path.to_owned(),
            dir,
        })
    }

    /// Opens the session directory named by `config`.
    ///
    /// # Errors
    ///
    /// See [`FileSessionStore::open`].
    pub fn from_config(config: &FlowConfig) -> SessionStoreResult<Self> {
        Self::open(&config.session_dir)
    }

    /// Returns the directory this store writes into.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl fmt::Debug for FileSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSessionStore")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

fn checked_key(key: &str) -> SessionStoreResult<&str> {
    let is_plain = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if is_plain {
        Ok(key)
    } else {
        Err(SessionStoreError::storage(std::io::Error::new(
            ErrorKind::InvalidInput,
            format!("invalid session key '{key}'"),
        )))
    }
}

impl SessionStore for FileSessionStore {
    fn read(&self, key: &str) -> SessionStoreResult<Option<String>> {
        match self.dir.read_to_string(checked_key(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SessionStoreError::storage(err)),
        }
    }

    fn write(&self, key: &str, value: &str) -> SessionStoreResult<()> {
        let file_name = checked_key(key)?;
        let staging = format!(".{file_name}.tmp");
        self.dir
            .write(&staging, value)
            .map_err(SessionStoreError::storage)?;
        self.dir
            .rename(&staging, &self.dir, file_name)
            .map_err(SessionStoreError::storage)
    }

    fn remove(&self, key: &str) -> SessionStoreResult<()> {
        match self.dir.remove_file(checked_key(key)?) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SessionStoreError::storage(err)),
        }
    }
}
