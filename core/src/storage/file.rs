// tote/src/storage/file.rs

//! File-backed storage: one `<dir>/<key>.json` file per key.
//!
//! Writes go to `<key>.json.tmp` first and are renamed into place, so a
//! reader never sees a half-written collection.

use super::KeyValueStorage;
use anyhow::{bail, Context};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{event, Level};

#[derive(Debug, Clone)]
pub struct FileStorage {
  dir: PathBuf,
}

impl FileStorage {
  /// Creates `dir` if it does not exist yet.
  pub fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
    let dir = dir.into();
    std::fs::create_dir_all(&dir).with_context(|| format!("creating storage directory {}", dir.display()))?;
    event!(Level::DEBUG, dir = %dir.display(), "Opened file storage.");
    Ok(Self { dir })
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  /// Path of the file holding `key`.
  pub fn path_for(&self, key: &str) -> anyhow::Result<PathBuf> {
    let valid = !key.is_empty()
      && key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
      && !key.starts_with('.');
    if !valid {
      bail!("invalid storage key '{}'", key);
    }
    Ok(self.dir.join(format!("{}.json", key)))
  }
}

impl KeyValueStorage for FileStorage {
  fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
    let path = self.path_for(key)?;
    match std::fs::read_to_string(&path) {
      Ok(raw) => Ok(Some(raw)),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
  }

  fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
    let path = self.path_for(key)?;
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, value).with_context(|| format!("writing {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, &path).with_context(|| format!("renaming into {}", path.display()))?;
    Ok(())
  }

  fn remove_item(&self, key: &str) -> anyhow::Result<()> {
    let path = self.path_for(key)?;
    match std::fs::remove_file(&path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
    }
  }
}
