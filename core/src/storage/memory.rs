// tote/src/storage/memory.rs

use super::KeyValueStorage;
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-process storage. Survives for as long as the value does; used for
/// ephemeral sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
  entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.entries.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.lock().is_empty()
  }
}

impl KeyValueStorage for MemoryStorage {
  fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
    Ok(self.entries.lock().get(key).cloned())
  }

  fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
    self.entries.lock().insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove_item(&self, key: &str) -> anyhow::Result<()> {
    self.entries.lock().remove(key);
    Ok(())
  }
}
