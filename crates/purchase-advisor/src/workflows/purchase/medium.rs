use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Durable named-slot storage the calculation store writes through.
pub trait KeyValueMedium: Send + Sync {
    /// Returns `None` when the slot has never been written.
    fn read(&self, slot: &str) -> Result<Option<String>, MediumError>;
    fn write(&self, slot: &str, value: &str) -> Result<(), MediumError>;
}

impl<M: KeyValueMedium + ?Sized> KeyValueMedium for Arc<M> {
    fn read(&self, slot: &str) -> Result<Option<String>, MediumError> {
        (**self).read(slot)
    }

    fn write(&self, slot: &str, value: &str) -> Result<(), MediumError> {
        (**self).write(slot, value)
    }
}

/// Failure of the underlying storage medium.
#[derive(Debug, thiserror::Error)]
pub enum MediumError {
    #[error("slot '{slot}' i/o failed: {source}")]
    Io {
        slot: String,
        #[source]
        source: io::Error,
    },
}

/// One JSON file per slot inside a data directory.
#[derive(Debug, Clone)]
pub struct FileMedium {
    root: PathBuf,
}

impl FileMedium {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.root.join(format!("{slot}.json"))
    }
}

impl KeyValueMedium for FileMedium {
    fn read(&self, slot: &str) -> Result<Option<String>, MediumError> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(MediumError::Io {
                slot: slot.to_string(),
                source,
            }),
        }
    }

    fn write(&self, slot: &str, value: &str) -> Result<(), MediumError> {
        write_atomic(&self.slot_path(slot), value.as_bytes()).map_err(|source| MediumError::Io {
            slot: slot.to_string(),
            source,
        })
    }
}

// Readers only ever observe the previous or the new file contents.
fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&tmp)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(tmp, path)
}

/// Process-local medium for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a slot, e.g. with legacy or corrupt contents.
    pub fn with_slot(self, slot: &str, value: impl Into<String>) -> Self {
        self.lock().insert(slot.to_string(), value.into());
        self
    }

    pub fn raw(&self, slot: &str) -> Option<String> {
        self.lock().get(slot).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueMedium for MemoryMedium {
    fn read(&self, slot: &str) -> Result<Option<String>, MediumError> {
        Ok(self.lock().get(slot).cloned())
    }

    fn write(&self, slot: &str, value: &str) -> Result<(), MediumError> {
        self.lock().insert(slot.to_string(), value.to_string());
        Ok(())
    }
}
