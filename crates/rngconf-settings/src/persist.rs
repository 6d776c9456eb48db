use std::fs::create_dir_all;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::errors::{PersistError, PersistResult};

/// Settings map exactly as it is persisted: field name to untrusted entry.
pub type RawSettings = Map<String, Value>;

/// Medium that holds a settings map between sessions.
pub trait SettingsPersistence {
    fn load(&self) -> PersistResult<RawSettings>;
    fn save(&mut self, raw: &RawSettings) -> PersistResult<()>;
}

/// Settings kept in a JSON file. A missing file reads as an empty map.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsPersistence for JsonFilePersistence {
    fn load(&self) -> PersistResult<RawSettings> {
        if !self.path.exists() {
            return Ok(RawSettings::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(PersistError::Invalid(format!(
                "{} must hold a JSON object",
                self.path.display()
            ))),
        }
    }

    fn save(&mut self, raw: &RawSettings) -> PersistResult<()> {
        let data = serde_json::to_vec_pretty(raw)?;
        write_bytes_atomic(&self.path, &data)
    }
}

/// Settings kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    raw: RawSettings,
    saves: usize,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: RawSettings) -> Self {
        Self { raw, saves: 0 }
    }

    pub fn raw(&self) -> &RawSettings {
        &self.raw
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SettingsPersistence for MemoryPersistence {
    fn load(&self) -> PersistResult<RawSettings> {
        Ok(self.raw.clone())
    }

    fn save(&mut self, raw: &RawSettings) -> PersistResult<()> {
        self.raw = raw.clone();
        self.saves += 1;
        Ok(())
    }
}

/// Write `data` to `path` through a uniquely named temporary file in the same
/// directory and an atomic rename.
pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> PersistResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if path.file_name().is_none() {
        return Err(PersistError::Invalid(format!(
            "{} is not a file path",
            path.display()
        )));
    }
    create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| PersistError::Io(err.error))?;

    sync_dir(parent)?;
    Ok(())
}

#[cfg(unix)]
fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = std::fs::File::open(path)?;
    dir.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_replaces_content_and_leaves_no_temporaries() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("settings.json");

        write_bytes_atomic(&path, b"{}").expect("first write");
        write_bytes_atomic(&path, b"{\"a\": 1}").expect("second write");

        assert_eq!(std::fs::read_to_string(&path).expect("read"), "{\"a\": 1}");
        let entries = std::fs::read_dir(path.parent().expect("parent"))
            .expect("read dir")
            .count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn atomic_write_rejects_directory_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = write_bytes_atomic(&dir.path().join(".."), b"{}");
        assert!(matches!(result, Err(PersistError::Invalid(_))));
    }
}
