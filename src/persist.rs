use crate::exercise::Exercise;
use crate::interval::CountdownDuration;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub const EXERCISES_KEY: &str = "exercises";
pub const INTERVAL_KEY: &str = "interval";

/// Host-local key-value store, one string value per key.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// File-per-key store rooted at the data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> FileStore {
        FileStore { dir }
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.dir.join(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(PersistError::Io(err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(key), value)?;
        Ok(())
    }
}

/// The settings pair written on an explicit save.
pub struct Snapshot<'a> {
    pub exercises: &'a [Exercise],
    pub interval: CountdownDuration,
}

/// Writes both keys, overwriting any prior snapshot. Errors bubble up to
/// be surfaced to the user; nothing is retried.
pub fn save(store: &mut dyn Store, snapshot: &Snapshot) -> Result<(), PersistError> {
    let list = serde_json::to_string(snapshot.exercises)?;
    store.set(EXERCISES_KEY, &list)?;
    store.set(INTERVAL_KEY, &snapshot.interval.as_secs().to_string())?;
    Ok(())
}

/// Fields recovered from a previous save. `None` means nothing usable was
/// stored under that key and the built-in default stands.
#[derive(Default)]
pub struct Restored {
    pub exercises: Option<Vec<Exercise>>,
    pub interval: Option<CountdownDuration>,
}

/// Reads both keys. A missing key restores nothing for that field;
/// malformed data is logged and skipped rather than propagated.
pub fn load(store: &dyn Store) -> Result<Restored, PersistError> {
    let mut restored = Restored::default();

    if let Some(raw) = store.get(EXERCISES_KEY)? {
        match serde_json::from_str::<Vec<Exercise>>(&raw) {
            Ok(list) => restored.exercises = Some(list),
            Err(err) => log::warn!("ignoring malformed exercise list in storage: {err}"),
        }
    }

    if let Some(raw) = store.get(INTERVAL_KEY)? {
        match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => restored.interval = Some(CountdownDuration::from_secs(secs)),
            Ok(_) => log::warn!("ignoring non-positive interval in storage"),
            Err(err) => log::warn!("ignoring malformed interval in storage: {err}"),
        }
    }

    Ok(restored)
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to access local storage: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize exercise list: {0}")]
    Serialize(#[from] serde_json::Error),
}
