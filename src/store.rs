use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{error::StoreError, timer::Timer};

/// durable home of the one pending timer
/// every operation either fully applies or leaves the previous record in place
pub trait TimerStore {
    fn load(&self) -> Result<Option<Timer>, StoreError>;
    fn save(&mut self, timer: &Timer) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// on disk layout, absence of the table means nothing is scheduled
#[derive(Debug, Serialize, Deserialize, Default)]
struct TimerState {
    #[serde(
        rename = "wake_up_timer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    timer: Option<Timer>,
}

/// writes to a sibling temporary file and renames it over `path`
/// the temporary file is synced first so the rename never exposes a torn file
pub(crate) fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    drop(file);
    fs::rename(&temp_path, path)
}

/// toml file backed store
#[derive(Debug, Clone)]
pub struct FileTimerStore {
    path: PathBuf,
}

impl FileTimerStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, state: &TimerState) -> Result<(), StoreError> {
        let contents = toml::to_string(state)?;
        write_atomic(&self.path, &contents)?;
        log::debug!("wrote timer state to {}", self.path.display());
        Ok(())
    }
}

impl TimerStore for FileTimerStore {
    fn load(&self) -> Result<Option<Timer>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let state: TimerState = toml::from_str(&contents)?;
        Ok(state.timer)
    }

    fn save(&mut self, timer: &Timer) -> Result<(), StoreError> {
        self.write(&TimerState {
            timer: Some(timer.clone()),
        })
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.write(&TimerState::default())
    }
}

/// keeps the timer in memory only, nothing survives a restart
#[derive(Debug, Clone, Default)]
pub struct MemoryTimerStore {
    timer: Option<Timer>,
}

impl MemoryTimerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_timer(timer: Timer) -> Self {
        Self { timer: Some(timer) }
    }
}

impl TimerStore for MemoryTimerStore {
    fn load(&self) -> Result<Option<Timer>, StoreError> {
        Ok(self.timer.clone())
    }

    fn save(&mut self, timer: &Timer) -> Result<(), StoreError> {
        self.timer = Some(timer.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.timer = None;
        Ok(())
    }
}
