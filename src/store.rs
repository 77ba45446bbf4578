use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde_json::Value;

use crate::app_dirs::AppDirs;
use crate::solve::{Solve, StoredFormat};

/// Persistence port for the solve collection.
///
/// `load` never fails: anything unreadable degrades to an empty sequence
/// with a logged warning. `save` replaces the whole snapshot; callers catch
/// and log errors rather than crashing mid-session.
pub trait SolveStore: fmt::Debug {
    fn load(&self) -> Vec<Solve>;
    fn save(&self, solves: &[Solve]) -> io::Result<()>;
}

/// JSON snapshot on disk, one array, overwritten wholesale on every save.
#[derive(Debug, Clone)]
pub struct FileSolveStore {
    path: PathBuf,
}

impl FileSolveStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path =
            AppDirs::solves_path().unwrap_or_else(|| PathBuf::from("kubik_solves.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSolveStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SolveStore for FileSolveStore {
    fn load(&self) -> Vec<Solve> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("failed to read solves from {}: {e}", self.path.display());
                return Vec::new();
            }
        };

        let items = match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(items)) => items,
            Ok(_) => {
                warn!(
                    "solve snapshot at {} is not an array, starting empty",
                    self.path.display()
                );
                return Vec::new();
            }
            Err(e) => {
                warn!("failed to parse solves from {}: {e}", self.path.display());
                return Vec::new();
            }
        };

        let format = StoredFormat::classify(items);
        let migrate = format.is_legacy();
        let solves = format.into_solves();

        if migrate {
            // One-time in-place upgrade to the current schema.
            debug!(
                "migrated {} legacy solves at {}",
                solves.len(),
                self.path.display()
            );
            if let Err(e) = self.save(&solves) {
                warn!("failed to persist migrated solves: {e}");
            }
        }

        solves
    }

    fn save(&self, solves: &[Solve]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec(solves)?;

        // Write-then-rename so a failed save leaves the old snapshot intact.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)
    }
}

/// In-memory store for headless tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySolveStore {
    solves: RefCell<Vec<Solve>>,
}

impl MemorySolveStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_solves(solves: Vec<Solve>) -> Self {
        Self {
            solves: RefCell::new(solves),
        }
    }
}

impl SolveStore for MemorySolveStore {
    fn load(&self) -> Vec<Solve> {
        self.solves.borrow().clone()
    }

    fn save(&self, solves: &[Solve]) -> io::Result<()> {
        *self.solves.borrow_mut() = solves.to_vec();
        Ok(())
    }
}
