use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::model::list::TaskList;

/// Suffix appended to the target path for the pre-save backup copy.
/// A single backup is kept; every save overwrites it.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Error type for todo file I/O
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("file doesn't exist: {0}")]
    NotFound(PathBuf),
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("task list is not bound to a file")]
    Unbound,
}

/// Read and parse a todo.txt file. The returned list is not bound to the
/// path; use [`TaskList::open`] for that.
pub fn from_file(path: &Path) -> Result<TaskList, FileError> {
    let content = read_content(path)?;
    let list = TaskList::from_string(&content);
    debug!("loaded {} tasks from {}", list.len(), path.display());
    Ok(list)
}

/// Serialize the list to `path`. If the target already exists it is first
/// copied to `<path>.bak`, then overwritten.
pub fn to_file(list: &TaskList, path: &Path) -> Result<(), FileError> {
    if path.exists() {
        let backup = backup_path(path);
        fs::copy(path, &backup).map_err(|e| FileError::Write {
            path: backup.clone(),
            source: e,
        })?;
        debug!("backed up {} to {}", path.display(), backup.display());
    }
    fs::write(path, list.to_string()).map_err(|e| FileError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!("saved {} tasks to {}", list.len(), path.display());
    Ok(())
}

fn read_content(path: &Path) -> Result<String, FileError> {
    if !path.is_file() {
        return Err(FileError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|e| FileError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

fn backup_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(BACKUP_SUFFIX);
    PathBuf::from(os)
}

impl TaskList {
    /// Load a list from `path` and bind it for later
    /// [`load`](TaskList::load)/[`save`](TaskList::save) calls.
    pub fn open(path: impl Into<PathBuf>) -> Result<TaskList, FileError> {
        let path = path.into();
        let mut list = from_file(&path)?;
        list.bind(path);
        Ok(list)
    }

    /// Re-read the bound file, replacing the current contents.
    pub fn load(&mut self) -> Result<(), FileError> {
        let path = self.bound_path().ok_or(FileError::Unbound)?.to_path_buf();
        let content = read_content(&path)?;
        self.set_from_string(&content);
        debug!("loaded {} tasks from {}", self.len(), path.display());
        Ok(())
    }

    /// Write to the bound file, backing up any existing file first.
    pub fn save(&self) -> Result<(), FileError> {
        let path = self.bound_path().ok_or(FileError::Unbound)?;
        to_file(self, path)
    }
}
