//! Session persistence backends.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::session::{SessionError, SessionResult, SessionState};

/// Where a session is kept between runs.
pub trait SessionStore: Send + Sync {
    /// Read the persisted state; an empty store yields the default state.
    fn load(&self) -> SessionResult<SessionState>;

    fn save(&self, state: &SessionState) -> SessionResult<()>;

    fn clear(&self) -> SessionResult<()>;
}

/// In-memory store. Clones share the same slot, so a test can keep a handle
/// and inspect what the session wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<SessionState>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn with_state(state: SessionState) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(state))),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// What is currently persisted (`None` after clear or before any save).
    pub fn state(&self) -> Option<SessionState> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    /// Make subsequent `save`/`clear` calls fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn write(&self, value: Option<SessionState>) -> SessionResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SessionError::Unavailable("writes disabled".to_string()));
        }
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| SessionError::Unavailable("poisoned lock".to_string()))?;
        *slot = value;
        Ok(())
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> SessionResult<SessionState> {
        Ok(self.state().unwrap_or_default())
    }

    fn save(&self, state: &SessionState) -> SessionResult<()> {
        self.write(Some(state.clone()))
    }

    fn clear(&self) -> SessionResult<()> {
        self.write(None)
    }
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> SessionResult<SessionState> {
        if !self.path.exists() {
            return Ok(SessionState::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(SessionState::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Write to a private temp file beside the target, then rename over it.
    fn save(&self, state: &SessionState) -> SessionResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let content = serde_json::to_string_pretty(state)?;
        let mut staged = tempfile::NamedTempFile::new_in(dir)?;
        restrict_permissions(staged.path())?;
        staged.write_all(content.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// The file holds a bearer token.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
