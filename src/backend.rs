//! Agent control boundary
//!
//! The editor talks to the agent only through [`SettingsBackend`]. The local
//! implementation works directly on the application root: the settings file
//! plus a few marker files the agent watches.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::{SettingsSnapshot, SettingsStore};
use crate::constants::config::{APP_VERSION, IDLE_MARKER_FILE, LAST_URL_FILE, QUESTION_FILE};
use crate::constants::webdriver;

/// Transport-level failure; the caller keeps its current snapshot
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{action} failed: {message}")]
    Request { action: &'static str, message: String },

    #[error("failed to start agent `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("no agent command configured")]
    NoAgentCommand,
}

impl BackendError {
    fn request(action: &'static str) -> impl FnOnce(anyhow::Error) -> BackendError {
        move |err| {
            error!(action, error = ?err, "Backend request failed");
            BackendError::Request { action, message: format!("{err:#}") }
        }
    }

    fn io<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> BackendError + 'a {
        move |err| {
            error!(action, path = ?path, error = %err, "Backend request failed");
            BackendError::Request { action, message: format!("{}: {err}", path.display()) }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentStatus {
    /// False while the idle marker exists
    pub running: bool,
    pub last_url: String,
}

/// Verification question the agent could not answer on its own
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Question {
    pub exists: bool,
    pub text: String,
}

pub trait SettingsBackend: Send + Sync {
    fn load(&self) -> Result<SettingsSnapshot, BackendError>;

    /// Persist and return what was actually stored
    fn save(&self, snapshot: &SettingsSnapshot) -> Result<SettingsSnapshot, BackendError>;

    fn reset(&self) -> Result<SettingsSnapshot, BackendError>;

    /// Start an agent for the stored settings; returns its pid
    fn run(&self) -> Result<u32, BackendError>;

    fn pause(&self) -> Result<(), BackendError>;
    fn resume(&self) -> Result<(), BackendError>;
    fn status(&self) -> Result<AgentStatus, BackendError>;
    fn version(&self) -> String;
    fn question(&self) -> Result<Question, BackendError>;

    /// Ask the session to close
    fn shutdown(&self);
    fn shutdown_requested(&self) -> bool;
}

/// Programs used to start the agent, picked by driver type
#[derive(Debug, Clone, Default)]
pub struct AgentLauncher {
    pub default_cmd: Option<String>,
    /// Used instead of `default_cmd` when the driver is nodriver
    pub nodriver_cmd: Option<String>,
}

impl AgentLauncher {
    fn command_for(&self, webdriver_type: &str) -> Option<&str> {
        let preferred = if webdriver_type == webdriver::NODRIVER {
            self.nodriver_cmd.as_deref()
        } else {
            None
        };
        preferred.or(self.default_cmd.as_deref())
    }
}

/// Screen width past which staggered windows wrap back to the left
const STAGGER_WRAP_WIDTH: u32 = 1440;

/// Append the launch slot to `width,height` so repeated runs tile
/// horizontally. Returns the argument and the slot actually used.
fn staggered_window_size(window_size: &str, slot: u32) -> (String, u32) {
    let Some((width, _)) = window_size.split_once(',') else {
        return (window_size.to_string(), slot);
    };
    let Ok(width) = width.trim().parse::<u32>() else {
        return (window_size.to_string(), slot);
    };

    let slot = if width.saturating_mul(slot) >= STAGGER_WRAP_WIDTH { 0 } else { slot };
    (format!("{window_size},{slot}"), slot)
}

pub struct LocalBackend {
    store: SettingsStore,
    launcher: AgentLauncher,
    next_slot: AtomicU32,
    agent: Mutex<Option<Child>>,
    shutdown: AtomicBool,
}

impl LocalBackend {
    pub fn new(store: SettingsStore, launcher: AgentLauncher) -> Self {
        Self {
            store,
            launcher,
            next_slot: AtomicU32::new(0),
            agent: Mutex::new(None),
            shutdown: AtomicBool::new(false),
        }
    }

    fn root_file(&self, name: &str) -> PathBuf {
        self.store.root().join(name)
    }
}

impl SettingsBackend for LocalBackend {
    fn load(&self) -> Result<SettingsSnapshot, BackendError> {
        self.store.load().map_err(BackendError::request("load"))
    }

    fn save(&self, snapshot: &SettingsSnapshot) -> Result<SettingsSnapshot, BackendError> {
        self.store.save(snapshot).map_err(BackendError::request("save"))
    }

    fn reset(&self) -> Result<SettingsSnapshot, BackendError> {
        self.store.reset().map_err(BackendError::request("reset"))
    }

    fn run(&self) -> Result<u32, BackendError> {
        let settings = self.load()?;
        let command = self
            .launcher
            .command_for(&settings.webdriver_type)
            .ok_or(BackendError::NoAgentCommand)?;

        let slot = self.next_slot.load(Ordering::Relaxed);
        let (window_size, used) = staggered_window_size(&settings.advanced.window_size, slot);
        self.next_slot.store(used + 1, Ordering::Relaxed);

        let mut parts = command.split_whitespace();
        let program = parts.next().ok_or(BackendError::NoAgentCommand)?;
        let mut cmd = Command::new(program);
        cmd.args(parts).arg("--input").arg(self.store.path());
        if !window_size.is_empty() {
            cmd.arg("--window_size").arg(&window_size);
        }

        let child = cmd.spawn().map_err(|source| BackendError::Spawn {
            command: command.to_string(),
            source,
        })?;
        let pid = child.id();
        info!(pid, command, window_size = %window_size, webdriver_type = %settings.webdriver_type, "Started agent");

        let mut agent = self.agent.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(mut previous) = agent.replace(child) {
            // Earlier runs keep going; just reap them if they are done
            if let Ok(Some(status)) = previous.try_wait() {
                info!(pid = previous.id(), exit = ?status.code(), "Previous agent had exited");
            }
        }
        Ok(pid)
    }

    fn pause(&self) -> Result<(), BackendError> {
        let path = self.root_file(IDLE_MARKER_FILE);
        fs::create_dir_all(self.store.root()).map_err(BackendError::io("pause", self.store.root()))?;
        fs::write(&path, "").map_err(BackendError::io("pause", &path))?;
        info!(path = ?path, "Agent paused");
        Ok(())
    }

    fn resume(&self) -> Result<(), BackendError> {
        let path = self.root_file(IDLE_MARKER_FILE);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(BackendError::io("resume", &path)(err)),
        }
        info!(path = ?path, "Agent resumed");
        Ok(())
    }

    fn status(&self) -> Result<AgentStatus, BackendError> {
        let paused = self.root_file(IDLE_MARKER_FILE).exists();
        let url_path = self.root_file(LAST_URL_FILE);
        let last_url = match fs::read_to_string(&url_path) {
            Ok(text) => text.trim().to_string(),
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(BackendError::io("status", &url_path)(err)),
        };
        Ok(AgentStatus { running: !paused, last_url })
    }

    fn version(&self) -> String {
        APP_VERSION.to_string()
    }

    fn question(&self) -> Result<Question, BackendError> {
        let path = self.root_file(QUESTION_FILE);
        if !path.exists() {
            return Ok(Question::default());
        }
        let text = match fs::read_to_string(&path) {
            Ok(text) => text.trim().to_string(),
            Err(err) => {
                // Exists but unreadable: still report it so the banner shows
                warn!(path = ?path, error = %err, "Failed to read question file");
                String::new()
            }
        };
        Ok(Question { exists: true, text })
    }

    fn shutdown(&self) {
        info!("Shutdown requested");
        self.shutdown.store(true, Ordering::Relaxed);
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn backend(dir: &TempDir) -> LocalBackend {
        LocalBackend::new(SettingsStore::new(dir.path()), AgentLauncher::default())
    }

    #[test]
    fn test_pause_resume_toggles_status() {
        let dir = TempDir::new().unwrap();
        let backend = backend(&dir);

        assert!(backend.status().unwrap().running);
        backend.pause().unwrap();
        assert!(!backend.status().unwrap().running);
        backend.resume().unwrap();
        assert!(backend.status().unwrap().running);

        // Resuming twice is harmless
        backend.resume().unwrap();
    }

    #[test]
    fn test_status_reports_last_url() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(LAST_URL_FILE), "https://kktix.com/events/x\n").unwrap();
        let status = backend(&dir).status().unwrap();
        assert_eq!(status.last_url, "https://kktix.com/events/x");
    }

    #[test]
    fn test_question_file() {
        let dir = TempDir::new().unwrap();
        let backend = backend(&dir);
        assert_eq!(backend.question().unwrap(), Question::default());

        fs::write(dir.path().join(QUESTION_FILE), "  What is 2+3?  ").unwrap();
        assert_eq!(
            backend.question().unwrap(),
            Question { exists: true, text: "What is 2+3?".to_string() }
        );
    }

    #[test]
    fn test_run_without_command_fails() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(backend(&dir).run(), Err(BackendError::NoAgentCommand)));
    }

    #[test]
    fn test_run_missing_program_is_spawn_error() {
        let dir = TempDir::new().unwrap();
        let launcher = AgentLauncher {
            default_cmd: Some("/nonexistent/agent-binary".to_string()),
            nodriver_cmd: None,
        };
        let backend = LocalBackend::new(SettingsStore::new(dir.path()), launcher);
        assert!(matches!(backend.run(), Err(BackendError::Spawn { .. })));
    }

    #[test]
    fn test_launcher_prefers_nodriver_command() {
        let launcher = AgentLauncher {
            default_cmd: Some("chrome-agent".to_string()),
            nodriver_cmd: Some("nodriver-agent".to_string()),
        };
        assert_eq!(launcher.command_for("nodriver"), Some("nodriver-agent"));
        assert_eq!(launcher.command_for("selenium"), Some("chrome-agent"));

        let only_default = AgentLauncher { default_cmd: Some("agent".to_string()), nodriver_cmd: None };
        assert_eq!(only_default.command_for("nodriver"), Some("agent"));
    }

    #[test]
    fn test_staggered_window_size() {
        assert_eq!(staggered_window_size("600,1024", 0), ("600,1024,0".to_string(), 0));
        assert_eq!(staggered_window_size("600,1024", 2), ("600,1024,2".to_string(), 2));
        assert_eq!(staggered_window_size("600,1024", 3), ("600,1024,0".to_string(), 0));
        assert_eq!(staggered_window_size("", 1), (String::new(), 1));
        assert_eq!(staggered_window_size("wide,tall", 1), ("wide,tall".to_string(), 1));
    }

    #[test]
    fn test_shutdown_flag() {
        let dir = TempDir::new().unwrap();
        let backend = backend(&dir);
        assert!(!backend.shutdown_requested());
        backend.shutdown();
        assert!(backend.shutdown_requested());
    }

    #[test]
    fn test_load_save_through_backend() {
        let dir = TempDir::new().unwrap();
        let backend = backend(&dir);
        let mut s = backend.load().unwrap();
        s.homepage = "https://www.cityline.com/Events.html".to_string();
        s.webdriver_type = "selenium".to_string();
        let saved = backend.save(&s).unwrap();
        assert_eq!(saved.webdriver_type, "nodriver");
        assert_eq!(backend.load().unwrap().webdriver_type, "nodriver");
    }
}
