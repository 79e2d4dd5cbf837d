//! On-disk settings file in the application root

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::SettingsSnapshot;
use crate::constants::config::{APP_DIR, FILENAME};

#[derive(Debug, Clone)]
pub struct SettingsStore {
    root: PathBuf,
}

impl SettingsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<config dir>/ticket-settings`, or the working directory when the
    /// platform has no config dir
    pub fn default_root() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(FILENAME)
    }

    /// Read, migrate and return the stored snapshot.
    ///
    /// A missing file yields the defaults without writing anything.
    pub fn load(&self) -> Result<SettingsSnapshot> {
        let path = self.path();

        let mut snapshot = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {:?}", path))?;
            serde_json::from_str::<SettingsSnapshot>(&contents)
                .with_context(|| format!("Failed to parse settings JSON from {:?}", path))?
        } else {
            info!(path = ?path, "Settings file not found, using defaults");
            SettingsSnapshot::default()
        };

        snapshot.migrate();
        snapshot.refresh_remote_url();
        Ok(snapshot)
    }

    /// Normalize and persist. Returns exactly what was written.
    pub fn save(&self, snapshot: &SettingsSnapshot) -> Result<SettingsSnapshot> {
        let mut to_write = snapshot.clone();
        to_write.normalize_for_save();

        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create settings directory {:?}", self.root))?;

        let json = serde_json::to_string_pretty(&to_write).context("Failed to serialize settings to JSON")?;

        let path = self.path();
        fs::write(&path, json).with_context(|| format!("Failed to write settings to {:?}", path))?;

        info!(path = ?path, homepage = %to_write.homepage, "Saved settings");
        Ok(to_write)
    }

    /// Replace the stored file with the defaults
    pub fn reset(&self) -> Result<SettingsSnapshot> {
        let mut defaults = SettingsSnapshot::default();
        defaults.refresh_remote_url();
        let written = self.save(&defaults)?;
        info!(path = ?self.path(), "Settings reset to defaults");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        let s = store.load().unwrap();
        assert_eq!(s.ticket_number, 2);
        assert_eq!(s.advanced.remote_url, "\"http://127.0.0.1:16888/\"");
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("nested"));

        let mut s = SettingsSnapshot::default();
        s.homepage = "https://kktix.com/events/abc".to_string();
        s.kktix.max_dwell_time = 3;
        let written = store.save(&s).unwrap();
        assert_eq!(written.kktix.max_dwell_time, 15);

        let loaded = store.load().unwrap();
        assert_eq!(loaded.homepage, "https://kktix.com/events/abc");
        assert_eq!(loaded.kktix.max_dwell_time, 15);
    }

    #[test]
    fn test_load_migrates_legacy_file() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        fs::write(
            store.path(),
            r#"{"advanced":{"ocr_model_path":"/m","server_port":70000},"extra_section":{"k":1}}"#,
        )
        .unwrap();

        let s = store.load().unwrap();
        assert_eq!(s.ocr_captcha.path, "/m");
        assert_eq!(s.advanced.remote_url, "\"http://127.0.0.1:16888/\"");
        assert_eq!(s.extra["extra_section"]["k"], 1);
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        fs::write(store.path(), "{ not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse settings JSON"));
    }

    #[test]
    fn test_reset_overwrites_with_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        let mut s = SettingsSnapshot::default();
        s.homepage = "https://tixcraft.com/".to_string();
        store.save(&s).unwrap();

        let reset = store.reset().unwrap();
        assert_eq!(reset.homepage, "about:blank");
        assert_eq!(store.load().unwrap().homepage, "about:blank");
    }

    #[test]
    fn test_reset_rewrites_file_in_place() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        fs::write(store.path(), "{ broken").unwrap();

        store.reset().unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load().unwrap().ticket_number, 2);

        // Failed write reports an error and leaves the old file there
        let blocked = SettingsStore::new(store.path().join("sub"));
        assert!(blocked.reset().is_err());
        assert!(store.path().is_file());
    }
}
