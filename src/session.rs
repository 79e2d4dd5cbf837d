//! Editing session: the baseline snapshot plus the live form

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::backend::{BackendError, SettingsBackend};
use crate::config::{FieldId, SettingsSnapshot};
use crate::dirty;
use crate::form::{FormState, SaveError};
use crate::site_rules::{self, SiteAffinity};

/// Why a save round-trip did not complete
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Form(#[from] SaveError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Owns the only baseline snapshot. The baseline is replaced wholesale by a
/// successful load, reset or save and is never touched on failure.
#[derive(Debug, Clone)]
pub struct SettingsSession {
    baseline: SettingsSnapshot,
    pub form: FormState,
}

impl Default for SettingsSession {
    fn default() -> Self {
        Self::new(SettingsSnapshot::default())
    }
}

impl SettingsSession {
    pub fn new(baseline: SettingsSnapshot) -> Self {
        let form = FormState::from_snapshot(&baseline);
        Self { baseline, form }
    }

    pub fn baseline(&self) -> &SettingsSnapshot {
        &self.baseline
    }

    /// Take a freshly loaded or reset snapshot as the new baseline and
    /// refill the form from it
    pub fn apply_loaded(&mut self, snapshot: SettingsSnapshot) {
        self.form = FormState::from_snapshot(&snapshot);
        self.baseline = snapshot;
        debug!(homepage = %self.baseline.homepage, "Baseline replaced");
    }

    /// Snapshot to send for saving; the baseline is not modified
    pub fn prepare_save(&self) -> Result<SettingsSnapshot, SaveError> {
        self.form.apply_to(&self.baseline)
    }

    /// Adopt what the backend stored. The form is refreshed as well so any
    /// value the backend clamped shows up, and all markers clear.
    pub fn commit_saved(&mut self, stored: SettingsSnapshot) {
        self.apply_loaded(stored);
    }

    pub fn dirty_fields(&self) -> Vec<FieldId> {
        dirty::dirty_fields(&self.form, &self.baseline)
    }

    pub fn site_affinity(&self) -> Option<SiteAffinity> {
        site_rules::resolve(&self.form.homepage)
    }

    /// Apply a forced driver from the site rules to the form.
    /// Returns true when the form changed.
    pub fn enforce_site_rules(&mut self) -> bool {
        let Some(driver) = self.site_affinity().and_then(|a| a.forced_webdriver) else {
            return false;
        };
        if self.form.webdriver_type == driver {
            return false;
        }
        info!(homepage = %self.form.homepage, webdriver_type = driver, "Homepage requires a specific driver");
        self.form.webdriver_type = driver.to_string();
        true
    }

    pub fn load_from(&mut self, backend: &dyn SettingsBackend) -> Result<(), BackendError> {
        let snapshot = backend.load()?;
        self.apply_loaded(snapshot);
        info!("Settings loaded");
        Ok(())
    }

    pub fn reset_with(&mut self, backend: &dyn SettingsBackend) -> Result<(), BackendError> {
        let snapshot = backend.reset()?;
        self.apply_loaded(snapshot);
        info!("Settings reset");
        Ok(())
    }

    /// Validate the form, persist, then adopt the stored result.
    /// Nothing reaches the backend when the form does not validate.
    pub fn save_with(&mut self, backend: &dyn SettingsBackend) -> Result<(), SyncError> {
        let outgoing = self.prepare_save().inspect_err(|err| {
            warn!(error = %err, "Save aborted");
        })?;
        let stored = backend.save(&outgoing)?;
        self.commit_saved(stored);
        info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{AgentLauncher, LocalBackend};
    use crate::config::SettingsStore;
    use tempfile::TempDir;

    fn local(dir: &TempDir) -> LocalBackend {
        LocalBackend::new(SettingsStore::new(dir.path()), AgentLauncher::default())
    }

    #[test]
    fn test_load_edit_save_clears_dirty() {
        let dir = TempDir::new().unwrap();
        let backend = local(&dir);
        let mut session = SettingsSession::default();
        session.load_from(&backend).unwrap();
        assert!(session.dirty_fields().is_empty());

        session.form.homepage = "https://kktix.com/events/x".to_string();
        session.form.kktix_password = "pw".to_string();
        assert_eq!(session.dirty_fields(), vec![FieldId::Homepage, FieldId::KktixPassword]);

        session.save_with(&backend).unwrap();
        assert!(session.dirty_fields().is_empty());
        assert_eq!(backend.load().unwrap().accounts.kktix_password, "pw");
    }

    #[test]
    fn test_invalid_ticket_number_never_reaches_backend() {
        let dir = TempDir::new().unwrap();
        let backend = local(&dir);
        let mut session = SettingsSession::default();
        session.load_from(&backend).unwrap();

        session.form.ticket_number = String::new();
        session.form.homepage = "https://tixcraft.com/".to_string();
        let err = session.save_with(&backend).unwrap_err();
        assert!(matches!(err, SyncError::Form(SaveError::TicketNumberRequired)));

        // Nothing written, baseline and edits kept
        assert!(!dir.path().join("settings.json").exists());
        assert_eq!(session.baseline().homepage, "about:blank");
        assert!(session.dirty_fields().contains(&FieldId::Homepage));
    }

    #[test]
    fn test_failed_load_keeps_baseline() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{ broken").unwrap();
        let backend = local(&dir);

        let mut s = SettingsSnapshot::default();
        s.homepage = "https://kktix.com/".to_string();
        let mut session = SettingsSession::new(s);
        assert!(session.load_from(&backend).is_err());
        assert_eq!(session.baseline().homepage, "https://kktix.com/");
    }

    #[test]
    fn test_clamped_value_shown_after_save() {
        let dir = TempDir::new().unwrap();
        let backend = local(&dir);
        let mut session = SettingsSession::default();
        session.form.max_dwell_time = "5".to_string();
        session.save_with(&backend).unwrap();
        assert_eq!(session.form.max_dwell_time, "15");
    }

    #[test]
    fn test_cityline_homepage_forces_driver() {
        let mut session = SettingsSession::default();
        session.form.webdriver_type = "selenium".to_string();
        session.form.homepage = "https://shows.cityline.com/tc/event.html".to_string();
        assert!(session.enforce_site_rules());
        assert_eq!(session.form.webdriver_type, "nodriver");
        assert!(!session.enforce_site_rules());
    }

    #[test]
    fn test_reset_replaces_baseline() {
        let dir = TempDir::new().unwrap();
        let backend = local(&dir);
        let mut session = SettingsSession::default();
        session.form.homepage = "https://kktix.com/".to_string();
        session.save_with(&backend).unwrap();

        session.reset_with(&backend).unwrap();
        assert_eq!(session.baseline().homepage, "about:blank");
        assert_eq!(session.form.homepage, "about:blank");
    }
}
