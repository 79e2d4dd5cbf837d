//! Background status and question polling
//!
//! Polls run on a current-thread tokio runtime in their own OS thread so the
//! egui loop never blocks on them. Results are published through a watch
//! channel; the editor reads the latest value each frame.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::backend::{AgentStatus, Question, SettingsBackend};
use crate::constants::polling::{QUESTION_INTERVAL_MS, STATUS_INTERVAL_MS};

/// Latest poll results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollState {
    /// `None` until the first status poll answers
    pub status: Option<AgentStatus>,
    pub question: Question,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct PollIntervals {
    pub status: Duration,
    pub question: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            status: Duration::from_millis(STATUS_INTERVAL_MS),
            question: Duration::from_millis(QUESTION_INTERVAL_MS),
        }
    }
}

pub struct Poller {
    state_rx: watch::Receiver<PollState>,
    stop_tx: watch::Sender<bool>,
    thread: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn start(backend: Arc<dyn SettingsBackend>, intervals: PollIntervals) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .context("Failed to build polling runtime")?;

        let (state_tx, state_rx) = watch::channel(PollState::default());
        let (stop_tx, stop_rx) = watch::channel(false);

        let thread = thread::Builder::new()
            .name("settings-poller".to_string())
            .spawn(move || runtime.block_on(poll_loop(backend, intervals, state_tx, stop_rx)))
            .context("Failed to spawn polling thread")?;

        info!(status_ms = intervals.status.as_millis() as u64, question_ms = intervals.question.as_millis() as u64, "Polling started");
        Ok(Self { state_rx, stop_tx, thread: Some(thread) })
    }

    pub fn latest(&self) -> PollState {
        self.state_rx.borrow().clone()
    }

    /// Cancel both loops and wait for the thread. Safe to call twice.
    pub fn stop(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };
        let _ = self.stop_tx.send(true);
        if thread.join().is_err() {
            error!("Polling thread panicked");
        }
        info!("Polling stopped");
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_loop(
    backend: Arc<dyn SettingsBackend>,
    intervals: PollIntervals,
    state_tx: watch::Sender<PollState>,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut status_tick = interval(intervals.status);
    let mut question_tick = interval(intervals.question);
    status_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    question_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    break;
                }
            }
            _ = status_tick.tick() => {
                let result = backend.status();
                state_tx.send_if_modified(|state| match result {
                    Ok(status) => {
                        let changed = state.status.as_ref() != Some(&status) || state.last_error.is_some();
                        state.status = Some(status);
                        state.last_error = None;
                        changed
                    }
                    Err(err) => {
                        debug!(error = %err, "Status poll failed");
                        state.last_error = Some(err.to_string());
                        true
                    }
                });
            }
            _ = question_tick.tick() => {
                match backend.question() {
                    Ok(question) => {
                        state_tx.send_if_modified(|state| {
                            let changed = state.question != question;
                            state.question = question;
                            changed
                        });
                    }
                    Err(err) => debug!(error = %err, "Question poll failed"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{AgentLauncher, LocalBackend};
    use crate::config::SettingsStore;
    use crate::constants::config::{IDLE_MARKER_FILE, QUESTION_FILE};
    use std::time::Instant;
    use tempfile::TempDir;

    fn fast() -> PollIntervals {
        PollIntervals {
            status: Duration::from_millis(10),
            question: Duration::from_millis(10),
        }
    }

    fn wait_for(poller: &Poller, pred: impl Fn(&PollState) -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if pred(&poller.latest()) {
                return true;
            }
            thread::sleep(Duration::from_millis(10));
        }
        false
    }

    #[test]
    fn test_poller_tracks_pause_and_question() {
        let dir = TempDir::new().unwrap();
        let backend: Arc<dyn SettingsBackend> = Arc::new(LocalBackend::new(
            SettingsStore::new(dir.path()),
            AgentLauncher::default(),
        ));
        let mut poller = Poller::start(backend.clone(), fast()).unwrap();

        assert!(wait_for(&poller, |s| s.status.as_ref().is_some_and(|st| st.running)));

        std::fs::write(dir.path().join(IDLE_MARKER_FILE), "").unwrap();
        assert!(wait_for(&poller, |s| s.status.as_ref().is_some_and(|st| !st.running)));

        std::fs::write(dir.path().join(QUESTION_FILE), "Which band?").unwrap();
        assert!(wait_for(&poller, |s| s.question.exists && s.question.text == "Which band?"));

        poller.stop();
        poller.stop();
    }

    #[test]
    fn test_drop_stops_thread() {
        let dir = TempDir::new().unwrap();
        let backend: Arc<dyn SettingsBackend> = Arc::new(LocalBackend::new(
            SettingsStore::new(dir.path()),
            AgentLauncher::default(),
        ));
        let poller = Poller::start(backend, fast()).unwrap();
        let rx = poller.state_rx.clone();
        drop(poller);
        // Sender side lives in the finished thread, so it is gone now
        assert!(rx.has_changed().is_err());
    }
}
