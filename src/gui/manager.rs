//! Settings editor window implemented with egui/eframe

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use eframe::{egui, CreationContext, NativeOptions};
use tracing::{error, info};

use super::components::widgets::DirtySet;
use super::components::{accounts, advanced, preferences, runtime};
use super::constants::*;
use crate::backend::SettingsBackend;
use crate::constants::polling::{MESSAGE_TIMEOUT_MS, STATUS_INTERVAL_MS};
use crate::poller::{PollIntervals, PollState, Poller};
use crate::session::{SettingsSession, SyncError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Preferences,
    Advanced,
    Accounts,
    Runtime,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Preferences, Tab::Advanced, Tab::Accounts, Tab::Runtime];

    fn label(self) -> &'static str {
        match self {
            Tab::Preferences => "Preferences",
            Tab::Advanced => "Advanced",
            Tab::Accounts => "Accounts",
            Tab::Runtime => "Runtime",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditorAction {
    Run,
    Save,
    Reset,
    Pause,
    Resume,
    Exit,
}

/// Transient line under the action bar
struct StatusMessage {
    text: String,
    color: egui::Color32,
    shown_at: Instant,
}

struct SettingsApp {
    backend: Arc<dyn SettingsBackend>,
    session: SettingsSession,
    poller: Option<Poller>,
    tab: Tab,
    version: String,
    status_message: Option<StatusMessage>,
}

impl SettingsApp {
    fn new(_cc: &CreationContext<'_>, backend: Arc<dyn SettingsBackend>) -> Self {
        info!("Initializing settings editor");

        let poller = match Poller::start(backend.clone(), PollIntervals::default()) {
            Ok(poller) => Some(poller),
            Err(err) => {
                error!(error = ?err, "Failed to start status polling");
                None
            }
        };

        let mut app = Self {
            version: backend.version(),
            backend,
            session: SettingsSession::default(),
            poller,
            tab: Tab::Preferences,
            status_message: None,
        };

        if let Err(err) = app.session.load_from(app.backend.as_ref()) {
            app.show_message(format!("Failed to load settings: {err}"), STATUS_PAUSED);
        }
        app
    }

    fn show_message(&mut self, text: impl Into<String>, color: egui::Color32) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            color,
            shown_at: Instant::now(),
        });
    }

    fn save(&mut self) -> bool {
        match self.session.save_with(self.backend.as_ref()) {
            Ok(()) => true,
            Err(SyncError::Form(err)) => {
                self.show_message(format!("Not saved: {err}"), WARNING_COLOR);
                false
            }
            Err(SyncError::Backend(err)) => {
                self.show_message(format!("Save failed: {err}"), STATUS_PAUSED);
                false
            }
        }
    }

    fn handle_action(&mut self, action: EditorAction, ctx: &egui::Context) {
        info!(action = ?action, "Editor action");
        match action {
            EditorAction::Save => {
                if self.save() {
                    self.show_message("Saved", STATUS_RUNNING);
                }
            }
            EditorAction::Run => {
                if !self.save() {
                    return;
                }
                match self.backend.run() {
                    Ok(pid) => self.show_message(
                        format!("Agent started (PID: {pid}), the browser window will open shortly"),
                        STATUS_RUNNING,
                    ),
                    Err(err) => self.show_message(format!("Run failed: {err}"), STATUS_PAUSED),
                }
            }
            EditorAction::Reset => match self.session.reset_with(self.backend.as_ref()) {
                Ok(()) => self.show_message("Reset to defaults", STATUS_RUNNING),
                Err(err) => self.show_message(format!("Reset failed: {err}"), STATUS_PAUSED),
            },
            EditorAction::Pause => {
                if let Err(err) = self.backend.pause() {
                    self.show_message(format!("Pause failed: {err}"), STATUS_PAUSED);
                }
            }
            EditorAction::Resume => {
                if let Err(err) = self.backend.resume() {
                    self.show_message(format!("Resume failed: {err}"), STATUS_PAUSED);
                }
            }
            EditorAction::Exit => {
                self.backend.shutdown();
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    fn expire_message(&mut self) {
        let expired = self
            .status_message
            .as_ref()
            .is_some_and(|m| m.shown_at.elapsed() >= Duration::from_millis(MESSAGE_TIMEOUT_MS));
        if expired {
            self.status_message = None;
        }
    }

    fn status_line(&self, ui: &mut egui::Ui, poll: &PollState, dirty_count: usize) {
        ui.horizontal(|ui| {
            match &poll.status {
                Some(status) if status.running => {
                    ui.colored_label(STATUS_RUNNING, "\u{25CF}  Running");
                }
                Some(_) => {
                    ui.colored_label(STATUS_PAUSED, "\u{25CF}  Paused");
                }
                None => {
                    ui.colored_label(STATUS_PENDING, "\u{25CF}  Unknown");
                }
            }
            if dirty_count > 0 {
                ui.colored_label(MODIFIED_COLOR, format!("{dirty_count} unsaved"));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(&self.version);
            });
        });

        if let Some(url) = poll.status.as_ref().map(|s| s.last_url.as_str()).filter(|u| !u.is_empty()) {
            ui.label(format!("Last URL: {url}"));
        }
        if let Some(err) = &poll.last_error {
            ui.colored_label(WARNING_COLOR, format!("Status unavailable: {err}"));
        }
        if let Some(message) = &self.status_message {
            ui.colored_label(message.color, &message.text);
        }
    }
}

impl eframe::App for SettingsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.backend.shutdown_requested() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        self.expire_message();

        let poll = self.poller.as_ref().map(Poller::latest).unwrap_or_default();
        let mut action = None;

        egui::TopBottomPanel::top("actions").show(ctx, |ui| {
            ui.add_space(ITEM_SPACING);
            action = action_bar(ui);
            ui.add_space(ITEM_SPACING);
            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    ui.selectable_value(&mut self.tab, tab, tab.label());
                }
            });
            ui.add_space(ITEM_SPACING / 2.0);
        });

        if poll.question.exists {
            egui::TopBottomPanel::top("question").show(ctx, |ui| {
                ui.colored_label(WARNING_COLOR, egui::RichText::new("Verification question detected").strong());
                if poll.question.text.is_empty() {
                    ui.label("(question text unavailable)");
                } else {
                    ui.label(&poll.question.text);
                }
            });
        }

        let dirty_fields = self.session.dirty_fields();

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.add_space(ITEM_SPACING / 2.0);
            self.status_line(ui, &poll, dirty_fields.len());
            ui.add_space(ITEM_SPACING / 2.0);
        });

        let affinity = self.session.site_affinity();
        let dirty = DirtySet(&dirty_fields);
        let tab = self.tab;
        let form = &mut self.session.form;
        let mut changed = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(ITEM_SPACING);
                changed = match tab {
                    Tab::Preferences => preferences::ui(ui, form, &dirty),
                    Tab::Advanced => advanced::ui(ui, form, &dirty, affinity.as_ref()),
                    Tab::Accounts => accounts::ui(ui, form, &dirty),
                    Tab::Runtime => runtime::ui(ui, form, &dirty),
                };
            });
        });

        if changed {
            self.session.enforce_site_rules();
        }

        if let Some(action) = action {
            self.handle_action(action, ctx);
        }

        ctx.request_repaint_after(Duration::from_millis(STATUS_INTERVAL_MS));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(mut poller) = self.poller.take() {
            poller.stop();
        }
        info!("Settings editor exiting");
    }
}

fn action_bar(ui: &mut egui::Ui) -> Option<EditorAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        if ui.button("\u{25B6} Run").clicked() {
            action = Some(EditorAction::Run);
        }
        if ui.button("\u{1F4BE} Save").clicked() {
            action = Some(EditorAction::Save);
        }
        if ui.button("\u{21BA} Reset").clicked() {
            action = Some(EditorAction::Reset);
        }
        ui.separator();
        if ui.button("Pause").clicked() {
            action = Some(EditorAction::Pause);
        }
        if ui.button("Resume").clicked() {
            action = Some(EditorAction::Resume);
        }
        ui.separator();
        if ui.button("Exit").clicked() {
            action = Some(EditorAction::Exit);
        }
    });
    action
}

pub fn run_gui(backend: Arc<dyn SettingsBackend>) -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("Ticket Agent Settings"),
        ..Default::default()
    };

    eframe::run_native(
        "Ticket Agent Settings",
        options,
        Box::new(|cc| Ok(Box::new(SettingsApp::new(cc, backend)))),
    )
    .map_err(|err| anyhow!("Failed to launch settings editor: {err}"))
}
