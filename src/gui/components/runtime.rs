//! Runtime tab: clock-driven pause and resume triggers

use eframe::egui;

use super::widgets::{hint, section, text_row, DirtySet};
use crate::config::FieldId;
use crate::form::FormState;
use crate::gui::constants::*;

pub fn ui(ui: &mut egui::Ui, form: &mut FormState, dirty: &DirtySet) -> bool {
    let mut changed = false;

    section(ui, "Time of day (HH:MM:SS)", |ui| {
        changed |= text_row(ui, "Pause at:", &mut form.idle_keyword, Some((FieldId::IdleKeyword, dirty)));
        changed |= text_row(ui, "Resume at:", &mut form.resume_keyword, Some((FieldId::ResumeKeyword, dirty)));
    });

    section(ui, "Every minute (SS)", |ui| {
        changed |= text_row(
            ui,
            "Pause at second:",
            &mut form.idle_keyword_second,
            Some((FieldId::IdleKeywordSecond, dirty)),
        );
        changed |= text_row(
            ui,
            "Resume at second:",
            &mut form.resume_keyword_second,
            Some((FieldId::ResumeKeywordSecond, dirty)),
        );
        hint(ui, INFO_COLOR, "Several values: 00,30");
    });

    changed
}
