//! Labeled form rows shared by the editor tabs

use eframe::egui;

use crate::config::FieldId;
use crate::gui::constants::*;

/// Fields currently differing from the saved snapshot
pub struct DirtySet<'a>(pub &'a [FieldId]);

impl DirtySet<'_> {
    pub fn contains(&self, field: FieldId) -> bool {
        self.0.contains(&field)
    }
}

fn label_cell(ui: &mut egui::Ui, label: &str) {
    ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new(label));
}

fn modified_marker(ui: &mut egui::Ui, dirty: bool) {
    if dirty {
        ui.colored_label(MODIFIED_COLOR, "\u{25CF} modified")
            .on_hover_text("Differs from the saved settings");
    }
}

/// Single-line text row; tracked rows show a marker when unsaved
pub fn text_row(ui: &mut egui::Ui, label: &str, value: &mut String, tracked: Option<(FieldId, &DirtySet)>) -> bool {
    row(ui, label, value, tracked, false)
}

pub fn secret_row(ui: &mut egui::Ui, label: &str, value: &mut String, tracked: Option<(FieldId, &DirtySet)>) -> bool {
    row(ui, label, value, tracked, true)
}

fn row(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    tracked: Option<(FieldId, &DirtySet)>,
    password: bool,
) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        label_cell(ui, label);
        let edit = egui::TextEdit::singleline(value)
            .password(password)
            .desired_width(FIELD_WIDTH);
        if ui.add(edit).changed() {
            changed = true;
        }
        if let Some((field, dirty)) = tracked {
            modified_marker(ui, dirty.contains(field));
        }
    });
    changed
}

pub fn checkbox_row(ui: &mut egui::Ui, label: &str, value: &mut bool) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        label_cell(ui, label);
        if ui.checkbox(value, "").changed() {
            changed = true;
        }
    });
    changed
}

/// Combo box over fixed choices. An unknown stored value stays selectable.
pub fn choice_row(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    choices: &[&str],
    tracked: Option<(FieldId, &DirtySet)>,
) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        label_cell(ui, label);
        egui::ComboBox::from_id_salt(label)
            .selected_text(value.as_str())
            .width(FIELD_WIDTH - 8.0)
            .show_ui(ui, |ui| {
                for choice in choices {
                    let selected = value.as_str() == *choice;
                    if ui.selectable_label(selected, *choice).clicked() && !selected {
                        *value = choice.to_string();
                        changed = true;
                    }
                }
            });
        if let Some((field, dirty)) = tracked {
            modified_marker(ui, dirty.contains(field));
        }
    });
    changed
}

pub fn hint(ui: &mut egui::Ui, color: egui::Color32, text: &str) {
    ui.horizontal(|ui| {
        ui.add_space(LABEL_WIDTH + ITEM_SPACING);
        ui.colored_label(color, text);
    });
}

pub fn section(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.group(|ui| {
        ui.label(egui::RichText::new(title).strong());
        ui.add_space(ITEM_SPACING);
        add_contents(ui);
    });
    ui.add_space(SECTION_SPACING);
}
