//! Preferences tab: target page, ticket count and keyword matching

use eframe::egui;

use super::widgets::{checkbox_row, choice_row, hint, section, text_row, DirtySet};
use crate::config::FieldId;
use crate::form::FormState;
use crate::gui::constants::*;
use crate::site_rules;

/// Renders the preferences tab and returns true if any changes were made
pub fn ui(ui: &mut egui::Ui, form: &mut FormState, dirty: &DirtySet) -> bool {
    let mut changed = false;

    section(ui, "Target", |ui| {
        changed |= text_row(ui, "Homepage:", &mut form.homepage, Some((FieldId::Homepage, dirty)));
        if site_rules::refresh_interval_warning(&form.homepage, &form.auto_reload_page_interval) {
            hint(
                ui,
                WARNING_COLOR,
                "Refreshing this site faster than every 8 seconds may get the session blocked",
            );
        }

        changed |= text_row(ui, "Ticket number:", &mut form.ticket_number, Some((FieldId::TicketNumber, dirty)));
        changed |= text_row(
            ui,
            "Refresh at (HH:MM:SS):",
            &mut form.refresh_datetime,
            Some((FieldId::RefreshDatetime, dirty)),
        );
    });

    section(ui, "Date selection", |ui| {
        changed |= choice_row(ui, "Date order:", &mut form.date_select_mode, &SELECT_ORDERS, None);
        changed |= text_row(ui, "Date keywords:", &mut form.date_keyword, None);
        changed |= checkbox_row(ui, "Fall back when no match:", &mut form.date_auto_fallback);
    });

    section(ui, "Area selection", |ui| {
        changed |= choice_row(ui, "Area order:", &mut form.area_select_mode, &SELECT_ORDERS, None);
        changed |= text_row(ui, "Area keywords:", &mut form.area_keyword, None);
        changed |= checkbox_row(ui, "Fall back when no match:", &mut form.area_auto_fallback);
        changed |= text_row(ui, "Exclude keywords:", &mut form.keyword_exclude, None);
        hint(ui, INFO_COLOR, "Separate keywords with ;");
    });

    changed
}
