//! Advanced tab: browser, reload pacing, OCR and site-specific options

use eframe::egui;

use super::widgets::{checkbox_row, choice_row, hint, section, text_row, DirtySet};
use crate::config::FieldId;
use crate::constants::webdriver;
use crate::form::FormState;
use crate::gui::constants::*;
use crate::site_rules::{SiteAffinity, SiteSection};

pub fn ui(ui: &mut egui::Ui, form: &mut FormState, dirty: &DirtySet, affinity: Option<&SiteAffinity>) -> bool {
    let mut changed = false;
    let forced_driver = affinity.and_then(|a| a.forced_webdriver);
    let shows = |site: SiteSection| affinity.is_some_and(|a| a.shows(site));

    section(ui, "Browser", |ui| {
        changed |= choice_row(ui, "Browser:", &mut form.browser, &BROWSERS, Some((FieldId::Browser, dirty)));
        ui.add_enabled_ui(forced_driver.is_none(), |ui| {
            changed |= choice_row(
                ui,
                "Webdriver:",
                &mut form.webdriver_type,
                &webdriver::ALL,
                Some((FieldId::WebdriverType, dirty)),
            );
        });
        if let Some(driver) = forced_driver {
            hint(ui, INFO_COLOR, &format!("This homepage only works with {driver}"));
        }
        changed |= text_row(ui, "Window size (w,h):", &mut form.window_size, Some((FieldId::WindowSize, dirty)));
        changed |= text_row(ui, "Proxy server:", &mut form.proxy_server_port, Some((FieldId::ProxyServerPort, dirty)));
        changed |= checkbox_row(ui, "Browser extension:", &mut form.chrome_extension);
        changed |= checkbox_row(ui, "Hide some images:", &mut form.hide_some_image);
        changed |= checkbox_row(ui, "Block Facebook network:", &mut form.block_facebook_network);
        changed |= checkbox_row(ui, "Headless:", &mut form.headless);
        changed |= checkbox_row(ui, "Verbose logging:", &mut form.verbose);
    });

    section(ui, "Reload", |ui| {
        changed |= text_row(
            ui,
            "Reload interval (s):",
            &mut form.auto_reload_page_interval,
            Some((FieldId::AutoReloadPageInterval, dirty)),
        );
        changed |= text_row(
            ui,
            "Reset browser every (s):",
            &mut form.reset_browser_interval,
            Some((FieldId::ResetBrowserInterval, dirty)),
        );
        hint(ui, INFO_COLOR, "0 disables; values below 20 are raised to 20 on save");
        changed |= checkbox_row(ui, "Skip adjacent seats:", &mut form.disable_adjacent_seat);
    });

    section(ui, "Notifications", |ui| {
        changed |= checkbox_row(ui, "Sound on ticket:", &mut form.play_ticket_sound);
        changed |= checkbox_row(ui, "Sound on order:", &mut form.play_order_sound);
        changed |= text_row(ui, "Sound file:", &mut form.play_sound_filename, None);
        changed |= text_row(ui, "Discord webhook:", &mut form.discord_webhook_url, None);
    });

    section(ui, "Captcha", |ui| {
        changed |= checkbox_row(ui, "OCR enabled:", &mut form.ocr_captcha_enable);
        changed |= choice_row(ui, "Image source:", &mut form.ocr_captcha_image_source, &OCR_IMAGE_SOURCES, None);
        changed |= checkbox_row(ui, "Submit automatically:", &mut form.ocr_captcha_force_submit);
        changed |= text_row(ui, "OCR model path:", &mut form.ocr_model_path, None);
        changed |= text_row(ui, "Remote URL:", &mut form.remote_url, Some((FieldId::RemoteUrl, dirty)));
        changed |= text_row(ui, "Server port:", &mut form.server_port, None);
    });

    section(ui, "Answer dictionary", |ui| {
        changed |= text_row(ui, "Answers:", &mut form.user_guess_string, Some((FieldId::UserGuessString, dirty)));
        changed |= checkbox_row(ui, "Guess from options:", &mut form.auto_guess_options);
    });

    section(ui, "Contact", |ui| {
        changed |= text_row(ui, "Real name:", &mut form.real_name, None);
        changed |= text_row(ui, "Phone:", &mut form.phone, None);
        changed |= text_row(ui, "Card prefix:", &mut form.credit_card_prefix, None);
    });

    if shows(SiteSection::Kktix) {
        section(ui, SiteSection::Kktix.label(), |ui| {
            changed |= checkbox_row(ui, "Press next step:", &mut form.auto_press_next_step_button);
            changed |= text_row(ui, "Max dwell time (s):", &mut form.max_dwell_time, None);
            hint(ui, INFO_COLOR, "0 disables; values below 15 are raised to 15 on save");
        });
    }

    if shows(SiteSection::Cityline) {
        section(ui, SiteSection::Cityline.label(), |ui| {
            ui.label("Cityline is opened with nodriver. Log in once in the opened browser window.");
        });
    }

    changed
}
