//! Editable form state and its mapping to and from the snapshot
//!
//! The form holds display values only: keyword lists are semicolon-joined,
//! numbers are the raw text the user typed. Loading projects a snapshot into
//! this shape; saving parses it back into a new snapshot.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{FieldId, FieldValue, SettingsSnapshot};
use crate::constants::{defaults, keyword::EMPTY_SENTINEL};
use crate::keyword::{decode_for_display, encode_for_storage, KeywordList};

/// Reasons a save is refused before anything reaches the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("Please specify the number of tickets")]
    TicketNumberRequired,

    #[error("{field} must be a number (got {value:?})")]
    InvalidNumber { field: &'static str, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    // preference
    pub homepage: String,
    pub ticket_number: String,
    pub refresh_datetime: String,
    pub date_select_mode: String,
    pub date_keyword: String,
    pub date_auto_fallback: bool,
    pub area_select_mode: String,
    pub area_keyword: String,
    pub area_auto_fallback: bool,
    pub keyword_exclude: String,

    // advanced
    pub browser: String,
    pub webdriver_type: String,
    pub play_ticket_sound: bool,
    pub play_order_sound: bool,
    pub play_sound_filename: String,
    pub discord_webhook_url: String,
    pub auto_press_next_step_button: bool,
    pub max_dwell_time: String,
    pub auto_reload_page_interval: String,
    pub reset_browser_interval: String,
    pub server_port: String,
    pub proxy_server_port: String,
    pub window_size: String,
    pub chrome_extension: bool,
    pub disable_adjacent_seat: bool,
    pub hide_some_image: bool,
    pub block_facebook_network: bool,
    pub headless: bool,
    pub verbose: bool,

    pub ocr_captcha_enable: bool,
    pub ocr_captcha_image_source: String,
    pub ocr_captcha_force_submit: bool,
    pub remote_url: String,
    pub ocr_model_path: String,

    // dictionary
    pub user_guess_string: String,
    pub auto_guess_options: bool,

    // contact
    pub real_name: String,
    pub phone: String,
    pub credit_card_prefix: String,

    // accounts
    pub tixcraft_sid: String,
    pub ibonqware: String,
    pub funone_session_cookie: String,
    pub fansigo_cookie: String,
    pub facebook_account: String,
    pub kktix_account: String,
    pub fami_account: String,
    pub kham_account: String,
    pub ticket_account: String,
    pub udn_account: String,
    pub ticketplus_account: String,
    pub cityline_account: String,
    pub urbtix_account: String,
    pub hkticketing_account: String,

    pub facebook_password: String,
    pub kktix_password: String,
    pub fami_password: String,
    pub kham_password: String,
    pub ticket_password: String,
    pub udn_password: String,
    pub ticketplus_password: String,
    pub discount_code: String,
    pub urbtix_password: String,
    pub hkticketing_password: String,

    // runtime
    pub idle_keyword: String,
    pub resume_keyword: String,
    pub idle_keyword_second: String,
    pub resume_keyword_second: String,
}

/// How a stored value appears in its form field.
///
/// Used both to fill the form on load and by the dirty detector for fields
/// whose editor shows something other than the stored text.
pub fn display_projection(field: FieldId, stored: &FieldValue) -> String {
    let text = match stored {
        FieldValue::Text(s) => s.as_str(),
        FieldValue::Missing => return String::new(),
        FieldValue::Number(n) => return format_number(*n),
        FieldValue::Flag(b) => return b.to_string(),
    };

    match field {
        FieldId::UserGuessString => decode_for_display(text),
        FieldId::IdleKeyword | FieldId::ResumeKeyword => strip_sentinel(text).to_string(),
        FieldId::IdleKeywordSecond | FieldId::ResumeKeywordSecond => {
            let text = strip_sentinel(text);
            if text.contains("\",\"") {
                // "00","30","50" shows as 00,30,50
                text.replace('"', "")
            } else {
                text.to_string()
            }
        }
        FieldId::RemoteUrl => first_list_element(text),
        _ => text.to_string(),
    }
}

fn strip_sentinel(text: &str) -> &str {
    if text == EMPTY_SENTINEL { "" } else { text }
}

/// First element of a comma-joined JSON string list such as `"a","b"`
fn first_list_element(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match serde_json::from_str::<Vec<Value>>(&format!("[{raw}]")) {
        Ok(items) => match items.into_iter().next() {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        },
        Err(e) => {
            debug!(raw = %raw, error = %e, "remote_url is not a JSON list, showing it unquoted");
            raw.replace('"', "")
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

/// Leading-integer parse: optional sign then digits, anything after ignored
fn leading_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(digits.len(), |(i, _)| i);
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

fn parse_count(field: &'static str, text: &str) -> Result<u32, SaveError> {
    leading_int(text)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| SaveError::InvalidNumber { field, value: text.to_string() })
}

fn parse_seconds(field: &'static str, text: &str) -> Result<f64, SaveError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .ok_or_else(|| SaveError::InvalidNumber { field, value: text.to_string() })
}

impl FormState {
    /// Fill every field from a freshly loaded snapshot
    pub fn from_snapshot(s: &SettingsSnapshot) -> Self {
        let adv = &s.advanced;
        let acc = &s.accounts;
        let shown = |field: FieldId| display_projection(field, &s.field(field));

        let server_port = if adv.server_port == 0 {
            defaults::SERVER_PORT
        } else {
            adv.server_port
        };

        Self {
            homepage: s.homepage.clone(),
            ticket_number: s.ticket_number.to_string(),
            refresh_datetime: s.refresh_datetime.clone(),
            date_select_mode: s.date_auto_select.mode.clone(),
            date_keyword: s.date_auto_select.date_keyword.to_display(),
            date_auto_fallback: s.date_auto_fallback,
            area_select_mode: s.area_auto_select.mode.clone(),
            area_keyword: s.area_auto_select.area_keyword.to_display(),
            area_auto_fallback: s.area_auto_fallback,
            keyword_exclude: s.keyword_exclude.to_display(),

            browser: s.browser.clone(),
            webdriver_type: s.webdriver_type.clone(),
            play_ticket_sound: adv.play_sound.ticket,
            play_order_sound: adv.play_sound.order,
            play_sound_filename: adv.play_sound.filename.clone(),
            discord_webhook_url: adv.discord_webhook_url.clone().unwrap_or_default(),
            auto_press_next_step_button: s.kktix.auto_press_next_step_button,
            max_dwell_time: s.kktix.max_dwell_time.to_string(),
            auto_reload_page_interval: format_number(adv.auto_reload_page_interval),
            reset_browser_interval: adv.reset_browser_interval.to_string(),
            server_port: server_port.to_string(),
            proxy_server_port: adv.proxy_server_port.clone(),
            window_size: adv.window_size.clone(),
            chrome_extension: adv.chrome_extension,
            disable_adjacent_seat: adv.disable_adjacent_seat,
            hide_some_image: adv.hide_some_image,
            block_facebook_network: adv.block_facebook_network,
            headless: adv.headless,
            verbose: adv.verbose,

            ocr_captcha_enable: s.ocr_captcha.enable,
            ocr_captcha_image_source: s.ocr_captcha.image_source.clone(),
            ocr_captcha_force_submit: s.ocr_captcha.force_submit,
            remote_url: shown(FieldId::RemoteUrl),
            ocr_model_path: s.ocr_captcha.path.clone(),

            user_guess_string: adv.user_guess_string.to_display(),
            auto_guess_options: adv.auto_guess_options,

            real_name: s.contact.real_name.clone(),
            phone: s.contact.phone.clone(),
            credit_card_prefix: s.contact.credit_card_prefix.clone(),

            tixcraft_sid: acc.tixcraft_sid.clone(),
            ibonqware: acc.ibonqware.clone(),
            funone_session_cookie: acc.funone_session_cookie.clone(),
            fansigo_cookie: acc.fansigo_cookie.clone(),
            facebook_account: acc.facebook_account.clone(),
            kktix_account: acc.kktix_account.clone(),
            fami_account: acc.fami_account.clone(),
            kham_account: acc.kham_account.clone(),
            ticket_account: acc.ticket_account.clone(),
            udn_account: acc.udn_account.clone(),
            ticketplus_account: acc.ticketplus_account.clone(),
            cityline_account: acc.cityline_account.clone(),
            urbtix_account: acc.urbtix_account.clone(),
            hkticketing_account: acc.hkticketing_account.clone(),

            facebook_password: acc.facebook_password.clone(),
            kktix_password: acc.kktix_password.clone(),
            fami_password: acc.fami_password.clone(),
            kham_password: acc.kham_password.clone(),
            ticket_password: acc.ticket_password.clone(),
            udn_password: acc.udn_password.clone(),
            ticketplus_password: acc.ticketplus_password.clone(),
            discount_code: adv.discount_code.clone().unwrap_or_default(),
            urbtix_password: acc.urbtix_password.clone(),
            hkticketing_password: acc.hkticketing_password.clone(),

            idle_keyword: shown(FieldId::IdleKeyword),
            resume_keyword: shown(FieldId::ResumeKeyword),
            idle_keyword_second: shown(FieldId::IdleKeywordSecond),
            resume_keyword_second: shown(FieldId::ResumeKeywordSecond),
        }
    }

    /// Build the snapshot to persist from the current form values.
    ///
    /// `base` is not modified; fields the form does not edit are carried over
    /// from it. Nothing is returned unless every required number parses.
    pub fn apply_to(&self, base: &SettingsSnapshot) -> Result<SettingsSnapshot, SaveError> {
        let ticket_number = leading_int(&self.ticket_number)
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0)
            .ok_or(SaveError::TicketNumberRequired)?;

        let max_dwell_time = parse_count("max_dwell_time", &self.max_dwell_time)?;
        let reset_browser_interval = parse_count("reset_browser_interval", &self.reset_browser_interval)?;
        let auto_reload_page_interval = parse_seconds("auto_reload_page_interval", &self.auto_reload_page_interval)?;

        let server_port = leading_int(&self.server_port)
            .and_then(|n| u16::try_from(n).ok())
            .filter(|n| *n > 0)
            .unwrap_or_else(|| {
                warn!(server_port = %self.server_port, using = defaults::SERVER_PORT, "Unparseable server_port, using default");
                defaults::SERVER_PORT
            });

        let mut s = base.clone();

        // preference
        s.homepage = self.homepage.clone();
        s.ticket_number = ticket_number;
        s.refresh_datetime = self.refresh_datetime.clone();
        s.date_auto_select.mode = self.date_select_mode.clone();
        s.date_auto_select.date_keyword = keyword_list(&self.date_keyword);
        s.date_auto_fallback = self.date_auto_fallback;
        s.area_auto_select.mode = self.area_select_mode.clone();
        s.area_auto_select.area_keyword = keyword_list(&self.area_keyword);
        s.area_auto_fallback = self.area_auto_fallback;
        s.keyword_exclude = keyword_list(&self.keyword_exclude);

        // advanced
        s.browser = self.browser.clone();
        s.webdriver_type = self.webdriver_type.clone();
        let adv = &mut s.advanced;
        adv.play_sound.ticket = self.play_ticket_sound;
        adv.play_sound.order = self.play_order_sound;
        adv.play_sound.filename = self.play_sound_filename.clone();
        adv.discord_webhook_url = Some(self.discord_webhook_url.clone());

        adv.auto_reload_page_interval = auto_reload_page_interval;
        adv.reset_browser_interval = reset_browser_interval;
        adv.server_port = server_port;
        adv.proxy_server_port = self.proxy_server_port.clone();
        adv.window_size = self.window_size.clone();
        adv.chrome_extension = self.chrome_extension;
        adv.disable_adjacent_seat = self.disable_adjacent_seat;
        adv.hide_some_image = self.hide_some_image;
        adv.block_facebook_network = self.block_facebook_network;
        adv.headless = self.headless;
        adv.verbose = self.verbose;

        // Stored as one JSON string element without the surrounding brackets
        adv.remote_url = Value::String(self.remote_url.clone()).to_string();
        adv.user_guess_string = keyword_list(&self.user_guess_string);
        adv.auto_guess_options = self.auto_guess_options;
        adv.discount_code = Some(self.discount_code.clone());

        // runtime
        adv.idle_keyword = self.idle_keyword.clone();
        adv.resume_keyword = self.resume_keyword.clone();
        adv.idle_keyword_second = self.idle_keyword_second.clone();
        adv.resume_keyword_second = self.resume_keyword_second.clone();

        adv.extra.remove("ocr_model_path");

        s.kktix.auto_press_next_step_button = self.auto_press_next_step_button;
        s.kktix.max_dwell_time = max_dwell_time;

        s.ocr_captcha.enable = self.ocr_captcha_enable;
        s.ocr_captcha.image_source = self.ocr_captcha_image_source.clone();
        s.ocr_captcha.force_submit = self.ocr_captcha_force_submit;
        s.ocr_captcha.path = self.ocr_model_path.clone();

        s.contact.real_name = self.real_name.clone();
        s.contact.phone = self.phone.clone();
        s.contact.credit_card_prefix = self.credit_card_prefix.clone();

        let acc = &mut s.accounts;
        acc.tixcraft_sid = self.tixcraft_sid.clone();
        acc.ibonqware = self.ibonqware.clone();
        acc.funone_session_cookie = self.funone_session_cookie.clone();
        acc.fansigo_cookie = self.fansigo_cookie.clone();
        acc.facebook_account = self.facebook_account.clone();
        acc.kktix_account = self.kktix_account.clone();
        acc.fami_account = self.fami_account.clone();
        acc.kham_account = self.kham_account.clone();
        acc.ticket_account = self.ticket_account.clone();
        acc.udn_account = self.udn_account.clone();
        acc.ticketplus_account = self.ticketplus_account.clone();
        acc.cityline_account = self.cityline_account.clone();
        acc.urbtix_account = self.urbtix_account.clone();
        acc.hkticketing_account = self.hkticketing_account.clone();
        acc.facebook_password = self.facebook_password.clone();
        acc.kktix_password = self.kktix_password.clone();
        acc.fami_password = self.fami_password.clone();
        acc.kham_password = self.kham_password.clone();
        acc.ticket_password = self.ticket_password.clone();
        acc.udn_password = self.udn_password.clone();
        acc.ticketplus_password = self.ticketplus_password.clone();
        acc.urbtix_password = self.urbtix_password.clone();
        acc.hkticketing_password = self.hkticketing_password.clone();

        Ok(s)
    }

    /// Current text of a tracked field
    pub fn text(&self, field: FieldId) -> &str {
        match field {
            FieldId::Homepage => &self.homepage,
            FieldId::TicketNumber => &self.ticket_number,
            FieldId::RefreshDatetime => &self.refresh_datetime,
            FieldId::Browser => &self.browser,
            FieldId::WebdriverType => &self.webdriver_type,
            FieldId::TixcraftSid => &self.tixcraft_sid,
            FieldId::Ibonqware => &self.ibonqware,
            FieldId::FunoneSessionCookie => &self.funone_session_cookie,
            FieldId::FansigoCookie => &self.fansigo_cookie,
            FieldId::FacebookAccount => &self.facebook_account,
            FieldId::KktixAccount => &self.kktix_account,
            FieldId::FamiAccount => &self.fami_account,
            FieldId::CitylineAccount => &self.cityline_account,
            FieldId::UrbtixAccount => &self.urbtix_account,
            FieldId::HkticketingAccount => &self.hkticketing_account,
            FieldId::KhamAccount => &self.kham_account,
            FieldId::TicketAccount => &self.ticket_account,
            FieldId::UdnAccount => &self.udn_account,
            FieldId::TicketplusAccount => &self.ticketplus_account,
            FieldId::FacebookPassword => &self.facebook_password,
            FieldId::KktixPassword => &self.kktix_password,
            FieldId::FamiPassword => &self.fami_password,
            FieldId::UrbtixPassword => &self.urbtix_password,
            FieldId::HkticketingPassword => &self.hkticketing_password,
            FieldId::KhamPassword => &self.kham_password,
            FieldId::TicketPassword => &self.ticket_password,
            FieldId::UdnPassword => &self.udn_password,
            FieldId::TicketplusPassword => &self.ticketplus_password,
            FieldId::UserGuessString => &self.user_guess_string,
            FieldId::RemoteUrl => &self.remote_url,
            FieldId::AutoReloadPageInterval => &self.auto_reload_page_interval,
            FieldId::ResetBrowserInterval => &self.reset_browser_interval,
            FieldId::ProxyServerPort => &self.proxy_server_port,
            FieldId::WindowSize => &self.window_size,
            FieldId::IdleKeyword => &self.idle_keyword,
            FieldId::ResumeKeyword => &self.resume_keyword,
            FieldId::IdleKeywordSecond => &self.idle_keyword_second,
            FieldId::ResumeKeywordSecond => &self.resume_keyword_second,
            FieldId::DiscountCode => &self.discount_code,
        }
    }
}

fn keyword_list(display: &str) -> KeywordList {
    KeywordList::from_canonical(&encode_for_storage(display))
}
