//! Settings snapshot: the last loaded or saved configuration
//!
//! Mirrors the JSON object the agent reads. Every section carries
//! `#[serde(default)]` so partial or older files still load, and a flattened
//! `extra` map so keys this editor does not model survive a save.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::config::field::{FieldId, FieldValue};
use crate::constants::{defaults, validation, webdriver};
use crate::keyword::KeywordList;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsSnapshot {
    pub homepage: String,
    pub browser: String,
    pub language: String,
    #[serde(deserialize_with = "lenient::u32_or_zero")]
    pub ticket_number: u32,
    pub refresh_datetime: String,
    pub webdriver_type: String,

    pub date_auto_select: DateAutoSelect,
    pub area_auto_select: AreaAutoSelect,
    pub keyword_exclude: KeywordList,
    pub date_auto_fallback: bool,
    pub area_auto_fallback: bool,

    pub ocr_captcha: OcrCaptcha,
    pub kktix: KktixOptions,
    pub tixcraft: TixcraftOptions,
    pub advanced: Advanced,
    pub accounts: Accounts,
    pub contact: Contact,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateAutoSelect {
    pub enable: bool,
    pub mode: String,
    pub date_keyword: KeywordList,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaAutoSelect {
    pub enable: bool,
    pub mode: String,
    pub area_keyword: KeywordList,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrCaptcha {
    pub enable: bool,
    pub beta: bool,
    pub force_submit: bool,
    pub image_source: String,
    /// Custom OCR model directory
    pub path: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// KKTIX-specific behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KktixOptions {
    pub auto_press_next_step_button: bool,
    pub auto_fill_ticket_number: bool,
    #[serde(deserialize_with = "lenient::u32_or_zero")]
    pub max_dwell_time: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TixcraftOptions {
    pub pass_date_is_sold_out: bool,
    pub auto_reload_coming_soon_page: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaySound {
    pub ticket: bool,
    pub order: bool,
    pub filename: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Advanced {
    pub play_sound: PlaySound,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_webhook_url: Option<String>,

    /// Seconds between page reloads (accepts integer or float)
    #[serde(deserialize_with = "lenient::f64_or_zero", serialize_with = "lenient::whole_as_integer")]
    pub auto_reload_page_interval: f64,
    #[serde(deserialize_with = "lenient::u32_or_zero")]
    pub auto_reload_overheat_count: u32,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub auto_reload_overheat_cd: f64,
    #[serde(deserialize_with = "lenient::u32_or_zero")]
    pub reset_browser_interval: u32,

    /// Local control server port (0 = not set)
    #[serde(deserialize_with = "lenient::u16_or_zero")]
    pub server_port: u16,
    pub proxy_server_port: String,
    pub window_size: String,

    pub chrome_extension: bool,
    pub disable_adjacent_seat: bool,
    pub hide_some_image: bool,
    pub block_facebook_network: bool,
    pub headless: bool,
    pub verbose: bool,

    pub auto_guess_options: bool,
    pub user_guess_string: KeywordList,

    /// Quoted list element, e.g. `"http://127.0.0.1:16888/"`
    pub remote_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,

    // Runtime pause/resume triggers, matched against the wall clock
    pub idle_keyword: String,
    pub resume_keyword: String,
    pub idle_keyword_second: String,
    pub resume_keyword_second: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Accounts {
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
    pub urbtix_password: String,
    pub hkticketing_password: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub real_name: String,
    pub phone: String,
    pub credit_card_prefix: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Self {
            homepage: defaults::HOMEPAGE.to_string(),
            browser: defaults::BROWSER.to_string(),
            language: defaults::LANGUAGE.to_string(),
            ticket_number: defaults::TICKET_NUMBER,
            refresh_datetime: String::new(),
            webdriver_type: webdriver::NODRIVER.to_string(),
            date_auto_select: DateAutoSelect::default(),
            area_auto_select: AreaAutoSelect::default(),
            keyword_exclude: KeywordList::from_canonical(defaults::KEYWORD_EXCLUDE),
            date_auto_fallback: false,
            area_auto_fallback: false,
            ocr_captcha: OcrCaptcha::default(),
            kktix: KktixOptions::default(),
            tixcraft: TixcraftOptions::default(),
            advanced: Advanced::default(),
            accounts: Accounts::default(),
            contact: Contact::default(),
            extra: Map::new(),
        }
    }
}

impl Default for DateAutoSelect {
    fn default() -> Self {
        Self {
            enable: true,
            mode: defaults::SELECT_ORDER.to_string(),
            date_keyword: KeywordList::default(),
            extra: Map::new(),
        }
    }
}

impl Default for AreaAutoSelect {
    fn default() -> Self {
        Self {
            enable: true,
            mode: defaults::SELECT_ORDER.to_string(),
            area_keyword: KeywordList::default(),
            extra: Map::new(),
        }
    }
}

impl Default for OcrCaptcha {
    fn default() -> Self {
        Self {
            enable: true,
            beta: true,
            force_submit: true,
            image_source: defaults::OCR_IMAGE_SOURCE.to_string(),
            path: String::new(),
            extra: Map::new(),
        }
    }
}

impl Default for KktixOptions {
    fn default() -> Self {
        Self {
            auto_press_next_step_button: true,
            auto_fill_ticket_number: true,
            max_dwell_time: defaults::MAX_DWELL_TIME,
            extra: Map::new(),
        }
    }
}

impl Default for TixcraftOptions {
    fn default() -> Self {
        Self {
            pass_date_is_sold_out: true,
            auto_reload_coming_soon_page: true,
            extra: Map::new(),
        }
    }
}

impl Default for PlaySound {
    fn default() -> Self {
        Self {
            ticket: true,
            order: true,
            filename: defaults::SOUND_FILENAME.to_string(),
            extra: Map::new(),
        }
    }
}

impl Default for Advanced {
    fn default() -> Self {
        Self {
            play_sound: PlaySound::default(),
            discord_webhook_url: None,
            auto_reload_page_interval: defaults::AUTO_RELOAD_PAGE_INTERVAL,
            auto_reload_overheat_count: defaults::AUTO_RELOAD_OVERHEAT_COUNT,
            auto_reload_overheat_cd: defaults::AUTO_RELOAD_OVERHEAT_CD,
            reset_browser_interval: 0,
            server_port: defaults::SERVER_PORT,
            proxy_server_port: String::new(),
            window_size: defaults::WINDOW_SIZE.to_string(),
            chrome_extension: true,
            disable_adjacent_seat: false,
            hide_some_image: false,
            block_facebook_network: false,
            headless: false,
            verbose: false,
            auto_guess_options: false,
            user_guess_string: KeywordList::default(),
            remote_url: String::new(),
            discount_code: None,
            idle_keyword: String::new(),
            resume_keyword: String::new(),
            idle_keyword_second: String::new(),
            resume_keyword_second: String::new(),
            extra: Map::new(),
        }
    }
}

impl SettingsSnapshot {
    /// Stored value of a tracked field.
    ///
    /// Keyword lists are returned in canonical form since that is what the
    /// backend holds for them.
    pub fn field(&self, id: FieldId) -> FieldValue {
        let a = &self.accounts;
        let adv = &self.advanced;
        match id {
            FieldId::Homepage => self.homepage.as_str().into(),
            FieldId::TicketNumber => FieldValue::Number(f64::from(self.ticket_number)),
            FieldId::RefreshDatetime => self.refresh_datetime.as_str().into(),
            FieldId::Browser => self.browser.as_str().into(),
            FieldId::WebdriverType => self.webdriver_type.as_str().into(),

            FieldId::TixcraftSid => a.tixcraft_sid.as_str().into(),
            FieldId::Ibonqware => a.ibonqware.as_str().into(),
            FieldId::FunoneSessionCookie => a.funone_session_cookie.as_str().into(),
            FieldId::FansigoCookie => a.fansigo_cookie.as_str().into(),
            FieldId::FacebookAccount => a.facebook_account.as_str().into(),
            FieldId::KktixAccount => a.kktix_account.as_str().into(),
            FieldId::FamiAccount => a.fami_account.as_str().into(),
            FieldId::CitylineAccount => a.cityline_account.as_str().into(),
            FieldId::UrbtixAccount => a.urbtix_account.as_str().into(),
            FieldId::HkticketingAccount => a.hkticketing_account.as_str().into(),
            FieldId::KhamAccount => a.kham_account.as_str().into(),
            FieldId::TicketAccount => a.ticket_account.as_str().into(),
            FieldId::UdnAccount => a.udn_account.as_str().into(),
            FieldId::TicketplusAccount => a.ticketplus_account.as_str().into(),
            FieldId::FacebookPassword => a.facebook_password.as_str().into(),
            FieldId::KktixPassword => a.kktix_password.as_str().into(),
            FieldId::FamiPassword => a.fami_password.as_str().into(),
            FieldId::UrbtixPassword => a.urbtix_password.as_str().into(),
            FieldId::HkticketingPassword => a.hkticketing_password.as_str().into(),
            FieldId::KhamPassword => a.kham_password.as_str().into(),
            FieldId::TicketPassword => a.ticket_password.as_str().into(),
            FieldId::UdnPassword => a.udn_password.as_str().into(),
            FieldId::TicketplusPassword => a.ticketplus_password.as_str().into(),

            FieldId::UserGuessString => adv.user_guess_string.to_canonical().into(),
            FieldId::RemoteUrl => adv.remote_url.as_str().into(),
            FieldId::AutoReloadPageInterval => FieldValue::Number(adv.auto_reload_page_interval),
            FieldId::ResetBrowserInterval => FieldValue::Number(f64::from(adv.reset_browser_interval)),
            FieldId::ProxyServerPort => adv.proxy_server_port.as_str().into(),
            FieldId::WindowSize => adv.window_size.as_str().into(),
            FieldId::IdleKeyword => adv.idle_keyword.as_str().into(),
            FieldId::ResumeKeyword => adv.resume_keyword.as_str().into(),
            FieldId::IdleKeywordSecond => adv.idle_keyword_second.as_str().into(),
            FieldId::ResumeKeywordSecond => adv.resume_keyword_second.as_str().into(),
            FieldId::DiscountCode => adv.discount_code.as_ref().into(),
        }
    }

    /// Bring an older settings file up to the current layout.
    /// Returns the names of the keys that were moved or filled.
    pub fn migrate(&mut self) -> Vec<String> {
        let mut changed = Vec::new();

        // OCR model path used to live under advanced
        if let Some(legacy) = self.advanced.extra.remove("ocr_model_path") {
            if self.ocr_captcha.path.is_empty() {
                if let Some(path) = legacy.as_str() {
                    self.ocr_captcha.path = path.to_string();
                }
            }
            changed.push("ocr_captcha.path".to_string());
        }

        if self.advanced.server_port == 0 {
            self.advanced.server_port = defaults::SERVER_PORT;
            changed.push("advanced.server_port".to_string());
        }

        if !changed.is_empty() {
            info!(keys = ?changed, "Migrated legacy settings keys");
        }
        changed
    }

    /// Validated control-server port; out-of-range values use the default
    pub fn server_port(&self) -> u16 {
        let port = self.advanced.server_port;
        if (validation::MIN_SERVER_PORT..=validation::MAX_SERVER_PORT).contains(&port) {
            port
        } else {
            warn!(server_port = port, using = defaults::SERVER_PORT, "Invalid server_port, using default");
            defaults::SERVER_PORT
        }
    }

    /// Rebuild `remote_url` from the validated server port
    pub fn refresh_remote_url(&mut self) {
        self.advanced.remote_url = format!("\"http://127.0.0.1:{}/\"", self.server_port());
    }

    /// Clamp values the agent cannot work with. Called before every write.
    pub fn normalize_for_save(&mut self) {
        let dwell = self.kktix.max_dwell_time;
        if dwell > 0 && dwell < validation::MIN_MAX_DWELL_TIME {
            warn!(max_dwell_time = dwell, min = validation::MIN_MAX_DWELL_TIME, "max_dwell_time below minimum, clamping");
            self.kktix.max_dwell_time = validation::MIN_MAX_DWELL_TIME;
        }

        let reset = self.advanced.reset_browser_interval;
        if reset > 0 && reset < validation::MIN_RESET_BROWSER_INTERVAL {
            warn!(reset_browser_interval = reset, min = validation::MIN_RESET_BROWSER_INTERVAL, "reset_browser_interval below minimum, clamping");
            self.advanced.reset_browser_interval = validation::MIN_RESET_BROWSER_INTERVAL;
        }

        // Cloudflare on cityline only lets nodriver through
        if self.homepage.contains(".cityline.com") && self.webdriver_type != webdriver::NODRIVER {
            warn!(homepage = %self.homepage, "cityline homepage requires nodriver, overriding webdriver_type");
            self.webdriver_type = webdriver::NODRIVER.to_string();
        }
    }
}

/// Tolerant number parsing for values older editors wrote as strings
mod lenient {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Int(i64),
        Float(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    fn loose_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(match Loose::deserialize(deserializer)? {
            Loose::Int(i) => i as f64,
            Loose::Float(f) => f,
            Loose::Text(s) => s.trim().parse().unwrap_or(0.0),
            Loose::Other(_) => 0.0,
        })
    }

    pub fn f64_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = loose_f64(deserializer)?;
        Ok(if value.is_finite() { value } else { 0.0 })
    }

    pub fn u32_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let value = loose_f64(deserializer)?;
        Ok(if value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX) {
            value as u32
        } else {
            0
        })
    }

    pub fn u16_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
        let value = loose_f64(deserializer)?;
        Ok(if value.is_finite() && value >= 0.0 && value <= f64::from(u16::MAX) {
            value as u16
        } else {
            0
        })
    }

    /// Writes whole numbers without a decimal point
    pub fn whole_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            serializer.serialize_i64(*value as i64)
        } else {
            serializer.serialize_f64(*value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_fresh_config() {
        let s = SettingsSnapshot::default();
        assert_eq!(s.homepage, "about:blank");
        assert_eq!(s.ticket_number, 2);
        assert_eq!(s.webdriver_type, "nodriver");
        assert_eq!(s.kktix.max_dwell_time, 90);
        assert_eq!(s.advanced.server_port, 16888);
        assert_eq!(s.advanced.window_size, "600,1024");
        assert_eq!(s.keyword_exclude.to_display().split(';').count(), 7);
        assert_eq!(s.keyword_exclude.to_display().split(';').nth(4), Some("Restricted View"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: SettingsSnapshot = serde_json::from_str(r#"{"homepage":"https://kktix.com/","advanced":{"verbose":true}}"#).unwrap();
        assert_eq!(s.homepage, "https://kktix.com/");
        assert!(s.advanced.verbose);
        assert_eq!(s.advanced.window_size, "600,1024");
        assert_eq!(s.ticket_number, 2);
    }

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let s: SettingsSnapshot =
            serde_json::from_str(r#"{"cityline":{"x":1},"kktix":{"future_flag":true}}"#).unwrap();
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["cityline"]["x"], 1);
        assert_eq!(json["kktix"]["future_flag"], true);
    }

    #[test]
    fn test_keyword_fields_stored_canonical() {
        let s: SettingsSnapshot =
            serde_json::from_str(r#"{"date_auto_select":{"date_keyword":"\"AA BB\",\"CC\""}}"#).unwrap();
        assert_eq!(s.date_auto_select.date_keyword.to_display(), "AA BB;CC");
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["date_auto_select"]["date_keyword"], "\"AA BB\",\"CC\"");
    }

    #[test]
    fn test_lenient_numbers() {
        let s: SettingsSnapshot = serde_json::from_str(
            r#"{"ticket_number":"3","advanced":{"auto_reload_page_interval":"1.5","server_port":null,"reset_browser_interval":30.0}}"#,
        )
        .unwrap();
        assert_eq!(s.ticket_number, 3);
        assert_eq!(s.advanced.auto_reload_page_interval, 1.5);
        assert_eq!(s.advanced.server_port, 0);
        assert_eq!(s.advanced.reset_browser_interval, 30);
    }

    #[test]
    fn test_whole_interval_serialized_as_integer() {
        let s = SettingsSnapshot::default();
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"auto_reload_page_interval\":5,"));
    }

    #[test]
    fn test_migrate_moves_ocr_model_path() {
        let mut s: SettingsSnapshot =
            serde_json::from_str(r#"{"advanced":{"ocr_model_path":"/models/x"}}"#).unwrap();
        let changed = s.migrate();
        assert_eq!(s.ocr_captcha.path, "/models/x");
        assert!(!s.advanced.extra.contains_key("ocr_model_path"));
        assert!(changed.contains(&"ocr_captcha.path".to_string()));
    }

    #[test]
    fn test_migrate_keeps_existing_ocr_path() {
        let mut s: SettingsSnapshot = serde_json::from_str(
            r#"{"ocr_captcha":{"path":"/new"},"advanced":{"ocr_model_path":"/old"}}"#,
        )
        .unwrap();
        s.migrate();
        assert_eq!(s.ocr_captcha.path, "/new");
        assert!(!s.advanced.extra.contains_key("ocr_model_path"));
    }

    #[test]
    fn test_migrate_fills_server_port() {
        let mut s: SettingsSnapshot = serde_json::from_str(r#"{"advanced":{"server_port":0}}"#).unwrap();
        s.migrate();
        assert_eq!(s.advanced.server_port, 16888);
    }

    #[test]
    fn test_migrate_leaves_advanced_credentials_alone() {
        // Encoded password under advanced, plaintext one already in accounts
        let mut s: SettingsSnapshot = serde_json::from_str(
            r#"{"advanced":{"kktix_password":"Q0JFQ0Q=","fami_password":"keepme"},"accounts":{"fami_password":"current"}}"#,
        )
        .unwrap();
        let changed = s.migrate();

        assert!(changed.iter().all(|k| !k.starts_with("accounts.")));
        assert_eq!(s.accounts.kktix_password, "");
        assert_eq!(s.accounts.fami_password, "current");
        assert_eq!(s.advanced.extra["kktix_password"], "Q0JFQ0Q=");
        assert_eq!(s.advanced.extra["fami_password"], "keepme");

        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["advanced"]["kktix_password"], "Q0JFQ0Q=");
        assert_eq!(json["advanced"]["fami_password"], "keepme");
    }

    #[test]
    fn test_unknown_sound_and_contact_keys_survive_round_trip() {
        let s: SettingsSnapshot = serde_json::from_str(
            r#"{"advanced":{"play_sound":{"ticket":false,"volume":3}},"contact":{"real_name":"A","email":"a@b.c"}}"#,
        )
        .unwrap();
        assert!(!s.advanced.play_sound.ticket);
        assert_eq!(s.contact.real_name, "A");

        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["advanced"]["play_sound"]["volume"], 3);
        assert_eq!(json["contact"]["email"], "a@b.c");
    }

    #[test]
    fn test_migrate_noop_on_current_layout() {
        let mut s = SettingsSnapshot::default();
        assert!(s.migrate().is_empty());
    }

    #[test]
    fn test_normalize_clamps_minimums() {
        let mut s = SettingsSnapshot::default();
        s.kktix.max_dwell_time = 5;
        s.advanced.reset_browser_interval = 10;
        s.normalize_for_save();
        assert_eq!(s.kktix.max_dwell_time, 15);
        assert_eq!(s.advanced.reset_browser_interval, 20);

        // Zero means disabled and is left alone
        s.kktix.max_dwell_time = 0;
        s.advanced.reset_browser_interval = 0;
        s.normalize_for_save();
        assert_eq!(s.kktix.max_dwell_time, 0);
        assert_eq!(s.advanced.reset_browser_interval, 0);
    }

    #[test]
    fn test_normalize_forces_nodriver_for_cityline() {
        let mut s = SettingsSnapshot::default();
        s.homepage = "https://shows.cityline.com/event/123".to_string();
        s.webdriver_type = "selenium".to_string();
        s.normalize_for_save();
        assert_eq!(s.webdriver_type, "nodriver");
    }

    #[test]
    fn test_remote_url_uses_valid_port() {
        let mut s = SettingsSnapshot::default();
        s.advanced.server_port = 80;
        s.refresh_remote_url();
        assert_eq!(s.advanced.remote_url, "\"http://127.0.0.1:16888/\"");

        s.advanced.server_port = 20000;
        s.refresh_remote_url();
        assert_eq!(s.advanced.remote_url, "\"http://127.0.0.1:20000/\"");
    }

    #[test]
    fn test_field_reads_missing_optional_as_missing() {
        let s = SettingsSnapshot::default();
        assert_eq!(s.field(FieldId::DiscountCode), FieldValue::Missing);
        assert_eq!(s.field(FieldId::TicketNumber), FieldValue::Number(2.0));
        assert_eq!(s.field(FieldId::WindowSize), FieldValue::Text("600,1024".to_string()));
    }
}
