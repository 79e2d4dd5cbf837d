//! Named fields the editor tracks for unsaved changes

use std::fmt;

/// A leaf field of the settings snapshot, addressed by its form name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    // basic
    Homepage,
    TicketNumber,
    RefreshDatetime,
    Browser,
    WebdriverType,

    // accounts
    TixcraftSid,
    Ibonqware,
    FunoneSessionCookie,
    FansigoCookie,
    FacebookAccount,
    KktixAccount,
    FamiAccount,
    CitylineAccount,
    UrbtixAccount,
    HkticketingAccount,
    KhamAccount,
    TicketAccount,
    UdnAccount,
    TicketplusAccount,
    FacebookPassword,
    KktixPassword,
    FamiPassword,
    UrbtixPassword,
    HkticketingPassword,
    KhamPassword,
    TicketPassword,
    UdnPassword,
    TicketplusPassword,

    // advanced
    UserGuessString,
    RemoteUrl,
    AutoReloadPageInterval,
    ResetBrowserInterval,
    ProxyServerPort,
    WindowSize,
    IdleKeyword,
    ResumeKeyword,
    IdleKeywordSecond,
    ResumeKeywordSecond,
    DiscountCode,
}

impl FieldId {
    pub const ALL: [FieldId; 39] = [
        FieldId::Homepage,
        FieldId::TicketNumber,
        FieldId::RefreshDatetime,
        FieldId::Browser,
        FieldId::WebdriverType,
        FieldId::TixcraftSid,
        FieldId::Ibonqware,
        FieldId::FunoneSessionCookie,
        FieldId::FansigoCookie,
        FieldId::FacebookAccount,
        FieldId::KktixAccount,
        FieldId::FamiAccount,
        FieldId::CitylineAccount,
        FieldId::UrbtixAccount,
        FieldId::HkticketingAccount,
        FieldId::KhamAccount,
        FieldId::TicketAccount,
        FieldId::UdnAccount,
        FieldId::TicketplusAccount,
        FieldId::FacebookPassword,
        FieldId::KktixPassword,
        FieldId::FamiPassword,
        FieldId::UrbtixPassword,
        FieldId::HkticketingPassword,
        FieldId::KhamPassword,
        FieldId::TicketPassword,
        FieldId::UdnPassword,
        FieldId::TicketplusPassword,
        FieldId::UserGuessString,
        FieldId::RemoteUrl,
        FieldId::AutoReloadPageInterval,
        FieldId::ResetBrowserInterval,
        FieldId::ProxyServerPort,
        FieldId::WindowSize,
        FieldId::IdleKeyword,
        FieldId::ResumeKeyword,
        FieldId::IdleKeywordSecond,
        FieldId::ResumeKeywordSecond,
        FieldId::DiscountCode,
    ];

    /// Form/JSON key of the field
    pub fn name(self) -> &'static str {
        match self {
            FieldId::Homepage => "homepage",
            FieldId::TicketNumber => "ticket_number",
            FieldId::RefreshDatetime => "refresh_datetime",
            FieldId::Browser => "browser",
            FieldId::WebdriverType => "webdriver_type",
            FieldId::TixcraftSid => "tixcraft_sid",
            FieldId::Ibonqware => "ibonqware",
            FieldId::FunoneSessionCookie => "funone_session_cookie",
            FieldId::FansigoCookie => "fansigo_cookie",
            FieldId::FacebookAccount => "facebook_account",
            FieldId::KktixAccount => "kktix_account",
            FieldId::FamiAccount => "fami_account",
            FieldId::CitylineAccount => "cityline_account",
            FieldId::UrbtixAccount => "urbtix_account",
            FieldId::HkticketingAccount => "hkticketing_account",
            FieldId::KhamAccount => "kham_account",
            FieldId::TicketAccount => "ticket_account",
            FieldId::UdnAccount => "udn_account",
            FieldId::TicketplusAccount => "ticketplus_account",
            FieldId::FacebookPassword => "facebook_password",
            FieldId::KktixPassword => "kktix_password",
            FieldId::FamiPassword => "fami_password",
            FieldId::UrbtixPassword => "urbtix_password",
            FieldId::HkticketingPassword => "hkticketing_password",
            FieldId::KhamPassword => "kham_password",
            FieldId::TicketPassword => "ticket_password",
            FieldId::UdnPassword => "udn_password",
            FieldId::TicketplusPassword => "ticketplus_password",
            FieldId::UserGuessString => "user_guess_string",
            FieldId::RemoteUrl => "remote_url",
            FieldId::AutoReloadPageInterval => "auto_reload_page_interval",
            FieldId::ResetBrowserInterval => "reset_browser_interval",
            FieldId::ProxyServerPort => "proxy_server_port",
            FieldId::WindowSize => "window_size",
            FieldId::IdleKeyword => "idle_keyword",
            FieldId::ResumeKeyword => "resume_keyword",
            FieldId::IdleKeywordSecond => "idle_keyword_second",
            FieldId::ResumeKeywordSecond => "resume_keyword_second",
            FieldId::DiscountCode => "discount_code",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stored value of a field as read from the snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
    /// Field not present in the stored data
    Missing,
}

impl FieldValue {
    /// String view used for comparisons; absent fields read as empty
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Missing => Some(""),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Option<&String>> for FieldValue {
    fn from(value: Option<&String>) -> Self {
        value.map_or(FieldValue::Missing, |s| FieldValue::Text(s.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = FieldId::ALL.iter().map(|f| f.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FieldId::ALL.len());
    }

    #[test]
    fn test_missing_reads_as_empty_text() {
        assert_eq!(FieldValue::Missing.as_text(), Some(""));
        assert_eq!(FieldValue::Number(2.0).as_text(), None);
    }
}
