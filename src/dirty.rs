//! Unsaved-change detection
//!
//! Each tracked field compares the live form text against the snapshot under
//! one of three equivalence policies. Checks are pure: they read both sides
//! and return a bool, so the editor may run them every frame.

use crate::config::{FieldId, FieldValue, SettingsSnapshot};
use crate::constants::keyword::EMPTY_SENTINEL;
use crate::form::{display_projection, FormState};

/// How a field's current text is matched against its saved value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquivalencePolicy {
    /// Byte-for-byte; absent saved values read as empty
    ExactMatch,
    /// Saved value goes through the same projection the form shows, then
    /// empty and the `""` sentinel count as equal
    EmptyNormalized,
    /// Empty sides become `""`; when the saved text carries quotes the
    /// current text is quote-wrapped before comparing
    QuoteCompensated,
}

pub const BASIC_FIELDS: [FieldId; 5] = [
    FieldId::Homepage,
    FieldId::TicketNumber,
    FieldId::RefreshDatetime,
    FieldId::Browser,
    FieldId::WebdriverType,
];

pub const ACCOUNT_FIELDS: [FieldId; 23] = [
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
];

pub const ADVANCED_FIELDS: [FieldId; 11] = [
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

impl EquivalencePolicy {
    pub fn for_field(field: FieldId) -> Self {
        match field {
            FieldId::Homepage
            | FieldId::TicketNumber
            | FieldId::RefreshDatetime
            | FieldId::Browser
            | FieldId::WebdriverType => EquivalencePolicy::ExactMatch,

            // Editors for these show a projection of the stored text
            FieldId::UserGuessString
            | FieldId::IdleKeyword
            | FieldId::ResumeKeyword
            | FieldId::IdleKeywordSecond
            | FieldId::ResumeKeywordSecond => EquivalencePolicy::EmptyNormalized,

            _ => EquivalencePolicy::QuoteCompensated,
        }
    }
}

fn sentinel_if_empty(text: &str) -> &str {
    if text.is_empty() { EMPTY_SENTINEL } else { text }
}

/// Quote-compensated comparison of a form value against a saved string
pub fn quote_compensated_eq(current: &str, saved: &str) -> bool {
    let saved_has_quote = saved.contains('"');
    let saved = sentinel_if_empty(saved);

    if saved_has_quote && !current.is_empty() && current != EMPTY_SENTINEL {
        format!("\"{current}\"") == saved
    } else {
        sentinel_if_empty(current) == saved
    }
}

/// Whether `current` differs from what the snapshot holds for `field`
pub fn is_dirty(field: FieldId, current: &str, snapshot: &SettingsSnapshot) -> bool {
    let saved = snapshot.field(field);

    match &saved {
        FieldValue::Number(n) => match current.trim().parse::<f64>() {
            Ok(v) => v != *n,
            Err(_) => true,
        },
        FieldValue::Flag(b) => current.trim().parse::<bool>().map_or(true, |v| v != *b),
        FieldValue::Text(_) | FieldValue::Missing => {
            let saved_text = saved.as_text().unwrap_or_default();
            match EquivalencePolicy::for_field(field) {
                EquivalencePolicy::ExactMatch => current != saved_text,
                EquivalencePolicy::QuoteCompensated => !quote_compensated_eq(current, saved_text),
                EquivalencePolicy::EmptyNormalized => {
                    let shown = display_projection(field, &saved);
                    sentinel_if_empty(current) != sentinel_if_empty(&shown)
                }
            }
        }
    }
}

/// Every tracked field whose form value has diverged, in group order
pub fn dirty_fields(form: &FormState, snapshot: &SettingsSnapshot) -> Vec<FieldId> {
    BASIC_FIELDS
        .iter()
        .chain(ACCOUNT_FIELDS.iter())
        .chain(ADVANCED_FIELDS.iter())
        .copied()
        .filter(|&field| is_dirty(field, form.text(field), snapshot))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_pair() -> (FormState, SettingsSnapshot) {
        let mut s = SettingsSnapshot::default();
        s.refresh_remote_url();
        (FormState::from_snapshot(&s), s)
    }

    #[test]
    fn test_groups_cover_every_field_once() {
        let mut all: Vec<FieldId> = BASIC_FIELDS
            .iter()
            .chain(ACCOUNT_FIELDS.iter())
            .chain(ADVANCED_FIELDS.iter())
            .copied()
            .collect();
        assert_eq!(all.len(), FieldId::ALL.len());
        all.dedup();
        for field in FieldId::ALL {
            assert!(all.contains(&field), "{field} not in any group");
        }
    }

    #[test]
    fn test_fresh_form_is_clean() {
        let (form, s) = clean_pair();
        assert!(dirty_fields(&form, &s).is_empty(), "{:?}", dirty_fields(&form, &s));
    }

    #[test]
    fn test_legacy_sentinel_values_load_clean() {
        let s: SettingsSnapshot = serde_json::from_str(
            r#"{"advanced":{"idle_keyword":"\"\"","resume_keyword_second":"\"\"","idle_keyword_second":"\"00\",\"30\"","user_guess_string":"\"A\",\"B\""}}"#,
        )
        .unwrap();
        let form = FormState::from_snapshot(&s);
        assert!(dirty_fields(&form, &s).is_empty(), "{:?}", dirty_fields(&form, &s));
    }

    #[test]
    fn test_quoted_password_with_empty_form_is_dirty() {
        let mut s = SettingsSnapshot::default();
        s.accounts.kktix_password = "\"legacy\"".to_string();
        assert!(is_dirty(FieldId::KktixPassword, "", &s));
    }

    #[test]
    fn test_quoted_password_matches_unquoted_form() {
        let mut s = SettingsSnapshot::default();
        s.accounts.kktix_password = "\"legacy\"".to_string();
        assert!(!is_dirty(FieldId::KktixPassword, "legacy", &s));
        assert!(is_dirty(FieldId::KktixPassword, "other", &s));
    }

    #[test]
    fn test_sentinel_password_with_empty_form_is_clean() {
        let mut s = SettingsSnapshot::default();
        s.accounts.kktix_password = "\"\"".to_string();
        assert!(!is_dirty(FieldId::KktixPassword, "", &s));
        assert!(!is_dirty(FieldId::KktixPassword, "\"\"", &s));
        assert!(is_dirty(FieldId::KktixPassword, "x", &s));
    }

    #[test]
    fn test_symmetry_edit_and_revert() {
        let (mut form, s) = clean_pair();
        form.homepage = "https://tixcraft.com/activity".to_string();
        assert_eq!(dirty_fields(&form, &s), vec![FieldId::Homepage]);
        form.homepage = s.homepage.clone();
        assert!(dirty_fields(&form, &s).is_empty());
    }

    #[test]
    fn test_missing_saved_reads_as_empty() {
        let s = SettingsSnapshot::default();
        assert_eq!(s.field(FieldId::DiscountCode), FieldValue::Missing);
        assert!(!is_dirty(FieldId::DiscountCode, "", &s));
        assert!(is_dirty(FieldId::DiscountCode, "CODE", &s));
    }

    #[test]
    fn test_numeric_fields_compare_by_value() {
        let s = SettingsSnapshot::default();
        assert!(!is_dirty(FieldId::TicketNumber, "2", &s));
        assert!(!is_dirty(FieldId::AutoReloadPageInterval, "5.0", &s));
        assert!(is_dirty(FieldId::TicketNumber, "3", &s));
        assert!(is_dirty(FieldId::TicketNumber, "", &s));
    }

    #[test]
    fn test_remote_url_compensates_quotes() {
        let (mut form, s) = clean_pair();
        assert_eq!(form.remote_url, "http://127.0.0.1:16888/");
        assert!(!is_dirty(FieldId::RemoteUrl, &form.remote_url, &s));
        form.remote_url = "http://127.0.0.1:9999/".to_string();
        assert!(is_dirty(FieldId::RemoteUrl, &form.remote_url, &s));
    }

    #[test]
    fn test_keyword_edit_is_dirty() {
        let (mut form, s) = clean_pair();
        form.user_guess_string = "A;B".to_string();
        assert_eq!(dirty_fields(&form, &s), vec![FieldId::UserGuessString]);
    }

    #[test]
    fn test_quote_compensated_eq_rules() {
        assert!(quote_compensated_eq("", ""));
        assert!(quote_compensated_eq("", "\"\""));
        assert!(quote_compensated_eq("abc", "abc"));
        assert!(quote_compensated_eq("abc", "\"abc\""));
        assert!(!quote_compensated_eq("abc", "abd"));
        assert!(!quote_compensated_eq("", "abc"));
    }
}
