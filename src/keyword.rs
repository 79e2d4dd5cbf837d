//! Keyword list encoding between storage and editor
//!
//! Stored (canonical) form is a comma-joined run of double-quoted phrases:
//! `"AA BB","CC","DD"`. The editor shows the same list semicolon-joined with no
//! quoting: `AA BB;CC;DD`. An empty list is the empty string in both forms.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::keyword::{CANONICAL_SEPARATOR, DISPLAY_DELIMITER};

const QUOTES: [char; 2] = ['"', '\''];

/// Convert a canonical keyword string into its display form.
///
/// Both `","` and `','` phrase boundaries become `;`, then every remaining
/// quote character is dropped. Input that is not well formed (unbalanced
/// quotes, bare text) passes through as one opaque phrase minus its quotes.
pub fn decode_for_display(canonical: &str) -> String {
    if canonical.is_empty() {
        return String::new();
    }

    canonical
        .replace("\",\"", "\";\"")
        .replace("','", "';'")
        .replace(&QUOTES[..], "")
}

/// Convert an edited display string into canonical form.
///
/// Stray quotes left over from older stored values are removed first.
/// Semicolons are the only delimiter, so commas inside a phrase survive.
/// A lone phrase is still quoted; a blank input encodes to the empty list.
pub fn encode_for_storage(display: &str) -> String {
    let stripped = display.replace(&QUOTES[..], "");

    if stripped.contains(DISPLAY_DELIMITER) {
        let phrases: Vec<&str> = stripped
            .split(DISPLAY_DELIMITER)
            .map(str::trim)
            .filter(|phrase| !phrase.is_empty())
            .collect();
        join_quoted(&phrases)
    } else {
        let phrase = stripped.trim();
        if phrase.is_empty() {
            String::new()
        } else {
            format!("\"{phrase}\"")
        }
    }
}

fn join_quoted<S: AsRef<str>>(phrases: &[S]) -> String {
    phrases
        .iter()
        .map(|phrase| format!("\"{}\"", phrase.as_ref()))
        .collect::<Vec<_>>()
        .join(&CANONICAL_SEPARATOR.to_string())
}

/// Ordered list of keyword phrases.
///
/// Serialized as the canonical string so the on-disk shape is unchanged;
/// everything in between works with the phrases directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordList(Vec<String>);

impl KeywordList {
    pub fn from_canonical(canonical: &str) -> Self {
        Self::from_display(&decode_for_display(canonical))
    }

    pub fn from_display(display: &str) -> Self {
        Self(
            display
                .replace(&QUOTES[..], "")
                .split(DISPLAY_DELIMITER)
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn to_canonical(&self) -> String {
        join_quoted(&self.0)
    }

    pub fn to_display(&self) -> String {
        self.0.join(&DISPLAY_DELIMITER.to_string())
    }

}

impl Serialize for KeywordList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_canonical())
    }
}

impl<'de> Deserialize<'de> for KeywordList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Older files occasionally carry null here
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| Self::from_canonical(&s)).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_both_ways() {
        assert_eq!(decode_for_display(""), "");
        assert_eq!(encode_for_storage(""), "");
    }

    #[test]
    fn test_decode_multiple_phrases() {
        assert_eq!(decode_for_display(r#""AA BB","CC","DD""#), "AA BB;CC;DD");
    }

    #[test]
    fn test_decode_single_quoted_boundaries_all_replaced() {
        assert_eq!(decode_for_display("'AA','BB','CC'"), "AA;BB;CC");
    }

    #[test]
    fn test_decode_unbalanced_quotes_is_one_phrase() {
        assert_eq!(decode_for_display(r#""AA BB,CC"#), "AA BB,CC");
        assert_eq!(decode_for_display("plain"), "plain");
    }

    #[test]
    fn test_decode_sentinel_renders_empty() {
        assert_eq!(decode_for_display("\"\""), "");
    }

    #[test]
    fn test_encode_single_phrase_is_quoted() {
        assert_eq!(encode_for_storage("solo"), "\"solo\"");
        assert_eq!(encode_for_storage("  solo  "), "\"solo\"");
    }

    #[test]
    fn test_encode_semicolons_trim_and_drop_empty() {
        assert_eq!(encode_for_storage(" AA BB ; ;CC;DD; "), r#""AA BB","CC","DD""#);
        assert_eq!(encode_for_storage(";;"), "");
    }

    #[test]
    fn test_encode_keeps_commas_inside_phrase() {
        assert_eq!(encode_for_storage("1,000;VIP"), r#""1,000","VIP""#);
        assert_eq!(encode_for_storage("A,B"), r#""A,B""#);
    }

    #[test]
    fn test_encode_strips_leftover_quotes() {
        assert_eq!(encode_for_storage(r#""AA";'BB'"#), r#""AA","BB""#);
        assert_eq!(encode_for_storage("\"\""), "");
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let phrases = ["zeta", "alpha beta", "中文", "x,y"];
        let display = phrases.join(";");
        assert_eq!(decode_for_display(&encode_for_storage(&display)), display);
    }

    #[test]
    fn test_reencode_of_canonical_is_equivalent() {
        let canonical = r#""AA BB","CC","DD""#;
        let again = encode_for_storage(&decode_for_display(canonical));
        assert_eq!(again, canonical);

        let single_quoted = "'AA','BB'";
        let again = encode_for_storage(&decode_for_display(single_quoted));
        assert_eq!(again, r#""AA","BB""#);
    }

    #[test]
    fn test_keyword_list_from_canonical() {
        let list = KeywordList::from_canonical(r#""AA BB","CC""#);
        assert_eq!(list, KeywordList(vec!["AA BB".to_string(), "CC".to_string()]));
        assert_eq!(list.to_display(), "AA BB;CC");
        assert_eq!(list.to_canonical(), r#""AA BB","CC""#);
    }

    #[test]
    fn test_keyword_list_empty() {
        let list = KeywordList::from_canonical("");
        assert_eq!(list, KeywordList::default());
        assert_eq!(list.to_canonical(), "");
        assert_eq!(list.to_display(), "");
    }

    #[test]
    fn test_keyword_list_serde_uses_canonical_string() {
        let list = KeywordList::from_display("AA BB;CC;DD");
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#""\"AA BB\",\"CC\",\"DD\"""#);

        let back: KeywordList = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);

        let null: KeywordList = serde_json::from_str("null").unwrap();
        assert_eq!(null, KeywordList::default());
    }
}
