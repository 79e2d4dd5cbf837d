//! Target-site affinity rules and form hints
//!
//! Some ticketing sites only work with a particular driver or need extra
//! options. Each is one row of [`SITE_RULES`]; the editor resolves the
//! homepage against the table instead of matching strings inline.

use crate::constants::{validation, webdriver};

/// Site-specific option group in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteSection {
    Kktix,
    Cityline,
}

impl SiteSection {
    pub fn label(self) -> &'static str {
        match self {
            SiteSection::Kktix => "KKTIX",
            SiteSection::Cityline => "Cityline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteRule {
    /// Second-level domain label, e.g. `kktix` for `kktix.com`
    pub site: &'static str,
    pub forced_webdriver: Option<&'static str>,
    pub sections: &'static [SiteSection],
}

pub const SITE_RULES: [SiteRule; 2] = [
    SiteRule {
        site: "kktix",
        forced_webdriver: None,
        sections: &[SiteSection::Kktix],
    },
    SiteRule {
        site: "cityline",
        forced_webdriver: Some(webdriver::NODRIVER),
        sections: &[SiteSection::Cityline],
    },
];

/// What the homepage implies for the rest of the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteAffinity {
    pub visible_sections: Vec<SiteSection>,
    pub forced_webdriver: Option<&'static str>,
}

impl SiteAffinity {
    pub fn shows(&self, section: SiteSection) -> bool {
        self.visible_sections.contains(&section)
    }
}

/// `needle` occurs somewhere after the first character
fn found_after_start(haystack: &str, needle: &str) -> bool {
    haystack.find(needle).is_some_and(|i| i > 0)
}

impl SiteRule {
    /// Host match used for section visibility: `.site.com/` or `/site.com/`
    fn matches_host(&self, homepage: &str) -> bool {
        let dotted = format!(".{}.com/", self.site);
        let slashed = format!("/{}.com/", self.site);
        found_after_start(homepage, &dotted) || found_after_start(homepage, &slashed)
    }

    /// Looser match used for driver forcing: `site.com` anywhere past the start
    fn mentions_domain(&self, homepage: &str) -> bool {
        found_after_start(homepage, &format!("{}.com", self.site))
    }
}

/// Resolve the homepage against [`SITE_RULES`].
///
/// Returns `None` for an empty homepage, meaning leave the form as it is.
/// When several rules match, the later row decides the visible sections.
pub fn resolve(homepage: &str) -> Option<SiteAffinity> {
    if homepage.is_empty() {
        return None;
    }

    let mut affinity = SiteAffinity::default();
    for rule in &SITE_RULES {
        if rule.matches_host(homepage) {
            affinity.visible_sections = rule.sections.to_vec();
        }
        if let Some(driver) = rule.forced_webdriver {
            if rule.mentions_domain(homepage) {
                affinity.forced_webdriver = Some(driver);
            }
        }
    }
    Some(affinity)
}

const TIXCRAFT_FAMILY: [&str; 3] = ["tixcraft.com", "teamear.com", "indievox.com"];

pub fn is_tixcraft_family(homepage: &str) -> bool {
    TIXCRAFT_FAMILY.iter().any(|domain| homepage.contains(domain))
}

/// Refresh interval short enough to get rate-limited on tixcraft-family sites
pub fn refresh_interval_warning(homepage: &str, interval: &str) -> bool {
    if !is_tixcraft_family(homepage) {
        return false;
    }
    interval
        .trim()
        .parse::<f64>()
        .is_ok_and(|v| v > 0.0 && v < validation::TIXCRAFT_MIN_REFRESH_SECONDS)
}

/// `g.` prefixed values are Google session cookies pasted by mistake
pub fn tixcraft_sid_warning(sid: &str) -> bool {
    sid.trim().starts_with("g.")
}

pub fn cityline_login_hint(account: &str) -> bool {
    !account.trim().is_empty()
}
