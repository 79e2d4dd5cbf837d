//! Application-wide constants
//!
//! This module contains the magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Application root and file names
pub mod config {
    /// Directory under the user's config dir
    pub const APP_DIR: &str = "ticket-settings";

    /// Persisted settings snapshot
    pub const FILENAME: &str = "settings.json";

    /// Marker file whose presence pauses the agent
    pub const IDLE_MARKER_FILE: &str = "MAXBOT_INT28_IDLE.txt";

    /// Last URL visited by the agent
    pub const LAST_URL_FILE: &str = "MAXBOT_LAST_URL.txt";

    /// Verification question detected by the agent
    pub const QUESTION_FILE: &str = "MAXBOT_QUESTION.txt";

    /// Version string reported by the local backend
    pub const APP_VERSION: &str = concat!("TicketSettings (", env!("CARGO_PKG_VERSION"), ")");
}

/// Keyword list encoding
pub mod keyword {
    /// The only user-facing delimiter in display form
    pub const DISPLAY_DELIMITER: char = ';';

    /// Separator between quoted phrases in canonical form
    pub const CANONICAL_SEPARATOR: char = ',';

    /// Two-character stand-in for an empty stored string
    pub const EMPTY_SENTINEL: &str = "\"\"";
}

/// Default values for a freshly generated configuration
pub mod defaults {
    pub const HOMEPAGE: &str = "about:blank";
    pub const BROWSER: &str = "chrome";
    pub const LANGUAGE: &str = "English";
    pub const TICKET_NUMBER: u32 = 2;
    pub const SELECT_ORDER: &str = "random";
    pub const KEYWORD_EXCLUDE: &str =
        "\"輪椅\",\"身障\",\"身心\",\"障礙\",\"Restricted View\",\"燈柱遮蔽\",\"視線不完整\"";
    pub const SOUND_FILENAME: &str = "assets/sounds/ding-dong.wav";
    pub const OCR_IMAGE_SOURCE: &str = "canvas";
    pub const WINDOW_SIZE: &str = "600,1024";
    pub const MAX_DWELL_TIME: u32 = 90;
    pub const AUTO_RELOAD_PAGE_INTERVAL: f64 = 5.0;
    pub const AUTO_RELOAD_OVERHEAT_COUNT: u32 = 4;
    pub const AUTO_RELOAD_OVERHEAT_CD: f64 = 1.0;

    /// Fallback port for the local control server
    pub const SERVER_PORT: u16 = 16888;
}

/// Browser driver identifiers
pub mod webdriver {
    pub const SELENIUM: &str = "selenium";
    pub const UNDETECTED_CHROMEDRIVER: &str = "undetected_chromedriver";
    pub const DRISSION_PAGE: &str = "DrissionPage";
    pub const NODRIVER: &str = "nodriver";

    pub const ALL: [&str; 4] = [SELENIUM, UNDETECTED_CHROMEDRIVER, DRISSION_PAGE, NODRIVER];
}

/// Range checks applied when saving
pub mod validation {
    /// Dwell time below this (but above zero) is raised to it
    pub const MIN_MAX_DWELL_TIME: u32 = 15;

    /// Browser reset interval below this (but above zero) is raised to it
    pub const MIN_RESET_BROWSER_INTERVAL: u32 = 20;

    pub const MIN_SERVER_PORT: u16 = 1024;
    pub const MAX_SERVER_PORT: u16 = 65535;

    /// Refresh intervals under this many seconds trip the rate warning
    pub const TIXCRAFT_MIN_REFRESH_SECONDS: f64 = 8.0;
}

/// Polling cadence for the editor
pub mod polling {
    pub const STATUS_INTERVAL_MS: u64 = 500;
    pub const QUESTION_INTERVAL_MS: u64 = 500;

    /// Transient run/save messages disappear after this long
    pub const MESSAGE_TIMEOUT_MS: u64 = 3000;
}
