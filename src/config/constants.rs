//! Configuration constants.
//!
//! This module defines the fixed thresholds of the scoring rules and the
//! defaults used when no settings file or CLI flag overrides them.

// Defaults for a run
/// Number of URLs analyzed in parallel before the next batch starts
pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DB_PATH: &str = "./web_radar.db";
pub const SETTINGS_PATH: &str = "./web_radar.json";
/// Default number of rows returned by history queries
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this in the settings file (`user_agent`).
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Fetch defaults (settings file fallbacks)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Total fetch attempts per URL (initial attempt included)
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 1;

/// Environment variable holding the mobile-friendliness API key
pub const MOBILE_API_KEY_ENV: &str = "WEB_RADAR_MOBILE_API_KEY";
/// Mobile-friendly test endpoint (the API key is appended as `?key=`)
pub const MOBILE_FRIENDLY_ENDPOINT: &str =
    "https://searchconsole.googleapis.com/v1/urlTestingTools/mobileFriendlyTest:run";

// On-page thresholds
pub const TITLE_MIN_LENGTH: usize = 30;
pub const TITLE_MAX_LENGTH: usize = 60;
pub const META_DESCRIPTION_MIN_LENGTH: usize = 150;
pub const META_DESCRIPTION_MAX_LENGTH: usize = 160;
/// Pages whose second fetch takes longer than this are flagged as slow
pub const SLOW_LOAD_THRESHOLD_SECS: f64 = 3.0;
/// Pages heavier than this (raw HTML, UTF-8 bytes) are flagged
pub const MAX_PAGE_SIZE_BYTES: usize = 2_000_000;
/// A copyright year older than `current_year - COPYRIGHT_MAX_AGE_YEARS` is outdated
pub const COPYRIGHT_MAX_AGE_YEARS: i32 = 2;

// Scoring
pub const BASE_SCORE: i32 = 100;
pub const PENALTY_NO_HTTPS: i32 = 15;
pub const PENALTY_TITLE: i32 = 10;
pub const PENALTY_META_DESCRIPTION: i32 = 5;
pub const PENALTY_H1: i32 = 5;
pub const PENALTY_IMAGES_ALT: i32 = 5;
pub const PENALTY_NOT_MOBILE_FRIENDLY: i32 = 15;
pub const PENALTY_SLOW: i32 = 10;
pub const PENALTY_OUTDATED_CMS: i32 = 10;
pub const PENALTY_OUTDATED_COPYRIGHT: i32 = 5;
pub const PENALTY_HEAVY_PAGE: i32 = 5;

// Reporting
/// Results scoring below this are "priority" prospects in reports
pub const PRIORITY_SCORE_THRESHOLD: u8 = 60;
pub const GOOD_SCORE_THRESHOLD: u8 = 80;
