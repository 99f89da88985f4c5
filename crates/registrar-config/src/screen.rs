use registrar_core::pagination::{DEFAULT_PAGE_SIZE, snap_page_size};
use std::env;

/// Feature flags for the student screen.
///
/// One screen component covers every variant: the search box and the
/// accept/reject workflow are switched on or off here.
///
/// # Environment Variables
///
/// - `REGISTRAR_SEARCH_ENABLED`: Show the name search box (default: `true`)
/// - `REGISTRAR_STATUS_WORKFLOW`: Offer accept/reject row actions (default: `true`)
/// - `REGISTRAR_PAGE_SIZE`: Initial rows per page, snapped to 5/10/20/50 (default: `5`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreenConfig {
    pub search_enabled: bool,
    pub status_workflow_enabled: bool,
    pub page_size: usize,
}

impl ScreenConfig {
    pub fn from_env() -> Self {
        Self {
            search_enabled: env_flag("REGISTRAR_SEARCH_ENABLED", true),
            status_workflow_enabled: env_flag("REGISTRAR_STATUS_WORKFLOW", true),
            page_size: env::var("REGISTRAR_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(snap_page_size)
                .unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            search_enabled: true,
            status_workflow_enabled: true,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_default_screen_config() {
        let config = ScreenConfig::default();
        assert!(config.search_enabled);
        assert!(config.status_workflow_enabled);
        assert_eq!(config.page_size, 5);
    }
}
