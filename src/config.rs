//! Application configuration.
//!
//! Defaults can be overridden through `ERASER_*` environment variables.

use crate::error::ConfigError;
use reqwest::Url;
use std::time::Duration;

/// Supported image file extensions for the open dialog and dropped files.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Prefix of generated download file names.
pub const DOWNLOAD_FILE_PREFIX: &str = "eraser";

const DEFAULT_ENDPOINT: &str = "https://cutyo-api.alangkun.fun/api/remove-bg";
const DEFAULT_UPLOAD_FIELD: &str = "image";
const DEFAULT_TOAST_MS: u64 = 4000;

/// How the share action hands the result to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareMode {
    /// Put the processed image itself on the clipboard.
    Image,
    /// Only copy the page link.
    Link,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Background-removal endpoint receiving the multipart upload.
    pub endpoint: Url,
    /// Name of the multipart field holding the image bytes.
    pub upload_field: String,
    /// Link copied by the share fallback.
    pub page_url: String,
    pub share_mode: ShareMode,
    pub toast_duration: Duration,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint_raw = lookup("ERASER_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(&endpoint_raw)
            .map_err(|e| ConfigError::InvalidEndpoint(format!("{endpoint_raw}: {e}")))?;

        let upload_field = lookup("ERASER_UPLOAD_FIELD")
            .filter(|field| !field.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_UPLOAD_FIELD.to_string());

        let page_url = lookup("ERASER_PAGE_URL").unwrap_or_else(|| origin_of(&endpoint));

        let share_mode = match lookup("ERASER_SHARE_MODE").as_deref() {
            None | Some("image") => ShareMode::Image,
            Some("link") => ShareMode::Link,
            Some(other) => return Err(ConfigError::InvalidShareMode(other.to_string())),
        };

        let toast_ms = match lookup("ERASER_TOAST_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidDuration(raw.clone()))?,
            None => DEFAULT_TOAST_MS,
        };

        Ok(Self {
            endpoint,
            upload_field,
            page_url,
            share_mode,
            toast_duration: Duration::from_millis(toast_ms),
        })
    }
}

fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.upload_field, "image");
        assert_eq!(config.page_url, "https://cutyo-api.alangkun.fun");
        assert_eq!(config.share_mode, ShareMode::Image);
        assert_eq!(config.toast_duration, Duration::from_millis(4000));
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("ERASER_ENDPOINT", "http://localhost:8080/remove"),
            ("ERASER_UPLOAD_FIELD", "file"),
            ("ERASER_SHARE_MODE", "link"),
            ("ERASER_TOAST_MS", "1500"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint.as_str(), "http://localhost:8080/remove");
        assert_eq!(config.upload_field, "file");
        assert_eq!(config.page_url, "http://localhost:8080");
        assert_eq!(config.share_mode, ShareMode::Link);
        assert_eq!(config.toast_duration, Duration::from_millis(1500));
    }

    #[test]
    fn blank_upload_field_falls_back_to_default() {
        let config = AppConfig::from_lookup(lookup_from(&[("ERASER_UPLOAD_FIELD", "  ")])).unwrap();
        assert_eq!(config.upload_field, "image");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[("ERASER_ENDPOINT", "not a url")])),
            Err(ConfigError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[("ERASER_SHARE_MODE", "airdrop")])),
            Err(ConfigError::InvalidShareMode(_))
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[("ERASER_TOAST_MS", "soon")])),
            Err(ConfigError::InvalidDuration(_))
        ));
    }
}
