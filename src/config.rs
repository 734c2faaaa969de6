use std::path::PathBuf;
use std::time::Duration;

/// Base URL used when neither a flag nor the environment provides one.
pub const DEFAULT_URL: &str = "https://ialirt.dev.imap-mission.com";

/// Environment variable consulted for the base URL.
pub const URL_ENV_VAR: &str = "IALIRT_DATA_ACCESS_URL";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration, resolved once at startup and handed to [`crate::Client::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API root, without a trailing slash.
    pub base_url: String,
    /// Total timeout per request.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_URL.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize(base_url.into()),
            ..Self::default()
        }
    }

    /// Resolve the base URL from an explicit value, then `IALIRT_DATA_ACCESS_URL`,
    /// then [`DEFAULT_URL`].
    pub fn from_env(url: Option<String>) -> Self {
        Self::resolve(url, std::env::var(URL_ENV_VAR).ok())
    }

    /// Same precedence as [`Config::from_env`] with the environment value passed in.
    /// Blank values count as unset.
    pub fn resolve(flag: Option<String>, env: Option<String>) -> Self {
        let base_url = [flag, env]
            .into_iter()
            .flatten()
            .find(|u| !u.trim().is_empty())
            .map(normalize)
            .unwrap_or_else(|| DEFAULT_URL.into());
        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Set the per-request timeout. A zero timeout would fail every request,
    /// so it is ignored and [`DEFAULT_TIMEOUT`] is kept instead.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if timeout.is_zero() {
            log::warn!("ignoring zero timeout, using {}s", DEFAULT_TIMEOUT.as_secs());
            self.timeout = DEFAULT_TIMEOUT;
        } else {
            self.timeout = timeout;
        }
        self
    }
}

fn normalize(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Where downloads land when the caller gives no directory: the platform
/// downloads folder, else `~/Downloads`, else `./Downloads`.
pub fn default_downloads_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("Downloads"))
}
