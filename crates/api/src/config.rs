use chrono_tz::Tz;
use tablehost_core::api_keys::hash_api_key;
use tablehost_core::time::parse_timezone;

/// Server configuration loaded from environment variables.
///
/// Everything except `API_KEY` has a default suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// SHA-256 hex digest of the shared API key. The plaintext is not kept.
    pub api_key_hash: String,
    /// Time zone that defines "today" for every date rule.
    pub timezone: Tz,
    /// Media API settings; `None` disables uploads.
    pub media: Option<MediaConfig>,
}

/// Where uploaded images are forwarded.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub upload_url: String,
    pub api_key: Option<String>,
    pub upload_preset: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `API_KEY`              | required                   |
    /// | `RESTAURANT_TIMEZONE`  | `UTC`                      |
    /// | `MEDIA_UPLOAD_URL`     | unset (uploads disabled)   |
    /// | `MEDIA_API_KEY`        | unset                      |
    /// | `MEDIA_UPLOAD_PRESET`  | unset                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let api_key = std::env::var("API_KEY").expect("API_KEY must be set");
        assert!(!api_key.trim().is_empty(), "API_KEY must not be empty");

        let timezone = parse_timezone(
            &std::env::var("RESTAURANT_TIMEZONE").unwrap_or_else(|_| "UTC".into()),
        )
        .expect("RESTAURANT_TIMEZONE must be an IANA time zone name");

        let media = std::env::var("MEDIA_UPLOAD_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(|upload_url| MediaConfig {
                upload_url,
                api_key: std::env::var("MEDIA_API_KEY").ok(),
                upload_preset: std::env::var("MEDIA_UPLOAD_PRESET").ok(),
            });

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            api_key_hash: hash_api_key(api_key.trim()),
            timezone,
            media,
        }
    }
}
