use chrono::TimeDelta;
use std::{env, str::FromStr, time::Duration};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_UPSTREAM_URL: &str = "http://127.0.0.1:5000/upload";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
pub const DEFAULT_SESSION_TTL_SECS: i64 = 3600;

/// Delay before an inline message fades out on the upload page.
pub const MESSAGE_DISMISS_MS: u64 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub upstream_url: String,
    pub upstream_timeout: Duration,
    pub max_upload_bytes: usize,
    pub session_ttl_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let upstream_url = lookup("UPSTREAM_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());

        Self {
            port: parse_or("PORT", lookup("PORT"), DEFAULT_PORT),
            upstream_url,
            upstream_timeout: Duration::from_secs(parse_or(
                "UPSTREAM_TIMEOUT_SECS",
                lookup("UPSTREAM_TIMEOUT_SECS"),
                DEFAULT_UPSTREAM_TIMEOUT_SECS,
            )),
            max_upload_bytes: parse_or(
                "MAX_UPLOAD_BYTES",
                lookup("MAX_UPLOAD_BYTES"),
                DEFAULT_MAX_UPLOAD_BYTES,
            ),
            session_ttl_secs: session_ttl(lookup("SESSION_TTL_SECS")),
        }
    }
}

fn session_ttl(raw: Option<String>) -> i64 {
    let secs = parse_or("SESSION_TTL_SECS", raw, DEFAULT_SESSION_TTL_SECS).max(1);
    if TimeDelta::try_seconds(secs).is_none() {
        warn!("SESSION_TTL_SECS={secs} is out of range, using default");
        return DEFAULT_SESSION_TTL_SECS;
    }
    secs
}

fn parse_or<T: FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("ignoring invalid {key}={value:?}, using default");
                default
            }
        },
    }
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
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
        assert_eq!(config.upstream_timeout, Duration::from_secs(30));
    }

    #[test]
    fn reads_values_and_ignores_garbage() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9090"),
            ("UPSTREAM_URL", " http://backend:5000/upload "),
            ("MAX_UPLOAD_BYTES", "lots"),
            ("SESSION_TTL_SECS", "0"),
        ]));
        assert_eq!(config.port, 9090);
        assert_eq!(config.upstream_url, "http://backend:5000/upload");
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.session_ttl_secs, 1);
    }

    #[test]
    fn out_of_range_ttl_falls_back_to_default() {
        let config = Config::from_lookup(lookup_from(&[("SESSION_TTL_SECS", "99999999999999999")]));
        assert_eq!(config.session_ttl_secs, DEFAULT_SESSION_TTL_SECS);

        let store = crate::session::SessionStore::new(config.session_ttl_secs);
        assert_eq!(store.ttl_secs(), DEFAULT_SESSION_TTL_SECS);
    }
}
