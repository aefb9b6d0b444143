use axum::http::{header, HeaderMap};
use chrono::{DateTime, Duration, Utc};
use crate::config::DEFAULT_SESSION_TTL_SECS;
use rand::Rng;
use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const SESSION_COOKIE: &str = "demo_session";
pub const KEY_RESULTATS: &str = "resultats";
pub const KEY_DATA: &str = "data";

#[derive(Debug, Clone)]
struct SessionEntry {
    items: BTreeMap<String, String>,
    touched: DateTime<Utc>,
}

/// Per-browser-session key/value storage. Lives only in memory.
#[derive(Clone)]
pub struct SessionStore {
    ttl: Duration,
    sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
}

impl SessionStore {
    pub fn new(ttl_secs: i64) -> Self {
        let ttl = Duration::try_seconds(ttl_secs).unwrap_or_else(|| {
            warn!("session ttl of {ttl_secs}s is out of range, using default");
            Duration::seconds(DEFAULT_SESSION_TTL_SECS)
        });
        Self {
            ttl,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn new_id() -> String {
        format!("{:032x}", rand::thread_rng().r#gen::<u128>())
    }

    pub async fn set_item(&self, id: &str, key: &str, value: String) {
        self.set_item_at(Utc::now(), id, key, value).await;
    }

    pub async fn set_item_at(&self, now: DateTime<Utc>, id: &str, key: &str, value: String) {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|existing, entry| existing == id || now - entry.touched <= self.ttl);
        if sessions.len() < before {
            debug!("purged {} expired sessions", before - sessions.len());
        }

        let entry = sessions.entry(id.to_string()).or_insert_with(|| SessionEntry {
            items: BTreeMap::new(),
            touched: now,
        });
        entry.items.insert(key.to_string(), value);
        entry.touched = now;
    }

    pub async fn get_item(&self, id: &str, key: &str) -> Option<String> {
        self.get_item_at(Utc::now(), id, key).await
    }

    pub async fn get_item_at(&self, now: DateTime<Utc>, id: &str, key: &str) -> Option<String> {
        let mut sessions = self.sessions.lock().await;
        let entry = sessions.get_mut(id)?;
        if now - entry.touched > self.ttl {
            sessions.remove(id);
            return None;
        }
        entry.touched = now;
        entry.items.get(key).cloned()
    }

    #[cfg(test)]
    pub(crate) fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    #[cfg(test)]
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Reads the session id out of the `Cookie` request headers.
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// No `Max-Age`, so the browser drops it when the session ends.
pub fn session_cookie(id: &str) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn items_round_trip_within_a_session() {
        let store = SessionStore::new(60);
        store.set_item("abc", KEY_RESULTATS, "{}".into()).await;
        store.set_item("abc", KEY_DATA, "[]".into()).await;

        assert_eq!(store.get_item("abc", KEY_RESULTATS).await.as_deref(), Some("{}"));
        assert_eq!(store.get_item("abc", KEY_DATA).await.as_deref(), Some("[]"));
        assert_eq!(store.get_item("other", KEY_DATA).await, None);
    }

    #[tokio::test]
    async fn idle_sessions_expire() {
        let store = SessionStore::new(60);
        let start = Utc::now();
        store.set_item_at(start, "old", KEY_DATA, "[]".into()).await;

        let later = start + Duration::seconds(61);
        assert_eq!(store.get_item_at(later, "old", KEY_DATA).await, None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn writes_purge_other_expired_sessions() {
        let store = SessionStore::new(60);
        let start = Utc::now();
        store.set_item_at(start, "old", KEY_DATA, "[]".into()).await;
        store
            .set_item_at(start + Duration::seconds(30), "fresh", KEY_DATA, "[]".into())
            .await;
        assert_eq!(store.len().await, 2);

        store
            .set_item_at(start + Duration::seconds(90), "fresh", KEY_RESULTATS, "{}".into())
            .await;
        assert_eq!(store.len().await, 1);
        assert_eq!(
            store
                .get_item_at(start + Duration::seconds(91), "fresh", KEY_DATA)
                .await
                .as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn session_id_is_found_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(
            header::COOKIE,
            HeaderValue::from_static("lang=fr; demo_session=0123abcd ; x=1"),
        );
        assert_eq!(session_id(&headers).as_deref(), Some("0123abcd"));

        let empty = HeaderMap::new();
        assert_eq!(session_id(&empty), None);
    }

    #[test]
    fn huge_ttl_does_not_panic() {
        let store = SessionStore::new(i64::MAX);
        assert_eq!(store.ttl_secs(), DEFAULT_SESSION_TTL_SECS);
    }

    #[test]
    fn ids_are_unique_hex() {
        let a = SessionStore::new_id();
        let b = SessionStore::new_id();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn cookie_has_no_expiry() {
        let cookie = session_cookie("f00");
        assert!(cookie.starts_with("demo_session=f00;"));
        assert!(!cookie.contains("Max-Age"));
        assert!(!cookie.contains("Expires"));
    }
}
