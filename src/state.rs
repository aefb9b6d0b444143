use crate::config::Config;
use crate::session::SessionStore;
use crate::upstream::UpstreamClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: SessionStore,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let upstream = UpstreamClient::new(config.upstream_url.clone(), config.upstream_timeout)?;
        Ok(Self {
            sessions: SessionStore::new(config.session_ttl_secs),
            upstream,
            config: Arc::new(config),
        })
    }
}
