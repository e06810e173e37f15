use std::net::SocketAddr;

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub maps_api_key: String,
    pub maps_base_url: String,
    pub maps_request_timeout_secs: u64,
    pub maps_user_agent: String,
    /// Response language passed to the places service; `None` uses the
    /// service default.
    pub maps_language: Option<String>,
    pub detail_timeout_secs: u64,
    pub max_concurrent_details: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("maps_api_key", &"[redacted]")
            .field("maps_base_url", &self.maps_base_url)
            .field("maps_request_timeout_secs", &self.maps_request_timeout_secs)
            .field("maps_user_agent", &self.maps_user_agent)
            .field("maps_language", &self.maps_language)
            .field("detail_timeout_secs", &self.detail_timeout_secs)
            .field("max_concurrent_details", &self.max_concurrent_details)
            .finish()
    }
}
