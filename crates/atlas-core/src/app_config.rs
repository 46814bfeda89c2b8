use std::net::SocketAddr;

#[derive(Clone)]
pub struct AppConfig {
    pub sanity_project_id: String,
    pub sanity_dataset: String,
    pub sanity_api_version: String,
    pub sanity_token: String,
    pub sanity_use_cdn: bool,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub page_size: u32,
    pub request_timeout_secs: u64,
    pub geocoder_base_url: String,
    pub geocoder_user_agent: String,
    pub geocoder_delay_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("sanity_project_id", &self.sanity_project_id)
            .field("sanity_dataset", &self.sanity_dataset)
            .field("sanity_api_version", &self.sanity_api_version)
            .field("sanity_token", &"[redacted]")
            .field("sanity_use_cdn", &self.sanity_use_cdn)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("page_size", &self.page_size)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("geocoder_base_url", &self.geocoder_base_url)
            .field("geocoder_user_agent", &self.geocoder_user_agent)
            .field("geocoder_delay_ms", &self.geocoder_delay_ms)
            .finish()
    }
}
