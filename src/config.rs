// src/config.rs
use crate::pipeline::PAGE_SIZE;
use crate::utils::{get_env_bool, get_env_parsed, get_env_with_default};
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Settings read from workflow environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backend_url: String,
    pub request_timeout: Duration,
    pub num_products: u32,
    pub page_size: usize,
    pub offline_mode: bool,
    pub mock_delay: Duration,
    pub show_score: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            num_products: 50,
            page_size: PAGE_SIZE,
            offline_mode: false,
            mock_delay: Duration::from_millis(2000),
            show_score: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();

        let config = Config {
            backend_url: get_env_with_default("backend_url", &defaults.backend_url),
            request_timeout: Duration::from_secs(get_env_parsed(
                "request_timeout_secs",
                defaults.request_timeout.as_secs(),
            )),
            num_products: get_env_parsed("num_products", defaults.num_products).max(1),
            page_size: get_env_parsed("page_size", defaults.page_size).max(1),
            offline_mode: get_env_bool("offline_mode", defaults.offline_mode),
            mock_delay: Duration::from_millis(get_env_parsed(
                "mock_delay_ms",
                defaults.mock_delay.as_millis() as u64,
            )),
            show_score: get_env_bool("show_score", defaults.show_score),
        };

        log::trace!("Loaded configuration: {:?}", config);
        config
    }
}
