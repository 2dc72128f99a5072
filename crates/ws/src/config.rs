use std::env;

#[derive(Debug, Clone)]
pub struct WsConfig {
    pub url: String,
    pub connect_timeout_secs: u64,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            url: "ws://esp32.local".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

impl WsConfig {
    pub fn from_env() -> Self {
        let mut cfg = WsConfig::default();

        if let Ok(v) = env::var("OPREMOTE_WS_URL") {
            if !v.is_empty() {
                cfg.url = v;
            }
        }
        if let Ok(v) = env::var("OPREMOTE_CONNECT_TIMEOUT_SECS") {
            if let Ok(s) = v.parse::<u64>() {
                cfg.connect_timeout_secs = s;
            }
        }

        cfg
    }
}
