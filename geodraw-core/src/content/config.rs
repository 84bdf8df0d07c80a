// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration for remote content loading

use std::time::Duration;

/// Configuration for the HTTP side of content loading
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// HTTP timeout for fetches
    pub timeout: Duration,

    /// Maximum document size (bytes)
    pub max_content_size: u64,

    /// Proxy URL (e.g. "socks5://127.0.0.1:9050")
    pub proxy_url: Option<String>,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_content_size: 16 * 1024 * 1024, // 16 MB
            proxy_url: None,
            user_agent: format!(
                "geodraw/{}",
                option_env!("CARGO_PKG_VERSION").unwrap_or("0.1.0")
            ),
        }
    }
}

impl ContentConfig {
    /// Load configuration from environment variables over the defaults
    ///
    /// Reads `GEODRAW_TIMEOUT_SECS`, `GEODRAW_MAX_CONTENT_SIZE` and
    /// `GEODRAW_PROXY_URL`. Unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(secs) = lookup("GEODRAW_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(size) = lookup("GEODRAW_MAX_CONTENT_SIZE").and_then(|v| v.parse().ok()) {
            config.max_content_size = size;
        }
        if let Some(proxy) = lookup("GEODRAW_PROXY_URL").filter(|v| !v.is_empty()) {
            config.proxy_url = Some(proxy);
        }

        config
    }

    /// Configure with custom proxy
    pub fn with_proxy(mut self, proxy_url: String) -> Self {
        self.proxy_url = Some(proxy_url);
        self
    }

    /// Configure the HTTP timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the maximum accepted document size
    pub fn with_max_content_size(mut self, bytes: u64) -> Self {
        self.max_content_size = bytes;
        self
    }
}
