use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the platform tenant.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl ClientConfig {
    /// Configuration pointing at the given tenant base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("privault-sdk/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// * `PRIVAULT_URL` selects the tenant base URL (required).
    /// * `PRIVAULT_TIMEOUT_SECS` overrides the request timeout.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("PRIVAULT_URL").ok()?;
        let mut config = Self::new(base_url);

        if let Ok(raw) = std::env::var("PRIVAULT_TIMEOUT_SECS") {
            if let Ok(secs) = raw.trim().parse::<u64>() {
                config.timeout = Duration::from_secs(secs);
            }
        }

        Some(config)
    }

    /// Override the request timeout (default 30 seconds).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the user agent sent with each request.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
