#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl Environment {
    /// Log filter used when `BSI_LOG_LEVEL` is unset. Only development is
    /// chatty by default.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Development => "info",
            Environment::Test | Environment::Production => "warn",
        }
    }

    /// Whether log output should carry ANSI colour codes.
    #[must_use]
    pub fn colored_logs(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Spreadsheet web-app endpoint serving the product list and image proxy.
    pub api_url: String,
    /// Digits-only WhatsApp number used in the contact link.
    pub whatsapp_number: String,
    pub low_stock_threshold: u32,
    pub search_debounce_ms: u64,
    pub related_limit: usize,
    pub image_concurrency: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("api_url", &self.api_url)
            .field("whatsapp_number", &"[redacted]")
            .field("low_stock_threshold", &self.low_stock_threshold)
            .field("search_debounce_ms", &self.search_debounce_ms)
            .field("related_limit", &self.related_limit)
            .field("image_concurrency", &self.image_concurrency)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .finish()
    }
}
