//! Checkout configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which provider environment the widget talks to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetEnvironment {
    #[default]
    Sandbox,
    Production,
}

impl WidgetEnvironment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Production => "production",
        }
    }

    /// Lenient parse; anything that is not production is sandbox
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" | "live" => Self::Production,
            _ => Self::Sandbox,
        }
    }
}

/// Storefront configuration
#[derive(Clone, Debug)]
pub struct CheckoutConfig {
    /// Base URL of the payments backend, without a trailing slash
    pub backend_url: String,

    /// Provider public key handed to the widget
    pub public_key: String,

    pub environment: WidgetEnvironment,

    /// Widget locale
    pub locale: String,

    /// ISO currency code sent with every session request
    pub currency: String,

    /// Element id the widget mounts into
    pub container_id: String,

    /// Widget component type to create
    pub component: String,

    /// How often to check whether the widget library has loaded
    pub library_poll_interval: Duration,

    /// Give up on the widget library after this long
    pub library_timeout: Duration,

    /// Recent payments refresh interval
    pub payments_poll_interval: Duration,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:5000".into(),
            public_key: String::new(),
            environment: WidgetEnvironment::Sandbox,
            locale: "en-GB".into(),
            currency: crate::money::CURRENCY_CODE.into(),
            container_id: "flow-container".into(),
            component: "flow".into(),
            library_poll_interval: Duration::from_millis(100),
            library_timeout: Duration::from_secs(10),
            payments_poll_interval: Duration::from_secs(5),
        }
    }
}

impl CheckoutConfig {
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.backend_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_public_key(mut self, key: impl Into<String>) -> Self {
        self.public_key = key.into();
        self
    }

    pub const fn with_environment(mut self, environment: WidgetEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub const fn with_library_timeout(mut self, poll_interval: Duration, timeout: Duration) -> Self {
        self.library_poll_interval = poll_interval;
        self.library_timeout = timeout;
        self
    }
}
