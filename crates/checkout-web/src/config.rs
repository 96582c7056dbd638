//! Build-time configuration

use checkout_core::{CheckoutConfig, WidgetEnvironment};

/// Read `CHECKOUT_BACKEND_URL`, `CHECKOUT_PUBLIC_KEY` and
/// `CHECKOUT_ENVIRONMENT` as baked in at compile time. Without a backend URL
/// the page origin is used.
pub fn from_env() -> CheckoutConfig {
    let defaults = CheckoutConfig::default();

    let backend_url = non_empty(option_env!("CHECKOUT_BACKEND_URL"))
        .map(str::to_string)
        .or_else(page_origin)
        .unwrap_or_else(|| defaults.backend_url.clone());

    let environment = non_empty(option_env!("CHECKOUT_ENVIRONMENT"))
        .map_or(WidgetEnvironment::Sandbox, WidgetEnvironment::parse);

    let public_key = option_env!("CHECKOUT_PUBLIC_KEY").unwrap_or_default();
    if public_key.is_empty() {
        tracing::warn!("CHECKOUT_PUBLIC_KEY was not set at build time");
    }

    defaults
        .with_backend_url(backend_url)
        .with_public_key(public_key)
        .with_environment(environment)
}

fn non_empty(value: Option<&'static str>) -> Option<&'static str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn page_origin() -> Option<String> {
    web_sys::window().and_then(|w| w.location().origin().ok())
}
