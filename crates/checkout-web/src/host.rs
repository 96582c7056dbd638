//! Browser implementations of the controller's collaborators

use std::time::Duration;

use async_trait::async_trait;
use checkout_core::{
    CheckoutError, CheckoutWidget, Navigator, Result, Route, WidgetHost, WidgetOptions,
};
use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

use crate::bindings::{self, CheckoutInstance};

/// A widget instance plus the JS closures it calls back into.
///
/// The closures must outlive the instance; they are dropped with it.
pub struct BrowserWidget {
    instance: CheckoutInstance,
    _on_ready: Closure<dyn Fn()>,
    _on_payment_completed: Closure<dyn Fn(JsValue, JsValue)>,
}

impl CheckoutWidget for BrowserWidget {
    fn unmount(&self) {
        if let Err(e) = self.instance.unmount() {
            tracing::error!(error = %bindings::describe(&e), "Payment widget unmount failed");
        }
    }
}

/// Talks to `window.CheckoutWebComponents`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserWidgetHost;

#[async_trait(?Send)]
impl WidgetHost for BrowserWidgetHost {
    type Widget = BrowserWidget;

    fn library_loaded(&self) -> bool {
        bindings::library_loaded()
    }

    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }

    async fn create(&self, options: WidgetOptions) -> Result<BrowserWidget> {
        let plain = serde_json::json!({
            "publicKey": options.public_key,
            "environment": options.environment,
            "appearance": options.appearance,
            "locale": options.locale,
            "paymentSession": options.payment_session,
        });
        let js_options = js_sys::JSON::parse(&plain.to_string()).map_err(widget_error)?;

        let on_ready = Closure::<dyn Fn()>::new(|| tracing::info!("Payment widget ready"));

        let callback = options.on_payment_completed.clone();
        let on_payment_completed =
            Closure::<dyn Fn(JsValue, JsValue)>::new(move |_component: JsValue, response: JsValue| {
                match Reflect::get(&response, &JsValue::from_str("id"))
                    .ok()
                    .and_then(|id| id.as_string())
                {
                    Some(payment_id) => callback(payment_id),
                    None => tracing::error!("Payment completed without a payment id"),
                }
            });

        Reflect::set(&js_options, &JsValue::from_str("onReady"), on_ready.as_ref())
            .map_err(widget_error)?;
        Reflect::set(
            &js_options,
            &JsValue::from_str("onPaymentCompleted"),
            on_payment_completed.as_ref(),
        )
        .map_err(widget_error)?;

        let instance = bindings::create_instance(&js_options)
            .await
            .map_err(widget_error)?;

        Ok(BrowserWidget {
            instance,
            _on_ready: on_ready,
            _on_payment_completed: on_payment_completed,
        })
    }

    fn mount(&self, widget: &BrowserWidget, component: &str, container_id: &str) -> Result<()> {
        let container = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(container_id))
            .ok_or_else(|| CheckoutError::ContainerMissing(container_id.to_string()))?;

        widget
            .instance
            .create(component)
            .and_then(|c| c.mount(&container))
            .map_err(widget_error)
    }
}

fn widget_error(value: JsValue) -> CheckoutError {
    CheckoutError::Widget(bindings::describe(&value))
}

/// Full-page navigation, so the next view starts from clean state
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, route: &Route) {
        let href = route.href();
        let Some(window) = web_sys::window() else {
            tracing::error!(%href, "No window to navigate");
            return;
        };
        if let Err(e) = window.location().set_href(&href) {
            tracing::error!(%href, error = %bindings::describe(&e), "Navigation failed");
        }
    }
}
