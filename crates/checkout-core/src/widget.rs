//! Embedded Payment Widget
//!
//! The hosted widget library is loaded by a script tag and owned by the
//! provider. [`WidgetHost`] is the seam between the controller and that
//! library: the browser implementation lives in `checkout-web`, tests use a
//! fake.

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::PaymentSession;
use crate::config::WidgetEnvironment;
use crate::error::{CheckoutError, Result};
use crate::theme::Appearance;

/// Called by the widget with the provider's payment id
pub type CompletionCallback = Rc<dyn Fn(String)>;

/// Everything the widget factory needs for one checkout attempt
#[derive(Clone)]
pub struct WidgetOptions {
    pub public_key: String,
    pub environment: WidgetEnvironment,
    pub appearance: Appearance,
    pub locale: String,
    pub payment_session: PaymentSession,
    pub on_payment_completed: CompletionCallback,
}

impl std::fmt::Debug for WidgetOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetOptions")
            .field("environment", &self.environment)
            .field("appearance", &self.appearance)
            .field("locale", &self.locale)
            .field("session", &self.payment_session.id())
            .finish_non_exhaustive()
    }
}

/// A live widget instance
pub trait CheckoutWidget {
    /// Tear the widget down. Must be safe to call once per instance.
    fn unmount(&self);
}

/// Factory and mount point for widget instances
#[async_trait(?Send)]
pub trait WidgetHost {
    type Widget: CheckoutWidget;

    /// Whether the widget library global is available yet
    fn library_loaded(&self) -> bool;

    async fn sleep(&self, duration: Duration);

    /// Instantiate a widget. The library's factory is asynchronous.
    async fn create(&self, options: WidgetOptions) -> Result<Self::Widget>;

    /// Create `component` on the widget and mount it into `container_id`
    fn mount(&self, widget: &Self::Widget, component: &str, container_id: &str) -> Result<()>;
}

/// Poll until the widget library is available, giving up after `timeout`.
///
/// `timeout` counts requested sleeps, not wall-clock time: a throttled
/// background tab stretches the real wait. Returns early, without error, as
/// soon as `keep_waiting` is false; the caller rechecks its own state.
pub async fn wait_for_library<H, F>(
    host: &H,
    interval: Duration,
    timeout: Duration,
    keep_waiting: F,
) -> Result<()>
where
    H: WidgetHost + ?Sized,
    F: Fn() -> bool,
{
    let interval = interval.max(Duration::from_millis(1));
    let mut waited = Duration::ZERO;

    loop {
        if host.library_loaded() || !keep_waiting() {
            return Ok(());
        }
        if waited >= timeout {
            tracing::warn!(?waited, "Widget library did not load");
            return Err(CheckoutError::LibraryTimeout(timeout));
        }
        host.sleep(interval).await;
        waited += interval;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;

    #[tokio::test]
    async fn test_wait_returns_once_loaded() {
        let host = FakeHost::loaded_after(3);
        wait_for_library(&host, Duration::from_millis(100), Duration::from_secs(10), || true)
            .await
            .unwrap();
        assert_eq!(host.sleeps(), 3);
    }

    #[tokio::test]
    async fn test_wait_times_out() {
        let host = FakeHost::never_loaded();
        let err = wait_for_library(&host, Duration::from_millis(100), Duration::from_secs(1), || true)
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::LibraryTimeout(_)));
        assert_eq!(host.sleeps(), 10);
    }

    #[tokio::test]
    async fn test_zero_interval_still_bounded() {
        let host = FakeHost::never_loaded();
        let result = wait_for_library(&host, Duration::ZERO, Duration::from_millis(5), || true).await;
        assert!(result.is_err());
        assert_eq!(host.sleeps(), 5);
    }

    #[tokio::test]
    async fn test_wait_stops_when_no_longer_wanted() {
        let host = FakeHost::never_loaded();
        let result = wait_for_library(&host, Duration::from_millis(100), Duration::from_secs(10), || {
            host.sleeps() < 2
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(host.sleeps(), 2);
    }
}
