//! Checkout Session Controller
//!
//! Owns the embedded payment widget from session request to teardown.
//!
//! ```text
//! Idle ──begin_checkout──▶ SessionRequested ──mount──▶ WidgetMounted
//!   ▲                              │                         │
//!   └───────── reset / failure ────┴──── completion ─────────┘
//! ```
//!
//! Every attempt gets a fresh generation. After each await the controller
//! checks the generation it started with; if a reset or a newer attempt
//! happened meanwhile the result is dropped and any widget it produced is
//! unmounted. At most one widget is live, and it is always torn down before
//! another is mounted.

use std::cell::{Cell, RefCell};

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::stream::{self, Stream, StreamExt};
use rust_decimal::Decimal;

use crate::address::Address;
use crate::api::{OrderReference, PaymentSession, PaymentSessionRequest, SessionApi};
use crate::cart::Cart;
use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, Result};
use crate::route::Route;
use crate::store::Store;
use crate::theme::Theme;
use crate::widget::{self, CheckoutWidget, WidgetHost, WidgetOptions};

/// Where the controller sends the user once a payment completes
pub trait Navigator {
    fn navigate(&self, route: &Route);
}

/// Resting phase of the controller
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CheckoutPhase {
    #[default]
    Idle,
    SessionRequested,
    WidgetMounted,
}

impl CheckoutPhase {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Why the controller dropped the current attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetReason {
    ZeroTotal,
    EmptyCatalog,
    /// The session was priced for a different total
    TotalChanged,
    /// Widget appearance is fixed at creation
    ThemeChanged,
    ViewClosed,
}

/// Completion reported by the widget, stamped with the attempt it belongs to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentCompleted {
    pub generation: u64,
    pub payment_id: String,
}

/// How a completed payment was resolved
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Completed { order_ref: OrderReference },
    Failed { payment_id: String },
}

impl CheckoutOutcome {
    pub fn route(&self) -> Route {
        match self {
            Self::Completed { order_ref } => Route::CheckoutSuccess {
                order_ref: Some(order_ref.as_str().to_string()),
            },
            Self::Failed { .. } => Route::CheckoutFailure { order_ref: None },
        }
    }
}

/// Input processed by [`CheckoutController::run`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControllerEvent {
    Completed(PaymentCompleted),
    ThemeChanged(Theme),
}

/// Merge widget completions and theme changes into one event stream
pub fn controller_events(
    completions: UnboundedReceiver<PaymentCompleted>,
    theme: &Store<Theme>,
) -> impl Stream<Item = ControllerEvent> + Unpin + use<> {
    stream::select(
        completions.map(ControllerEvent::Completed),
        theme.watch().map(ControllerEvent::ThemeChanged),
    )
}

pub struct CheckoutController<A, H: WidgetHost, N> {
    api: A,
    host: H,
    navigator: N,
    config: CheckoutConfig,

    generation: Cell<u64>,
    phase: Store<CheckoutPhase>,
    address_resets: Store<u64>,
    theme: Cell<Theme>,

    widget: RefCell<Option<H::Widget>>,

    /// Total the current session was priced for
    priced_total: Cell<Option<Decimal>>,

    /// Cart and address of the current attempt, kept up to date by
    /// `cart_changed` and `address_changed`; replayed after a theme change
    inputs: RefCell<Option<(Cart, Address)>>,

    completions: UnboundedSender<PaymentCompleted>,
}

impl<A, H, N> CheckoutController<A, H, N>
where
    A: SessionApi,
    H: WidgetHost,
    N: Navigator,
{
    /// Create a controller. Completions reported by widgets arrive on the
    /// returned receiver; feed it back through [`controller_events`].
    pub fn new(
        api: A,
        host: H,
        navigator: N,
        config: CheckoutConfig,
        theme: Theme,
    ) -> (Self, UnboundedReceiver<PaymentCompleted>) {
        let (completions, receiver) = mpsc::unbounded();
        let controller = Self {
            api,
            host,
            navigator,
            config,
            generation: Cell::new(0),
            phase: Store::new(CheckoutPhase::Idle),
            address_resets: Store::new(0),
            theme: Cell::new(theme),
            widget: RefCell::new(None),
            priced_total: Cell::new(None),
            inputs: RefCell::new(None),
            completions,
        };
        (controller, receiver)
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.phase.get()
    }

    /// Observable phase, for the view
    pub const fn phase_store(&self) -> &Store<CheckoutPhase> {
        &self.phase
    }

    /// Incremented once per completed checkout; the address form resets on change
    pub const fn address_resets(&self) -> &Store<u64> {
        &self.address_resets
    }

    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn has_live_widget(&self) -> bool {
        self.widget.borrow().is_some()
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    pub const fn navigator(&self) -> &N {
        &self.navigator
    }

    pub const fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Request a payment session for `cart` and mount a widget bound to it
    pub async fn begin_checkout(&self, cart: &Cart, address: &Address) -> Result<()> {
        let request = PaymentSessionRequest::from_cart(cart, address, &self.config.currency)?;

        self.teardown();
        let generation = self.advance();
        self.priced_total.set(Some(cart.total()));
        *self.inputs.borrow_mut() = Some((cart.clone(), address.clone()));
        self.phase.set(CheckoutPhase::SessionRequested);

        tracing::info!(generation, amount = request.amount, "Checkout started");

        let result = self.attempt(generation, &request).await;
        if let Err(e) = &result {
            if e.is_stale() {
                tracing::debug!(generation, "Dropping superseded checkout attempt");
            } else {
                tracing::warn!(generation, error = %e, "Checkout attempt failed");
                if self.is_current(generation) {
                    self.priced_total.set(None);
                    self.phase.set(CheckoutPhase::Idle);
                }
            }
        }
        result
    }

    async fn attempt(&self, generation: u64, request: &PaymentSessionRequest) -> Result<()> {
        let session = self.api.create_session(request).await;
        self.ensure_current(generation)?;
        self.mount_widget(generation, session?).await
    }

    async fn mount_widget(&self, generation: u64, session: PaymentSession) -> Result<()> {
        let loaded = widget::wait_for_library(
            &self.host,
            self.config.library_poll_interval,
            self.config.library_timeout,
            || self.is_current(generation),
        )
        .await;
        self.ensure_current(generation)?;
        loaded?;

        let options = WidgetOptions {
            public_key: self.config.public_key.clone(),
            environment: self.config.environment,
            appearance: self.theme.get().appearance(),
            locale: self.config.locale.clone(),
            payment_session: session,
            on_payment_completed: self.completion_callback(generation),
        };

        let created = self.host.create(options).await;
        if let Err(e) = self.ensure_current(generation) {
            if let Ok(widget) = &created {
                widget.unmount();
            }
            return Err(e);
        }
        let widget = created?;

        self.teardown();
        if let Err(e) = self
            .host
            .mount(&widget, &self.config.component, &self.config.container_id)
        {
            widget.unmount();
            return Err(e);
        }

        *self.widget.borrow_mut() = Some(widget);
        self.phase.set(CheckoutPhase::WidgetMounted);
        tracing::info!(generation, container = %self.config.container_id, "Payment widget mounted");
        Ok(())
    }

    fn completion_callback(&self, generation: u64) -> widget::CompletionCallback {
        let completions = self.completions.clone();
        std::rc::Rc::new(move |payment_id: String| {
            if completions
                .unbounded_send(PaymentCompleted {
                    generation,
                    payment_id,
                })
                .is_err()
            {
                tracing::debug!(generation, "Completion arrived after the controller was dropped");
            }
        })
    }

    /// React to a cart edit. Returns the reason when the attempt was reset.
    pub fn cart_changed(&self, cart: &Cart) -> Option<ResetReason> {
        if let Some((tracked, _)) = self.inputs.borrow_mut().as_mut() {
            tracked.clone_from(cart);
        }
        if self.phase().is_idle() && !self.has_live_widget() {
            return None;
        }

        let total = cart.total();
        let reason = if cart.is_empty() {
            ResetReason::EmptyCatalog
        } else if total.is_zero() {
            ResetReason::ZeroTotal
        } else if self.priced_total.get() != Some(total) {
            ResetReason::TotalChanged
        } else {
            return None;
        };

        self.reset(reason);
        Some(reason)
    }

    /// Record an address edit so a remount requests its session with it
    pub fn address_changed(&self, address: &Address) {
        if let Some((_, tracked)) = self.inputs.borrow_mut().as_mut() {
            tracked.clone_from(address);
        }
    }

    /// Drop the current attempt and return to Idle. The address is kept.
    pub fn reset(&self, reason: ResetReason) {
        self.teardown();
        let generation = self.advance();
        self.priced_total.set(None);
        self.phase.set(CheckoutPhase::Idle);
        tracing::info!(generation, ?reason, "Checkout reset");
    }

    /// Switch the widget appearance. A live attempt is torn down and retried
    /// once with the new theme.
    pub async fn apply_theme(&self, theme: Theme) -> Result<()> {
        if self.theme.replace(theme) == theme {
            return Ok(());
        }
        if self.phase().is_idle() {
            return Ok(());
        }

        self.reset(ResetReason::ThemeChanged);
        let inputs = self.inputs.borrow().clone();
        match inputs {
            Some((cart, address)) => self.begin_checkout(&cart, &address).await,
            None => Ok(()),
        }
    }

    /// Handle a widget completion: tear down, resolve the order reference and
    /// navigate. Completions from stale attempts are ignored.
    pub async fn complete(&self, event: PaymentCompleted) -> Option<CheckoutOutcome> {
        if !self.is_current(event.generation) || self.phase() != CheckoutPhase::WidgetMounted {
            tracing::debug!(
                generation = event.generation,
                current = self.generation(),
                "Ignoring stale payment completion"
            );
            return None;
        }

        self.teardown();
        self.advance();
        self.priced_total.set(None);
        *self.inputs.borrow_mut() = None;
        self.phase.set(CheckoutPhase::Idle);
        self.address_resets.update(|n| *n += 1);

        let outcome = match self.api.order_reference(&event.payment_id).await {
            Ok(order_ref) => {
                tracing::info!(payment_id = %event.payment_id, order_ref = %order_ref, "Payment completed");
                CheckoutOutcome::Completed { order_ref }
            }
            Err(e) => {
                tracing::warn!(payment_id = %event.payment_id, error = %e, "Order reference lookup failed");
                CheckoutOutcome::Failed {
                    payment_id: event.payment_id,
                }
            }
        };

        self.navigator.navigate(&outcome.route());
        Some(outcome)
    }

    pub async fn handle(&self, event: ControllerEvent) {
        match event {
            ControllerEvent::Completed(completed) => {
                self.complete(completed).await;
            }
            ControllerEvent::ThemeChanged(theme) => {
                if let Err(e) = self.apply_theme(theme).await {
                    if !e.is_stale() {
                        tracing::warn!(%theme, error = %e, "Remount after theme change failed");
                    }
                }
            }
        }
    }

    /// Process events one at a time until the stream ends
    pub async fn run<S>(&self, events: S)
    where
        S: Stream<Item = ControllerEvent>,
    {
        futures::pin_mut!(events);
        while let Some(event) = events.next().await {
            self.handle(event).await;
        }
    }

    fn advance(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }

    fn ensure_current(&self, generation: u64) -> Result<()> {
        if self.is_current(generation) {
            Ok(())
        } else {
            Err(CheckoutError::Superseded(generation))
        }
    }

    /// Unmount the live widget, if any
    fn teardown(&self) {
        let widget = self.widget.borrow_mut().take();
        if let Some(widget) = widget {
            widget.unmount();
            tracing::debug!(generation = self.generation(), "Payment widget unmounted");
        }
    }
}
