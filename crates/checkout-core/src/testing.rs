//! In-memory fakes for the controller's collaborators

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::json;

use crate::api::{OrderReference, PaymentSession, PaymentSessionRequest, SessionApi};
use crate::controller::Navigator;
use crate::error::{CheckoutError, Result};
use crate::route::Route;
use crate::theme::Appearance;
use crate::widget::{CheckoutWidget, CompletionCallback, WidgetHost, WidgetOptions};

/// Backend fake: sessions always succeed unless told otherwise
#[derive(Default)]
pub struct FakeApi {
    requests: RefCell<Vec<PaymentSessionRequest>>,
    order_refs: RefCell<HashMap<String, String>>,
    fail_sessions: Cell<bool>,
    fail_lookups: Cell<bool>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl FakeApi {
    pub fn set_order_ref(&self, payment_id: &str, order_ref: &str) {
        self.order_refs
            .borrow_mut()
            .insert(payment_id.to_string(), order_ref.to_string());
    }

    pub fn fail_sessions(&self) {
        self.fail_sessions.set(true);
    }

    pub fn fail_order_lookups(&self) {
        self.fail_lookups.set(true);
    }

    /// Make the next `create_session` wait until `gate` fires
    pub fn hold_next_session(&self, gate: oneshot::Receiver<()>) {
        *self.gate.borrow_mut() = Some(gate);
    }

    pub fn requests(&self) -> Vec<PaymentSessionRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<PaymentSessionRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl SessionApi for FakeApi {
    async fn create_session(&self, request: &PaymentSessionRequest) -> Result<PaymentSession> {
        self.requests.borrow_mut().push(request.clone());
        let number = self.requests.borrow().len();

        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if self.fail_sessions.get() {
            return Err(CheckoutError::Status {
                endpoint: "/api/create-payment-session".into(),
                status: 500,
            });
        }
        Ok(PaymentSession(json!({ "id": format!("ps_{number}") })))
    }

    async fn order_reference(&self, payment_id: &str) -> Result<OrderReference> {
        if self.fail_lookups.get() {
            return Err(CheckoutError::Status {
                endpoint: "/api/get-order-ref".into(),
                status: 503,
            });
        }
        self.order_refs
            .borrow()
            .get(payment_id)
            .map(OrderReference::new)
            .ok_or_else(|| CheckoutError::MissingOrderReference(payment_id.to_string()))
    }
}

/// Recorded widget lifecycle call, by widget id
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostCall {
    Created(u64),
    Mounted(u64),
    Unmounted(u64),
}

#[derive(Default)]
struct HostState {
    log: RefCell<Vec<HostCall>>,
    appearances: RefCell<Vec<Appearance>>,
    callbacks: RefCell<Vec<CompletionCallback>>,
    sleeps: Cell<u32>,
    next_id: Cell<u64>,
    fail_mounts: Cell<bool>,
    fail_creates: Cell<bool>,
    create_gate: RefCell<Option<oneshot::Receiver<()>>>,
}

/// Widget library fake that records every call
pub struct FakeHost {
    state: Rc<HostState>,
    /// Library appears after this many sleeps; `None` never
    loaded_after: Option<u32>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::loaded_after(0)
    }
}

impl FakeHost {
    pub fn loaded_after(sleeps: u32) -> Self {
        Self {
            state: Rc::default(),
            loaded_after: Some(sleeps),
        }
    }

    pub fn never_loaded() -> Self {
        Self {
            state: Rc::default(),
            loaded_after: None,
        }
    }

    pub fn fail_mounts(&self) {
        self.state.fail_mounts.set(true);
    }

    pub fn fail_creates(&self) {
        self.state.fail_creates.set(true);
    }

    /// Make the next `create` wait until `gate` fires
    pub fn hold_next_create(&self, gate: oneshot::Receiver<()>) {
        *self.state.create_gate.borrow_mut() = Some(gate);
    }

    pub fn sleeps(&self) -> u32 {
        self.state.sleeps.get()
    }

    pub fn log(&self) -> Vec<HostCall> {
        self.state.log.borrow().clone()
    }

    pub fn appearances(&self) -> Vec<Appearance> {
        self.state.appearances.borrow().clone()
    }

    /// Mounted and not yet unmounted
    pub fn live_widgets(&self) -> Vec<u64> {
        let mut live = Vec::new();
        for call in self.state.log.borrow().iter() {
            match *call {
                HostCall::Mounted(id) => live.push(id),
                HostCall::Unmounted(id) => live.retain(|l| *l != id),
                HostCall::Created(_) => {}
            }
        }
        live
    }

    /// Fire the completion callback of the most recently created widget
    pub fn complete_last(&self, payment_id: &str) {
        let callback = self.state.callbacks.borrow().last().cloned();
        if let Some(callback) = callback {
            callback(payment_id.to_string());
        }
    }
}

pub struct FakeWidget {
    id: u64,
    state: Rc<HostState>,
}

impl CheckoutWidget for FakeWidget {
    fn unmount(&self) {
        self.state.log.borrow_mut().push(HostCall::Unmounted(self.id));
    }
}

#[async_trait(?Send)]
impl WidgetHost for FakeHost {
    type Widget = FakeWidget;

    fn library_loaded(&self) -> bool {
        self.loaded_after
            .is_some_and(|after| self.state.sleeps.get() >= after)
    }

    async fn sleep(&self, _duration: Duration) {
        self.state.sleeps.set(self.state.sleeps.get() + 1);
        tokio::task::yield_now().await;
    }

    async fn create(&self, options: WidgetOptions) -> Result<FakeWidget> {
        let gate = self.state.create_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.state.fail_creates.get() {
            return Err(CheckoutError::Widget("factory rejected the session".into()));
        }

        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);

        self.state.log.borrow_mut().push(HostCall::Created(id));
        self.state.appearances.borrow_mut().push(options.appearance);
        self.state
            .callbacks
            .borrow_mut()
            .push(options.on_payment_completed);

        Ok(FakeWidget {
            id,
            state: Rc::clone(&self.state),
        })
    }

    fn mount(&self, widget: &FakeWidget, _component: &str, container_id: &str) -> Result<()> {
        if self.state.fail_mounts.get() {
            return Err(CheckoutError::ContainerMissing(container_id.to_string()));
        }
        self.state.log.borrow_mut().push(HostCall::Mounted(widget.id));
        Ok(())
    }
}

/// Records navigations instead of touching `window.location`
#[derive(Default)]
pub struct FakeNavigator {
    routes: RefCell<Vec<Route>>,
}

impl FakeNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.borrow().clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes.borrow().last().cloned()
    }
}

impl Navigator for FakeNavigator {
    fn navigate(&self, route: &Route) {
        self.routes.borrow_mut().push(route.clone());
    }
}
