//! # checkout-core
//!
//! Framework-agnostic state and lifecycle logic for the checkout storefront.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    CheckoutController                         │
//! │  ┌─────────────┐  ┌──────────────┐  ┌──────────────────────┐  │
//! │  │ SessionApi  │  │  WidgetHost  │  │      Navigator       │  │
//! │  │   (HTTP)    │──│ (JS library) │──│ (success / failure)  │  │
//! │  └─────────────┘  └──────────────┘  └──────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//!        ▲                   ▲
//!        │ cart changes      │ theme changes (Store<Theme>)
//! ```
//!
//! The controller owns the single embedded payment widget. Every checkout
//! attempt is stamped with a generation; results that arrive after a reset
//! carry an old generation and are dropped.
//!
//! Nothing in this crate touches the DOM. The browser bindings live in
//! `checkout-web` and plug in through the [`SessionApi`], [`WidgetHost`] and
//! [`Navigator`] traits, which keeps every lifecycle rule testable on the host.

pub mod address;
pub mod api;
pub mod cart;
pub mod config;
pub mod controller;
pub mod error;
pub mod money;
pub mod payments;
pub mod route;
pub mod store;
pub mod theme;
pub mod widget;

#[cfg(test)]
mod testing;

pub use address::{Address, AddressField};
pub use api::{HttpApi, OrderReference, PaymentSession, PaymentSessionRequest, PaymentsSource, SessionApi};
pub use cart::{Cart, LineItem, Product};
pub use config::{CheckoutConfig, WidgetEnvironment};
pub use controller::{
    CheckoutController, CheckoutOutcome, CheckoutPhase, ControllerEvent, Navigator,
    PaymentCompleted, ResetReason, controller_events,
};
pub use error::{CheckoutError, Result};
pub use payments::{FeedUpdate, PaymentEvent, PaymentField, PaymentStatus, PaymentsFeed, TableBody};
pub use route::{NavLink, Route, display_order_ref, nav_links};
pub use store::{Changes, Store, Subscription};
pub use theme::{Appearance, Theme};
pub use widget::{CheckoutWidget, CompletionCallback, WidgetHost, WidgetOptions};
