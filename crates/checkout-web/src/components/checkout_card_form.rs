//! Embedded payment widget panel
//!
//! Owns the page's [`CheckoutController`]. Cart and address edits are
//! forwarded on every change; widget completions and theme changes are drained by one driver
//! task that lives as long as this component.

use std::rc::Rc;

use checkout_core::{
    Address, Cart, CheckoutConfig, CheckoutController, CheckoutPhase, HttpApi, ResetReason,
    controller_events,
};
use futures::future::{AbortHandle, Abortable};
use leptos::prelude::*;

use crate::app::ThemeContext;
use crate::host::{BrowserNavigator, BrowserWidgetHost};

type PageController = CheckoutController<HttpApi, BrowserWidgetHost, BrowserNavigator>;

#[component]
pub fn CheckoutCardForm(cart: RwSignal<Cart>, address: RwSignal<Address>) -> impl IntoView {
    let config = expect_context::<CheckoutConfig>();
    let theme = expect_context::<ThemeContext>();
    let container_id = config.container_id.clone();

    let (controller, completions) = CheckoutController::new(
        HttpApi::from_config(&config),
        BrowserWidgetHost,
        BrowserNavigator,
        config,
        theme.current.get_untracked(),
    );
    let controller: Rc<PageController> = Rc::new(controller);

    let phase = RwSignal::new(CheckoutPhase::Idle);
    let notice = RwSignal::new(None::<&'static str>);

    // Mirror controller state into signals; unsubscribed when the component is disposed
    let subscriptions = (
        controller.phase_store().subscribe(move |p| {
            phase.try_set(*p);
        }),
        controller.address_resets().subscribe(move |_| {
            address.try_update(Address::reset);
        }),
    );
    let _subscriptions = StoredValue::new_local(subscriptions);

    let (abort, registration) = AbortHandle::new_pair();
    match theme.with_store(|store| controller_events(completions, store)) {
        Some(events) => {
            let driver = Rc::clone(&controller);
            leptos::task::spawn_local(async move {
                let run = async move { driver.run(events).await };
                if Abortable::new(run, registration).await.is_err() {
                    tracing::debug!("Checkout driver stopped");
                }
            });
        }
        None => tracing::error!("Theme store unavailable; widget completions will not be handled"),
    }

    let controller = StoredValue::new_local(controller);

    Effect::new(move |_| {
        let cart = cart.get();
        controller.try_with_value(|c| {
            if let Some(reason) = c.cart_changed(&cart) {
                tracing::debug!(?reason, "Cart change reset checkout");
            }
        });
    });

    Effect::new(move |_| {
        address.with(|address| controller.try_with_value(|c| c.address_changed(address)));
    });

    on_cleanup(move || {
        abort.abort();
        controller.try_with_value(|c| c.reset(ResetReason::ViewClosed));
    });

    let total_is_zero = Memo::new(move |_| cart.with(|c| c.total().is_zero()));

    let begin = move |_| {
        let Some(controller) = controller.try_get_value() else {
            return;
        };
        let cart = cart.get_untracked();
        let address = address.get_untracked();
        notice.set(None);

        leptos::task::spawn_local(async move {
            if let Err(e) = controller.begin_checkout(&cart, &address).await {
                if !e.is_stale() {
                    notice.try_set(Some(e.user_message()));
                }
            }
        });
    };

    view! {
        <div class="checkout-container">
            <Show when=move || phase.get().is_idle()>
                <button
                    class="checkout-btn"
                    class:disabled=move || total_is_zero.get()
                    disabled=move || total_is_zero.get()
                    on:click=begin
                >
                    "To Proceed to Checkout (Flow Displayed Here)"
                </button>
            </Show>
            {move || notice.get().map(|message| view! { <p class="checkout-notice">{message}</p> })}
            <div
                id=container_id
                class="flow-container"
                class:hidden=move || phase.get().is_idle()
            ></div>
        </div>
    }
}
