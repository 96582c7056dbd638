//! Checkout Page

use checkout_core::{Address, Cart};
use leptos::prelude::*;

use crate::components::{AddressForm, CheckoutCardForm, CheckoutSummary, ProductCards};

#[component]
pub fn CheckoutPage() -> impl IntoView {
    let cart = RwSignal::new(Cart::storefront());
    let address = RwSignal::new(Address::default());

    view! {
        <div class="checkout-page">
            <div class="checkout-grid">
                <section class="panel">
                    <ProductCards cart=cart />
                </section>
                <section class="panel">
                    <AddressForm address=address />
                </section>
                <section class="panel panel-summary">
                    <CheckoutSummary cart=cart />
                </section>
                <section class="panel panel-payment">
                    <CheckoutCardForm cart=cart address=address />
                </section>
            </div>
        </div>
    }
}
