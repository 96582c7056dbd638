use checkout_core::money::format_price;
use checkout_core::{Cart, LineItem};
use leptos::prelude::*;

#[component]
pub fn CheckoutSummary(cart: RwSignal<Cart>) -> impl IntoView {
    view! {
        <div class="checkout-summary">
            <h2>"Checkout Summary"</h2>
            <ul class="summary-items">
                <For
                    each=move || cart.with(Cart::line_items)
                    key=|item: &LineItem| (item.name.clone(), item.units)
                    children=|item: LineItem| {
                        let subtotal = format_price(item.subtotal());
                        let label = format!("{} x {}", item.name, item.units);
                        view! {
                            <li class="summary-item">
                                <span>{label}</span>
                                <span>{subtotal}</span>
                            </li>
                        }
                    }
                />
            </ul>
            <div class="summary-total">
                "Total: " {move || format_price(cart.with(Cart::total))}
            </div>
        </div>
    }
}
