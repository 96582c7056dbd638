//! Success and failure pages

use checkout_core::route::display_order_ref;
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

#[derive(Clone, Copy)]
enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    const fn heading(self) -> &'static str {
        match self {
            Self::Success => "Payment Successful!",
            Self::Failure => "Payment Failed",
        }
    }

    const fn link_text(self) -> &'static str {
        match self {
            Self::Success => "Order some more!",
            Self::Failure => "Please contact your bank or try again",
        }
    }

    const fn class(self) -> &'static str {
        match self {
            Self::Success => "outcome outcome-success",
            Self::Failure => "outcome outcome-failure",
        }
    }
}

#[component]
fn OutcomeView(outcome: Outcome) -> impl IntoView {
    let query = use_query_map();
    let order_ref = move || {
        query.with(|q| display_order_ref(q.get("order_ref").as_deref()).to_string())
    };

    view! {
        <div class=outcome.class()>
            <h1>{outcome.heading()}</h1>
            <p>"Your order reference: " <strong>{order_ref}</strong></p>
            <a href="/" class="btn">{outcome.link_text()}</a>
        </div>
    }
}

#[component]
pub fn CheckoutSuccessPage() -> impl IntoView {
    view! { <OutcomeView outcome=Outcome::Success /> }
}

#[component]
pub fn CheckoutFailurePage() -> impl IntoView {
    view! { <OutcomeView outcome=Outcome::Failure /> }
}
