//! Recent Payments Page
//!
//! Fetches immediately, then every `payments_poll_interval` until the page is
//! left. Responses are applied through [`PaymentsFeed`], which drops any that
//! arrive after a newer one.

use checkout_core::payments::TableBody;
use checkout_core::{
    CheckoutConfig, HttpApi, PaymentEvent, PaymentField, PaymentsFeed, PaymentsSource,
};
use leptos::prelude::*;

#[component]
pub fn RecentPaymentsPage() -> impl IntoView {
    let config = expect_context::<CheckoutConfig>();
    let api = StoredValue::new_local(HttpApi::from_config(&config));
    let feed = RwSignal::new(PaymentsFeed::new());
    let selected = RwSignal::new(PaymentField::default());

    let refresh = move || {
        let Some(api) = api.try_get_value() else {
            return;
        };
        let Some(ticket) = feed.try_update(PaymentsFeed::issue) else {
            return;
        };
        leptos::task::spawn_local(async move {
            let result = api.recent_payments().await;
            feed.try_update(|f| f.apply(ticket, result));
        });
    };

    refresh();
    match set_interval_with_handle(refresh, config.payments_poll_interval) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => tracing::error!(error = ?e, "Could not schedule payments refresh"),
    }

    let rows = move || {
        feed.with(|f| match f.body() {
            TableBody::Empty { message, colspan } => view! {
                <tr>
                    <td colspan=colspan.to_string() class="empty-row">{message}</td>
                </tr>
            }
            .into_any(),
            TableBody::Rows(events) => events
                .iter()
                .cloned()
                .map(|event| payment_row(event, selected))
                .collect_view()
                .into_any(),
        })
    };

    view! {
        <div class="recent-payments">
            <h2>"Recent Payments"</h2>
            <table class="payments-table">
                <thead>
                    <tr>
                        <th>{PaymentField::PaymentId.title()}</th>
                        <th class="compact-only">{column_select(selected)}</th>
                        <th class="md-up">{PaymentField::EventId.title()}</th>
                        <th class="md-up">{PaymentField::OrderRef.title()}</th>
                        <th class="md-only">{column_select(selected)}</th>
                        {PaymentField::DETAIL
                            .into_iter()
                            .map(|field| view! { <th class="lg-up">{field.title()}</th> })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </div>
    }
}

fn column_select(selected: RwSignal<PaymentField>) -> impl IntoView {
    view! {
        <select
            class="column-select"
            on:change=move |ev| {
                if let Some(field) = PaymentField::from_key(&event_target_value(&ev)) {
                    selected.set(field);
                }
            }
        >
            {PaymentField::SELECTABLE
                .into_iter()
                .map(|field| {
                    view! {
                        <option value=field.key() selected=move || selected.get() == field>
                            {field.label()}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}

fn payment_row(event: PaymentEvent, selected: RwSignal<PaymentField>) -> impl IntoView {
    let cell = |field: PaymentField| field.value(&event);
    let payment_id = cell(PaymentField::PaymentId);
    let event_id = cell(PaymentField::EventId);
    let order_ref = cell(PaymentField::OrderRef);
    let details = PaymentField::DETAIL
        .into_iter()
        .map(|field| view! { <td class="lg-up">{field_view(field, &event)}</td> })
        .collect_view();

    let chosen = {
        let event = event.clone();
        move || field_view(selected.get(), &event)
    };
    let chosen_md = chosen.clone();

    view! {
        <tr>
            <td>{payment_id}</td>
            <td class="compact-only">{chosen}</td>
            <td class="md-up">{event_id}</td>
            <td class="md-up">{order_ref}</td>
            <td class="md-only">{chosen_md}</td>
            {details}
        </tr>
    }
}

/// Status renders as a badge; every other field as plain text
fn field_view(field: PaymentField, event: &PaymentEvent) -> AnyView {
    match field {
        PaymentField::Status => {
            let status = event.payment_status();
            view! { <span class=status.badge_class()>{status.as_str().to_string()}</span> }.into_any()
        }
        _ => field.value(event).into_any(),
    }
}
