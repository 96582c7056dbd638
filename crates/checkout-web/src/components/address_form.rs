use checkout_core::address::COUNTRIES;
use checkout_core::{Address, AddressField};
use leptos::prelude::*;

/// Shipping address inputs, bound to `address`
#[component]
pub fn AddressForm(address: RwSignal<Address>) -> impl IntoView {
    let set = move |field: AddressField, value: String| {
        address.update(|a| {
            a.set_field(field.name(), value);
        });
    };

    let inputs = AddressField::ALL
        .into_iter()
        .map(|field| match field {
            AddressField::Country => view! {
                <select
                    name=field.name()
                    class="input"
                    on:change=move |ev| set(field, event_target_value(&ev))
                >
                    {COUNTRIES
                        .iter()
                        .map(|&(code, label)| {
                            view! {
                                <option value=code selected=move || address.with(|a| a.country == code)>
                                    {label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            }
            .into_any(),
            _ => view! {
                <input
                    type=field.input_type()
                    name=field.name()
                    placeholder=field.placeholder()
                    class="input"
                    prop:value=move || address.with(|a| a.get(field).to_string())
                    on:input=move |ev| set(field, event_target_value(&ev))
                />
            }
            .into_any(),
        })
        .collect_view();

    view! {
        <div class="address-form">
            <h2>"Shipping Address"</h2>
            <div class="fields">{inputs}</div>
        </div>
    }
}
