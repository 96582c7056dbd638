use checkout_core::money::format_price;
use checkout_core::{Cart, Product};
use leptos::prelude::*;

#[component]
pub fn ProductCards(cart: RwSignal<Cart>) -> impl IntoView {
    let adjust = move |id: u32, delta: i64| {
        cart.update(|c| {
            c.set_units(id, delta);
        });
    };

    view! {
        <div class="product-cards">
            <For
                each=move || cart.with(|c| c.products().to_vec())
                key=|p: &Product| (p.id, p.units)
                children=move |product: Product| {
                    let id = product.id;
                    let price = format_price(product.price);
                    view! {
                        <div class="product-card">
                            <img src=product.image alt=product.name.clone() class="product-image" />
                            <h3>{product.name}</h3>
                            <p class="price">{price}</p>
                            <div class="quantity">
                                <button class="qty-btn minus" on:click=move |_| adjust(id, -1)>"-"</button>
                                <span>{product.units}</span>
                                <button class="qty-btn plus" on:click=move |_| adjust(id, 1)>"+"</button>
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}
