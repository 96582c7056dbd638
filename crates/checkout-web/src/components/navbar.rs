use checkout_core::route::nav_links;
use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::app::ThemeContext;

#[component]
pub fn Navbar() -> impl IntoView {
    let location = use_location();
    let theme = expect_context::<ThemeContext>();

    let links = move || {
        nav_links(&location.pathname.get())
            .into_iter()
            .map(|link| view! { <a href=link.href class="nav-link">{link.label}</a> })
            .collect_view()
    };

    view! {
        <nav class="navbar">
            <div class="navbar-inner">
                <a href="/" class="brand">"Checkout Project"</a>

                <div class="nav-actions">
                    {links}
                    <span class="nav-pill">"🇬🇧 United Kingdom"</span>
                    <button class="theme-toggle" on:click=move |_| theme.toggle()>
                        {move || if theme.current.get().is_dark() { "☀️ Light Mode" } else { "🌙 Dark Mode" }}
                    </button>
                </div>
            </div>
        </nav>
    }
}
