//! Main App Component

use checkout_core::{Store, Theme};
use leptos::prelude::*;
use leptos_router::{components::*, path};

use crate::components::Navbar;
use crate::pages::{CheckoutFailurePage, CheckoutPage, CheckoutSuccessPage, RecentPaymentsPage};
use crate::{config, theme};

/// Current theme, shared by the navbar toggle and the checkout controller
#[derive(Clone, Copy)]
pub struct ThemeContext {
    store: StoredValue<Store<Theme>, LocalStorage>,
    pub current: RwSignal<Theme>,
}

impl ThemeContext {
    fn new(initial: Theme) -> Self {
        Self {
            store: StoredValue::new_local(Store::new(initial)),
            current: RwSignal::new(initial),
        }
    }

    pub fn toggle(self) {
        self.set(self.current.get_untracked().toggled());
    }

    pub fn set(self, theme: Theme) {
        self.current.set(theme);
        theme::apply(theme);
        theme::persist(theme);
        self.store.with_value(|store| {
            store.set(theme);
        });
    }

    /// Run `f` against the observable store the controller listens to
    pub fn with_store<R>(self, f: impl FnOnce(&Store<Theme>) -> R) -> Option<R> {
        self.store.try_with_value(f)
    }
}

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let initial = theme::load();
    theme::apply(initial);

    provide_context(config::from_env());
    provide_context(ThemeContext::new(initial));

    view! {
        <Router>
            <Navbar />
            <main class="app">
                <Routes fallback=|| view! { <p class="not-found">"Page not found"</p> }>
                    <Route path=path!("/") view=CheckoutPage />
                    <Route path=path!("/checkout-success") view=CheckoutSuccessPage />
                    <Route path=path!("/checkout-failure") view=CheckoutFailurePage />
                    <Route path=path!("/recent-payments") view=RecentPaymentsPage />
                </Routes>
            </main>
        </Router>
    }
}
