//! Checkout Storefront Web Frontend
//!
//! Leptos CSR shell around `checkout-core`: product picker, address form,
//! order summary, the embedded payment widget and the recent payments table.

mod app;
mod bindings;
mod components;
mod config;
mod host;
mod logging;
mod pages;
mod theme;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    leptos::mount::mount_to_body(App);
}
