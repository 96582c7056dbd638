//! UI Components

mod address_form;
mod checkout_card_form;
mod checkout_summary;
mod navbar;
mod product_cards;

pub use address_form::AddressForm;
pub use checkout_card_form::CheckoutCardForm;
pub use checkout_summary::CheckoutSummary;
pub use navbar::Navbar;
pub use product_cards::ProductCards;
