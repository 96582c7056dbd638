//! Page Components

mod checkout;
mod outcome;
mod recent_payments;

pub use checkout::CheckoutPage;
pub use outcome::{CheckoutFailurePage, CheckoutSuccessPage};
pub use recent_payments::RecentPaymentsPage;
