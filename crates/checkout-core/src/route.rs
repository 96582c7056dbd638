//! Client-side routes

/// Shown wherever an order reference is missing
pub const MISSING_ORDER_REF: &str = "N/A";

/// A client-side view
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Checkout,
    CheckoutSuccess { order_ref: Option<String> },
    CheckoutFailure { order_ref: Option<String> },
    RecentPayments,
}

impl Route {
    pub const CHECKOUT_PATH: &'static str = "/";
    pub const SUCCESS_PATH: &'static str = "/checkout-success";
    pub const FAILURE_PATH: &'static str = "/checkout-failure";
    pub const RECENT_PAYMENTS_PATH: &'static str = "/recent-payments";

    pub const fn path(&self) -> &'static str {
        match self {
            Self::Checkout => Self::CHECKOUT_PATH,
            Self::CheckoutSuccess { .. } => Self::SUCCESS_PATH,
            Self::CheckoutFailure { .. } => Self::FAILURE_PATH,
            Self::RecentPayments => Self::RECENT_PAYMENTS_PATH,
        }
    }

    /// Path plus the `order_ref` query, when there is one
    pub fn href(&self) -> String {
        match self {
            Self::CheckoutSuccess {
                order_ref: Some(order_ref),
            }
            | Self::CheckoutFailure {
                order_ref: Some(order_ref),
            } => format!(
                "{}?order_ref={}",
                self.path(),
                urlencoding::encode(order_ref)
            ),
            _ => self.path().to_string(),
        }
    }
}

/// Order reference for display, `N/A` when missing or blank
pub fn display_order_ref(order_ref: Option<&str>) -> &str {
    order_ref
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(MISSING_ORDER_REF)
}

/// A navbar entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

const HOME: NavLink = NavLink {
    href: Route::CHECKOUT_PATH,
    label: "Home",
};

const RECENT_PAYMENTS: NavLink = NavLink {
    href: Route::RECENT_PAYMENTS_PATH,
    label: "💰 Recent Payments",
};

/// Navbar links for the current path
pub fn nav_links(path: &str) -> Vec<NavLink> {
    match path.trim_end_matches('/') {
        Route::RECENT_PAYMENTS_PATH => vec![HOME],
        Route::SUCCESS_PATH | Route::FAILURE_PATH => vec![HOME, RECENT_PAYMENTS],
        _ => vec![RECENT_PAYMENTS],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_href_encodes_ref() {
        let route = Route::CheckoutSuccess {
            order_ref: Some("ORD-9".into()),
        };
        assert_eq!(route.href(), "/checkout-success?order_ref=ORD-9");

        let spaced = Route::CheckoutSuccess {
            order_ref: Some("A B&C".into()),
        };
        assert_eq!(spaced.href(), "/checkout-success?order_ref=A%20B%26C");
    }

    #[test]
    fn test_failure_without_ref() {
        let route = Route::CheckoutFailure { order_ref: None };
        assert_eq!(route.href(), "/checkout-failure");
    }

    #[test]
    fn test_display_order_ref() {
        assert_eq!(display_order_ref(None), "N/A");
        assert_eq!(display_order_ref(Some("  ")), "N/A");
        assert_eq!(display_order_ref(Some("ORD-9")), "ORD-9");
    }

    #[test]
    fn test_nav_links_by_route() {
        let labels = |path| {
            nav_links(path)
                .into_iter()
                .map(|l| l.label)
                .collect::<Vec<_>>()
        };
        assert_eq!(labels("/recent-payments"), vec!["Home"]);
        assert_eq!(labels("/checkout-failure"), vec!["Home", "💰 Recent Payments"]);
        assert_eq!(labels("/"), vec!["💰 Recent Payments"]);
    }
}
