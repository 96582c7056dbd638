//! Cart Model
//!
//! Product catalog plus selected quantities. Pure state: the only mutation is
//! [`Cart::set_units`], which never lets a quantity drop below zero.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A product on the storefront
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,

    /// Unit price in GBP
    pub price: Decimal,

    /// Selected quantity
    pub units: u32,

    /// Image path served alongside the app
    pub image: String,
}

impl Product {
    pub fn new(id: u32, name: impl Into<String>, price: Decimal, image: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            units: 0,
            image: image.into(),
        }
    }

    /// Price of the selected quantity
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.units)
    }
}

/// A product reduced to what the payment session needs
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub units: u32,

    /// Unit price; sent as a JSON number
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl LineItem {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.units)
    }
}

/// The shopping cart
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cart {
    products: Vec<Product>,
}

impl Cart {
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The catalog the storefront ships with
    pub fn storefront() -> Self {
        Self::new(vec![
            Product::new(1, "Present A", dec!(10), "/Present_A.jpg"),
            Product::new(2, "Present B", dec!(20), "/Present_B.jpg"),
        ])
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Adjust a product's quantity by `delta`, clamping at zero.
    ///
    /// Returns `false` when `product_id` is not in the catalog.
    pub fn set_units(&mut self, product_id: u32, delta: i64) -> bool {
        let Some(product) = self.products.iter_mut().find(|p| p.id == product_id) else {
            return false;
        };

        let next = i64::from(product.units)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));
        product.units = u32::try_from(next).unwrap_or(u32::MAX);
        true
    }

    /// Sum of price × units over every product
    pub fn total(&self) -> Decimal {
        self.products.iter().map(Product::subtotal).sum()
    }

    /// Products with at least one unit selected, in catalog order
    pub fn line_items(&self) -> Vec<LineItem> {
        self.products
            .iter()
            .filter(|p| p.units > 0)
            .map(|p| LineItem {
                name: p.name.clone(),
                units: p.units,
                price: p.price,
            })
            .collect()
    }

    /// True when the catalog itself is empty
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_storefront_catalog() {
        let cart = Cart::storefront();
        assert_eq!(cart.products().len(), 2);
        assert_eq!(cart.total(), Decimal::ZERO);
        assert!(cart.line_items().is_empty());
    }

    #[test]
    fn test_set_units_clamps_at_zero() {
        let mut cart = Cart::storefront();
        assert!(cart.set_units(1, -1));
        assert_eq!(cart.product(1).map(|p| p.units), Some(0));

        cart.set_units(1, 3);
        cart.set_units(1, -5);
        assert_eq!(cart.product(1).map(|p| p.units), Some(0));
    }

    #[test]
    fn test_unknown_product_is_noop() {
        let mut cart = Cart::storefront();
        let before = cart.clone();
        assert!(!cart.set_units(99, 4));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_total_and_line_items() {
        let mut cart = Cart::storefront();
        cart.set_units(1, 2);
        cart.set_units(2, 1);

        assert_eq!(cart.total(), dec!(40));

        let items = cart.line_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Present A");
        assert_eq!(items[0].subtotal(), dec!(20));
    }

    #[test]
    fn test_line_item_price_is_a_json_number() {
        let item = LineItem {
            name: "Present A".into(),
            units: 2,
            price: dec!(10),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["price"], serde_json::json!(10.0));
        assert_eq!(json["units"], serde_json::json!(2));
    }

    proptest! {
        #[test]
        fn units_never_negative(deltas in prop::collection::vec(-5i64..=5, 0..64)) {
            let mut cart = Cart::storefront();
            let mut expected: i64 = 0;
            for delta in deltas {
                cart.set_units(1, delta);
                expected = (expected + delta).max(0);
                let units = cart.product(1).map_or(0, |p| p.units);
                prop_assert_eq!(i64::from(units), expected);
            }
        }

        #[test]
        fn total_is_sum_of_subtotals(a in 0u32..50, b in 0u32..50) {
            let mut cart = Cart::storefront();
            cart.set_units(1, i64::from(a));
            cart.set_units(2, i64::from(b));

            let expected = dec!(10) * Decimal::from(a) + dec!(20) * Decimal::from(b);
            prop_assert_eq!(cart.total(), expected);
        }
    }
}
