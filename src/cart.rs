//! In-memory shopping cart. Lives for one browser session only.

use std::collections::BTreeMap;

use crate::catalog::Product;

#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    pub product: Product,
    pub quantity: u32,
}

impl CartEntry {
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Cart entries keyed by product id. A quantity of zero is never stored;
/// setting it deletes the entry.
#[derive(Debug, Default)]
pub struct Cart {
    entries: BTreeMap<u64, CartEntry>,
}

impl Cart {
    /// Add one unit of `product`, creating the entry on first add.
    pub fn add(&mut self, product: Product) {
        self.entries
            .entry(product.id)
            .and_modify(|entry| entry.quantity += 1)
            .or_insert(CartEntry {
                product,
                quantity: 1,
            });
    }

    /// Set the quantity for an existing entry. Zero removes it; an unknown
    /// id is a no-op.
    pub fn set_quantity(&mut self, product_id: u64, quantity: u32) {
        if !self.entries.contains_key(&product_id) {
            return;
        }
        if quantity == 0 {
            self.entries.remove(&product_id);
        } else if let Some(entry) = self.entries.get_mut(&product_id) {
            entry.quantity = quantity;
        }
    }

    /// Adjust an entry's quantity by a signed delta, removing it at zero.
    pub fn adjust(&mut self, product_id: u64, delta: i64) {
        let Some(entry) = self.entries.get(&product_id) else {
            return;
        };
        let next = i64::from(entry.quantity).saturating_add(delta).max(0);
        self.set_quantity(product_id, next as u32);
    }

    pub fn entries(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.values()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct products.
    pub fn lines(&self) -> usize {
        self.entries.len()
    }

    /// Sum of quantities across all entries.
    pub fn total_items(&self) -> u64 {
        self.entries.values().map(|e| u64::from(e.quantity)).sum()
    }

    pub fn total_price(&self) -> f64 {
        self.entries.values().map(CartEntry::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, price: f64) -> Product {
        Product {
            id,
            title: format!("Product {id}"),
            description: String::new(),
            price,
            rating: 4.0,
            category: "misc".into(),
            thumbnail: String::new(),
        }
    }

    #[test]
    fn add_increments_quantity_for_the_same_product() {
        let mut cart = Cart::default();
        cart.add(product(1, 10.0));
        cart.add(product(1, 10.0));
        cart.add(product(2, 5.0));

        assert_eq!(cart.lines(), 2);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), 25.0);
    }

    #[test]
    fn quantity_zero_removes_the_entry() {
        let mut cart = Cart::default();
        cart.add(product(1, 10.0));
        cart.set_quantity(1, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_on_unknown_id_is_a_no_op() {
        let mut cart = Cart::default();
        cart.set_quantity(42, 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn adjust_clamps_at_zero_and_removes() {
        let mut cart = Cart::default();
        cart.add(product(1, 10.0));
        cart.adjust(1, 2);
        assert_eq!(cart.total_items(), 3);

        cart.adjust(1, -5);
        assert!(cart.is_empty());

        // Adjusting a removed entry does nothing.
        cart.adjust(1, 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn line_total_reflects_quantity() {
        let mut cart = Cart::default();
        cart.add(product(7, 19.99));
        cart.set_quantity(7, 3);
        let entry = cart.entries().next().unwrap();
        assert!((entry.line_total() - 59.97).abs() < 1e-9);
    }
}
