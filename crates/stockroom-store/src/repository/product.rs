//! # Product Table
//!
//! CRUD over the product list plus the stock adjustment a sale triggers.
//!
//! ## Update Semantics
//! ```text
//! update(Product { id: 2, .. })
//!      │
//!      ▼
//! linear scan for id 2
//!      │
//!      ├── found ──► replace row in place (position kept) ──► Some(product)
//!      │
//!      └── missing ─► table untouched ──────────────────────► None
//! ```

use stockroom_core::{NewProduct, Product, ProductId};

use crate::sequence::IdSequence;

/// Products in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ProductTable {
    rows: Vec<Product>,
    ids: IdSequence,
}

impl ProductTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from existing rows. New ids continue after the
    /// highest existing id.
    pub fn from_rows(rows: Vec<Product>) -> Self {
        let ids = IdSequence::after(rows.iter().map(|p| p.id));
        ProductTable { rows, ids }
    }

    /// Snapshot of all products.
    pub fn list(&self) -> Vec<Product> {
        self.rows.clone()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First product with the given id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.rows.iter().find(|p| p.id == id)
    }

    /// Appends a product with the next id.
    pub fn insert(&mut self, fields: NewProduct) -> Product {
        let product = fields.with_id(self.ids.next_id());
        self.rows.push(product.clone());
        product
    }

    /// Replaces the first product with a matching id.
    pub fn update(&mut self, product: Product) -> Option<Product> {
        let slot = self.rows.iter_mut().find(|p| p.id == product.id)?;
        *slot = product.clone();
        Some(product)
    }

    /// Removes the first product with the given id.
    pub fn delete(&mut self, id: ProductId) -> bool {
        match self.rows.iter().position(|p| p.id == id) {
            Some(index) => {
                self.rows.remove(index);
                true
            }
            None => false,
        }
    }

    /// Takes `quantity` units out of a product's stock and returns the new
    /// level. No floor is applied; the result saturates at the i64 bounds.
    /// `None` if the product does not exist.
    pub fn take_stock(&mut self, id: ProductId, quantity: i64) -> Option<i64> {
        let product = self.rows.iter_mut().find(|p| p.id == id)?;
        product.stock = product.stock.saturating_sub(quantity);
        Some(product.stock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price_cents: 2999,
            stock: 50,
            category: "Clothing".to_string(),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut table = ProductTable::new();
        assert!(table.is_empty());

        let shirt = table.insert(new_product("Shirt"));
        assert_eq!(shirt.id, 1);
        assert_eq!(table.get(1), Some(&shirt));
        assert_eq!(table.get(2), None);
    }

    #[test]
    fn test_update_keeps_position() {
        let mut table = ProductTable::new();
        table.insert(new_product("A"));
        table.insert(new_product("B"));
        table.insert(new_product("C"));

        let mut b = table.get(2).cloned().unwrap();
        b.price_cents = 100;
        table.update(b);

        let names: Vec<String> = table.list().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(table.get(2).map(|p| p.price_cents), Some(100));
    }

    #[test]
    fn test_update_missing() {
        let mut table = ProductTable::new();
        table.insert(new_product("A"));
        assert!(table.update(new_product("Z").with_id(9)).is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_delete() {
        let mut table = ProductTable::new();
        table.insert(new_product("A"));
        assert!(table.delete(1));
        assert!(!table.delete(1));
        assert!(table.is_empty());
    }

    #[test]
    fn test_take_stock() {
        let mut table = ProductTable::new();
        table.insert(new_product("A"));
        assert_eq!(table.take_stock(1, 60), Some(-10));
        assert_eq!(table.take_stock(7, 1), None);
    }

    #[test]
    fn test_take_stock_saturates() {
        let mut table = ProductTable::new();
        table.insert(new_product("A"));

        // A negative quantity of i64::MIN would overflow on negation.
        assert_eq!(table.take_stock(1, i64::MIN), Some(i64::MAX));
        assert_eq!(table.take_stock(1, i64::MIN), Some(i64::MAX));
        assert_eq!(table.take_stock(1, i64::MAX), Some(0));
        assert_eq!(table.take_stock(1, i64::MAX), Some(-i64::MAX));
        assert_eq!(table.take_stock(1, i64::MAX), Some(i64::MIN));
    }
}
