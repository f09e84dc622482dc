//! # Sale Table
//!
//! Append-only list of recorded sales.

use stockroom_core::{NewSale, Sale};

use crate::sequence::IdSequence;

/// Sales in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SaleTable {
    rows: Vec<Sale>,
    ids: IdSequence,
}

impl SaleTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from existing rows. New ids continue after the
    /// highest existing id.
    pub fn from_rows(rows: Vec<Sale>) -> Self {
        let ids = IdSequence::after(rows.iter().map(|s| s.id));
        SaleTable { rows, ids }
    }

    /// Snapshot of all sales.
    pub fn list(&self) -> Vec<Sale> {
        self.rows.clone()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a sale with the next id.
    pub fn insert(&mut self, fields: NewSale) -> Sale {
        let sale = fields.with_id(self.ids.next_id());
        self.rows.push(sale.clone());
        sale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_sale(customer: &str) -> NewSale {
        NewSale {
            product_id: 2,
            quantity: 1,
            total_cents: 2999,
            date: "2023-04-02".to_string(),
            customer: customer.to_string(),
        }
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let mut table = SaleTable::new();
        assert!(table.is_empty());

        let first = table.insert(new_sale("Jane Smith"));
        let second = table.insert(new_sale("Bob Johnson"));

        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(table.len(), 2);
        assert_eq!(table.list()[1].customer, "Bob Johnson");
    }

    #[test]
    fn test_from_rows_continues_numbering() {
        let mut table = SaleTable::from_rows(vec![new_sale("a").with_id(1), new_sale("b").with_id(2)]);
        assert_eq!(table.insert(new_sale("c")).id, 3);
    }
}
