//! # Inventory Metrics
//!
//! Read-only aggregates the dashboard and sales screens show.
//!
//! ```text
//! products ──┬──► total_products, total_stock
//!            ├──► inventory_value  (Σ price × stock)
//!            ├──► stock_levels     (count per StockLevel)
//!            └──► low_stock        (stock < LOW_STOCK_THRESHOLD)
//!
//! sales ─────┬──► total_sales      (Σ total)
//!            └──► monthly_sales    (Σ total grouped by YYYY-MM)
//! ```
//!
//! Every sum saturates at the i64 bounds, so no stock or price the store
//! accepted can make the dashboard fail.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Product, Sale};
use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Stock Level
// =============================================================================

/// Badge shown next to a product's stock count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum StockLevel {
    /// More than 50 units.
    InStock,
    /// 11 to 50 units.
    Medium,
    /// 10 units or fewer (including oversold, negative stock).
    Low,
}

impl StockLevel {
    pub fn of(stock: i64) -> Self {
        if stock > 50 {
            StockLevel::InStock
        } else if stock > 10 {
            StockLevel::Medium
        } else {
            StockLevel::Low
        }
    }
}

/// Number of products at each [`StockLevel`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockLevelCounts {
    pub in_stock: usize,
    pub medium: usize,
    pub low: usize,
}

impl StockLevelCounts {
    pub fn of(products: &[Product]) -> Self {
        let mut counts = StockLevelCounts::default();
        for product in products {
            match product.stock_level() {
                StockLevel::InStock => counts.in_stock += 1,
                StockLevel::Medium => counts.medium += 1,
                StockLevel::Low => counts.low += 1,
            }
        }
        counts
    }
}

// =============================================================================
// Monthly Sales
// =============================================================================

/// Sales total for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    /// `YYYY-MM` grouping key.
    pub month: String,
    /// Short month name for chart axes (`Apr`). Falls back to the key when
    /// the key is not a valid month.
    pub label: String,
    #[serde(rename = "total", with = "crate::money::decimal")]
    #[ts(as = "f64")]
    pub total_cents: i64,
}

/// Groups sale totals by the `YYYY-MM` prefix of their date, ordered by key.
pub fn monthly_sales(sales: &[Sale]) -> Vec<MonthlySales> {
    let mut totals: BTreeMap<&str, Money> = BTreeMap::new();
    for sale in sales {
        *totals.entry(sale.month_key()).or_default() += sale.total();
    }

    totals
        .into_iter()
        .map(|(month, total)| MonthlySales {
            month: month.to_string(),
            label: month_label(month),
            total_cents: total.cents(),
        })
        .collect()
}

fn month_label(month: &str) -> String {
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
        .map(|d| d.format("%b").to_string())
        .unwrap_or_else(|_| month.to_string())
}

// =============================================================================
// Dashboard Summary
// =============================================================================

/// Everything the dashboard screen renders, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_products: usize,
    pub total_stock: i64,
    #[serde(rename = "inventoryValue", with = "crate::money::decimal")]
    #[ts(as = "f64")]
    pub inventory_value_cents: i64,
    #[serde(rename = "totalSales", with = "crate::money::decimal")]
    #[ts(as = "f64")]
    pub total_sales_cents: i64,
    pub stock_levels: StockLevelCounts,
    pub low_stock: Vec<Product>,
    pub monthly_sales: Vec<MonthlySales>,
}

impl DashboardSummary {
    pub fn compute(products: &[Product], sales: &[Sale]) -> Self {
        let inventory_value: Money = products.iter().map(Product::stock_value).sum();
        let total_sales: Money = sales.iter().map(Sale::total).sum();

        DashboardSummary {
            total_products: products.len(),
            total_stock: products
                .iter()
                .fold(0i64, |total, p| total.saturating_add(p.stock)),
            inventory_value_cents: inventory_value.cents(),
            total_sales_cents: total_sales.cents(),
            stock_levels: StockLevelCounts::of(products),
            low_stock: products
                .iter()
                .filter(|p| p.stock < LOW_STOCK_THRESHOLD)
                .cloned()
                .collect(),
            monthly_sales: monthly_sales(sales),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u32, price_cents: i64, stock: i64) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            price_cents,
            stock,
            category: "General".to_string(),
        }
    }

    fn sale(id: u32, total_cents: i64, date: &str) -> Sale {
        Sale {
            id,
            product_id: 1,
            quantity: 1,
            total_cents,
            date: date.to_string(),
            customer: "Walk-in".to_string(),
        }
    }

    #[test]
    fn test_stock_level_boundaries() {
        assert_eq!(StockLevel::of(51), StockLevel::InStock);
        assert_eq!(StockLevel::of(50), StockLevel::Medium);
        assert_eq!(StockLevel::of(11), StockLevel::Medium);
        assert_eq!(StockLevel::of(10), StockLevel::Low);
        assert_eq!(StockLevel::of(-3), StockLevel::Low);
    }

    #[test]
    fn test_monthly_sales_grouping() {
        let sales = vec![
            sale(1, 5997, "2023-04-01"),
            sale(2, 2999, "2023-03-15"),
            sale(3, 7998, "2023-04-03"),
        ];

        let months = monthly_sales(&sales);
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, "2023-03");
        assert_eq!(months[0].label, "Mar");
        assert_eq!(months[0].total_cents, 2999);
        assert_eq!(months[1].month, "2023-04");
        assert_eq!(months[1].total_cents, 13995);
    }

    #[test]
    fn test_monthly_sales_unreadable_month_keeps_key() {
        let months = monthly_sales(&[sale(1, 100, "someday")]);
        assert_eq!(months[0].month, "someday");
        assert_eq!(months[0].label, "someday");
    }

    #[test]
    fn test_dashboard_summary() {
        let products = vec![product(1, 1999, 100), product(2, 2999, 5), product(3, 500, -2)];
        let sales = vec![sale(1, 5997, "2023-04-01"), sale(2, 2999, "2023-04-02")];

        let summary = DashboardSummary::compute(&products, &sales);

        assert_eq!(summary.total_products, 3);
        assert_eq!(summary.total_stock, 103);
        assert_eq!(summary.inventory_value_cents, 199_900 + 14_995 - 1_000);
        assert_eq!(summary.total_sales_cents, 8996);
        let low: Vec<u32> = summary.low_stock.iter().map(|p| p.id).collect();
        assert_eq!(low, vec![2, 3]);
        assert_eq!(
            summary.stock_levels,
            StockLevelCounts {
                in_stock: 1,
                medium: 0,
                low: 2
            }
        );
        assert_eq!(summary.monthly_sales.len(), 1);
    }

    #[test]
    fn test_dashboard_summary_empty() {
        let summary = DashboardSummary::compute(&[], &[]);
        assert_eq!(summary.total_products, 0);
        assert_eq!(summary.inventory_value_cents, 0);
        assert!(summary.low_stock.is_empty());
        assert!(summary.monthly_sales.is_empty());
    }

    #[test]
    fn test_dashboard_summary_saturates_on_extreme_values() {
        let products = vec![
            product(1, i64::MAX, i64::MAX),
            product(2, 1999, i64::MAX),
            product(3, 1999, i64::MIN),
        ];
        let sales = vec![
            sale(1, i64::MAX, "2023-04-01"),
            sale(2, i64::MAX, "2023-04-02"),
        ];

        let summary = DashboardSummary::compute(&products, &sales);

        // MAX + MAX saturates to MAX, then MIN brings it down to -1.
        assert_eq!(summary.total_stock, -1);
        assert_eq!(summary.total_sales_cents, i64::MAX);
        assert_eq!(summary.monthly_sales[0].total_cents, i64::MAX);
        assert_eq!(summary.stock_levels.low, 1);
    }

    #[test]
    fn test_dashboard_money_is_decimal_on_the_wire() {
        let products = vec![product(1, 1999, 3)];
        let sales = vec![sale(1, 5997, "2023-04-01")];

        let json = serde_json::to_value(DashboardSummary::compute(&products, &sales)).unwrap();

        assert_eq!(json["inventoryValue"], serde_json::json!(59.97));
        assert_eq!(json["totalSales"], serde_json::json!(59.97));
        assert_eq!(json["monthlySales"][0]["total"], serde_json::json!(59.97));
        assert_eq!(json["stockLevels"]["low"], 1);
    }
}
