//! # Receipt Calculator
//!
//! Turns a recorded sale and its product into the display-ready receipt the
//! UI prints.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Receipt Calculation                                  │
//! │                                                                         │
//! │  sale.total ────────► subtotal          (trusted, not price × qty)     │
//! │          │                                                              │
//! │          ├──► × 10% ──────────► tax     (rounded to the cent)          │
//! │          │                                                              │
//! │          └──► × 110% ─────────► total   (exact total, rounded once)    │
//! │                                                                         │
//! │  currency code ──► symbol  ($ € £ ¥, anything else → $)                │
//! │  sale.date ──────► "Apr 01, 2023" + "12:00 AM"                         │
//! │  sale.id ────────► "REC-000001"     (unless a number is supplied)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculator never touches the record store and has no side effects:
//! the same input always produces the same view.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Currency, Product, Sale, TaxRate};

/// Fixed receipt tax rate: 10%.
pub const RECEIPT_TAX_RATE: TaxRate = TaxRate::from_bps(1000);

/// Prefix of generated receipt numbers.
pub const RECEIPT_NUMBER_PREFIX: &str = "REC-";

/// Only tender the receipt knows about.
pub const PAYMENT_METHOD: &str = "Cash";

const DATE_DISPLAY_FORMAT: &str = "%b %d, %Y";
const TIME_DISPLAY_FORMAT: &str = "%I:%M %p";

// =============================================================================
// Input
// =============================================================================

/// Everything a receipt is computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptInput {
    pub sale: Sale,
    pub product: Product,
    /// Currency code as stored in settings. Unknown codes render with `$`.
    pub currency: String,
    pub company_name: String,
    pub company_email: String,
    /// Overrides the generated `REC-000042` number when non-empty.
    #[serde(default)]
    pub receipt_number: Option<String>,
}

// =============================================================================
// View Model
// =============================================================================

/// The single item line of a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub name: String,
    pub unit_price: String,
    pub quantity: i64,
    /// The sale total, formatted.
    pub line_total: String,
}

/// Display-ready receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptView {
    pub receipt_number: String,
    pub company_name: String,
    pub company_email: String,
    pub customer: String,
    pub date: String,
    pub time: String,
    pub line: ReceiptLine,
    pub currency_symbol: String,
    pub tax_label: String,
    /// Rounded amounts. On the wire as `subtotalAmount`, `taxAmount` and
    /// `totalAmount`, in decimal.
    #[serde(rename = "subtotalAmount", with = "crate::money::decimal")]
    #[ts(as = "f64")]
    pub subtotal_cents: i64,
    #[serde(rename = "taxAmount", with = "crate::money::decimal")]
    #[ts(as = "f64")]
    pub tax_cents: i64,
    #[serde(rename = "totalAmount", with = "crate::money::decimal")]
    #[ts(as = "f64")]
    pub total_cents: i64,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    pub payment_method: String,
}

// =============================================================================
// Calculation
// =============================================================================

/// Computes the receipt view for a sale.
///
/// ## Errors
/// [`CoreError::InvalidSaleDate`] when `sale.date` is not one of
/// `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]`, `YYYY-MM-DD HH:MM:SS` or RFC 3339.
///
/// ## Example
/// ```rust
/// use stockroom_core::receipt::{calculate_receipt, ReceiptInput};
/// use stockroom_core::types::{Product, Sale};
///
/// let input = ReceiptInput {
///     sale: Sale {
///         id: 1,
///         product_id: 1,
///         quantity: 3,
///         total_cents: 5997,
///         date: "2023-04-01".into(),
///         customer: "John Doe".into(),
///     },
///     product: Product {
///         id: 1,
///         name: "Product 1".into(),
///         price_cents: 1999,
///         stock: 97,
///         category: "Electronics".into(),
///     },
///     currency: "USD".into(),
///     company_name: "My Company".into(),
///     company_email: "admin@example.com".into(),
///     receipt_number: None,
/// };
///
/// let view = calculate_receipt(&input).unwrap();
/// assert_eq!(view.receipt_number, "REC-000001");
/// assert_eq!(view.tax, "$6.00");
/// assert_eq!(view.total, "$65.97");
/// ```
pub fn calculate_receipt(input: &ReceiptInput) -> CoreResult<ReceiptView> {
    let sale = &input.sale;
    let symbol = Currency::symbol_for_code(&input.currency);
    let (date, time) = split_sale_date(sale)?;

    let subtotal = sale.total();
    let tax = subtotal.calculate_tax(RECEIPT_TAX_RATE);
    let total = subtotal.with_tax(RECEIPT_TAX_RATE);

    let receipt_number = input
        .receipt_number
        .as_deref()
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_receipt_number(sale.id));

    Ok(ReceiptView {
        receipt_number,
        company_name: input.company_name.clone(),
        company_email: input.company_email.clone(),
        customer: sale.customer.clone(),
        date,
        time,
        line: ReceiptLine {
            name: input.product.name.clone(),
            unit_price: input.product.price().format_with_symbol(symbol),
            quantity: sale.quantity,
            line_total: subtotal.format_with_symbol(symbol),
        },
        currency_symbol: symbol.to_string(),
        tax_label: format!("Tax ({:.0}%)", RECEIPT_TAX_RATE.percentage()),
        subtotal_cents: subtotal.cents(),
        tax_cents: tax.cents(),
        total_cents: total.cents(),
        subtotal: subtotal.format_with_symbol(symbol),
        tax: tax.format_with_symbol(symbol),
        total: total.format_with_symbol(symbol),
        payment_method: PAYMENT_METHOD.to_string(),
    })
}

/// `REC-` followed by the sale id zero-padded to six digits.
pub fn default_receipt_number(sale_id: u32) -> String {
    format!("{RECEIPT_NUMBER_PREFIX}{sale_id:06}")
}

/// Splits the sale date into its date and time display strings.
/// A date without a time component is shown at midnight.
fn split_sale_date(sale: &Sale) -> CoreResult<(String, String)> {
    let moment = parse_sale_moment(sale.date.trim()).ok_or_else(|| CoreError::InvalidSaleDate {
        sale_id: sale.id,
        date: sale.date.clone(),
    })?;

    Ok((
        moment.format(DATE_DISPLAY_FORMAT).to_string(),
        moment.format(TIME_DISPLAY_FORMAT).to_string(),
    ))
}

fn parse_sale_moment(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn input(currency: &str, date: &str) -> ReceiptInput {
        ReceiptInput {
            sale: Sale {
                id: 1,
                product_id: 1,
                quantity: 3,
                total_cents: 5997,
                date: date.to_string(),
                customer: "John Doe".to_string(),
            },
            product: Product {
                id: 1,
                name: "Product 1".to_string(),
                price_cents: 1999,
                stock: 97,
                category: "Electronics".to_string(),
            },
            currency: currency.to_string(),
            company_name: "My Company".to_string(),
            company_email: "admin@example.com".to_string(),
            receipt_number: None,
        }
    }

    #[test]
    fn test_totals_for_sample_sale() {
        let view = calculate_receipt(&input("USD", "2023-04-01")).unwrap();

        assert_eq!(view.subtotal_cents, 5997);
        assert_eq!(view.tax_cents, 600);
        assert_eq!(view.total_cents, 6597);
        assert_eq!(view.subtotal, "$59.97");
        assert_eq!(view.tax, "$6.00");
        assert_eq!(view.total, "$65.97");
        assert_eq!(view.tax_label, "Tax (10%)");
        assert_eq!(view.payment_method, "Cash");
    }

    #[test]
    fn test_receipt_amounts_are_decimal_on_the_wire() {
        let view = calculate_receipt(&input("USD", "2023-04-01")).unwrap();
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["subtotalAmount"], serde_json::json!(59.97));
        assert_eq!(json["taxAmount"], serde_json::json!(6.0));
        assert_eq!(json["totalAmount"], serde_json::json!(65.97));
        assert_eq!(json["total"], "$65.97");
    }

    #[test]
    fn test_extreme_total_does_not_overflow() {
        let mut receipt_input = input("USD", "2023-04-01");
        receipt_input.sale.total_cents = i64::MAX;

        let view = calculate_receipt(&receipt_input).unwrap();
        assert_eq!(view.total_cents, i64::MAX);
        assert_eq!(view.tax_cents, 922_337_203_685_477_581);
    }

    #[test]
    fn test_subtotal_trusts_sale_total() {
        // 3 × $19.99 would be $59.97; the recorded total wins.
        let mut receipt_input = input("USD", "2023-04-01");
        receipt_input.sale.total_cents = 5000;

        let view = calculate_receipt(&receipt_input).unwrap();
        assert_eq!(view.subtotal, "$50.00");
        assert_eq!(view.line.line_total, "$50.00");
        assert_eq!(view.line.unit_price, "$19.99");
        assert_eq!(view.total, "$55.00");
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(calculate_receipt(&input("EUR", "2023-04-01")).unwrap().total, "€65.97");
        assert_eq!(calculate_receipt(&input("GBP", "2023-04-01")).unwrap().total, "£65.97");
        assert_eq!(calculate_receipt(&input("JPY", "2023-04-01")).unwrap().total, "¥65.97");
    }

    #[test]
    fn test_unknown_currency_falls_back_to_dollar() {
        let view = calculate_receipt(&input("XYZ", "2023-04-01")).unwrap();
        assert_eq!(view.currency_symbol, "$");
        assert_eq!(view.subtotal, "$59.97");
        assert_eq!(view.tax, "$6.00");
    }

    #[test]
    fn test_receipt_number() {
        let view = calculate_receipt(&input("USD", "2023-04-01")).unwrap();
        assert_eq!(view.receipt_number, "REC-000001");

        let mut custom = input("USD", "2023-04-01");
        custom.receipt_number = Some("INV-7".to_string());
        assert_eq!(calculate_receipt(&custom).unwrap().receipt_number, "INV-7");

        custom.receipt_number = Some(String::new());
        assert_eq!(calculate_receipt(&custom).unwrap().receipt_number, "REC-000001");

        assert_eq!(default_receipt_number(1_234_567), "REC-1234567");
    }

    #[test]
    fn test_date_only_is_midnight() {
        let view = calculate_receipt(&input("USD", "2023-04-01")).unwrap();
        assert_eq!(view.date, "Apr 01, 2023");
        assert_eq!(view.time, "12:00 AM");
    }

    #[test]
    fn test_date_with_time() {
        let view = calculate_receipt(&input("USD", "2023-04-01T14:05:00")).unwrap();
        assert_eq!(view.date, "Apr 01, 2023");
        assert_eq!(view.time, "02:05 PM");

        let view = calculate_receipt(&input("USD", "2023-12-24T09:30:00+02:00")).unwrap();
        assert_eq!(view.date, "Dec 24, 2023");
        assert_eq!(view.time, "09:30 AM");
    }

    #[test]
    fn test_unreadable_date_is_an_error_value() {
        let err = calculate_receipt(&input("USD", "next tuesday")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSaleDate { sale_id: 1, .. }));
    }

    #[test]
    fn test_calculation_is_idempotent() {
        let receipt_input = input("USD", "2023-04-01");
        let first = calculate_receipt(&receipt_input).unwrap();
        let second = calculate_receipt(&receipt_input).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
