//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    Settings     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32)       │   │  id (u32)       │   │  company_name   │       │
//! │  │  name           │   │  product_id ┄┄┄►│   │  currency       │       │
//! │  │  price          │   │  quantity       │   │  backup_*       │       │
//! │  │  stock          │   │  total          │   │  (singleton)    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │    Currency     │   │ BackupFrequency │       │
//! │  │  bps (u32)      │   │  USD EUR GBP JPY│   │  daily weekly   │       │
//! │  │  1000 = 10%     │   │  $   €   £   ¥  │   │  monthly        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## New-vs-Stored Pattern
//! Every stored record has a `New*` twin without `id`. The UI sends the `New*`
//! shape; the store assigns the id and hands back the full record.
//!
//! ## Money on the Wire
//! `price` and `total` travel as decimal numbers (`59.97`) and are held as
//! integer cents (`price_cents`, `total_cents`) once parsed.
//!
//! `Sale::product_id` is a plain reference: a sale may point at a product
//! that was deleted or never existed, and every consumer has to cope.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::metrics::StockLevel;
use crate::money::Money;

/// Product identifier assigned by the record store.
pub type ProductId = u32;

/// Sale identifier assigned by the record store.
pub type SaleId = u32;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 1000 bps = 10%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product held in inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier.
    pub id: ProductId,

    /// Display name shown in lists and on receipts.
    pub name: String,

    /// Unit price in cents. `price` on the wire, as a decimal.
    #[serde(rename = "price", with = "crate::money::decimal")]
    #[ts(as = "f64")]
    pub price_cents: i64,

    /// Units on hand. Goes negative when a sale oversells.
    pub stock: i64,

    /// Free-form category label.
    pub category: String,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Value of the units on hand (price × stock).
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.price() * self.stock
    }

    /// Stock badge shown next to the product.
    #[inline]
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::of(self.stock)
    }
}

/// Product fields supplied by the caller when creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(rename = "price", with = "crate::money::decimal")]
    #[ts(as = "f64")]
    pub price_cents: i64,
    pub stock: i64,
    pub category: String,
}

impl NewProduct {
    /// Attaches a store-assigned id.
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            price_cents: self.price_cents,
            stock: self.stock,
            category: self.category,
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale of a single product line. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: SaleId,
    /// Referenced product. Not enforced: may dangle.
    pub product_id: ProductId,
    pub quantity: i64,
    /// Caller-computed total in cents. Never re-derived.
    #[serde(rename = "total", with = "crate::money::decimal")]
    #[ts(as = "f64")]
    pub total_cents: i64,
    /// Calendar date, `YYYY-MM-DD`, optionally with a time component.
    pub date: String,
    pub customer: String,
}

impl Sale {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// The `YYYY-MM` prefix of the sale date, or the whole date when shorter.
    pub fn month_key(&self) -> &str {
        self.date.get(..7).unwrap_or(&self.date)
    }
}

/// Sale fields supplied by the caller when recording a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub product_id: ProductId,
    pub quantity: i64,
    #[serde(rename = "total", with = "crate::money::decimal")]
    #[ts(as = "f64")]
    pub total_cents: i64,
    pub date: String,
    pub customer: String,
}

impl NewSale {
    /// Attaches a store-assigned id.
    pub fn with_id(self, id: SaleId) -> Sale {
        Sale {
            id,
            product_id: self.product_id,
            quantity: self.quantity,
            total_cents: self.total_cents,
            date: self.date,
            customer: self.customer,
        }
    }
}

// =============================================================================
// Currency
// =============================================================================

/// Currencies the settings screen offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
}

impl Currency {
    /// All supported currencies, in settings-screen order.
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Eur, Currency::Gbp, Currency::Jpy];

    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
        }
    }

    /// Display symbol.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
        }
    }

    /// Symbol for an arbitrary currency code; unknown codes fall back to `$`.
    pub fn symbol_for_code(code: &str) -> &'static str {
        code.parse::<Currency>()
            .map(|c| c.symbol())
            .unwrap_or_else(|_| Currency::Usd.symbol())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    /// Parses an exact ISO code. Matching is case-sensitive, as the UI sends
    /// upper-case codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "currency".to_string(),
                allowed: Currency::ALL.iter().map(|c| c.code().to_string()).collect(),
            })
    }
}

// =============================================================================
// Backup Frequency
// =============================================================================

/// How often the (external) backup collaborator should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BackupFrequency {
    Daily,
    #[default]
    Weekly,
    Monthly,
}

impl fmt::Display for BackupFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupFrequency::Daily => write!(f, "daily"),
            BackupFrequency::Weekly => write!(f, "weekly"),
            BackupFrequency::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for BackupFrequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(BackupFrequency::Daily),
            "weekly" => Ok(BackupFrequency::Weekly),
            "monthly" => Ok(BackupFrequency::Monthly),
            _ => Err(ValidationError::NotAllowed {
                field: "backupFrequency".to_string(),
                allowed: vec!["daily".into(), "weekly".into(), "monthly".into()],
            }),
        }
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Application settings. There is exactly one current value; saving replaces
/// it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Shown in the receipt header.
    pub company_name: String,

    /// Shown under the company name on receipts.
    pub email: String,

    pub currency: Currency,
    pub dark_mode: bool,
    pub notifications: bool,
    pub backup_enabled: bool,
    pub backup_frequency: BackupFrequency,

    /// Where the backup collaborator writes to. Empty until configured.
    pub backup_location: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            company_name: "My Company".to_string(),
            email: "admin@example.com".to_string(),
            currency: Currency::Usd,
            dark_mode: false,
            notifications: true,
            backup_enabled: false,
            backup_frequency: BackupFrequency::Weekly,
            backup_location: String::new(),
        }
    }
}

// =============================================================================
// Backup Outcome
// =============================================================================

/// Result of a backup or restore request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BackupOutcome {
    pub success: bool,
    pub message: String,
}

impl BackupOutcome {
    pub fn succeeded(message: impl Into<String>) -> Self {
        BackupOutcome {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        BackupOutcome {
            success: false,
            message: message.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sale(date: &str) -> Sale {
        Sale {
            id: 1,
            product_id: 1,
            quantity: 3,
            total_cents: 5997,
            date: date.to_string(),
            customer: "John Doe".to_string(),
        }
    }

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1000);
        assert_eq!(rate.bps(), 1000);
        assert!((rate.percentage() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_new_product_with_id() {
        let product = NewProduct {
            name: "Widget".to_string(),
            price_cents: 1999,
            stock: 100,
            category: "Electronics".to_string(),
        }
        .with_id(4);

        assert_eq!(product.id, 4);
        assert_eq!(product.price().cents(), 1999);
        assert_eq!(product.stock_value().cents(), 199_900);
    }

    #[test]
    fn test_product_wire_shape_is_camel_case() {
        let product = Product {
            id: 1,
            name: "Product 1".to_string(),
            price_cents: 1999,
            stock: 100,
            category: "Electronics".to_string(),
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price"], serde_json::json!(19.99));
        assert_eq!(json["stock"], 100);
        assert!(json.get("priceCents").is_none());
    }

    #[test]
    fn test_sale_month_key() {
        assert_eq!(sample_sale("2023-04-01").month_key(), "2023-04");
        assert_eq!(sample_sale("2023-04-01T10:30:00").month_key(), "2023-04");
        assert_eq!(sample_sale("2023").month_key(), "2023");
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(Currency::Usd.symbol(), "$");
        assert_eq!(Currency::Eur.symbol(), "€");
        assert_eq!(Currency::Gbp.symbol(), "£");
        assert_eq!(Currency::Jpy.symbol(), "¥");
        assert_eq!(Currency::symbol_for_code("XYZ"), "$");
        assert_eq!(Currency::symbol_for_code("GBP"), "£");
    }

    #[test]
    fn test_currency_parsing() {
        assert_eq!("EUR".parse::<Currency>().unwrap(), Currency::Eur);
        assert!("eur".parse::<Currency>().is_err());
        assert!("XYZ".parse::<Currency>().is_err());
    }

    #[test]
    fn test_currency_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Currency::Jpy).unwrap(), "\"JPY\"");
        let parsed: Currency = serde_json::from_str("\"GBP\"").unwrap();
        assert_eq!(parsed, Currency::Gbp);
    }

    #[test]
    fn test_backup_frequency_parsing() {
        assert_eq!("Daily".parse::<BackupFrequency>().unwrap(), BackupFrequency::Daily);
        assert_eq!(BackupFrequency::Monthly.to_string(), "monthly");
        assert!("hourly".parse::<BackupFrequency>().is_err());
    }

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.company_name, "My Company");
        assert_eq!(settings.currency, Currency::Usd);
        assert_eq!(settings.backup_frequency, BackupFrequency::Weekly);
        assert!(settings.notifications);
        assert!(!settings.backup_enabled);
    }

    #[test]
    fn test_settings_require_every_field() {
        // Wholesale replacement: a partial object is not a valid Settings.
        let partial = r#"{ "companyName": "Acme" }"#;
        assert!(serde_json::from_str::<Settings>(partial).is_err());
    }

    #[test]
    fn test_new_sale_reads_decimal_total() {
        let sale: NewSale = serde_json::from_str(
            r#"{"productId":1,"quantity":3,"total":59.97,"date":"2023-04-01","customer":"John Doe"}"#,
        )
        .unwrap();
        assert_eq!(sale.total_cents, 5997);

        let stored = sale.with_id(1);
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["total"], serde_json::json!(59.97));
    }

    #[test]
    fn test_stock_level_of_product() {
        let mut product = NewProduct {
            name: "Widget".to_string(),
            price_cents: 1999,
            stock: 51,
            category: "Electronics".to_string(),
        }
        .with_id(1);
        assert_eq!(product.stock_level(), StockLevel::InStock);

        product.stock = i64::MIN;
        assert_eq!(product.stock_level(), StockLevel::Low);
    }
}
