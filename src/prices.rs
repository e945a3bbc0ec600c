//! Per-family Naira unit prices
//!
//! Average selling price per item for each product family, used to convert
//! a predicted item count into projected revenue. Families without an entry
//! fall back to [`DEFAULT_UNIT_PRICE`].

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Unit price applied when a family has no table entry
pub const DEFAULT_UNIT_PRICE: i64 = 1500;

/// Average unit price in Naira per product family
static UNIT_PRICES: Lazy<HashMap<&'static str, i64>> = Lazy::new(|| {
    HashMap::from([
        ("AUTOMOTIVE", 4500),
        ("BABY CARE", 2500),
        ("BEAUTY", 3000),
        ("BEVERAGES", 1200),
        ("BOOKS", 2500),
        ("BREAD/BAKERY", 500),
        ("CELEBRATION", 2000),
        ("CLEANING", 1500),
        ("DAIRY", 1800),
        ("DELI", 2500),
        ("EGGS", 1200),
        ("FROZEN FOODS", 3500),
        ("GROCERY I", 2000),
        ("GROCERY II", 2000),
        ("HARDWARE", 8000),
        ("HOME AND KITCHEN I", 6000),
        ("HOME AND KITCHEN II", 6000),
        ("HOME APPLIANCES", 45000),
        ("HOME CARE", 1500),
        ("LADIESWEAR", 6500),
        ("LAWN AND GARDEN", 5000),
        ("LINGERIE", 4000),
        ("LIQUOR,WINE,BEER", 4500),
        ("MAGAZINES", 800),
        ("MEATS", 4500),
        ("PERSONAL CARE", 1800),
        ("PET SUPPLIES", 3000),
        ("PLAYERS AND ELECTRONICS", 25000),
        ("POULTRY", 4000),
        ("PREPARED FOODS", 2000),
        ("PRODUCE", 800),
        ("SCHOOL AND OFFICE SUPPLIES", 1200),
        ("SEAFOOD", 5500),
    ])
});

/// Look up the unit price for a product family
///
/// Unknown families get [`DEFAULT_UNIT_PRICE`] rather than an error; the
/// price table is advisory, not a validation surface.
pub fn unit_price(family: &str) -> i64 {
    UNIT_PRICES.get(family).copied().unwrap_or(DEFAULT_UNIT_PRICE)
}
