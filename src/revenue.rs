//! Revenue estimation from a log-scale model prediction
//!
//! Inverts the model's `log1p` training transform, scales the single-store
//! unit forecast up to a department total, prices it with the family's
//! Naira unit price, and renders the user-facing result strings.

use crate::currency::{format_count, format_naira};
use crate::prices;

/// Scale factor from one store's unit forecast to the department total
///
/// One tracked item stands in for roughly fifty stocked products in its
/// department.
pub const DEPARTMENT_MULTIPLIER: f64 = 50.0;

/// Priced revenue forecast derived from one model prediction
#[derive(Debug, Clone)]
pub struct RevenueEstimate {
    /// Store-level unit forecast (expm1 of the prediction, clamped at zero)
    pub unit_forecast: f64,
    /// Department-level item total (`unit_forecast` x 50)
    pub department_units: f64,
    /// Naira unit price applied
    pub unit_price: i64,
    /// Projected revenue in Naira
    pub revenue: f64,
    /// Headline string, e.g. `"₦ 10,000,000.00"`
    pub formatted: String,
    /// Breakdown string, e.g.
    /// `"Forecast: 5,000 items (Dept. Total) × ₦2,000/item"`
    pub detail: String,
}

/// Turn a log-scale prediction into a priced revenue estimate
///
/// The fractional unit forecast is carried through the revenue arithmetic;
/// only the breakdown string shows whole items.
///
/// # Arguments
/// * `log_scale_prediction` - Raw model output (`log1p` of unit sales)
/// * `family` - Product family, used for the unit price lookup
pub fn estimate(log_scale_prediction: f64, family: &str) -> RevenueEstimate {
    let unit_forecast = log_scale_prediction.exp_m1().max(0.0);
    let department_units = unit_forecast * DEPARTMENT_MULTIPLIER;
    let unit_price = prices::unit_price(family);
    let revenue = department_units * unit_price as f64;

    let formatted = format!("₦ {}", format_naira(revenue));
    // f64->i64 casts truncate toward zero and saturate, so an absurdly
    // large prediction caps the displayed count instead of overflowing
    let detail = format!(
        "Forecast: {} items (Dept. Total) × ₦{}/item",
        format_count(department_units as i64),
        format_count(unit_price)
    );

    RevenueEstimate {
        unit_forecast,
        department_units,
        unit_price,
        revenue,
        formatted,
        detail,
    }
}
