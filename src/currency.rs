//! Naira amount formatting
//!
//! Formats currency amounts and item counts with comma-grouped thousands
//! for the user-facing result strings ("10,000,000.00", "5,000").

/// Format a Naira amount with grouped thousands and two decimal places
///
/// # Arguments
/// * `amount` - Amount in Naira
///
/// # Returns
/// String such as `"1,234,567.89"` (no currency symbol)
pub fn format_naira(amount: f64) -> String {
    let negative = amount.is_sign_negative() && amount != 0.0;
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some(parts) => parts,
        None => (fixed.as_str(), "00"),
    };
    let grouped = group_thousands(int_part);
    if negative {
        format!("-{}.{}", grouped, frac_part)
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}

/// Format an item count with grouped thousands
///
/// # Arguments
/// * `count` - Whole item count
///
/// # Returns
/// String such as `"5,000"`
pub fn format_count(count: i64) -> String {
    let digits = count.unsigned_abs().to_string();
    let grouped = group_thousands(&digits);
    if count < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Insert a comma every three digits, counting from the right
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
