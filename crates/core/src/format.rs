//! Number formatting shared by insight text, ledger impacts and reports.
//!
//! Amounts stay `f64` end to end. Imported spend and revenue are unbounded,
//! so nothing here narrows to a fixed-width integer.

/// Round to the nearest integer, with halves rounding towards positive
/// infinity (`-2.5` becomes `-2`, `2.5` becomes `3`).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Format an already rounded amount with `,` thousands separators.
pub fn with_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rounded absolute amount with separators, e.g. `-1234.6` → `1,235`.
pub fn abs_amount(value: f64) -> String {
    with_thousands(round_half_up(value).abs())
}

/// Rounded absolute amount without separators, e.g. `-1234.6` → `1235`.
pub fn abs_whole(value: f64) -> String {
    format!("{:.0}", round_half_up(value).abs())
}
