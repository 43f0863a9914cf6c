//! Cost formatting for chart titles, line labels and tables
//!
//! Contract: ceiling rounding at the requested number of decimals, at
//! least two fraction digits always shown, trailing zeros beyond two
//! trimmed, thousands grouped with a space.

/// Format a cost with `decimals` fraction digits (minimum two).
///
/// Rounding is toward positive infinity, so a displayed total is never
/// below the real cost.
pub fn format_cost(value: f64, decimals: usize) -> String {
    let decimals = decimals.max(2);
    let factor = 10f64.powi(decimals as i32);

    let scaled = value * factor;
    let nearest = scaled.round();
    // Float products like 1.13 * 100 land a hair above the integer they
    // represent; ceiling those would overshoot by a full unit.
    let units = if (scaled - nearest).abs() < 1e-6 {
        nearest as i128
    } else {
        scaled.ceil() as i128
    };

    let negative = units < 0;
    let units = units.unsigned_abs();
    let factor = factor as u128;

    let int_part = units / factor;
    let mut frac = format!("{:0width$}", units % factor, width = decimals);
    while frac.len() > 2 && frac.ends_with('0') {
        frac.pop();
    }

    let mut grouped = String::new();
    let digits = int_part.to_string();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}
