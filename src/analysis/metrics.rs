//! Per-observation derived numbers.

/// Points per currency unit. Zero when `unit_value` is zero.
#[must_use]
pub fn ratio(quantity: f64, unit_value: f64) -> f64 {
    if unit_value == 0.0 {
        0.0
    } else {
        quantity / unit_value
    }
}

/// Signed percent change from `previous` to `current`.
///
/// Zero when `previous` is zero.
#[must_use]
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Formats a unit value for display: two decimals, `.` grouping thousands
/// and `,` as decimal separator, prefixed with the currency.
///
/// `BRL` is shown with its `R$` symbol; other codes are kept as given.
#[must_use]
pub fn format_unit_value(currency: &str, value: f64) -> String {
    let symbol = match currency {
        "BRL" | "R$" => "R$",
        other => other,
    };
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round();
    let whole = (cents / 100.0).trunc();
    let fraction = cents - whole * 100.0;

    let digits = format!("{whole:.0}");
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{symbol} {sign}{grouped},{fraction:02.0}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_divides_by_unit_value() {
        assert!((ratio(10.0, 4.0) - 2.5).abs() < 1e-9);
        assert_eq!(ratio(10.0, 0.0), 0.0);
    }

    #[test]
    fn percent_change_is_signed() {
        assert!((percent_change(15.0, 10.0) - 50.0).abs() < 1e-9);
        assert!((percent_change(8.0, 10.0) + 20.0).abs() < 1e-9);
        assert_eq!(percent_change(8.0, 0.0), 0.0);
    }

    #[test]
    fn formats_brazilian_style() {
        assert_eq!(format_unit_value("BRL", 1.0), "R$ 1,00");
        assert_eq!(format_unit_value("BRL", 1234.5), "R$ 1.234,50");
        assert_eq!(format_unit_value("USD", 1_000_000.0), "USD 1.000.000,00");
    }

    #[test]
    fn formats_negative_values() {
        assert_eq!(format_unit_value("EUR", -12.3), "EUR -12,30");
    }
}
