const NAIRA_SIGN: char = '₦';

/// Formats an amount the way the storefront displays naira, e.g. `₦35,750.00`.
pub fn format_naira(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{NAIRA_SIGN}{amount}");
    }

    let rendered = format!("{:.2}", amount.abs());
    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));
    let negative = amount < 0.0 && rendered.bytes().any(|b| matches!(b, b'1'..=b'9'));

    let mut formatted = String::with_capacity(rendered.len() + whole.len() / 3 + 2);
    if negative {
        formatted.push('-');
    }
    formatted.push(NAIRA_SIGN);
    formatted.push_str(&group_thousands(whole));
    formatted.push('.');
    formatted.push_str(fraction);
    formatted
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_two_decimals() {
        assert_eq!(format_naira(35_750.0), "₦35,750.00");
        assert_eq!(format_naira(1_234_567.891), "₦1,234,567.89");
        assert_eq!(format_naira(999.5), "₦999.50");
        assert_eq!(format_naira(0.0), "₦0.00");
    }

    #[test]
    fn negative_amounts_carry_a_leading_sign() {
        assert_eq!(format_naira(-1_000.0), "-₦1,000.00");
        assert_eq!(format_naira(-0.001), "₦0.00");
    }
}
