use rust_decimal::{Decimal, RoundingStrategy};

/// Whole units with thousands separators, e.g. `-1,234,568`.
pub fn format_amount(value: &Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Share of `value` in `total`, both taken as magnitudes, in percent.
pub fn share_percent(value: &Decimal, total: &Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    (value.abs() / total.abs() * Decimal::ONE_HUNDRED).round_dp(1)
}
