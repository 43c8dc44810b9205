use rust_decimal::Decimal;
use std::fmt;

/// Rupiah has no minor unit in practice, so every amount is kept at scale 0.
pub const RUPIAH_SCALE: u32 = 0;

/// Problems found while coercing a raw store amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountAnomaly {
    /// Column was NULL
    Missing,
    /// Negative value where only non-negative amounts are valid
    Negative,
    /// Value carried sub-rupiah digits and was rounded
    Fractional,
}

impl fmt::Display for AmountAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountAnomaly::Missing => write!(f, "missing amount"),
            AmountAnomaly::Negative => write!(f, "negative amount"),
            AmountAnomaly::Fractional => write!(f, "fractional rupiah amount"),
        }
    }
}

/// Round an amount to rupiah scale (banker's rounding, like the rest of rust_decimal)
pub fn round_rupiah(amount: Decimal) -> Decimal {
    amount.round_dp(RUPIAH_SCALE)
}

/// Coerce a nullable store amount into a usable non-negative rupiah value.
///
/// NULL and negative amounts become zero; fractional amounts are rounded.
/// The anomaly, if any, is returned so the caller can log it.
pub fn coerce_amount(raw: Option<Decimal>) -> (Decimal, Option<AmountAnomaly>) {
    match raw {
        None => (Decimal::ZERO, Some(AmountAnomaly::Missing)),
        Some(value) if value.is_sign_negative() && !value.is_zero() => {
            (Decimal::ZERO, Some(AmountAnomaly::Negative))
        }
        Some(value) if value.fract() != Decimal::ZERO => {
            (round_rupiah(value), Some(AmountAnomaly::Fractional))
        }
        Some(value) => (round_rupiah(value), None),
    }
}

/// Format an amount the way the back-office displays it, e.g. `Rp 1.250.000`
pub fn format_rupiah(amount: Decimal) -> String {
    let rounded = round_rupiah(amount);
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}
