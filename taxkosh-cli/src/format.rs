use rust_decimal::Decimal;
use taxkosh_core::calculations::common::round_half_up;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a rupee amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Parses a rupee amount entered on the command line.
///
/// Accepts comma thousands separators and an optional leading `₹`.
/// Empty or whitespace-only input is treated as 0, matching a blank form
/// field. Returns an error and logs when the input is non-empty but not
/// parseable.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = s
        .trim()
        .trim_start_matches('₹')
        .trim()
        .replace(',', "");
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ParseAmountError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Formats an amount as Indian rupees with lakh/crore digit grouping,
/// e.g. `₹12,34,567.89`.
pub fn format_inr(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (rupees, paise) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{sign}₹{}.{paise}", group_indian(rupees))
}

/// Indian grouping: the last three digits form one group, everything
/// before them groups in twos.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);

    let mut out = String::new();
    for group in groups.iter().rev() {
        out.push_str(group);
        out.push(',');
    }
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_amount_accepts_plain_numbers() {
        assert_eq!(parse_amount("500000").unwrap(), dec!(500000));
        assert_eq!(parse_amount("  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_amount_accepts_indian_separators_and_rupee_sign() {
        assert_eq!(parse_amount("1,50,000").unwrap(), dec!(150000));
        assert_eq!(parse_amount("₹ 2,700").unwrap(), dec!(2700));
    }

    #[test]
    fn parse_amount_treats_empty_as_zero() {
        assert_eq!(parse_amount("").unwrap(), dec!(0));
        assert_eq!(parse_amount("   ").unwrap(), dec!(0));
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        assert!(parse_amount("ten lakh").is_err());
    }

    #[test]
    fn format_inr_groups_small_amounts_western_style() {
        assert_eq!(format_inr(dec!(0)), "₹0.00");
        assert_eq!(format_inr(dec!(999)), "₹999.00");
        assert_eq!(format_inr(dec!(1000)), "₹1,000.00");
    }

    #[test]
    fn format_inr_uses_lakh_crore_grouping() {
        assert_eq!(format_inr(dec!(100000)), "₹1,00,000.00");
        assert_eq!(format_inr(dec!(1000000)), "₹10,00,000.00");
        assert_eq!(format_inr(dec!(12345678.9)), "₹1,23,45,678.90");
        assert_eq!(format_inr(dec!(123456789)), "₹12,34,56,789.00");
    }

    #[test]
    fn format_inr_keeps_two_paise_digits() {
        assert_eq!(format_inr(dec!(70200)), "₹70,200.00");
        assert_eq!(format_inr(dec!(12500.2)), "₹12,500.20");
    }

    #[test]
    fn format_inr_handles_negative_amounts() {
        assert_eq!(format_inr(dec!(-25000)), "-₹25,000.00");
    }
}
