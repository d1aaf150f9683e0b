//! Rupee formatting with Indian digit grouping (`12,34,567.89`).

use chrono::NaiveDate;

pub const RUPEE_SYMBOL: &str = "₹";

/// Formats `amount` with two decimals, Indian grouping and the rupee symbol.
/// Negative values carry a leading minus: `-₹15,000.00`.
pub fn format_inr(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, RUPEE_SYMBOL, format_number(amount.abs()))
}

/// Signed display used for transaction rows: `+₹150.00` / `-₹150.00`.
pub fn format_signed_inr(amount: f64, is_income: bool) -> String {
    let sign = if is_income { '+' } else { '-' };
    format!("{}{}{}", sign, RUPEE_SYMBOL, format_number(amount.abs()))
}

pub fn format_number(value: f64) -> String {
    let body = format!("{:.2}", value);
    match body.split_once('.') {
        Some((int_part, fraction)) => format!("{}.{}", group_indian(int_part), fraction),
        None => group_indian(&body),
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Last three digits form one group; the rest are grouped in pairs.
fn group_indian(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    if digits.len() <= 3 {
        return format!("{}{}", sign, digits);
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{}{},{}", sign, groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits_the_indian_way() {
        assert_eq!(format_inr(45200.5), "₹45,200.50");
        assert_eq!(format_inr(125400.0), "₹1,25,400.00");
        assert_eq!(format_inr(850000.0), "₹8,50,000.00");
        assert_eq!(format_inr(12345678.9), "₹1,23,45,678.90");
        assert_eq!(format_inr(-15000.0), "-₹15,000.00");
        assert_eq!(format_inr(999.0), "₹999.00");
    }

    #[test]
    fn signed_rows_follow_kind() {
        assert_eq!(format_signed_inr(150000.0, true), "+₹1,50,000.00");
        assert_eq!(format_signed_inr(200.0, false), "-₹200.00");
    }

    #[test]
    fn dates_are_short_and_readable() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        assert_eq!(format_date(date), "05 Jun 2024");
    }
}
