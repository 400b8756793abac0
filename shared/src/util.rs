//! Display helpers shared by the client and its UI

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Format an amount as US dollars, e.g. `$9.75`
pub fn format_usd(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

/// Medium date + short time, e.g. `Oct 18, 2026 at 3:04 PM`
pub fn format_order_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y at %-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(Decimal::new(975, 2)), "$9.75");
        assert_eq!(format_usd(Decimal::new(12, 0)), "$12.00");
        assert_eq!(format_usd(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn test_format_order_date() {
        let date = Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap();
        assert_eq!(format_order_date(&date), "Jan 5, 2026 at 9:30 AM");
    }
}
