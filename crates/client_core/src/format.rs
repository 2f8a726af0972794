//! Display formatting for amounts and payment dates, and lenient parsing of
//! the decimal text the clerk types.

use std::fmt::Write as _;

use chrono::{
    format::{Item, StrftimeItems},
    DateTime, Local, NaiveDate, NaiveDateTime,
};

use crate::settings::ClientSettings;

/// How amounts and dates appear in the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub currency_symbol: String,
    pub date_format: String,
}

impl Default for Presentation {
    fn default() -> Self {
        Self::from(&ClientSettings::default())
    }
}

impl From<&ClientSettings> for Presentation {
    fn from(settings: &ClientSettings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
        }
    }
}

impl Presentation {
    pub fn currency(&self, amount: f64) -> String {
        format!("{} {}", self.currency_symbol, fixed2(amount))
    }

    /// Short local date for a `date_paid` value. Text that is not a
    /// recognizable date, or that the date format cannot render, is shown
    /// unchanged.
    pub fn short_date(&self, raw: &str) -> String {
        let Some(date) = parse_payment_date(raw) else {
            return raw.trim().to_string();
        };
        let mut rendered = String::new();
        match write!(rendered, "{}", date.format(&self.date_format)) {
            Ok(()) => rendered,
            Err(_) => raw.trim().to_string(),
        }
    }
}

/// Whether chrono understands every specifier in a strftime format.
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

pub fn fixed2(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Parses a decimal input, returning `None` for blank or non-numeric text.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_payment_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Local).date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ts| ts.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_use_two_decimals_and_symbol() {
        let presentation = Presentation::default();
        assert_eq!(presentation.currency(200.0), "₹ 200.00");
        assert_eq!(presentation.currency(1234.5), "₹ 1234.50");
        assert_eq!(fixed2(0.0), "0.00");
        assert_eq!(fixed2(300.456), "300.46");
    }

    #[test]
    fn iso_dates_render_as_short_dates() {
        let presentation = Presentation::default();
        assert_eq!(presentation.short_date("2024-01-05"), "1/5/2024");
        assert_eq!(presentation.short_date("2024-11-25T09:30:00"), "11/25/2024");
    }

    #[test]
    fn custom_date_format_is_honored() {
        let presentation = Presentation {
            currency_symbol: "$".into(),
            date_format: "%d-%m-%Y".into(),
        };
        assert_eq!(presentation.short_date("2024-01-05"), "05-01-2024");
        assert_eq!(presentation.currency(5.0), "$ 5.00");
    }

    #[test]
    fn unknown_specifier_renders_raw_date_instead_of_panicking() {
        let presentation = Presentation {
            currency_symbol: "₹".into(),
            date_format: "%Q".into(),
        };
        assert_eq!(presentation.short_date("2024-01-05"), "2024-01-05");
    }

    #[test]
    fn date_format_validation() {
        assert!(is_valid_date_format("%-m/%-d/%Y"));
        assert!(is_valid_date_format("%d %b %Y"));
        assert!(!is_valid_date_format("%Q"));
        assert!(!is_valid_date_format("%Y-%m-%"));
    }

    #[test]
    fn unparseable_dates_pass_through() {
        assert_eq!(Presentation::default().short_date(" someday "), "someday");
    }

    #[test]
    fn decimal_parsing_rejects_blank_and_garbage() {
        assert_eq!(parse_decimal(" 1500 "), Some(1500.0));
        assert_eq!(parse_decimal("12.75"), Some(12.75));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("inf"), None);
    }
}
