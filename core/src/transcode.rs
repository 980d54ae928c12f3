//! Conversion of raw text input into typed values.
//!
//! Malformed text is absent, never an error: it folds into the field's
//! `Required` rule.

use chrono::NaiveDate;

/// Format produced by an HTML date input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which typed value a field's raw text is converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transcode {
    Number,
    Date,
}

impl Transcode {
    /// Whether `raw` yields a value under this conversion.
    pub fn is_present(self, raw: &str) -> bool {
        match self {
            Transcode::Number => as_number(raw).is_some(),
            Transcode::Date => as_date(raw).is_some(),
        }
    }
}

pub fn as_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn as_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_accepts_integers_and_decimals() {
        assert_eq!(as_number("42"), Some(42.0));
        assert_eq!(as_number(" 0 "), Some(0.0));
        assert_eq!(as_number("17.5"), Some(17.5));
    }

    #[test]
    fn number_treats_empty_and_garbage_as_absent() {
        assert_eq!(as_number(""), None);
        assert_eq!(as_number("   "), None);
        assert_eq!(as_number("forty"), None);
        assert_eq!(as_number("NaN"), None);
    }

    #[test]
    fn number_treats_non_finite_as_absent() {
        for raw in ["inf", "infinity", "-inf", "1e400"] {
            assert_eq!(as_number(raw), None, "{raw}");
        }
    }

    #[test]
    fn date_parses_iso_input() {
        assert_eq!(as_date("1990-05-17"), NaiveDate::from_ymd_opt(1990, 5, 17));
    }

    #[test]
    fn date_rejects_other_formats() {
        assert_eq!(as_date(""), None);
        assert_eq!(as_date("17/05/1990"), None);
        assert_eq!(as_date("1990-02-30"), None);
    }
}
