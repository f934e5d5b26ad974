//! Article date formatting.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Long-form date presentation used on result cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStyle {
    /// `2024年1月1日`
    #[default]
    Japanese,
    /// `January 1, 2024`
    English,
}

/// Parses the calendar date of an index `date` field.
///
/// RFC 3339 date-times keep the date in their own offset; anything else is
/// read from its leading `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    let head = raw.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Formats an index date for display, falling back to the raw text.
pub fn format_date(raw: &str, style: DateStyle) -> String {
    let Some(date) = parse_date(raw) else {
        return raw.to_string();
    };
    match style {
        DateStyle::Japanese => format!("{}年{}月{}日", date.year(), date.month(), date.day()),
        DateStyle::English => date.format("%B %-d, %Y").to_string(),
    }
}
