//! Calendar date parsing and German display format.

use chrono::NaiveDate;

/// Parse a calendar date in ISO (`2024-01-15`) or German (`15.01.2024`) form.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, "%d.%m.%Y"))
        .ok()
}

/// `dd.mm.yyyy`.
pub fn format_date_de(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Like [`format_date_de`], rendering a missing date as `-`.
pub fn format_opt_date_de(date: Option<NaiveDate>) -> String {
    date.map(format_date_de).unwrap_or_else(|| "-".to_string())
}
