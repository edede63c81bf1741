use chrono::{Local, NaiveDate, NaiveDateTime};

/// Date formats accepted from uploaded trade logs, tried in order.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// Datetime formats whose date part is kept.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Today's date on the local clock; the default trade date for uploads.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a date cell as written by common broker exports.
pub fn parse_trade_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}
