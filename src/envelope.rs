// Result envelope assembly and the searched date window
use chrono::{Duration, Local, NaiveDate};
use tracing::warn;

use crate::flight::{Offer, ResultEnvelope};

pub const SUCCESS_MESSAGE: &str = "Success";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch flights data";

// Dates searched, formatted d.m.yyyy without zero padding (18.8.2025)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchWindow {
    pub start: String,
    pub end: String,
}

impl SearchWindow {
    pub fn starting(from: NaiveDate, days: i64) -> Self {
        // Saturates at the last representable date instead of overflowing
        let until = Duration::try_days(days)
            .and_then(|span| from.checked_add_signed(span))
            .unwrap_or(NaiveDate::MAX);
        Self {
            start: format_day(from),
            end: format_day(until),
        }
    }

    pub fn today(days: i64) -> Self {
        Self::starting(Local::now().date_naive(), days)
    }
}

pub fn format_day(date: NaiveDate) -> String {
    date.format("%-d.%-m.%Y").to_string()
}

// Wraps the outcome of one fetch. Any status other than 200 empties the
// offer list; the window and source are always reported.
pub fn assemble(
    fetch_status: u16,
    offers: Vec<Offer>,
    window: &SearchWindow,
    source: &str,
) -> ResultEnvelope {
    if fetch_status == 200 {
        return envelope(fetch_status, SUCCESS_MESSAGE.to_string(), offers, window, source);
    }

    warn!(status = fetch_status, url = source, "fetch did not succeed");
    envelope(
        fetch_status,
        FETCH_FAILED_MESSAGE.to_string(),
        Vec::new(),
        window,
        source,
    )
}

// Envelope for a failure raised anywhere upstream of assembly
pub fn assemble_error(
    error: &dyn std::error::Error,
    window: &SearchWindow,
    source: &str,
) -> ResultEnvelope {
    warn!(error = %error, url = source, "flight search failed");
    envelope(500, format!("Error: {error}"), Vec::new(), window, source)
}

fn envelope(
    status: u16,
    message: String,
    offers: Vec<Offer>,
    window: &SearchWindow,
    source: &str,
) -> ResultEnvelope {
    ResultEnvelope {
        status,
        message,
        offers,
        start_date: window.start.clone(),
        end_date: window.end.clone(),
        source: source.to_string(),
    }
}
