use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

const MONTHS: [(&str, &str); 12] = [
    ("Jan", "01"),
    ("Feb", "02"),
    ("Mar", "03"),
    ("Apr", "04"),
    ("May", "05"),
    ("Jun", "06"),
    ("Jul", "07"),
    ("Aug", "08"),
    ("Sep", "09"),
    ("Oct", "10"),
    ("Nov", "11"),
    ("Dec", "12"),
];

/// How malformed `DD-Mon-YY` tokens are treated.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Bad tokens fall back to today's date; unknown months become January.
    #[default]
    Lenient,
    /// Bad tokens are reported as `ForecastError`.
    Strict,
}

impl ParsePolicy {
    /// Parses `token` under this policy. Never returns `Err` when lenient.
    pub fn parse(self, token: &str, today: NaiveDate) -> Result<NaiveDate> {
        match self {
            ParsePolicy::Lenient => Ok(parse_date_token(token, today)),
            ParsePolicy::Strict => parse_date_token_strict(token),
        }
    }
}

/// Lenient parse of a `DD-Mon-YY` token. Anything unparseable yields `today`.
pub fn parse_date_token(token: &str, today: NaiveDate) -> NaiveDate {
    match parse_token(token, true) {
        Ok(date) => date,
        Err(e) => {
            warn!(token, error = %e, fallback = %today, "unparseable date token, using today");
            today
        }
    }
}

/// Strict parse of a `DD-Mon-YY` token.
pub fn parse_date_token_strict(token: &str) -> Result<NaiveDate> {
    parse_token(token, false)
}

/// Renders `date` as `DD-Mon-YY`, e.g. `07-Aug-25`.
pub fn format_date_token(date: NaiveDate) -> String {
    date.format("%d-%b-%y").to_string()
}

fn parse_token(token: &str, default_unknown_month: bool) -> Result<NaiveDate> {
    let parts: Vec<&str> = token.split('-').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(ForecastError::InvalidDateToken(token.to_string()));
    };

    let month = match MONTHS.iter().find(|(abbr, _)| abbr == month) {
        Some((_, num)) => *num,
        None if default_unknown_month => "01",
        None => return Err(ForecastError::UnknownMonth(token.to_string())),
    };
    let year = if year.len() == 2 {
        format!("20{}", year)
    } else {
        year.to_string()
    };

    let iso = format!("{}-{}-{:0>2}", year, month, day);
    NaiveDate::parse_from_str(&iso, "%Y-%m-%d")
        .map_err(|_| ForecastError::InvalidDateToken(token.to_string()))
}
