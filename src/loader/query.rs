use chrono::NaiveDate;
use clap::ValueEnum;
use std::fmt;
use thiserror::Error;

/// Reporting window: unrestricted history or an explicit date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFilter {
    #[value(name = "alltime")]
    AllTime,
    Custom,
}

impl ReportFilter {
    /// Value sent as the `filter` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            ReportFilter::AllTime => "alltime",
            ReportFilter::Custom => "custom",
        }
    }
}

impl fmt::Display for ReportFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// A query rejected before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Please select both start and end dates")]
    MissingDates,

    #[error("Future dates are not allowed")]
    FutureDate,

    #[error("Start date must not be after end date")]
    InvertedRange,
}

/// Parameters for one read against a collection endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub filter: ReportFilter,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ReportQuery {
    /// Precondition checks for a custom range: both dates present, neither
    /// in the future, start not after end. All-time queries always pass;
    /// their dates are ignored just as they are omitted from the URL.
    pub fn validate(&self, today: NaiveDate) -> Result<(), QueryError> {
        if self.filter != ReportFilter::Custom {
            return Ok(());
        }

        let (start, end) = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(QueryError::MissingDates),
        };

        if start > today || end > today {
            return Err(QueryError::FutureDate);
        }
        if start > end {
            return Err(QueryError::InvertedRange);
        }

        Ok(())
    }

    /// Query-string form: `filter=...` plus `start_date`/`end_date` for
    /// custom ranges. Dates render as YYYY-MM-DD.
    pub fn query_string(&self) -> String {
        let mut params = format!("filter={}", self.filter.as_param());
        if self.filter == ReportFilter::Custom {
            if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
                params.push_str(&format!("&start_date={start}&end_date={end}"));
            }
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn all_time() -> ReportQuery {
        ReportQuery {
            filter: ReportFilter::AllTime,
            start_date: None,
            end_date: None,
        }
    }

    fn custom(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> ReportQuery {
        ReportQuery {
            filter: ReportFilter::Custom,
            start_date,
            end_date,
        }
    }

    const TODAY: &str = "2026-08-07";

    #[test]
    fn alltime_passes_without_dates() {
        assert_eq!(all_time().validate(date(TODAY)), Ok(()));
    }

    #[test]
    fn alltime_ignores_stray_dates() {
        let query = ReportQuery {
            filter: ReportFilter::AllTime,
            start_date: Some(date("2999-01-01")),
            end_date: None,
        };
        assert_eq!(query.validate(date(TODAY)), Ok(()));
        assert_eq!(query.query_string(), "filter=alltime");
    }

    #[test]
    fn custom_requires_both_dates() {
        let missing_end = custom(Some(date("2026-01-01")), None);
        assert_eq!(missing_end.validate(date(TODAY)), Err(QueryError::MissingDates));

        let missing_start = custom(None, Some(date("2026-01-31")));
        assert_eq!(missing_start.validate(date(TODAY)), Err(QueryError::MissingDates));

        let missing_both = custom(None, None);
        assert_eq!(missing_both.validate(date(TODAY)), Err(QueryError::MissingDates));
    }

    #[test]
    fn custom_rejects_future_dates() {
        let future_end = custom(Some(date("2026-01-01")), Some(date("2026-08-08")));
        assert_eq!(future_end.validate(date(TODAY)), Err(QueryError::FutureDate));

        let future_both = custom(Some(date("2027-01-01")), Some(date("2027-01-02")));
        assert_eq!(future_both.validate(date(TODAY)), Err(QueryError::FutureDate));
    }

    #[test]
    fn custom_rejects_inverted_range() {
        let query = custom(Some(date("2026-02-01")), Some(date("2026-01-01")));
        assert_eq!(query.validate(date(TODAY)), Err(QueryError::InvertedRange));
    }

    #[test]
    fn custom_accepts_valid_range() {
        let query = custom(Some(date("2026-01-01")), Some(date("2026-01-31")));
        assert_eq!(query.validate(date(TODAY)), Ok(()));
        assert_eq!(
            query.query_string(),
            "filter=custom&start_date=2026-01-01&end_date=2026-01-31"
        );
    }

    #[test]
    fn today_is_not_a_future_date() {
        let query = custom(Some(date(TODAY)), Some(date(TODAY)));
        assert_eq!(query.validate(date(TODAY)), Ok(()));
    }

    #[test]
    fn error_messages_are_canonical() {
        assert_eq!(
            QueryError::MissingDates.to_string(),
            "Please select both start and end dates"
        );
        assert_eq!(QueryError::FutureDate.to_string(), "Future dates are not allowed");
        assert_eq!(
            QueryError::InvertedRange.to_string(),
            "Start date must not be after end date"
        );
    }
}
