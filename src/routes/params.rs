use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Default page size for order listings.
pub const ORDER_PAGE_SIZE: i64 = 10;
/// Hard ceiling on any client-requested page size.
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self, default_per_page: i64) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self
            .per_page
            .unwrap_or(default_per_page)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

/// Route listing filters: case-insensitive substring matches against the
/// endpoint airport names. Empty values behave like absent ones.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RouteFilterQuery {
    pub source: Option<String>,
    pub destination: Option<String>,
}

impl RouteFilterQuery {
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref().filter(|s| !s.is_empty())
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref().filter(|s| !s.is_empty())
    }
}

/// Flight listing filters, both `YYYY-MM-DD`. A malformed value is a client
/// error, not a silently dropped filter.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct FlightFilterQuery {
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
}

impl FlightFilterQuery {
    /// The UTC half-open window `[day, day + 1)` covering the requested
    /// departure date.
    pub fn departure_window(&self) -> AppResult<Option<(DateTime<Utc>, DateTime<Utc>)>> {
        let Some(raw) = self.departure_time.as_deref().filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        let date = parse_filter_date("departure_time", raw)?;
        let next = date
            .checked_add_days(Days::new(1))
            .ok_or_else(|| AppError::validation("departure_time", "Date out of range."))?;
        Ok(Some((day_start(date), day_start(next))))
    }

    /// The inclusive UTC lower bound for the arrival date. Open-ended on
    /// purpose: "arriving on or after this day".
    pub fn arrival_floor(&self) -> AppResult<Option<DateTime<Utc>>> {
        let Some(raw) = self.arrival_time.as_deref().filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        let date = parse_filter_date("arrival_time", raw)?;
        Ok(Some(day_start(date)))
    }
}

fn parse_filter_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::validation(
            field,
            format!("Date has wrong format: {value}. Use YYYY-MM-DD."),
        )
    })
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn departure_filter_spans_exactly_one_day() {
        let query = FlightFilterQuery {
            departure_time: Some("2023-12-12".into()),
            arrival_time: None,
        };
        let (start, end) = query.departure_window().unwrap().unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2023, 12, 12, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2023, 12, 13, 0, 0, 0).unwrap());
    }

    #[test]
    fn arrival_filter_is_a_lower_bound_only() {
        let query = FlightFilterQuery {
            departure_time: None,
            arrival_time: Some("2023-12-13".into()),
        };
        let floor = query.arrival_floor().unwrap().unwrap();
        assert_eq!(floor, Utc.with_ymd_and_hms(2023, 12, 13, 0, 0, 0).unwrap());
    }

    #[test]
    fn absent_and_empty_filters_are_no_ops() {
        let query = FlightFilterQuery::default();
        assert!(query.departure_window().unwrap().is_none());
        assert!(query.arrival_floor().unwrap().is_none());

        let query = FlightFilterQuery {
            departure_time: Some(String::new()),
            arrival_time: Some(String::new()),
        };
        assert!(query.departure_window().unwrap().is_none());
        assert!(query.arrival_floor().unwrap().is_none());
    }

    #[test]
    fn malformed_dates_are_field_errors() {
        let query = FlightFilterQuery {
            departure_time: Some("12-12-2023".into()),
            arrival_time: None,
        };
        match query.departure_window() {
            Err(AppError::Validation(errors)) => {
                assert!(errors.contains_key("departure_time"));
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn pagination_clamps_to_the_ceiling() {
        let pagination = Pagination {
            page: Some(2),
            per_page: Some(500),
        };
        let (page, per_page, offset) = pagination.normalize(ORDER_PAGE_SIZE);
        assert_eq!(page, 2);
        assert_eq!(per_page, MAX_PAGE_SIZE);
        assert_eq!(offset, MAX_PAGE_SIZE);
    }

    #[test]
    fn pagination_defaults_apply_when_unset() {
        let (page, per_page, offset) = Pagination::default().normalize(ORDER_PAGE_SIZE);
        assert_eq!((page, per_page, offset), (1, ORDER_PAGE_SIZE, 0));
    }

    #[test]
    fn empty_route_filters_are_ignored() {
        let query = RouteFilterQuery {
            source: Some(String::new()),
            destination: Some("atlanta".into()),
        };
        assert_eq!(query.source(), None);
        assert_eq!(query.destination(), Some("atlanta"));
    }
}
