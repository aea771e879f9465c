//! One interactive query: validate the window, fetch once, narrow the
//! series.

use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::domain::{CalendarDate, FilteredTable, Granularity, IntradayInterval, Symbol};
use crate::error::{ChartError, ValidationError};
use crate::fetch::{FetchError, SeriesFetcher, SeriesRequest};
use crate::filter::{filter_by_day, filter_by_range, FilterError};

/// Date window applied after fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// Inclusive `[start, end]`, compared on the date part of each key.
    Range { start: CalendarDate, end: CalendarDate },
    /// A single trading day of an intraday series.
    Day(CalendarDate),
}

/// Validated query, ready to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    request: SeriesRequest,
    window: DateWindow,
}

impl QueryPlan {
    /// Intraday query for one day; the month selector is derived from `day`.
    pub fn intraday(symbol: Symbol, day: CalendarDate, interval: IntradayInterval) -> Self {
        Self {
            request: SeriesRequest::new(symbol, Granularity::Intraday)
                .with_interval(interval)
                .with_month(day.year_month()),
            window: DateWindow::Day(day),
        }
    }

    /// Query over an inclusive date range. Rejects `end < start`.
    pub fn over_range(
        symbol: Symbol,
        granularity: Granularity,
        start: CalendarDate,
        end: CalendarDate,
    ) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::EndBeforeStart {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(Self {
            request: SeriesRequest::new(symbol, granularity),
            window: DateWindow::Range { start, end },
        })
    }

    pub fn request(&self) -> &SeriesRequest {
        &self.request
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    pub fn symbol(&self) -> &Symbol {
        &self.request.symbol
    }
}

/// Why a successful query produced nothing to chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyResult {
    NoRowsInRange,
    NoRowsForDay,
}

impl EmptyResult {
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoRowsInRange => "No data available for the given date range.",
            Self::NoRowsForDay => "No intraday data available for the given day.",
        }
    }
}

impl Display for EmptyResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of a query that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Table(FilteredTable),
    Empty(EmptyResult),
}

/// Per-query failure; never fatal to the interactive loop.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Chart(#[from] ChartError),
}

/// Fetches the plan's series and applies its window.
pub async fn run_query(
    fetcher: &SeriesFetcher,
    plan: &QueryPlan,
) -> Result<QueryOutcome, QueryError> {
    let series = fetcher.fetch(plan.request()).await?;

    let (table, empty) = match plan.window() {
        DateWindow::Range { start, end } => (
            filter_by_range(&series, start, end)?,
            EmptyResult::NoRowsInRange,
        ),
        DateWindow::Day(day) => (filter_by_day(&series, day)?, EmptyResult::NoRowsForDay),
    };

    if table.is_empty() {
        tracing::warn!(symbol = %plan.symbol(), fetched = series.len(), "{empty}");
        return Ok(QueryOutcome::Empty(empty));
    }

    let rows = table.rows();
    let (min_low, max_high) = table.price_range().unwrap_or_default();
    tracing::info!(
        symbol = %plan.symbol(),
        rows = rows.len(),
        first = rows.first().map(|row| row.label.as_str()).unwrap_or_default(),
        last = rows.last().map(|row| row.label.as_str()).unwrap_or_default(),
        min_low,
        max_high,
        "filtered series"
    );

    Ok(QueryOutcome::Table(table))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> CalendarDate {
        CalendarDate::parse(raw).expect("valid date")
    }

    fn symbol() -> Symbol {
        Symbol::parse("AAPL").expect("valid symbol")
    }

    #[test]
    fn range_plan_rejects_inverted_window() {
        let err = QueryPlan::over_range(symbol(), Granularity::Daily, date("2023-02-01"), date("2023-01-01"))
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::EndBeforeStart { .. }));
    }

    #[test]
    fn range_plan_accepts_single_day_window() {
        let plan = QueryPlan::over_range(symbol(), Granularity::Weekly, date("2023-01-06"), date("2023-01-06"))
            .expect("same-day window is valid");
        assert_eq!(plan.request().month, None);
        assert_eq!(plan.request().granularity, Granularity::Weekly);
    }

    #[test]
    fn intraday_plan_derives_month_from_day() {
        let plan = QueryPlan::intraday(symbol(), date("2023-03-15"), IntradayInterval::FiveMinutes);
        assert_eq!(plan.request().month.map(|m| m.to_string()).as_deref(), Some("2023-03"));
        assert_eq!(plan.request().interval, IntradayInterval::FiveMinutes);
        assert_eq!(plan.window(), DateWindow::Day(date("2023-03-15")));
    }

    #[test]
    fn empty_messages_are_distinct() {
        assert_ne!(EmptyResult::NoRowsInRange.message(), EmptyResult::NoRowsForDay.message());
    }
}
