//! Date windowing over raw provider series.
//!
//! Both filters coerce the surviving entries to numbers and return rows in
//! ascending timestamp order, whatever order the provider used.

use thiserror::Error;

use crate::domain::{
    CalendarDate, FilteredTable, OhlcRow, OhlcValues, RawFields, RawSeries, RawSeriesEntry,
    SeriesTimestamp,
};

/// Entry-level failures while narrowing a series.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("provider timestamp '{timestamp}' does not start with a valid YYYY-MM-DD date")]
    InvalidTimestamp { timestamp: String },

    #[error("field '{field}' of entry '{timestamp}' is not a number: '{value}'")]
    InvalidNumber {
        timestamp: String,
        field: &'static str,
        value: String,
    },
}

/// Keeps entries whose date lies in `[start, end]`, both bounds inclusive.
///
/// Only the date before the first space decides inclusion. Callers validate
/// `start <= end`; an inverted window simply matches nothing.
pub fn filter_by_range(
    series: &RawSeries,
    start: CalendarDate,
    end: CalendarDate,
) -> Result<FilteredTable, FilterError> {
    let mut selected = Vec::new();
    for entry in series {
        let date = entry_date(&entry.timestamp)?;
        if start <= date && date <= end {
            selected.push((sort_key(&entry.timestamp, date), entry));
        }
    }

    let table = into_table(selected)?;
    tracing::debug!(%start, %end, input = series.len(), rows = table.len(), "range filter");
    Ok(table)
}

/// Keeps intraday entries recorded on `target`.
///
/// Only the leading `YYYY-MM-DD` of each timestamp is compared.
pub fn filter_by_day(series: &RawSeries, target: CalendarDate) -> Result<FilteredTable, FilterError> {
    let target_prefix = target.to_string();

    let selected = series
        .iter()
        .filter(|entry| entry.timestamp.get(..target_prefix.len()) == Some(target_prefix.as_str()))
        .map(|entry| (sort_key(&entry.timestamp, target), entry))
        .collect();

    let table = into_table(selected)?;
    tracing::debug!(%target, input = series.len(), rows = table.len(), "day filter");
    Ok(table)
}

fn entry_date(raw: &str) -> Result<CalendarDate, FilterError> {
    let date_part = raw.split_once(' ').map_or(raw, |(date_part, _)| date_part);
    CalendarDate::parse(date_part).map_err(|_| FilterError::InvalidTimestamp {
        timestamp: raw.to_owned(),
    })
}

/// Ordering key: the full timestamp when its time part parses, otherwise
/// midnight of `date`. The raw key breaks ties.
fn sort_key(raw: &str, date: CalendarDate) -> SeriesTimestamp {
    SeriesTimestamp::parse(raw).unwrap_or_else(|| SeriesTimestamp::from(date))
}

fn into_table(
    mut selected: Vec<(SeriesTimestamp, &RawSeriesEntry)>,
) -> Result<FilteredTable, FilterError> {
    selected.sort_by(|(left_at, left), (right_at, right)| {
        left_at
            .cmp(right_at)
            .then_with(|| left.timestamp.cmp(&right.timestamp))
    });

    selected
        .into_iter()
        .map(|(_, entry)| {
            Ok(OhlcRow {
                label: entry.timestamp.clone(),
                values: coerce_fields(&entry.timestamp, &entry.fields)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(FilteredTable::from_sorted_rows)
}

fn coerce_fields(timestamp: &str, fields: &RawFields) -> Result<OhlcValues, FilterError> {
    let number = |field: &'static str, value: &str| {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|parsed| parsed.is_finite())
            .ok_or_else(|| FilterError::InvalidNumber {
                timestamp: timestamp.to_owned(),
                field,
                value: value.to_owned(),
            })
    };

    Ok(OhlcValues {
        open: number("open", &fields.open)?,
        high: number("high", &fields.high)?,
        low: number("low", &fields.low)?,
        close: number("close", &fields.close)?,
        volume: fields
            .volume
            .as_deref()
            .map(|raw| number("volume", raw))
            .transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> CalendarDate {
        CalendarDate::parse(raw).expect("valid date")
    }

    fn fields(open: &str) -> RawFields {
        RawFields::new(open, "200.0", "50.0", "150.0")
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let series = RawSeries::from_pairs([
            ("2022-12-31", fields("1")),
            ("2023-01-01", fields("2")),
            ("2023-01-31", fields("3")),
            ("2023-02-01", fields("4")),
        ]);

        let table = filter_by_range(&series, date("2023-01-01"), date("2023-01-31")).expect("filter");
        assert_eq!(table.labels(), vec!["2023-01-01", "2023-01-31"]);
        assert_eq!(table.opens(), vec![2.0, 3.0]);
    }

    #[test]
    fn range_output_is_chronological() {
        let series = RawSeries::from_pairs([
            ("2023-01-05", fields("105")),
            ("2023-01-02", fields("100")),
            ("2023-01-03", fields("101")),
        ]);

        let table = filter_by_range(&series, date("2023-01-01"), date("2023-01-31")).expect("filter");
        assert_eq!(table.labels(), vec!["2023-01-02", "2023-01-03", "2023-01-05"]);
    }

    #[test]
    fn range_filter_uses_date_part_of_intraday_keys() {
        let series = RawSeries::from_pairs([
            ("2023-01-02 16:00:00", fields("2")),
            ("2023-01-02 09:30:00", fields("1")),
            ("2023-01-04 09:30:00", fields("3")),
        ]);

        let table = filter_by_range(&series, date("2023-01-02"), date("2023-01-03")).expect("filter");
        assert_eq!(table.labels(), vec!["2023-01-02 09:30:00", "2023-01-02 16:00:00"]);
    }

    #[test]
    fn no_match_yields_empty_table() {
        let series = RawSeries::from_pairs([("2023-03-01", fields("1"))]);
        let table = filter_by_range(&series, date("2023-01-01"), date("2023-01-31")).expect("filter");
        assert!(table.is_empty());
    }

    #[test]
    fn day_filter_excludes_adjacent_days() {
        let series = RawSeries::from_pairs([
            ("2023-01-01 23:59:59", fields("0")),
            ("2023-01-02 00:00:00", fields("1")),
            ("2023-01-02 23:59:59", fields("2")),
            ("2023-01-03 00:00:00", fields("3")),
        ]);

        let table = filter_by_day(&series, date("2023-01-02")).expect("filter");
        assert_eq!(table.labels(), vec!["2023-01-02 00:00:00", "2023-01-02 23:59:59"]);
    }

    #[test]
    fn unparseable_number_is_reported_with_context() {
        let series = RawSeries::from_pairs([("2023-01-02", fields("n/a"))]);
        let err = filter_by_range(&series, date("2023-01-01"), date("2023-01-31"))
            .expect_err("must fail");
        assert_eq!(
            err,
            FilterError::InvalidNumber {
                timestamp: String::from("2023-01-02"),
                field: "open",
                value: String::from("n/a"),
            }
        );
    }

    #[test]
    fn out_of_window_entries_are_not_coerced() {
        let series = RawSeries::from_pairs([
            ("2023-01-02", fields("1")),
            ("2024-01-02", fields("garbage")),
        ]);
        let table = filter_by_range(&series, date("2023-01-01"), date("2023-01-31")).expect("filter");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn volume_is_coerced_when_present() {
        let series = RawSeries::from_pairs([("2023-01-02", fields("1").with_volume("12345"))]);
        let table = filter_by_range(&series, date("2023-01-02"), date("2023-01-02")).expect("filter");
        assert_eq!(table.rows()[0].values.volume, Some(12345.0));
    }

    #[test]
    fn day_filter_keeps_entries_with_unusual_time_part() {
        let series = RawSeries::from_pairs([
            ("2023-01-02 09:30", fields("2")),
            ("2023-01-02 09:15:00", fields("1")),
            ("2023-01-03 09:30:00", fields("3")),
        ]);

        let table = filter_by_day(&series, date("2023-01-02")).expect("filter");
        assert_eq!(table.labels(), vec!["2023-01-02 09:30", "2023-01-02 09:15:00"]);
    }

    #[test]
    fn range_filter_decides_on_date_part_only() {
        let series = RawSeries::from_pairs([
            ("2023-01-02 09:30", fields("1")),
            ("2023-01-03 09:30:00", fields("2")),
        ]);

        let table = filter_by_range(&series, date("2023-01-02"), date("2023-01-02")).expect("filter");
        assert_eq!(table.labels(), vec!["2023-01-02 09:30"]);
    }

    #[test]
    fn malformed_timestamp_fails_range_filter() {
        let series = RawSeries::from_pairs([("01/02/2023", fields("1"))]);
        let err = filter_by_range(&series, date("2023-01-01"), date("2023-01-31"))
            .expect_err("must fail");
        assert!(matches!(err, FilterError::InvalidTimestamp { .. }));
    }
}
