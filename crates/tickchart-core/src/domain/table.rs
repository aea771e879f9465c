/// Numeric OHLC values of one table row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OhlcValues {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
}

/// A table row labelled by the provider's original timestamp string.
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcRow {
    pub label: String,
    pub values: OhlcValues,
}

/// Chart-ready rows in ascending timestamp order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredTable {
    rows: Vec<OhlcRow>,
}

impl FilteredTable {
    /// Builds a table from rows that are already in ascending order.
    pub(crate) fn from_sorted_rows(rows: Vec<OhlcRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[OhlcRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.label.as_str()).collect()
    }

    pub fn opens(&self) -> Vec<f64> {
        self.column(|values| values.open)
    }

    pub fn highs(&self) -> Vec<f64> {
        self.column(|values| values.high)
    }

    pub fn lows(&self) -> Vec<f64> {
        self.column(|values| values.low)
    }

    pub fn closes(&self) -> Vec<f64> {
        self.column(|values| values.close)
    }

    /// Lowest low and highest high across all rows.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.rows.iter().fold(None, |range, row| {
            let (low, high) = range.unwrap_or((row.values.low, row.values.high));
            Some((low.min(row.values.low), high.max(row.values.high)))
        })
    }

    fn column(&self, pick: impl Fn(&OhlcValues) -> f64) -> Vec<f64> {
        self.rows.iter().map(|row| pick(&row.values)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str, low: f64, high: f64) -> OhlcRow {
        OhlcRow {
            label: label.to_owned(),
            values: OhlcValues {
                open: low,
                high,
                low,
                close: high,
                volume: None,
            },
        }
    }

    #[test]
    fn exposes_columns_in_row_order() {
        let table = FilteredTable::from_sorted_rows(vec![
            row("2023-01-02", 99.0, 101.0),
            row("2023-01-03", 100.0, 104.0),
        ]);

        assert_eq!(table.labels(), vec!["2023-01-02", "2023-01-03"]);
        assert_eq!(table.opens(), vec![99.0, 100.0]);
        assert_eq!(table.highs(), vec![101.0, 104.0]);
        assert_eq!(table.price_range(), Some((99.0, 104.0)));
    }

    #[test]
    fn empty_table_has_no_range() {
        let table = FilteredTable::default();
        assert!(table.is_empty());
        assert_eq!(table.price_range(), None);
    }
}
