use serde::Deserialize;

/// Price fields of one provider entry, still in the provider's string form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawFields {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
    #[serde(rename = "5. volume", default)]
    pub volume: Option<String>,
}

impl RawFields {
    pub fn new(
        open: impl Into<String>,
        high: impl Into<String>,
        low: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        Self {
            open: open.into(),
            high: high.into(),
            low: low.into(),
            close: close.into(),
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: impl Into<String>) -> Self {
        self.volume = Some(volume.into());
        self
    }
}

/// One `(timestamp, fields)` pair as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSeriesEntry {
    pub timestamp: String,
    pub fields: RawFields,
}

/// Provider series keyed by timestamp string.
///
/// Entries keep whatever order the provider payload yielded; that order
/// carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSeries {
    entries: Vec<RawSeriesEntry>,
}

impl RawSeries {
    pub fn new(entries: Vec<RawSeriesEntry>) -> Self {
        Self { entries }
    }

    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, RawFields)>,
        K: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(timestamp, fields)| RawSeriesEntry {
                    timestamp: timestamp.into(),
                    fields,
                })
                .collect(),
        )
    }

    pub fn entries(&self) -> &[RawSeriesEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RawSeriesEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a RawSeries {
    type Item = &'a RawSeriesEntry;
    type IntoIter = std::slice::Iter<'a, RawSeriesEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
