//! The interactive query loop.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tickchart_core::{
    run_query, CalendarDate, ChartKind, ChartWriter, EmptyResult, FetchErrorKind, Granularity,
    IntradayInterval, QueryError, QueryOutcome, QueryPlan, SeriesFetcher, Symbol,
};

use crate::prompt::Prompter;

/// Launches a viewer for a freshly written chart.
pub type ChartOpener = Box<dyn Fn(&Path) -> io::Result<()>>;

enum Flow {
    /// Input was rejected; start over without asking to continue.
    Restart,
    /// The query ran (successfully or not); ask whether to continue.
    Finished,
    /// Input is exhausted.
    Exit,
}

enum Charted {
    Saved(PathBuf),
    Empty(EmptyResult),
}

pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    fetcher: SeriesFetcher,
    writer: ChartWriter,
    interval: IntradayInterval,
    opener: Option<ChartOpener>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(prompter: Prompter<R, W>, fetcher: SeriesFetcher, writer: ChartWriter) -> Self {
        Self {
            prompter,
            fetcher,
            writer,
            interval: IntradayInterval::default(),
            opener: None,
        }
    }

    pub fn with_interval(mut self, interval: IntradayInterval) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_opener(mut self, opener: ChartOpener) -> Self {
        self.opener = Some(opener);
        self
    }

    /// Runs queries until the user declines to continue or input ends.
    ///
    /// Only terminal I/O failures end the loop with an error.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            match self.run_once().await? {
                Flow::Restart => continue,
                Flow::Exit => break,
                Flow::Finished => {
                    if !self.prompter.confirm_another()? {
                        break;
                    }
                }
            }
        }

        self.prompter.say("Exiting the program.")
    }

    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    async fn run_once(&mut self) -> io::Result<Flow> {
        let Some(raw_symbol) = self.prompter.ask_symbol()? else {
            return Ok(Flow::Exit);
        };
        let Some(chart_kind) = self.prompter.choose_chart_kind()? else {
            return Ok(Flow::Exit);
        };
        let Some(granularity) = self.prompter.choose_granularity()? else {
            return Ok(Flow::Exit);
        };

        let symbol = match Symbol::parse(&raw_symbol) {
            Ok(symbol) => symbol,
            Err(error) => {
                self.prompter.say(format!("Error: {error}."))?;
                return Ok(Flow::Restart);
            }
        };

        let Some(raw_start) = self.prompter.ask_start_date()? else {
            return Ok(Flow::Exit);
        };
        let start = match CalendarDate::parse(raw_start.trim()) {
            Ok(date) => date,
            Err(error) => {
                tracing::debug!(%error, "rejected start date");
                self.prompter.say("Invalid date format. Please use YYYY-MM-DD.")?;
                self.prompter.say("Error: Invalid start date provided.")?;
                return Ok(Flow::Restart);
            }
        };

        let plan = if granularity == Granularity::Intraday {
            let plan = QueryPlan::intraday(symbol, start, self.interval);
            self.prompter.say(format!(
                "Fetching intraday data for {} for {}...",
                plan.symbol(),
                start.year_month()
            ))?;
            plan
        } else {
            let Some(raw_end) = self.prompter.ask_end_date()? else {
                return Ok(Flow::Exit);
            };
            let plan = CalendarDate::parse(raw_end.trim())
                .and_then(|end| QueryPlan::over_range(symbol, granularity, start, end));
            match plan {
                Ok(plan) => {
                    self.prompter
                        .say(format!("Fetching data for {}...", plan.symbol()))?;
                    plan
                }
                Err(error) => {
                    tracing::debug!(%error, "rejected date window");
                    self.prompter.say("Error: Invalid date(s) provided.")?;
                    return Ok(Flow::Restart);
                }
            }
        };

        match self.chart(&plan, chart_kind).await {
            Ok(Charted::Saved(path)) => {
                self.prompter
                    .say(format!("Chart saved to {}.", display_name(&path)))?;
                self.open(&path)?;
            }
            Ok(Charted::Empty(reason)) => self.prompter.say(reason.message())?,
            Err(QueryError::Fetch(error)) if error.kind() == FetchErrorKind::NoData => {
                self.prompter.say(format!("{}.", capitalize_first(error.message())))?;
                self.prompter.say(if granularity.is_intraday() {
                    "No data available for the given month."
                } else {
                    "No data available for the given date range."
                })?;
            }
            Err(error) => {
                tracing::error!(%error, symbol = %plan.symbol(), "query failed");
                self.prompter.say(format!("An error occurred: {error}"))?;
            }
        }

        Ok(Flow::Finished)
    }

    async fn chart(&self, plan: &QueryPlan, kind: ChartKind) -> Result<Charted, QueryError> {
        match run_query(&self.fetcher, plan).await? {
            QueryOutcome::Table(table) => Ok(Charted::Saved(self.writer.write(
                &table,
                kind,
                plan.symbol(),
            )?)),
            QueryOutcome::Empty(reason) => Ok(Charted::Empty(reason)),
        }
    }

    fn open(&mut self, path: &Path) -> io::Result<()> {
        let Some(opener) = &self.opener else {
            return Ok(());
        };

        match opener(path) {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::warn!(%error, path = %path.display(), "could not open chart");
                self.prompter
                    .say(format!("Could not open the chart in a browser: {error}"))
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) if path.parent() == Some(Path::new(".")) => name.to_string_lossy().into_owned(),
        _ => path.display().to_string(),
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
