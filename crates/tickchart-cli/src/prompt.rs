//! Line-oriented prompts over any reader/writer pair.

use std::io::{self, BufRead, Write};

use tickchart_core::{ChartKind, Granularity, PromptDefaults};

/// Interactive prompt reader. `None` from a read means input is exhausted.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    defaults: PromptDefaults,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            defaults: PromptDefaults::default(),
        }
    }

    /// Prints a full line to the user.
    pub fn say(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", message.as_ref())
    }

    /// Shows `prompt` and reads one line without its line ending.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }

    pub fn ask_symbol(&mut self) -> io::Result<Option<String>> {
        self.ask("Enter the stock symbol (AAPL, GOOGL...): ")
    }

    /// `1` picks bar, `2` picks line; anything else falls back to the default.
    pub fn choose_chart_kind(&mut self) -> io::Result<Option<ChartKind>> {
        self.say("Chart Types")?;
        self.say("----------------------")?;
        self.say("1. Bar")?;
        self.say("2. Line")?;

        let Some(choice) = self.ask("Enter the chart type you want (1, 2): ")? else {
            return Ok(None);
        };

        Ok(Some(match choice.trim() {
            "1" => ChartKind::Bar,
            "2" => ChartKind::Line,
            _ => self.defaults.chart_kind,
        }))
    }

    /// `1`–`4` pick intraday, daily, weekly, monthly; anything else falls
    /// back to the default with a notice.
    pub fn choose_granularity(&mut self) -> io::Result<Option<Granularity>> {
        self.say("Select the Time Series of the chart you want to Generate")?;
        self.say("------------------------------")?;
        self.say("1. Intraday")?;
        self.say("2. Daily")?;
        self.say("3. Weekly")?;
        self.say("4. Monthly")?;

        let Some(choice) = self.ask("Enter time series option (1, 2, 3, 4): ")? else {
            return Ok(None);
        };

        let granularity = match choice.trim() {
            "1" => Granularity::Intraday,
            "2" => Granularity::Daily,
            "3" => Granularity::Weekly,
            "4" => Granularity::Monthly,
            _ => {
                let fallback = self.defaults.granularity;
                self.say(format!(
                    "Invalid choice. Defaulting to {}.",
                    capitalized(fallback.as_str())
                ))?;
                fallback
            }
        };
        Ok(Some(granularity))
    }

    pub fn ask_start_date(&mut self) -> io::Result<Option<String>> {
        self.ask("Enter the start date (YYYY-MM-DD): ")
    }

    pub fn ask_end_date(&mut self) -> io::Result<Option<String>> {
        self.ask("Enter the end date (YYYY-MM-DD): ")
    }

    /// Only an explicit `yes` continues; end of input counts as no.
    pub fn confirm_another(&mut self) -> io::Result<bool> {
        Ok(self
            .ask("Do you want to run another query? (yes/no): ")?
            .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("yes")))
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
