use crate::domain::FilteredTable;

use super::ChartKind;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 130.0;
const Y_GUIDES: usize = 6;
const MAX_X_LABELS: usize = 20;

/// Series drawn on every chart, in legend order.
pub const SERIES_NAMES: [&str; 4] = ["Open Price", "High Price", "Low Price", "Close Price"];
const SERIES_COLORS: [&str; 4] = ["#F44336", "#3F51B5", "#009688", "#FFC107"];

struct Plot {
    lo: f64,
    hi: f64,
    rows: usize,
}

impl Plot {
    fn new(table: &FilteredTable) -> Self {
        let (low, high) = table.price_range().unwrap_or((0.0, 1.0));
        let pad = if high > low { (high - low) * 0.05 } else { low.abs().max(1.0) * 0.05 };
        Self {
            lo: low - pad,
            hi: high + pad,
            rows: table.len(),
        }
    }

    fn inner_width(&self) -> f64 {
        WIDTH - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn inner_height(&self) -> f64 {
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn slot_width(&self) -> f64 {
        self.inner_width() / self.rows.max(1) as f64
    }

    fn slot_center(&self, index: usize) -> f64 {
        MARGIN_LEFT + self.slot_width() * (index as f64 + 0.5)
    }

    fn y(&self, value: f64) -> f64 {
        let share = (value - self.lo) / (self.hi - self.lo);
        MARGIN_TOP + self.inner_height() * (1.0 - share)
    }

    fn baseline(&self) -> f64 {
        MARGIN_TOP + self.inner_height()
    }
}

/// Renders `table` as a standalone SVG document.
pub fn render_svg(table: &FilteredTable, kind: ChartKind, title: &str) -> String {
    let plot = Plot::new(table);
    let columns = [table.opens(), table.highs(), table.lows(), table.closes()];

    let mut svg = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" \
         viewBox=\"0 0 {WIDTH} {HEIGHT}\" font-family=\"sans-serif\">\n\
         <rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n\
         <text x=\"{:.1}\" y=\"30\" text-anchor=\"middle\" font-size=\"18\">{}</text>\n",
        WIDTH / 2.0,
        escape(title)
    );

    push_y_guides(&mut svg, &plot);
    push_x_labels(&mut svg, &plot, &table.labels());

    match kind {
        ChartKind::Bar => push_bars(&mut svg, &plot, &columns),
        ChartKind::Line => push_lines(&mut svg, &plot, &columns),
    }

    push_legend(&mut svg);
    svg.push_str("</svg>\n");
    svg
}

fn push_y_guides(svg: &mut String, plot: &Plot) {
    svg.push_str("<g class=\"y-guides\" font-size=\"11\" fill=\"#555555\">\n");
    for step in 0..Y_GUIDES {
        let value = plot.lo + (plot.hi - plot.lo) * step as f64 / (Y_GUIDES - 1) as f64;
        let y = plot.y(value);
        svg.push_str(&format!(
            "<line x1=\"{MARGIN_LEFT}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"#DDDDDD\"/>\n\
             <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\">{value:.2}</text>\n",
            WIDTH - MARGIN_RIGHT,
            MARGIN_LEFT - 6.0,
            y + 4.0,
        ));
    }
    svg.push_str("</g>\n");
}

fn push_x_labels(svg: &mut String, plot: &Plot, labels: &[&str]) {
    let every = labels.len().div_ceil(MAX_X_LABELS).max(1);
    let y = plot.baseline() + 14.0;

    svg.push_str("<g class=\"x-labels\" font-size=\"10\" fill=\"#555555\">\n");
    for (index, label) in labels.iter().enumerate().filter(|(index, _)| index % every == 0) {
        let x = plot.slot_center(index);
        svg.push_str(&format!(
            "<text x=\"{x:.1}\" y=\"{y:.1}\" text-anchor=\"end\" transform=\"rotate(-45 {x:.1} {y:.1})\">{}</text>\n",
            escape(label)
        ));
    }
    svg.push_str("</g>\n");
}

fn push_bars(svg: &mut String, plot: &Plot, columns: &[Vec<f64>; 4]) {
    let group = plot.slot_width() * 0.8;
    let bar = group / columns.len() as f64;

    for (series, values) in columns.iter().enumerate() {
        svg.push_str(&format!(
            "<g class=\"series\" data-name=\"{}\" fill=\"{}\">\n",
            SERIES_NAMES[series], SERIES_COLORS[series]
        ));
        for (index, value) in values.iter().enumerate() {
            let x = plot.slot_center(index) - group / 2.0 + bar * series as f64;
            let top = plot.y(*value);
            svg.push_str(&format!(
                "<rect x=\"{x:.2}\" y=\"{top:.2}\" width=\"{bar:.2}\" height=\"{:.2}\"><title>{value}</title></rect>\n",
                (plot.baseline() - top).max(0.0)
            ));
        }
        svg.push_str("</g>\n");
    }
}

fn push_lines(svg: &mut String, plot: &Plot, columns: &[Vec<f64>; 4]) {
    for (series, values) in columns.iter().enumerate() {
        let color = SERIES_COLORS[series];
        let points = values
            .iter()
            .enumerate()
            .map(|(index, value)| format!("{:.2},{:.2}", plot.slot_center(index), plot.y(*value)))
            .collect::<Vec<_>>()
            .join(" ");

        svg.push_str(&format!(
            "<g class=\"series\" data-name=\"{}\">\n\
             <polyline points=\"{points}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"2\"/>\n",
            SERIES_NAMES[series]
        ));
        for (index, value) in values.iter().enumerate() {
            svg.push_str(&format!(
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"3\" fill=\"{color}\"><title>{value}</title></circle>\n",
                plot.slot_center(index),
                plot.y(*value)
            ));
        }
        svg.push_str("</g>\n");
    }
}

fn push_legend(svg: &mut String) {
    let y = HEIGHT - 24.0;
    svg.push_str("<g class=\"legend\" font-size=\"12\">\n");
    for (series, name) in SERIES_NAMES.iter().enumerate() {
        let x = MARGIN_LEFT + 160.0 * series as f64;
        svg.push_str(&format!(
            "<rect x=\"{x:.1}\" y=\"{:.1}\" width=\"12\" height=\"12\" fill=\"{}\"/>\n\
             <text x=\"{:.1}\" y=\"{y:.1}\">{name}</text>\n",
            y - 10.0,
            SERIES_COLORS[series],
            x + 18.0,
        ));
    }
    svg.push_str("</g>\n");
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
