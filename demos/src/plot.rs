//! Minimal SVG line charts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, ExplorerResult};

const PALETTE: [&str; 6] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b",
];

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;

/// Canvas settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureConfig {
    pub width: u32,
    pub height: u32,
    pub grid: bool,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            grid: true,
        }
    }
}

/// One labelled curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
}

/// A set of curves over a shared x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub series: Vec<Series>,
}

impl LineChart {
    pub fn new(title: impl Into<String>, x: Vec<f64>) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            x,
            series: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    /// Add a curve. Values beyond the length of the x axis are ignored.
    #[must_use]
    pub fn with_series(mut self, label: impl Into<String>, values: Vec<f64>) -> Self {
        self.series.push(Series {
            label: label.into(),
            values,
        });
        self
    }

    /// Render the chart as a standalone SVG document.
    pub fn render_svg(&self, config: &FigureConfig) -> String {
        let width = f64::from(config.width);
        let height = f64::from(config.height);
        let plot_w = (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
        let plot_h = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);

        let (x_min, x_max) = padded_range(self.x.iter().copied(), 0.0);
        let (y_min, y_max) = padded_range(
            self.series.iter().flat_map(|s| s.values.iter().copied()),
            0.05,
        );
        let sx = |x: f64| MARGIN_LEFT + (x - x_min) / (x_max - x_min) * plot_w;
        let sy = |y: f64| MARGIN_TOP + (y_max - y) / (y_max - y_min) * plot_h;

        let mut parts = vec![format!(
            "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}' font-family='sans-serif'>",
            w = config.width,
            h = config.height
        )];
        parts.push("<rect width='100%' height='100%' fill='white' />".into());

        // Ticks and grid
        for tick in ticks(x_min, x_max) {
            let x = sx(tick);
            if config.grid {
                parts.push(format!(
                    "<line x1='{x:.2}' y1='{MARGIN_TOP:.2}' x2='{x:.2}' y2='{:.2}' stroke='#b0b0b0' stroke-width='0.8' stroke-opacity='0.6' />",
                    MARGIN_TOP + plot_h
                ));
            }
            parts.push(format!(
                "<text x='{x:.2}' y='{:.2}' font-size='12' text-anchor='middle'>{}</text>",
                MARGIN_TOP + plot_h + 18.0,
                format_tick(tick)
            ));
        }
        for tick in ticks(y_min, y_max) {
            let y = sy(tick);
            if config.grid {
                parts.push(format!(
                    "<line x1='{MARGIN_LEFT:.2}' y1='{y:.2}' x2='{:.2}' y2='{y:.2}' stroke='#b0b0b0' stroke-width='0.8' stroke-opacity='0.6' />",
                    MARGIN_LEFT + plot_w
                ));
            }
            parts.push(format!(
                "<text x='{:.2}' y='{:.2}' font-size='12' text-anchor='end'>{}</text>",
                MARGIN_LEFT - 8.0,
                y + 4.0,
                format_tick(tick)
            ));
        }

        parts.push(format!(
            "<rect x='{MARGIN_LEFT:.2}' y='{MARGIN_TOP:.2}' width='{plot_w:.2}' height='{plot_h:.2}' fill='none' stroke='black' />"
        ));

        for (i, series) in self.series.iter().enumerate() {
            let points: Vec<String> = self
                .x
                .iter()
                .zip(&series.values)
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .map(|(&x, &y)| format!("{:.2},{:.2}", sx(x), sy(y)))
                .collect();
            parts.push(format!(
                "<polyline fill='none' stroke='{}' stroke-width='1.5' points='{}' />",
                PALETTE[i % PALETTE.len()],
                points.join(" ")
            ));
        }

        // Legend in the upper right corner of the plot area
        if !self.series.is_empty() {
            let longest = self
                .series
                .iter()
                .map(|s| s.label.chars().count())
                .max()
                .unwrap_or(0);
            let box_w = 44.0 + longest as f64 * 7.5;
            let box_h = 10.0 + self.series.len() as f64 * 20.0;
            let left = MARGIN_LEFT + plot_w - box_w - 10.0;
            let top = MARGIN_TOP + 10.0;
            parts.push(format!(
                "<rect x='{left:.2}' y='{top:.2}' width='{box_w:.2}' height='{box_h:.2}' fill='white' fill-opacity='0.8' stroke='#cccccc' rx='3' />"
            ));
            for (i, series) in self.series.iter().enumerate() {
                let y = top + 15.0 + i as f64 * 20.0;
                parts.push(format!(
                    "<line x1='{:.2}' y1='{y:.2}' x2='{:.2}' y2='{y:.2}' stroke='{}' stroke-width='2' />",
                    left + 8.0,
                    left + 32.0,
                    PALETTE[i % PALETTE.len()]
                ));
                parts.push(format!(
                    "<text x='{:.2}' y='{:.2}' font-size='13'>{}</text>",
                    left + 38.0,
                    y + 4.0,
                    escape(&series.label)
                ));
            }
        }

        parts.push(format!(
            "<text x='{:.2}' y='{:.2}' font-size='16' text-anchor='middle'>{}</text>",
            width / 2.0,
            MARGIN_TOP / 2.0 + 6.0,
            escape(&self.title)
        ));
        parts.push(format!(
            "<text x='{:.2}' y='{:.2}' font-size='14' text-anchor='middle'>{}</text>",
            MARGIN_LEFT + plot_w / 2.0,
            height - 15.0,
            escape(&self.x_label)
        ));
        parts.push(format!(
            "<text x='20' y='{y:.2}' font-size='14' text-anchor='middle' transform='rotate(-90 20 {y:.2})'>{}</text>",
            escape(&self.y_label),
            y = MARGIN_TOP + plot_h / 2.0
        ));

        parts.push("</svg>".into());
        parts.join("")
    }

    /// Render and write the chart, creating parent directories as needed.
    /// An existing file is overwritten.
    pub fn write_svg(&self, path: &Path, config: &FigureConfig) -> ExplorerResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(ExplorerError::write(parent))?;
        }
        std::fs::write(path, self.render_svg(config)).map_err(ExplorerError::write(path))
    }
}

/// Data range widened by `pad` of its span on each side. Degenerate and
/// empty ranges are widened to a unit interval.
fn padded_range(values: impl Iterator<Item = f64>, pad: f64) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        return (0.0, 1.0);
    }
    let span = max - min;
    if span < 1e-9 {
        return (min - 0.5, max + 0.5);
    }
    (min - span * pad, max + span * pad)
}

/// Round tick positions covering `[min, max]`, roughly five of them.
fn ticks(min: f64, max: f64) -> Vec<f64> {
    let raw = (max - min) / 5.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = match raw / magnitude {
        r if r < 1.5 => magnitude,
        r if r < 3.0 => 2.0 * magnitude,
        r if r < 7.0 => 5.0 * magnitude,
        _ => 10.0 * magnitude,
    };
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

fn format_tick(value: f64) -> String {
    // Avoid "-0" labels
    let value = if value.abs() < 1e-12 { 0.0 } else { value };
    let s = format!("{value:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
}
