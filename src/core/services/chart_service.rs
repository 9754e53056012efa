use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use svg::{
    node::{
        element::{Line, Rectangle, Text},
        Text as TextNode,
    },
    Document,
};
use tracing::{debug, warn};

use crate::errors::{LedgerError, Result};

use super::summary_service::CategoryTotals;

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 500.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 130.0;
const BAR_FILL: &str = "skyblue";
const BAR_RATIO: f64 = 0.8;
const Y_TICKS: usize = 5;
const TITLE: &str = "Expenses by Category";
const X_LABEL: &str = "Category";
const Y_LABEL: &str = "Amount ($)";

/// Vertical extent of the plot, always including zero.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ValueRange {
    low: f64,
    high: f64,
}

impl ValueRange {
    fn of(values: impl Iterator<Item = f64>) -> Self {
        let (low, high) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if high - low <= f64::EPSILON {
            return Self { low, high: low + 1.0 };
        }
        // headroom above the tallest bar
        let pad = (high - low) * 0.05;
        Self {
            low: if low < 0.0 { low - pad } else { low },
            high: if high > 0.0 { high + pad } else { high },
        }
    }

    fn span(&self) -> f64 {
        self.high - self.low
    }
}

/// Pixel mapping for the plotting area.
struct Frame {
    range: ValueRange,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Frame {
    fn new(range: ValueRange) -> Self {
        Self {
            range,
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
            height: HEIGHT - MARGIN_TOP - MARGIN_BOTTOM,
        }
    }

    fn y(&self, value: f64) -> f64 {
        self.top + (self.range.high - value) / self.range.span() * self.height
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }
}

pub struct ChartService;

impl ChartService {
    /// Builds a bar chart with one bar per category.
    pub fn build(totals: &CategoryTotals) -> Document {
        let frame = Frame::new(ValueRange::of(totals.values().copied()));
        let mut document = Document::new()
            .set("viewBox", (0, 0, WIDTH as i64, HEIGHT as i64))
            .set("width", WIDTH)
            .set("height", HEIGHT)
            .set("font-family", "sans-serif")
            .add(
                Rectangle::new()
                    .set("width", WIDTH)
                    .set("height", HEIGHT)
                    .set("fill", "white"),
            )
            .add(label(TITLE, WIDTH / 2.0, MARGIN_TOP / 2.0 + 6.0, 18).set("font-weight", "bold"))
            .add(label(X_LABEL, frame.left + frame.width / 2.0, HEIGHT - 12.0, 14))
            .add(
                label(Y_LABEL, 20.0, frame.top + frame.height / 2.0, 14).set(
                    "transform",
                    format!("rotate(-90 20 {})", frame.top + frame.height / 2.0),
                ),
            );

        for step in 0..=Y_TICKS {
            let value = frame.range.low + frame.range.span() * step as f64 / Y_TICKS as f64;
            let y = frame.y(value);
            document = document
                .add(axis_line(frame.left - 5.0, y, frame.left, y))
                .add(
                    label(&format!("{value:.2}"), frame.left - 8.0, y + 4.0, 11)
                        .set("text-anchor", "end"),
                );
        }

        let slot = if totals.is_empty() {
            frame.width
        } else {
            frame.width / totals.len() as f64
        };
        let baseline = frame.y(0.0);
        for (index, (category, amount)) in totals.iter().enumerate() {
            let center = frame.left + slot * (index as f64 + 0.5);
            let bar_width = slot * BAR_RATIO;
            let top = frame.y(amount.max(0.0));
            let height = (frame.y(amount.min(0.0)) - top).max(0.0);
            let tick_y = frame.bottom() + 14.0;
            document = document
                .add(
                    Rectangle::new()
                        .set("class", "bar")
                        .set("x", center - bar_width / 2.0)
                        .set("y", top)
                        .set("width", bar_width)
                        .set("height", height)
                        .set("fill", BAR_FILL),
                )
                .add(
                    label(category, center, tick_y, 12)
                        .set("text-anchor", "end")
                        .set("transform", format!("rotate(-45 {center} {tick_y})")),
                );
        }

        document
            .add(axis_line(frame.left, frame.top, frame.left, frame.bottom()))
            .add(axis_line(frame.left, baseline, frame.right(), baseline))
    }

    /// Renders the chart and overwrites `path` with it.
    pub fn render(totals: &CategoryTotals, path: &Path) -> Result<PathBuf> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let document = Self::build(totals);
        svg::save(path, &document)
            .map_err(|err| LedgerError::Chart(format!("{}: {err}", path.display())))?;
        debug!(path = %path.display(), bars = totals.len(), "chart written");
        Ok(path.to_path_buf())
    }

    /// Hands the chart to the platform viewer. Failures are only logged.
    pub fn show(path: &Path) {
        let mut command = viewer_command();
        match command.arg(path).spawn() {
            Ok(_) => debug!(path = %path.display(), "chart viewer launched"),
            Err(err) => warn!(path = %path.display(), error = %err, "could not open chart viewer"),
        }
    }
}

fn viewer_command() -> Command {
    if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        Command::new("xdg-open")
    }
}

fn label(content: &str, x: f64, y: f64, size: u32) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("font-size", size)
        .set("text-anchor", "middle")
        .add(TextNode::new(escape(content)))
}

fn axis_line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", "black")
        .set("stroke-width", 1.5)
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
