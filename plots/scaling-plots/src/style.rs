use std::{ops::Range, sync::OnceLock};

use common::{metric::Metric, record::Variant};
use eyre::{Result, eyre};
use plotters::{prelude::*, style::register_font};

pub const PARALLEL_BLUE: RGBColor = RGBColor(0x2E, 0x86, 0xAB);
pub const NOWAIT_MAGENTA: RGBColor = RGBColor(0xA2, 0x3B, 0x72);
pub const EFFICIENCY_GREEN: RGBColor = RGBColor(0x6A, 0x99, 0x4E);
pub const EFFICIENCY_RED: RGBColor = RGBColor(0xBC, 0x4B, 0x51);
pub const THROUGHPUT_PURPLE: RGBColor = RGBColor(0x83, 0x38, 0xEC);
pub const THROUGHPUT_ORANGE: RGBColor = RGBColor(0xF1, 0x8F, 0x01);
pub const REFERENCE_GRAY: RGBColor = RGBColor(0x80, 0x80, 0x80);

pub const HEADER_FILL: RGBColor = RGBColor(0x4A, 0x55, 0x68);
/// Alternating fills of table body rows, first row uses index 0
pub const ROW_FILLS: [RGBColor; 2] = [RGBColor(0xED, 0xF2, 0xF7), RGBColor(0xF7, 0xFA, 0xFC)];
pub const CELL_BORDER: RGBColor = RGBColor(0xCB, 0xD5, 0xE0);

pub const FONT: &str = "sans-serif";
const REGULAR_TTF: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
const BOLD_TTF: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");
/// Dashes per reference line
pub const DASHES: usize = 24;

/// Registers the bundled faces under [`FONT`]. Must run before any text is laid out.
pub fn register_fonts() -> Result<()> {
    static REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();
    REGISTERED
        .get_or_init(|| {
            for (style, bytes) in [(FontStyle::Normal, REGULAR_TTF), (FontStyle::Bold, BOLD_TTF)] {
                register_font(FONT, style, bytes)
                    .map_err(|_| format!("Invalid bundled {} font", style.as_str()))?;
            }
            Ok(())
        })
        .clone()
        .map_err(|err| eyre!(err))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
}

pub fn marker(variant: Variant) -> Marker {
    match variant {
        Variant::ParallelNowait => Marker::Square,
        _ => Marker::Circle,
    }
}

pub fn series_color(metric: Metric, variant: Variant) -> RGBColor {
    let nowait = variant == Variant::ParallelNowait;
    match (metric, nowait) {
        (Metric::Efficiency, false) => EFFICIENCY_GREEN,
        (Metric::Efficiency, true) => EFFICIENCY_RED,
        (Metric::Throughput, false) => THROUGHPUT_PURPLE,
        (Metric::Throughput, true) => THROUGHPUT_ORANGE,
        (_, false) => PARALLEL_BLUE,
        (_, true) => NOWAIT_MAGENTA,
    }
}

pub fn legend_position(metric: Metric) -> SeriesLabelPosition {
    match metric {
        Metric::ExecutionTime => SeriesLabelPosition::UpperRight,
        Metric::Efficiency => SeriesLabelPosition::LowerLeft,
        _ => SeriesLabelPosition::UpperLeft,
    }
}

/// Pixel sizes for text and markers, scaled to the drawing height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fonts {
    pub title: u32,
    pub label: u32,
    pub tick: u32,
    pub legend: u32,
    pub marker: i32,
    pub margin: u32,
}

impl Fonts {
    pub fn for_height(height: u32) -> Self {
        let scale = height as f64 / 720.0;
        let px = |base: f64| ((base * scale).round() as u32).max(8);
        Self {
            title: px(28.0),
            label: px(20.0),
            tick: px(16.0),
            legend: px(16.0),
            marker: px(6.0) as i32,
            margin: px(16.0),
        }
    }
}

/// Splits the line `from -> to` into `dashes` drawn pieces with equal gaps between them
pub fn dashed_segments(from: (f64, f64), to: (f64, f64), dashes: usize) -> Vec<[(f64, f64); 2]> {
    if dashes == 0 {
        return Vec::new();
    }
    let steps = (dashes * 2 - 1) as f64;
    let point = |i: f64| {
        let t = i / steps;
        (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
    };
    (0..dashes)
        .map(|i| {
            let start = (i * 2) as f64;
            [point(start), point(start + 1.0)]
        })
        .collect()
}

/// X range around the plotted thread counts with a little room on both sides
pub fn padded_x_range(threads: impl IntoIterator<Item = u32>) -> Range<f64> {
    let (lo, hi) = threads
        .into_iter()
        .fold(None, |acc: Option<(u32, u32)>, t| match acc {
            Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            None => Some((t, t)),
        })
        .map(|(lo, hi)| (lo as f64, hi as f64))
        .unwrap_or((1.0, 1.0));
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
    (lo - pad)..(hi + pad)
}

/// Top of a y axis starting at zero
pub fn y_upper(max: f64) -> f64 {
    if max.is_finite() && max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}
