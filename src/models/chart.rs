//! Chart-ready models consumed by the renderer

use std::fmt;
use std::str::FromStr;

/// RGB colour of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesColor(pub u8, pub u8, pub u8);

pub const SUCCESS: SeriesColor = SeriesColor(0x38, 0xb0, 0x00);
pub const INFO: SeriesColor = SeriesColor(0x0d, 0xca, 0xf0);
pub const WARNING: SeriesColor = SeriesColor(0xfd, 0x7e, 0x14);
pub const DANGER: SeriesColor = SeriesColor(0xdc, 0x35, 0x45);
pub const MUTED: SeriesColor = SeriesColor(0x6c, 0x75, 0x7d);
pub const PURPLE: SeriesColor = SeriesColor(0x66, 0x10, 0xf2);
pub const PINK: SeriesColor = SeriesColor(0xd6, 0x33, 0x84);
pub const TEAL: SeriesColor = SeriesColor(0x20, 0xc9, 0x97);

/// Palette used for per-category charts (portfolio distribution)
pub const CATEGORY_PALETTE: [SeriesColor; 6] = [SUCCESS, INFO, WARNING, PURPLE, PINK, TEAL];

/// Colour for the i-th category, cycling through the palette
pub fn category_color(index: usize) -> SeriesColor {
    CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// How datasets are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Line => f.write_str("line"),
            ChartKind::Bar => f.write_str("bar"),
        }
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            _ => Err(format!("❌ Unknown chart type: '{}'. Supported: line, bar", s)),
        }
    }
}

/// A single named series. `None` marks a gap and is never drawn as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<Option<f64>>,
    pub color: SeriesColor,
    pub style: LineStyle,
    pub fill: bool,
}

impl Dataset {
    pub fn solid(label: &str, values: Vec<Option<f64>>, color: SeriesColor) -> Self {
        Self {
            label: label.to_string(),
            values,
            color,
            style: LineStyle::Solid,
            fill: true,
        }
    }

    pub fn dashed(label: &str, values: Vec<Option<f64>>, color: SeriesColor) -> Self {
        Self {
            label: label.to_string(),
            values,
            color,
            style: LineStyle::Dashed,
            fill: true,
        }
    }

    pub fn without_fill(mut self) -> Self {
        self.fill = false;
        self
    }

    /// Values that are actually plotted
    pub fn points(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i, v)))
    }
}

/// Labels plus every dataset drawn against them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.datasets.iter().all(|d| d.points().next().is_none())
    }

    /// Min and max over every plotted value
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for (_, v) in self.datasets.iter().flat_map(|d| d.points()) {
            range = Some(match range {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
        range
    }

    pub fn dataset(&self, label: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range_skips_gaps() {
        let chart = ChartData {
            labels: vec!["a".into(), "b".into(), "c".into()],
            datasets: vec![
                Dataset::solid("x", vec![Some(2.0), None, Some(5.0)], SUCCESS),
                Dataset::dashed("y", vec![None, Some(-1.0), None], WARNING),
            ],
        };
        assert_eq!(chart.value_range(), Some((-1.0, 5.0)));
        assert!(!chart.is_empty());
    }

    #[test]
    fn test_all_null_chart_is_empty() {
        let chart = ChartData {
            labels: vec!["a".into()],
            datasets: vec![Dataset::solid("x", vec![None], SUCCESS)],
        };
        assert!(chart.is_empty());
        assert_eq!(chart.value_range(), None);
    }

    #[test]
    fn test_category_color_cycles() {
        assert_eq!(category_color(0), SUCCESS);
        assert_eq!(category_color(6), SUCCESS);
        assert_eq!(category_color(7), INFO);
    }
}
