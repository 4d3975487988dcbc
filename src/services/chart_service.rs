use std::path::Path;

use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use tracing::debug;

use crate::models::{ChartData, ChartKind, Dataset, LineStyle, SeriesColor};

/// How a chart is laid out on the canvas
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub title: String,
    pub y_desc: String,
    pub kind: ChartKind,
    pub width: u32,
    pub height: u32,
}

fn rgb(color: SeriesColor) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// Split a series at gaps into runs of consecutive `(index, value)` points
pub fn segments(values: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for (i, value) in values.iter().enumerate() {
        match value {
            Some(v) => current.push((i as f64, *v)),
            None => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Y-axis range with 10% padding; bars always include zero
pub fn y_range(chart: &ChartData, kind: ChartKind) -> Option<(f64, f64)> {
    let (min_value, max_value) = chart.value_range()?;

    let (min_value, max_value) = match kind {
        ChartKind::Bar => (min_value.min(0.0), max_value.max(0.0)),
        ChartKind::Line => (min_value, max_value),
    };

    let range = (max_value - min_value).max(1e-8);
    let padding = range * 0.1;
    let y_min = if min_value >= 0.0 {
        (min_value - padding).max(0.0)
    } else {
        min_value - padding
    };

    Some((y_min, max_value + padding))
}

/// Label shown under an x position, only on whole indices
fn x_label(labels: &[String], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

/// Render a chart as a PNG at `path`. Gaps in a series are never drawn as zero.
pub fn render_chart(chart: &ChartData, options: &RenderOptions, path: &Path) -> Result<(), String> {
    if chart.is_empty() {
        return Err("❌ No data to render".to_string());
    }

    let (y_min, y_max) = y_range(chart, options.kind).ok_or("❌ No data to render".to_string())?;
    let label_count = chart.labels.len();
    let x_min = -0.5;
    let x_max = label_count as f64 - 0.5;

    {
        let backend = BitMapBackend::new(path, (options.width, options.height));
        let root = backend.into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| format!("Failed to fill canvas: {}", e))?;

        let mut plot = ChartBuilder::on(&root)
            .caption(&options.title, ("sans-serif", 32.0).into_font())
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| format!("Failed to build chart: {}", e))?;

        let labels = &chart.labels;
        let formatter = |x: &f64| x_label(labels, *x);
        plot.configure_mesh()
            .y_desc(options.y_desc.as_str())
            .x_desc("Date")
            .x_labels(label_count.min(12))
            .x_label_formatter(&formatter)
            .draw()
            .map_err(|e| format!("Failed to draw mesh: {}", e))?;

        match options.kind {
            ChartKind::Line => {
                for dataset in &chart.datasets {
                    draw_line_dataset(&mut plot, dataset, y_min)?;
                }
            }
            ChartKind::Bar => draw_bars(&mut plot, &chart.datasets, y_min.max(0.0).min(y_max))?,
        }

        plot.configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| format!("Failed to draw legend: {}", e))?;

        root.present()
            .map_err(|e| format!("Failed to render chart: {}", e))?;
    }

    debug!("Rendered {} dataset(s) over {} label(s) to {}", chart.datasets.len(), label_count, path.display());

    Ok(())
}

type Plot<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn draw_line_dataset(plot: &mut Plot<'_, '_>, dataset: &Dataset, baseline: f64) -> Result<(), String> {
    let color = rgb(dataset.color);
    let mut labelled = false;

    for segment in segments(&dataset.values) {
        if dataset.fill && segment.len() > 1 {
            plot.draw_series(AreaSeries::new(segment.clone(), baseline, color.mix(0.1).filled()))
                .map_err(|e| format!("Failed to draw area: {}", e))?;
        }

        let anno = match dataset.style {
            LineStyle::Solid => plot
                .draw_series(LineSeries::new(segment.clone(), color.stroke_width(2)))
                .map_err(|e| format!("Failed to draw line: {}", e))?,
            LineStyle::Dashed => plot
                .draw_series(DashedLineSeries::new(segment.clone(), 8, 5, color.stroke_width(2)))
                .map_err(|e| format!("Failed to draw line: {}", e))?,
        };

        if !labelled {
            anno.label(dataset.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
            labelled = true;
        }

        plot.draw_series(segment.iter().map(|&(x, y)| Circle::new((x, y), 3, color.filled())))
            .map_err(|e| format!("Failed to draw point: {}", e))?;
    }

    Ok(())
}

/// Grouped bars: each label gets one slot per dataset
fn draw_bars(plot: &mut Plot<'_, '_>, datasets: &[Dataset], base: f64) -> Result<(), String> {
    let group_width = 0.8;
    let slot = group_width / datasets.len().max(1) as f64;

    for (n, dataset) in datasets.iter().enumerate() {
        let color = rgb(dataset.color);
        let offset = -group_width / 2.0 + slot * n as f64;
        let style = match dataset.style {
            LineStyle::Solid => color.filled(),
            LineStyle::Dashed => color.mix(0.5).filled(),
        };

        let bars: Vec<Rectangle<(f64, f64)>> = dataset
            .points()
            .map(|(i, v)| {
                let x0 = i as f64 + offset;
                Rectangle::new([(x0, base), (x0 + slot, v)], style)
            })
            .collect();

        if bars.is_empty() {
            continue;
        }

        plot.draw_series(bars)
            .map_err(|e| format!("Failed to draw bars: {}", e))?
            .label(dataset.label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chart::SUCCESS;

    #[test]
    fn test_segments_split_on_gaps() {
        let segs = segments(&[Some(1.0), Some(2.0), None, None, Some(5.0), None]);
        assert_eq!(segs, vec![vec![(0.0, 1.0), (1.0, 2.0)], vec![(4.0, 5.0)]]);
        assert!(segments(&[None, None]).is_empty());
    }

    #[test]
    fn test_y_range_padding() {
        let chart = ChartData {
            labels: vec!["a".into(), "b".into()],
            datasets: vec![Dataset::solid("x", vec![Some(10.0), Some(20.0)], SUCCESS)],
        };
        let (lo, hi) = y_range(&chart, ChartKind::Line).unwrap();
        assert!((lo - 9.0).abs() < 1e-9);
        assert!((hi - 21.0).abs() < 1e-9);

        let (lo, _) = y_range(&chart, ChartKind::Bar).unwrap();
        assert_eq!(lo, 0.0);
    }

    #[test]
    fn test_x_label_only_on_whole_indices() {
        let labels = vec!["2024-01".to_string(), "2024-02".to_string()];
        assert_eq!(x_label(&labels, 1.0), "2024-02");
        assert_eq!(x_label(&labels, 0.5), "");
        assert_eq!(x_label(&labels, 5.0), "");
        assert_eq!(x_label(&labels, -1.0), "");
    }

    #[test]
    fn test_render_empty_chart_fails() {
        let path = std::env::temp_dir().join("agri_analytics_empty_chart.png");
        let options = RenderOptions {
            title: "Empty".into(),
            y_desc: "y".into(),
            kind: ChartKind::Line,
            width: 320,
            height: 240,
        };
        assert!(render_chart(&ChartData::default(), &options, &path).is_err());
    }
}
