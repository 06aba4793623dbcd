use plotters::coord::Shift;
use plotters::prelude::*;

use crate::models::{ChartSpec, ChartStyle, RateSeries};

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("failed to draw chart: {0}")]
    Draw(String),
    #[error("failed to read rendered chart: {0}")]
    Io(#[from] std::io::Error),
}

fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

/// Describe a resolved series as a single-dataset line chart
pub fn chart_spec(series: &RateSeries) -> ChartSpec {
    ChartSpec {
        title: format!("{} ({})", series.pair, series.anchor_date.format("%Y/%-m/%-d")),
        labels: series.points.iter().map(|p| p.label.clone()).collect(),
        values: series.points.iter().map(|p| p.rate).collect(),
        style: ChartStyle::default(),
    }
}

fn format_rate(value: &f64) -> String {
    if value.abs() >= 1000.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
) -> Result<(), ChartError> {
    let (r, g, b) = spec.style.line_color;
    let series_color = RGBColor(r, g, b);
    let (r, g, b) = spec.style.background;
    root.fill(&RGBColor(r, g, b)).map_err(draw_err)?;

    // Pad the value range so a flat series still gets a visible band
    let (min_rate, max_rate) = spec.value_range().unwrap_or((0.0, 1.0));
    let rate_range = (max_rate - min_rate)
        .max(max_rate.abs() * 1e-3)
        .max(1e-8);
    let padding = rate_range * 0.1;
    let y_min = (min_rate - padding).max(0.0);
    let y_max = max_rate + padding;

    let x_max = spec.values.len().max(1) as i32 - 1;

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 20.0).into_font())
        .margin(15)
        .x_label_area_size(30)
        .y_label_area_size(70)
        .build_cartesian_2d(0..x_max.max(1), y_min..y_max)
        .map_err(draw_err)?;

    let label_for = |x: &i32| {
        usize::try_from(*x)
            .ok()
            .and_then(|i| spec.labels.get(i))
            .cloned()
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .x_labels(spec.labels.len().clamp(2, 16))
        .x_label_formatter(&label_for)
        .y_label_formatter(&format_rate)
        .draw()
        .map_err(draw_err)?;

    for segment in spec.segments() {
        chart
            .draw_series(LineSeries::new(
                segment.iter().map(|(i, v)| (*i as i32, *v)),
                series_color.stroke_width(spec.style.line_width),
            ))
            .map_err(draw_err)?;
    }

    chart
        .draw_series(
            spec.segments()
                .into_iter()
                .flatten()
                .map(|(i, v)| Circle::new((i as i32, v), 3, series_color.mix(spec.style.point_alpha).filled())),
        )
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Render the chart as SVG markup
pub fn render_svg(spec: &ChartSpec, width: u32, height: u32) -> Result<String, ChartError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        draw_chart(&root, spec)?;
    }
    Ok(svg)
}

/// Rasterize the chart as PNG bytes
pub fn render_png(spec: &ChartSpec, width: u32, height: u32) -> Result<Vec<u8>, ChartError> {
    // BitMapBackend encodes PNG when writing to a path
    let temp_file = std::env::temp_dir().join(format!("rate_chart_{}.png", uuid::Uuid::new_v4()));

    {
        let root = BitMapBackend::new(&temp_file, (width, height)).into_drawing_area();
        if let Err(e) = draw_chart(&root, spec) {
            let _ = std::fs::remove_file(&temp_file);
            return Err(e);
        }
    }

    let image_data = std::fs::read(&temp_file);
    let _ = std::fs::remove_file(&temp_file);

    Ok(image_data?)
}
