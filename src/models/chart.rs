//! Chart generation models

/// Colours and strokes of the dataset and canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub line_color: (u8, u8, u8),
    pub line_width: u32,
    /// Opacity of the point markers (same hue as the line)
    pub point_alpha: f64,
    pub background: (u8, u8, u8),
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line_color: (54, 162, 235),
            line_width: 1,
            point_alpha: 0.5,
            background: (255, 255, 255),
        }
    }
}

/// Declarative description of a single-dataset line chart
#[derive(Debug, Clone)]
pub struct ChartSpec {
    /// Dataset label, e.g. `btc_jpy (2024/1/31)`
    pub title: String,
    /// X axis labels, one per value
    pub labels: Vec<String>,
    /// Y values; NaN marks a gap
    pub values: Vec<f64>,
    pub style: ChartStyle,
}

impl ChartSpec {
    /// Finite (min, max) of the values, if any
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Runs of consecutive finite points as (index, value) pairs
    pub fn segments(&self) -> Vec<Vec<(usize, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();

        for (i, v) in self.values.iter().copied().enumerate() {
            if v.is_finite() {
                current.push((i, v));
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        segments
    }
}
