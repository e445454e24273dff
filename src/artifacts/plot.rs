use crate::error::{GnpError, Result};
use plotters::prelude::*;
use std::error::Error;
use std::ops::Range;
use std::path::Path;

const SERIES_COLORS: [RGBColor; 4] = [BLUE, RED, GREEN, MAGENTA];

/// One named line of a trajectory chart, indexed by generation.
pub struct Series<'a> {
    pub label: &'a str,
    pub values: &'a [f64],
}

/// Line chart of per-generation values.
pub struct TrajectoryPlot<'a> {
    pub caption: &'a str,
    pub y_desc: &'a str,
    pub series: Vec<Series<'a>>,
    /// Fixed y-range; derived from the data when absent.
    pub y_range: Option<Range<f64>>,
}

impl<'a> TrajectoryPlot<'a> {
    pub fn draw(&self, output_path: &Path) -> Result<()> {
        self.draw_chart(output_path)
            .map_err(|e| GnpError::Plot(format!("{}: {}", output_path.display(), e)))?;
        log::debug!("Chart saved to {}", output_path.display());
        Ok(())
    }

    fn draw_chart(&self, output_path: &Path) -> std::result::Result<(), Box<dyn Error>> {
        let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
        root.fill(&WHITE)?;

        let generations = self.series.iter().map(|s| s.values.len()).max().unwrap_or(0).max(1);
        let y_range = self.y_range.clone().unwrap_or_else(|| self.data_range());

        let mut chart = ChartBuilder::on(&root)
            .caption(self.caption, ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..generations as f64, y_range)?;

        chart
            .configure_mesh()
            .x_desc("Generation")
            .y_desc(self.y_desc)
            .draw()?;

        for (i, series) in self.series.iter().enumerate() {
            let color = SERIES_COLORS[i % SERIES_COLORS.len()];
            let points = series
                .values
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(|(g, v)| (g as f64, *v));

            chart
                .draw_series(LineSeries::new(points, &color))?
                .label(series.label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }

    /// Finite extent of all series with 5% padding.
    fn data_range(&self) -> Range<f64> {
        let finite = self
            .series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite());

        let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

        if min > max {
            return 0.0..1.0;
        }
        let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
        (min - pad)..(max + pad)
    }
}
