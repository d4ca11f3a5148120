//! Plotters-powered trend chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct TrendPlottersChart<'a> {
    /// Daily changes as `(day number, value)`.
    pub series: &'a [(f64, f64)],
    /// Point under the tooltip cursor, if any.
    pub cursor: Option<(f64, f64)>,
    pub line_color: RGBColor,
    pub cursor_color: RGBColor,
    /// X bounds (days since 0001-01-01, see `NaiveDate::num_days_from_ce`).
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// Formatting of tick labels.
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for TrendPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // No horizontal grid lines; the axes + labels are enough.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let guide = RGBColor(90, 90, 90);

            if y0 < 0.0 && y1 > 0.0 {
                chart.draw_series(LineSeries::new([(x0, 0.0), (x1, 0.0)], &guide))?;
            }

            // Hover guide goes under the series.
            if let Some((cx, _)) = self.cursor {
                chart.draw_series(LineSeries::new([(cx, y0), (cx, y1)], &guide))?;
            }

            chart.draw_series(LineSeries::new(self.series.iter().copied(), &self.line_color))?;

            // A `Pixel` rather than a `Circle`: the backend maps circle radii into
            // canvas units, which blows them up in a terminal.
            if let Some(point) = self.cursor {
                chart.draw_series(std::iter::once(Pixel::new(point, self.cursor_color)))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
