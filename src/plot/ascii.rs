//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - daily changes: `*`, joined by `.`
//! - zero line: `-` (only when zero is inside the y range)

use crate::domain::ChartPoint;
use crate::report::labels::{fmt_abbrev, fmt_axis_date};

/// Render daily changes against a calendar x axis.
pub fn render_ascii_plot(points: &[ChartPoint], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return "Plot: (no data)\n".to_string();
    };

    // x = days since the first point, so calendar gaps stay visible.
    let series: Vec<(f64, f64)> = points
        .iter()
        .map(|p| ((p.x - first.x).num_days() as f64, p.y as f64))
        .collect();

    let (x_min, x_max) = x_range(&series).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = y_range(&series).unwrap_or((first.y as f64 - 1.0, first.y as f64 + 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    if y_min <= 0.0 && y_max >= 0.0 {
        let row = map_y(0.0, y_min, y_max, height);
        for cell in grid[row].iter_mut() {
            *cell = '-';
        }
    }

    let cells: Vec<(usize, usize)> = series
        .iter()
        .map(|&(x, y)| (map_x(x, x_min, x_max, width), map_y(y, y_min, y_max, height)))
        .collect();

    for w in cells.windows(2) {
        draw_line(&mut grid, w[0], w[1], '.');
    }
    for &(x, y) in &cells {
        grid[y][x] = '*';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} .. {} | y=[{}, {}]\n",
        fmt_axis_date(first.x),
        fmt_axis_date(last.x),
        fmt_abbrev(y_min),
        fmt_abbrev(y_max),
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn x_range(series: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &(x, _) in series {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn y_range(series: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(_, y) in series {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only fills blank cells.
fn draw_line(grid: &mut [Vec<char>], from: (usize, usize), to: (usize, usize), ch: char) {
    let (mut x0, mut y0) = (from.0 as isize, from.1 as isize);
    let (x1, y1) = (to.0 as isize, to.1 as isize);

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
