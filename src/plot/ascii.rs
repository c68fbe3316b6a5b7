//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - measured points: `o`
//! - fitted curve: `-` line

use crate::domain::Axis;
use crate::sweep::SweepResult;

/// Render a sweep (measured series plus fitted curve) in its current units.
pub fn render_sweep_plot(sweep: &SweepResult, width: usize, height: usize, label: Option<&str>) -> String {
    let points: Vec<(f64, f64)> = sweep
        .voltage()
        .iter()
        .zip(sweep.current())
        .filter(|(v, i)| v.is_finite() && i.is_finite())
        .map(|(&v, &i)| (v, i))
        .collect();
    let curve: Vec<(f64, f64)> = sweep
        .fit_curve()
        .x
        .iter()
        .zip(&sweep.fit_curve().y)
        .map(|(&x, &y)| (x, y))
        .collect();

    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = x_range(&points)
        .or_else(|| x_range(&curve))
        .unwrap_or((0.0, 1.0));
    let (y_min, y_max) = y_range(&points, &curve).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Curve first so points overlay it.
    draw_curve(&mut grid, &curve, x_min, x_max, y_min, y_max);

    for &(v, i) in &points {
        let x = map_x(v, x_min, x_max, width);
        let y = map_y(i, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    if let Some(label) = label {
        out.push_str(&format!("{label}\n"));
    }
    out.push_str(&format!(
        "Plot: {} [{x_min:.3}, {x_max:.3}] | {} [{y_min:.3}, {y_max:.3}]\n",
        sweep.axis_label(Axis::Voltage),
        sweep.axis_label(Axis::Current)
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn x_range(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &(x, _) in points {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn y_range(points: &[(f64, f64)], curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &(_, y) in points.iter().chain(curve) {
        if y.is_finite() {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
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

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        if !y.is_finite() {
            prev = None;
            continue;
        }
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GridEndpoint, SweepKind};

    #[test]
    fn plot_golden_snapshot_small() {
        let sweep = SweepResult::from_series(
            SweepKind::Iv,
            "",
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0, 2.0],
            GridEndpoint::Exclusive,
        )
        .unwrap();

        let txt = render_sweep_plot(&sweep, 10, 5, None);
        let expected = concat!(
            "Plot: Volts (V) [0.000, 2.000] | Current (A) [-0.100, 2.100]\n",
            "         o\n",
            "      -   \n",
            "    -o    \n",
            "  --      \n",
            "o-        \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn label_goes_on_its_own_line() {
        let sweep = SweepResult::from_series(
            SweepKind::Gate,
            "",
            vec![-1.0, 0.0, 1.0, 2.0],
            vec![2.0, 1.0, 2.0, 5.0],
            GridEndpoint::Inclusive,
        )
        .unwrap();

        let txt = render_sweep_plot(&sweep, 20, 8, Some("D12"));
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[0], "D12");
        assert_eq!(lines.len(), 2 + 8);
        assert!(lines[2..].iter().all(|l| l.chars().count() == 20));
        let marks: usize = lines[2..].iter().map(|l| l.matches('o').count()).sum();
        assert_eq!(marks, 4);
    }
}
