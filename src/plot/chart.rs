//! Two-panel PNG line chart of the MSE traces.
//!
//! The top panel shows every series from zero up to the largest value; the
//! bottom panel zooms the vertical axis onto a chosen subset (the best runs).

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::error::ChartError;
use crate::plot::glyphs::{glyph, text_width, GLYPH_HEIGHT, GLYPH_SPACING, GLYPH_WIDTH};

pub const WIDTH: u32 = 900;
pub const HEIGHT: u32 = 900;

const PLOT_LEFT: u32 = 100;
const PLOT_RIGHT: u32 = 30;
const PLOT_HEIGHT: u32 = 330;
const TOP_PANEL_Y: u32 = 50;
const BOTTOM_PANEL_Y: u32 = 500;
const TEXT_SCALE: u32 = 2;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([0, 0, 0]);
const GRID: Rgb<u8> = Rgb([225, 225, 225]);
const TEXT: Rgb<u8> = Rgb([40, 40, 40]);

/// Line colours, assigned by series position.
pub const PALETTE: [Rgb<u8>; 5] = [
    Rgb([31, 119, 180]),
    Rgb([255, 127, 14]),
    Rgb([44, 160, 44]),
    Rgb([214, 39, 40]),
    Rgb([148, 103, 189]),
];

#[derive(Debug, Clone, Copy)]
pub struct Series<'a> {
    pub label: &'a str,
    pub values: &'a [f64],
}

/// Validated chart input.
#[derive(Debug, Clone)]
pub struct Chart<'a> {
    series: Vec<Series<'a>>,
    zoom: Vec<usize>,
    last_epoch: usize,
}

impl<'a> Chart<'a> {
    /// `zoom` lists the series shown in the bottom panel; unknown indices are
    /// ignored. `last_epoch` labels the right end of the x axis.
    pub fn new(series: Vec<Series<'a>>, zoom: &[usize], last_epoch: usize) -> Result<Self, ChartError> {
        let points = series.first().map(|s| s.values.len()).unwrap_or(0);
        if points == 0 {
            return Err(ChartError::NoSeries);
        }
        if series.len() > PALETTE.len() {
            return Err(ChartError::TooManySeries { max: PALETTE.len(), found: series.len() });
        }
        if let Some(bad) = series.iter().find(|s| s.values.len() != points) {
            return Err(ChartError::RaggedSeries {
                label: bad.label.to_string(),
                expected: points,
                found: bad.values.len(),
            });
        }

        let zoom = zoom.iter().copied().filter(|&i| i < series.len()).collect();
        Ok(Chart { series, zoom, last_epoch })
    }

    pub fn draw(&self) -> RgbImage {
        let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

        let all: Vec<usize> = (0..self.series.len()).collect();
        let full = full_range(self.values_of(&all).into_iter());
        self.draw_panel(&mut img, TOP_PANEL_Y, "MSE: all optimizers", &all, full);

        if !self.zoom.is_empty() {
            let zoomed = tight_range(self.values_of(&self.zoom).into_iter());
            self.draw_panel(&mut img, BOTTOM_PANEL_Y, "MSE: best (zoomed)", &self.zoom, zoomed);
        }

        img
    }

    /// Renders the chart and writes it; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ChartError> {
        self.draw().save(path)?;
        Ok(())
    }

    /// Finite values of the selected series.
    fn values_of(&self, which: &[usize]) -> Vec<f64> {
        which.iter()
            .flat_map(|&i| self.series[i].values.iter().copied())
            .filter(|v| v.is_finite())
            .collect()
    }

    fn draw_panel(&self, img: &mut RgbImage, top: u32, title: &str, which: &[usize], range: (f64, f64)) {
        let panel = Panel {
            left: PLOT_LEFT,
            top,
            width: WIDTH - PLOT_LEFT - PLOT_RIGHT,
            height: PLOT_HEIGHT,
        };
        let (lo, hi) = range;

        draw_text(img, panel.left, top - 30, title, TEXT_SCALE, TEXT);

        // Horizontal grid with value labels.
        for step in 0..=4 {
            let value = lo + (hi - lo) * step as f64 / 4.0;
            let y = panel.y_of(value, lo, hi);
            if step > 0 {
                draw_line(img, (panel.left as i64, y), (panel.right() as i64, y), GRID);
            }
            let label = format_value(value);
            let x = panel.left.saturating_sub(text_width(&label, TEXT_SCALE) + 8);
            draw_text(img, x, (y - 7).max(0) as u32, &label, TEXT_SCALE, TEXT);
        }

        draw_line(img, (panel.left as i64, panel.top as i64), (panel.left as i64, panel.bottom() as i64), AXIS);
        draw_line(img, (panel.left as i64, panel.bottom() as i64), (panel.right() as i64, panel.bottom() as i64), AXIS);

        let axis_y = panel.bottom() + 8;
        draw_text(img, panel.left, axis_y, "0", TEXT_SCALE, TEXT);
        let end = format!("epoch {}", self.last_epoch);
        draw_text(img, panel.right() - text_width(&end, TEXT_SCALE), axis_y, &end, TEXT_SCALE, TEXT);

        for &i in which {
            let values = self.series[i].values;
            let mut previous: Option<(i64, i64)> = None;
            for (j, &v) in values.iter().enumerate() {
                if !v.is_finite() {
                    previous = None;
                    continue;
                }
                let point = (panel.x_of(j, values.len()), panel.y_of(v, lo, hi));
                if let Some(p) = previous {
                    draw_thick_line(img, p, point, PALETTE[i]);
                } else {
                    put(img, point.0, point.1, PALETTE[i]);
                }
                previous = Some(point);
            }
        }

        self.draw_legend(img, &panel, which);
    }

    fn draw_legend(&self, img: &mut RgbImage, panel: &Panel, which: &[usize]) {
        const ROW: u32 = 22;
        const SWATCH: u32 = 24;

        let text_w = which.iter()
            .map(|&i| text_width(self.series[i].label, TEXT_SCALE))
            .max()
            .unwrap_or(0);
        let width = SWATCH + text_w + 24;
        let height = ROW * which.len() as u32 + 8;
        let left = panel.right() - width - 10;
        let top = panel.top + 10;

        fill_rect(img, left, top, width, height, BACKGROUND);
        stroke_rect(img, left, top, width, height, GRID);

        for (row, &i) in which.iter().enumerate() {
            let y = top + 8 + row as u32 * ROW;
            let mid = (y + GLYPH_HEIGHT * TEXT_SCALE / 2) as i64;
            let x = left as i64 + 8;
            draw_thick_line(img, (x, mid), (x + SWATCH as i64 - 6, mid), PALETTE[i]);
            draw_text(img, left + 8 + SWATCH, y, self.series[i].label, TEXT_SCALE, TEXT);
        }
    }
}

/// Plot area in image coordinates.
struct Panel {
    left: u32,
    top: u32,
    width: u32,
    height: u32,
}

impl Panel {
    fn right(&self) -> u32 {
        self.left + self.width - 1
    }

    fn bottom(&self) -> u32 {
        self.top + self.height - 1
    }

    fn x_of(&self, index: usize, points: usize) -> i64 {
        if points <= 1 {
            return (self.left + self.width / 2) as i64;
        }
        let t = index as f64 / (points - 1) as f64;
        self.left as i64 + (t * (self.width - 1) as f64).round() as i64
    }

    fn y_of(&self, value: f64, lo: f64, hi: f64) -> i64 {
        let t = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
        self.bottom() as i64 - (t * (self.height - 1) as f64).round() as i64
    }
}

/// Zero up to the largest value.
fn full_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let hi = values.fold(0.0f64, f64::max);
    (0.0, if hi > 0.0 { hi } else { 1.0 })
}

/// Smallest to largest value with a 5% margin on both sides.
fn tight_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    let pad = if span > 1e-12 { span * 0.05 } else { (hi.abs() * 0.05).max(1e-6) };
    (lo - pad, hi + pad)
}

fn format_value(v: f64) -> String {
    if v != 0.0 && v.abs() < 0.01 {
        format!("{v:.5}")
    } else {
        format!("{v:.3}")
    }
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Bresenham line between two points, inclusive.
fn draw_line(img: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put(img, x, y, color);
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn draw_thick_line(img: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    draw_line(img, from, to, color);
    draw_line(img, (from.0, from.1 + 1), (to.0, to.1 + 1), color);
}

fn fill_rect(img: &mut RgbImage, left: u32, top: u32, width: u32, height: u32, color: Rgb<u8>) {
    for y in top..top + height {
        for x in left..left + width {
            put(img, x as i64, y as i64, color);
        }
    }
}

fn stroke_rect(img: &mut RgbImage, left: u32, top: u32, width: u32, height: u32, color: Rgb<u8>) {
    let (l, t) = (left as i64, top as i64);
    let (r, b) = (l + width as i64 - 1, t + height as i64 - 1);
    draw_line(img, (l, t), (r, t), color);
    draw_line(img, (l, b), (r, b), color);
    draw_line(img, (l, t), (l, b), color);
    draw_line(img, (r, t), (r, b), color);
}

fn draw_text(img: &mut RgbImage, left: u32, top: u32, text: &str, scale: u32, color: Rgb<u8>) {
    let advance = (GLYPH_WIDTH + GLYPH_SPACING) * scale;
    for (n, c) in text.chars().enumerate() {
        let x0 = left + n as u32 * advance;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        put(
                            img,
                            (x0 + col * scale + dx) as i64,
                            (top + row as u32 * scale + dy) as i64,
                            color,
                        );
                    }
                }
            }
        }
    }
}
