use std::f64::consts::PI;
use std::fs::File;
use std::path::Path;

use cairo::Context;
use cairo::FontSlant;
use cairo::FontWeight;
use cairo::Format;
use cairo::ImageSurface;

use crate::measurements::Measurements;
use crate::Result;

/// Size of the saved PNG, in pixels.
pub const WIDTH: i32 = 1000;
pub const HEIGHT: i32 = 600;

const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 65.0;
/// Fraction of the data span left empty on each side of the plot.
const DATA_MARGIN: f64 = 0.05;
const MAX_TICKS: usize = 10;

const MARKER_RADIUS: f64 = 4.5;
const TREND_WIDTH: f64 = 1.5;
const TREND_DASH: [f64; 2] = [5.5, 2.5];
const GRID_GRAY: f64 = 0.69;
const FONT: &str = "Sans";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    fn set_source(self, cr: &Context) {
        cr.set_source_rgb(
            f64::from(self.0) / 255.0,
            f64::from(self.1) / 255.0,
            f64::from(self.2) / 255.0,
        );
    }
}

pub const GREEN: Color = Color(0, 128, 0);
pub const BLUE: Color = Color(0, 0, 255);
pub const RED: Color = Color(255, 0, 0);

#[derive(Clone, Debug, PartialEq)]
pub struct ChartStyle {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub scatter_color: Color,
    pub scatter_label: String,
    pub trend_color: Color,
    pub trend_label: String,
}

/// Raw readings as markers plus a fitted curve as a dashed line.
#[derive(Clone, Debug)]
pub struct Chart {
    pub points: Vec<(f64, f64)>,
    pub trend: Vec<(f64, f64)>,
    pub style: ChartStyle,
}

/// Maps data coordinates on one axis to device coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Axis {
    lo: f64,
    hi: f64,
    px_lo: f64,
    px_hi: f64,
}

impl Axis {
    fn map(&self, x: f64) -> f64 {
        self.px_lo + (x - self.lo) / (self.hi - self.lo) * (self.px_hi - self.px_lo)
    }
}

/// Data span padded by `DATA_MARGIN`, never empty.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return (0.0, 1.0);
    }
    if lo == hi {
        return (lo - 0.5, hi + 0.5);
    }
    let pad = (hi - lo) * DATA_MARGIN;
    (lo - pad, hi + pad)
}

/// Smallest step of the form `{1, 2, 2.5, 5}·10^k` giving at most `max_ticks` ticks.
fn tick_step(lo: f64, hi: f64, max_ticks: usize) -> f64 {
    let raw = (hi - lo) / max_ticks.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|&step| step >= raw)
        .unwrap_or(10.0 * magnitude)
}

/// Tick positions inside `[lo, hi]`, on multiples of a rounded step.
fn nice_ticks(lo: f64, hi: f64, max_ticks: usize) -> Vec<f64> {
    let step = tick_step(lo, hi, max_ticks);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last)
        .map(|k| k as f64 * step)
        // avoid labels like "-0"
        .map(|t| if t.abs() < step * 1e-9 { 0.0 } else { t })
        .collect()
}

/// Decimal places needed to print every multiple of `step` exactly.
fn tick_decimals(step: f64) -> usize {
    (0..6)
        .find(|&d| {
            let scaled = step * 10f64.powi(d as i32);
            (scaled - scaled.round()).abs() < 1e-6
        })
        .unwrap_or(6)
}

impl Chart {
    pub fn new(measurements: &Measurements, trend: Vec<(f64, f64)>, style: ChartStyle) -> Self {
        Chart {
            points: measurements.iter().collect(),
            trend,
            style,
        }
    }

    fn axes(&self, width: f64, height: f64) -> (Axis, Axis) {
        let all = || self.points.iter().chain(self.trend.iter());
        let (x_lo, x_hi) = padded_range(all().map(|(v, _)| *v));
        let (y_lo, y_hi) = padded_range(all().map(|(_, i)| *i));
        (
            Axis {
                lo: x_lo,
                hi: x_hi,
                px_lo: MARGIN_LEFT,
                px_hi: width - MARGIN_RIGHT,
            },
            Axis {
                lo: y_lo,
                hi: y_hi,
                px_lo: height - MARGIN_BOTTOM,
                px_hi: MARGIN_TOP,
            },
        )
    }

    /// Paints the whole chart onto `cr`, scaled to `width × height`.
    pub fn draw(&self, cr: &Context, width: f64, height: f64) -> Result<()> {
        trace_time!("draw chart");
        let (x, y) = self.axes(width, height);

        cr.save()?;
        cr.set_source_rgb(1.0, 1.0, 1.0);
        cr.paint()?;
        cr.restore()?;

        self.draw_grid(cr, &x, &y)?;
        self.draw_trend(cr, &x, &y)?;
        self.draw_points(cr, &x, &y)?;
        self.draw_frame(cr, &x, &y)?;
        self.draw_labels(cr, &x, &y, width, height)?;
        self.draw_legend(cr, &x, &y)?;
        Ok(())
    }

    fn clip_to_plot(cr: &Context, x: &Axis, y: &Axis) {
        cr.rectangle(x.px_lo, y.px_hi, x.px_hi - x.px_lo, y.px_lo - y.px_hi);
        cr.clip();
    }

    fn draw_grid(&self, cr: &Context, x: &Axis, y: &Axis) -> Result<()> {
        cr.save()?;
        cr.set_source_rgb(GRID_GRAY, GRID_GRAY, GRID_GRAY);
        cr.set_line_width(0.8);
        cr.set_dash(&[], 0.0);

        for v in nice_ticks(x.lo, x.hi, MAX_TICKS) {
            cr.move_to(x.map(v), y.px_lo);
            cr.line_to(x.map(v), y.px_hi);
        }
        for i in nice_ticks(y.lo, y.hi, MAX_TICKS) {
            cr.move_to(x.px_lo, y.map(i));
            cr.line_to(x.px_hi, y.map(i));
        }
        cr.stroke()?;
        cr.restore()?;
        Ok(())
    }

    fn draw_trend(&self, cr: &Context, x: &Axis, y: &Axis) -> Result<()> {
        cr.save()?;
        Chart::clip_to_plot(cr, x, y);
        self.style.trend_color.set_source(cr);
        cr.set_line_width(TREND_WIDTH);
        cr.set_dash(&TREND_DASH, 0.0);
        for (ix, (v, i)) in self.trend.iter().enumerate() {
            if ix == 0 {
                cr.move_to(x.map(*v), y.map(*i));
            } else {
                cr.line_to(x.map(*v), y.map(*i));
            }
        }
        cr.stroke()?;
        cr.restore()?;
        Ok(())
    }

    fn draw_points(&self, cr: &Context, x: &Axis, y: &Axis) -> Result<()> {
        cr.save()?;
        Chart::clip_to_plot(cr, x, y);
        self.style.scatter_color.set_source(cr);
        for (v, i) in self.points.iter() {
            cr.new_sub_path();
            cr.arc(x.map(*v), y.map(*i), MARKER_RADIUS, 0.0, PI * 2.0);
        }
        cr.fill()?;
        cr.restore()?;
        Ok(())
    }

    fn draw_frame(&self, cr: &Context, x: &Axis, y: &Axis) -> Result<()> {
        cr.save()?;
        cr.set_source_rgb(0.0, 0.0, 0.0);
        cr.set_line_width(1.0);
        cr.rectangle(x.px_lo, y.px_hi, x.px_hi - x.px_lo, y.px_lo - y.px_hi);

        for v in nice_ticks(x.lo, x.hi, MAX_TICKS) {
            cr.move_to(x.map(v), y.px_lo);
            cr.line_to(x.map(v), y.px_lo + 4.0);
        }
        for i in nice_ticks(y.lo, y.hi, MAX_TICKS) {
            cr.move_to(x.px_lo, y.map(i));
            cr.line_to(x.px_lo - 4.0, y.map(i));
        }
        cr.stroke()?;
        cr.restore()?;
        Ok(())
    }

    fn draw_labels(
        &self,
        cr: &Context,
        x: &Axis,
        y: &Axis,
        width: f64,
        height: f64,
    ) -> Result<()> {
        cr.save()?;
        cr.set_source_rgb(0.0, 0.0, 0.0);
        cr.select_font_face(FONT, FontSlant::Normal, FontWeight::Normal);
        cr.set_font_size(12.0);

        let x_decimals = tick_decimals(tick_step(x.lo, x.hi, MAX_TICKS));
        for v in nice_ticks(x.lo, x.hi, MAX_TICKS) {
            let text = format!("{:.*}", x_decimals, v);
            let extents = cr.text_extents(&text)?;
            cr.move_to(
                x.map(v) - extents.width() / 2.0 - extents.x_bearing(),
                y.px_lo + 8.0 + extents.height(),
            );
            cr.show_text(&text)?;
        }

        let y_decimals = tick_decimals(tick_step(y.lo, y.hi, MAX_TICKS));
        for i in nice_ticks(y.lo, y.hi, MAX_TICKS) {
            let text = format!("{:.*}", y_decimals, i);
            let extents = cr.text_extents(&text)?;
            cr.move_to(
                x.px_lo - 8.0 - extents.width() - extents.x_bearing(),
                y.map(i) + extents.height() / 2.0,
            );
            cr.show_text(&text)?;
        }

        cr.set_font_size(14.0);
        let extents = cr.text_extents(&self.style.x_label)?;
        cr.move_to(
            (x.px_lo + x.px_hi) / 2.0 - extents.width() / 2.0 - extents.x_bearing(),
            height - 12.0,
        );
        cr.show_text(&self.style.x_label)?;

        let extents = cr.text_extents(&self.style.y_label)?;
        cr.save()?;
        cr.translate(24.0, (y.px_lo + y.px_hi) / 2.0 + extents.width() / 2.0);
        cr.rotate(-PI / 2.0);
        cr.move_to(0.0, 0.0);
        cr.show_text(&self.style.y_label)?;
        cr.restore()?;

        cr.select_font_face(FONT, FontSlant::Normal, FontWeight::Bold);
        cr.set_font_size(16.0);
        let extents = cr.text_extents(&self.style.title)?;
        cr.move_to(
            width / 2.0 - extents.width() / 2.0 - extents.x_bearing(),
            MARGIN_TOP - 16.0,
        );
        cr.show_text(&self.style.title)?;

        cr.restore()?;
        Ok(())
    }

    fn draw_legend(&self, cr: &Context, x: &Axis, y: &Axis) -> Result<()> {
        const PADDING: f64 = 8.0;
        const ROW: f64 = 22.0;
        const SAMPLE: f64 = 30.0;

        cr.save()?;
        cr.select_font_face(FONT, FontSlant::Normal, FontWeight::Normal);
        cr.set_font_size(12.0);
        let text_width = [&self.style.scatter_label, &self.style.trend_label]
            .iter()
            .map(|label| cr.text_extents(label).map(|e| e.x_advance()))
            .collect::<std::result::Result<Vec<f64>, cairo::Error>>()?
            .into_iter()
            .fold(0.0, f64::max);

        let left = x.px_lo + 10.0;
        let top = y.px_hi + 10.0;
        let box_width = PADDING * 3.0 + SAMPLE + text_width;
        let box_height = PADDING * 2.0 + ROW * 2.0;

        cr.rectangle(left, top, box_width, box_height);
        cr.set_source_rgba(1.0, 1.0, 1.0, 0.8);
        cr.fill_preserve()?;
        cr.set_source_rgb(0.8, 0.8, 0.8);
        cr.set_line_width(1.0);
        cr.stroke()?;

        let scatter_row = top + PADDING + ROW / 2.0;
        self.style.scatter_color.set_source(cr);
        cr.arc(left + PADDING + SAMPLE / 2.0, scatter_row, MARKER_RADIUS, 0.0, PI * 2.0);
        cr.fill()?;

        let trend_row = scatter_row + ROW;
        self.style.trend_color.set_source(cr);
        cr.set_line_width(TREND_WIDTH);
        cr.set_dash(&TREND_DASH, 0.0);
        cr.move_to(left + PADDING, trend_row);
        cr.line_to(left + PADDING + SAMPLE, trend_row);
        cr.stroke()?;
        cr.set_dash(&[], 0.0);

        cr.set_source_rgb(0.0, 0.0, 0.0);
        let text_left = left + PADDING * 2.0 + SAMPLE;
        for (row, label) in [
            (scatter_row, &self.style.scatter_label),
            (trend_row, &self.style.trend_label),
        ]
        .iter()
        {
            let extents = cr.text_extents(label)?;
            cr.move_to(text_left, row - extents.y_bearing() - extents.height() / 2.0);
            cr.show_text(label)?;
        }
        cr.restore()?;
        Ok(())
    }

    /// Renders at `WIDTH × HEIGHT` and writes a PNG to `path`.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug_time!("save_png {}", path.display());

        let surface = ImageSurface::create(Format::ARgb32, WIDTH, HEIGHT)?;
        {
            let cr = Context::new(&surface)?;
            self.draw(&cr, f64::from(WIDTH), f64::from(HEIGHT))?;
        }
        surface.flush();

        let mut out = File::create(path)?;
        surface
            .write_to_png(&mut out)
            .map_err(|e| failure::err_msg(format!("Can't write {}: {}", path.display(), e)))?;
        Ok(())
    }
}
