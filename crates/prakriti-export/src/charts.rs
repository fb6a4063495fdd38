//! PNG charts for the report: category bars and a two-series radar.
//!
//! Rendering never propagates errors to the composer. Failures are logged
//! and the caller checks whether the file exists.

use std::f32::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use tracing::{debug, warn};

use prakriti_core::models::dosha::ScoreDistribution;
use prakriti_core::models::psychometric::PsychometricProfile;

use crate::error::ChartError;
use crate::glyphs::{draw_text, text_height, text_width};

const BAR_SIZE: (u32, u32) = (800, 450);
const RADAR_SIZE: u32 = 600;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([45, 45, 45, 255]);
const AXIS: Rgba<u8> = Rgba([110, 110, 110, 255]);
const GRID: Rgba<u8> = Rgba([222, 222, 222, 255]);

const PALETTE: [[u8; 3]; 5] = [
    [108, 142, 191],
    [224, 123, 57],
    [91, 154, 104],
    [155, 106, 176],
    [200, 160, 50],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

fn opaque([r, g, b]: [u8; 3]) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

fn fill_rect(img: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
    let (w, h) = (i64::from(img.width()), i64::from(img.height()));
    for y in y0.max(0)..y1.min(h) {
        for x in x0.max(0)..x1.min(w) {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

fn blend(img: &mut RgbaImage, x: i64, y: i64, rgb: [u8; 3], alpha: f32) {
    if x < 0 || y < 0 || x >= i64::from(img.width()) || y >= i64::from(img.height()) {
        return;
    }
    let px = img.get_pixel_mut(x as u32, y as u32);
    for (i, c) in rgb.iter().enumerate() {
        let base = f32::from(px.0[i]);
        px.0[i] = (base + (f32::from(*c) - base) * alpha).round() as u8;
    }
}

fn draw_line(img: &mut RgbaImage, from: (f32, f32), to: (f32, f32), color: Rgba<u8>, thickness: i64) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i64;
    let half = thickness / 2;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = (from.0 + dx * t).round() as i64;
        let y = (from.1 + dy * t).round() as i64;
        fill_rect(img, x - half, y - half, x - half + thickness, y - half + thickness, color);
    }
}

/// Even-odd scanline fill, alpha-blended over what is already drawn.
fn fill_polygon(img: &mut RgbaImage, points: &[(f32, f32)], rgb: [u8; 3], alpha: f32) {
    if points.len() < 3 {
        return;
    }
    let y_min = points.iter().map(|p| p.1).fold(f32::INFINITY, f32::min).floor() as i64;
    let y_max = points.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max).ceil() as i64;
    for y in y_min..=y_max {
        let scan = y as f32 + 0.5;
        let mut crossings: Vec<f32> = Vec::new();
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            if (a.1 <= scan && b.1 > scan) || (b.1 <= scan && a.1 > scan) {
                crossings.push(a.0 + (scan - a.1) / (b.1 - a.1) * (b.0 - a.0));
            }
        }
        crossings.sort_by(|l, r| l.total_cmp(r));
        for pair in crossings.chunks_exact(2) {
            for x in pair[0].round() as i64..pair[1].round() as i64 {
                blend(img, x, y, rgb, alpha);
            }
        }
    }
}

fn value_label(value: f64) -> String {
    format!("{value:.1}%")
}

/// Draw a bar chart scaled 0–100 with a value label on every bar.
pub fn draw_bar_chart(
    series: &[(String, f64)],
    title: &str,
    orientation: Orientation,
) -> Result<RgbaImage, ChartError> {
    if series.is_empty() {
        return Err(ChartError::EmptySeries(title.to_string()));
    }
    let (width, height) = BAR_SIZE;
    let mut img = RgbaImage::from_pixel(width, height, BACKGROUND);
    draw_text(&mut img, 20, 16, title, 3, INK);

    let n = series.len() as f32;
    let label_scale = 2;
    let label_h = text_height(label_scale) as f32;

    match orientation {
        Orientation::Horizontal => {
            let label_w = series
                .iter()
                .map(|(label, _)| text_width(label, label_scale))
                .max()
                .unwrap_or(0) as f32;
            let (left, right) = (20.0 + label_w + 14.0, width as f32 - 100.0);
            let (top, bottom) = (64.0, height as f32 - 24.0);
            for tick in [0.0, 25.0, 50.0, 75.0, 100.0] {
                let x = left + (right - left) * tick / 100.0;
                draw_line(&mut img, (x, top), (x, bottom), GRID, 1);
            }
            let slot = (bottom - top) / n;
            for (i, (label, value)) in series.iter().enumerate() {
                let mid = top + slot * (i as f32 + 0.5);
                let bar_h = slot * 0.6;
                let end = left + (right - left) * (value.clamp(0.0, 100.0) as f32) / 100.0;
                fill_rect(
                    &mut img,
                    left as i64,
                    (mid - bar_h / 2.0) as i64,
                    end as i64,
                    (mid + bar_h / 2.0) as i64,
                    opaque(PALETTE[i % PALETTE.len()]),
                );
                let text_y = (mid - label_h / 2.0) as i64;
                draw_text(&mut img, 20, text_y, label, label_scale, INK);
                draw_text(&mut img, end as i64 + 8, text_y, &value_label(*value), label_scale, INK);
            }
            draw_line(&mut img, (left, top), (left, bottom), AXIS, 2);
        }
        Orientation::Vertical => {
            let (left, right) = (56.0, width as f32 - 20.0);
            let (top, bottom) = (80.0, height as f32 - 44.0);
            for tick in [0.0_f32, 25.0, 50.0, 75.0, 100.0] {
                let y = bottom - (bottom - top) * tick / 100.0;
                draw_line(&mut img, (left, y), (right, y), GRID, 1);
                let tick_label = format!("{tick:.0}");
                let tw = text_width(&tick_label, label_scale) as i64;
                draw_text(&mut img, left as i64 - 8 - tw, (y - label_h / 2.0) as i64, &tick_label, label_scale, AXIS);
            }
            let slot = (right - left) / n;
            for (i, (label, value)) in series.iter().enumerate() {
                let center = left + slot * (i as f32 + 0.5);
                let bar_w = slot * 0.55;
                let top_y = bottom - (bottom - top) * (value.clamp(0.0, 100.0) as f32) / 100.0;
                fill_rect(
                    &mut img,
                    (center - bar_w / 2.0) as i64,
                    top_y as i64,
                    (center + bar_w / 2.0) as i64,
                    bottom as i64,
                    opaque(PALETTE[i % PALETTE.len()]),
                );
                let value_text = value_label(*value);
                let vw = text_width(&value_text, label_scale) as f32;
                draw_text(
                    &mut img,
                    (center - vw / 2.0) as i64,
                    (top_y - label_h - 6.0) as i64,
                    &value_text,
                    label_scale,
                    INK,
                );
                let lw = text_width(label, label_scale) as f32;
                draw_text(&mut img, (center - lw / 2.0) as i64, bottom as i64 + 10, label, label_scale, INK);
            }
            draw_line(&mut img, (left, bottom), (right, bottom), AXIS, 2);
        }
    }
    Ok(img)
}

/// Draw Prakriti and Vikriti as overlaid polygons on three axes.
pub fn draw_radar_chart(
    prakriti: &ScoreDistribution,
    vikriti: &ScoreDistribution,
    title: &str,
) -> RgbaImage {
    let size = RADAR_SIZE;
    let mut img = RgbaImage::from_pixel(size, size, BACKGROUND);
    draw_text(&mut img, 20, 16, title, 3, INK);

    let center = (size as f32 / 2.0, size as f32 / 2.0 + 10.0);
    let radius = 200.0;
    let axes: Vec<f32> = (0..3).map(|k| -PI / 2.0 + k as f32 * 2.0 * PI / 3.0).collect();
    let point = |angle: f32, pct: f64| {
        let r = radius * (pct.clamp(0.0, 100.0) as f32) / 100.0;
        (center.0 + r * angle.cos(), center.1 + r * angle.sin())
    };

    for ring in [25.0, 50.0, 75.0, 100.0] {
        for k in 0..axes.len() {
            let a = point(axes[k], ring);
            let b = point(axes[(k + 1) % axes.len()], ring);
            draw_line(&mut img, a, b, GRID, 1);
        }
    }
    for (angle, (dosha, _)) in axes.iter().zip(prakriti.iter()) {
        draw_line(&mut img, center, point(*angle, 100.0), AXIS, 1);
        let (lx, ly) = point(*angle, 112.0);
        let label = dosha.name();
        let lw = text_width(label, 2) as f32;
        draw_text(&mut img, (lx - lw / 2.0) as i64, (ly - 7.0) as i64, label, 2, INK);
    }

    let series = [
        ("Prakriti", prakriti, PALETTE[0]),
        ("Vikriti", vikriti, PALETTE[1]),
    ];
    for (_, dist, rgb) in &series {
        let pts: Vec<(f32, f32)> = axes
            .iter()
            .zip(dist.iter())
            .map(|(angle, (_, pct))| point(*angle, pct))
            .collect();
        fill_polygon(&mut img, &pts, *rgb, 0.25);
        for k in 0..pts.len() {
            draw_line(&mut img, pts[k], pts[(k + 1) % pts.len()], opaque(*rgb), 3);
        }
    }

    let legend_y = i64::from(size) - 36;
    let mut legend_x = 40;
    for (name, _, rgb) in &series {
        fill_rect(&mut img, legend_x, legend_y, legend_x + 18, legend_y + 14, opaque(*rgb));
        draw_text(&mut img, legend_x + 26, legend_y, name, 2, INK);
        legend_x += 40 + i64::from(text_width(name, 2));
    }
    img
}

fn save_png(img: &RgbaImage, path: &Path) -> Result<(), ChartError> {
    img.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

pub fn render_bar_chart(series: &[(String, f64)], title: &str, path: &Path, orientation: Orientation) {
    match draw_bar_chart(series, title, orientation).and_then(|img| save_png(&img, path)) {
        Ok(()) => debug!(path = %path.display(), "Rendered bar chart"),
        Err(e) => warn!(path = %path.display(), error = %e, "Bar chart failed"),
    }
}

pub fn render_radar_chart(
    prakriti: &ScoreDistribution,
    vikriti: &ScoreDistribution,
    title: &str,
    path: &Path,
) {
    let img = draw_radar_chart(prakriti, vikriti, title);
    match save_png(&img, path) {
        Ok(()) => debug!(path = %path.display(), "Rendered radar chart"),
        Err(e) => warn!(path = %path.display(), error = %e, "Radar chart failed"),
    }
}

/// The four report charts written to a scratch directory.
#[derive(Debug, Clone)]
pub struct ChartSet {
    pub prakriti: PathBuf,
    pub vikriti: PathBuf,
    pub psychometric: PathBuf,
    pub radar: PathBuf,
}

impl ChartSet {
    /// Render all charts into `tmp_dir` under names keyed by `stamp_ms`.
    pub fn render(
        tmp_dir: &Path,
        stamp_ms: i64,
        prakriti: &ScoreDistribution,
        vikriti: &ScoreDistribution,
        psych: &PsychometricProfile,
    ) -> ChartSet {
        if let Err(e) = fs::create_dir_all(tmp_dir) {
            warn!(dir = %tmp_dir.display(), error = %e, "Cannot create chart directory");
        }
        let set = ChartSet {
            prakriti: tmp_dir.join(format!("prakriti_{stamp_ms}.png")),
            vikriti: tmp_dir.join(format!("vikriti_{stamp_ms}.png")),
            psychometric: tmp_dir.join(format!("psych_{stamp_ms}.png")),
            radar: tmp_dir.join(format!("radar_{stamp_ms}.png")),
        };

        let doshas = |d: &ScoreDistribution| -> Vec<(String, f64)> {
            d.iter().map(|(k, v)| (k.name().to_string(), v)).collect()
        };
        let axes: Vec<(String, f64)> = psych.iter().map(|(k, v)| (k.name().to_string(), v)).collect();

        render_bar_chart(&doshas(prakriti), "Prakriti (constitutional %)", &set.prakriti, Orientation::Vertical);
        render_bar_chart(&doshas(vikriti), "Vikriti (today %)", &set.vikriti, Orientation::Vertical);
        render_bar_chart(&axes, "Psychometric (approx %)", &set.psychometric, Orientation::Horizontal);
        render_radar_chart(prakriti, vikriti, "Prakriti vs Vikriti", &set.radar);
        set
    }

    pub fn paths(&self) -> [&Path; 4] {
        [&self.prakriti, &self.vikriti, &self.psychometric, &self.radar]
    }

    /// Remove the chart files, ignoring any that are already gone.
    pub fn cleanup(&self) {
        for path in self.paths() {
            if let Err(e) = fs::remove_file(path) {
                debug!(path = %path.display(), error = %e, "Chart cleanup skipped");
            }
        }
    }
}
