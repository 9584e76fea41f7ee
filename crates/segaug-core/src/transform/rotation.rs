//! Rotation onto an expanded canvas.
//!
//! Quarter turns are exact pixel permutations done with `image::imageops`.
//! Every other angle is resampled by inverse mapping: each canvas pixel center
//! is mapped back into the source, where the chosen filter interpolates.
//!
//! With `(cx, cy)` the canvas center and `(sx, sy)` the source center, both in
//! pixel-center coordinates:
//! ```text
//! src_x = (x - cx) * cos(θ) - (y - cy) * sin(θ) + sx
//! src_y = (x - cx) * sin(θ) + (y - cy) * cos(θ) + sy
//! ```
//! Since y points down, a positive θ turns the content counter-clockwise.
//! Canvas pixels that map outside the source stay 0.

use image::imageops;

use crate::raster::{FilterType, Image};

/// Distance outside the source still treated as an edge hit.
const EDGE_SLACK: f64 = 1e-6;

/// Angles this close to a multiple of 90° are treated as quarter turns.
const QUARTER_SLACK: f64 = 1e-3;

/// Lanczos window radius.
const LANCZOS_A: f64 = 3.0;

/// Number of counter-clockwise quarter turns `angle_degrees` amounts to, if it
/// is (close to) a multiple of 90°.
fn quarter_turns(angle_degrees: f64) -> Option<u8> {
    let quarters = angle_degrees / 90.0;
    let nearest = quarters.round();
    if (quarters - nearest).abs() * 90.0 < QUARTER_SLACK {
        Some((nearest as i64).rem_euclid(4) as u8)
    } else {
        None
    }
}

/// Canvas size `(width, height)` that holds a `width x height` image rotated
/// by `angle_degrees` without clipping. Never smaller than 1x1.
pub fn rotated_canvas(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    if let Some(turns) = quarter_turns(angle_degrees) {
        return if turns % 2 == 0 {
            (width, height)
        } else {
            (height, width)
        };
    }

    let theta = angle_degrees.to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    let (w, h) = (f64::from(width), f64::from(height));

    let canvas_w = (w * cos + h * sin).round() as u32;
    let canvas_h = (w * sin + h * cos).round() as u32;
    (canvas_w.max(1), canvas_h.max(1))
}

/// Rotate `image` about its center by `angle_degrees` (counter-clockwise)
/// onto a canvas sized by [`rotated_canvas`].
pub fn rotate_expanded(image: &Image, angle_degrees: f64, filter: FilterType) -> Image {
    if image.is_empty() {
        return image.clone();
    }
    if let Some(turns) = quarter_turns(angle_degrees) {
        return rotate_quarters(image, turns);
    }

    let (canvas_w, canvas_h) = rotated_canvas(image.width, image.height, angle_degrees);
    let theta = angle_degrees.to_radians();
    let (sin, cos) = (theta.sin(), theta.cos());

    let src_cx = f64::from(image.width) / 2.0 - 0.5;
    let src_cy = f64::from(image.height) / 2.0 - 0.5;
    let canvas_cx = f64::from(canvas_w) / 2.0 - 0.5;
    let canvas_cy = f64::from(canvas_h) / 2.0 - 0.5;

    let sampler = Sampler::new(image);
    let channels = image.channels as usize;
    let mut pixels = vec![0.0f32; canvas_w as usize * canvas_h as usize * channels];

    for (i, out) in pixels.chunks_exact_mut(channels.max(1)).enumerate() {
        let dx = (i % canvas_w as usize) as f64 - canvas_cx;
        let dy = (i / canvas_w as usize) as f64 - canvas_cy;

        let x = dx * cos - dy * sin + src_cx;
        let y = dx * sin + dy * cos + src_cy;
        sampler.sample(filter, x, y, out);
    }

    Image::new(canvas_w, canvas_h, image.channels, pixels)
}

fn rotate_quarters(image: &Image, turns: u8) -> Image {
    if turns == 0 {
        return image.clone();
    }

    let planes: Vec<_> = image
        .planes()
        .iter()
        .map(|plane| match turns {
            1 => imageops::rotate270(plane),
            2 => imageops::rotate180(plane),
            _ => imageops::rotate90(plane),
        })
        .collect();
    Image::from_planes(&planes)
}

/// Interpolating reads from a source image at fractional positions.
struct Sampler<'a> {
    image: &'a Image,
    max_x: f64,
    max_y: f64,
}

impl<'a> Sampler<'a> {
    fn new(image: &'a Image) -> Self {
        Self {
            image,
            max_x: f64::from(image.width.saturating_sub(1)),
            max_y: f64::from(image.height.saturating_sub(1)),
        }
    }

    /// Position clamped into the source, or `None` when it lies outside.
    fn locate(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let inside = |v: f64, max: f64| v >= -EDGE_SLACK && v <= max + EDGE_SLACK;
        if inside(x, self.max_x) && inside(y, self.max_y) {
            Some((x.clamp(0.0, self.max_x), y.clamp(0.0, self.max_y)))
        } else {
            None
        }
    }

    fn sample(&self, filter: FilterType, x: f64, y: f64, out: &mut [f32]) {
        let Some((x, y)) = self.locate(x, y) else {
            return;
        };
        match filter {
            FilterType::Nearest => self.nearest(x, y, out),
            FilterType::Bilinear => self.bilinear(x, y, out),
            FilterType::Lanczos3 => self.lanczos3(x, y, out),
        }
    }

    fn nearest(&self, x: f64, y: f64, out: &mut [f32]) {
        out.copy_from_slice(self.image.pixel(x.round() as u32, y.round() as u32));
    }

    fn bilinear(&self, x: f64, y: f64, out: &mut [f32]) {
        let (x0, y0) = (x.floor(), y.floor());
        let (tx, ty) = (x - x0, y - y0);
        let (x0, y0) = (x0 as u32, y0 as u32);
        let x1 = (x0 + 1).min(self.image.width - 1);
        let y1 = (y0 + 1).min(self.image.height - 1);

        let taps = [
            (self.image.pixel(x0, y0), (1.0 - tx) * (1.0 - ty)),
            (self.image.pixel(x1, y0), tx * (1.0 - ty)),
            (self.image.pixel(x0, y1), (1.0 - tx) * ty),
            (self.image.pixel(x1, y1), tx * ty),
        ];
        for (c, o) in out.iter_mut().enumerate() {
            *o = taps
                .iter()
                .map(|(px, w)| f64::from(px[c]) * w)
                .sum::<f64>() as f32;
        }
    }

    /// Separable 6x6 Lanczos3. Falls back to bilinear where the window
    /// would leave the source.
    fn lanczos3(&self, x: f64, y: f64, out: &mut [f32]) {
        let reach = LANCZOS_A - 1.0;
        if x < reach || x > self.max_x - LANCZOS_A || y < reach || y > self.max_y - LANCZOS_A {
            self.bilinear(x, y, out);
            return;
        }

        let (x0, y0) = (x.floor() as i64, y.floor() as i64);
        let taps = |origin: i64, pos: f64| -> [(u32, f64); 6] {
            let mut row = [(0u32, 0.0); 6];
            for (k, tap) in row.iter_mut().enumerate() {
                let p = origin - 2 + k as i64;
                *tap = (p as u32, lanczos(pos - p as f64));
            }
            row
        };
        let (xs, ys) = (taps(x0, x), taps(y0, y));

        let mut acc = vec![0.0f64; out.len()];
        let mut total = 0.0;
        for &(py, wy) in &ys {
            for &(px, wx) in &xs {
                let w = wx * wy;
                for (a, &v) in acc.iter_mut().zip(self.image.pixel(px, py)) {
                    *a += f64::from(v) * w;
                }
                total += w;
            }
        }

        if total > 0.0 {
            for (o, a) in out.iter_mut().zip(acc) {
                *o = (a / total) as f32;
            }
        }
    }
}

/// Lanczos window: `sinc(t) * sinc(t / a)` inside `|t| < a`.
fn lanczos(t: f64) -> f64 {
    if t == 0.0 {
        return 1.0;
    }
    if t.abs() >= LANCZOS_A {
        return 0.0;
    }
    let pt = std::f64::consts::PI * t;
    LANCZOS_A * pt.sin() * (pt / LANCZOS_A).sin() / (pt * pt)
}
