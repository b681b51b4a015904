//! Pixel filters for captured frames.
//!
//! Pure `RgbImage -> RgbImage` transforms; the filter set is fixed
//! (grayscale, sepia, cartoon) and selected in configuration.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use image::{GrayImage, RgbImage};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    #[default]
    None,
    Grayscale,
    Sepia,
    Cartoon,
}

impl FromStr for FilterKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(FilterKind::None),
            "grayscale" => Ok(FilterKind::Grayscale),
            "sepia" => Ok(FilterKind::Sepia),
            "cartoon" => Ok(FilterKind::Cartoon),
            other => Err(anyhow!(
                "unknown filter '{}' (expected none|grayscale|sepia|cartoon)",
                other
            )),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterKind::None => "none",
            FilterKind::Grayscale => "grayscale",
            FilterKind::Sepia => "sepia",
            FilterKind::Cartoon => "cartoon",
        };
        f.write_str(name)
    }
}

/// Apply `kind` to `img`. `None` is the identity.
pub fn apply_filter(img: &RgbImage, kind: FilterKind) -> RgbImage {
    match kind {
        FilterKind::None => img.clone(),
        FilterKind::Grayscale => grayscale(img),
        FilterKind::Sepia => sepia(img),
        FilterKind::Cartoon => cartoon(img),
    }
}

fn grayscale(img: &RgbImage) -> RgbImage {
    let gray = image::imageops::grayscale(img);
    let mut out = RgbImage::new(img.width(), img.height());
    for (src, dst) in gray.pixels().zip(out.pixels_mut()) {
        let luma = src.0[0];
        dst.0 = [luma, luma, luma];
    }
    out
}

fn sepia(img: &RgbImage) -> RgbImage {
    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        let [r, g, b] = pixel.0.map(f32::from);
        pixel.0 = [
            sepia_channel(0.393 * r + 0.769 * g + 0.189 * b),
            sepia_channel(0.349 * r + 0.686 * g + 0.168 * b),
            sepia_channel(0.272 * r + 0.534 * g + 0.131 * b),
        ];
    }
    out
}

fn sepia_channel(value: f32) -> u8 {
    value.min(255.0) as u8
}

/// Smoothed color masked by an adaptive-threshold edge map: edge pixels go
/// black, flat regions keep the smoothed color.
fn cartoon(img: &RgbImage) -> RgbImage {
    let smoothed = image::imageops::blur(img, 2.0);
    let gray = image::imageops::grayscale(img);
    let edges = adaptive_mean_edges(&gray, 4, 2);

    let mut out = RgbImage::new(img.width(), img.height());
    for ((dst, src), edge) in out.pixels_mut().zip(smoothed.pixels()).zip(edges.pixels()) {
        dst.0 = if edge.0[0] == 0 { [0, 0, 0] } else { src.0 };
    }
    out
}

/// Mean-threshold edge map: a pixel darker than its neighborhood mean by
/// more than `bias` is an edge (0); everything else is 255.
fn adaptive_mean_edges(gray: &GrayImage, radius: u32, bias: i32) -> GrayImage {
    let (width, height) = gray.dimensions();
    let integral = integral_image(gray);
    let sum_of = |x0: u32, y0: u32, x1: u32, y1: u32| -> u64 {
        // Inclusive box [x0, x1] x [y0, y1] over the (w+1, h+1) integral.
        let (x0, y0, x1, y1) = (x0 as usize, y0 as usize, x1 as usize + 1, y1 as usize + 1);
        let stride = width as usize + 1;
        integral[y1 * stride + x1] + integral[y0 * stride + x0]
            - integral[y0 * stride + x1]
            - integral[y1 * stride + x0]
    };

    let mut out = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let x0 = x.saturating_sub(radius);
            let y0 = y.saturating_sub(radius);
            let x1 = (x + radius).min(width - 1);
            let y1 = (y + radius).min(height - 1);
            let count = ((x1 - x0 + 1) * (y1 - y0 + 1)) as u64;
            let mean = (sum_of(x0, y0, x1, y1) / count) as i32;

            let value = i32::from(gray.get_pixel(x, y).0[0]);
            out.get_pixel_mut(x, y).0[0] = if value < mean - bias { 0 } else { 255 };
        }
    }
    out
}

/// Summed-area table with a zero row/column of padding.
fn integral_image(gray: &GrayImage) -> Vec<u64> {
    let (width, height) = gray.dimensions();
    let stride = width as usize + 1;
    let mut integral = vec![0u64; stride * (height as usize + 1)];
    for y in 0..height as usize {
        let mut row_sum = 0u64;
        for x in 0..width as usize {
            row_sum += u64::from(gray.get_pixel(x as u32, y as u32).0[0]);
            integral[(y + 1) * stride + x + 1] = integral[y * stride + x + 1] + row_sum;
        }
    }
    integral
}
