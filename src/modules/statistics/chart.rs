//! PNG bar charts for a daily loan series.
//!
//! Each bar carries its total above it and its `MM-DD` date below the axis,
//! drawn with a built-in 3x5 pixel digit font. The numeric series in the
//! report stays the exact reading; the chart is a visual summary of it.

use std::io::Cursor;

use data_encoding::BASE64;
use image::{ImageFormat, Rgb, RgbImage};

use gearlend_core::AppError;

use crate::modules::statistics::model::DailyLoanPoint;

const HEIGHT: u32 = 200;
const MARGIN: u32 = 20;
const BAR_WIDTH: u32 = 24;
const BAR_GAP: u32 = 12;
const MIN_WIDTH: u32 = 200;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([160, 160, 160]);
const BAR: Rgb<u8> = Rgb([135, 206, 235]);
const TEXT: Rgb<u8> = Rgb([60, 60, 60]);

const GLYPH_WIDTH: u32 = 3;
const GLYPH_HEIGHT: u32 = 5;
const LABEL_GAP: u32 = 2;

/// Rows of a 3x5 glyph, most significant of the low three bits on the left.
fn glyph(c: char) -> Option<[u8; 5]> {
    Some(match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        _ => return None,
    })
}

fn text_width(text: &str) -> u32 {
    let chars = text.chars().count() as u32;
    (chars * (GLYPH_WIDTH + 1)).saturating_sub(1)
}

/// Draws `text` centred over the column `[left, left + span)` with its top at `top`.
/// Pixels falling outside the canvas are dropped.
fn draw_label(img: &mut RgbImage, text: &str, left: u32, span: u32, top: u32) {
    let mut x = left + span.saturating_sub(text_width(text)) / 2;

    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (dy, row) in rows.iter().enumerate() {
                for dx in 0..GLYPH_WIDTH {
                    if row & (0b100 >> dx) == 0 {
                        continue;
                    }
                    let (px, py) = (x + dx, top + dy as u32);
                    if px < img.width() && py < img.height() {
                        img.put_pixel(px, py, TEXT);
                    }
                }
            }
        }
        x += GLYPH_WIDTH + 1;
    }
}

/// Draws one labelled bar per point, scaled so the largest total fills the plot height.
pub fn render_bar_chart(series: &[DailyLoanPoint]) -> RgbImage {
    let plot_width = series.len() as u32 * (BAR_WIDTH + BAR_GAP);
    let width = (plot_width + 2 * MARGIN).max(MIN_WIDTH);
    let baseline = HEIGHT - MARGIN;
    let plot_height = HEIGHT - 2 * MARGIN;

    let mut img = RgbImage::from_pixel(width, HEIGHT, BACKGROUND);

    for x in MARGIN..width - MARGIN {
        img.put_pixel(x, baseline, AXIS);
    }

    let max_total = series.iter().map(|p| p.total).max().unwrap_or(0);
    if max_total <= 0 {
        return img;
    }

    for (i, point) in series.iter().enumerate() {
        let bar_height =
            ((point.total.max(0) as f64 / max_total as f64) * plot_height as f64).round() as u32;
        let left = MARGIN + BAR_GAP / 2 + i as u32 * (BAR_WIDTH + BAR_GAP);

        for x in left..left + BAR_WIDTH {
            for y in baseline - bar_height..baseline {
                img.put_pixel(x, y, BAR);
            }
        }

        let value_top = (baseline - bar_height).saturating_sub(LABEL_GAP + GLYPH_HEIGHT);
        draw_label(&mut img, &point.total.to_string(), left, BAR_WIDTH, value_top);

        let date = point.date.format("%m-%d").to_string();
        draw_label(&mut img, &date, left, BAR_WIDTH, baseline + LABEL_GAP + 1);
    }

    img
}

pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, AppError> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| AppError::internal_error(format!("Failed to encode chart: {}", e)))?;
    Ok(buffer.into_inner())
}

/// Renders the series and returns the PNG bytes base64 encoded.
pub fn chart_png_base64(series: &[DailyLoanPoint]) -> Result<String, AppError> {
    let png = encode_png(&render_bar_chart(series))?;
    Ok(BASE64.encode(&png))
}
