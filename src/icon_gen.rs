use crate::png_chunks::{encode_png, raw_len, FILTER_NONE};
use anyhow::{Context, Result};
use image::{ImageBuffer, Rgba, RgbaImage};
use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

pub const ICON_SIZE: u32 = 128;

pub const HEAD_COLOR: Rgba<u8> = Rgba([65, 105, 225, 255]);
pub const FEATURE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const ANTENNA_COLOR: Rgba<u8> = Rgba([100, 149, 237, 255]);
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

const HEAD_CENTER: (i32, i32) = (64, 64);
const HEAD_RADIUS: i32 = 48;

const LEFT_EYE: (i32, i32) = (48, 48);
const RIGHT_EYE: (i32, i32) = (80, 48);
const EYE_RADIUS: i32 = 8;

const ANTENNA_BALL: (i32, i32) = (64, 10);
const ANTENNA_BALL_RADIUS: i32 = 6;

#[derive(Debug)]
pub struct Args {
    pub output: PathBuf,
}

/// `media/icon.png` next to this crate's manifest.
///
/// The manifest directory is baked in at build time, not looked up when the binary runs.
pub fn default_output_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("media")
        .join("icon.png")
}

fn within_circle(x: i32, y: i32, center: (i32, i32), radius: i32) -> bool {
    let dx = x - center.0;
    let dy = y - center.1;
    dx * dx + dy * dy <= radius * radius
}

fn is_eye(x: i32, y: i32) -> bool {
    (43..=55).contains(&y)
        && (within_circle(x, y, LEFT_EYE, EYE_RADIUS) || within_circle(x, y, RIGHT_EYE, EYE_RADIUS))
}

fn is_mouth(x: i32, y: i32) -> bool {
    (68..=72).contains(&y) && (48..=80).contains(&x)
}

fn is_antenna_stem(x: i32, y: i32) -> bool {
    (14..=18).contains(&y) && (62..=66).contains(&x)
}

fn is_antenna_ball(x: i32, y: i32) -> bool {
    y < 18 && (58..=70).contains(&x) && within_circle(x, y, ANTENNA_BALL, ANTENNA_BALL_RADIUS)
}

/// Color of the icon at `(x, y)`.
///
/// Everything outside the head circle is transparent, so only the part of
/// the antenna that overlaps the head is drawn.
pub fn make_pixel(x: u32, y: u32) -> Rgba<u8> {
    let (x, y) = (x as i32, y as i32);

    if !within_circle(x, y, HEAD_CENTER, HEAD_RADIUS) {
        return TRANSPARENT;
    }
    if is_eye(x, y) || is_mouth(x, y) {
        return FEATURE_COLOR;
    }
    if is_antenna_stem(x, y) || is_antenna_ball(x, y) {
        return ANTENNA_COLOR;
    }
    HEAD_COLOR
}

/// Render the full icon grid.
pub fn render_icon() -> RgbaImage {
    ImageBuffer::from_fn(ICON_SIZE, ICON_SIZE, make_pixel)
}

/// Flatten an image into PNG scanlines, each row prefixed by its filter byte.
pub fn raw_scanlines(img: &RgbaImage) -> Vec<u8> {
    let (width, height) = img.dimensions();
    let mut raw = Vec::with_capacity(raw_len(width, height));
    for row in img.rows() {
        raw.push(FILTER_NONE);
        for pixel in row {
            raw.extend_from_slice(&pixel.0);
        }
    }
    raw
}

/// Render the icon and return the encoded PNG bytes.
pub fn icon_png() -> Result<Vec<u8>> {
    let img = render_icon();
    let raw = raw_scanlines(&img);
    encode_png(&raw, img.width(), img.height()).context("Failed to encode icon PNG")
}

/// Write the icon to `args.output`, returning the number of bytes written.
pub fn generate_icon(args: Args) -> Result<usize> {
    let png = icon_png()?;

    if let Some(parent) = args.output.parent() {
        create_dir_all(parent).with_context(|| {
            format!("Can't create output directory {}", parent.display())
        })?;
    }

    std::fs::write(&args.output, &png)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    let name = args
        .output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.output.display().to_string());
    println!("✓ Created {}: {} bytes", name, png.len());

    Ok(png.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outside_head_is_transparent() {
        for y in 0..ICON_SIZE {
            for x in 0..ICON_SIZE {
                if !within_circle(x as i32, y as i32, HEAD_CENTER, HEAD_RADIUS) {
                    assert_eq!(make_pixel(x, y), TRANSPARENT, "pixel ({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn test_corners_are_transparent() {
        for (x, y) in [(0, 0), (127, 0), (0, 127), (127, 127)] {
            assert_eq!(make_pixel(x, y), TRANSPARENT);
        }
    }

    #[test]
    fn test_feature_pixels() {
        assert_eq!(make_pixel(64, 64), HEAD_COLOR);
        assert_eq!(make_pixel(48, 48), FEATURE_COLOR);
        assert_eq!(make_pixel(80, 48), FEATURE_COLOR);
        assert_eq!(make_pixel(64, 70), FEATURE_COLOR);
        assert_eq!(make_pixel(64, 16), ANTENNA_COLOR);
        assert_eq!(make_pixel(64, 18), ANTENNA_COLOR);
        assert_eq!(make_pixel(62, 17), ANTENNA_COLOR);
    }

    #[test]
    fn test_antenna_is_clipped_to_head() {
        // the ball center and most of the stem sit above the head outline
        assert_eq!(make_pixel(64, 10), TRANSPARENT);
        assert_eq!(make_pixel(64, 15), TRANSPARENT);
        assert_eq!(make_pixel(62, 16), TRANSPARENT);
        assert_eq!(make_pixel(67, 18), HEAD_COLOR);
    }

    #[test]
    fn test_eye_rows_are_clipped() {
        // the eye circles reach rows 40 and 56 but only 43..=55 are drawn
        assert_eq!(make_pixel(48, 41), HEAD_COLOR);
        assert_eq!(make_pixel(48, 43), FEATURE_COLOR);
        assert_eq!(make_pixel(48, 55), FEATURE_COLOR);
        assert_eq!(make_pixel(48, 56), HEAD_COLOR);
    }

    #[test]
    fn test_head_edge_is_inclusive() {
        assert_eq!(make_pixel(16, 64), HEAD_COLOR);
        assert_eq!(make_pixel(15, 64), TRANSPARENT);
        assert_eq!(make_pixel(112, 64), HEAD_COLOR);
        assert_eq!(make_pixel(64, 112), HEAD_COLOR);
        assert_eq!(make_pixel(64, 113), TRANSPARENT);
    }

    #[test]
    fn test_mouth_bounds() {
        assert_eq!(make_pixel(48, 68), FEATURE_COLOR);
        assert_eq!(make_pixel(80, 72), FEATURE_COLOR);
        assert_eq!(make_pixel(47, 70), HEAD_COLOR);
        assert_eq!(make_pixel(64, 73), HEAD_COLOR);
    }

    #[test]
    fn test_raw_scanlines_layout() {
        let img = render_icon();
        let raw = raw_scanlines(&img);
        let stride = 1 + ICON_SIZE as usize * 4;

        assert_eq!(raw.len(), raw_len(ICON_SIZE, ICON_SIZE));
        assert!(raw.chunks(stride).all(|row| row[0] == FILTER_NONE));

        // row 16, column 64 is the top of the head, covered by the antenna
        let offset = 16 * stride + 1 + 64 * 4;
        assert_eq!(&raw[offset..offset + 4], &ANTENNA_COLOR.0);
        assert_eq!(&raw[1..5], &TRANSPARENT.0);
    }

    #[test]
    fn test_icon_png_is_deterministic() {
        let first = icon_png().unwrap();
        let second = icon_png().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_output_path() {
        let path = default_output_path();
        assert!(path.ends_with("media/icon.png"));
    }
}
