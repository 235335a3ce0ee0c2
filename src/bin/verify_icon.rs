use agent_icon::icon_gen::{
    default_output_path, ANTENNA_COLOR, FEATURE_COLOR, HEAD_COLOR, ICON_SIZE, TRANSPARENT,
};
use anyhow::{bail, Context, Result};
use image::{io::Reader as ImageReader, ColorType, Rgba};
use std::path::PathBuf;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(default_output_path);

    let img = ImageReader::open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .decode()
        .context("Failed to decode image")?;

    println!("Checking icon: {}", path.display());
    println!("Image dimensions: {}x{}", img.width(), img.height());
    println!("Color type: {:?}", img.color());

    if img.width() != ICON_SIZE || img.height() != ICON_SIZE {
        bail!("Expected a {}x{} icon", ICON_SIZE, ICON_SIZE);
    }
    if img.color() != ColorType::Rgba8 {
        bail!("Expected 8-bit RGBA, found {:?}", img.color());
    }

    let rgba_img = img.to_rgba8();
    let samples: [(&str, u32, u32, Rgba<u8>); 8] = [
        ("head", 64, 64, HEAD_COLOR),
        ("left eye", 48, 48, FEATURE_COLOR),
        ("right eye", 80, 48, FEATURE_COLOR),
        ("mouth", 64, 70, FEATURE_COLOR),
        ("antenna", 64, 16, ANTENNA_COLOR),
        ("above head", 64, 10, TRANSPARENT),
        ("top-left corner", 0, 0, TRANSPARENT),
        ("bottom-right corner", 127, 127, TRANSPARENT),
    ];

    let mut failures = 0;
    for (name, x, y, expected) in samples {
        let pixel = rgba_img.get_pixel(x, y);
        let mark = if *pixel == expected { "✓" } else { "✗" };
        println!(
            "  {} {} (x={}, y={}): RGBA {:?}",
            mark, name, x, y, pixel.0
        );
        if *pixel != expected {
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{} of {} sampled pixels did not match", failures, samples.len());
    }

    println!("✓ Icon looks right");
    Ok(())
}
