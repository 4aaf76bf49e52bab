use std::path::Path;

use anyhow::{anyhow, Context, Result};
use exr::prelude::*;
use image::GenericImageView;
use log::info;
use rayon::prelude::*;

use crate::core::common::{clamp, gamma_correct, Float};
use crate::core::distribution::Sample;
use crate::core::grid::RgbGrid;

/// Read a source image into a flat row-major RGB buffer plus its
/// native resolution. EXR input keeps its linear HDR values; 8-bit
/// formats are scaled to [0, 1].
pub fn read_image<P: AsRef<Path>>(name: P) -> Result<(Vec<[Float; 3]>, (usize, usize))> {
    let ext = name.as_ref()
        .extension()
        .with_context(|| format!("Failed to get filename extension \"{}\"", name.as_ref().display()))?;

    if ext == "exr" || ext == "EXR" {
        read_image_exr(name)
    } else if ext == "png" || ext == "PNG" {
        read_image_ldr(name, "PNG")
    } else if ext == "tga" || ext == "TGA" {
        read_image_ldr(name, "TGA")
    } else if ext == "jpg" || ext == "jpeg" || ext == "JPG" {
        read_image_ldr(name, "JPEG")
    } else {
        let err = anyhow!(
            "Unable to load image stored in format \"{:?}\" for filename \"{}\"",
            ext, name.as_ref().display());
        Err(err)
    }
}

struct ExrImage {
    pixels: Vec<[Float; 3]>,
    width : usize,
    height: usize
}

fn read_image_exr<P: AsRef<Path>>(name: P) -> Result<(Vec<[Float; 3]>, (usize, usize))> {
    let image = read_first_rgba_layer_from_file(
        name.as_ref(),
        |info| {
            let width = info.resolution.width();
            let height = info.resolution.height();
            let pixels = vec![[0.0; 3]; width * height];

            ExrImage { pixels, width, height }
        },
        |img, pos, pixel| {
            let r = pixel.red.to_f32();
            let g = pixel.green.to_f32();
            let b = pixel.blue.to_f32();

            img.pixels[pos.y() * img.width + pos.x()] = [r, g, b];
        }
    )?;

    let storage = image.layer_data.channel_data.storage;
    info!(
        "Read EXR image {} ({} x {})",
        name.as_ref().display(), storage.width, storage.height);

    Ok((storage.pixels, (storage.width, storage.height)))
}

fn read_image_ldr<P: AsRef<Path>>(name: P, ext: &str) -> Result<(Vec<[Float; 3]>, (usize, usize))> {
    let buf = image::open(name.as_ref())
        .with_context(|| format!("Error reading image \"{}\"", name.as_ref().display()))?;
    let (width, height) = buf.dimensions();
    let rgb = buf.to_rgb8().into_raw();

    let pixels = rgb
        .par_chunks(3)
        .map(|p| {
            let r = p[0] as Float / 255.0;
            let g = p[1] as Float / 255.0;
            let b = p[2] as Float / 255.0;

            [r, g, b]
        }).collect::<Vec<[Float; 3]>>();

    info!("Read {} image {} ({} x {})", ext, name.as_ref().display(), width, height);

    Ok((pixels, (width as usize, height as usize)))
}

/// Write the working grid as an 8-bit PNG with one red marker per
/// sample position, for eyeballing how draws track image energy.
pub fn write_samples_png<P: AsRef<Path>>(
    name: P, grid: &RgbGrid, samples: &[Sample]) -> Result<()> {
    let width = grid.width();
    let height = grid.height();
    let mut buf = Vec::with_capacity(width * height * 3);

    for row in 0..height {
        for col in 0..width {
            let rgb = grid.pixel(row, col);

            for &c in rgb.iter() {
                buf.push(clamp(255.0 * gamma_correct(c) + 0.5, 0.0, 255.0) as u8);
            }
        }
    }

    for s in samples {
        let col = clamp((s.x * width as Float) as usize, 0, width - 1);
        let row = clamp((s.y * height as Float) as usize, 0, height - 1);
        let i = (row * width + col) * 3;

        buf[i] = 255;
        buf[i + 1] = 0;
        buf[i + 2] = 0;
    }

    image::save_buffer(
        name.as_ref(),
        &buf,
        width as u32,
        height as u32,
        image::ColorType::Rgb8
    )
        .with_context(|| format!("Error writing image \"{}\"", name.as_ref().display()))
}
