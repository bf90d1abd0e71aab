use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage};
use ndarray::Array3;

use crate::error::Result;
use crate::frame::StatImage;

/// Decode an image file into an `(height, width, 3)` 8-bit RGB array.
///
/// Grayscale inputs are expanded to three equal channels and any alpha
/// channel is dropped.
pub fn decode_rgb(path: &Path) -> std::result::Result<Array3<u8>, image::ImageError> {
    let rgb = image::open(path)?.to_rgb8();
    Ok(rgb_to_array(&rgb))
}

pub fn rgb_to_array(rgb: &RgbImage) -> Array3<u8> {
    let (w, h) = rgb.dimensions();
    Array3::from_shape_fn((h as usize, w as usize, 3), |(row, col, c)| {
        rgb.get_pixel(col as u32, row as u32).0[c]
    })
}

pub fn array_to_rgb(data: &Array3<u8>) -> RgbImage {
    let (h, w, _) = data.dim();
    RgbImage::from_fn(w as u32, h as u32, |col, row| {
        let (row, col) = (row as usize, col as usize);
        Rgb([data[[row, col, 0]], data[[row, col, 1]], data[[row, col, 2]]])
    })
}

/// Output format for a path, from its extension (PNG by default).
pub fn format_for(path: &Path) -> ImageFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("tiff" | "tif") => ImageFormat::Tiff,
        Some("bmp") => ImageFormat::Bmp,
        _ => ImageFormat::Png,
    }
}

/// Save an RGB array, choosing format from file extension.
pub fn save_rgb(data: &Array3<u8>, path: &Path) -> Result<()> {
    save_rgb_as(data, path, format_for(path))
}

pub fn save_rgb_as(data: &Array3<u8>, path: &Path, format: ImageFormat) -> Result<()> {
    array_to_rgb(data).save_with_format(path, format)?;
    Ok(())
}

pub fn save_stat_image(image: &StatImage, path: &Path) -> Result<()> {
    save_rgb(&image.data, path)
}

/// Hidden sibling of `path` that an output is staged in before it is moved
/// into place.
pub fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.partial"))
}

/// Save a group of images, touching no target path unless every image
/// encoded successfully.
///
/// Each image is encoded to its [`partial_path`] first; the partial files are
/// renamed onto the targets only once every encode has succeeded. On failure
/// the remaining partial files are removed. `on_staged` is called with the number of
/// images staged so far.
pub fn save_stat_images(
    outputs: &[(StatImage, PathBuf)],
    mut on_staged: impl FnMut(usize),
) -> Result<()> {
    let mut staged: Vec<PathBuf> = Vec::with_capacity(outputs.len());
    for (image, path) in outputs {
        let partial = partial_path(path);
        if let Err(e) = save_rgb_as(&image.data, &partial, format_for(path)) {
            discard(&staged);
            discard(std::slice::from_ref(&partial));
            return Err(e);
        }
        staged.push(partial);
        on_staged(staged.len());
    }

    for (i, (partial, (_, path))) in staged.iter().zip(outputs).enumerate() {
        if let Err(e) = fs::rename(partial, path) {
            discard(&staged[i..]);
            return Err(e.into());
        }
    }
    Ok(())
}

fn discard(paths: &[PathBuf]) {
    for path in paths {
        // Missing files are fine here; the partial may never have been created.
        let _ = fs::remove_file(path);
    }
}
