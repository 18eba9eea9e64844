//! Square resizing, with optional letterboxing onto a transparent canvas.

use image::error::{ImageError, LimitError, LimitErrorKind};
use image::imageops::{self, FilterType};
use image::{Limits, RgbaImage};

use crate::error::Result;

/// Resampling filter used for every resize.
const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// Resize `image` to a `size`x`size` square.
///
/// - `None` (or `Some(0)`) returns the image unchanged.
/// - Without `keep_aspect` both axes are scaled independently, which may distort.
/// - With `keep_aspect` the image is scaled until its larger side equals `size`,
///   then centered on a fully transparent square canvas. The centering offset
///   uses floor division, so odd remainders leave the extra pixel on the
///   right/bottom edge. Inputs smaller than `size` are enlarged.
///
/// # Errors
///
/// Returns [`ImageError::Limits`] when a `size`x`size` RGBA buffer would
/// exceed the default allocation limit of the `image` crate.
pub fn resize_image(image: RgbaImage, size: Option<u32>, keep_aspect: bool) -> Result<RgbaImage> {
    let size = match size {
        Some(s) if s > 0 => s,
        _ => return Ok(image),
    };
    check_buffer_size(size)?;

    if !keep_aspect {
        if image.dimensions() == (size, size) {
            return Ok(image);
        }
        return Ok(imageops::resize(&image, size, size, RESAMPLE_FILTER));
    }

    let mut canvas = RgbaImage::new(size, size);
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return Ok(canvas);
    }

    let (fit_w, fit_h) = fit_within(w, h, size);
    let scaled = if (fit_w, fit_h) == (w, h) {
        image
    } else {
        imageops::resize(&image, fit_w, fit_h, RESAMPLE_FILTER)
    };

    let (offset_x, offset_y) = center_offset(size, fit_w, fit_h);
    imageops::replace(&mut canvas, &scaled, i64::from(offset_x), i64::from(offset_y));
    Ok(canvas)
}

/// Reject square RGBA buffers larger than `Limits::default().max_alloc`.
fn check_buffer_size(size: u32) -> Result<()> {
    let bytes = u64::from(size).pow(2).saturating_mul(4);
    match Limits::default().max_alloc {
        Some(max) if bytes > max => Err(ImageError::Limits(LimitError::from_kind(
            LimitErrorKind::InsufficientMemory,
        ))
        .into()),
        _ => Ok(()),
    }
}

/// Dimensions of `width`x`height` scaled so the larger side equals `size`.
///
/// The smaller side is rounded to the nearest pixel and never drops below 1.
#[must_use]
pub fn fit_within(width: u32, height: u32, size: u32) -> (u32, u32) {
    let scale_side = |side: u32, longest: u32| -> u32 {
        let (side, longest, size) = (u64::from(side), u64::from(longest), u64::from(size));
        let rounded = (side * size * 2 + longest) / (longest * 2);
        u32::try_from(rounded.max(1)).unwrap_or(u32::MAX)
    };

    if width >= height {
        (size, scale_side(height, width))
    } else {
        (scale_side(width, height), size)
    }
}

/// Top-left offset that centers a `w`x`h` image on a `size`x`size` canvas.
#[must_use]
pub fn center_offset(size: u32, w: u32, h: u32) -> (u32, u32) {
    (size.saturating_sub(w) / 2, size.saturating_sub(h) / 2)
}
