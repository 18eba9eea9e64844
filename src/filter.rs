//! Color removal by alpha masking.
//!
//! A pixel is removed (its alpha set to 0) when its RGB value lies within
//! `tolerance` Euclidean distance of one of the target colors. Alpha is never
//! part of the comparison, so running the filter twice changes nothing.

use image::RgbaImage;

use crate::color::Color;

/// Make every pixel close to one of `colors` fully transparent.
///
/// Target colors are checked in order and the first one within `tolerance`
/// wins. RGB channels are left untouched. An empty color list is a no-op.
///
/// Returns the number of pixels whose alpha was cleared by this call.
pub fn remove_colors(image: &mut RgbaImage, colors: &[Color], tolerance: u8) -> u64 {
    if colors.is_empty() {
        return 0;
    }

    // Compare squared distances to stay in exact integer arithmetic.
    let max_dist_sq = u32::from(tolerance).pow(2);
    let mut cleared = 0u64;

    for px in image.pixels_mut() {
        let rgb = Color::new(px[0], px[1], px[2]);
        if colors
            .iter()
            .any(|&target| rgb.distance_squared(target) <= max_dist_sq)
        {
            if px[3] != 0 {
                cleared += 1;
            }
            px[3] = 0;
        }
    }

    cleared
}
