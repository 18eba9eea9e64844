//! Per-file processing pipeline and the sequential batch driver.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::RgbaImage;
use tracing::{debug, warn};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::filter;
use crate::resize;

/// Options controlling how each image of a batch is processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Target square size; `None` keeps the original dimensions.
    pub size: Option<u32>,
    /// Colors to make transparent.
    pub colors: Vec<Color>,
    /// Maximum RGB distance for a pixel to match a removal color.
    pub tolerance: u8,
    /// Letterbox onto a transparent canvas instead of stretching.
    pub keep_aspect: bool,
    /// Appended to the input stem to form the output file name.
    pub suffix: String,
    /// Replace output files that already exist.
    pub overwrite: bool,
}

/// What happened to a single file of a batch.
#[derive(Debug)]
pub enum FileOutcome {
    /// The output was written to this path.
    Written(PathBuf),
    /// The output already existed and overwriting is disabled.
    Skipped(PathBuf),
    /// Loading, transforming or saving failed.
    Failed(String),
}

/// Aggregate result of a batch run.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Number of files attempted.
    pub total: usize,
    /// Number of files written.
    pub succeeded: usize,
    /// Number of files skipped because the output already existed.
    pub skipped: usize,
    /// Files that failed, with the reason.
    pub failures: Vec<(PathBuf, String)>,
}

impl BatchResult {
    /// True when at least one file failed. Skipped files are not failures.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Output location for `input`: `{output_dir}/{stem}{suffix}.png`.
#[must_use]
pub fn output_path(input: &Path, output_dir: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    output_dir.join(format!("{stem}{suffix}.png"))
}

/// Run the in-memory pipeline: resize, then remove colors.
///
/// # Errors
///
/// Returns an error when the target size exceeds the allocation limit.
pub fn process_image(image: RgbaImage, opts: &ProcessOptions) -> Result<RgbaImage> {
    let mut image = resize::resize_image(image, opts.size, opts.keep_aspect)?;
    let cleared = filter::remove_colors(&mut image, &opts.colors, opts.tolerance);
    debug!(
        width = image.width(),
        height = image.height(),
        cleared,
        "image processed"
    );
    Ok(image)
}

/// Process a single image file into `output_dir`.
///
/// Returns the path written.
///
/// # Errors
///
/// Returns [`Error::OutputExists`] when the target exists and
/// `opts.overwrite` is false; otherwise any load, encode or I/O error.
pub fn process_file(input: &Path, output_dir: &Path, opts: &ProcessOptions) -> Result<PathBuf> {
    let output = output_path(input, output_dir, &opts.suffix);
    if output.exists() && !opts.overwrite {
        return Err(Error::OutputExists(output));
    }

    debug!(input = %input.display(), "loading");
    let image = image::open(input)?.into_rgba8();
    let image = process_image(image, opts)?;
    save_png(&image, &output)?;

    Ok(output)
}

/// Process every file in order, never stopping on a per-file error.
#[must_use]
pub fn process_batch(files: &[PathBuf], output_dir: &Path, opts: &ProcessOptions) -> BatchResult {
    process_batch_with(files, output_dir, opts, |_, _| {})
}

/// Like [`process_batch`], calling `on_file` after each file.
///
/// The output directory is created (with parents) if it does not exist.
pub fn process_batch_with<F>(
    files: &[PathBuf],
    output_dir: &Path,
    opts: &ProcessOptions,
    mut on_file: F,
) -> BatchResult
where
    F: FnMut(&Path, &FileOutcome),
{
    let mut result = BatchResult {
        total: files.len(),
        ..BatchResult::default()
    };

    let setup_error = std::fs::create_dir_all(output_dir).err().map(|e| {
        warn!(dir = %output_dir.display(), error = %e, "cannot create output directory");
        format!("Failed to create output directory: {e}")
    });

    for input in files {
        let outcome = match &setup_error {
            Some(reason) => FileOutcome::Failed(reason.clone()),
            None => match process_file(input, output_dir, opts) {
                Ok(path) => FileOutcome::Written(path),
                Err(Error::OutputExists(path)) => FileOutcome::Skipped(path),
                Err(e) => FileOutcome::Failed(e.to_string()),
            },
        };

        match &outcome {
            FileOutcome::Written(_) => result.succeeded += 1,
            FileOutcome::Skipped(path) => {
                debug!(output = %path.display(), "output exists, skipping");
                result.skipped += 1;
            }
            FileOutcome::Failed(reason) => {
                warn!(input = %input.display(), %reason, "processing failed");
                result.failures.push((input.clone(), reason.clone()));
            }
        }

        on_file(input, &outcome);
    }

    result
}

/// Save an RGBA image as PNG with fixed compression settings.
///
/// # Errors
///
/// Returns an error if the file cannot be created or encoding fails.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    let encoder = PngEncoder::new_with_quality(file, CompressionType::Default, FilterType::Adaptive);
    img.write_with_encoder(encoder)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn output_path_uses_stem_suffix_and_png() {
        let p = output_path(Path::new("/in/photo.jpg"), Path::new("/out"), "_48");
        assert_eq!(p, PathBuf::from("/out/photo_48.png"));

        let p = output_path(Path::new("icon.png"), Path::new("out"), "");
        assert_eq!(p, PathBuf::from("out/icon.png"));

        let p = output_path(Path::new("archive.tar.gz"), Path::new("o"), "-x");
        assert_eq!(p, PathBuf::from("o/archive.tar-x.png"));
    }

    #[test]
    fn process_image_resizes_before_filtering() {
        let img = RgbaImage::from_pixel(10, 20, Rgba([0, 0, 0, 255]));
        let opts = ProcessOptions {
            size: Some(8),
            colors: vec![Color::new(0, 0, 0)],
            keep_aspect: true,
            ..ProcessOptions::default()
        };
        let out = process_image(img, &opts).unwrap();
        assert_eq!(out.dimensions(), (8, 8));
        assert!(out.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn default_options_leave_image_untouched() {
        let img = RgbaImage::from_pixel(3, 5, Rgba([1, 2, 3, 200]));
        let out = process_image(img.clone(), &ProcessOptions::default()).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn skipped_files_are_not_failures() {
        let skipped = BatchResult {
            total: 2,
            succeeded: 1,
            skipped: 1,
            ..BatchResult::default()
        };
        assert!(!skipped.has_failures());

        let failed = BatchResult {
            total: 2,
            succeeded: 1,
            failures: vec![(PathBuf::from("a.png"), "bad".to_string())],
            ..BatchResult::default()
        };
        assert!(failed.has_failures());
    }
}
