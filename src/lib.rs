//! Batch image processing: square resizing and color removal.
//!
//! Each image is normalized to RGBA, optionally resized to a `size`x`size`
//! square (stretched, or letterboxed onto a transparent canvas), then every
//! pixel within a Euclidean RGB `tolerance` of a target color is made fully
//! transparent. Results are always written as PNG.
//!
//! # Quick Start
//!
//! ```no_run
//! use imgtool::{parse_color_list, process_batch, expand_input, ProcessOptions};
//!
//! let files = expand_input("icons/*.png").expect("no input files");
//! let opts = ProcessOptions {
//!     size: Some(64),
//!     colors: parse_color_list(&["#FFFFFF"]).unwrap(),
//!     tolerance: 10,
//!     keep_aspect: true,
//!     ..ProcessOptions::default()
//! };
//! let result = process_batch(&files, "out".as_ref(), &opts);
//! println!("Success: {}/{}", result.succeeded, result.total);
//! ```
//!
//! # In-memory use
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use imgtool::{remove_colors, resize_image, Color};
//!
//! let img = RgbaImage::from_pixel(100, 50, Rgba([255, 255, 255, 255]));
//! let mut img = resize_image(img, Some(50), true).unwrap();
//! remove_colors(&mut img, &[Color::new(255, 255, 255)], 5);
//! assert_eq!(img.dimensions(), (50, 50));
//! assert!(img.pixels().all(|p| p[3] == 0));
//! ```

#![deny(missing_docs)]

pub mod color;
pub mod command;
mod engine;
pub mod error;
pub mod filter;
pub mod input;
pub mod resize;
pub mod shell;

pub use color::{parse_color_list, parse_hex_color, Color};
pub use engine::{
    output_path, process_batch, process_batch_with, process_file, process_image, save_png,
    BatchResult, FileOutcome, ProcessOptions,
};
pub use error::{Error, Result};
pub use filter::remove_colors;
pub use input::{expand_input, is_supported_image};
pub use resize::resize_image;
