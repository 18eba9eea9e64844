//! Expansion of input patterns into file lists.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Returns true when `pattern` contains glob metacharacters.
#[must_use]
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Expand an input pattern into a sorted list of files.
///
/// - Glob patterns (`*`, `?`, `[...]`, recursive `**`) keep matching regular files.
/// - A literal file path yields itself.
/// - A literal directory yields the supported images it directly contains.
///
/// # Errors
///
/// Returns [`Error::Pattern`] for a malformed glob and [`Error::NoInputFiles`]
/// when nothing matches.
pub fn expand_input(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = if is_glob_pattern(pattern) {
        glob::glob(pattern)?
            .filter_map(std::result::Result::ok)
            .filter(|p| p.is_file())
            .collect()
    } else {
        let path = Path::new(pattern);
        if path.is_dir() {
            std::fs::read_dir(path)?
                .filter_map(std::result::Result::ok)
                .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
                .map(|e| e.path())
                .filter(|p| is_supported_image(p))
                .collect()
        } else if path.is_file() {
            vec![path.to_path_buf()]
        } else {
            Vec::new()
        }
    };

    if files.is_empty() {
        return Err(Error::NoInputFiles(pattern.to_string()));
    }

    files.sort();
    Ok(files)
}

/// Check if a file has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(
            ext.to_lowercase().as_str(),
            "jpg" | "jpeg" | "png" | "webp" | "bmp" | "gif" | "tif" | "tiff"
        ),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"").unwrap();
        path
    }

    #[test]
    fn detects_glob_metacharacters() {
        assert!(is_glob_pattern("*.png"));
        assert!(is_glob_pattern("icons/**/a?.png"));
        assert!(is_glob_pattern("img[0-9].png"));
        assert!(!is_glob_pattern("icons/logo.png"));
    }

    #[test]
    fn is_supported_image_accepts_common_formats() {
        assert!(is_supported_image(Path::new("photo.jpg")));
        assert!(is_supported_image(Path::new("photo.JPEG")));
        assert!(is_supported_image(Path::new("photo.png")));
        assert!(is_supported_image(Path::new("photo.webp")));
        assert!(is_supported_image(Path::new("photo.bmp")));
        assert!(is_supported_image(Path::new("photo.gif")));
    }

    #[test]
    fn is_supported_image_rejects_unsupported_formats() {
        assert!(!is_supported_image(Path::new("photo.txt")));
        assert!(!is_supported_image(Path::new("photo")));
    }

    #[test]
    fn glob_matches_files_only_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let b = touch(dir.path(), "b.png");
        let a = touch(dir.path(), "a.png");
        touch(dir.path(), "c.jpg");
        std::fs::create_dir(dir.path().join("d.png")).unwrap();

        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let deep = touch(&dir.path().join("sub"), "deep.png");

        let pattern = format!("{}/*.png", dir.path().display());
        assert_eq!(expand_input(&pattern).unwrap(), vec![a.clone(), b.clone()]);

        let pattern = format!("{}/**/*.png", dir.path().display());
        assert_eq!(expand_input(&pattern).unwrap(), vec![a, b, deep]);
    }

    #[test]
    fn literal_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let png = touch(dir.path(), "x.png");
        touch(dir.path(), "notes.txt");

        let single = expand_input(png.to_str().unwrap()).unwrap();
        assert_eq!(single, vec![png.clone()]);

        let listed = expand_input(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(listed, vec![png]);
    }

    #[test]
    fn no_match_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.png", dir.path().display());
        assert!(matches!(expand_input(&pattern), Err(Error::NoInputFiles(p)) if p == pattern));

        let missing = dir.path().join("missing.png");
        assert!(matches!(
            expand_input(missing.to_str().unwrap()),
            Err(Error::NoInputFiles(_))
        ));
    }

    #[test]
    fn malformed_glob_is_an_error() {
        assert!(matches!(expand_input("[*.png"), Err(Error::Pattern(_))));
    }
}
