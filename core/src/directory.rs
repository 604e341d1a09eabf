//! Input and output directory handling for batch runs
//!
//! The input directory is scanned with a fixed, case-insensitive extension
//! allow-list. The output directory is self-healing: it is created if
//! absent. A missing or unreadable input directory is a hard error the
//! caller surfaces to the user.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Raster formats accepted as batch input, matched case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Errors during directory scanning and preparation
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read input directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no supported images found in {path}")]
    NoImages { path: PathBuf },

    #[error("failed to create output directory {path}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Whether the file extension is on the allow-list.
pub fn is_supported_image(path: &Path) -> bool {
    extension_lowercase(path)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Whether the destination extension implies an opaque format, requiring
/// the alpha channel to be dropped before encoding.
pub fn wants_opaque(path: &Path) -> bool {
    extension_lowercase(path)
        .map(|ext| ext == "jpg" || ext == "jpeg")
        .unwrap_or(false)
}

fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// List the supported images in `dir`, sorted by file name for
/// deterministic batch order. Errors if the directory is unreadable or
/// contains no supported images.
pub fn scan_images(dir: &Path) -> Result<Vec<PathBuf>, DirectoryError> {
    let entries = fs::read_dir(dir).map_err(|source| DirectoryError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut images: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported_image(path))
        .collect();
    images.sort();

    if images.is_empty() {
        return Err(DirectoryError::NoImages {
            path: dir.to_path_buf(),
        });
    }
    Ok(images)
}

/// Create the output directory if it does not exist yet.
pub fn ensure_output_dir(dir: &Path) -> Result<(), DirectoryError> {
    fs::create_dir_all(dir).map_err(|source| DirectoryError::CreateOutputDir {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_allow_list_is_case_insensitive() {
        assert!(is_supported_image(Path::new("a.png")));
        assert!(is_supported_image(Path::new("b.JPG")));
        assert!(is_supported_image(Path::new("c.Jpeg")));
        assert!(!is_supported_image(Path::new("d.gif")));
        assert!(!is_supported_image(Path::new("e.webp")));
        assert!(!is_supported_image(Path::new("noext")));
    }

    #[test]
    fn opaque_formats() {
        assert!(wants_opaque(Path::new("x.jpg")));
        assert!(wants_opaque(Path::new("x.JPEG")));
        assert!(!wants_opaque(Path::new("x.png")));
    }

    #[test]
    fn scan_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.jpg", "notes.txt", "c.JPEG"] {
            std::fs::write(dir.path().join(name), b"stub").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.png")).unwrap();

        let images = scan_images(dir.path()).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png", "c.JPEG"]);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            scan_images(dir.path()),
            Err(DirectoryError::NoImages { .. })
        ));
    }

    #[test]
    fn missing_input_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            scan_images(&missing),
            Err(DirectoryError::ReadDir { .. })
        ));
    }

    #[test]
    fn output_directory_is_created_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        ensure_output_dir(&out).unwrap();
        assert!(out.is_dir());
        // Idempotent
        ensure_output_dir(&out).unwrap();
    }
}
