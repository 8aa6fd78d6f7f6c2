//====================================================================

use std::{error::Error, fmt::Display, path::Path};

//====================================================================

#[derive(Debug)]
pub enum AssetError {
    Io(std::io::Error),
    Decode(image::ImageError),
}

impl Error for AssetError {}

impl Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::Io(err) => write!(f, "Unable to read asset file: {}", err),
            AssetError::Decode(err) => write!(f, "Unable to decode asset image: {}", err),
        }
    }
}

//====================================================================

/// Read and decode an image asset from disk. Paths are resolved relative to
/// the working directory.
pub fn load_image(path: impl AsRef<Path>) -> Result<image::DynamicImage, AssetError> {
    let bytes = std::fs::read(path).map_err(AssetError::Io)?;
    image::load_from_memory(&bytes).map_err(AssetError::Decode)
}

/// Diagnostic for missing or unreadable asset files, in place of failing
/// later with a blank texture and no explanation.
pub fn problem_loading(filename: &str, err: &AssetError) {
    log::error!("Error while loading: {} - {}", filename, err);
    log::error!(
        "Depending on where the app is run from, asset paths may need an 'assets/' prefix or a \
         different working directory"
    );
}

//====================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_image("no/such/asset.png").unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
        assert!(err.to_string().contains("Unable to read asset file"));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let dir = std::env::temp_dir().join("grid_panel_asset_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("not_an_image.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, AssetError::Decode(_)));
    }
}
