use std::path::PathBuf;

use anyhow::Result;

use crate::error::Error;
use crate::resource::texture::TextureLoader;

pub struct FileSystemTextureLoader {
    pub path: PathBuf,
}

impl TextureLoader for FileSystemTextureLoader {
    fn load_image(&self) -> Result<image::RgbaImage> {
        log::debug!("Decoding texture image: {}", self.path.display());

        match image::open(&self.path) {
            Ok(loaded_image) => Ok(loaded_image.to_rgba8()),
            Err(error) => Err(Error::asset(format!(
                "Unable to decode the texture {}: {error}",
                self.path.display()
            ))
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::texture::TextureAsset;

    #[test]
    fn decodes_a_png_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "teapot_viewer_texture_{}.png",
            std::process::id()
        ));
        image::RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let texture_loader = FileSystemTextureLoader { path: path.clone() };
        let texture = TextureAsset::load(&texture_loader).unwrap();

        assert_eq!(texture.dimensions(), (4, 4));
        assert_eq!(texture.levels().len(), 3);
        assert_eq!(texture.levels()[0].get_pixel(3, 3), &image::Rgba([1, 2, 3, 255]));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_is_an_asset_error() {
        let texture_loader = FileSystemTextureLoader {
            path: PathBuf::from("does/not/exist.png"),
        };

        let error = texture_loader.load_image().unwrap_err();
        assert_eq!(
            error.downcast_ref::<Error>().map(Error::kind),
            Some(crate::error::ErrorKind::Asset)
        );
    }
}
