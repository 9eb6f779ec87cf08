use anyhow::Result;

use crate::error::Error;

pub mod file;

pub trait TextureLoader {
    fn load_image(&self) -> Result<image::RgbaImage>;
}

/// A decoded base color image together with its full mip chain.
pub struct TextureAsset {
    levels: Vec<image::RgbaImage>,
}

impl TextureAsset {
    pub fn load(texture_loader: &impl TextureLoader) -> Result<Self> {
        TextureAsset::from_image(texture_loader.load_image()?)
    }

    /// Each level halves the previous one, rounding down, until both sides reach 1.
    ///
    /// Levels are filtered on linear color and encoded back to sRGB, so smaller
    /// levels keep the brightness of the base image.
    pub fn from_image(base_level: image::RgbaImage) -> Result<Self> {
        let (width, height) = base_level.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::asset(String::from("The given texture image is empty.")).into());
        }

        let level_count = mip_level_count(width, height);
        let mut levels = Vec::with_capacity(level_count as usize);
        let mut linear_level = to_linear(&base_level);
        levels.push(base_level);

        for level in 1..level_count {
            linear_level = image::imageops::resize(
                &linear_level,
                (width >> level).max(1),
                (height >> level).max(1),
                image::imageops::FilterType::Triangle,
            );
            levels.push(to_srgb(&linear_level));
        }

        log::debug!("Generated {level_count} mip levels for a {width}x{height} texture");

        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[image::RgbaImage] {
        &self.levels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.levels[0].dimensions()
    }
}

pub fn mip_level_count(width: u32, height: u32) -> u32 {
    u32::BITS - width.max(height).max(1).leading_zeros()
}

fn to_linear(image: &image::RgbaImage) -> image::Rgba32FImage {
    image::Rgba32FImage::from_fn(image.width(), image.height(), |x, y| {
        let image::Rgba([r, g, b, a]) = *image.get_pixel(x, y);
        image::Rgba([
            srgb_to_linear(r as f32 / 255.0),
            srgb_to_linear(g as f32 / 255.0),
            srgb_to_linear(b as f32 / 255.0),
            a as f32 / 255.0,
        ])
    })
}

fn to_srgb(image: &image::Rgba32FImage) -> image::RgbaImage {
    let quantize = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;

    image::RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let image::Rgba([r, g, b, a]) = *image.get_pixel(x, y);
        image::Rgba([
            quantize(linear_to_srgb(r)),
            quantize(linear_to_srgb(g)),
            quantize(linear_to_srgb(b)),
            quantize(a),
        ])
    })
}

fn srgb_to_linear(value: f32) -> f32 {
    match value <= 0.04045 {
        true => value / 12.92,
        false => ((value + 0.055) / 1.055).powf(2.4),
    }
}

fn linear_to_srgb(value: f32) -> f32 {
    match value <= 0.0031308 {
        true => value * 12.92,
        false => 1.055 * value.powf(1.0 / 2.4) - 0.055,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mip_level_count_reaches_one_by_one() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 2), 2);
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(300, 20), 9);
        assert_eq!(mip_level_count(1, 1024), 11);
    }

    #[test]
    fn mip_chain_halves_each_side_until_one() {
        let base = image::RgbaImage::from_pixel(8, 2, image::Rgba([255, 0, 0, 255]));
        let texture = TextureAsset::from_image(base).unwrap();

        let dimensions: Vec<(u32, u32)> = texture
            .levels()
            .iter()
            .map(image::RgbaImage::dimensions)
            .collect();
        assert_eq!(dimensions, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
        assert_eq!(texture.dimensions(), (8, 2));
    }

    #[test]
    fn uniform_color_survives_downsampling() {
        let base = image::RgbaImage::from_pixel(16, 16, image::Rgba([10, 200, 30, 255]));
        let texture = TextureAsset::from_image(base).unwrap();

        let smallest = texture.levels().last().unwrap();
        assert_eq!(smallest.dimensions(), (1, 1));
        assert_eq!(smallest.get_pixel(0, 0), &image::Rgba([10, 200, 30, 255]));
    }

    #[test]
    fn downsampling_averages_in_linear_light() {
        let mut base = image::RgbaImage::from_pixel(2, 1, image::Rgba([0, 0, 0, 255]));
        base.put_pixel(1, 0, image::Rgba([255, 255, 255, 255]));
        let texture = TextureAsset::from_image(base).unwrap();

        let image::Rgba([r, g, b, a]) = *texture.levels()[1].get_pixel(0, 0);
        assert!((186..=189).contains(&r), "{r}");
        assert_eq!((r, g, b, a), (r, r, r, 255));
    }

    #[test]
    fn transfer_functions_invert_each_other() {
        for value in [0, 1, 10, 64, 128, 200, 255] {
            let encoded = value as f32 / 255.0;
            let decoded = linear_to_srgb(srgb_to_linear(encoded));
            assert_eq!((decoded * 255.0).round() as u8, value);
        }
    }

    #[test]
    fn empty_image_is_rejected() {
        assert!(TextureAsset::from_image(image::RgbaImage::new(0, 4)).is_err());
    }
}
