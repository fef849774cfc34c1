//! Surface texture loading with a procedural fallback
//!
//! Loading is split in two steps. [`TextureImage::load_or_fallback`] decodes the asset on
//! the CPU and substitutes a checkerboard when decoding fails, so it always yields pixels.
//! [`load_texture`] then uploads those pixels; an upload the device rejects is reported
//! as [`TextureError::Upload`] and the caller renders without a texture.

use image::{imageops::FilterType, Rgba, RgbaImage};
use log::{info, warn};

use super::texture_resource::TextureResource;
use crate::{config::TextureConfig, error::TextureError};

/// Edge length of the fallback checkerboard in pixels
pub const FALLBACK_SIZE: u32 = 64;
/// Edge length of one checkerboard block in pixels
pub const FALLBACK_BLOCK: u32 = 8;

/// Where the pixels of a [`TextureImage`] came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureSource {
    Asset(String),
    Fallback,
}

/// Decoded RGBA8 pixels plus an optional mip chain, ready for upload
#[derive(Debug, Clone)]
pub struct TextureImage {
    levels: Vec<RgbaImage>,
    source: TextureSource,
}

impl TextureImage {
    /// Decodes the image at `path` into RGBA8
    pub fn decode(path: &str) -> Result<RgbaImage, TextureError> {
        image::open(path)
            .map(|img| img.to_rgba8())
            .map_err(|source| TextureError::Decode {
                path: path.to_string(),
                source,
            })
    }

    /// Square checkerboard of `size` pixels in `block`-sized tiles
    ///
    /// The tile at the top-left corner uses the first color.
    pub fn checkerboard(size: u32, block: u32, colors: [[u8; 4]; 2]) -> RgbaImage {
        let block = block.max(1);
        RgbaImage::from_fn(size, size, |x, y| {
            let parity = ((x / block) + (y / block)) % 2;
            Rgba(colors[parity as usize])
        })
    }

    /// Decodes the configured asset, falling back to the checkerboard on any decode error
    pub fn load_or_fallback(config: &TextureConfig) -> Self {
        let (base, source) = match Self::decode(&config.path) {
            Ok(image) => {
                info!(
                    "Loaded texture '{}' ({}x{})",
                    config.path,
                    image.width(),
                    image.height()
                );
                (image, TextureSource::Asset(config.path.clone()))
            }
            Err(err) => {
                warn!("{}; using checkerboard fallback", err);
                (
                    Self::checkerboard(FALLBACK_SIZE, FALLBACK_BLOCK, config.fallback_colors),
                    TextureSource::Fallback,
                )
            }
        };

        Self::from_base(base, source, config.mipmaps)
    }

    /// Wraps a base level, generating the mip chain when `mipmaps` is set
    pub fn from_base(base: RgbaImage, source: TextureSource, mipmaps: bool) -> Self {
        let levels = if mipmaps {
            mip_chain(base)
        } else {
            vec![base]
        };
        Self { levels, source }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.levels[0].dimensions()
    }

    pub fn levels(&self) -> &[RgbaImage] {
        &self.levels
    }

    pub fn mip_level_count(&self) -> u32 {
        self.levels.len() as u32
    }

    pub fn source(&self) -> &TextureSource {
        &self.source
    }

    pub fn base(&self) -> &RgbaImage {
        &self.levels[0]
    }
}

/// Halves each level until both sides reach one pixel
fn mip_chain(base: RgbaImage) -> Vec<RgbaImage> {
    let mut levels = vec![base];
    loop {
        let last = &levels[levels.len() - 1];
        let (width, height) = last.dimensions();
        if width <= 1 && height <= 1 {
            break;
        }
        let next = image::imageops::resize(
            last,
            (width / 2).max(1),
            (height / 2).max(1),
            FilterType::Triangle,
        );
        levels.push(next);
    }
    levels
}

/// Uploads `image` to the GPU, returning an error if the device rejects any of it
///
/// The upload runs inside validation and out-of-memory error scopes so failures surface
/// here instead of through the device's uncaptured error handler.
pub fn load_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    image: &TextureImage,
) -> Result<TextureResource, TextureError> {
    device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let resource = TextureResource::create_from_image(device, queue, image, "Surface Texture");

    let validation = pollster::block_on(device.pop_error_scope());
    let out_of_memory = pollster::block_on(device.pop_error_scope());

    match validation.or(out_of_memory) {
        Some(err) => Err(TextureError::Upload(err.to_string())),
        None => Ok(resource),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const COLORS: [[u8; 4]; 2] = [[255, 255, 255, 255], [64, 64, 64, 255]];

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("cubeview-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_checkerboard_pattern() {
        let board = TextureImage::checkerboard(FALLBACK_SIZE, FALLBACK_BLOCK, COLORS);
        assert_eq!(board.dimensions(), (64, 64));

        let distinct: HashSet<[u8; 4]> = board.pixels().map(|p| p.0).collect();
        assert_eq!(distinct.len(), 2);

        for y in 0..64 {
            for x in 0..64 {
                let expected = COLORS[(((x / 8) + (y / 8)) % 2) as usize];
                assert_eq!(board.get_pixel(x, y).0, expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_checkerboard_blocks_are_uniform() {
        let board = TextureImage::checkerboard(64, 8, COLORS);
        for block_y in 0..8 {
            for block_x in 0..8 {
                let first = board.get_pixel(block_x * 8, block_y * 8);
                for dy in 0..8 {
                    for dx in 0..8 {
                        assert_eq!(board.get_pixel(block_x * 8 + dx, block_y * 8 + dy), first);
                    }
                }
            }
        }
        assert_eq!(board.get_pixel(0, 0).0, COLORS[0]);
        assert_eq!(board.get_pixel(8, 0).0, COLORS[1]);
        assert_eq!(board.get_pixel(8, 8).0, COLORS[0]);
    }

    #[test]
    fn test_missing_asset_falls_back() {
        let config = TextureConfig {
            path: temp_path("does-not-exist.png").to_string_lossy().into_owned(),
            mipmaps: false,
            fallback_colors: COLORS,
        };
        let image = TextureImage::load_or_fallback(&config);

        assert_eq!(image.source(), &TextureSource::Fallback);
        assert_eq!(image.dimensions(), (64, 64));
        assert_eq!(image.mip_level_count(), 1);
        assert_eq!(
            image.base(),
            &TextureImage::checkerboard(FALLBACK_SIZE, FALLBACK_BLOCK, COLORS)
        );
    }

    #[test]
    fn test_corrupt_asset_falls_back() {
        let path = temp_path("corrupt.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let config = TextureConfig {
            path: path.to_string_lossy().into_owned(),
            ..TextureConfig::default()
        };
        let image = TextureImage::load_or_fallback(&config);
        std::fs::remove_file(&path).ok();

        assert_eq!(image.source(), &TextureSource::Fallback);
        assert!(matches!(
            TextureImage::decode(&config.path),
            Err(TextureError::Decode { .. })
        ));
    }

    #[test]
    fn test_valid_asset_is_decoded() {
        let path = temp_path("valid.png");
        let original = RgbaImage::from_fn(16, 8, |x, y| Rgba([x as u8 * 10, y as u8 * 20, 7, 255]));
        original.save(&path).unwrap();

        let config = TextureConfig {
            path: path.to_string_lossy().into_owned(),
            mipmaps: false,
            ..TextureConfig::default()
        };
        let image = TextureImage::load_or_fallback(&config);
        std::fs::remove_file(&path).ok();

        assert_eq!(image.source(), &TextureSource::Asset(config.path.clone()));
        assert_eq!(image.base(), &original);
    }

    #[test]
    fn test_mip_chain_halves_to_one_pixel() {
        let base = TextureImage::checkerboard(64, 8, COLORS);
        let image = TextureImage::from_base(base, TextureSource::Fallback, true);

        let sizes: Vec<(u32, u32)> = image.levels().iter().map(|l| l.dimensions()).collect();
        assert_eq!(
            sizes,
            vec![(64, 64), (32, 32), (16, 16), (8, 8), (4, 4), (2, 2), (1, 1)]
        );
    }

    #[test]
    fn test_mip_chain_non_square() {
        let base = RgbaImage::new(8, 2);
        let image = TextureImage::from_base(base, TextureSource::Fallback, true);
        let sizes: Vec<(u32, u32)> = image.levels().iter().map(|l| l.dimensions()).collect();
        assert_eq!(sizes, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
    }
}
