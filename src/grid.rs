//! # 像素网格模块
//!
//! `PixelGrid` 是隐写核心与图像编解码之间的边界：
//! 一个按行优先顺序排列、每像素 3 个 8 位通道 (R, G, B) 的二维数组。

use crate::constants::CHANNELS_PER_PIXEL;
use crate::error::GridError;
use image::{Rgb, RgbImage};

/// 已解码的 RGB 像素网格。
///
/// 不变式：`pixels.len() == width * height`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl PixelGrid {
    /// 由宽、高和按行优先排列的像素构造网格。
    ///
    /// # Errors
    ///
    /// 像素数量不等于 `width * height` 时返回 `GridError::SizeMismatch`。
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Result<Self, GridError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// 由交错排列的 RGB 字节 (`[r, g, b, r, g, b, ...]`) 构造网格。
    ///
    /// # Errors
    ///
    /// 字节数不等于 `width * height * 3` 时返回 `GridError::SizeMismatch`。
    pub fn from_raw(width: u32, height: u32, raw: Vec<u8>) -> Result<Self, GridError> {
        let expected = width as usize * height as usize * CHANNELS_PER_PIXEL;
        if raw.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                actual: raw.len(),
            });
        }
        let pixels = raw
            .chunks_exact(CHANNELS_PER_PIXEL)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [[u8; 3]] {
        &mut self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// 返回坐标 `(x, y)` 处的像素，越界时返回 `None`。
    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// 按行优先、每像素 R→G→B 的顺序遍历所有通道值。
    pub fn channels(&self) -> impl Iterator<Item = u8> + '_ {
        self.pixels.iter().flat_map(|p| p.iter().copied())
    }

    /// 转换为 `image` crate 的 `RgbImage`，交给外部编码器保存。
    pub fn into_rgb_image(self) -> RgbImage {
        let mut img = RgbImage::new(self.width, self.height);
        img.pixels_mut()
            .zip(self.pixels)
            .for_each(|(dst, src)| *dst = Rgb(src));
        img
    }
}

impl From<&RgbImage> for PixelGrid {
    fn from(img: &RgbImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            pixels: img.pixels().map(|p| p.0).collect(),
        }
    }
}
