//! # 隐写核心模块
//!
//! 将消息与结束标记逐位写入每个通道的最低有效位，以及反向提取。
//! 遍历顺序固定为：按行优先遍历像素，每个像素依次处理 R、G、B。

use crate::bits::{bits_to_bytes, bytes_to_bits};
use crate::capacity::{CapacityInfo, capacity};
use crate::constants::{CHANNELS_PER_PIXEL, DEFAULT_DELIMITER};
use crate::error::{CapacityError, ConfigError, ExtractionError};
use crate::grid::PixelGrid;
use log::{debug, trace};

/// 持有结束标记配置的 LSB 隐写器。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Steganographer {
    delimiter: Vec<u8>,
}

impl Default for Steganographer {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_vec(),
        }
    }
}

impl Steganographer {
    /// 使用自定义结束标记创建隐写器。
    ///
    /// # Errors
    ///
    /// 结束标记为空时返回 `ConfigError::EmptyDelimiter`。
    pub fn new(delimiter: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(ConfigError::EmptyDelimiter);
        }
        Ok(Self { delimiter })
    }

    pub fn delimiter(&self) -> &[u8] {
        &self.delimiter
    }

    pub fn capacity(&self, width: u32, height: u32) -> CapacityInfo {
        capacity(width, height, self.delimiter.len())
    }

    /// 将 `message` 嵌入 `grid`，返回一个新的像素网格。
    ///
    /// 只有前 `8 * (message.len() + delimiter.len())` 个通道的最低位会被改写，
    /// 其余通道原样复制。
    ///
    /// # Errors
    ///
    /// 所需位数超过 `width * height * 3` 时返回 `CapacityError`，不会产生任何输出。
    pub fn embed(&self, grid: &PixelGrid, message: &[u8]) -> Result<PixelGrid, CapacityError> {
        let mut payload = Vec::with_capacity(message.len() + self.delimiter.len());
        payload.extend_from_slice(message);
        payload.extend_from_slice(&self.delimiter);
        let bits = bytes_to_bits(&payload);

        let needed = bits.len() as u64;
        let available = grid.len() as u64 * CHANNELS_PER_PIXEL as u64;
        if needed > available {
            return Err(CapacityError { needed, available });
        }
        debug!("Embedding {} bits into {} available channel bits", needed, available);

        let mut output = grid.clone();
        output
            .pixels_mut()
            .iter_mut()
            .flat_map(|pixel| pixel.iter_mut())
            .zip(&bits)
            .for_each(|(channel, &bit)| *channel = (*channel & 0xFE) | bit);

        Ok(output)
    }

    /// 从 `grid` 中提取结束标记之前的消息字节。
    ///
    /// 总是读取整张网格的最低位；末尾不足一个字节的位被丢弃。
    /// 若消息本身包含结束标记，结果会在其第一次出现处被截断。
    ///
    /// # Errors
    ///
    /// 找不到结束标记时返回 `ExtractionError::NoDelimiterFound`。
    pub fn extract(&self, grid: &PixelGrid) -> Result<Vec<u8>, ExtractionError> {
        let bits: Vec<u8> = grid.channels().map(|value| value & 1).collect();
        let bytes = bits_to_bytes(&bits);
        trace!("Recovered {} bytes from {} LSBs", bytes.len(), bits.len());

        let end = find(&bytes, &self.delimiter).ok_or(ExtractionError::NoDelimiterFound)?;
        debug!("Delimiter found at byte offset {}", end);
        Ok(bytes[..end].to_vec())
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
