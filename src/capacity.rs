//! # 容量计算模块
//!
//! 只依据图像尺寸计算可嵌入的位数与字符数，不读取像素数据。

use crate::constants::{BITS_PER_BYTE, CHANNELS_PER_PIXEL};

/// 图像的隐写容量信息。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityInfo {
    pub width: u32,
    pub height: u32,
    pub total_pixels: u64,
    /// `total_pixels * 3`，所有通道的最低有效位。
    pub total_bits: u64,
    /// 结束标记占用的位数 (`delimiter_overhead`)。
    pub delimiter_bits: u64,
    /// 扣除结束标记后可用于消息本身的位数，不足时为 0。
    pub available_bits: u64,
    /// 按每字符 1 字节计算的最大消息长度。
    pub max_characters: u64,
}

impl CapacityInfo {
    /// 长度为 `message_len` 字节的消息能否嵌入。
    pub fn fits(&self, message_len: usize) -> bool {
        self.required_bits(message_len) <= self.total_bits
    }

    /// 嵌入 `message_len` 字节的消息 (含结束标记) 所需的位数。
    pub fn required_bits(&self, message_len: usize) -> u64 {
        message_len as u64 * BITS_PER_BYTE as u64 + self.delimiter_bits
    }
}

/// 计算 `width x height` 图像在给定结束标记长度下的容量。
pub fn capacity(width: u32, height: u32, delimiter_len: usize) -> CapacityInfo {
    let total_pixels = width as u64 * height as u64;
    let total_bits = total_pixels * CHANNELS_PER_PIXEL as u64;
    let delimiter_bits = delimiter_len as u64 * BITS_PER_BYTE as u64;
    let available_bits = total_bits.saturating_sub(delimiter_bits);

    CapacityInfo {
        width,
        height,
        total_pixels,
        total_bits,
        delimiter_bits,
        available_bits,
        max_characters: available_bits / BITS_PER_BYTE as u64,
    }
}
