//! # 错误类型模块
//!
//! 隐写核心返回的所有错误。核心从不打印错误，也不返回部分结果。

use thiserror::Error;

/// 消息加结束标记所需的位数超过了图像可用的通道位数。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Message too long: needs {needed} bits, image holds {available} bits")]
pub struct CapacityError {
    pub needed: u64,
    pub available: u64,
}

/// 从像素网格中提取消息失败。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("No hidden message found or message corrupted")]
    NoDelimiterFound,
}

/// 两个像素网格的尺寸不一致，无法逐像素比较。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Images have different dimensions: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
pub struct DimensionMismatch {
    pub left: (u32, u32),
    pub right: (u32, u32),
}

/// 像素数据与声明的宽高不符。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("Pixel data does not match dimensions: expected {expected} values, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// 隐写器配置无效。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Delimiter must not be empty")]
    EmptyDelimiter,
}
