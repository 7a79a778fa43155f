//! # 图像比较模块
//!
//! 逐通道比较两个尺寸相同的像素网格，用于确认嵌入只改动了最低有效位。

use crate::constants::CHANNELS_PER_PIXEL;
use crate::error::DimensionMismatch;
use crate::grid::PixelGrid;

/// 两个像素网格逐通道比较的结果。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonReport {
    /// 比较的通道值总数 (`像素数 * 3`)。
    pub total_channel_values: u64,
    /// 差值不为零的通道数。
    pub changed_count: u64,
    /// `changed_count / total_channel_values`，空网格时为 0。
    pub change_fraction: f64,
    pub max_abs_difference: u8,
}

impl ComparisonReport {
    pub fn change_percentage(&self) -> f64 {
        self.change_fraction * 100.0
    }
}

/// 比较 `a` 与 `b` 的每个通道。
///
/// # Errors
///
/// 宽或高不一致时返回 `DimensionMismatch`。
pub fn compare(a: &PixelGrid, b: &PixelGrid) -> Result<ComparisonReport, DimensionMismatch> {
    if a.dimensions() != b.dimensions() {
        return Err(DimensionMismatch {
            left: a.dimensions(),
            right: b.dimensions(),
        });
    }

    let (changed_count, max_abs_difference) = a
        .channels()
        .zip(b.channels())
        .map(|(x, y)| x.abs_diff(y))
        .filter(|&diff| diff > 0)
        .fold((0u64, 0u8), |(count, max), diff| (count + 1, max.max(diff)));

    let total_channel_values = a.len() as u64 * CHANNELS_PER_PIXEL as u64;
    let change_fraction = if total_channel_values == 0 {
        0.0
    } else {
        changed_count as f64 / total_channel_values as f64
    };

    Ok(ComparisonReport {
        total_channel_values,
        changed_count,
        change_fraction,
        max_abs_difference,
    })
}
