//! # lsb_stego 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：位编解码、容量计算、嵌入、提取与图像比较，
//! 以及命令行与交互模式所用的处理函数。

// 声明库包含的所有模块。

pub mod bits;
pub mod capacity;
pub mod cli;
pub mod compare;
pub mod constants;
pub mod error;
pub mod grid;
pub mod handler;
pub mod interactive;
pub mod steganography;

pub use capacity::{CapacityInfo, capacity};
pub use compare::{ComparisonReport, compare};
pub use error::{CapacityError, ConfigError, DimensionMismatch, ExtractionError, GridError};
pub use grid::PixelGrid;
pub use steganography::Steganographer;
