//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`extract`、`compare` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责图像的解码与保存、文件 I/O、调用隐写核心以及向用户报告结果。

use crate::capacity::CapacityInfo;
use crate::cli::{CapacityArgs, CompareArgs, ExtractArgs, HideArgs};
use crate::compare::{ComparisonReport, compare};
use crate::constants::{DEFAULT_OUTPUT_EXTENSION, STEGO_SUFFIX};
use crate::grid::PixelGrid;
use crate::steganography::Steganographer;
use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 隐藏操作完成后的统计信息。
#[derive(Debug, Clone, Copy)]
pub struct HideSummary {
    pub message_len: usize,
    pub bits_written: u64,
    pub original_size: u64,
    pub stego_size: u64,
}

/// 读取图像并转换为 RGB 像素网格。Alpha 通道与调色板会被展平。
pub fn load_grid(path: &Path) -> Result<PixelGrid> {
    let img = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    info!("Decoded {} ({}x{})", path.display(), img.width(), img.height());
    Ok(PixelGrid::from(&img.to_rgb8()))
}

/// 将像素网格保存到 `path`，格式由扩展名决定。
pub fn save_grid(grid: PixelGrid, path: &Path) -> Result<()> {
    grid.into_rgb_image().save(path).with_context(|| {
        format!(
            "Unable to write to target image file: {}. \nOnly lossless formats (png, bmp, tiff, webp, qoi) are supported.",
            path.to_string_lossy().red().bold()
        )
    })?;
    info!("Saved {}", path.display());
    Ok(())
}

/// 生成默认的隐写图像路径：`<目录>/<文件名>_stego.png`。
pub fn default_stego_path(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    image.with_file_name(format!("{stem}{STEGO_SUFFIX}.{DEFAULT_OUTPUT_EXTENSION}"))
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 在 `image` 中隐藏 `message` 并保存到 `dest`。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入图像。
/// * 图像空间不足以容纳消息与结束标记。
/// * 无法写入目标图像文件。
pub fn hide_message(
    stego: &Steganographer,
    image: &Path,
    message: &[u8],
    dest: &Path,
) -> Result<HideSummary> {
    let grid = load_grid(image)?;
    let capacity = stego.capacity(grid.width(), grid.height());
    let required = capacity.required_bits(message.len());

    anyhow::ensure!(
        capacity.fits(message.len()),
        "Not enough space in the image to hide the message. \nRequired: {} bits, Available: {} bits",
        required.to_string().red().bold(),
        capacity.total_bits.to_string().green().bold()
    );

    let doctored = stego.embed(&grid, message)?;
    save_grid(doctored, dest)?;

    Ok(HideSummary {
        message_len: message.len(),
        bits_written: required,
        original_size: fs::metadata(image).map(|m| m.len()).unwrap_or(0),
        stego_size: fs::metadata(dest).map(|m| m.len()).unwrap_or(0),
    })
}

/// 从 `image` 中提取隐藏的消息字节。
pub fn extract_message(stego: &Steganographer, image: &Path) -> Result<Vec<u8>> {
    let grid = load_grid(image)?;
    let message = stego.extract(&grid).with_context(|| {
        format!(
            "Failed to extract a message from '{}'. \nThe image may not contain a hidden message, or it was re-encoded.",
            image.to_string_lossy().red().bold()
        )
    })?;
    info!("Extracted {} bytes", message.len());
    Ok(message)
}

/// 逐通道比较两张图像。
pub fn compare_images(original: &Path, other: &Path) -> Result<ComparisonReport> {
    let a = load_grid(original)?;
    let b = load_grid(other)?;
    let report = compare(&a, &b).context("Unable to compare images")?;
    Ok(report)
}

/// 仅根据图像头部读取尺寸并计算容量，不解码像素。
pub fn image_capacity(stego: &Steganographer, image: &Path) -> Result<CapacityInfo> {
    let (width, height) = image::image_dimensions(image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            image.to_string_lossy().red().bold()
        )
    })?;
    Ok(stego.capacity(width, height))
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取消息 (命令行文本或文本文件)、检查目标路径、调用核心隐写函数，
/// 最后报告原始图像与结果图像的大小。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 未提供消息，或无法读取文本文件。
/// * 目标文件已存在且未指定 `--force`。
/// * `hide_message` 失败。
pub fn handle_hide(args: HideArgs, stego: &Steganographer) -> Result<()> {
    let message = match (&args.message, &args.text) {
        (Some(message), _) => message.clone().into_bytes(),
        (None, Some(text)) => fs::read(text).with_context(|| {
            format!(
                "Unable to read text file: {}",
                text.to_string_lossy().red().bold()
            )
        })?,
        (None, None) => anyhow::bail!("No message provided. \nUse --message or --text."),
    };
    anyhow::ensure!(!message.is_empty(), "No message provided: the message is empty.");

    let dest = args.dest.unwrap_or_else(|| default_stego_path(&args.image));
    ensure_writable(&dest, args.force)?;

    let summary = hide_message(stego, &args.image, &message, &dest)?;

    println!(
        "The message has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    println!(
        "Message length: {} bytes ({} bits including delimiter)",
        summary.message_len, summary.bits_written
    );
    println!("Original image size: {} bytes", summary.original_size);
    println!("Steganographic image size: {} bytes", summary.stego_size);
    Ok(())
}

/// 处理 'Extract' 命令的执行逻辑。
///
/// 打印提取出的消息；若给出 `--text`，同时把原始字节写入该文件。
pub fn handle_extract(args: ExtractArgs, stego: &Steganographer) -> Result<()> {
    if let Some(text) = &args.text {
        ensure_writable(text, args.force)?;
    }

    let message = extract_message(stego, &args.image)?;

    println!(
        "\nExtracted message ({} bytes):\n{}",
        message.len().to_string().green().bold(),
        String::from_utf8_lossy(&message)
    );

    if let Some(text) = &args.text {
        fs::write(text, &message).with_context(|| {
            format!(
                "Unable to write to target text file: {}",
                text.to_string_lossy().red().bold()
            )
        })?;
        println!(
            "The message has been successfully extracted and saved: {}",
            text.to_string_lossy().green().bold()
        );
    }
    Ok(())
}

/// 处理 'Compare' 命令的执行逻辑。
pub fn handle_compare(args: CompareArgs) -> Result<()> {
    let report = compare_images(&args.image, &args.other)?;
    println!("{}", render_comparison(&report));
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑。
pub fn handle_capacity(args: CapacityArgs, stego: &Steganographer) -> Result<()> {
    let info = image_capacity(stego, &args.image)?;
    println!("{}", render_capacity(&info));
    Ok(())
}

/// 比较结果的文本报告。
pub fn render_comparison(report: &ComparisonReport) -> String {
    format!(
        "\nImage Comparison:\nTotal pixel values: {}\nModified values: {}\nModification percentage: {:.2}%\nMaximum difference: {}",
        report.total_channel_values,
        report.changed_count,
        report.change_percentage(),
        report.max_abs_difference
    )
}

/// 容量信息的文本报告，附带常见文本长度是否可容纳的示例。
pub fn render_capacity(info: &CapacityInfo) -> String {
    let mark = |chars: u64| if info.max_characters >= chars { "yes" } else { "no" };
    format!(
        "\nImage Capacity Information:\nDimensions: {} x {}\nTotal pixels: {}\nTotal available bits: {}\nAvailable storage bits: {}\nMaximum message length: {} characters\nDelimiter overhead: {} bits\n\nExample storage capacities:\n- Tweet (280 chars): {}\n- Short email (~1KB): {}\n- Long document (~10KB): {}",
        info.width,
        info.height,
        info.total_pixels,
        info.total_bits,
        info.available_bits,
        info.max_characters,
        info.delimiter_bits,
        mark(280),
        mark(1000),
        mark(10000)
    )
}
