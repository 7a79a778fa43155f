//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 的 RGB 通道中隐藏或提取消息。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 的 RGB 通道中隐藏或提取消息。\n不带子命令运行时进入交互模式。"
)]
pub struct Cli {
    /// 追加在消息末尾的结束标记，提取时必须与隐藏时一致。
    #[arg(long, global = true, default_value = "###END###")]
    pub delimiter: String,

    /// 输出调试日志。
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// 可用的子命令。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 在无损格式图像中隐藏一条消息。
    Hide(HideArgs),

    /// 从经过隐写的图像中提取隐藏的消息。
    #[command(alias = "recover")]
    Extract(ExtractArgs),

    /// 逐通道比较两张图像，统计被修改的像素值。
    Compare(CompareArgs),

    /// 显示图像可容纳的消息长度。
    Capacity(CapacityArgs),

    /// 进入菜单驱动的交互模式。
    Interactive,
}

/// 'hide' 命令所需的参数。消息来源 `--message` 与 `--text` 二选一。
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["message", "text"])))]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 直接在命令行中给出的消息。
    #[arg(short, long)]
    pub message: Option<String>,

    /// 包含要隐藏内容的文本文件路径。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 结果图像的输出路径，默认为 `<原文件名>_stego.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'extract' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// 已隐藏消息的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 将提取出的消息另存到该文件。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'compare' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// 原始图像路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 用于比较的第二张图像路径。
    #[arg(short, long)]
    pub other: PathBuf,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要查询容量的图像路径。
    #[arg(short, long)]
    pub image: PathBuf,
}
