use clap::Parser;
use env_logger::Env;
use std::io;

use lsb_stego::{
    cli::{Cli, Commands},
    handler::{handle_capacity, handle_compare, handle_extract, handle_hide},
    interactive::run_interactive,
    steganography::Steganographer,
};

/// 程序的主入口点
///
/// 负责初始化日志、解析命令行参数，并根据指定的子命令将执行分派到相应的处理函数。
/// 未指定子命令时进入交互模式。
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let stego = Steganographer::new(cli.delimiter)?;

    match cli.command {
        Some(Commands::Hide(args)) => handle_hide(args, &stego),
        Some(Commands::Extract(args)) => handle_extract(args, &stego),
        Some(Commands::Compare(args)) => handle_compare(args),
        Some(Commands::Capacity(args)) => handle_capacity(args, &stego),
        Some(Commands::Interactive) | None => {
            run_interactive(io::stdin().lock(), io::stdout(), &stego)
        }
    }
}
