//! # 交互模式模块
//!
//! 菜单驱动的会话：隐藏、提取、比较、查询容量。
//! 输入与输出均为泛型，便于在测试中用内存缓冲区驱动整个会话。

use crate::constants::DEFAULT_EXTRACTED_FILE;
use crate::handler::{
    compare_images, default_stego_path, extract_message, hide_message, image_capacity,
    render_capacity, render_comparison,
};
use crate::steganography::Steganographer;
use anyhow::{Context, Result};
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

const MENU: &str = "\
==================================================
Available Actions:
==================================================
1. Hide message in image
2. Extract message from image
3. Compare images
4. Check image capacity
5. Exit";

enum Flow {
    Continue,
    Exit,
}

/// 运行交互会话，直到用户选择退出或输入结束。
pub fn run_interactive<R: BufRead, W: Write>(
    input: R,
    output: W,
    stego: &Steganographer,
) -> Result<()> {
    Session {
        input,
        output,
        stego,
    }
    .run()
}

struct Session<'a, R, W> {
    input: R,
    output: W,
    stego: &'a Steganographer,
}

impl<R: BufRead, W: Write> Session<'_, R, W> {
    fn run(mut self) -> Result<()> {
        writeln!(self.output, "{}", "=".repeat(60))?;
        writeln!(self.output, "LSB Steganography Tool - Interactive Mode")?;
        writeln!(self.output, "{}", "=".repeat(60))?;

        loop {
            writeln!(self.output, "\n{MENU}")?;
            let Some(choice) = self.ask("\nEnter your choice (1-5): ")? else {
                break;
            };

            let outcome = match choice.as_str() {
                "1" => self.hide(),
                "2" => self.extract(),
                "3" => self.compare(),
                "4" => self.capacity(),
                "5" => break,
                _ => {
                    writeln!(self.output, "Invalid choice! Please enter 1-5.")?;
                    continue;
                }
            };

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) => {
                    writeln!(self.output, "Error: {e:#}")?;
                    continue;
                }
            }

            match self.ask("\nPerform another operation? (y/n): ")? {
                Some(answer) if answer.eq_ignore_ascii_case("y") => {}
                _ => break,
            }
        }

        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    /// 打印提示并读取一行，去掉首尾空白。输入结束时返回 `None`。
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask_existing_path(&mut self, prompt: &str) -> Result<Option<PathBuf>> {
        let Some(path) = self.ask(prompt)? else {
            return Ok(None);
        };
        let path = PathBuf::from(path);
        anyhow::ensure!(path.exists(), "Image not found: {}", path.display());
        Ok(Some(path))
    }

    fn hide(&mut self) -> Result<Flow> {
        let Some(image) = self.ask_existing_path("Enter path to input image: ")? else {
            return Ok(Flow::Exit);
        };

        let capacity = image_capacity(self.stego, &image)?;
        writeln!(
            self.output,
            "\nImage can hold up to {} characters",
            capacity.max_characters
        )?;

        writeln!(self.output, "\nChoose message input method:")?;
        writeln!(self.output, "1. Type message directly")?;
        writeln!(self.output, "2. Load from file")?;
        let Some(method) = self.ask("Enter choice (1-2): ")? else {
            return Ok(Flow::Exit);
        };

        let message = match method.as_str() {
            "1" => match self.ask("Enter message to hide: ")? {
                Some(message) => message.into_bytes(),
                None => return Ok(Flow::Exit),
            },
            "2" => {
                let Some(file) = self.ask("Enter path to text file: ")? else {
                    return Ok(Flow::Exit);
                };
                let message = fs::read(&file)
                    .with_context(|| format!("Unable to read text file: {file}"))?;
                writeln!(self.output, "Loaded {} bytes from file", message.len())?;
                message
            }
            _ => anyhow::bail!("Invalid choice!"),
        };

        anyhow::ensure!(!message.is_empty(), "No message provided!");
        anyhow::ensure!(
            message.len() as u64 <= capacity.max_characters,
            "Message too long ({} chars > {} max)",
            message.len(),
            capacity.max_characters
        );

        let Some(dest) = self.ask("Enter output image path: ")? else {
            return Ok(Flow::Exit);
        };
        let dest = if dest.is_empty() {
            let dest = default_stego_path(&image);
            writeln!(self.output, "Using default output path: {}", dest.display())?;
            dest
        } else {
            PathBuf::from(dest)
        };

        let summary = hide_message(self.stego, &image, &message, &dest)?;
        writeln!(self.output, "\nMessage hidden successfully in '{}'!", dest.display())?;
        writeln!(self.output, "Message length: {} characters", summary.message_len)?;
        writeln!(self.output, "Original image size: {} bytes", summary.original_size)?;
        writeln!(
            self.output,
            "Steganographic image size: {} bytes",
            summary.stego_size
        )?;
        Ok(Flow::Continue)
    }

    fn extract(&mut self) -> Result<Flow> {
        let Some(image) = self.ask_existing_path("Enter path to steganographic image: ")? else {
            return Ok(Flow::Exit);
        };

        writeln!(self.output, "Extracting message... This may take a moment.")?;
        let message = extract_message(self.stego, &image)?;
        writeln!(
            self.output,
            "\nExtracted message ({} characters):",
            message.len()
        )?;
        writeln!(self.output, "{}", "-".repeat(60))?;
        writeln!(self.output, "{}", String::from_utf8_lossy(&message))?;
        writeln!(self.output, "{}", "-".repeat(60))?;

        let Some(save) = self.ask("\nSave extracted message to file? (y/n): ")? else {
            return Ok(Flow::Exit);
        };
        if save.eq_ignore_ascii_case("y") {
            let Some(name) =
                self.ask(&format!("Enter filename (default: {DEFAULT_EXTRACTED_FILE}): "))?
            else {
                return Ok(Flow::Exit);
            };
            let name = if name.is_empty() {
                DEFAULT_EXTRACTED_FILE.to_string()
            } else {
                name
            };
            fs::write(Path::new(&name), &message)
                .with_context(|| format!("Unable to write to target text file: {name}"))?;
            writeln!(self.output, "Message saved to {name}")?;
        }
        Ok(Flow::Continue)
    }

    fn compare(&mut self) -> Result<Flow> {
        let Some(first) = self.ask_existing_path("Enter path to first image: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(second) = self.ask_existing_path("Enter path to second image: ")? else {
            return Ok(Flow::Exit);
        };

        let report = compare_images(&first, &second)?;
        writeln!(self.output, "{}", render_comparison(&report))?;
        Ok(Flow::Continue)
    }

    fn capacity(&mut self) -> Result<Flow> {
        let Some(image) = self.ask_existing_path("Enter path to image: ")? else {
            return Ok(Flow::Exit);
        };

        let info = image_capacity(self.stego, &image)?;
        if let Some(name) = image.file_name() {
            writeln!(self.output, "\nFile: {}", name.to_string_lossy())?;
        }
        writeln!(self.output, "{}", render_capacity(&info))?;
        Ok(Flow::Continue)
    }
}
