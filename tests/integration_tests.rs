use image::{ImageBuffer, Rgb, Rgba};
use lsb_stego::{
    cli::{CapacityArgs, CompareArgs, ExtractArgs, HideArgs},
    handler::{
        compare_images, extract_message, handle_capacity, handle_compare, handle_extract,
        handle_hide, image_capacity,
    },
    interactive::run_interactive,
    steganography::Steganographer,
};
use rand::RngCore;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tempfile::tempdir;

/// 一个辅助函数，用于创建一个带有随机像素的 RGBA 测试图像 (读取时会被展平为 RGB)
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut img_buf = ImageBuffer::new(width, height);
    let mut raw_pixels = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    img_buf
        .pixels_mut()
        .zip(raw_pixels.chunks_exact(4))
        .for_each(|(pixel, chunk)| {
            *pixel = Rgba([chunk[0], chunk[1], chunk[2], 255]);
        });

    img_buf.save(path).expect("Failed to create test image.");
}

/// 创建一张所有通道值相同的 RGB 图像
fn create_flat_image(path: &Path, width: u32, height: u32, value: u8) {
    ImageBuffer::from_pixel(width, height, Rgb([value, value, value]))
        .save(path)
        .expect("Failed to create test image.");
}

/// 验证从隐藏到提取的完整流程
#[test]
fn test_handle_hide_and_extract_integration() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let hidden_image_path = dir.path().join("hidden.png");
    let source_text_path = dir.path().join("source.txt");
    let recovered_text_path = dir.path().join("recovered.txt");
    let stego = Steganographer::default();

    create_test_image(&original_image_path, 100, 100);
    let original_text = "This is a test message for the handler! 这是一个给处理器的测试信息！";
    fs::write(&source_text_path, original_text)?;

    // 2. 测试 handle_hide
    let hide_args = HideArgs {
        image: original_image_path.clone(),
        message: None,
        text: Some(source_text_path.clone()),
        dest: Some(hidden_image_path.clone()),
        force: false,
    };
    handle_hide(hide_args, &stego)?;
    assert!(hidden_image_path.exists(), "Hidden image should be created.");

    // 3. 测试 handle_extract
    let extract_args = ExtractArgs {
        image: hidden_image_path.clone(),
        text: Some(recovered_text_path.clone()),
        force: false,
    };
    handle_extract(extract_args, &stego)?;
    assert!(
        recovered_text_path.exists(),
        "Recovered text file should be created."
    );

    // 4. 验证结果
    let recovered_text = fs::read_to_string(&recovered_text_path)?;
    assert_eq!(
        original_text, recovered_text,
        "Recovered text must match the original."
    );

    // 5. 嵌入只改动最低有效位
    let report = compare_images(&original_image_path, &hidden_image_path)?;
    assert_eq!(report.total_channel_values, 30_000);
    assert!(report.max_abs_difference <= 1);
    assert!(report.changed_count <= ((original_text.len() + 9) * 8) as u64);

    Ok(())
}

/// 验证当用户不提供输出路径时，是否能正确生成默认路径并完成操作
#[test]
fn test_handle_hide_with_default_dest() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.bmp");
    let stego = Steganographer::default();

    create_test_image(&original_image_path, 40, 40);

    let hide_args = HideArgs {
        image: original_image_path.clone(),
        message: Some("hello from the command line".to_string()),
        text: None,
        dest: None,
        force: false,
    };
    handle_hide(hide_args, &stego)?;

    let expected_hidden_path = dir.path().join("original_stego.png");
    assert!(
        expected_hidden_path.exists(),
        "Default hidden image should be created at: {:?}",
        expected_hidden_path
    );

    // 不提供 text 时只打印消息
    handle_extract(
        ExtractArgs {
            image: expected_hidden_path.clone(),
            text: None,
            force: false,
        },
        &stego,
    )?;
    assert_eq!(
        extract_message(&stego, &expected_hidden_path)?,
        b"hello from the command line"
    );

    Ok(())
}

/// 验证覆盖保护机制以及 `--force` 标志是否按预期工作
#[test]
fn test_overwrite_protection_and_force_flag() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let dest_path = dir.path().join("dest.png");
    let stego = Steganographer::default();

    create_test_image(&image_path, 50, 50);

    // 场景一：目标文件已存在，不使用 --force
    fs::write(&dest_path, "this is a dummy file to be overwritten")?;
    let result = handle_hide(
        HideArgs {
            image: image_path.clone(),
            message: Some("some text".to_string()),
            text: None,
            dest: Some(dest_path.clone()),
            force: false,
        },
        &stego,
    );
    assert!(
        result.is_err(),
        "Execution should fail without --force when file exists."
    );
    if let Err(e) = result {
        assert!(e.to_string().contains("Output file already exists"));
    }

    // 场景二：使用 --force 强制覆盖
    let result = handle_hide(
        HideArgs {
            image: image_path.clone(),
            message: Some("some text".to_string()),
            text: None,
            dest: Some(dest_path.clone()),
            force: true,
        },
        &stego,
    );
    assert!(
        result.is_ok(),
        "Execution should succeed with --force when file exists."
    );
    let dummy_content = fs::read(&dest_path)?;
    assert_ne!(dummy_content, b"this is a dummy file to be overwritten");
    assert_eq!(extract_message(&stego, &dest_path)?, b"some text");

    // 场景三：提取时的文本文件同样受保护
    let text_path = dir.path().join("out.txt");
    fs::write(&text_path, "keep me")?;
    let result = handle_extract(
        ExtractArgs {
            image: dest_path.clone(),
            text: Some(text_path.clone()),
            force: false,
        },
        &stego,
    );
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&text_path)?, "keep me");

    Ok(())
}

/// 验证空间不足时的错误处理
#[test]
fn test_handle_hide_not_enough_space() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("small.png");
    let text_path = dir.path().join("large.txt");
    let dest_path = dir.path().join("dest.png");

    create_test_image(&image_path, 10, 10);
    fs::write(&text_path, "a".repeat(29))?;

    let result = handle_hide(
        HideArgs {
            image: image_path.clone(),
            message: None,
            text: Some(text_path),
            dest: Some(dest_path.clone()),
            force: false,
        },
        &Steganographer::default(),
    );

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Not enough space"));
    }
    assert!(!dest_path.exists(), "No output may be written on failure.");

    // 恰好 28 字节可以容纳
    handle_hide(
        HideArgs {
            image: image_path,
            message: Some("a".repeat(28)),
            text: None,
            dest: Some(dest_path.clone()),
            force: false,
        },
        &Steganographer::default(),
    )?;
    assert!(dest_path.exists());

    Ok(())
}

/// 验证从未隐写过的图像中提取会失败
#[test]
fn test_extract_without_hidden_message() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("plain.png");
    create_flat_image(&image_path, 30, 30, 200);

    let result = extract_message(&Steganographer::default(), &image_path);
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(format!("{e:#}").contains("No hidden message found"));
    }
    Ok(())
}

/// 验证自定义结束标记必须在隐藏与提取时保持一致
#[test]
fn test_custom_delimiter_must_match() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("plain.png");
    let hidden_path = dir.path().join("hidden.png");
    create_flat_image(&image_path, 30, 30, 0);

    let custom = Steganographer::new("@@STOP@@")?;
    handle_hide(
        HideArgs {
            image: image_path,
            message: Some("custom framing".to_string()),
            text: None,
            dest: Some(hidden_path.clone()),
            force: false,
        },
        &custom,
    )?;

    assert_eq!(extract_message(&custom, &hidden_path)?, b"custom framing");
    assert!(extract_message(&Steganographer::default(), &hidden_path).is_err());
    Ok(())
}

/// 验证容量查询与图像比较命令
#[test]
fn test_capacity_and_compare_commands() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");
    let c = dir.path().join("c.png");
    create_flat_image(&a, 10, 10, 0);
    create_flat_image(&b, 10, 10, 3);
    create_flat_image(&c, 12, 10, 0);

    let stego = Steganographer::default();
    let info = image_capacity(&stego, &a)?;
    assert_eq!(info.total_bits, 300);
    assert_eq!(info.max_characters, 28);
    handle_capacity(CapacityArgs { image: a.clone() }, &stego)?;

    let report = compare_images(&a, &b)?;
    assert_eq!(report.changed_count, 300);
    assert_eq!(report.max_abs_difference, 3);
    handle_compare(CompareArgs {
        image: a.clone(),
        other: b,
    })?;

    assert!(handle_compare(CompareArgs { image: a, other: c }).is_err());
    Ok(())
}

/// 验证保存为有损格式 (未编译 JPEG 支持) 时报错
#[test]
fn test_hide_rejects_unsupported_output_format() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let dest_path = dir.path().join("out.jpg");
    create_test_image(&image_path, 20, 20);

    let result = handle_hide(
        HideArgs {
            image: image_path,
            message: Some("lossy".to_string()),
            text: None,
            dest: Some(dest_path),
            force: false,
        },
        &Steganographer::default(),
    );
    assert!(result.is_err());
    Ok(())
}

/// 通过内存输入驱动一次完整的交互会话：查询容量、隐藏、提取并保存
#[test]
fn test_interactive_session() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("cover.png");
    let hidden_path = dir.path().join("cover_stego.png");
    let saved_path = dir.path().join("saved.txt");
    create_test_image(&image_path, 10, 10);

    let script = format!(
        "4\n{image}\ny\n1\n{image}\n1\nhi there\n\ny\n2\n{hidden}\ny\n{saved}\nn\n",
        image = image_path.display(),
        hidden = hidden_path.display(),
        saved = saved_path.display(),
    );
    let mut output = Vec::new();
    run_interactive(
        Cursor::new(script),
        &mut output,
        &Steganographer::default(),
    )?;
    let output = String::from_utf8(output)?;

    assert!(output.contains("Maximum message length: 28 characters"));
    assert!(output.contains("Using default output path"));
    assert!(output.contains("Message hidden successfully"));
    assert!(output.contains("Extracted message (8 characters):"));
    assert!(output.contains("Goodbye!"));
    assert_eq!(fs::read_to_string(&saved_path)?, "hi there");
    Ok(())
}

/// 交互模式下过长的消息、无效选项与输入结束
#[test]
fn test_interactive_rejects_long_message_and_ends_on_eof() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("tiny.png");
    create_test_image(&image_path, 10, 10);

    let script = format!(
        "9\n1\n{image}\n1\n{long}\n",
        image = image_path.display(),
        long = "x".repeat(29),
    );
    let mut output = Vec::new();
    run_interactive(
        Cursor::new(script),
        &mut output,
        &Steganographer::default(),
    )?;
    let output = String::from_utf8(output)?;

    assert!(output.contains("Invalid choice! Please enter 1-5."));
    assert!(output.contains("Message too long (29 chars > 28 max)"));
    assert!(output.contains("Goodbye!"));
    assert!(!dir.path().join("tiny_stego.png").exists());
    Ok(())
}
