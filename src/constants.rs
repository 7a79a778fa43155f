/// 默认的消息结束标记。
/// 每条消息在嵌入前都会在末尾追加该字节序列，提取时以其首次出现的位置作为消息结尾。
pub const DEFAULT_DELIMITER: &[u8] = b"###END###";

/// 每个像素的颜色通道数 (R, G, B)。
/// 每个通道的最低有效位可以存储 1 bit。
pub const CHANNELS_PER_PIXEL: usize = 3;

/// 每个字节的位数。
pub const BITS_PER_BYTE: usize = 8;

/// 未指定输出路径时，隐写图像文件名追加的后缀。
pub const STEGO_SUFFIX: &str = "_stego";

/// 未指定输出路径时使用的图像扩展名 (必须是无损格式)。
pub const DEFAULT_OUTPUT_EXTENSION: &str = "png";

/// 交互模式下保存提取结果的默认文件名。
pub const DEFAULT_EXTRACTED_FILE: &str = "extracted_message.txt";
