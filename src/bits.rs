use crate::constants::BITS_PER_BYTE;

/// 将字节序列展开为位序列，每个字节按最高位在前输出 8 个位 (取值 0 或 1)。
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * BITS_PER_BYTE);
    for &byte in bytes {
        bits.extend((0..BITS_PER_BYTE).rev().map(|shift| (byte >> shift) & 1));
    }
    bits
}

/// 以 8 位为一组把位序列重新组装为字节。
///
/// 末尾不足 8 位的部分会被丢弃，而不是补零。
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(BITS_PER_BYTE)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1)))
        .collect()
}
