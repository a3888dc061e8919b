//! Fixed Ed25519 generators beyond the basepoint `G`.
//!
//! None of the four has a known discrete logarithm relative to `G` or to the others. They are stored
//! compressed and decompressed once on first use.

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use lazy_static::lazy_static;

/// Pedersen commitment amount generator: `toPoint(cn_fast_hash(G))`
pub const H_COMPRESSED: CompressedEdwardsY = CompressedEdwardsY([
    0x8b, 0x65, 0x59, 0x70, 0x15, 0x37, 0x99, 0xaf, 0x2a, 0xea, 0xdc, 0x9f, 0xf1, 0xad, 0xd0, 0xea,
    0x6c, 0x72, 0x51, 0xd5, 0x41, 0x54, 0xcf, 0xa9, 0x2c, 0x17, 0x3a, 0x0d, 0xd3, 0x9c, 0x1f, 0x94,
]);

/// Second spend-key generator, the `T` that `K_s = k_gi G + k_ps T` and `K^o_ext = k^o_g G + k^o_t T`
/// are built on
pub const T_COMPRESSED: CompressedEdwardsY = CompressedEdwardsY([
    0x61, 0xb7, 0x36, 0xce, 0x93, 0xb6, 0x2a, 0x3d, 0x37, 0x78, 0xab, 0x20, 0x4d, 0xa8, 0x5d, 0x3b,
    0x4c, 0xdc, 0x07, 0x25, 0x0f, 0x5d, 0xa7, 0xe3, 0xdf, 0x26, 0x29, 0x92, 0x81, 0x34, 0xd5, 0x26,
]);

/// Key image generator rerandomization base
pub const U_COMPRESSED: CompressedEdwardsY = CompressedEdwardsY([
    0x09, 0x75, 0x9c, 0x17, 0xc9, 0x07, 0xf7, 0x16, 0xa2, 0x0b, 0x1a, 0xec, 0x5c, 0xc3, 0xaf, 0xfd,
    0xe7, 0xf3, 0xa1, 0xb9, 0x14, 0x6b, 0x5a, 0xf2, 0x8c, 0xb7, 0xaf, 0x0a, 0xf4, 0x7a, 0x00, 0x66,
]);

/// Linking tag blinding base
pub const V_COMPRESSED: CompressedEdwardsY = CompressedEdwardsY([
    0x32, 0xb4, 0xd2, 0x9f, 0x2a, 0x80, 0x55, 0x69, 0xd9, 0x59, 0xd2, 0x44, 0x96, 0xed, 0x41, 0x1e,
    0x87, 0x91, 0x26, 0xd8, 0xf5, 0x2c, 0x1e, 0xcd, 0x86, 0x4d, 0xb9, 0x02, 0xb5, 0x81, 0x33, 0xe0,
]);

fn decompress_generator(compressed: &CompressedEdwardsY, name: &str) -> EdwardsPoint {
    match compressed.decompress() {
        Some(point) => point,
        None => panic!("generator {} is not a valid point encoding", name),
    }
}

lazy_static! {
    pub static ref H: EdwardsPoint = decompress_generator(&H_COMPRESSED, "H");
    pub static ref T: EdwardsPoint = decompress_generator(&T_COMPRESSED, "T");
    pub static ref U: EdwardsPoint = decompress_generator(&U_COMPRESSED, "U");
    pub static ref V: EdwardsPoint = decompress_generator(&V_COMPRESSED, "V");
}
