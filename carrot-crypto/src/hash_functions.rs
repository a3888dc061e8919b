//! Keyed Blake2b with caller-chosen output length, plus the scalar variant built on it.

use blake2::digest::core_api::{Buffer, OutputSizeUser, UpdateCore, VariableOutputCore};
use blake2::Blake2bVarCore;
use curve25519_dalek::Scalar;
use typenum::Unsigned;
use zeroize::Zeroize;

const BLAKE2B_MAX_KEY_BYTES: usize = 64;
const BLAKE2B_MAX_OUT_BYTES: usize = <<Blake2bVarCore as OutputSizeUser>::OutputSize as Unsigned>::USIZE;

/// `out = Blake2b[key](data)` truncated to `out.len()` bytes. An empty key means unkeyed.
fn keyed_blake2b(data: &[u8], key: &[u8], out: &mut [u8]) {
    debug_assert!(key.len() <= BLAKE2B_MAX_KEY_BYTES);
    debug_assert!(out.len() <= BLAKE2B_MAX_OUT_BYTES);

    // parameter block carries the key length and the requested digest length
    let mut core = Blake2bVarCore::new_with_params(&[], &[], key.len(), out.len());
    let mut buffer = Buffer::<Blake2bVarCore>::default();

    // a non-empty key is absorbed as its own zero-padded block ahead of the data
    if !key.is_empty() {
        buffer.digest_blocks(key, |blocks| core.update_blocks(blocks));
        let mut key_block = buffer.pad_with_zeros().clone();
        core.update_blocks(core::slice::from_ref(&key_block));
        key_block.as_mut_slice().zeroize();
    }

    buffer.digest_blocks(data, |blocks| core.update_blocks(blocks));

    let mut full_out = Default::default();
    core.finalize_variable_core(&mut buffer, &mut full_out);
    out.copy_from_slice(&full_out[..out.len()]);
    full_out.as_mut_slice().zeroize();
}

macro_rules! define_derive_bytes {
    ($($f:ident => $outlen:literal),+ $(,)?) => {$(
        #[doc = concat!("`H_", stringify!($outlen), "[key](data)`")]
        pub fn $f(data: &[u8], key: &[u8]) -> [u8; $outlen] {
            let mut res = [0u8; $outlen];
            keyed_blake2b(data, key, &mut res);
            res
        }
    )+};
}

define_derive_bytes! {
    derive_bytes_3 => 3,
    derive_bytes_8 => 8,
    derive_bytes_16 => 16,
    derive_bytes_32 => 32,
    derive_bytes_64 => 64,
}

/// `H_n[key](data)`: 64 output bytes reduced modulo the group order
pub fn derive_scalar(data: &[u8], key: &[u8]) -> Scalar {
    let mut wide = derive_bytes_64(data, key);
    let res = Scalar::from_bytes_mod_order_wide(&wide);
    wide.zeroize();
    res
}
