//! Fixed sizes and limits of the Carrot enote format.

/// Smallest number of outputs a non-coinbase transaction may carry
pub const MIN_OUTPUT_SET_SIZE: usize = 2;
/// Largest number of outputs a non-coinbase transaction may carry, bounded by the range proof
pub const MAX_OUTPUT_SET_SIZE: usize = 16;

pub const JANUS_ANCHOR_BYTES: usize = 16;
pub const ENCRYPTED_AMOUNT_BYTES: usize = 8;
pub const PAYMENT_ID_BYTES: usize = 8;
pub const VIEW_TAG_BYTES: usize = 3;
/// one tag byte followed by a key image or a zero-padded block index
pub const INPUT_CONTEXT_BYTES: usize = 1 + 32;
