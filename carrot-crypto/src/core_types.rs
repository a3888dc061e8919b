//! Value types carried by enotes and by the per-enote derivations.

use crate::consts::*;
use crate::domain_separators;
use crate::type_macros::*;

define_tiny_edwards_type! {
    /// One-time address `Ko` of an output
    OutputPubkey
}
define_tiny_edwards_type! {
    /// Amount commitment `C_a = k_a G + a H`
    AmountCommitment
}
define_tiny_edwards_type! {
    /// Linking tag of a spent output
    KeyImage
}
define_tiny_edwards_type! {
    /// Difference `k^o_g G + k^o_t T` between a one-time address and its address spend pubkey
    OnetimeExtension
}

define_tiny_montgomery_type! {
    /// Enote ephemeral pubkey `D_e`, an X25519 point
    EnoteEphemeralPubkey, public
}
define_tiny_montgomery_type! {
    /// Uncontextualized X25519 shared secret `s_sr`
    MontgomeryECDH, secret
}

define_tiny_scalar_type! {
    /// Amount blinding factor `k_a`
    AmountBlindingKey
}
define_tiny_scalar_type! {
    /// Enote ephemeral private key `d_e`
    EnoteEphemeralKey
}
define_tiny_scalar_type! {
    /// Discrete log of a one-time extension with respect to `G`
    OnetimeExtensionG
}
define_tiny_scalar_type! {
    /// Discrete log of a one-time extension with respect to `T`
    OnetimeExtensionT
}

define_tiny_byte_type! {
    /// Contextualized sender-receiver secret `s^ctx_sr`
    SenderReceiverSecret, 32, secret
}

define_tiny_byte_type! {
    /// Either the sender's randomness for `d_e` (normal enotes), an HMAC of the enote under `k_v`
    /// (special enotes), or an arbitrary message (internal enotes)
    JanusAnchor, JANUS_ANCHOR_BYTES, public
}
define_tiny_byte_type! {EncryptedJanusAnchor, JANUS_ANCHOR_BYTES, public}

/// Output amount in atomic units
pub type Amount = u64;
define_tiny_byte_type! {EncryptedAmount, ENCRYPTED_AMOUNT_BYTES, public}

define_tiny_byte_type! {
    /// Payment ID of an integrated address
    PaymentId, PAYMENT_ID_BYTES, public
}
define_tiny_byte_type! {EncryptedPaymentId, PAYMENT_ID_BYTES, public}

define_tiny_byte_type! {
    /// Three-byte scan filter, false positive rate of about 2^-24
    ViewTag, VIEW_TAG_BYTES, public
}

define_tiny_byte_type! {
    /// Binds every enote in a transaction to that transaction's first key image, or a coinbase
    /// enote to its block
    InputContext, INPUT_CONTEXT_BYTES, public
}

/// Height of the block containing a coinbase enote
pub type BlockIndex = u64;

pub const NULL_JANUS_ANCHOR: JanusAnchor = JanusAnchor([0u8; JANUS_ANCHOR_BYTES]);
pub const NULL_PAYMENT_ID: PaymentId = PaymentId([0u8; PAYMENT_ID_BYTES]);

/// Committed into `k_a` but never transmitted; recovered by trial on scan
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CarrotEnoteType {
    Payment,
    Change,
}

impl CarrotEnoteType {
    pub(crate) fn to_byte(self) -> u8 {
        match self {
            Self::Payment => 0,
            Self::Change => 1,
        }
    }
}

impl InputContext {
    /// `'C' || IntToBytes256(block_index)`
    pub fn new_coinbase(block_index: BlockIndex) -> Self {
        let mut input_context = [0u8; INPUT_CONTEXT_BYTES];
        input_context[0] = domain_separators::INPUT_CONTEXT_COINBASE;
        input_context[1..9].copy_from_slice(&block_index.to_le_bytes());
        Self(input_context)
    }

    /// `'R' || L_1`
    pub fn new_ringct(first_rct_key_image: &KeyImage) -> Self {
        let mut input_context = [0u8; INPUT_CONTEXT_BYTES];
        input_context[0] = domain_separators::INPUT_CONTEXT_RINGCT;
        input_context[1..].copy_from_slice(first_rct_key_image.as_bytes());
        Self(input_context)
    }
}

impl AmountBlindingKey {
    /// The blinding factor of every coinbase commitment
    pub fn one() -> Self {
        Self(Scalar::ONE)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn coinbase_input_context_layout() {
        let input_context = InputContext::new_coinbase(0x0102030405060708);
        let bytes = input_context.as_bytes();
        assert_eq!(bytes[0], b'C');
        assert_eq!(&bytes[1..9], &[8, 7, 6, 5, 4, 3, 2, 1]);
        assert!(bytes[9..].iter().all(|b| *b == 0));
    }

    #[test]
    fn ringct_input_context_layout() {
        let key_image = KeyImage::from_bytes([0xaa; 32]);
        let input_context = InputContext::new_ringct(&key_image);
        assert_eq!(input_context.as_bytes()[0], b'R');
        assert_eq!(&input_context.as_bytes()[1..], key_image.as_bytes());
    }

    #[test]
    fn secret_types_redact_debug() {
        let s = SenderReceiverSecret::from([7u8; 32]);
        assert_eq!(std::format!("{:?}", s), "SenderReceiverSecret(<redacted>)");
    }
}
