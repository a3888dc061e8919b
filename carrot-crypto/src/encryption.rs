//! Per-output XOR masks for the anchor, amount, and payment ID fields of an enote.
//!
//! Every mask is keyed by `s^ctx_sr` and binds `Ko`, so no two outputs ever share a mask.

use crate::consts::*;
use crate::core_types::*;
use crate::domain_separators;
use crate::hash_functions::*;
use crate::transcript::*;

/// `m_anchor = H_16[s^ctx_sr](Ko)`
fn anchor_encryption_mask(
    s_sender_receiver: &SenderReceiverSecret,
    onetime_address: &OutputPubkey,
) -> [u8; JANUS_ANCHOR_BYTES] {
    let transcript = make_carrot_transcript!(domain_separators::ENCRYPTION_MASK_ANCHOR,
        OutputPubkey : onetime_address);
    derive_bytes_16(&transcript, s_sender_receiver.as_bytes())
}

/// `m_a = H_8[s^ctx_sr](Ko)`
fn amount_encryption_mask(
    s_sender_receiver: &SenderReceiverSecret,
    onetime_address: &OutputPubkey,
) -> [u8; ENCRYPTED_AMOUNT_BYTES] {
    let transcript = make_carrot_transcript!(domain_separators::ENCRYPTION_MASK_AMOUNT,
        OutputPubkey : onetime_address);
    derive_bytes_8(&transcript, s_sender_receiver.as_bytes())
}

/// `m_pid = H_8[s^ctx_sr](Ko)`
fn payment_id_encryption_mask(
    s_sender_receiver: &SenderReceiverSecret,
    onetime_address: &OutputPubkey,
) -> [u8; PAYMENT_ID_BYTES] {
    let transcript = make_carrot_transcript!(domain_separators::ENCRYPTION_MASK_PAYMENT_ID,
        OutputPubkey : onetime_address);
    derive_bytes_8(&transcript, s_sender_receiver.as_bytes())
}

fn xor_with_mask<const N: usize>(mut bytes: [u8; N], mask: &[u8; N]) -> [u8; N] {
    bytes.iter_mut().zip(mask).for_each(|(b, m)| *b ^= m);
    bytes
}

impl EncryptedJanusAnchor {
    pub fn encrypt(
        anchor: &JanusAnchor,
        s_sender_receiver: &SenderReceiverSecret,
        onetime_address: &OutputPubkey,
    ) -> Self {
        let mask = anchor_encryption_mask(s_sender_receiver, onetime_address);
        Self(xor_with_mask(anchor.0, &mask))
    }

    pub fn decrypt(
        &self,
        s_sender_receiver: &SenderReceiverSecret,
        onetime_address: &OutputPubkey,
    ) -> JanusAnchor {
        let mask = anchor_encryption_mask(s_sender_receiver, onetime_address);
        JanusAnchor(xor_with_mask(self.0, &mask))
    }
}

impl EncryptedAmount {
    /// The amount is masked in its little-endian encoding
    pub fn encrypt(
        amount: Amount,
        s_sender_receiver: &SenderReceiverSecret,
        onetime_address: &OutputPubkey,
    ) -> Self {
        let mask = amount_encryption_mask(s_sender_receiver, onetime_address);
        Self(xor_with_mask(amount.to_le_bytes(), &mask))
    }

    pub fn decrypt(
        &self,
        s_sender_receiver: &SenderReceiverSecret,
        onetime_address: &OutputPubkey,
    ) -> Amount {
        let mask = amount_encryption_mask(s_sender_receiver, onetime_address);
        Amount::from_le_bytes(xor_with_mask(self.0, &mask))
    }
}

impl EncryptedPaymentId {
    pub fn encrypt(
        payment_id: &PaymentId,
        s_sender_receiver: &SenderReceiverSecret,
        onetime_address: &OutputPubkey,
    ) -> Self {
        let mask = payment_id_encryption_mask(s_sender_receiver, onetime_address);
        Self(xor_with_mask(payment_id.0, &mask))
    }

    pub fn decrypt(
        &self,
        s_sender_receiver: &SenderReceiverSecret,
        onetime_address: &OutputPubkey,
    ) -> PaymentId {
        let mask = payment_id_encryption_mask(s_sender_receiver, onetime_address);
        PaymentId(xor_with_mask(self.0, &mask))
    }
}
