//! The parts of an enote keyed by `s^ctx_sr`: the amount commitment and the one-time address.
//!
//! ```text
//! k_a   = H_n[s^ctx_sr](a, K^j_s, enote_type)      C_a = k_a G + a H
//! k^o_g = H_n[s^ctx_sr](C_a)                       k^o_t = H_n[s^ctx_sr](C_a)
//! Ko    = K^j_s + k^o_g G + k^o_t T
//! ```
//!
//! The sender extends `K^j_s` into `Ko`. The receiver strips the same extension off `Ko` and looks
//! the result up among its own addresses, then opens `C_a` by guessing the enote type.

use crate::account::AddressSpendPubkey;
use crate::core_types::*;
use crate::domain_separators;
use crate::hash_functions::*;
use crate::math_utils::*;
use crate::transcript::*;

impl AmountBlindingKey {
    /// `k_a = H_n[s^ctx_sr](a, K^j_s, enote_type)`
    pub fn derive(
        s_sender_receiver: &SenderReceiverSecret,
        amount: Amount,
        address_spend_pubkey: &AddressSpendPubkey,
        enote_type: CarrotEnoteType,
    ) -> Self {
        let transcript = make_carrot_transcript!(domain_separators::AMOUNT_BLINDING_FACTOR,
            Amount : &amount, AddressSpendPubkey : address_spend_pubkey, u8 : &enote_type.to_byte());
        Self(derive_scalar(&transcript, s_sender_receiver.as_bytes()))
    }
}

impl AmountCommitment {
    /// `C_a = k_a G + a H`
    pub fn commit(amount: Amount, amount_blinding_factor: &AmountBlindingKey) -> Self {
        Self(commit(amount, amount_blinding_factor))
    }

    /// `C_a = G + a H`, how coinbase amounts are committed
    pub fn clear_commit(amount: Amount) -> Self {
        Self(zero_commit(amount))
    }
}

/// `(k^o_g, k^o_t)`, the sender's offset from `K^j_s` to `Ko`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SenderExtensions {
    pub g: OnetimeExtensionG,
    pub t: OnetimeExtensionT,
}

impl SenderExtensions {
    pub fn derive(s_sender_receiver: &SenderReceiverSecret, amount_commitment: &AmountCommitment) -> Self {
        let transcript_g = make_carrot_transcript!(domain_separators::ONETIME_EXTENSION_G,
            AmountCommitment : amount_commitment);
        let transcript_t = make_carrot_transcript!(domain_separators::ONETIME_EXTENSION_T,
            AmountCommitment : amount_commitment);
        Self {
            g: OnetimeExtensionG(derive_scalar(&transcript_g, s_sender_receiver.as_bytes())),
            t: OnetimeExtensionT(derive_scalar(&transcript_t, s_sender_receiver.as_bytes())),
        }
    }

    /// `K^o_ext = k^o_g G + k^o_t T`
    pub fn pubkey(&self) -> OnetimeExtension {
        OnetimeExtension(scalar_mul_gt(&self.g, &self.t))
    }

    /// `Ko = K^j_s + K^o_ext`
    pub fn extend(&self, address_spend_pubkey: &AddressSpendPubkey) -> Option<OutputPubkey> {
        add_edwards(address_spend_pubkey, &self.pubkey()).map(OutputPubkey)
    }

    /// `K^j_s = Ko - K^o_ext`
    pub fn strip(&self, onetime_address: &OutputPubkey) -> Option<AddressSpendPubkey> {
        sub_edwards(onetime_address, &self.pubkey()).map(AddressSpendPubkey)
    }
}

/// Returns `k_a'` if `C_a == k_a' G + a' H` for the nominal amount, spend pubkey and enote type
pub fn try_recompute_carrot_amount_commitment(
    s_sender_receiver: &SenderReceiverSecret,
    nominal_amount: Amount,
    nominal_address_spend_pubkey: &AddressSpendPubkey,
    nominal_enote_type: CarrotEnoteType,
    amount_commitment: &AmountCommitment,
) -> Option<AmountBlindingKey> {
    let amount_blinding_factor = AmountBlindingKey::derive(
        s_sender_receiver,
        nominal_amount,
        nominal_address_spend_pubkey,
        nominal_enote_type,
    );
    (&AmountCommitment::commit(nominal_amount, &amount_blinding_factor) == amount_commitment)
        .then_some(amount_blinding_factor)
}

/// Decrypts `a_enc` and opens `C_a` with it, trying a payment before a change enote
pub fn try_get_carrot_amount(
    s_sender_receiver: &SenderReceiverSecret,
    encrypted_amount: &EncryptedAmount,
    onetime_address: &OutputPubkey,
    address_spend_pubkey: &AddressSpendPubkey,
    amount_commitment: &AmountCommitment,
) -> Option<(Amount, AmountBlindingKey, CarrotEnoteType)> {
    let amount = encrypted_amount.decrypt(s_sender_receiver, onetime_address);

    [CarrotEnoteType::Payment, CarrotEnoteType::Change]
        .into_iter()
        .find_map(|enote_type| {
            let amount_blinding_factor = try_recompute_carrot_amount_commitment(
                s_sender_receiver,
                amount,
                address_spend_pubkey,
                enote_type,
                amount_commitment,
            )?;
            Some((amount, amount_blinding_factor, enote_type))
        })
}
