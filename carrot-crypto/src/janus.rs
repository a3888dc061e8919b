//! Janus anchors: the checks that stop a sender from probing which addresses share an account.
//!
//! A normal enote carries the sender's randomness `anchor_norm`, from which the receiver must be
//! able to rebuild `D_e`. A special (self-send) enote carries `anchor_sp`, which only the holder of
//! `k_v` can compute. Internal enotes are keyed by `s_vb` and need neither.

use log::debug;

use crate::account::{AddressSpendPubkey, ViewIncomingKey};
use crate::core_types::*;
use crate::device::ViewIncomingKeyDevice;
use crate::domain_separators;
use crate::ecdh::EnoteEphemeralKeypair;
use crate::hash_functions::*;
use crate::transcript::*;

impl JanusAnchor {
    /// Fresh `anchor_norm` for a normal enote
    pub fn new_randomness<R>(rng: &mut R) -> Self
    where
        R: rand_core::CryptoRngCore + ?Sized,
    {
        let mut anchor = [0u8; crate::consts::JANUS_ANCHOR_BYTES];
        rng.fill_bytes(&mut anchor);
        Self(anchor)
    }

    /// `anchor_sp = H_16[k_v](D_e, input_context, Ko)`
    pub fn derive_special(
        enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
        input_context: &InputContext,
        onetime_address: &OutputPubkey,
        k_view: &ViewIncomingKey,
    ) -> Self {
        let transcript = make_carrot_transcript!(domain_separators::JANUS_ANCHOR_SPECIAL,
            EnoteEphemeralPubkey : enote_ephemeral_pubkey, InputContext : input_context,
            OutputPubkey : onetime_address);
        Self(derive_bytes_16(&transcript, k_view.as_bytes()))
    }
}

/// Rebuilds `D_e' = d_e' B` or `d_e' K^j_s` from `anchor_norm'` and checks `D_e' == D_e`
pub fn verify_carrot_normal_janus_protection(
    nominal_anchor: &JanusAnchor,
    input_context: &InputContext,
    nominal_address_spend_pubkey: &AddressSpendPubkey,
    is_subaddress: bool,
    nominal_payment_id: &PaymentId,
    enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
) -> bool {
    EnoteEphemeralKeypair::derive(
        nominal_anchor,
        input_context,
        nominal_address_spend_pubkey,
        is_subaddress,
        nominal_payment_id,
    )
    .is_some_and(|nominal| &nominal.pubkey == enote_ephemeral_pubkey)
}

/// Normal Janus check that also settles the payment ID.
///
/// A sender that paid a plain address never knew a payment ID, so the decrypted `pid'` is noise.
/// If the check fails under `pid'` it is retried under the null payment ID, and on that success
/// `nominal_payment_id` is overwritten with null.
pub fn verify_carrot_normal_janus_protection_and_confirm_pid(
    nominal_anchor: &JanusAnchor,
    input_context: &InputContext,
    nominal_address_spend_pubkey: &AddressSpendPubkey,
    is_subaddress: bool,
    enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
    nominal_payment_id: &mut PaymentId,
) -> bool {
    if verify_carrot_normal_janus_protection(
        nominal_anchor,
        input_context,
        nominal_address_spend_pubkey,
        is_subaddress,
        nominal_payment_id,
        enote_ephemeral_pubkey,
    ) {
        return true;
    }

    if verify_carrot_normal_janus_protection(
        nominal_anchor,
        input_context,
        nominal_address_spend_pubkey,
        is_subaddress,
        &NULL_PAYMENT_ID,
        enote_ephemeral_pubkey,
    ) {
        *nominal_payment_id = NULL_PAYMENT_ID;
        return true;
    }

    false
}

/// Recomputes `anchor_sp` through the view-incoming device and compares it to the decrypted anchor
pub fn verify_carrot_special_janus_protection<V: ViewIncomingKeyDevice + ?Sized>(
    input_context: &InputContext,
    enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
    onetime_address: &OutputPubkey,
    k_view_dev: &V,
    nominal_anchor: &JanusAnchor,
) -> bool {
    match k_view_dev.make_janus_anchor_special(enote_ephemeral_pubkey, input_context, onetime_address) {
        Ok(expected_special_anchor) if &expected_special_anchor == nominal_anchor => true,
        Ok(_) => {
            debug!("special janus check failed for Ko {:?}", onetime_address);
            false
        }
        Err(e) => {
            debug!("view-incoming device refused special anchor: {}", e);
            false
        }
    }
}
