//! The enote key exchange, seen from both ends.
//!
//! A sender turns `anchor_norm` and the destination into an ephemeral keypair and publishes `D_e`.
//! Both ends then arrive at the same X25519 point:
//!
//! ```text
//! sender:   s_sr = d_e ConvertPointE(K^j_v)
//! receiver: s_sr = k_v D_e
//! ```
//!
//! `s_sr` keys the view tag as is. Everything past the view tag is keyed by `s^ctx_sr`, which also
//! binds `D_e` and the input context. Internal enotes have no exchange and key the same two hashes
//! with `s_vb`, hence the `*_keyed` forms.

use crate::account::*;
use crate::core_types::*;
use crate::destination::CarrotDestinationV1;
use crate::domain_separators;
use crate::hash_functions::*;
use crate::math_utils::*;
use crate::transcript::*;
use crate::type_macros::*;

impl EnoteEphemeralKey {
    /// `d_e = H_n(anchor_norm, input_context, K^j_s, pid)`
    pub fn derive(
        anchor_norm: &JanusAnchor,
        input_context: &InputContext,
        address_spend_pubkey: &AddressSpendPubkey,
        payment_id: &PaymentId,
    ) -> Self {
        let transcript = make_carrot_transcript!(domain_separators::EPHEMERAL_PRIVKEY,
            JanusAnchor : anchor_norm, InputContext : input_context,
            AddressSpendPubkey : address_spend_pubkey, PaymentId : payment_id);
        Self(derive_scalar(&transcript, &[]))
    }

    /// `D_e`: `d_e B` for a main address, `ConvertPointE(d_e K^j_s)` for a subaddress. Only the
    /// subaddress form reads `K^j_s`, and fails if it does not decompress.
    pub fn public_key_for(
        &self,
        address_spend_pubkey: &AddressSpendPubkey,
        is_subaddress: bool,
    ) -> Option<EnoteEphemeralPubkey> {
        if !is_subaddress {
            return Some(EnoteEphemeralPubkey(scalar_mul_base_montgomery(self)));
        }
        let ephemeral_edwards = scalar_mul_key_vartime(self, address_spend_pubkey)?;
        convert_to_montgomery_vartime(&ephemeral_edwards).map(EnoteEphemeralPubkey)
    }

    /// Sender half: `s_sr = d_e ConvertPointE(K^j_v)`.
    ///
    /// `None` unless `K^j_v` lies in the prime order subgroup, so a recipient cannot learn `d_e`
    /// modulo a small cofactor.
    pub fn exchange(&self, address_view_pubkey: &AddressViewPubkey) -> Option<MontgomeryECDH> {
        if is_invalid_or_has_torsion(address_view_pubkey) {
            return None;
        }
        let view_montgomery = convert_to_montgomery_vartime(address_view_pubkey)?;
        Some(MontgomeryECDH(self.as_scalar_ref() * view_montgomery))
    }
}

impl ViewIncomingKey {
    /// Receiver half: `s_sr = k_v D_e`
    pub fn exchange(&self, enote_ephemeral_pubkey: &EnoteEphemeralPubkey) -> MontgomeryECDH {
        MontgomeryECDH(self.as_scalar_ref() * enote_ephemeral_pubkey.as_montgomery_ref())
    }
}

/// `d_e` with the `D_e` it publishes for one destination
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnoteEphemeralKeypair {
    pub privkey: EnoteEphemeralKey,
    pub pubkey: EnoteEphemeralPubkey,
}

impl EnoteEphemeralKeypair {
    /// Keypair a normal enote to `(K^j_s, is_subaddress, pid)` must use under `input_context`
    pub fn derive(
        anchor_norm: &JanusAnchor,
        input_context: &InputContext,
        address_spend_pubkey: &AddressSpendPubkey,
        is_subaddress: bool,
        payment_id: &PaymentId,
    ) -> Option<Self> {
        let privkey = EnoteEphemeralKey::derive(anchor_norm, input_context, address_spend_pubkey, payment_id);
        let pubkey = privkey.public_key_for(address_spend_pubkey, is_subaddress)?;
        Some(Self { privkey, pubkey })
    }

    pub fn for_destination(
        anchor_norm: &JanusAnchor,
        input_context: &InputContext,
        destination: &CarrotDestinationV1,
    ) -> Option<Self> {
        Self::derive(
            anchor_norm,
            input_context,
            &destination.address_spend_pubkey,
            destination.is_subaddress,
            &destination.payment_id,
        )
    }
}

impl MontgomeryECDH {
    /// `s^ctx_sr = H_32[s_sr](D_e, input_context)`
    pub fn contextualize(
        &self,
        enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
        input_context: &InputContext,
    ) -> SenderReceiverSecret {
        SenderReceiverSecret::derive_keyed(self.as_bytes(), enote_ephemeral_pubkey, input_context)
    }

    /// `vt = H_3[s_sr](input_context, Ko)`
    pub fn view_tag(&self, input_context: &InputContext, onetime_address: &OutputPubkey) -> ViewTag {
        ViewTag::derive_keyed(self.as_bytes(), input_context, onetime_address)
    }
}

impl SenderReceiverSecret {
    pub fn derive_keyed(
        key: &[u8; 32],
        enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
        input_context: &InputContext,
    ) -> Self {
        let transcript = make_carrot_transcript!(domain_separators::SENDER_RECEIVER_SECRET,
            EnoteEphemeralPubkey : enote_ephemeral_pubkey, InputContext : input_context);
        Self(derive_bytes_32(&transcript, key))
    }
}

impl ViewTag {
    pub fn derive_keyed(key: &[u8; 32], input_context: &InputContext, onetime_address: &OutputPubkey) -> Self {
        let transcript = make_carrot_transcript!(domain_separators::VIEW_TAG,
            InputContext : input_context, OutputPubkey : onetime_address);
        Self(derive_bytes_3(&transcript, key))
    }
}
