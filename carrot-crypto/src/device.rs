//! Capability traits over the account secrets.
//!
//! A wallet holds these instead of raw keys so that a hardware signer can keep the secret and
//! answer only the narrow queries below. The in-memory implementations live in `impls::device`.

use curve25519_dalek::{EdwardsPoint, MontgomeryPoint};

use crate::account::{AddressIndexGeneratorSecret, AddressSpendPubkey};
use crate::core_types::*;
use crate::legacy::LegacySubaddressExtension;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("device is not connected")]
    NotConnected,
    #[error("device requires a password")]
    PasswordNeeded,
    #[error("device was given a point that is not on the curve")]
    InvalidPoint,
}

pub type Result<T> = core::result::Result<T, Error>;

pub trait ViewIncomingKeyDevice {
    /// `k_v P`
    #[allow(non_snake_case)]
    fn view_key_scalar_mult_ed25519(&self, P: &EdwardsPoint) -> Result<EdwardsPoint>;

    /// `k_v D`
    #[allow(non_snake_case)]
    fn view_key_scalar_mult_x25519(&self, D: &MontgomeryPoint) -> Result<MontgomeryECDH>;

    /// `anchor_sp = H_16[k_v](D_e, input_context, Ko)`
    fn make_janus_anchor_special(
        &self,
        enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
        input_context: &InputContext,
        onetime_address: &OutputPubkey,
    ) -> Result<JanusAnchor>;
}

pub trait ViewBalanceSecretDevice {
    /// `vt = H_3[s_vb](input_context, Ko)`
    fn make_internal_view_tag(
        &self,
        input_context: &InputContext,
        onetime_address: &OutputPubkey,
    ) -> Result<ViewTag>;

    /// `s^ctx_sr = H_32[s_vb](D_e, input_context)`
    fn make_internal_sender_receiver_secret(
        &self,
        enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
        input_context: &InputContext,
    ) -> Result<SenderReceiverSecret>;
}

pub trait GenerateAddressSecretDevice {
    /// `s^j_gen = H_32[s_ga](j_major, j_minor)`
    fn make_index_extension_generator(
        &self,
        major_index: u32,
        minor_index: u32,
    ) -> Result<AddressIndexGeneratorSecret>;
}

/// Pre-Carrot account: `k_v` plus the cryptonote spend pubkey `K_s = k_s G`
pub trait CryptonoteHierarchyAddressDevice: ViewIncomingKeyDevice {
    fn get_cryptonote_account_spend_pubkey(&self) -> Result<AddressSpendPubkey>;

    /// `k^j_subext = ScalarDeriveLegacy("SubAddr" || 0 || k_v || j_major || j_minor)`, zero for the
    /// main address
    fn make_legacy_subaddress_extension(
        &self,
        major_index: u32,
        minor_index: u32,
    ) -> Result<LegacySubaddressExtension>;
}
