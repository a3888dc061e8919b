use curve25519_dalek::{EdwardsPoint, MontgomeryPoint};

use crate::account::*;
use crate::as_crypto::AsScalar;
use crate::core_types::*;
use crate::device::*;
use crate::legacy::{CryptonoteAccountKeys, LegacySubaddressExtension};

impl ViewIncomingKeyDevice for ViewIncomingKey {
    #[allow(non_snake_case)]
    fn view_key_scalar_mult_ed25519(&self, P: &EdwardsPoint) -> Result<EdwardsPoint> {
        Ok(self.as_scalar_ref() * P)
    }

    #[allow(non_snake_case)]
    fn view_key_scalar_mult_x25519(&self, D: &MontgomeryPoint) -> Result<MontgomeryECDH> {
        // s_sr = k_v D
        Ok(self.exchange(&EnoteEphemeralPubkey(*D)))
    }

    fn make_janus_anchor_special(
        &self,
        enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
        input_context: &InputContext,
        onetime_address: &OutputPubkey,
    ) -> Result<JanusAnchor> {
        Ok(JanusAnchor::derive_special(enote_ephemeral_pubkey, input_context, onetime_address, self))
    }
}

impl ViewBalanceSecretDevice for ViewBalanceSecret {
    fn make_internal_view_tag(
        &self,
        input_context: &InputContext,
        onetime_address: &OutputPubkey,
    ) -> Result<ViewTag> {
        Ok(ViewTag::derive_keyed(self.as_bytes(), input_context, onetime_address))
    }

    fn make_internal_sender_receiver_secret(
        &self,
        enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
        input_context: &InputContext,
    ) -> Result<SenderReceiverSecret> {
        Ok(SenderReceiverSecret::derive_keyed(self.as_bytes(), enote_ephemeral_pubkey, input_context))
    }
}

impl GenerateAddressSecretDevice for GenerateAddressSecret {
    fn make_index_extension_generator(
        &self,
        major_index: u32,
        minor_index: u32,
    ) -> Result<AddressIndexGeneratorSecret> {
        Ok(AddressIndexGeneratorSecret::derive(self, major_index, minor_index))
    }
}

// An account answers every Carrot query from its own fields.

impl ViewIncomingKeyDevice for AccountSecrets {
    #[allow(non_snake_case)]
    fn view_key_scalar_mult_ed25519(&self, P: &EdwardsPoint) -> Result<EdwardsPoint> {
        self.view_incoming_key().view_key_scalar_mult_ed25519(P)
    }

    #[allow(non_snake_case)]
    fn view_key_scalar_mult_x25519(&self, D: &MontgomeryPoint) -> Result<MontgomeryECDH> {
        self.view_incoming_key().view_key_scalar_mult_x25519(D)
    }

    fn make_janus_anchor_special(
        &self,
        enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
        input_context: &InputContext,
        onetime_address: &OutputPubkey,
    ) -> Result<JanusAnchor> {
        self.view_incoming_key()
            .make_janus_anchor_special(enote_ephemeral_pubkey, input_context, onetime_address)
    }
}

impl ViewBalanceSecretDevice for AccountSecrets {
    fn make_internal_view_tag(
        &self,
        input_context: &InputContext,
        onetime_address: &OutputPubkey,
    ) -> Result<ViewTag> {
        self.view_balance_secret().make_internal_view_tag(input_context, onetime_address)
    }

    fn make_internal_sender_receiver_secret(
        &self,
        enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
        input_context: &InputContext,
    ) -> Result<SenderReceiverSecret> {
        self.view_balance_secret()
            .make_internal_sender_receiver_secret(enote_ephemeral_pubkey, input_context)
    }
}

impl GenerateAddressSecretDevice for AccountSecrets {
    fn make_index_extension_generator(
        &self,
        major_index: u32,
        minor_index: u32,
    ) -> Result<AddressIndexGeneratorSecret> {
        self.generate_address_secret().make_index_extension_generator(major_index, minor_index)
    }
}

impl ViewIncomingKeyDevice for CryptonoteAccountKeys {
    #[allow(non_snake_case)]
    fn view_key_scalar_mult_ed25519(&self, P: &EdwardsPoint) -> Result<EdwardsPoint> {
        self.k_view_incoming.view_key_scalar_mult_ed25519(P)
    }

    #[allow(non_snake_case)]
    fn view_key_scalar_mult_x25519(&self, D: &MontgomeryPoint) -> Result<MontgomeryECDH> {
        self.k_view_incoming.view_key_scalar_mult_x25519(D)
    }

    fn make_janus_anchor_special(
        &self,
        enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
        input_context: &InputContext,
        onetime_address: &OutputPubkey,
    ) -> Result<JanusAnchor> {
        self.k_view_incoming
            .make_janus_anchor_special(enote_ephemeral_pubkey, input_context, onetime_address)
    }
}

impl CryptonoteHierarchyAddressDevice for CryptonoteAccountKeys {
    fn get_cryptonote_account_spend_pubkey(&self) -> Result<AddressSpendPubkey> {
        Ok(self.account_spend_pubkey.clone())
    }

    fn make_legacy_subaddress_extension(
        &self,
        major_index: u32,
        minor_index: u32,
    ) -> Result<LegacySubaddressExtension> {
        Ok(LegacySubaddressExtension::derive(&self.k_view_incoming, major_index, minor_index))
    }
}
