//! Pre-Carrot (cryptonote) derivations that Carrot wallets still need to open old outputs and to
//! pay legacy subaddresses.

use curve25519_dalek::{EdwardsPoint, Scalar};
use sha3::{Digest, Keccak256};

use crate::account::*;
use crate::destination::CarrotDestinationV1;
use crate::type_macros::*;

const SUBADDRESS_EXTENSION_PREFIX: &[u8; 8] = b"SubAddr\0";
const MAX_VARINT_BYTES: usize = 10;

define_tiny_scalar_type! {
    /// Cryptonote private spend key `k_s`
    LegacySpendKey
}
define_tiny_scalar_type! {
    /// `k^j_subext`, added to `k_s` for subaddress `j`
    LegacySubaddressExtension
}

/// `Hs(data) = Keccak256(data) mod l`
fn keccak_scalar(chunks: &[&[u8]]) -> Scalar {
    let mut hasher = Keccak256::new();
    for chunk in chunks {
        hasher.update(chunk);
    }
    Scalar::from_bytes_mod_order(hasher.finalize().into())
}

/// LEB128, at most 10 bytes for a u64
fn write_varint(mut n: u64, out: &mut [u8; MAX_VARINT_BYTES]) -> usize {
    let mut len = 0;
    while n > 127 {
        out[len] = 0x80 | (n as u8 & 0x7f);
        n >>= 7;
        len += 1;
    }
    out[len] = n as u8;
    len + 1
}

impl LegacySubaddressExtension {
    pub fn derive(k_view: &ViewIncomingKey, major_index: u32, minor_index: u32) -> Self {
        if major_index == 0 && minor_index == 0 {
            return Self::default();
        }

        // k^j_subext = Hs("SubAddr" || IntToBytes8(0) || k_v || IntToBytes32(j_major) || IntToBytes32(j_minor))
        Self(keccak_scalar(&[
            SUBADDRESS_EXTENSION_PREFIX,
            k_view.as_bytes(),
            &major_index.to_le_bytes(),
            &minor_index.to_le_bytes(),
        ]))
    }
}

impl LegacySpendKey {
    pub fn make_view_key(&self) -> ViewIncomingKey {
        // k_v = Hs(k_s)
        ViewIncomingKey::from_scalar(keccak_scalar(&[self.as_bytes()]))
    }

    pub fn make_account_spend_pubkey(&self) -> AddressSpendPubkey {
        // K_s = k_s G
        AddressSpendPubkey::from_point(&EdwardsPoint::mul_base(self.as_scalar_ref()))
    }
}

/// View-incoming key and spend pubkey of a cryptonote account, the in-memory
/// [`CryptonoteHierarchyAddressDevice`](crate::device::CryptonoteHierarchyAddressDevice)
#[derive(Clone, Debug)]
pub struct CryptonoteAccountKeys {
    pub k_view_incoming: ViewIncomingKey,
    pub account_spend_pubkey: AddressSpendPubkey,
}

impl CryptonoteAccountKeys {
    pub fn from_spend_key(k_spend: &LegacySpendKey) -> Self {
        Self {
            k_view_incoming: k_spend.make_view_key(),
            account_spend_pubkey: k_spend.make_account_spend_pubkey(),
        }
    }

    pub fn make_destination(&self, major_index: u32, minor_index: u32) -> Option<CarrotDestinationV1> {
        make_legacy_destination(&self.k_view_incoming, &self.account_spend_pubkey, major_index, minor_index)
    }
}

/// Cryptonote main address for `(0, 0)`, otherwise `K^j_s = K_s + k^j_subext G` and
/// `K^j_v = k_v K^j_s`
pub fn make_legacy_destination(
    k_view: &ViewIncomingKey,
    account_spend_pubkey: &AddressSpendPubkey,
    major_index: u32,
    minor_index: u32,
) -> Option<CarrotDestinationV1> {
    if major_index == 0 && minor_index == 0 {
        return Some(CarrotDestinationV1::make_main_address(
            account_spend_pubkey.clone(),
            AddressViewPubkey::derive_primary_address_view_pubkey(k_view),
        ));
    }

    let subaddress_extension = LegacySubaddressExtension::derive(k_view, major_index, minor_index);
    let address_spend_point = account_spend_pubkey.decompress()?
        + EdwardsPoint::mul_base(subaddress_extension.as_scalar_ref());
    let address_view_point = k_view.as_scalar_ref() * address_spend_point;

    Some(CarrotDestinationV1 {
        address_spend_pubkey: AddressSpendPubkey::from_point(&address_spend_point),
        address_view_pubkey: AddressViewPubkey::from_point(&address_view_point),
        is_subaddress: true,
        payment_id: Default::default(),
    })
}

/// `Hs(8 k_v R || varint(output_index))`, given `k_v R` from the view-incoming device
pub fn make_legacy_onetime_extension(kv_r: &EdwardsPoint, local_output_index: u64) -> Scalar {
    let derivation = kv_r.mul_by_cofactor().compress();
    let mut varint = [0u8; MAX_VARINT_BYTES];
    let varint_len = write_varint(local_output_index, &mut varint);
    keccak_scalar(&[derivation.as_bytes(), &varint[..varint_len]])
}
