use crate::account::*;
use crate::core_types::*;
use crate::random::Random;

/// `(j_major, j_minor)`; `(0, 0)` is the main address
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SubaddressIndex {
    pub major: u32,
    pub minor: u32,
}

impl SubaddressIndex {
    pub const MAIN: Self = Self { major: 0, minor: 0 };

    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub fn is_subaddress(&self) -> bool {
        self.major != 0 || self.minor != 0
    }
}

/// Which hierarchy an address was derived under
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressDeriveType {
    Carrot,
    /// Cryptonote main address plus legacy subaddress extensions
    PreCarrot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubaddressIndexExtended {
    pub index: SubaddressIndex,
    pub derive_type: AddressDeriveType,
}

/// A payable address. Main and integrated addresses carry the account spend pubkey and `K^0_v`;
/// subaddresses carry both account pubkeys scaled by `k^j_subscal`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CarrotDestinationV1 {
    pub address_spend_pubkey: AddressSpendPubkey,
    pub address_view_pubkey: AddressViewPubkey,
    pub is_subaddress: bool,
    pub payment_id: PaymentId,
}

impl CarrotDestinationV1 {
    pub fn make_main_address(
        account_spend_pubkey: AddressSpendPubkey,
        primary_address_view_pubkey: AddressViewPubkey,
    ) -> Self {
        Self {
            address_spend_pubkey: account_spend_pubkey,
            address_view_pubkey: primary_address_view_pubkey,
            is_subaddress: false,
            payment_id: NULL_PAYMENT_ID,
        }
    }

    /// Returns `None` if either account pubkey fails to decompress.
    ///
    /// # Panics
    ///
    /// If `(major_index, minor_index)` is `(0, 0)`; use [`Self::make_main_address`] instead.
    pub fn make_subaddress<G: crate::device::GenerateAddressSecretDevice>(
        account_spend_pubkey: &AddressSpendPubkey,
        account_view_pubkey: &AddressViewPubkey,
        s_generate_address_dev: &G,
        major_index: u32,
        minor_index: u32,
    ) -> Option<Self> {
        assert!(
            major_index != 0 || minor_index != 0,
            "subaddress index (0, 0) is the main address"
        );

        // s^j_gen = H_32[s_ga](j_major, j_minor)
        let address_index_generator = s_generate_address_dev
            .make_index_extension_generator(major_index, minor_index)
            .ok()?;

        // k^j_subscal = H_n[s^j_gen](K_s, K_v, j_major, j_minor)
        let subaddress_scalar = SubaddressScalarSecret::derive(
            account_spend_pubkey,
            account_view_pubkey,
            &address_index_generator,
            major_index,
            minor_index,
        );

        // K^j_s = k^j_subscal K_s
        let address_spend_pubkey =
            AddressSpendPubkey::derive_subaddress_spend_pubkey(&subaddress_scalar, account_spend_pubkey)?;

        // K^j_v = k^j_subscal K_v
        let address_view_pubkey =
            AddressViewPubkey::derive_subaddress_view_pubkey(&subaddress_scalar, account_view_pubkey)?;

        Some(Self {
            address_spend_pubkey,
            address_view_pubkey,
            is_subaddress: true,
            payment_id: NULL_PAYMENT_ID,
        })
    }

    pub fn make_integrated_address(
        account_spend_pubkey: AddressSpendPubkey,
        primary_address_view_pubkey: AddressViewPubkey,
        payment_id: PaymentId,
    ) -> Self {
        Self {
            payment_id,
            ..Self::make_main_address(account_spend_pubkey, primary_address_view_pubkey)
        }
    }

    pub fn is_integrated(&self) -> bool {
        self.payment_id != NULL_PAYMENT_ID
    }
}

/// Params: `(is_subaddress, is_integrated)`. Used for dummy outputs, the keys have no known owner.
impl Random for CarrotDestinationV1 {
    type Params = (bool, bool);
    fn new_random_with_params<R: rand_core::CryptoRngCore + ?Sized>(
        rng: &mut R,
        (is_subaddress, is_integrated): Self::Params,
    ) -> Self {
        Self {
            address_spend_pubkey: AddressSpendPubkey::new_random_with_params(rng, ()),
            address_view_pubkey: AddressViewPubkey::new_random_with_params(rng, ()),
            is_subaddress,
            payment_id: if is_integrated {
                PaymentId::new_random_with_params(rng, ())
            } else {
                NULL_PAYMENT_ID
            },
        }
    }
}
