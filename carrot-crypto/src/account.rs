//! The Carrot account key hierarchy and the account-level public keys.
//!
//! ```text
//! s_m ─┬─ k_ps
//!      └─ s_vb ─┬─ k_gi
//!               ├─ k_v
//!               └─ s_ga ── s^j_gen ── k^j_subscal
//! ```
//!
//! Every arrow is a keyed hash, so no secret can be recovered from one further down the tree.

use crate::destination::CarrotDestinationV1;
use crate::domain_separators;
use crate::hash_functions::*;
use crate::math_utils::*;
use crate::transcript::*;
use crate::type_macros::*;

define_tiny_byte_type! {
    /// Root secret `s_m` of an account
    MasterSecret, 32, secret
}
define_tiny_scalar_type! {
    /// `k_ps`, the `T` component of every spend key of the account
    ProveSpendKey
}
define_tiny_byte_type! {
    /// `s_vb`, enough to find and open every enote of the account including internal ones
    ViewBalanceSecret, 32, secret
}
define_tiny_scalar_type! {
    /// `k_gi`, the `G` component of every spend key of the account
    GenerateImageKey
}
define_tiny_scalar_type! {
    /// `k_v`, enough to find external enotes
    ViewIncomingKey
}
define_tiny_byte_type! {
    /// `s_ga`, enough to derive every subaddress
    GenerateAddressSecret, 32, secret
}
define_tiny_byte_type! {
    /// `s^j_gen`, per-index key for the subaddress scalar
    AddressIndexGeneratorSecret, 32, secret
}
define_tiny_scalar_type! {
    /// `k^j_subscal`, multiplies both account pubkeys into subaddress pubkeys
    SubaddressScalarSecret
}

define_tiny_edwards_type! {
    /// `K^j_s`, spend pubkey of an address; the account spend pubkey `K_s` for the main address
    AddressSpendPubkey
}
define_tiny_edwards_type! {
    /// `K^j_v`, view pubkey of an address
    AddressViewPubkey
}

impl ProveSpendKey {
    pub fn derive(s_master: &MasterSecret) -> Self {
        // k_ps = H_n[s_m]()
        let transcript = make_carrot_transcript!(domain_separators::PROVE_SPEND_KEY,);
        Self(derive_scalar(&transcript, s_master.as_bytes()))
    }
}

impl ViewBalanceSecret {
    pub fn derive(s_master: &MasterSecret) -> Self {
        // s_vb = H_32[s_m]()
        let transcript = make_carrot_transcript!(domain_separators::VIEW_BALANCE_SECRET,);
        Self(derive_bytes_32(&transcript, s_master.as_bytes()))
    }
}

impl GenerateImageKey {
    pub fn derive(s_view_balance: &ViewBalanceSecret) -> Self {
        // k_gi = H_n[s_vb]()
        let transcript = make_carrot_transcript!(domain_separators::GENERATE_IMAGE_KEY,);
        Self(derive_scalar(&transcript, s_view_balance.as_bytes()))
    }
}

impl ViewIncomingKey {
    pub fn derive(s_view_balance: &ViewBalanceSecret) -> Self {
        // k_v = H_n[s_vb]()
        let transcript = make_carrot_transcript!(domain_separators::INCOMING_VIEW_KEY,);
        Self(derive_scalar(&transcript, s_view_balance.as_bytes()))
    }
}

impl GenerateAddressSecret {
    pub fn derive(s_view_balance: &ViewBalanceSecret) -> Self {
        // s_ga = H_32[s_vb]()
        let transcript = make_carrot_transcript!(domain_separators::GENERATE_ADDRESS_SECRET,);
        Self(derive_bytes_32(&transcript, s_view_balance.as_bytes()))
    }
}

impl AddressIndexGeneratorSecret {
    pub fn derive(s_generate_address: &GenerateAddressSecret, j_major: u32, j_minor: u32) -> Self {
        // s^j_gen = H_32[s_ga](j_major, j_minor)
        let transcript = make_carrot_transcript!(domain_separators::ADDRESS_INDEX_GEN,
            u32 : &j_major, u32 : &j_minor);
        Self(derive_bytes_32(&transcript, s_generate_address.as_bytes()))
    }
}

impl SubaddressScalarSecret {
    pub fn derive(
        account_spend_pubkey: &AddressSpendPubkey,
        account_view_pubkey: &AddressViewPubkey,
        s_address_generator: &AddressIndexGeneratorSecret,
        j_major: u32,
        j_minor: u32,
    ) -> Self {
        // k^j_subscal = H_n[s^j_gen](K_s, K_v, j_major, j_minor)
        let transcript = make_carrot_transcript!(domain_separators::SUBADDRESS_SCALAR,
            AddressSpendPubkey : account_spend_pubkey, AddressViewPubkey : account_view_pubkey,
            u32 : &j_major, u32 : &j_minor);
        Self(derive_scalar(&transcript, s_address_generator.as_bytes()))
    }

    /// The subaddress scalar of the main address
    pub fn one() -> Self {
        Self(Scalar::ONE)
    }
}

impl AddressSpendPubkey {
    pub fn derive_carrot_account_spend_pubkey(
        k_generate_image: &GenerateImageKey,
        k_prove_spend: &ProveSpendKey,
    ) -> Self {
        // K_s = k_gi G + k_ps T
        Self(scalar_mul_gt(k_generate_image, k_prove_spend))
    }

    pub fn derive_subaddress_spend_pubkey(
        subaddress_scalar: &SubaddressScalarSecret,
        account_spend_pubkey: &AddressSpendPubkey,
    ) -> Option<Self> {
        // K^j_s = k^j_subscal K_s
        Some(Self(scalar_mul_key_vartime(subaddress_scalar, account_spend_pubkey)?))
    }
}

impl AddressViewPubkey {
    pub fn derive_carrot_account_view_pubkey(
        k_view: &ViewIncomingKey,
        account_spend_pubkey: &AddressSpendPubkey,
    ) -> Option<Self> {
        // K_v = k_v K_s
        Some(Self(scalar_mul_key_vartime(k_view, account_spend_pubkey)?))
    }

    pub fn derive_primary_address_view_pubkey(k_view: &ViewIncomingKey) -> Self {
        // K^0_v = k_v G
        Self(scalar_mul_base(k_view))
    }

    pub fn derive_subaddress_view_pubkey(
        subaddress_scalar: &SubaddressScalarSecret,
        account_view_pubkey: &AddressViewPubkey,
    ) -> Option<Self> {
        // K^j_v = k^j_subscal K_v
        Some(Self(scalar_mul_key_vartime(subaddress_scalar, account_view_pubkey)?))
    }
}

/// The whole secret hierarchy of one account, plus its public keys.
///
/// Implements every device trait through its fields, so it can stand in for a hot wallet.
#[derive(Clone)]
pub struct AccountSecrets {
    s_master: MasterSecret,
    k_prove_spend: ProveSpendKey,
    s_view_balance: ViewBalanceSecret,
    k_generate_image: GenerateImageKey,
    k_view_incoming: ViewIncomingKey,
    s_generate_address: GenerateAddressSecret,

    account_spend_pubkey: AddressSpendPubkey,
    account_view_pubkey: AddressViewPubkey,
    primary_address_view_pubkey: AddressViewPubkey,
}

impl AccountSecrets {
    pub fn from_master_secret(s_master: MasterSecret) -> Self {
        let k_prove_spend = ProveSpendKey::derive(&s_master);
        let s_view_balance = ViewBalanceSecret::derive(&s_master);
        let k_generate_image = GenerateImageKey::derive(&s_view_balance);
        let k_view_incoming = ViewIncomingKey::derive(&s_view_balance);
        let s_generate_address = GenerateAddressSecret::derive(&s_view_balance);

        // K_s = k_gi G + k_ps T, kept uncompressed for K_v
        let spend_point = gt_point(k_generate_image.as_scalar_ref(), k_prove_spend.as_scalar_ref());
        let account_spend_pubkey = AddressSpendPubkey::from_point(&spend_point);
        let account_view_pubkey =
            AddressViewPubkey::from_point(&(k_view_incoming.as_scalar_ref() * spend_point));
        let primary_address_view_pubkey =
            AddressViewPubkey::derive_primary_address_view_pubkey(&k_view_incoming);

        Self {
            s_master,
            k_prove_spend,
            s_view_balance,
            k_generate_image,
            k_view_incoming,
            s_generate_address,
            account_spend_pubkey,
            account_view_pubkey,
            primary_address_view_pubkey,
        }
    }

    pub fn master_secret(&self) -> &MasterSecret {
        &self.s_master
    }

    pub fn prove_spend_key(&self) -> &ProveSpendKey {
        &self.k_prove_spend
    }

    pub fn view_balance_secret(&self) -> &ViewBalanceSecret {
        &self.s_view_balance
    }

    pub fn generate_image_key(&self) -> &GenerateImageKey {
        &self.k_generate_image
    }

    pub fn view_incoming_key(&self) -> &ViewIncomingKey {
        &self.k_view_incoming
    }

    pub fn generate_address_secret(&self) -> &GenerateAddressSecret {
        &self.s_generate_address
    }

    pub fn account_spend_pubkey(&self) -> &AddressSpendPubkey {
        &self.account_spend_pubkey
    }

    pub fn account_view_pubkey(&self) -> &AddressViewPubkey {
        &self.account_view_pubkey
    }

    pub fn primary_address_view_pubkey(&self) -> &AddressViewPubkey {
        &self.primary_address_view_pubkey
    }

    /// Main address for `(0, 0)`, subaddress otherwise. `None` only if a subaddress pubkey fails to
    /// decompress.
    pub fn make_destination(&self, j_major: u32, j_minor: u32) -> Option<CarrotDestinationV1> {
        if j_major == 0 && j_minor == 0 {
            Some(CarrotDestinationV1::make_main_address(
                self.account_spend_pubkey.clone(),
                self.primary_address_view_pubkey.clone(),
            ))
        } else {
            CarrotDestinationV1::make_subaddress(
                &self.account_spend_pubkey,
                &self.account_view_pubkey,
                &self.s_generate_address,
                j_major,
                j_minor,
            )
        }
    }
}

impl Random for AccountSecrets {
    type Params = ();
    fn new_random_with_params<R: rand_core::CryptoRngCore + ?Sized>(rng: &mut R, _: ()) -> Self {
        Self::from_master_secret(MasterSecret::new_random_with_params(rng, ()))
    }
}
