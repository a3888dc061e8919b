use carrot_crypto::account::*;
use carrot_crypto::legacy::*;
use carrot_crypto::opening::*;
use carrot_crypto::random::{new_random, Random};
use carrot_crypto::*;
use std::collections::HashMap;
use std::ops::Range;

/// Subaddress indices a [`MockKeys`] can look up; `(0, 0)` is the main address
pub const SUBADDRESS_TABLE_MAJOR: Range<u32> = 0..5;
pub const SUBADDRESS_TABLE_MINOR: Range<u32> = 0..20;

/// A wallet holding both a Carrot account and a cryptonote account, with a lookup table over the
/// first few subaddresses of each
pub struct MockKeys {
    pub carrot: AccountSecrets,

    pub legacy_k_spend: LegacySpendKey,
    pub legacy: CryptonoteAccountKeys,

    pub subaddress_map: HashMap<AddressSpendPubkey, SubaddressIndexExtended>,

    pub default_derive_type: AddressDeriveType,
}

impl MockKeys {
    pub fn main_address_spend_pubkey(&self, derive_type: Option<AddressDeriveType>) -> &AddressSpendPubkey {
        match self.resolve_derive_type(derive_type) {
            AddressDeriveType::Carrot => self.carrot.account_spend_pubkey(),
            AddressDeriveType::PreCarrot => &self.legacy.account_spend_pubkey,
        }
    }

    pub fn k_view_incoming(&self, derive_type: Option<AddressDeriveType>) -> &ViewIncomingKey {
        match self.resolve_derive_type(derive_type) {
            AddressDeriveType::Carrot => self.carrot.view_incoming_key(),
            AddressDeriveType::PreCarrot => &self.legacy.k_view_incoming,
        }
    }

    pub fn main_address(&self, derive_type: Option<AddressDeriveType>) -> CarrotDestinationV1 {
        self.subaddress(&SubaddressIndexExtended {
            index: SubaddressIndex::MAIN,
            derive_type: self.resolve_derive_type(derive_type),
        })
    }

    pub fn integrated_address(
        &self,
        payment_id: PaymentId,
        derive_type: Option<AddressDeriveType>,
    ) -> CarrotDestinationV1 {
        let main_address = self.main_address(derive_type);
        CarrotDestinationV1::make_integrated_address(
            main_address.address_spend_pubkey,
            main_address.address_view_pubkey,
            payment_id,
        )
    }

    pub fn subaddress(&self, subaddr_index: &SubaddressIndexExtended) -> CarrotDestinationV1 {
        let SubaddressIndex { major, minor } = subaddr_index.index;
        match subaddr_index.derive_type {
            AddressDeriveType::Carrot => self.carrot.make_destination(major, minor),
            AddressDeriveType::PreCarrot => self.legacy.make_destination(major, minor),
        }
        .expect("make_destination")
    }

    /// `(x^j, y^j)` such that `K^j_s = x^j G + y^j T`
    pub fn opening_for_subaddress(
        &self,
        subaddr_index: &SubaddressIndexExtended,
    ) -> (OpeningScalarSecret, OpeningScalarSecret) {
        let SubaddressIndex { major, minor } = subaddr_index.index;

        let (address_privkey_g, address_privkey_t) = match subaddr_index.derive_type {
            AddressDeriveType::Carrot => {
                let subaddress_scalar = if subaddr_index.index.is_subaddress() {
                    // s^j_gen = H_32[s_ga](j_major, j_minor)
                    let address_index_generator =
                        AddressIndexGeneratorSecret::derive(self.carrot.generate_address_secret(), major, minor);

                    // k^j_subscal = H_n[s^j_gen](K_s, K_v, j_major, j_minor)
                    SubaddressScalarSecret::derive(
                        self.carrot.account_spend_pubkey(),
                        self.carrot.account_view_pubkey(),
                        &address_index_generator,
                        major,
                        minor,
                    )
                } else {
                    SubaddressScalarSecret::one()
                };

                // x^j = k_gi k^j_subscal, y^j = k_ps k^j_subscal
                (
                    self.carrot.generate_image_key() * &subaddress_scalar,
                    self.carrot.prove_spend_key() * &subaddress_scalar,
                )
            }
            AddressDeriveType::PreCarrot => {
                let subaddress_extension =
                    LegacySubaddressExtension::derive(&self.legacy.k_view_incoming, major, minor);

                // x^j = k_s + k^j_subext, y^j = 0
                (&self.legacy_k_spend + &subaddress_extension, OpeningScalarSecret::zero())
            }
        };

        // sanity check against the address itself
        assert_eq!(
            AddressSpendPubkey::from(OpenedPoint::scalar_mul_gt(&address_privkey_g, &address_privkey_t)),
            self.subaddress(subaddr_index).address_spend_pubkey
        );

        (address_privkey_g, address_privkey_t)
    }

    pub fn can_open_fcmp_onetime_address(
        &self,
        address_spend_pubkey: &AddressSpendPubkey,
        sender_extension_g: &OnetimeExtensionG,
        sender_extension_t: &OnetimeExtensionT,
        onetime_address: &OutputPubkey,
    ) -> bool {
        let Some(subaddr_index) = self.subaddress_map.get(address_spend_pubkey) else {
            return false;
        };
        let (address_privkey_g, address_privkey_t) = self.opening_for_subaddress(subaddr_index);

        // x = x^j + k^o_g, y = y^j + k^o_t
        let x = &address_privkey_g + sender_extension_g;
        let y = &address_privkey_t + sender_extension_t;

        // O' = x G + y T
        &OutputPubkey::from(OpenedPoint::scalar_mul_gt(&x, &y)) == onetime_address
    }

    fn resolve_derive_type(&self, derive_type: Option<AddressDeriveType>) -> AddressDeriveType {
        derive_type.unwrap_or(self.default_derive_type)
    }

    fn from_secrets(
        carrot: AccountSecrets,
        legacy_k_spend: LegacySpendKey,
        default_derive_type: AddressDeriveType,
    ) -> Self {
        let legacy = CryptonoteAccountKeys::from_spend_key(&legacy_k_spend);

        let mut subaddress_map = HashMap::new();
        for major in SUBADDRESS_TABLE_MAJOR {
            for minor in SUBADDRESS_TABLE_MINOR {
                let carrot_spend_pubkey = carrot.make_destination(major, minor).unwrap().address_spend_pubkey;
                let legacy_spend_pubkey = legacy.make_destination(major, minor).unwrap().address_spend_pubkey;
                for (address_spend_pubkey, derive_type) in [
                    (carrot_spend_pubkey, AddressDeriveType::Carrot),
                    (legacy_spend_pubkey, AddressDeriveType::PreCarrot),
                ] {
                    subaddress_map.insert(
                        address_spend_pubkey,
                        SubaddressIndexExtended {
                            index: SubaddressIndex::new(major, minor),
                            derive_type,
                        },
                    );
                }
            }
        }

        Self {
            carrot,
            legacy_k_spend,
            legacy,
            subaddress_map,
            default_derive_type,
        }
    }
}

impl Random for MockKeys {
    type Params = AddressDeriveType;
    fn new_random_with_params<R: rand_core::CryptoRngCore + ?Sized>(rng: &mut R, p: Self::Params) -> Self {
        Self::from_secrets(new_random(rng), new_random(rng), p)
    }
}
