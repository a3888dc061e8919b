use curve25519_dalek::{edwards::CompressedEdwardsY, EdwardsPoint};
use generic_array::GenericArray;
pub use hex_literal::hex;

use crate::as_crypto::AsEdwardsPoint;
use crate::core_types::*;
use crate::fcmp::*;
use crate::generators;
use crate::hash_functions::{derive_bytes_32, derive_scalar};
use crate::math_utils::scalar_mul_gt;
use crate::opening::OpeningScalarSecret;
use crate::transcript::FromTranscriptBytes;
pub use crate::transcript::ToTranscriptBytes;

/// Decodes a value from its transcript encoding, panicking on a non-canonical encoding
pub fn transcript_bytes_into<T: FromTranscriptBytes>(bytes: &[u8]) -> T {
    T::from_transcript_bytes(GenericArray::clone_from_slice(bytes))
        .expect("from_transcript_bytes()")
}

macro_rules! assert_eq_hex {
    ($($exphex:literal)*, $e:expr) => {
        assert_eq!(hex!($($exphex)*).as_slice(), ($e).to_transcript_bytes().as_slice());
    };
}

macro_rules! hex_into {
    ($($hex:literal)*) => {
        transcript_bytes_into(&hex!($($hex)*))
    };
}

pub(crate) use assert_eq_hex;
pub(crate) use hex_into;

/// Asserts that `value` encodes to `expected`
pub fn assert_encodes_to<T: ToTranscriptBytes>(expected: &[u8], value: &T) {
    assert_eq!(expected, value.to_transcript_bytes().as_slice());
}

/// Known-answer values for one account's key hierarchy and for one enote sent to an address.
///
/// `D_e` and `s_sr` are built from `EPHEMERAL_PRIVKEY_FIXED` rather than the derived
/// `EPHEMERAL_PRIVKEY`, so the ECDH vectors and the hash vectors can be checked independently.
pub mod fixture {
    use super::hex;

    pub const MASTER_SECRET: [u8; 32] = hex!("6e02e67b303dc713276bb1a4d70b0083b78e4f50e34e209da9f0377cdc3d376e");
    pub const PROVE_SPEND_KEY: [u8; 32] = hex!("f10bf01839ea216e5d70b7c9ceaa8b8e9a432b5e98e6e48a8043ffb3fa229f0b");
    pub const VIEW_BALANCE_SECRET: [u8; 32] = hex!("154c5e01902b20acc8436c9aa06b40355d78dfda0fc6af3d53a2220f1363a0f5");
    pub const GENERATE_IMAGE_KEY: [u8; 32] = hex!("336e3af233b3aa5bc95d5589aba67aab727727419899823acc6a6c4479e4ea04");
    pub const VIEW_INCOMING_KEY: [u8; 32] = hex!("60eff3ec120a12bb44d4258816e015952fc5651040da8c8af58c17676485f200");
    pub const GENERATE_ADDRESS_SECRET: [u8; 32] = hex!("593ece76c5d24cbfe3c7ac9e2d455cdd4b372c89584700bf1c2e7bef2b70a4d1");
    pub const ACCOUNT_SPEND_PUBKEY: [u8; 32] = hex!("c984806ae9be958800cfe04b5ed85279f48d78c3792b5abb2f5ce2b67adc491f");

    /// Subaddress `(5, 16)`
    pub const SUBADDRESS_SPEND_PUBKEY: [u8; 32] = hex!("cb84becce21364e6fc91f6cec459ae917287bc3d87791369f8ff0fc40e4fcc08");
    pub const SUBADDRESS_VIEW_PUBKEY: [u8; 32] = hex!("82800b2b97f50a798768d3235eabe9d4b3d5bd6d12956975b79db53f29895bdd");

    /// Spend and view pubkeys of the address the enote vectors pay
    pub const ADDRESS_SPEND_PUBKEY: [u8; 32] = hex!("1ebcddd5d98e26788ed8d8510de7f520e973902238e107a070aad104e166b6a0");
    pub const ADDRESS_VIEW_PUBKEY: [u8; 32] = hex!("75b7bc7759da5d9ad5ff421650949b27a13ea369685eb4d1bd59abc518e25fe2");
    pub const PAYMENT_ID: [u8; 8] = hex!("4321734f56621440");

    pub const ANCHOR_NORM: [u8; 16] = hex!("caee1381775487a0982557f0d2680b55");
    pub const ANCHOR_SPECIAL: [u8; 16] = hex!("31afa8f580feaf736cd424ecc9ae5fd2");
    pub const INPUT_CONTEXT: [u8; 33] = hex!("9423f74f3e869dc8427d8b35bb24c917480409c3f4750bff3c742f8e4d5af7bef7");

    pub const EPHEMERAL_PRIVKEY: [u8; 32] = hex!("6d4645a0e398ff430f68eaa78240dd2c04051e9a50438cd9c9c3c0e12af68b0b");
    pub const EPHEMERAL_PRIVKEY_FIXED: [u8; 32] = hex!("f57ff2d7c898b755137b69e8d826801945ed72e9951850de908e9d645a0bb00d");
    pub const EPHEMERAL_PUBKEY_CRYPTONOTE: [u8; 32] = hex!("2987777565c02409dfe871cc27b2334f5ade9d4ad014012c568367b80e99c666");
    pub const EPHEMERAL_PUBKEY_SUBADDRESS: [u8; 32] = hex!("d8b8ce01943edd05d7db66aeb15109c58ec270796f0c76c03d58a398926aca55");

    pub const SHARED_SECRET_UNCTX: [u8; 32] = hex!("baa47cfc380374b15cb5a3048099968962a66e287d78654c75b550d711e58451");
    pub const SENDER_RECEIVER_SECRET: [u8; 32] = hex!("232e62041ee1262cb3fce0d10fdbd018cca5b941ff92283676d6112aa426f76c");

    pub const AMOUNT: u64 = 23000000000000;
    pub const AMOUNT_BLINDING_KEY_PAYMENT: [u8; 32] = hex!("9fc3581e926a844877479d829ff9deeae17ce77feaf2c3c972923510e04f1f02");
    pub const AMOUNT_BLINDING_KEY_CHANGE: [u8; 32] = hex!("dda34eac46030e4084f5a2c808d0a82ffaa82cbf01d4a74d7ee0d4fe72c31a0f");
    pub const AMOUNT_COMMITMENT: [u8; 32] = hex!("ca5f0fc2fe7a4fe628e6f08b2c0eb44f3af3b87e1619b2ed2de296f7e425512b");
    pub const ONETIME_ADDRESS: [u8; 32] = hex!("4c93cf2d7ff8556eac73025ab3019a0db220b56bdf0387e0524724cc0e409d92");
    pub const VIEW_TAG: [u8; 3] = hex!("0176f6");

    pub const ANCHOR_MASK: [u8; 16] = hex!("52d95a8e441f26a056f55094938cbfa8");
    pub const AMOUNT_MASK: [u8; 8] = hex!("98d25d1db65b6a3e");
    pub const PAYMENT_ID_MASK: [u8; 8] = hex!("b57a1560e82e2483");
}

/// Stand-in for the FCMP++ prover. `Hp(O)` is a keyed hash times `G`, so key images are only
/// linkable within the tests, and the "proof" is a hash of the key image.
pub struct MockFcmpBackend;

impl MockFcmpBackend {
    #[allow(non_snake_case)]
    fn hash_to_point(O: &CompressedEdwardsY) -> EdwardsPoint {
        EdwardsPoint::mul_base(&derive_scalar(O.as_bytes(), b"mock hash to point"))
    }
}

impl FcmpPpBackend for MockFcmpBackend {
    type SalProof = [u8; 32];

    fn calculate_fcmp_input_for_rerandomizations(
        &self,
        onetime_address: &OutputPubkey,
        amount_commitment: &AmountCommitment,
        r_o: &Rerandomization,
        r_i: &Rerandomization,
        r_r_i: &Rerandomization,
        r_c: &Rerandomization,
    ) -> Option<FcmpInputCompressed> {
        let onetime_address_point = onetime_address.decompress()?;
        let amount_commitment_point = amount_commitment.decompress()?;
        Some(FcmpInputCompressed {
            o_tilde: (onetime_address_point + r_o.0 * *generators::T).compress(),
            i_tilde: (Self::hash_to_point(&onetime_address.0) + r_i.0 * *generators::U).compress(),
            r: (r_i.0 * *generators::V + r_r_i.0 * *generators::T).compress(),
            c_tilde: (amount_commitment_point + EdwardsPoint::mul_base(&r_c.0)).compress(),
        })
    }

    fn prove_sal(
        &self,
        signable_tx_hash: &SignableTxHash,
        x: &OpeningScalarSecret,
        y: &OpeningScalarSecret,
        rerandomized_output: &FcmpRerandomizedOutputCompressed,
    ) -> Option<(Self::SalProof, KeyImage)> {
        // O = O~ - r_o T
        let onetime_address =
            (rerandomized_output.input.o_tilde.decompress()? - rerandomized_output.r_o.0 * *generators::T).compress();
        if scalar_mul_gt(x, y) != onetime_address {
            return None;
        }

        // L = x Hp(O)
        let key_image = KeyImage::from_point(&(x.0 * Self::hash_to_point(&onetime_address)));
        let proof = derive_bytes_32(key_image.as_bytes(), signable_tx_hash.as_bytes());
        Some((proof, key_image))
    }
}
