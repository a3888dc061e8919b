//! Spend authorization: turning account keys plus an opening hint into an SA/L proof.
//!
//! The opening of a one-time address is the address opening `(x^j, y^j)` shifted by the sender
//! extensions, `x = x^j + k^o_g` and `y = y^j + k^o_t`. How `(x^j, y^j)` is found depends on the
//! account hierarchy; the shift and the proof are shared.

use curve25519_dalek::EdwardsPoint;
use log::debug;

use crate::account::*;
use crate::core_types::*;
use crate::destination::AddressDeriveType;
use crate::device::{
    self, CryptonoteHierarchyAddressDevice, GenerateAddressSecretDevice, ViewBalanceSecretDevice,
    ViewIncomingKeyDevice,
};
use crate::fcmp::*;
use crate::legacy::LegacySpendKey;
use crate::math_utils::gt_point;
use crate::opening::OpeningScalarSecret;
use crate::opening_hint::{try_scan_opening_hint_sender_extensions, OutputOpeningHintVariant};
use crate::type_macros::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("rerandomized output does not rerandomize the hinted output")]
    UnverifiedRerandomization,
    #[error("could not recover sender extensions from opening hint")]
    ScanFailed,
    #[error("opening hint was derived under the other address hierarchy")]
    WrongDeriveType,
    #[error("device error: {0}")]
    Device(#[from] device::Error),
    #[error("SA/L prover rejected the opening")]
    Prover,
}

pub type Result<T> = core::result::Result<T, Error>;

/// Proves spend authority over the hinted output given the opening `(x^j, y^j)` of the address it
/// was sent to. Fails if `rerandomized_output` was not built from the hinted `(Ko, C_a)`.
#[allow(clippy::too_many_arguments)]
pub fn make_sal_proof_nominal_address<F: FcmpPpBackend + ?Sized>(
    backend: &F,
    signable_tx_hash: &SignableTxHash,
    rerandomized_output: &FcmpRerandomizedOutputCompressed,
    address_privkey_g: &OpeningScalarSecret,
    address_privkey_t: &OpeningScalarSecret,
    opening_hint: &OutputOpeningHintVariant,
    main_address_spend_pubkeys: &[AddressSpendPubkey],
    k_view_dev: Option<&dyn ViewIncomingKeyDevice>,
    s_view_balance_dev: Option<&dyn ViewBalanceSecretDevice>,
) -> Result<(F::SalProof, KeyImage)> {
    if !verify_rerandomized_output_basic(
        backend,
        rerandomized_output,
        opening_hint.onetime_address_ref(),
        &opening_hint.amount_commitment_ref(),
    ) {
        return Err(Error::UnverifiedRerandomization);
    }

    let (sender_extension_g, sender_extension_t) = try_scan_opening_hint_sender_extensions(
        opening_hint,
        main_address_spend_pubkeys,
        k_view_dev,
        s_view_balance_dev,
    )
    .ok_or(Error::ScanFailed)?;

    // x = x^j + k^o_g
    let x = address_privkey_g + &sender_extension_g;
    // y = y^j + k^o_t
    let y = address_privkey_t + &sender_extension_t;

    backend
        .prove_sal(signable_tx_hash, &x, &y, rerandomized_output)
        .ok_or_else(|| {
            debug!("SA/L prover rejected opening of Ko {:?}", opening_hint.onetime_address_ref());
            Error::Prover
        })
}

/// Spends any output received to a Carrot account, with `x^j = k_gi k^j_subscal` and
/// `y^j = k_ps k^j_subscal`
#[allow(clippy::too_many_arguments)]
pub fn make_sal_proof_any_to_carrot_v1<F, VB, VI, GA>(
    backend: &F,
    signable_tx_hash: &SignableTxHash,
    rerandomized_output: &FcmpRerandomizedOutputCompressed,
    opening_hint: &OutputOpeningHintVariant,
    k_prove_spend: &ProveSpendKey,
    k_generate_image: &GenerateImageKey,
    s_view_balance_dev: &VB,
    k_view_dev: &VI,
    s_generate_address_dev: &GA,
) -> Result<(F::SalProof, KeyImage)>
where
    F: FcmpPpBackend + ?Sized,
    VB: ViewBalanceSecretDevice,
    VI: ViewIncomingKeyDevice,
    GA: GenerateAddressSecretDevice,
{
    let subaddr_index = opening_hint.subaddress_index_ref();
    if subaddr_index.derive_type != AddressDeriveType::Carrot {
        return Err(Error::WrongDeriveType);
    }

    // K_s = k_gi G + k_ps T
    let account_spend_point = gt_point(k_generate_image.as_scalar_ref(), k_prove_spend.as_scalar_ref());
    let account_spend_pubkey = AddressSpendPubkey::from_point(&account_spend_point);

    let subaddress_scalar = if subaddr_index.index.is_subaddress() {
        // K_v = k_v K_s
        let account_view_pubkey =
            AddressViewPubkey::from_point(&k_view_dev.view_key_scalar_mult_ed25519(&account_spend_point)?);
        let s_address_generator = s_generate_address_dev
            .make_index_extension_generator(subaddr_index.index.major, subaddr_index.index.minor)?;
        SubaddressScalarSecret::derive(
            &account_spend_pubkey,
            &account_view_pubkey,
            &s_address_generator,
            subaddr_index.index.major,
            subaddr_index.index.minor,
        )
    } else {
        SubaddressScalarSecret::one()
    };

    // x^j = k_gi k^j_subscal, y^j = k_ps k^j_subscal
    let address_privkey_g = k_generate_image * &subaddress_scalar;
    let address_privkey_t = k_prove_spend * &subaddress_scalar;

    make_sal_proof_nominal_address(
        backend,
        signable_tx_hash,
        rerandomized_output,
        &address_privkey_g,
        &address_privkey_t,
        opening_hint,
        &[account_spend_pubkey],
        Some(k_view_dev),
        Some(s_view_balance_dev),
    )
}

/// Spends any output received to a cryptonote account, with `x^j = k_s + k^j_subext` and `y^j = 0`
pub fn make_sal_proof_any_to_legacy_v1<F, A>(
    backend: &F,
    signable_tx_hash: &SignableTxHash,
    rerandomized_output: &FcmpRerandomizedOutputCompressed,
    opening_hint: &OutputOpeningHintVariant,
    k_spend: &LegacySpendKey,
    addr_dev: &A,
) -> Result<(F::SalProof, KeyImage)>
where
    F: FcmpPpBackend + ?Sized,
    A: CryptonoteHierarchyAddressDevice,
{
    let subaddr_index = opening_hint.subaddress_index_ref();
    if subaddr_index.derive_type != AddressDeriveType::PreCarrot {
        return Err(Error::WrongDeriveType);
    }

    let account_spend_pubkey = addr_dev.get_cryptonote_account_spend_pubkey()?;

    // x^j = k_s + k^j_subext
    let subaddress_extension =
        addr_dev.make_legacy_subaddress_extension(subaddr_index.index.major, subaddr_index.index.minor)?;
    let address_privkey_g = k_spend + &subaddress_extension;

    make_sal_proof_nominal_address(
        backend,
        signable_tx_hash,
        rerandomized_output,
        &address_privkey_g,
        &OpeningScalarSecret::zero(),
        opening_hint,
        &[account_spend_pubkey],
        Some(addr_dev),
        None,
    )
}
