//! What a wallet keeps about each of its outputs so that it can later open them for spending.
//!
//! A hint is not trusted: everything it claims is re-derived from the account devices before the
//! opening is used.

use log::debug;

use crate::account::AddressSpendPubkey;
use crate::core_types::*;
use crate::destination::{AddressDeriveType, SubaddressIndex, SubaddressIndexExtended};
use crate::device::{ViewBalanceSecretDevice, ViewIncomingKeyDevice};
use crate::enote::{CarrotCoinbaseEnoteV1, CarrotEnoteV1};
use crate::legacy::make_legacy_onetime_extension;
use crate::scan::*;
use crate::type_macros::*;

define_tiny_edwards_type! {
    /// Cryptonote transaction pubkey `R`
    LegacyTxPubkey
}

/// A pre-Carrot output, `Ko = K^j_s + Hs(8 k_v R || i) G`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyOutputOpeningHintV1 {
    pub onetime_address: OutputPubkey,
    pub ephemeral_tx_pubkey: LegacyTxPubkey,
    pub subaddr_index: SubaddressIndex,
    pub amount: Amount,
    pub amount_blinding_factor: AmountBlindingKey,
    /// Index `i` of the output within its transaction
    pub local_output_index: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarrotOutputOpeningHintV1 {
    pub source_enote: CarrotEnoteV1,
    pub encrypted_payment_id: Option<EncryptedPaymentId>,
    pub subaddr_index: SubaddressIndexExtended,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarrotCoinbaseOutputOpeningHintV1 {
    pub source_enote: CarrotCoinbaseEnoteV1,
    pub derive_type: AddressDeriveType,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputOpeningHintVariant {
    Legacy(LegacyOutputOpeningHintV1),
    Carrot(CarrotOutputOpeningHintV1),
    CarrotCoinbase(CarrotCoinbaseOutputOpeningHintV1),
}

impl OutputOpeningHintVariant {
    pub fn onetime_address_ref(&self) -> &OutputPubkey {
        match self {
            Self::Legacy(hint) => &hint.onetime_address,
            Self::Carrot(hint) => &hint.source_enote.onetime_address,
            Self::CarrotCoinbase(hint) => &hint.source_enote.onetime_address,
        }
    }

    /// `C_a`, recomputed for outputs that don't store it
    pub fn amount_commitment_ref(&self) -> AmountCommitment {
        match self {
            Self::Legacy(hint) => AmountCommitment::commit(hint.amount, &hint.amount_blinding_factor),
            Self::Carrot(hint) => hint.source_enote.amount_commitment.clone(),
            Self::CarrotCoinbase(hint) => AmountCommitment::clear_commit(hint.source_enote.amount),
        }
    }

    pub fn subaddress_index_ref(&self) -> SubaddressIndexExtended {
        match self {
            Self::Legacy(hint) => SubaddressIndexExtended {
                index: hint.subaddr_index,
                derive_type: AddressDeriveType::PreCarrot,
            },
            Self::Carrot(hint) => hint.subaddr_index,
            Self::CarrotCoinbase(hint) => SubaddressIndexExtended {
                index: SubaddressIndex::MAIN,
                derive_type: hint.derive_type,
            },
        }
    }
}

impl From<LegacyOutputOpeningHintV1> for OutputOpeningHintVariant {
    fn from(hint: LegacyOutputOpeningHintV1) -> Self {
        Self::Legacy(hint)
    }
}

impl From<CarrotOutputOpeningHintV1> for OutputOpeningHintVariant {
    fn from(hint: CarrotOutputOpeningHintV1) -> Self {
        Self::Carrot(hint)
    }
}

impl From<CarrotCoinbaseOutputOpeningHintV1> for OutputOpeningHintVariant {
    fn from(hint: CarrotCoinbaseOutputOpeningHintV1) -> Self {
        Self::CarrotCoinbase(hint)
    }
}

struct OpeningHintScan {
    sender_extension_g: OnetimeExtensionG,
    sender_extension_t: OnetimeExtensionT,
    amount: Amount,
    amount_blinding_factor: AmountBlindingKey,
}

fn scan_legacy_hint(
    hint: &LegacyOutputOpeningHintV1,
    k_view_dev: Option<&dyn ViewIncomingKeyDevice>,
) -> Option<OpeningHintScan> {
    let k_view_dev = k_view_dev?;
    let ephemeral_tx_pubkey = hint.ephemeral_tx_pubkey.decompress()?;

    // k_v R
    let kv_r = match k_view_dev.view_key_scalar_mult_ed25519(&ephemeral_tx_pubkey) {
        Ok(kv_r) => kv_r,
        Err(e) => {
            debug!("view-incoming device failed legacy ECDH: {}", e);
            return None;
        }
    };

    Some(OpeningHintScan {
        sender_extension_g: OnetimeExtensionG::from_scalar(make_legacy_onetime_extension(
            &kv_r,
            hint.local_output_index,
        )),
        sender_extension_t: OnetimeExtensionT::default(),
        amount: hint.amount,
        amount_blinding_factor: hint.amount_blinding_factor.clone(),
    })
}

fn scan_carrot_hint(
    hint: &CarrotOutputOpeningHintV1,
    main_address_spend_pubkeys: &[AddressSpendPubkey],
    k_view_dev: Option<&dyn ViewIncomingKeyDevice>,
    s_view_balance_dev: Option<&dyn ViewBalanceSecretDevice>,
) -> Option<OpeningHintScan> {
    let internal_scan = s_view_balance_dev
        .and_then(|s_view_balance_dev| try_scan_carrot_enote_internal_receiver(&hint.source_enote, s_view_balance_dev));

    let scan = match internal_scan {
        Some(scan) => scan,
        None => try_ecdh_and_scan_carrot_enote_external(
            &hint.source_enote,
            hint.encrypted_payment_id.as_ref(),
            k_view_dev?,
            main_address_spend_pubkeys,
        )?,
    };

    Some(OpeningHintScan {
        sender_extension_g: scan.sender_extension_g,
        sender_extension_t: scan.sender_extension_t,
        amount: scan.amount,
        amount_blinding_factor: scan.amount_blinding_factor,
    })
}

fn scan_carrot_coinbase_hint(
    hint: &CarrotCoinbaseOutputOpeningHintV1,
    main_address_spend_pubkeys: &[AddressSpendPubkey],
    k_view_dev: Option<&dyn ViewIncomingKeyDevice>,
) -> Option<OpeningHintScan> {
    let scan = try_ecdh_and_scan_carrot_coinbase_enote(&hint.source_enote, k_view_dev?, main_address_spend_pubkeys)?;

    Some(OpeningHintScan {
        sender_extension_g: scan.sender_extension_g,
        sender_extension_t: scan.sender_extension_t,
        amount: hint.source_enote.amount,
        amount_blinding_factor: AmountBlindingKey::one(),
    })
}

fn scan_opening_hint(
    hint: &OutputOpeningHintVariant,
    main_address_spend_pubkeys: &[AddressSpendPubkey],
    k_view_dev: Option<&dyn ViewIncomingKeyDevice>,
    s_view_balance_dev: Option<&dyn ViewBalanceSecretDevice>,
) -> Option<OpeningHintScan> {
    match hint {
        OutputOpeningHintVariant::Legacy(hint) => scan_legacy_hint(hint, k_view_dev),
        OutputOpeningHintVariant::Carrot(hint) => {
            scan_carrot_hint(hint, main_address_spend_pubkeys, k_view_dev, s_view_balance_dev)
        }
        OutputOpeningHintVariant::CarrotCoinbase(hint) => {
            scan_carrot_coinbase_hint(hint, main_address_spend_pubkeys, k_view_dev)
        }
    }
}

/// `(k^o_g, k^o_t)` of the hinted output. Legacy and coinbase hints need `k_view_dev`; Carrot
/// hints need `s_view_balance_dev` for internal enotes and `k_view_dev` otherwise.
pub fn try_scan_opening_hint_sender_extensions(
    hint: &OutputOpeningHintVariant,
    main_address_spend_pubkeys: &[AddressSpendPubkey],
    k_view_dev: Option<&dyn ViewIncomingKeyDevice>,
    s_view_balance_dev: Option<&dyn ViewBalanceSecretDevice>,
) -> Option<(OnetimeExtensionG, OnetimeExtensionT)> {
    let scan = scan_opening_hint(hint, main_address_spend_pubkeys, k_view_dev, s_view_balance_dev)?;
    Some((scan.sender_extension_g, scan.sender_extension_t))
}

/// `(a, k_a)` of the hinted output, under the same device requirements as
/// [`try_scan_opening_hint_sender_extensions`]
pub fn try_scan_opening_hint_amount(
    hint: &OutputOpeningHintVariant,
    main_address_spend_pubkeys: &[AddressSpendPubkey],
    k_view_dev: Option<&dyn ViewIncomingKeyDevice>,
    s_view_balance_dev: Option<&dyn ViewBalanceSecretDevice>,
) -> Option<(Amount, AmountBlindingKey)> {
    let scan = scan_opening_hint(hint, main_address_spend_pubkeys, k_view_dev, s_view_balance_dev)?;
    Some((scan.amount, scan.amount_blinding_factor))
}
