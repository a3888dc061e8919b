//! Janus-checked enote scanning for receivers, and re-verification for senders.
//!
//! Every function returns `None` both for enotes that belong to someone else and for enotes that
//! fail a check, so a caller cannot tell an outside observer which one it was.

use log::debug;

use crate::account::AddressSpendPubkey;
use crate::as_crypto::AsMontgomeryPoint;
use crate::core_types::*;
use crate::destination::CarrotDestinationV1;
use crate::device::{self, ViewBalanceSecretDevice, ViewIncomingKeyDevice};
use crate::enote::{CarrotCoinbaseEnoteV1, CarrotEnoteV1};
use crate::janus::*;
use crate::lazy_amount_commitment::LazyAmountCommitment;
use crate::scan_unsafe::*;

pub use crate::scan_unsafe::{CarrotEnoteScan, NominalDestinationScan};

/// What a coinbase scan recovers; the amount is already public
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarrotCoinbaseEnoteScan {
    pub sender_extension_g: OnetimeExtensionG,
    pub sender_extension_t: OnetimeExtensionT,
    /// Always one of the main spend pubkeys passed to the scan
    pub address_spend_pubkey: AddressSpendPubkey,
}

fn is_main_address_spend_pubkey(
    address_spend_pubkey: &AddressSpendPubkey,
    main_address_spend_pubkeys: &[AddressSpendPubkey],
) -> bool {
    main_address_spend_pubkeys.contains(address_spend_pubkey)
}

/// Normal check under `pid'` then the null payment ID, then the special check. On a special pass
/// the payment ID is cleared, since self-sends never carry one.
#[allow(clippy::too_many_arguments)]
fn verify_carrot_janus_protection<V: ViewIncomingKeyDevice + ?Sized>(
    input_context: &InputContext,
    onetime_address: &OutputPubkey,
    enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
    k_view_dev: &V,
    nominal_anchor: &JanusAnchor,
    nominal_address_spend_pubkey: &AddressSpendPubkey,
    is_subaddress: bool,
    nominal_payment_id: &mut PaymentId,
) -> bool {
    if verify_carrot_normal_janus_protection_and_confirm_pid(
        nominal_anchor,
        input_context,
        nominal_address_spend_pubkey,
        is_subaddress,
        enote_ephemeral_pubkey,
        nominal_payment_id,
    ) {
        return true;
    }

    if verify_carrot_special_janus_protection(
        input_context,
        enote_ephemeral_pubkey,
        onetime_address,
        k_view_dev,
        nominal_anchor,
    ) {
        *nominal_payment_id = NULL_PAYMENT_ID;
        return true;
    }

    false
}

/// `s_sr = k_v D_e`
pub fn make_carrot_uncontextualized_shared_key_receiver<V: ViewIncomingKeyDevice + ?Sized>(
    k_view_dev: &V,
    enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
) -> device::Result<MontgomeryECDH> {
    k_view_dev.view_key_scalar_mult_x25519(enote_ephemeral_pubkey.as_montgomery_ref())
}

/// Coinbase enotes have no commitment to bind an address to, so only main addresses are accepted;
/// a subaddress match would depend on the scanner's subaddress table.
pub fn try_scan_carrot_coinbase_enote_receiver(
    enote: &CarrotCoinbaseEnoteV1,
    s_sender_receiver_unctx: &MontgomeryECDH,
    main_address_spend_pubkeys: &[AddressSpendPubkey],
) -> Option<CarrotCoinbaseEnoteScan> {
    let destination = unsafe { try_scan_carrot_coinbase_enote_no_janus(enote, s_sender_receiver_unctx) }?;

    if !is_main_address_spend_pubkey(&destination.address_spend_pubkey, main_address_spend_pubkeys) {
        return None;
    }

    if !verify_carrot_normal_janus_protection(
        &destination.janus_anchor,
        &enote.input_context(),
        &destination.address_spend_pubkey,
        false,
        &NULL_PAYMENT_ID,
        &enote.enote_ephemeral_pubkey,
    ) {
        debug!("coinbase enote at block {} failed janus check", enote.block_index);
        return None;
    }

    Some(CarrotCoinbaseEnoteScan {
        sender_extension_g: destination.sender_extension_g,
        sender_extension_t: destination.sender_extension_t,
        address_spend_pubkey: destination.address_spend_pubkey,
    })
}

/// Scans an enote sent to us by someone else, or a special self-send.
///
/// `K^j_s'` is treated as a subaddress unless it is one of `main_address_spend_pubkeys`. The
/// payment ID is null unless the enote was sent to one of our integrated addresses.
pub fn try_scan_carrot_enote_external_receiver<V: ViewIncomingKeyDevice + ?Sized>(
    enote: &CarrotEnoteV1,
    encrypted_payment_id: Option<&EncryptedPaymentId>,
    s_sender_receiver_unctx: &MontgomeryECDH,
    k_view_dev: &V,
    main_address_spend_pubkeys: &[AddressSpendPubkey],
) -> Option<CarrotEnoteScan> {
    let mut scan =
        unsafe { try_scan_carrot_enote_external_no_janus(enote, encrypted_payment_id, s_sender_receiver_unctx) }?;

    let is_subaddress = !is_main_address_spend_pubkey(&scan.address_spend_pubkey, main_address_spend_pubkeys);
    if !verify_carrot_janus_protection(
        &enote.input_context(),
        &enote.onetime_address,
        &enote.enote_ephemeral_pubkey,
        k_view_dev,
        &scan.janus_anchor,
        &scan.address_spend_pubkey,
        is_subaddress,
        &mut scan.payment_id,
    ) {
        debug!("external enote {:?} failed janus check", enote.onetime_address);
        return None;
    }

    Some(scan)
}

/// Like [`try_scan_carrot_enote_external_receiver`] but stops before the amount, for callers that
/// only need to know where an enote went
pub fn try_scan_carrot_enote_external_destination_only<V: ViewIncomingKeyDevice + ?Sized>(
    enote: &CarrotEnoteV1,
    encrypted_payment_id: Option<&EncryptedPaymentId>,
    s_sender_receiver_unctx: &MontgomeryECDH,
    k_view_dev: &V,
    main_address_spend_pubkeys: &[AddressSpendPubkey],
) -> Option<NominalDestinationScan> {
    let input_context = enote.input_context();

    let (_, mut destination) = unsafe {
        try_scan_carrot_external_noamount(
            &enote.onetime_address,
            &LazyAmountCommitment::Closed(enote.amount_commitment.clone()),
            &enote.anchor_enc,
            &enote.view_tag,
            &enote.enote_ephemeral_pubkey,
            encrypted_payment_id,
            &input_context,
            s_sender_receiver_unctx,
        )
    }?;

    let is_subaddress = !is_main_address_spend_pubkey(&destination.address_spend_pubkey, main_address_spend_pubkeys);
    if !verify_carrot_janus_protection(
        &input_context,
        &enote.onetime_address,
        &enote.enote_ephemeral_pubkey,
        k_view_dev,
        &destination.janus_anchor,
        &destination.address_spend_pubkey,
        is_subaddress,
        &mut destination.payment_id,
    ) {
        debug!("external enote {:?} failed janus check", enote.onetime_address);
        return None;
    }

    Some(destination)
}

/// Scans a self-send keyed by `s_vb`. Janus does not apply since no outsider can build one; the
/// anchor field of the result carries the internal message.
pub fn try_scan_carrot_enote_internal_receiver<B: ViewBalanceSecretDevice + ?Sized>(
    enote: &CarrotEnoteV1,
    s_view_balance_dev: &B,
) -> Option<CarrotEnoteScan> {
    let input_context = enote.input_context();

    // vt = H_3[s_vb](input_context, Ko)
    let nominal_view_tag = s_view_balance_dev
        .make_internal_view_tag(&input_context, &enote.onetime_address)
        .ok()?;
    if nominal_view_tag != enote.view_tag {
        return None;
    }

    // s^ctx_sr = H_32[s_vb](D_e, input_context)
    let s_sender_receiver = s_view_balance_dev
        .make_internal_sender_receiver_secret(&enote.enote_ephemeral_pubkey, &input_context)
        .ok()?;

    unsafe { try_scan_carrot_enote_internal_burnt(enote, &s_sender_receiver) }
}

fn test_view_tag_or_log(
    view_tag: &ViewTag,
    s_sender_receiver_unctx: &MontgomeryECDH,
    input_context: &InputContext,
    onetime_address: &OutputPubkey,
) -> bool {
    let matched = &s_sender_receiver_unctx.view_tag(input_context, onetime_address) == view_tag;
    if !matched {
        debug!("view tag mismatch for Ko {:?}", onetime_address);
    }
    matched
}

pub fn try_ecdh_and_scan_carrot_coinbase_enote<V: ViewIncomingKeyDevice + ?Sized>(
    enote: &CarrotCoinbaseEnoteV1,
    k_view_dev: &V,
    main_address_spend_pubkeys: &[AddressSpendPubkey],
) -> Option<CarrotCoinbaseEnoteScan> {
    let s_sender_receiver_unctx =
        match make_carrot_uncontextualized_shared_key_receiver(k_view_dev, &enote.enote_ephemeral_pubkey) {
            Ok(s_sender_receiver_unctx) => s_sender_receiver_unctx,
            Err(e) => {
                debug!("view-incoming device failed ECDH: {}", e);
                return None;
            }
        };

    if !test_view_tag_or_log(
        &enote.view_tag,
        &s_sender_receiver_unctx,
        &enote.input_context(),
        &enote.onetime_address,
    ) {
        return None;
    }

    try_scan_carrot_coinbase_enote_receiver(enote, &s_sender_receiver_unctx, main_address_spend_pubkeys)
}

pub fn try_ecdh_and_scan_carrot_enote_external<V: ViewIncomingKeyDevice + ?Sized>(
    enote: &CarrotEnoteV1,
    encrypted_payment_id: Option<&EncryptedPaymentId>,
    k_view_dev: &V,
    main_address_spend_pubkeys: &[AddressSpendPubkey],
) -> Option<CarrotEnoteScan> {
    let s_sender_receiver_unctx =
        match make_carrot_uncontextualized_shared_key_receiver(k_view_dev, &enote.enote_ephemeral_pubkey) {
            Ok(s_sender_receiver_unctx) => s_sender_receiver_unctx,
            Err(e) => {
                debug!("view-incoming device failed ECDH: {}", e);
                return None;
            }
        };

    if !test_view_tag_or_log(
        &enote.view_tag,
        &s_sender_receiver_unctx,
        &enote.input_context(),
        &enote.onetime_address,
    ) {
        return None;
    }

    try_scan_carrot_enote_external_receiver(
        enote,
        encrypted_payment_id,
        &s_sender_receiver_unctx,
        k_view_dev,
        main_address_spend_pubkeys,
    )
}

/// Payer-side check that a coinbase enote pays `destination`, rebuilt from `anchor_norm`
pub fn try_scan_carrot_coinbase_enote_sender(
    enote: &CarrotCoinbaseEnoteV1,
    destination: &CarrotDestinationV1,
    anchor_norm: &JanusAnchor,
) -> Option<CarrotCoinbaseEnoteScan> {
    let enote_ephemeral_privkey = EnoteEphemeralKey::derive(
        anchor_norm,
        &enote.input_context(),
        &destination.address_spend_pubkey,
        &destination.payment_id,
    );

    try_scan_carrot_coinbase_enote_sender_with_ephemeral_key(enote, destination, &enote_ephemeral_privkey)
}

pub fn try_scan_carrot_coinbase_enote_sender_with_ephemeral_key(
    enote: &CarrotCoinbaseEnoteV1,
    destination: &CarrotDestinationV1,
    enote_ephemeral_privkey: &EnoteEphemeralKey,
) -> Option<CarrotCoinbaseEnoteScan> {
    // s_sr = d_e ConvertPointE(K^j_v)
    let s_sender_receiver_unctx = enote_ephemeral_privkey.exchange(&destination.address_view_pubkey)?;

    try_scan_carrot_coinbase_enote_receiver(
        enote,
        &s_sender_receiver_unctx,
        core::slice::from_ref(&destination.address_spend_pubkey),
    )
}

/// Payer-side check that `enote` is the payment it meant to make to `destination`.
///
/// The payer knows `anchor_norm`, so it can rebuild `d_e` and take the sender side of the ECDH.
/// The enote must open as a payment to exactly `destination`, and if `check_pid` is set, with
/// `destination`'s payment ID.
pub fn try_scan_carrot_enote_external_sender(
    enote: &CarrotEnoteV1,
    encrypted_payment_id: Option<&EncryptedPaymentId>,
    destination: &CarrotDestinationV1,
    anchor_norm: &JanusAnchor,
    check_pid: bool,
) -> Option<CarrotEnoteScan> {
    let enote_ephemeral_privkey = EnoteEphemeralKey::derive(
        anchor_norm,
        &enote.input_context(),
        &destination.address_spend_pubkey,
        &destination.payment_id,
    );

    try_scan_carrot_enote_external_sender_with_ephemeral_key(
        enote,
        encrypted_payment_id,
        destination,
        &enote_ephemeral_privkey,
        check_pid,
    )
}

pub fn try_scan_carrot_enote_external_sender_with_ephemeral_key(
    enote: &CarrotEnoteV1,
    encrypted_payment_id: Option<&EncryptedPaymentId>,
    destination: &CarrotDestinationV1,
    enote_ephemeral_privkey: &EnoteEphemeralKey,
    check_pid: bool,
) -> Option<CarrotEnoteScan> {
    // s_sr = d_e ConvertPointE(K^j_v)
    let s_sender_receiver_unctx = enote_ephemeral_privkey.exchange(&destination.address_view_pubkey)?;

    try_scan_carrot_enote_external_sender_with_shared_secret(
        enote,
        encrypted_payment_id,
        destination,
        &s_sender_receiver_unctx,
        check_pid,
    )
}

pub fn try_scan_carrot_enote_external_sender_with_shared_secret(
    enote: &CarrotEnoteV1,
    encrypted_payment_id: Option<&EncryptedPaymentId>,
    destination: &CarrotDestinationV1,
    s_sender_receiver_unctx: &MontgomeryECDH,
    check_pid: bool,
) -> Option<CarrotEnoteScan> {
    let mut scan =
        unsafe { try_scan_carrot_enote_external_no_janus(enote, encrypted_payment_id, s_sender_receiver_unctx) }?;

    if scan.address_spend_pubkey != destination.address_spend_pubkey || scan.enote_type != CarrotEnoteType::Payment {
        return None;
    }

    if !verify_carrot_normal_janus_protection_and_confirm_pid(
        &scan.janus_anchor,
        &enote.input_context(),
        &scan.address_spend_pubkey,
        destination.is_subaddress,
        &enote.enote_ephemeral_pubkey,
        &mut scan.payment_id,
    ) {
        debug!("own enote {:?} failed janus check", enote.onetime_address);
        return None;
    }

    if check_pid && scan.payment_id != destination.payment_id {
        return None;
    }

    Some(scan)
}
