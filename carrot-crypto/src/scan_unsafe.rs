//! Enote recovery with no Janus check.
//!
//! These functions decrypt and re-derive everything a receiver needs, but they do not confirm that
//! the decrypted anchor ties the enote to the recovered address. A wallet that acts on their output
//! directly is open to Janus attacks; `scan` composes them with the checks.

use crate::account::AddressSpendPubkey;
use crate::core_types::*;
use crate::enote::{CarrotCoinbaseEnoteV1, CarrotEnoteV1};
use crate::lazy_amount_commitment::LazyAmountCommitment;
use crate::onetime::{try_get_carrot_amount, SenderExtensions};

/// Destination fields recovered from an enote before any Janus check
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NominalDestinationScan {
    /// `k^o_g`
    pub sender_extension_g: OnetimeExtensionG,
    /// `k^o_t`
    pub sender_extension_t: OnetimeExtensionT,
    /// `K^j_s'`
    pub address_spend_pubkey: AddressSpendPubkey,
    /// `pid'`, null when no `pid_enc` was given
    pub payment_id: PaymentId,
    /// `anchor'`: `anchor_norm`, `anchor_sp`, or an internal message
    pub janus_anchor: JanusAnchor,
}

/// A fully opened enote
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarrotEnoteScan {
    pub sender_extension_g: OnetimeExtensionG,
    pub sender_extension_t: OnetimeExtensionT,
    pub address_spend_pubkey: AddressSpendPubkey,
    pub amount: Amount,
    /// `k_a`
    pub amount_blinding_factor: AmountBlindingKey,
    pub payment_id: PaymentId,
    pub enote_type: CarrotEnoteType,
    /// The decrypted anchor. For internal enotes this is the sender's internal message.
    pub janus_anchor: JanusAnchor,
}

impl CarrotEnoteScan {
    fn from_destination(
        destination: NominalDestinationScan,
        (amount, amount_blinding_factor, enote_type): (Amount, AmountBlindingKey, CarrotEnoteType),
    ) -> Self {
        Self {
            sender_extension_g: destination.sender_extension_g,
            sender_extension_t: destination.sender_extension_t,
            address_spend_pubkey: destination.address_spend_pubkey,
            amount,
            amount_blinding_factor,
            payment_id: destination.payment_id,
            enote_type,
            janus_anchor: destination.janus_anchor,
        }
    }
}

pub(crate) fn scan_carrot_dest_info(
    onetime_address: &OutputPubkey,
    amount_commitment: &AmountCommitment,
    encrypted_janus_anchor: &EncryptedJanusAnchor,
    encrypted_payment_id: Option<&EncryptedPaymentId>,
    s_sender_receiver: &SenderReceiverSecret,
) -> Option<NominalDestinationScan> {
    // k^o_g, k^o_t = H_n[s^ctx_sr](C_a)
    let extensions = SenderExtensions::derive(s_sender_receiver, amount_commitment);

    // K^j_s' = Ko - (k^o_g G + k^o_t T)
    let address_spend_pubkey = extensions.strip(onetime_address)?;

    // pid' = pid_enc XOR m_pid
    let payment_id = encrypted_payment_id
        .map(|pid_enc| pid_enc.decrypt(s_sender_receiver, onetime_address))
        .unwrap_or(NULL_PAYMENT_ID);

    // anchor' = anchor_enc XOR m_anchor
    let janus_anchor = encrypted_janus_anchor.decrypt(s_sender_receiver, onetime_address);

    Some(NominalDestinationScan {
        sender_extension_g: extensions.g,
        sender_extension_t: extensions.t,
        address_spend_pubkey,
        payment_id,
        janus_anchor,
    })
}

/// View tag test, then `s^ctx_sr` and the destination fields. Returns `s^ctx_sr` alongside so the
/// caller can go on to open the amount.
///
/// # Safety
///
/// The result is not Janus-checked.
#[allow(clippy::too_many_arguments)]
pub unsafe fn try_scan_carrot_external_noamount(
    onetime_address: &OutputPubkey,
    lazy_amount_commitment: &LazyAmountCommitment,
    encrypted_janus_anchor: &EncryptedJanusAnchor,
    view_tag: &ViewTag,
    enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
    encrypted_payment_id: Option<&EncryptedPaymentId>,
    input_context: &InputContext,
    s_sender_receiver_unctx: &MontgomeryECDH,
) -> Option<(SenderReceiverSecret, NominalDestinationScan)> {
    // vt' != vt means the enote isn't ours
    if &s_sender_receiver_unctx.view_tag(input_context, onetime_address) != view_tag {
        return None;
    }

    // s^ctx_sr = H_32[s_sr](D_e, input_context)
    let s_sender_receiver = s_sender_receiver_unctx.contextualize(enote_ephemeral_pubkey, input_context);

    let amount_commitment = lazy_amount_commitment.calculate();

    let destination = scan_carrot_dest_info(
        onetime_address,
        &amount_commitment,
        encrypted_janus_anchor,
        encrypted_payment_id,
        &s_sender_receiver,
    )?;

    Some((s_sender_receiver, destination))
}

/// # Safety
///
/// Neither the Janus anchor nor the main-address requirement of coinbase outputs is checked.
pub unsafe fn try_scan_carrot_coinbase_enote_no_janus(
    enote: &CarrotCoinbaseEnoteV1,
    s_sender_receiver_unctx: &MontgomeryECDH,
) -> Option<NominalDestinationScan> {
    let (_, destination) = try_scan_carrot_external_noamount(
        &enote.onetime_address,
        &LazyAmountCommitment::CleartextOpen(enote.amount),
        &enote.anchor_enc,
        &enote.view_tag,
        &enote.enote_ephemeral_pubkey,
        None,
        &enote.input_context(),
        s_sender_receiver_unctx,
    )?;

    Some(destination)
}

/// # Safety
///
/// The result is not Janus-checked, so `payment_id` may be noise and the recovered address may
/// not be the one the sender intended.
pub unsafe fn try_scan_carrot_enote_external_no_janus(
    enote: &CarrotEnoteV1,
    encrypted_payment_id: Option<&EncryptedPaymentId>,
    s_sender_receiver_unctx: &MontgomeryECDH,
) -> Option<CarrotEnoteScan> {
    let (s_sender_receiver, destination) = try_scan_carrot_external_noamount(
        &enote.onetime_address,
        &LazyAmountCommitment::Closed(enote.amount_commitment.clone()),
        &enote.anchor_enc,
        &enote.view_tag,
        &enote.enote_ephemeral_pubkey,
        encrypted_payment_id,
        &enote.input_context(),
        s_sender_receiver_unctx,
    )?;

    // a, k_a, enote_type
    let opening = try_get_carrot_amount(
        &s_sender_receiver,
        &enote.amount_enc,
        &enote.onetime_address,
        &destination.address_spend_pubkey,
        &enote.amount_commitment,
    )?;

    Some(CarrotEnoteScan::from_destination(destination, opening))
}

/// Opens an internal enote given its `s^ctx_sr`, skipping the view tag.
///
/// # Safety
///
/// Nothing ties the enote to the caller's account: anyone who learns `s^ctx_sr` can make an enote
/// that opens here. Only use this on enotes whose view tag was already tested under `s_vb`.
pub unsafe fn try_scan_carrot_enote_internal_burnt(
    enote: &CarrotEnoteV1,
    s_sender_receiver: &SenderReceiverSecret,
) -> Option<CarrotEnoteScan> {
    let destination = scan_carrot_dest_info(
        &enote.onetime_address,
        &enote.amount_commitment,
        &enote.anchor_enc,
        None,
        s_sender_receiver,
    )?;

    let opening = try_get_carrot_amount(
        s_sender_receiver,
        &enote.amount_enc,
        &enote.onetime_address,
        &destination.address_spend_pubkey,
        &enote.amount_commitment,
    )?;

    Some(CarrotEnoteScan::from_destination(destination, opening))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::account::AccountSecrets;
    use crate::device::ViewBalanceSecretDevice;
    use crate::payments::CarrotPaymentProposalV1;
    use crate::random::{new_random, new_random_with_params};
    use rand_core::OsRng;

    #[test]
    fn unchecked_scan_opens_normal_enote() {
        let account: AccountSecrets = new_random(&mut OsRng);
        let proposal = CarrotPaymentProposalV1 {
            destination: account.make_destination(0, 0).unwrap(),
            amount: 1_000,
            randomness: JanusAnchor::new_randomness(&mut OsRng),
        };
        let (output, pid_enc) = proposal.get_normal_output_proposal(new_random(&mut OsRng)).unwrap();
        let s_sender_receiver_unctx = account.view_incoming_key().exchange(&output.enote.enote_ephemeral_pubkey);

        let scan = unsafe {
            try_scan_carrot_enote_external_no_janus(&output.enote, Some(&pid_enc), &s_sender_receiver_unctx)
        }
        .unwrap();
        assert_eq!(&scan.address_spend_pubkey, account.account_spend_pubkey());
        assert_eq!(scan.amount, 1_000);
        assert_eq!(scan.amount_blinding_factor, output.amount_blinding_factor);
        assert_eq!(scan.janus_anchor, proposal.randomness);
        assert_eq!(scan.enote_type, CarrotEnoteType::Payment);
        assert_eq!(scan.payment_id, NULL_PAYMENT_ID);
    }

    #[test]
    fn view_tag_miss_stops_before_decryption() {
        let mut enote: CarrotEnoteV1 = new_random(&mut OsRng);
        let s_sender_receiver_unctx: MontgomeryECDH = new_random(&mut OsRng);
        let view_tag = s_sender_receiver_unctx.view_tag(&enote.input_context(), &enote.onetime_address);
        enote.view_tag = ViewTag::from([view_tag.as_bytes()[0] ^ 1, 0, 0]);
        assert!(unsafe {
            try_scan_carrot_enote_external_no_janus(&enote, None, &s_sender_receiver_unctx)
        }
        .is_none());
    }

    #[test]
    fn internal_burnt_opens_with_s_sender_receiver() {
        let account: AccountSecrets = new_random(&mut OsRng);
        let mut proposal: crate::payments::CarrotPaymentProposalSelfSendV1 =
            new_random_with_params(&mut OsRng, (CarrotEnoteType::Change, 42));
        proposal.destination_address_spend_pubkey = account.account_spend_pubkey().clone();
        proposal.internal_message = Some(JanusAnchor::from([0x11; 16]));
        let output = proposal
            .get_internal_output_proposal(&account, new_random(&mut OsRng), None)
            .unwrap();

        let s_sender_receiver = account
            .make_internal_sender_receiver_secret(
                &output.enote.enote_ephemeral_pubkey,
                &output.enote.input_context(),
            )
            .unwrap();
        let scan = unsafe { try_scan_carrot_enote_internal_burnt(&output.enote, &s_sender_receiver) }.unwrap();
        assert_eq!(scan.amount, 42);
        assert_eq!(scan.enote_type, CarrotEnoteType::Change);
        assert_eq!(scan.janus_anchor, JanusAnchor::from([0x11; 16]));
        assert_eq!(scan.payment_id, NULL_PAYMENT_ID);
    }
}
