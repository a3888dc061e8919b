//! Turning a transaction's payment proposals into its final, ordered set of output enotes.

use log::{debug, trace};

use crate::account::AddressSpendPubkey;
use crate::consts::*;
use crate::core_types::*;
use crate::destination::CarrotDestinationV1;
use crate::device::{ViewBalanceSecretDevice, ViewIncomingKeyDevice};
use crate::enote::CarrotCoinbaseEnoteV1;
use crate::math_utils::is_invalid_or_has_torsion;
use crate::payments::*;
use crate::permutate::{gather_in_place, sorting_order};
use crate::random::Random;

/// The extra output a transaction needs to become a valid set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdditionalOutputType {
    /// Payment-type self-send sharing `D_e` with the only other output
    PaymentShared,
    /// Change self-send sharing `D_e` with the only other output
    ChangeShared,
    /// Change self-send with its own `D_e`
    ChangeUnique,
    /// Zero-amount payment to a random address
    Dummy,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdditionalOutputProposal {
    Normal(CarrotPaymentProposalV1),
    SelfSend(CarrotPaymentProposalSelfSendV1),
}

/// Where an output of a finalized set came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentProposalIndex {
    Normal(usize),
    SelfSend(usize),
}

/// `None` if the proposals already form a complete set
pub fn get_additional_output_type(
    num_outgoing: usize,
    num_selfsend: usize,
    need_change_output: bool,
    have_payment_type_selfsend: bool,
) -> Result<Option<AdditionalOutputType>> {
    let num_outputs = num_outgoing + num_selfsend;
    if num_outputs == 0 {
        return Err(Error::TooFewOutputs);
    }
    let already_completed = num_outputs >= 2 && num_selfsend >= 1 && !need_change_output;

    Ok(if already_completed {
        None
    } else if num_outputs == 1 {
        if num_selfsend == 0 {
            Some(AdditionalOutputType::ChangeShared)
        } else if !need_change_output {
            Some(AdditionalOutputType::Dummy)
        } else if have_payment_type_selfsend {
            // the lone self-send is already the payment-type one
            Some(AdditionalOutputType::ChangeShared)
        } else {
            Some(AdditionalOutputType::PaymentShared)
        }
    } else {
        Some(AdditionalOutputType::ChangeUnique)
    })
}

pub fn get_additional_output_proposal<R>(
    num_outgoing: usize,
    num_selfsend: usize,
    needed_change_amount: Amount,
    have_payment_type_selfsend: bool,
    change_address_spend_pubkey: &AddressSpendPubkey,
    rng: &mut R,
) -> Result<Option<AdditionalOutputProposal>>
where
    R: rand_core::CryptoRngCore + ?Sized,
{
    let Some(additional_output_type) = get_additional_output_type(
        num_outgoing,
        num_selfsend,
        needed_change_amount != 0,
        have_payment_type_selfsend,
    )?
    else {
        return Ok(None);
    };

    debug!(
        "{} outgoing and {} self-send proposals need a {:?} output",
        num_outgoing, num_selfsend, additional_output_type
    );

    let selfsend = |enote_type| {
        AdditionalOutputProposal::SelfSend(CarrotPaymentProposalSelfSendV1 {
            destination_address_spend_pubkey: change_address_spend_pubkey.clone(),
            amount: needed_change_amount,
            enote_type,
            enote_ephemeral_pubkey: None,
            internal_message: None,
        })
    };

    Ok(Some(match additional_output_type {
        AdditionalOutputType::PaymentShared => selfsend(CarrotEnoteType::Payment),
        AdditionalOutputType::ChangeShared | AdditionalOutputType::ChangeUnique => {
            selfsend(CarrotEnoteType::Change)
        }
        AdditionalOutputType::Dummy => AdditionalOutputProposal::Normal(CarrotPaymentProposalV1 {
            destination: CarrotDestinationV1::new_random_with_params(rng, (false, false)),
            amount: 0,
            randomness: JanusAnchor::new_randomness(rng),
        }),
    }))
}

fn check_normal_proposals_randomness(normal_payment_proposals: &[CarrotPaymentProposalV1]) -> Result<()> {
    if normal_payment_proposals
        .iter()
        .any(|proposal| proposal.randomness == NULL_JANUS_ANCHOR)
    {
        return Err(Error::MissingRandomness);
    }

    if !all_unique(normal_payment_proposals, |a, b| a.randomness == b.randomness) {
        return Err(Error::DuplicateRandomness);
    }

    Ok(())
}

fn all_unique<T>(items: &[T], eq: impl Fn(&T, &T) -> bool) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(i, a)| items[i + 1..].iter().all(|b| !eq(a, b)))
}

/// Ascending and without repeats
fn is_sorted_and_unique<T>(items: &[T], key: impl Fn(&T) -> &[u8; 32]) -> bool {
    items.windows(2).all(|pair| key(&pair[0]) < key(&pair[1]))
}

/// Builds every output of a non-coinbase transaction and sorts them by onetime address.
///
/// Self-sends become internal enotes when `s_view_balance_dev` is given, special enotes otherwise.
/// In a 2-out set both outputs share one `D_e`: the normal output's, or whichever self-send
/// carries one. Returns `pid_enc` for the transaction, taken from the single integrated address
/// payment or else `dummy_encrypted_payment_id`.
///
/// `payment_proposal_order_out[k]` names the proposal that produced `output_enote_proposals_out[k]`.
///
/// # Panics
///
/// If either out-slice length differs from the total number of proposals while that number is
/// within the allowed output set size.
#[allow(clippy::too_many_arguments)]
pub fn get_output_enote_proposals<B, V>(
    normal_payment_proposals: &[CarrotPaymentProposalV1],
    selfsend_payment_proposals: &[CarrotPaymentProposalSelfSendV1],
    dummy_encrypted_payment_id: Option<&EncryptedPaymentId>,
    s_view_balance_dev: Option<&B>,
    k_view_dev: Option<&V>,
    tx_first_key_image: &KeyImage,
    output_enote_proposals_out: &mut [RCTOutputEnoteProposal],
    payment_proposal_order_out: &mut [PaymentProposalIndex],
) -> Result<EncryptedPaymentId>
where
    B: ViewBalanceSecretDevice + ?Sized,
    V: ViewIncomingKeyDevice + ?Sized,
{
    let num_normal_proposals = normal_payment_proposals.len();
    let num_selfsend_proposals = selfsend_payment_proposals.len();
    let num_proposals = num_normal_proposals + num_selfsend_proposals;
    if num_proposals < MIN_OUTPUT_SET_SIZE {
        return Err(Error::TooFewOutputs);
    } else if num_proposals > MAX_OUTPUT_SET_SIZE {
        return Err(Error::TooManyOutputs);
    } else if num_selfsend_proposals == 0 {
        return Err(Error::NoSelfSend);
    }
    assert_eq!(output_enote_proposals_out.len(), num_proposals);
    assert_eq!(payment_proposal_order_out.len(), num_proposals);

    let num_integrated = normal_payment_proposals
        .iter()
        .filter(|proposal| proposal.destination.is_integrated())
        .count();
    if num_integrated > 1 {
        return Err(Error::MultipleIntegratedAddresses);
    }

    check_normal_proposals_randomness(normal_payment_proposals)?;

    // D^other_e
    let mut other_enote_ephemeral_pubkey = None;
    let mut encrypted_payment_id = None;

    for (i, proposal) in normal_payment_proposals.iter().enumerate() {
        let (output_enote_proposal, payment_id_enc) =
            proposal.get_normal_output_proposal(tx_first_key_image.clone())?;

        // 1 normal and 1 self-send: the self-send reuses this D_e
        if num_proposals == 2 {
            other_enote_ephemeral_pubkey = Some(output_enote_proposal.enote.enote_ephemeral_pubkey.clone());
        }
        if proposal.destination.is_integrated() {
            encrypted_payment_id = Some(payment_id_enc);
        }

        trace!("built normal output {} of {}", i + 1, num_proposals);
        output_enote_proposals_out[i] = output_enote_proposal;
        payment_proposal_order_out[i] = PaymentProposalIndex::Normal(i);
    }

    let encrypted_payment_id = match (encrypted_payment_id, dummy_encrypted_payment_id) {
        (Some(encrypted_payment_id), _) => encrypted_payment_id,
        (None, Some(dummy)) => dummy.clone(),
        (None, None) => return Err(Error::MissingEncryptedPaymentId),
    };

    // 2 self-sends: both use whichever D_e is present
    if num_proposals == 2 && num_selfsend_proposals == 2 {
        other_enote_ephemeral_pubkey = selfsend_payment_proposals
            .iter()
            .find_map(|proposal| proposal.enote_ephemeral_pubkey.clone());
    }

    for (i, proposal) in selfsend_payment_proposals.iter().enumerate() {
        let output_idx = num_normal_proposals + i;
        output_enote_proposals_out[output_idx] = match (s_view_balance_dev, k_view_dev) {
            (Some(s_view_balance_dev), _) => proposal.get_internal_output_proposal(
                s_view_balance_dev,
                tx_first_key_image.clone(),
                other_enote_ephemeral_pubkey.as_ref(),
            )?,
            (None, Some(k_view_dev)) => proposal.get_special_output_proposal(
                k_view_dev,
                tx_first_key_image.clone(),
                other_enote_ephemeral_pubkey.as_ref(),
            )?,
            (None, None) => return Err(Error::MissingSelfSendDevice),
        };
        payment_proposal_order_out[output_idx] = PaymentProposalIndex::SelfSend(i);
        trace!("built self-send output {} of {}", output_idx + 1, num_proposals);
    }

    // sort by Ko, carrying the proposal indices along
    let mut order = [0usize; MAX_OUTPUT_SET_SIZE];
    let order = &mut order[..num_proposals];
    sorting_order(output_enote_proposals_out, order, |p| p.enote.onetime_address.as_bytes());
    gather_in_place(order, output_enote_proposals_out);
    gather_in_place(order, payment_proposal_order_out);

    let outputs = &*output_enote_proposals_out;

    if outputs
        .iter()
        .any(|p| p.enote.enote_ephemeral_pubkey.as_bytes() == &[0u8; 32])
    {
        return Err(Error::TrivialEnoteEphemeralPubkey);
    }
    let has_unique_ephemeral_pubkeys = all_unique(outputs, |a, b| {
        a.enote.enote_ephemeral_pubkey == b.enote.enote_ephemeral_pubkey
    });
    if num_proposals == 2 && has_unique_ephemeral_pubkeys {
        return Err(Error::UnsharedEnoteEphemeralPubkey);
    } else if num_proposals != 2 && !has_unique_ephemeral_pubkeys {
        return Err(Error::DuplicateEnoteEphemeralPubkey);
    }

    if !is_sorted_and_unique(outputs, |p| p.enote.onetime_address.as_bytes()) {
        return Err(Error::DuplicateOnetimeAddress);
    }
    if outputs
        .iter()
        .any(|p| is_invalid_or_has_torsion(&p.enote.onetime_address))
    {
        return Err(Error::BadAddressPoints);
    }

    if outputs
        .iter()
        .any(|p| p.amount_blinding_factor == AmountBlindingKey::default())
    {
        return Err(Error::TrivialAmountBlindingFactor);
    }
    if !all_unique(outputs, |a, b| a.amount_blinding_factor == b.amount_blinding_factor) {
        return Err(Error::DuplicateAmountBlindingFactor);
    }

    debug!(
        "finalized {} outputs ({} normal, {} self-send)",
        num_proposals, num_normal_proposals, num_selfsend_proposals
    );

    Ok(encrypted_payment_id)
}

/// Builds the coinbase enotes of a block, sorted by onetime address. Every destination must be a
/// plain main address.
///
/// # Panics
///
/// If `output_coinbase_enotes_out` is not as long as `normal_payment_proposals`.
pub fn get_coinbase_output_enotes(
    normal_payment_proposals: &[CarrotPaymentProposalV1],
    block_index: BlockIndex,
    output_coinbase_enotes_out: &mut [CarrotCoinbaseEnoteV1],
) -> Result<()> {
    assert_eq!(output_coinbase_enotes_out.len(), normal_payment_proposals.len());

    for proposal in normal_payment_proposals {
        if proposal.destination.is_subaddress {
            return Err(Error::CoinbaseSubaddress);
        } else if proposal.destination.is_integrated() {
            return Err(Error::CoinbasePaymentId);
        }
    }

    check_normal_proposals_randomness(normal_payment_proposals)?;

    for (proposal, enote_out) in normal_payment_proposals
        .iter()
        .zip(output_coinbase_enotes_out.iter_mut())
    {
        *enote_out = proposal.get_coinbase_output_proposal(block_index)?;
    }

    let enotes = &mut *output_coinbase_enotes_out;

    if enotes
        .iter()
        .any(|enote| enote.enote_ephemeral_pubkey.as_bytes() == &[0u8; 32])
    {
        return Err(Error::TrivialEnoteEphemeralPubkey);
    }
    if !all_unique(enotes, |a, b| a.enote_ephemeral_pubkey == b.enote_ephemeral_pubkey) {
        return Err(Error::DuplicateEnoteEphemeralPubkey);
    }

    enotes.sort_unstable_by(|a, b| a.onetime_address.as_bytes().cmp(b.onetime_address.as_bytes()));

    if !is_sorted_and_unique(enotes, |enote| enote.onetime_address.as_bytes()) {
        return Err(Error::DuplicateOnetimeAddress);
    }
    if enotes
        .iter()
        .any(|enote| is_invalid_or_has_torsion(&enote.onetime_address))
    {
        return Err(Error::BadAddressPoints);
    }

    debug!("finalized {} coinbase outputs for block {}", enotes.len(), block_index);

    Ok(())
}
