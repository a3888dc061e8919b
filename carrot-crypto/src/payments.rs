//! Payment proposals and the construction of a single output enote from one.

use crate::account::AddressSpendPubkey;
use crate::as_crypto::AsMontgomeryPoint;
use crate::core_types::*;
use crate::destination::CarrotDestinationV1;
use crate::device::{self, ViewBalanceSecretDevice, ViewIncomingKeyDevice};
use crate::ecdh::EnoteEphemeralKeypair;
use crate::enote::*;
use crate::onetime::SenderExtensions;
use crate::random::{new_random, Random};

/// An amount sent to someone else's address
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarrotPaymentProposalV1 {
    pub destination: CarrotDestinationV1,
    pub amount: Amount,
    /// `anchor_norm`, must not be null
    pub randomness: JanusAnchor,
}

/// An amount sent back to one of our own addresses
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarrotPaymentProposalSelfSendV1 {
    /// `K^j_s`
    pub destination_address_spend_pubkey: AddressSpendPubkey,
    pub amount: Amount,
    pub enote_type: CarrotEnoteType,
    /// `D_e`, if already fixed by the other output of the transaction
    pub enote_ephemeral_pubkey: Option<EnoteEphemeralPubkey>,
    /// Arbitrary message stored in the anchor field of internal self-sends
    pub internal_message: Option<JanusAnchor>,
}

/// A finished enote together with the opening needed for its range proof
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RCTOutputEnoteProposal {
    pub enote: CarrotEnoteV1,
    pub amount: Amount,
    pub amount_blinding_factor: AmountBlindingKey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("janus anchor randomness is null")]
    MissingRandomness,
    #[error("coinbase outputs cannot be sent to a subaddress")]
    CoinbaseSubaddress,
    #[error("coinbase outputs cannot be sent to an integrated address")]
    CoinbasePaymentId,
    #[error("destination address has an invalid or torsioned point")]
    BadAddressPoints,
    #[error("device error: {0}")]
    DeviceError(#[from] device::Error),
    #[error("no enote ephemeral pubkey was given for a self-send")]
    MissingEnoteEphemeralPubkeys,
    #[error("the self-send and its counterpart disagree on the enote ephemeral pubkey")]
    MismatchedEnoteEphemeralPubkey,
    #[error("internal messages are only allowed in internal self-sends")]
    InternalMessageInSpecial,
    #[error("fewer outputs than the minimum")]
    TooFewOutputs,
    #[error("more outputs than the maximum")]
    TooManyOutputs,
    #[error("an output set needs at least one self-send")]
    NoSelfSend,
    #[error("at most one integrated address may be paid per transaction")]
    MultipleIntegratedAddresses,
    #[error("two payment proposals share the same janus randomness")]
    DuplicateRandomness,
    #[error("no integrated address is paid and no dummy encrypted payment ID was given")]
    MissingEncryptedPaymentId,
    #[error("self-sends need a view-balance or view-incoming device")]
    MissingSelfSendDevice,
    #[error("a 2-out set must share one enote ephemeral pubkey")]
    UnsharedEnoteEphemeralPubkey,
    #[error("a set of more than 2 outputs has a repeated enote ephemeral pubkey")]
    DuplicateEnoteEphemeralPubkey,
    #[error("an enote ephemeral pubkey is zero")]
    TrivialEnoteEphemeralPubkey,
    #[error("two outputs share a onetime address")]
    DuplicateOnetimeAddress,
    #[error("an amount blinding factor is zero")]
    TrivialAmountBlindingFactor,
    #[error("two outputs share an amount blinding factor")]
    DuplicateAmountBlindingFactor,
}

pub type Result<T> = core::result::Result<T, Error>;

/// Everything keyed by `s^ctx_sr`
struct SecretKeyedParts {
    amount_blinding_factor: AmountBlindingKey,
    amount_commitment: AmountCommitment,
    onetime_address: OutputPubkey,
    amount_enc: EncryptedAmount,
    payment_id_enc: EncryptedPaymentId,
}

impl SecretKeyedParts {
    fn derive(
        s_sender_receiver: &SenderReceiverSecret,
        destination_spend_pubkey: &AddressSpendPubkey,
        payment_id: &PaymentId,
        amount: Amount,
        enote_type: CarrotEnoteType,
        coinbase_amount_commitment: bool,
    ) -> Result<Self> {
        // k_a = H_n[s^ctx_sr](a, K^j_s, enote_type), or 1 for coinbase
        let amount_blinding_factor = if coinbase_amount_commitment {
            AmountBlindingKey::one()
        } else {
            AmountBlindingKey::derive(s_sender_receiver, amount, destination_spend_pubkey, enote_type)
        };

        let amount_commitment = AmountCommitment::commit(amount, &amount_blinding_factor);

        // Ko = K^j_s + k^o_g G + k^o_t T
        let onetime_address = SenderExtensions::derive(s_sender_receiver, &amount_commitment)
            .extend(destination_spend_pubkey)
            .ok_or(Error::BadAddressPoints)?;

        let amount_enc = EncryptedAmount::encrypt(amount, s_sender_receiver, &onetime_address);
        let payment_id_enc =
            EncryptedPaymentId::encrypt(payment_id, s_sender_receiver, &onetime_address);

        Ok(Self {
            amount_blinding_factor,
            amount_commitment,
            onetime_address,
            amount_enc,
            payment_id_enc,
        })
    }
}

/// [`SecretKeyedParts`] plus the secret and view tag that come from an external ECDH
struct ExternalParts {
    s_sender_receiver: SenderReceiverSecret,
    keyed: SecretKeyedParts,
    view_tag: ViewTag,
}

impl ExternalParts {
    #[allow(clippy::too_many_arguments)]
    fn derive(
        s_sender_receiver_unctx: &MontgomeryECDH,
        destination_spend_pubkey: &AddressSpendPubkey,
        payment_id: &PaymentId,
        amount: Amount,
        enote_type: CarrotEnoteType,
        enote_ephemeral_pubkey: &EnoteEphemeralPubkey,
        input_context: &InputContext,
        coinbase_amount_commitment: bool,
    ) -> Result<Self> {
        let s_sender_receiver = s_sender_receiver_unctx.contextualize(enote_ephemeral_pubkey, input_context);

        let keyed = SecretKeyedParts::derive(
            &s_sender_receiver,
            destination_spend_pubkey,
            payment_id,
            amount,
            enote_type,
            coinbase_amount_commitment,
        )?;

        // the view tag uses the uncontextualized secret
        let view_tag = s_sender_receiver_unctx.view_tag(input_context, &keyed.onetime_address);

        Ok(Self {
            s_sender_receiver,
            keyed,
            view_tag,
        })
    }
}

/// The self-send's own `D_e` and the one fixed by the other output must agree, and at least one
/// must be present
fn resolve_selfsend_enote_ephemeral_pubkey(
    proposal: &CarrotPaymentProposalSelfSendV1,
    other_enote_ephemeral_pubkey: Option<&EnoteEphemeralPubkey>,
) -> Result<EnoteEphemeralPubkey> {
    match (proposal.enote_ephemeral_pubkey.as_ref(), other_enote_ephemeral_pubkey) {
        (Some(ours), Some(theirs)) if ours != theirs => Err(Error::MismatchedEnoteEphemeralPubkey),
        (Some(d_e), _) | (None, Some(d_e)) => Ok(d_e.clone()),
        (None, None) => Err(Error::MissingEnoteEphemeralPubkeys),
    }
}

impl CarrotPaymentProposalV1 {
    fn enote_ephemeral_keypair(&self, input_context: &InputContext) -> Result<EnoteEphemeralKeypair> {
        EnoteEphemeralKeypair::for_destination(&self.randomness, input_context, &self.destination)
            .ok_or(Error::BadAddressPoints)
    }

    /// `D_e` this proposal produces under `input_context`
    pub fn get_enote_ephemeral_pubkey(&self, input_context: &InputContext) -> Result<EnoteEphemeralPubkey> {
        Ok(self.enote_ephemeral_keypair(input_context)?.pubkey)
    }

    /// `(D_e, s_sr)` with `s_sr = d_e ConvertPointE(K^j_v)`
    fn sender_ecdh(&self, input_context: &InputContext) -> Result<(EnoteEphemeralPubkey, MontgomeryECDH)> {
        let EnoteEphemeralKeypair { privkey, pubkey } = self.enote_ephemeral_keypair(input_context)?;
        let s_sender_receiver_unctx = privkey
            .exchange(&self.destination.address_view_pubkey)
            .ok_or(Error::BadAddressPoints)?;
        Ok((pubkey, s_sender_receiver_unctx))
    }

    pub fn get_coinbase_output_proposal(&self, block_index: BlockIndex) -> Result<CarrotCoinbaseEnoteV1> {
        if self.randomness == NULL_JANUS_ANCHOR {
            return Err(Error::MissingRandomness);
        } else if self.destination.is_subaddress {
            return Err(Error::CoinbaseSubaddress);
        } else if self.destination.payment_id != NULL_PAYMENT_ID {
            return Err(Error::CoinbasePaymentId);
        }

        let input_context = InputContext::new_coinbase(block_index);

        let (enote_ephemeral_pubkey, s_sender_receiver_unctx) = self.sender_ecdh(&input_context)?;

        let parts = ExternalParts::derive(
            &s_sender_receiver_unctx,
            &self.destination.address_spend_pubkey,
            &NULL_PAYMENT_ID,
            self.amount,
            CarrotEnoteType::Payment,
            &enote_ephemeral_pubkey,
            &input_context,
            true,
        )?;

        let anchor_enc = EncryptedJanusAnchor::encrypt(
            &self.randomness,
            &parts.s_sender_receiver,
            &parts.keyed.onetime_address,
        );

        Ok(CarrotCoinbaseEnoteV1 {
            onetime_address: parts.keyed.onetime_address.clone(),
            amount: self.amount,
            anchor_enc,
            view_tag: parts.view_tag,
            enote_ephemeral_pubkey,
            block_index,
        })
    }

    /// Also returns `pid_enc`, which the transaction carries outside the enote
    pub fn get_normal_output_proposal(
        &self,
        tx_first_key_image: KeyImage,
    ) -> Result<(RCTOutputEnoteProposal, EncryptedPaymentId)> {
        if self.randomness == NULL_JANUS_ANCHOR {
            return Err(Error::MissingRandomness);
        }

        let input_context = InputContext::new_ringct(&tx_first_key_image);

        let (enote_ephemeral_pubkey, s_sender_receiver_unctx) = self.sender_ecdh(&input_context)?;

        let parts = ExternalParts::derive(
            &s_sender_receiver_unctx,
            &self.destination.address_spend_pubkey,
            &self.destination.payment_id,
            self.amount,
            CarrotEnoteType::Payment,
            &enote_ephemeral_pubkey,
            &input_context,
            false,
        )?;

        let anchor_enc = EncryptedJanusAnchor::encrypt(
            &self.randomness,
            &parts.s_sender_receiver,
            &parts.keyed.onetime_address,
        );

        Ok((
            RCTOutputEnoteProposal {
                enote: CarrotEnoteV1 {
                    onetime_address: parts.keyed.onetime_address.clone(),
                    amount_commitment: parts.keyed.amount_commitment.clone(),
                    amount_enc: parts.keyed.amount_enc.clone(),
                    anchor_enc,
                    view_tag: parts.view_tag.clone(),
                    enote_ephemeral_pubkey,
                    tx_first_key_image,
                },
                amount: self.amount,
                amount_blinding_factor: parts.keyed.amount_blinding_factor.clone(),
            },
            parts.keyed.payment_id_enc.clone(),
        ))
    }
}

/// Params: `(is_subaddress, has_payment_id, amount)`
impl Random for CarrotPaymentProposalV1 {
    type Params = (bool, bool, Amount);
    fn new_random_with_params<R: rand_core::CryptoRngCore + ?Sized>(
        rng: &mut R,
        (is_subaddress, has_payment_id, amount): Self::Params,
    ) -> Self {
        Self {
            destination: CarrotDestinationV1::new_random_with_params(rng, (is_subaddress, has_payment_id)),
            amount,
            randomness: JanusAnchor::new_randomness(rng),
        }
    }
}

impl CarrotPaymentProposalSelfSendV1 {
    /// Self-send to an address whose `k_v` we hold, marked with `anchor_sp` so that the external
    /// scan path accepts it
    pub fn get_special_output_proposal<V: ViewIncomingKeyDevice + ?Sized>(
        &self,
        k_view_dev: &V,
        tx_first_key_image: KeyImage,
        other_enote_ephemeral_pubkey: Option<&EnoteEphemeralPubkey>,
    ) -> Result<RCTOutputEnoteProposal> {
        if self.internal_message.is_some() {
            return Err(Error::InternalMessageInSpecial);
        }

        let input_context = InputContext::new_ringct(&tx_first_key_image);

        let enote_ephemeral_pubkey =
            resolve_selfsend_enote_ephemeral_pubkey(self, other_enote_ephemeral_pubkey)?;

        // s_sr = k_v D_e
        let s_sender_receiver_unctx =
            k_view_dev.view_key_scalar_mult_x25519(enote_ephemeral_pubkey.as_montgomery_ref())?;

        let parts = ExternalParts::derive(
            &s_sender_receiver_unctx,
            &self.destination_address_spend_pubkey,
            &NULL_PAYMENT_ID,
            self.amount,
            self.enote_type,
            &enote_ephemeral_pubkey,
            &input_context,
            false,
        )?;

        let janus_anchor_special = k_view_dev.make_janus_anchor_special(
            &enote_ephemeral_pubkey,
            &input_context,
            &parts.keyed.onetime_address,
        )?;

        let anchor_enc = EncryptedJanusAnchor::encrypt(
            &janus_anchor_special,
            &parts.s_sender_receiver,
            &parts.keyed.onetime_address,
        );

        Ok(RCTOutputEnoteProposal {
            enote: CarrotEnoteV1 {
                onetime_address: parts.keyed.onetime_address.clone(),
                amount_commitment: parts.keyed.amount_commitment.clone(),
                amount_enc: parts.keyed.amount_enc.clone(),
                anchor_enc,
                view_tag: parts.view_tag.clone(),
                enote_ephemeral_pubkey,
                tx_first_key_image,
            },
            amount: self.amount,
            amount_blinding_factor: parts.keyed.amount_blinding_factor.clone(),
        })
    }

    /// Self-send keyed directly by `s_vb`, with no ECDH at all
    pub fn get_internal_output_proposal<B: ViewBalanceSecretDevice + ?Sized>(
        &self,
        s_view_balance_dev: &B,
        tx_first_key_image: KeyImage,
        other_enote_ephemeral_pubkey: Option<&EnoteEphemeralPubkey>,
    ) -> Result<RCTOutputEnoteProposal> {
        let input_context = InputContext::new_ringct(&tx_first_key_image);

        let enote_ephemeral_pubkey =
            resolve_selfsend_enote_ephemeral_pubkey(self, other_enote_ephemeral_pubkey)?;

        // s^ctx_sr = H_32[s_vb](D_e, input_context)
        let s_sender_receiver = s_view_balance_dev
            .make_internal_sender_receiver_secret(&enote_ephemeral_pubkey, &input_context)?;

        let keyed = SecretKeyedParts::derive(
            &s_sender_receiver,
            &self.destination_address_spend_pubkey,
            &NULL_PAYMENT_ID,
            self.amount,
            self.enote_type,
            false,
        )?;

        // vt = H_3[s_vb](input_context, Ko)
        let view_tag = s_view_balance_dev.make_internal_view_tag(&input_context, &keyed.onetime_address)?;

        let anchor = self.internal_message.clone().unwrap_or(NULL_JANUS_ANCHOR);
        let anchor_enc = EncryptedJanusAnchor::encrypt(&anchor, &s_sender_receiver, &keyed.onetime_address);

        Ok(RCTOutputEnoteProposal {
            enote: CarrotEnoteV1 {
                onetime_address: keyed.onetime_address.clone(),
                amount_commitment: keyed.amount_commitment.clone(),
                amount_enc: keyed.amount_enc.clone(),
                anchor_enc,
                view_tag,
                enote_ephemeral_pubkey,
                tx_first_key_image,
            },
            amount: self.amount,
            amount_blinding_factor: keyed.amount_blinding_factor.clone(),
        })
    }
}

/// Params: `(enote_type, amount)`. The destination has no known owner and `D_e` is random.
impl Random for CarrotPaymentProposalSelfSendV1 {
    type Params = (CarrotEnoteType, Amount);
    fn new_random_with_params<R: rand_core::CryptoRngCore + ?Sized>(
        rng: &mut R,
        (enote_type, amount): Self::Params,
    ) -> Self {
        Self {
            destination_address_spend_pubkey: new_random(rng),
            amount,
            enote_type,
            enote_ephemeral_pubkey: Some(new_random(rng)),
            internal_message: None,
        }
    }
}
