//! On-chain enote layouts.

use crate::core_types::*;
use crate::random::{new_random, Random};

/// Output of a non-coinbase transaction
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CarrotEnoteV1 {
    /// `Ko`
    pub onetime_address: OutputPubkey,
    /// `C_a`
    pub amount_commitment: AmountCommitment,
    /// `a_enc`
    pub amount_enc: EncryptedAmount,
    /// `anchor_enc`
    pub anchor_enc: EncryptedJanusAnchor,
    pub view_tag: ViewTag,
    /// `D_e`, possibly shared with the other output of a 2-out transaction
    pub enote_ephemeral_pubkey: EnoteEphemeralPubkey,
    /// `L_0`
    pub tx_first_key_image: KeyImage,
}

impl CarrotEnoteV1 {
    pub fn input_context(&self) -> InputContext {
        InputContext::new_ringct(&self.tx_first_key_image)
    }
}

/// Miner output. The amount is public and committed with blinding factor 1.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CarrotCoinbaseEnoteV1 {
    /// `Ko`
    pub onetime_address: OutputPubkey,
    pub amount: Amount,
    /// `anchor_enc`
    pub anchor_enc: EncryptedJanusAnchor,
    pub view_tag: ViewTag,
    /// `D_e`
    pub enote_ephemeral_pubkey: EnoteEphemeralPubkey,
    pub block_index: BlockIndex,
}

impl CarrotCoinbaseEnoteV1 {
    pub fn input_context(&self) -> InputContext {
        InputContext::new_coinbase(self.block_index)
    }

    /// `C_a = G + a H`
    pub fn amount_commitment(&self) -> AmountCommitment {
        AmountCommitment::clear_commit(self.amount)
    }
}

/// Well-formed fields with no known owner
impl Random for CarrotEnoteV1 {
    type Params = ();
    fn new_random_with_params<R: rand_core::CryptoRngCore + ?Sized>(rng: &mut R, _: ()) -> Self {
        Self {
            onetime_address: new_random(rng),
            amount_commitment: new_random(rng),
            amount_enc: new_random(rng),
            anchor_enc: new_random(rng),
            view_tag: new_random(rng),
            enote_ephemeral_pubkey: new_random(rng),
            tx_first_key_image: new_random(rng),
        }
    }
}

impl Random for CarrotCoinbaseEnoteV1 {
    type Params = ();
    fn new_random_with_params<R: rand_core::CryptoRngCore + ?Sized>(rng: &mut R, _: ()) -> Self {
        Self {
            onetime_address: new_random(rng),
            amount: rng.next_u64(),
            anchor_enc: new_random(rng),
            view_tag: new_random(rng),
            enote_ephemeral_pubkey: new_random(rng),
            block_index: rng.next_u64(),
        }
    }
}
