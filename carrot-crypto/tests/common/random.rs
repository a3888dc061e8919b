//! Inputs drawn from the OS RNG
use std::ops::Range;

use carrot_crypto::random::{new_random, new_random_with_params, Random};
use carrot_crypto::*;
use rand_core::OsRng;

use crate::common::keys::{SUBADDRESS_TABLE_MAJOR, SUBADDRESS_TABLE_MINOR};

pub fn gen_random<R: Random<Params = ()>>() -> R {
    new_random(&mut OsRng)
}

pub fn gen_random_with_params<R: Random>(p: R::Params) -> R {
    new_random_with_params(&mut OsRng, p)
}

fn gen_in(range: Range<u32>) -> u32 {
    range.start + gen_random::<u32>() % range.len() as u32
}

/// A subaddress, never the main address, inside the mock key table
pub fn gen_subaddress_index(derive_type: AddressDeriveType) -> SubaddressIndexExtended {
    let major = gen_in(1..SUBADDRESS_TABLE_MAJOR.end);
    let minor = gen_in(1..SUBADDRESS_TABLE_MINOR.end);
    SubaddressIndexExtended {
        index: SubaddressIndex::new(major, minor),
        derive_type,
    }
}

pub fn gen_janus_anchor() -> JanusAnchor {
    JanusAnchor::new_randomness(&mut OsRng)
}

pub fn gen_non_null_payment_id() -> PaymentId {
    std::iter::repeat_with(gen_random::<PaymentId>)
        .find(|payment_id| payment_id != &NULL_PAYMENT_ID)
        .unwrap()
}

pub fn gen_block_index() -> BlockIndex {
    1 + gen_random::<BlockIndex>() % 5_000_000
}
