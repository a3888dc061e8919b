#![no_std]

#[cfg(test)]
extern crate std;

pub mod account;
mod as_crypto;
mod consts;
mod core_types;
mod destination;
pub mod device;
mod domain_separators;
mod ecdh;
mod encryption;
mod enote;
pub mod fcmp;
mod generators;
mod hash_functions;
mod impls;
mod janus;
mod lazy_amount_commitment;
pub mod legacy;
mod math_utils;
mod onetime;
pub mod opening;
pub mod opening_hint;
mod output_set_finalization;
pub mod payments;
mod permutate;
pub mod random;
pub mod scan;
pub mod scan_unsafe;
pub mod spend_auth;
mod transcript;
mod type_macros;
#[cfg(test)]
mod unit_testing;

pub use as_crypto::*;
pub use core_types::*;
pub use destination::*;
pub use ecdh::EnoteEphemeralKeypair;
pub use enote::*;
pub use generators::{H_COMPRESSED, T_COMPRESSED, U_COMPRESSED, V_COMPRESSED};
pub use lazy_amount_commitment::LazyAmountCommitment;
pub use onetime::{try_get_carrot_amount, try_recompute_carrot_amount_commitment, SenderExtensions};
pub use output_set_finalization::*;
