//! Wallet fixtures shared by the integration tests
#![allow(dead_code)]

pub mod keys;
pub mod random;
