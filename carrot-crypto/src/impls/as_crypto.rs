use curve25519_dalek::{edwards::CompressedEdwardsY, MontgomeryPoint, Scalar};

use crate::as_crypto::*;

macro_rules! impl_as_self {
    ($trait_name:ident, $method:ident, $t:ty) => {
        impl $trait_name for $t {
            fn $method(&self) -> &$t {
                self
            }
        }
    };
}

impl_as_self! {AsEdwardsPoint, as_edwards_ref, CompressedEdwardsY}
impl_as_self! {AsMontgomeryPoint, as_montgomery_ref, MontgomeryPoint}
impl_as_self! {AsScalar, as_scalar_ref, Scalar}
