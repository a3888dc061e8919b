//! Scalar arithmetic for opening a one-time address `Ko = x G + y T`.
//!
//! Key material from different parts of the hierarchy only ever meets here, and every combination
//! produces an [`OpeningScalarSecret`] so that the result is wiped like its inputs.

use curve25519_dalek::edwards::CompressedEdwardsY;

use crate::account::{AddressSpendPubkey, GenerateImageKey, ProveSpendKey, SubaddressScalarSecret};
use crate::core_types::*;
use crate::legacy::{LegacySpendKey, LegacySubaddressExtension};
use crate::math_utils::scalar_mul_gt;
use crate::type_macros::*;

define_tiny_scalar_type! {
    /// `x` or `y` of an opening, or a partial sum on the way to one
    OpeningScalarSecret
}

impl OpeningScalarSecret {
    pub fn zero() -> Self {
        Self(Scalar::ZERO)
    }
}

/// `x G + y T` for some opening `(x, y)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenedPoint(CompressedEdwardsY);

impl OpenedPoint {
    pub fn scalar_mul_gt(x: &OpeningScalarSecret, y: &OpeningScalarSecret) -> Self {
        Self(scalar_mul_gt(x, y))
    }
}

impl AsEdwardsPoint for OpenedPoint {
    fn as_edwards_ref(&self) -> &CompressedEdwardsY {
        &self.0
    }
}

macro_rules! impl_opening_binop {
    ($tr:ident, $method:ident, $op:tt ; ncomm ; $lhs:ty, $rhs:ty) => {
        impl core::ops::$tr<&$rhs> for &$lhs {
            type Output = OpeningScalarSecret;
            fn $method(self, rhs: &$rhs) -> Self::Output {
                OpeningScalarSecret(self.as_scalar_ref() $op rhs.as_scalar_ref())
            }
        }
    };
    ($tr:ident, $method:ident, $op:tt ; $lhs:ty, $rhs:ty) => {
        impl_opening_binop! {$tr, $method, $op ; ncomm ; $lhs, $rhs}
        impl_opening_binop! {$tr, $method, $op ; ncomm ; $rhs, $lhs}
    };
}

// k^j_g + k^o_g, k^j_t + k^o_t
impl_opening_binop! {Add, add, + ; OpeningScalarSecret, OnetimeExtensionG}
impl_opening_binop! {Add, add, + ; OpeningScalarSecret, OnetimeExtensionT}
// k_s + k^j_subext
impl_opening_binop! {Add, add, + ; LegacySpendKey, LegacySubaddressExtension}

// k_gi k^j_subscal, k_ps k^j_subscal
impl_opening_binop! {Mul, mul, * ; GenerateImageKey, SubaddressScalarSecret}
impl_opening_binop! {Mul, mul, * ; ProveSpendKey, SubaddressScalarSecret}

macro_rules! impl_from_opened_point {
    ($($pt:ty),+) => {$(
        impl From<OpenedPoint> for $pt {
            fn from(value: OpenedPoint) -> Self {
                Self(value.0)
            }
        }
    )+};
}

impl_from_opened_point! {AddressSpendPubkey, OutputPubkey}
