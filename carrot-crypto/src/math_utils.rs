//! Curve helpers shared by the enote, address, and opening code.
//!
//! Arguments are taken through the `As*` views so that any Carrot newtype of the right kind can be
//! passed directly. Functions that decompress return `None` for invalid encodings.

use curve25519_dalek::constants::ED25519_BASEPOINT_POINT;
use curve25519_dalek::{edwards::CompressedEdwardsY, EdwardsPoint, MontgomeryPoint, Scalar};

use crate::as_crypto::{AsEdwardsPoint, AsScalar};
use crate::generators;

/// `C = k G + a H`
pub fn commit<S: AsScalar>(amount: u64, amount_blinding_factor: &S) -> CompressedEdwardsY {
    (EdwardsPoint::mul_base(amount_blinding_factor.as_scalar_ref())
        + Scalar::from(amount) * *generators::H)
        .compress()
}

/// `C = G + a H`, a commitment with blinding factor 1
pub fn zero_commit(amount: u64) -> CompressedEdwardsY {
    (ED25519_BASEPOINT_POINT + Scalar::from(amount) * *generators::H).compress()
}

/// `x G + y T`, constant time in both scalars
pub(crate) fn gt_point(x: &Scalar, y: &Scalar) -> EdwardsPoint {
    EdwardsPoint::mul_base(x) + y * *generators::T
}

/// `x G + y T`
pub fn scalar_mul_gt<X: AsScalar, Y: AsScalar>(x: &X, y: &Y) -> CompressedEdwardsY {
    gt_point(x.as_scalar_ref(), y.as_scalar_ref()).compress()
}

/// `a G`
pub fn scalar_mul_base<S: AsScalar>(a: &S) -> CompressedEdwardsY {
    EdwardsPoint::mul_base(a.as_scalar_ref()).compress()
}

/// `a B` on the X25519 curve
pub fn scalar_mul_base_montgomery<S: AsScalar>(a: &S) -> MontgomeryPoint {
    MontgomeryPoint::mul_base(a.as_scalar_ref())
}

/// `ConvertPointE(P)`
#[allow(non_snake_case)]
pub fn convert_to_montgomery_vartime<P: AsEdwardsPoint>(P: &P) -> Option<MontgomeryPoint> {
    P.decompress().map(|P| P.to_montgomery())
}

/// `a P`
#[allow(non_snake_case)]
pub fn scalar_mul_key_vartime<S: AsScalar, P: AsEdwardsPoint>(
    a: &S,
    P: &P,
) -> Option<CompressedEdwardsY> {
    P.decompress().map(|P| (a.as_scalar_ref() * P).compress())
}

/// `P + Q`
#[allow(non_snake_case)]
pub fn add_edwards<P: AsEdwardsPoint, Q: AsEdwardsPoint>(P: &P, Q: &Q) -> Option<CompressedEdwardsY> {
    Some((P.decompress()? + Q.decompress()?).compress())
}

/// `P - Q`
#[allow(non_snake_case)]
pub fn sub_edwards<P: AsEdwardsPoint, Q: AsEdwardsPoint>(P: &P, Q: &Q) -> Option<CompressedEdwardsY> {
    Some((P.decompress()? - Q.decompress()?).compress())
}

/// True if `P` does not decompress or is not in the prime order subgroup
#[allow(non_snake_case)]
pub fn is_invalid_or_has_torsion<P: AsEdwardsPoint>(P: &P) -> bool {
    match P.decompress() {
        Some(P) => !P.is_torsion_free(),
        None => true,
    }
}
