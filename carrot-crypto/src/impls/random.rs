use curve25519_dalek::{edwards::CompressedEdwardsY, EdwardsPoint, MontgomeryPoint, Scalar};
use rand_core::CryptoRngCore;

use crate::random::{new_random, Random};

impl<const N: usize> Random for [u8; N] {
    type Params = ();
    fn new_random_with_params<R: CryptoRngCore + ?Sized>(rng: &mut R, _: ()) -> Self {
        let mut bytes = [0u8; N];
        rng.fill_bytes(&mut bytes);
        bytes
    }
}

macro_rules! impl_random_uint {
    ($($t:ident),+) => {$(
        impl Random for $t {
            type Params = ();
            fn new_random_with_params<R: CryptoRngCore + ?Sized>(rng: &mut R, _: ()) -> Self {
                Self::from_le_bytes(new_random(rng))
            }
        }
    )+};
}

impl_random_uint! {u8, u16, u32, u64}

impl Random for Scalar {
    type Params = ();
    fn new_random_with_params<R: CryptoRngCore + ?Sized>(rng: &mut R, _: ()) -> Self {
        Scalar::random(rng)
    }
}

/// `r G` for uniform `r`, so never torsioned
impl Random for EdwardsPoint {
    type Params = ();
    fn new_random_with_params<R: CryptoRngCore + ?Sized>(rng: &mut R, _: ()) -> Self {
        EdwardsPoint::mul_base(&new_random(rng))
    }
}

impl Random for CompressedEdwardsY {
    type Params = ();
    fn new_random_with_params<R: CryptoRngCore + ?Sized>(rng: &mut R, _: ()) -> Self {
        new_random::<EdwardsPoint, _>(rng).compress()
    }
}

impl Random for MontgomeryPoint {
    type Params = ();
    fn new_random_with_params<R: CryptoRngCore + ?Sized>(rng: &mut R, _: ()) -> Self {
        new_random::<EdwardsPoint, _>(rng).to_montgomery()
    }
}
