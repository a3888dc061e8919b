//! Borrowing views from Carrot newtypes onto the underlying curve25519-dalek values, so that the
//! arithmetic helpers can accept any wrapper of the right kind.

use curve25519_dalek::{edwards::CompressedEdwardsY, EdwardsPoint, MontgomeryPoint, Scalar};

pub trait AsEdwardsPoint {
    fn as_edwards_ref(&self) -> &CompressedEdwardsY;

    /// Decompress, failing for encodings that are not on the curve
    fn decompress(&self) -> Option<EdwardsPoint> {
        self.as_edwards_ref().decompress()
    }
}

pub trait AsMontgomeryPoint {
    fn as_montgomery_ref(&self) -> &MontgomeryPoint;
}

pub trait AsScalar {
    fn as_scalar_ref(&self) -> &Scalar;
}
