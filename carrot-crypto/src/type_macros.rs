//! Generators for the small fixed-size newtypes that carry every Carrot value.
//!
//! Each generated type is a transparent wrapper around a curve element, scalar, or byte array that
//! knows how to serialize itself into a transcript and how to be drawn at random. Types declared
//! `secret` are wiped on drop and print as `<redacted>`.

pub use crate::as_crypto::{AsEdwardsPoint, AsMontgomeryPoint, AsScalar};
pub use crate::random::Random;
#[cfg(test)]
pub use crate::transcript::FromTranscriptBytes;
pub use crate::transcript::ToTranscriptBytes;

pub use curve25519_dalek::{edwards::CompressedEdwardsY, EdwardsPoint, MontgomeryPoint, Scalar};
pub use generic_array::GenericArray;
pub use zeroize::{Zeroize, ZeroizeOnDrop};

macro_rules! define_tiny_type {
    (@shared $tiny:ident, $base:ty) => {
        impl Random for $tiny {
            type Params = <$base as Random>::Params;
            fn new_random_with_params<R: rand_core::CryptoRngCore + ?Sized>(
                rng: &mut R,
                p: Self::Params,
            ) -> Self {
                Self(<$base>::new_random_with_params(rng, p))
            }
        }
        impl ToTranscriptBytes for $tiny {
            type Len = <$base as ToTranscriptBytes>::Len;
            fn to_transcript_bytes(&self) -> GenericArray<u8, Self::Len> {
                self.0.to_transcript_bytes()
            }
        }
        #[cfg(test)]
        impl FromTranscriptBytes for $tiny {
            fn from_transcript_bytes(bytes: GenericArray<u8, Self::Len>) -> Option<Self> {
                <$base>::from_transcript_bytes(bytes).map(Self)
            }
        }
    };
    ($(#[$meta:meta])* $tiny:ident, $base:ty, public $(, $extra_derivs:ident)*) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Hash, PartialEq, Eq, Zeroize $(, $extra_derivs)*)]
        pub struct $tiny(pub(crate) $base);
        define_tiny_type! {@shared $tiny, $base}
    };
    ($(#[$meta:meta])* $tiny:ident, $base:ty, secret $(, $extra_derivs:ident)*) => {
        $(#[$meta])*
        #[derive(Clone, Hash, PartialEq, Eq, Zeroize, ZeroizeOnDrop $(, $extra_derivs)*)]
        pub struct $tiny(pub(crate) $base);
        impl core::fmt::Debug for $tiny {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(concat!(stringify!($tiny), "(<redacted>)"))
            }
        }
        define_tiny_type! {@shared $tiny, $base}
    };
}

macro_rules! define_tiny_edwards_type {
    ($(#[$meta:meta])* $tiny:ident) => {
        define_tiny_type! {$(#[$meta])* $tiny, CompressedEdwardsY, public, Default}
        impl AsEdwardsPoint for $tiny {
            fn as_edwards_ref(&self) -> &CompressedEdwardsY {
                &self.0
            }
        }
        impl $tiny {
            pub fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(CompressedEdwardsY(bytes))
            }
            pub fn as_bytes(&self) -> &[u8; 32] {
                self.0.as_bytes()
            }
            #[allow(dead_code)]
            pub(crate) fn from_point(point: &EdwardsPoint) -> Self {
                Self(point.compress())
            }
        }
    };
}

macro_rules! define_tiny_montgomery_type {
    ($(#[$meta:meta])* $tiny:ident, $visibility:ident) => {
        define_tiny_type! {$(#[$meta])* $tiny, MontgomeryPoint, $visibility, Default}
        impl AsMontgomeryPoint for $tiny {
            fn as_montgomery_ref(&self) -> &MontgomeryPoint {
                &self.0
            }
        }
        impl $tiny {
            pub fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(MontgomeryPoint(bytes))
            }
            pub fn as_bytes(&self) -> &[u8; 32] {
                self.0.as_bytes()
            }
        }
    };
}

macro_rules! define_tiny_scalar_type {
    ($(#[$meta:meta])* $tiny:ident) => {
        define_tiny_type! {$(#[$meta])* $tiny, Scalar, secret, Default}
        impl AsScalar for $tiny {
            fn as_scalar_ref(&self) -> &Scalar {
                &self.0
            }
        }
        impl $tiny {
            pub fn as_bytes(&self) -> &[u8; 32] {
                self.0.as_bytes()
            }
            pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Self {
                Self(Scalar::from_bytes_mod_order(bytes))
            }
            #[allow(dead_code)]
            pub(crate) fn from_scalar(scalar: Scalar) -> Self {
                Self(scalar)
            }
        }
    };
}

macro_rules! define_tiny_byte_type {
    ($(#[$meta:meta])* $tiny:ident, $size:expr, $visibility:ident) => {
        define_tiny_type! {$(#[$meta])* $tiny, [u8; $size], $visibility}
        impl Default for $tiny {
            fn default() -> Self {
                Self([0u8; $size])
            }
        }
        impl From<[u8; $size]> for $tiny {
            fn from(value: [u8; $size]) -> Self {
                Self(value)
            }
        }
        impl $tiny {
            pub fn as_bytes(&self) -> &[u8; $size] {
                &self.0
            }
        }
    };
}

pub(crate) use define_tiny_byte_type;
pub(crate) use define_tiny_edwards_type;
pub(crate) use define_tiny_montgomery_type;
pub(crate) use define_tiny_scalar_type;
pub(crate) use define_tiny_type;
